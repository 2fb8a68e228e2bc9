//! Error conversion glue between the value-object, form and store layers.
//!
//! The domain layer must not depend on store error types, so the
//! conversions live here. Every form failure becomes a
//! [`StoreError::ValidationError`] raised before any storage I/O.

use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;
use crate::errors::StoreError;
use crate::forms::categories::CategoryFormError;
use crate::forms::items::ItemFormError;
use crate::forms::ratings::RatingFormError;

impl From<TypeConstraintError> for StoreError {
    fn from(val: TypeConstraintError) -> Self {
        StoreError::ValidationError(val.to_string())
    }
}

impl From<ValidationErrors> for StoreError {
    fn from(val: ValidationErrors) -> Self {
        StoreError::ValidationError(val.to_string())
    }
}

impl From<CategoryFormError> for StoreError {
    fn from(val: CategoryFormError) -> Self {
        StoreError::ValidationError(val.to_string())
    }
}

impl From<ItemFormError> for StoreError {
    fn from(val: ItemFormError) -> Self {
        StoreError::ValidationError(val.to_string())
    }
}

impl From<RatingFormError> for StoreError {
    fn from(val: RatingFormError) -> Self {
        StoreError::ValidationError(val.to_string())
    }
}
