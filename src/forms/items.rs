use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::item::NewItem;
use crate::domain::types::{ItemId, ItemName, TypeConstraintError};

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ItemForm {
    pub item_id: Option<String>,
    #[validate(length(min = 1))]
    pub item_name: String,
    #[serde(default)]
    pub item_description: String,
}

#[derive(Debug, Error)]
pub enum ItemFormError {
    #[error("Item form validation failed: {0}")]
    Validation(String),
    #[error("Item form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for ItemFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for ItemFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<ItemForm> for NewItem {
    type Error = ItemFormError;

    fn try_from(value: ItemForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            id: value.item_id.map(ItemId::new).transpose()?,
            name: ItemName::new(value.item_name)?,
            description: value.item_description.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_form_trims_fields() {
        let form = ItemForm {
            item_id: None,
            item_name: "  Dune ".to_string(),
            item_description: " Herbert ".to_string(),
        };
        let item: NewItem = form.try_into().unwrap();
        assert_eq!(item.name.as_str(), "Dune");
        assert_eq!(item.description, "Herbert");
    }

    #[test]
    fn item_form_deserializes_without_description() {
        let form: ItemForm = serde_json::from_str(r#"{"item_name": "Dune"}"#).unwrap();
        let item: Result<NewItem, _> = form.try_into();
        assert!(item.is_ok());
    }
}
