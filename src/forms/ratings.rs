use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::rating::{NewRating, RatingScore};
use crate::domain::types::{CategoryId, ItemId, RatingSchemaId, ScoreValue, TypeConstraintError};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ScoreForm {
    #[validate(length(min = 1))]
    pub rating_schema_id: String,
    #[validate(range(min = 0))]
    pub score_value: i32,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RatingForm {
    #[validate(length(min = 1))]
    pub item_id: String,
    #[validate(length(min = 1))]
    pub category_id: String,
    #[validate(nested)]
    #[serde(default)]
    pub scores: Vec<ScoreForm>,
}

#[derive(Debug, Error)]
pub enum RatingFormError {
    #[error("Rating form validation failed: {0}")]
    Validation(String),
    #[error("Rating form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for RatingFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for RatingFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<RatingForm> for NewRating {
    type Error = RatingFormError;

    fn try_from(value: RatingForm) -> Result<Self, Self::Error> {
        value.validate()?;
        let scores = value
            .scores
            .into_iter()
            .map(|score| {
                Ok(RatingScore {
                    id: None,
                    rating_schema_id: RatingSchemaId::new(score.rating_schema_id)?,
                    value: ScoreValue::new(score.score_value)?,
                })
            })
            .collect::<Result<Vec<_>, TypeConstraintError>>()?;

        Ok(Self {
            id: None,
            item_id: ItemId::new(value.item_id)?,
            category_id: CategoryId::new(value.category_id)?,
            scores,
        })
    }
}
