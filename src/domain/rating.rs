use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryId, ItemId, RatingId, RatingSchemaId, ScoreId, ScoreValue};

/// One scoring event of an item against a category's metrics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rating {
    pub id: RatingId,
    pub item_id: ItemId,
    pub category_id: CategoryId,
    pub created_at: NaiveDateTime,
}

/// A metric score submitted together with a new rating.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RatingScore {
    pub id: Option<ScoreId>,
    pub rating_schema_id: RatingSchemaId,
    pub value: ScoreValue,
}

/// Information required to create a [`Rating`] and its scores.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewRating {
    pub id: Option<RatingId>,
    pub item_id: ItemId,
    pub category_id: CategoryId,
    pub scores: Vec<RatingScore>,
}
