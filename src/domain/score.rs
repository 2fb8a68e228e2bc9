use serde::{Deserialize, Serialize};

use crate::domain::types::{RatingId, RatingSchemaId, ScoreId, ScoreValue};

/// Value given to one metric within one rating.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Score {
    pub id: ScoreId,
    pub rating_id: RatingId,
    pub rating_schema_id: RatingSchemaId,
    pub value: ScoreValue,
}

/// Information required to add a [`Score`] to an existing rating.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewScore {
    pub id: Option<ScoreId>,
    pub rating_id: RatingId,
    pub rating_schema_id: RatingSchemaId,
    pub value: ScoreValue,
}

impl NewScore {
    pub fn into_score(self) -> Score {
        Score {
            id: self.id.unwrap_or_else(ScoreId::generate),
            rating_id: self.rating_id,
            rating_schema_id: self.rating_schema_id,
            value: self.value,
        }
    }
}
