use diesel::prelude::*;

use crate::domain::score::Score as DomainScore;
use crate::domain::types::{RatingId, RatingSchemaId, ScoreId, ScoreValue, TypeConstraintError};

/// Diesel model representing the `score` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::score, primary_key(score_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Score {
    pub score_id: String,
    pub rating_id: String,
    pub score_value: i32,
    pub rating_schema_id: String,
}

impl TryFrom<Score> for DomainScore {
    type Error = TypeConstraintError;

    fn try_from(score: Score) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ScoreId::new(score.score_id)?,
            rating_id: RatingId::new(score.rating_id)?,
            rating_schema_id: RatingSchemaId::new(score.rating_schema_id)?,
            value: ScoreValue::new(score.score_value)?,
        })
    }
}

impl From<&DomainScore> for Score {
    fn from(score: &DomainScore) -> Self {
        Self {
            score_id: score.id.as_str().to_string(),
            rating_id: score.rating_id.as_str().to_string(),
            score_value: score.value.get(),
            rating_schema_id: score.rating_schema_id.as_str().to_string(),
        }
    }
}
