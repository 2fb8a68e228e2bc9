use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::rating::Rating as DomainRating;
use crate::domain::types::{CategoryId, ItemId, RatingId, TypeConstraintError};

/// Diesel model representing the `rating` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::rating, primary_key(rating_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Rating {
    pub rating_id: String,
    pub item_id: String,
    pub category_id: String,
    pub rating_created_at: NaiveDateTime,
}

impl TryFrom<Rating> for DomainRating {
    type Error = TypeConstraintError;

    fn try_from(rating: Rating) -> Result<Self, Self::Error> {
        Ok(Self {
            id: RatingId::new(rating.rating_id)?,
            item_id: ItemId::new(rating.item_id)?,
            category_id: CategoryId::new(rating.category_id)?,
            created_at: rating.rating_created_at,
        })
    }
}

impl From<&DomainRating> for Rating {
    fn from(rating: &DomainRating) -> Self {
        Self {
            rating_id: rating.id.as_str().to_string(),
            item_id: rating.item_id.as_str().to_string(),
            category_id: rating.category_id.as_str().to_string(),
            rating_created_at: rating.created_at,
        }
    }
}
