use diesel::prelude::*;

use crate::domain::rating::Rating;
use crate::domain::score::Score;
use crate::domain::types::RatingId;
use crate::errors::{StoreError, StoreResult};
use crate::models::rating::Rating as DbRating;
use crate::models::score::Score as DbScore;
use crate::repository::{DieselRepository, RatingListQuery, RatingReader, RatingWriter};

impl RatingReader for DieselRepository {
    fn list_ratings(&self, query: RatingListQuery) -> StoreResult<Vec<Rating>> {
        use crate::schema::rating;

        let mut conn = self.conn()?;

        let mut items = rating::table
            .select(DbRating::as_select())
            .into_boxed::<diesel::sqlite::Sqlite>();
        if let Some(item_id) = &query.item_id {
            items = items.filter(rating::item_id.eq(item_id.as_str().to_string()));
        }
        if let Some(category_id) = &query.category_id {
            items = items.filter(rating::category_id.eq(category_id.as_str().to_string()));
        }

        let ratings = items
            .order((rating::rating_created_at.asc(), rating::rating_id.asc()))
            .load(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Rating>, _>>()?;

        Ok(ratings)
    }

    fn get_rating_by_id(&self, id: &RatingId) -> StoreResult<Option<Rating>> {
        use crate::schema::rating;

        let mut conn = self.conn()?;

        let rating = rating::table
            .filter(rating::rating_id.eq(id.as_str()))
            .select(DbRating::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(rating.map(TryInto::try_into).transpose()?)
    }
}

impl RatingWriter for DieselRepository {
    fn create_rating(&self, rating: &Rating, scores: &[Score]) -> StoreResult<()> {
        use crate::schema::{rating as rating_table, score};

        let mut conn = self.conn()?;
        let db_rating = DbRating::from(rating);
        let db_scores: Vec<DbScore> = scores.iter().map(DbScore::from).collect();

        conn.transaction::<_, StoreError, _>(|conn| {
            diesel::insert_into(rating_table::table)
                .values(&db_rating)
                .execute(conn)?;

            if !db_scores.is_empty() {
                diesel::insert_into(score::table)
                    .values(&db_scores)
                    .execute(conn)?;
            }

            Ok(())
        })
    }

    fn update_rating(&self, rating: &Rating) -> StoreResult<()> {
        use crate::schema::rating as rating_table;

        let mut conn = self.conn()?;

        let affected = diesel::update(
            rating_table::table.filter(rating_table::rating_id.eq(rating.id.as_str())),
        )
        .set(&DbRating::from(rating))
        .execute(&mut conn)?;

        if affected == 0 {
            return Err(StoreError::NotFound(format!("rating {}", rating.id)));
        }
        Ok(())
    }

    fn delete_rating(&self, id: &RatingId) -> StoreResult<()> {
        use crate::schema::{rating, score};

        let mut conn = self.conn()?;

        conn.transaction::<_, StoreError, _>(|conn| {
            diesel::delete(score::table.filter(score::rating_id.eq(id.as_str()))).execute(conn)?;

            let affected = diesel::delete(rating::table.filter(rating::rating_id.eq(id.as_str())))
                .execute(conn)?;
            if affected == 0 {
                return Err(StoreError::NotFound(format!("rating {id}")));
            }
            Ok(())
        })
    }
}
