use diesel::prelude::*;

use crate::domain::score::Score;
use crate::domain::types::ScoreId;
use crate::errors::{StoreError, StoreResult};
use crate::models::score::Score as DbScore;
use crate::repository::{DieselRepository, ScoreListQuery, ScoreReader, ScoreWriter};

impl ScoreReader for DieselRepository {
    fn list_scores(&self, query: ScoreListQuery) -> StoreResult<Vec<Score>> {
        use crate::schema::score;

        let mut conn = self.conn()?;

        let mut items = score::table
            .select(DbScore::as_select())
            .into_boxed::<diesel::sqlite::Sqlite>();
        if let Some(rating_id) = &query.rating_id {
            items = items.filter(score::rating_id.eq(rating_id.as_str().to_string()));
        }
        if let Some(rating_schema_id) = &query.rating_schema_id {
            items = items.filter(score::rating_schema_id.eq(rating_schema_id.as_str().to_string()));
        }

        let scores = items
            .order(score::score_id.asc())
            .load(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Score>, _>>()?;

        Ok(scores)
    }

    fn get_score_by_id(&self, id: &ScoreId) -> StoreResult<Option<Score>> {
        use crate::schema::score;

        let mut conn = self.conn()?;

        let score = score::table
            .filter(score::score_id.eq(id.as_str()))
            .select(DbScore::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(score.map(TryInto::try_into).transpose()?)
    }
}

impl ScoreWriter for DieselRepository {
    fn create_score(&self, score: &Score) -> StoreResult<()> {
        use crate::schema::score as score_table;

        let mut conn = self.conn()?;

        diesel::insert_into(score_table::table)
            .values(&DbScore::from(score))
            .execute(&mut conn)?;

        Ok(())
    }

    fn update_score(&self, score: &Score) -> StoreResult<()> {
        use crate::schema::score as score_table;

        let mut conn = self.conn()?;

        let affected =
            diesel::update(score_table::table.filter(score_table::score_id.eq(score.id.as_str())))
                .set(&DbScore::from(score))
                .execute(&mut conn)?;

        if affected == 0 {
            return Err(StoreError::NotFound(format!("score {}", score.id)));
        }
        Ok(())
    }

    fn delete_score(&self, id: &ScoreId) -> StoreResult<()> {
        use crate::schema::score;

        let mut conn = self.conn()?;

        let affected = diesel::delete(score::table.filter(score::score_id.eq(id.as_str())))
            .execute(&mut conn)?;

        if affected == 0 {
            return Err(StoreError::NotFound(format!("score {id}")));
        }
        Ok(())
    }
}
