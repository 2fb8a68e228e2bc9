use std::collections::HashMap;

use diesel::prelude::*;

use crate::domain::category::Category;
use crate::domain::types::CategoryId;
use crate::errors::{StoreError, StoreResult};
use crate::models::category::{
    Category as DbCategory, RatingSchema as DbRatingSchema, rating_schema_rows,
};
use crate::repository::{CategoryReader, CategoryWriter, DieselRepository};

impl CategoryReader for DieselRepository {
    fn list_categories(&self) -> StoreResult<Vec<Category>> {
        use crate::schema::{category, rating_schema};

        let mut conn = self.conn()?;

        let categories = category::table
            .order((category::category_name.asc(), category::category_id.asc()))
            .select(DbCategory::as_select())
            .load(&mut conn)?;

        let mut schemas: HashMap<String, Vec<DbRatingSchema>> = HashMap::new();
        for schema in rating_schema::table
            .select(DbRatingSchema::as_select())
            .load(&mut conn)?
        {
            schemas
                .entry(schema.category_id.clone())
                .or_default()
                .push(schema);
        }

        let categories = categories
            .into_iter()
            .map(|row| {
                let owned = schemas.remove(&row.category_id).unwrap_or_default();
                row.into_domain(owned)
            })
            .collect::<Result<Vec<Category>, _>>()?;

        Ok(categories)
    }

    fn get_category_by_id(&self, id: &CategoryId) -> StoreResult<Option<Category>> {
        use crate::schema::{category, rating_schema};

        let mut conn = self.conn()?;

        let Some(row) = category::table
            .filter(category::category_id.eq(id.as_str()))
            .select(DbCategory::as_select())
            .first(&mut conn)
            .optional()?
        else {
            return Ok(None);
        };

        let schemas = rating_schema::table
            .filter(rating_schema::category_id.eq(id.as_str()))
            .select(DbRatingSchema::as_select())
            .load(&mut conn)?;

        Ok(Some(row.into_domain(schemas)?))
    }
}

impl CategoryWriter for DieselRepository {
    fn create_category(&self, category: &Category) -> StoreResult<()> {
        use crate::schema::{category as category_table, rating_schema};

        let mut conn = self.conn()?;
        let db_category = DbCategory::from(category);
        let db_schemas = rating_schema_rows(category);

        conn.transaction::<_, StoreError, _>(|conn| {
            diesel::insert_into(category_table::table)
                .values(&db_category)
                .execute(conn)?;

            if !db_schemas.is_empty() {
                diesel::insert_into(rating_schema::table)
                    .values(&db_schemas)
                    .execute(conn)?;
            }

            Ok(())
        })
    }

    fn update_category(&self, category: &Category) -> StoreResult<()> {
        use crate::schema::{category as category_table, rating_schema, score};

        let mut conn = self.conn()?;
        let db_category = DbCategory::from(category);
        let db_schemas = rating_schema_rows(category);
        let kept_ids: Vec<String> = db_schemas
            .iter()
            .map(|schema| schema.rating_schema_id.clone())
            .collect();

        conn.transaction::<_, StoreError, _>(|conn| {
            let affected = diesel::update(
                category_table::table.filter(category_table::category_id.eq(category.id.as_str())),
            )
            .set(&db_category)
            .execute(conn)?;

            if affected == 0 {
                return Err(StoreError::NotFound(format!("category {}", category.id)));
            }

            let removed = rating_schema::table
                .filter(rating_schema::category_id.eq(category.id.as_str()))
                .filter(rating_schema::rating_schema_id.ne_all(kept_ids.clone()));

            let scored = score::table
                .filter(
                    score::rating_schema_id
                        .eq_any(removed.clone().select(rating_schema::rating_schema_id)),
                )
                .count()
                .get_result::<i64>(conn)?;

            if scored > 0 {
                return Err(StoreError::ConstraintViolation(format!(
                    "category {} has scored metrics that cannot be removed",
                    category.id
                )));
            }

            diesel::delete(removed).execute(conn)?;

            for schema in &db_schemas {
                let updated = diesel::update(
                    rating_schema::table
                        .filter(rating_schema::rating_schema_id.eq(&schema.rating_schema_id))
                        .filter(rating_schema::category_id.eq(category.id.as_str())),
                )
                .set(schema)
                .execute(conn)?;

                if updated == 0 {
                    diesel::insert_into(rating_schema::table)
                        .values(schema)
                        .execute(conn)?;
                }
            }

            Ok(())
        })
    }

    fn delete_category(&self, id: &CategoryId) -> StoreResult<()> {
        use crate::schema::{category, rating, rating_schema, score};

        let mut conn = self.conn()?;

        conn.transaction::<_, StoreError, _>(|conn| {
            let exists = category::table
                .filter(category::category_id.eq(id.as_str()))
                .count()
                .get_result::<i64>(conn)?;
            if exists == 0 {
                return Err(StoreError::NotFound(format!("category {id}")));
            }

            let ratings = rating::table
                .filter(rating::category_id.eq(id.as_str()))
                .count()
                .get_result::<i64>(conn)?;

            let scores = score::table
                .filter(
                    score::rating_schema_id.eq_any(
                        rating_schema::table
                            .filter(rating_schema::category_id.eq(id.as_str()))
                            .select(rating_schema::rating_schema_id),
                    ),
                )
                .count()
                .get_result::<i64>(conn)?;

            if ratings > 0 || scores > 0 {
                return Err(StoreError::ConstraintViolation(format!(
                    "category {id} is referenced by {ratings} rating(s) and {scores} score(s)"
                )));
            }

            diesel::delete(rating_schema::table.filter(rating_schema::category_id.eq(id.as_str())))
                .execute(conn)?;
            diesel::delete(category::table.filter(category::category_id.eq(id.as_str())))
                .execute(conn)?;

            Ok(())
        })
    }
}
