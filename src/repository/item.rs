use diesel::prelude::*;

use crate::domain::item::Item;
use crate::domain::types::ItemId;
use crate::errors::{StoreError, StoreResult};
use crate::models::item::Item as DbItem;
use crate::repository::{DieselRepository, ItemReader, ItemWriter};

impl ItemReader for DieselRepository {
    fn list_items(&self) -> StoreResult<Vec<Item>> {
        use crate::schema::item;

        let mut conn = self.conn()?;

        let items = item::table
            .order((item::item_name.asc(), item::item_id.asc()))
            .select(DbItem::as_select())
            .load(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Item>, _>>()?;

        Ok(items)
    }

    fn get_item_by_id(&self, id: &ItemId) -> StoreResult<Option<Item>> {
        use crate::schema::item;

        let mut conn = self.conn()?;

        let item = item::table
            .filter(item::item_id.eq(id.as_str()))
            .select(DbItem::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(item.map(TryInto::try_into).transpose()?)
    }
}

impl ItemWriter for DieselRepository {
    fn create_item(&self, item: &Item) -> StoreResult<()> {
        use crate::schema::item as item_table;

        let mut conn = self.conn()?;

        diesel::insert_into(item_table::table)
            .values(&DbItem::from(item))
            .execute(&mut conn)?;

        Ok(())
    }

    fn update_item(&self, item: &Item) -> StoreResult<()> {
        use crate::schema::item as item_table;

        let mut conn = self.conn()?;

        let affected =
            diesel::update(item_table::table.filter(item_table::item_id.eq(item.id.as_str())))
                .set(&DbItem::from(item))
                .execute(&mut conn)?;

        if affected == 0 {
            return Err(StoreError::NotFound(format!("item {}", item.id)));
        }
        Ok(())
    }

    fn delete_item(&self, id: &ItemId) -> StoreResult<()> {
        use crate::schema::{item, rating};

        let mut conn = self.conn()?;

        conn.transaction::<_, StoreError, _>(|conn| {
            let ratings = rating::table
                .filter(rating::item_id.eq(id.as_str()))
                .count()
                .get_result::<i64>(conn)?;
            if ratings > 0 {
                return Err(StoreError::ConstraintViolation(format!(
                    "item {id} is referenced by {ratings} rating(s)"
                )));
            }

            let affected =
                diesel::delete(item::table.filter(item::item_id.eq(id.as_str()))).execute(conn)?;
            if affected == 0 {
                return Err(StoreError::NotFound(format!("item {id}")));
            }
            Ok(())
        })
    }
}
