use diesel::prelude::*;

use crate::domain::item::Item as DomainItem;
use crate::domain::types::{ItemId, ItemName, TypeConstraintError};

/// Diesel model representing the `item` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::item, primary_key(item_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Item {
    pub item_id: String,
    pub item_name: String,
    pub item_description: String,
}

impl TryFrom<Item> for DomainItem {
    type Error = TypeConstraintError;

    fn try_from(item: Item) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ItemId::new(item.item_id)?,
            name: ItemName::new(item.item_name)?,
            description: item.item_description,
        })
    }
}

impl From<&DomainItem> for Item {
    fn from(item: &DomainItem) -> Self {
        Self {
            item_id: item.id.as_str().to_string(),
            item_name: item.name.as_str().to_string(),
            item_description: item.description.clone(),
        }
    }
}
