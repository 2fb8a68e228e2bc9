use serde::{Deserialize, Serialize};

use crate::domain::types::{ItemId, ItemName};

/// The thing being rated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub name: ItemName,
    pub description: String,
}

/// Data required to insert a new [`Item`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewItem {
    pub id: Option<ItemId>,
    pub name: ItemName,
    pub description: String,
}

impl NewItem {
    pub fn into_item(self) -> Item {
        Item {
            id: self.id.unwrap_or_else(ItemId::generate),
            name: self.name,
            description: self.description,
        }
    }
}
