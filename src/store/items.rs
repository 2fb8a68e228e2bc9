use crate::domain::item::{Item, NewItem};
use crate::domain::types::ItemId;
use crate::errors::{StoreError, StoreResult};
use crate::repository::Repository;
use crate::store::{RatingStore, constraint, logged};

impl<R: Repository> RatingStore<R> {
    pub fn create_item(&mut self, new_item: NewItem) -> StoreResult<Item> {
        let item = new_item.into_item();
        if self.cache.item(&item.id).is_some() {
            return Err(constraint(format!("item {} already exists", item.id)));
        }

        logged("create item", self.repo.create_item(&item))?;
        log::info!("Created item {}", item.id);

        self.cache.put_item(item.clone());
        Ok(item)
    }

    pub fn update_item(&mut self, item: Item) -> StoreResult<Item> {
        if self.cache.item(&item.id).is_none() {
            return Err(StoreError::NotFound(format!("item {}", item.id)));
        }

        logged("update item", self.repo.update_item(&item))?;

        self.cache.put_item(item.clone());
        Ok(item)
    }

    /// Delete an item. Rejected while ratings reference it.
    pub fn remove_item(&mut self, id: &ItemId) -> StoreResult<()> {
        if self.cache.item(id).is_none() {
            return Err(StoreError::NotFound(format!("item {id}")));
        }
        let ratings = self.cache.ratings_for_item(id).len();
        if ratings > 0 {
            return Err(constraint(format!(
                "item {id} is referenced by {ratings} rating(s)"
            )));
        }

        logged("delete item", self.repo.delete_item(id))?;
        log::info!("Deleted item {id}");

        self.cache.drop_item(id);
        Ok(())
    }
}
