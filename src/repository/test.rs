use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::domain::category::Category;
use crate::domain::item::Item;
use crate::domain::rating::Rating;
use crate::domain::score::Score;
use crate::domain::types::{CategoryId, ItemId, RatingId, ScoreId};
use crate::errors::{StoreError, StoreResult};
use crate::repository::{
    CategoryReader, CategoryWriter, ItemReader, ItemWriter, RatingListQuery, RatingReader,
    RatingWriter, ScoreListQuery, ScoreReader, ScoreWriter,
};

#[derive(Default)]
struct TestData {
    categories: HashMap<CategoryId, Category>,
    items: HashMap<ItemId, Item>,
    ratings: HashMap<RatingId, Rating>,
    scores: HashMap<ScoreId, Score>,
}

/// Simple in-memory repository used for unit tests.
///
/// Integrity rules are left to the lifecycle controller; the only failure
/// it produces is the one switched on with [`TestRepository::fail_writes`].
#[derive(Default)]
pub struct TestRepository {
    data: RefCell<TestData>,
    failing: Cell<bool>,
    writes: Cell<usize>,
}

impl TestRepository {
    pub fn new(categories: Vec<Category>, items: Vec<Item>) -> Self {
        let repo = Self::default();
        {
            let mut data = repo.data.borrow_mut();
            data.categories = categories.into_iter().map(|c| (c.id.clone(), c)).collect();
            data.items = items.into_iter().map(|i| (i.id.clone(), i)).collect();
        }
        repo
    }

    /// Make every subsequent write fail with a database error.
    pub fn fail_writes(&self, failing: bool) {
        self.failing.set(failing);
    }

    /// Number of successful writes performed so far.
    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    fn write<T>(&self, apply: impl FnOnce(&mut TestData) -> StoreResult<T>) -> StoreResult<T> {
        if self.failing.get() {
            return Err(StoreError::Database("write failed".to_string()));
        }
        let result = apply(&mut self.data.borrow_mut())?;
        self.writes.set(self.writes.get() + 1);
        Ok(result)
    }
}

fn missing(kind: &str, id: &impl std::fmt::Display) -> StoreError {
    StoreError::NotFound(format!("{kind} {id}"))
}

impl CategoryReader for TestRepository {
    fn list_categories(&self) -> StoreResult<Vec<Category>> {
        let mut items: Vec<Category> = self.data.borrow().categories.values().cloned().collect();
        items.sort_by(|a, b| (&a.name, &a.id).cmp(&(&b.name, &b.id)));
        Ok(items)
    }

    fn get_category_by_id(&self, id: &CategoryId) -> StoreResult<Option<Category>> {
        Ok(self.data.borrow().categories.get(id).cloned())
    }
}

impl CategoryWriter for TestRepository {
    fn create_category(&self, category: &Category) -> StoreResult<()> {
        self.write(|data| {
            data.categories.insert(category.id.clone(), category.clone());
            Ok(())
        })
    }

    fn update_category(&self, category: &Category) -> StoreResult<()> {
        self.write(|data| match data.categories.get_mut(&category.id) {
            Some(existing) => {
                *existing = category.clone();
                Ok(())
            }
            None => Err(missing("category", &category.id)),
        })
    }

    fn delete_category(&self, id: &CategoryId) -> StoreResult<()> {
        self.write(|data| {
            data.categories
                .remove(id)
                .map(|_| ())
                .ok_or_else(|| missing("category", id))
        })
    }
}

impl ItemReader for TestRepository {
    fn list_items(&self) -> StoreResult<Vec<Item>> {
        let mut items: Vec<Item> = self.data.borrow().items.values().cloned().collect();
        items.sort_by(|a, b| (&a.name, &a.id).cmp(&(&b.name, &b.id)));
        Ok(items)
    }

    fn get_item_by_id(&self, id: &ItemId) -> StoreResult<Option<Item>> {
        Ok(self.data.borrow().items.get(id).cloned())
    }
}

impl ItemWriter for TestRepository {
    fn create_item(&self, item: &Item) -> StoreResult<()> {
        self.write(|data| {
            data.items.insert(item.id.clone(), item.clone());
            Ok(())
        })
    }

    fn update_item(&self, item: &Item) -> StoreResult<()> {
        self.write(|data| match data.items.get_mut(&item.id) {
            Some(existing) => {
                *existing = item.clone();
                Ok(())
            }
            None => Err(missing("item", &item.id)),
        })
    }

    fn delete_item(&self, id: &ItemId) -> StoreResult<()> {
        self.write(|data| {
            data.items
                .remove(id)
                .map(|_| ())
                .ok_or_else(|| missing("item", id))
        })
    }
}

impl RatingReader for TestRepository {
    fn list_ratings(&self, query: RatingListQuery) -> StoreResult<Vec<Rating>> {
        let mut items: Vec<Rating> = self.data.borrow().ratings.values().cloned().collect();
        if let Some(item_id) = query.item_id {
            items.retain(|r| r.item_id == item_id);
        }
        if let Some(category_id) = query.category_id {
            items.retain(|r| r.category_id == category_id);
        }
        items.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        Ok(items)
    }

    fn get_rating_by_id(&self, id: &RatingId) -> StoreResult<Option<Rating>> {
        Ok(self.data.borrow().ratings.get(id).cloned())
    }
}

impl RatingWriter for TestRepository {
    fn create_rating(&self, rating: &Rating, scores: &[Score]) -> StoreResult<()> {
        self.write(|data| {
            data.ratings.insert(rating.id.clone(), rating.clone());
            for score in scores {
                data.scores.insert(score.id.clone(), score.clone());
            }
            Ok(())
        })
    }

    fn update_rating(&self, rating: &Rating) -> StoreResult<()> {
        self.write(|data| match data.ratings.get_mut(&rating.id) {
            Some(existing) => {
                *existing = rating.clone();
                Ok(())
            }
            None => Err(missing("rating", &rating.id)),
        })
    }

    fn delete_rating(&self, id: &RatingId) -> StoreResult<()> {
        self.write(|data| {
            data.ratings.remove(id).ok_or_else(|| missing("rating", id))?;
            data.scores.retain(|_, score| &score.rating_id != id);
            Ok(())
        })
    }
}

impl ScoreReader for TestRepository {
    fn list_scores(&self, query: ScoreListQuery) -> StoreResult<Vec<Score>> {
        let mut items: Vec<Score> = self.data.borrow().scores.values().cloned().collect();
        if let Some(rating_id) = query.rating_id {
            items.retain(|s| s.rating_id == rating_id);
        }
        if let Some(rating_schema_id) = query.rating_schema_id {
            items.retain(|s| s.rating_schema_id == rating_schema_id);
        }
        items.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(items)
    }

    fn get_score_by_id(&self, id: &ScoreId) -> StoreResult<Option<Score>> {
        Ok(self.data.borrow().scores.get(id).cloned())
    }
}

impl ScoreWriter for TestRepository {
    fn create_score(&self, score: &Score) -> StoreResult<()> {
        self.write(|data| {
            data.scores.insert(score.id.clone(), score.clone());
            Ok(())
        })
    }

    fn update_score(&self, score: &Score) -> StoreResult<()> {
        self.write(|data| match data.scores.get_mut(&score.id) {
            Some(existing) => {
                *existing = score.clone();
                Ok(())
            }
            None => Err(missing("score", &score.id)),
        })
    }

    fn delete_score(&self, id: &ScoreId) -> StoreResult<()> {
        self.write(|data| {
            data.scores
                .remove(id)
                .map(|_| ())
                .ok_or_else(|| missing("score", id))
        })
    }
}
