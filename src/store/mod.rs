//! Entity lifecycle controller.
//!
//! [`RatingStore`] is the only sanctioned entry point for collaborators. Every
//! write validates against the warm cache, commits to the repository and only
//! then updates the cache, so a failed call leaves both untouched. Reads are
//! served from the cache alone.

use crate::domain::category::Category;
use crate::domain::item::Item;
use crate::domain::rating::Rating;
use crate::domain::score::Score;
use crate::domain::types::{CategoryId, ItemId, RatingId, ScoreId};
use crate::errors::{StoreError, StoreResult};
use crate::repository::{DieselRepository, ReadOnly, Repository};

pub mod bridge;
pub mod cache;
mod categories;
mod items;
mod ratings;

pub use cache::NormalizedCache;

/// Ratings store: a repository plus its in-memory mirror.
///
/// A value of this type only exists once the cache is fully loaded; see
/// [`RatingStore::open`] and [`RatingStore::rehydrate`]. Writes take
/// `&mut self`, so there is exactly one writer at a time.
pub struct RatingStore<R = DieselRepository> {
    repo: R,
    cache: NormalizedCache,
}

impl<R: Repository> RatingStore<R> {
    /// Read-only view of the normalized cache.
    pub fn cache(&self) -> &NormalizedCache {
        &self.cache
    }

    /// Read access to the durable store, bypassing the cache. Writes go
    /// through the store's own methods only.
    pub fn repository(&self) -> ReadOnly<'_, R> {
        ReadOnly::new(&self.repo)
    }

    pub fn category(&self, id: &CategoryId) -> StoreResult<&Category> {
        self.cache
            .category(id)
            .ok_or_else(|| StoreError::NotFound(format!("category {id}")))
    }

    pub fn categories(&self) -> Vec<&Category> {
        self.cache.categories()
    }

    pub fn find_categories<P>(&self, predicate: P) -> Vec<&Category>
    where
        P: Fn(&Category) -> bool,
    {
        self.cache.find_categories(predicate)
    }

    pub fn item(&self, id: &ItemId) -> StoreResult<&Item> {
        self.cache
            .item(id)
            .ok_or_else(|| StoreError::NotFound(format!("item {id}")))
    }

    pub fn items(&self) -> Vec<&Item> {
        self.cache.items()
    }

    pub fn find_items<P>(&self, predicate: P) -> Vec<&Item>
    where
        P: Fn(&Item) -> bool,
    {
        self.cache.find_items(predicate)
    }

    pub fn rating(&self, id: &RatingId) -> StoreResult<&Rating> {
        self.cache
            .rating(id)
            .ok_or_else(|| StoreError::NotFound(format!("rating {id}")))
    }

    pub fn ratings(&self) -> Vec<&Rating> {
        self.cache.ratings()
    }

    pub fn find_ratings<P>(&self, predicate: P) -> Vec<&Rating>
    where
        P: Fn(&Rating) -> bool,
    {
        self.cache.find_ratings(predicate)
    }

    pub fn ratings_for_item(&self, item_id: &ItemId) -> Vec<&Rating> {
        self.cache.ratings_for_item(item_id)
    }

    pub fn score(&self, id: &ScoreId) -> StoreResult<&Score> {
        self.cache
            .score(id)
            .ok_or_else(|| StoreError::NotFound(format!("score {id}")))
    }

    pub fn scores(&self) -> Vec<&Score> {
        self.cache.scores()
    }

    pub fn scores_for_rating(&self, rating_id: &RatingId) -> Vec<&Score> {
        self.cache.scores_for_rating(rating_id)
    }

    /// Weighted mean of a rating's scores using its category's weights.
    pub fn aggregate_score(&self, rating_id: &RatingId) -> StoreResult<Option<f64>> {
        let rating = self.rating(rating_id)?;
        let category = self.category(&rating.category_id)?;
        Ok(category.aggregate_score(self.cache.scores_for_rating(rating_id)))
    }
}

/// Log a failed durable write before handing the error back.
fn logged<T>(action: &str, result: StoreResult<T>) -> StoreResult<T> {
    result.inspect_err(|e| match e {
        StoreError::ConstraintViolation(_) | StoreError::NotFound(_) => {
            log::warn!("Rejected {action}: {e}")
        }
        _ => log::error!("Failed to {action}: {e}"),
    })
}

fn constraint(message: String) -> StoreError {
    log::warn!("Constraint check failed: {message}");
    StoreError::ConstraintViolation(message)
}
