use crate::db::{DbConnection, DbPool};
use crate::domain::category::Category;
use crate::domain::item::Item;
use crate::domain::rating::Rating;
use crate::domain::score::Score;
use crate::domain::types::{CategoryId, ItemId, RatingId, RatingSchemaId, ScoreId};
use crate::errors::StoreResult;

pub mod category;
pub mod item;
pub mod rating;
pub mod score;
#[cfg(test)]
pub mod test;

/// Repository implementation backed by Diesel and SQLite.
///
/// Every write runs in a single transaction; a failed call leaves the
/// database untouched.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> StoreResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Query parameters used when listing ratings.
#[derive(Debug, Clone, Default)]
pub struct RatingListQuery {
    /// Filter by rated item.
    pub item_id: Option<ItemId>,
    /// Filter by category rated against.
    pub category_id: Option<CategoryId>,
}

impl RatingListQuery {
    pub fn item(mut self, item_id: ItemId) -> Self {
        self.item_id = Some(item_id);
        self
    }
    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }
}

/// Query parameters used when listing scores.
#[derive(Debug, Clone, Default)]
pub struct ScoreListQuery {
    /// Filter by owning rating.
    pub rating_id: Option<RatingId>,
    /// Filter by scored metric.
    pub rating_schema_id: Option<RatingSchemaId>,
}

impl ScoreListQuery {
    pub fn rating(mut self, rating_id: RatingId) -> Self {
        self.rating_id = Some(rating_id);
        self
    }
    pub fn metric(mut self, rating_schema_id: RatingSchemaId) -> Self {
        self.rating_schema_id = Some(rating_schema_id);
        self
    }
}

/// Read-only operations for category entities.
pub trait CategoryReader {
    /// List every category with its metrics, ordered by name.
    fn list_categories(&self) -> StoreResult<Vec<Category>>;
    /// Retrieve a category and its metrics by identifier.
    fn get_category_by_id(&self, id: &CategoryId) -> StoreResult<Option<Category>>;
}

/// Write operations for category entities and their embedded metrics.
pub trait CategoryWriter {
    /// Persist a new category together with its metrics.
    fn create_category(&self, category: &Category) -> StoreResult<()>;
    /// Replace a category and its whole metric list.
    fn update_category(&self, category: &Category) -> StoreResult<()>;
    /// Delete a category and its metrics. Rejected while referenced.
    fn delete_category(&self, id: &CategoryId) -> StoreResult<()>;
}

/// Read-only operations for item entities.
pub trait ItemReader {
    /// List every item, ordered by name.
    fn list_items(&self) -> StoreResult<Vec<Item>>;
    /// Retrieve an item by its identifier.
    fn get_item_by_id(&self, id: &ItemId) -> StoreResult<Option<Item>>;
}

/// Write operations for item entities.
pub trait ItemWriter {
    fn create_item(&self, item: &Item) -> StoreResult<()>;
    fn update_item(&self, item: &Item) -> StoreResult<()>;
    /// Delete an item. Rejected while ratings reference it.
    fn delete_item(&self, id: &ItemId) -> StoreResult<()>;
}

/// Read-only operations for rating entities.
pub trait RatingReader {
    /// List ratings matching the supplied query, oldest first.
    fn list_ratings(&self, query: RatingListQuery) -> StoreResult<Vec<Rating>>;
    /// Retrieve a rating by its identifier.
    fn get_rating_by_id(&self, id: &RatingId) -> StoreResult<Option<Rating>>;
}

/// Write operations for rating entities.
pub trait RatingWriter {
    /// Persist a rating and its initial scores atomically.
    fn create_rating(&self, rating: &Rating, scores: &[Score]) -> StoreResult<()>;
    fn update_rating(&self, rating: &Rating) -> StoreResult<()>;
    /// Delete a rating together with its scores.
    fn delete_rating(&self, id: &RatingId) -> StoreResult<()>;
}

/// Read-only operations for score entities.
pub trait ScoreReader {
    /// List scores matching the supplied query.
    fn list_scores(&self, query: ScoreListQuery) -> StoreResult<Vec<Score>>;
    /// Retrieve a score by its identifier.
    fn get_score_by_id(&self, id: &ScoreId) -> StoreResult<Option<Score>>;
}

/// Write operations for score entities.
pub trait ScoreWriter {
    fn create_score(&self, score: &Score) -> StoreResult<()>;
    fn update_score(&self, score: &Score) -> StoreResult<()>;
    fn delete_score(&self, id: &ScoreId) -> StoreResult<()>;
}

/// Borrowed view of a repository that exposes only its reader traits.
///
/// Writers are not reachable through the view:
///
/// ```compile_fail
/// use ratings_store::RatingStore;
/// use ratings_store::domain::types::ScoreId;
/// use ratings_store::repository::ScoreWriter;
///
/// fn delete_behind_cache(store: &RatingStore, id: &ScoreId) {
///     store.repository().delete_score(id).unwrap();
/// }
/// ```
pub struct ReadOnly<'a, R> {
    repo: &'a R,
}

impl<'a, R> ReadOnly<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }
}

impl<R: CategoryReader> CategoryReader for ReadOnly<'_, R> {
    fn list_categories(&self) -> StoreResult<Vec<Category>> {
        self.repo.list_categories()
    }

    fn get_category_by_id(&self, id: &CategoryId) -> StoreResult<Option<Category>> {
        self.repo.get_category_by_id(id)
    }
}

impl<R: ItemReader> ItemReader for ReadOnly<'_, R> {
    fn list_items(&self) -> StoreResult<Vec<Item>> {
        self.repo.list_items()
    }

    fn get_item_by_id(&self, id: &ItemId) -> StoreResult<Option<Item>> {
        self.repo.get_item_by_id(id)
    }
}

impl<R: RatingReader> RatingReader for ReadOnly<'_, R> {
    fn list_ratings(&self, query: RatingListQuery) -> StoreResult<Vec<Rating>> {
        self.repo.list_ratings(query)
    }

    fn get_rating_by_id(&self, id: &RatingId) -> StoreResult<Option<Rating>> {
        self.repo.get_rating_by_id(id)
    }
}

impl<R: ScoreReader> ScoreReader for ReadOnly<'_, R> {
    fn list_scores(&self, query: ScoreListQuery) -> StoreResult<Vec<Score>> {
        self.repo.list_scores(query)
    }

    fn get_score_by_id(&self, id: &ScoreId) -> StoreResult<Option<Score>> {
        self.repo.get_score_by_id(id)
    }
}

/// Every reader and writer the lifecycle controller needs.
pub trait Repository:
    CategoryReader
    + CategoryWriter
    + ItemReader
    + ItemWriter
    + RatingReader
    + RatingWriter
    + ScoreReader
    + ScoreWriter
{
}

impl<T> Repository for T where
    T: CategoryReader
        + CategoryWriter
        + ItemReader
        + ItemWriter
        + RatingReader
        + RatingWriter
        + ScoreReader
        + ScoreWriter
{
}
