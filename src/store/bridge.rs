//! Persistence bridge: opens the durable store and warms the cache.

use crate::config::StoreConfig;
use crate::db::establish_connection_pool;
use crate::errors::StoreResult;
use crate::migrations;
use crate::repository::{DieselRepository, RatingListQuery, Repository, ScoreListQuery};
use crate::store::{NormalizedCache, RatingStore};

impl RatingStore<DieselRepository> {
    /// Open the SQLite store described by `config`.
    ///
    /// Pending migrations are applied first, holding the only connection.
    /// Migration failure is fatal and no data is loaded. The returned store
    /// has a fully populated cache.
    pub fn open(config: &StoreConfig) -> StoreResult<Self> {
        let pool = establish_connection_pool(config)?;

        let version = {
            let mut conn = pool.get()?;
            migrations::run_pending_migrations(&mut conn)?
        };
        log::info!(
            "Opened ratings store {} at schema version {version}",
            config.database_url
        );

        Self::rehydrate(DieselRepository::new(pool))
    }
}

impl<R: Repository> RatingStore<R> {
    /// Load the full extent of every entity kind from `repo` into a new
    /// cache.
    pub fn rehydrate(repo: R) -> StoreResult<Self> {
        let categories = repo.list_categories()?;
        let items = repo.list_items()?;
        let ratings = repo.list_ratings(RatingListQuery::default())?;
        let scores = repo.list_scores(ScoreListQuery::default())?;

        log::info!(
            "Loaded {} categories, {} items, {} ratings, {} scores",
            categories.len(),
            items.len(),
            ratings.len(),
            scores.len()
        );

        Ok(Self {
            repo,
            cache: NormalizedCache::from_parts(categories, items, ratings, scores),
        })
    }

    /// Tear the store down, releasing the repository and its connection.
    pub fn close(self) {
        log::info!("Closing ratings store");
        drop(self.repo);
    }
}
