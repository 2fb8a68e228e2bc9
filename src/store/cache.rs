//! In-memory mirror of the relational store.
//!
//! The cache is only ever written after the corresponding durable write has
//! committed, so it always reflects the last successful transaction.

use std::collections::HashMap;

use crate::domain::category::Category;
use crate::domain::item::Item;
use crate::domain::rating::Rating;
use crate::domain::score::Score;
use crate::domain::types::{CategoryId, ItemId, RatingId, RatingSchemaId, ScoreId};

/// Entities keyed by identifier, one map per kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedCache {
    categories: HashMap<CategoryId, Category>,
    items: HashMap<ItemId, Item>,
    ratings: HashMap<RatingId, Rating>,
    scores: HashMap<ScoreId, Score>,
}

impl NormalizedCache {
    /// Build a cache from the full extent of every entity kind.
    pub fn from_parts(
        categories: Vec<Category>,
        items: Vec<Item>,
        ratings: Vec<Rating>,
        scores: Vec<Score>,
    ) -> Self {
        Self {
            categories: categories.into_iter().map(|c| (c.id.clone(), c)).collect(),
            items: items.into_iter().map(|i| (i.id.clone(), i)).collect(),
            ratings: ratings.into_iter().map(|r| (r.id.clone(), r)).collect(),
            scores: scores.into_iter().map(|s| (s.id.clone(), s)).collect(),
        }
    }

    pub fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.get(id)
    }

    /// All categories ordered by name, then id.
    pub fn categories(&self) -> Vec<&Category> {
        let mut categories: Vec<&Category> = self.categories.values().collect();
        categories.sort_by(|a, b| (&a.name, &a.id).cmp(&(&b.name, &b.id)));
        categories
    }

    pub fn find_categories<P>(&self, predicate: P) -> Vec<&Category>
    where
        P: Fn(&Category) -> bool,
    {
        self.categories()
            .into_iter()
            .filter(|category| predicate(category))
            .collect()
    }

    /// The category owning the given metric, if any.
    pub fn category_owning(&self, rating_schema_id: &RatingSchemaId) -> Option<&Category> {
        self.categories
            .values()
            .find(|category| category.has_metric(rating_schema_id))
    }

    pub fn item(&self, id: &ItemId) -> Option<&Item> {
        self.items.get(id)
    }

    /// All items ordered by name, then id.
    pub fn items(&self) -> Vec<&Item> {
        let mut items: Vec<&Item> = self.items.values().collect();
        items.sort_by(|a, b| (&a.name, &a.id).cmp(&(&b.name, &b.id)));
        items
    }

    pub fn find_items<P>(&self, predicate: P) -> Vec<&Item>
    where
        P: Fn(&Item) -> bool,
    {
        self.items()
            .into_iter()
            .filter(|item| predicate(item))
            .collect()
    }

    pub fn rating(&self, id: &RatingId) -> Option<&Rating> {
        self.ratings.get(id)
    }

    /// All ratings, oldest first.
    pub fn ratings(&self) -> Vec<&Rating> {
        let mut ratings: Vec<&Rating> = self.ratings.values().collect();
        ratings.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        ratings
    }

    pub fn find_ratings<P>(&self, predicate: P) -> Vec<&Rating>
    where
        P: Fn(&Rating) -> bool,
    {
        self.ratings()
            .into_iter()
            .filter(|rating| predicate(rating))
            .collect()
    }

    pub fn ratings_for_item(&self, item_id: &ItemId) -> Vec<&Rating> {
        self.find_ratings(|rating| &rating.item_id == item_id)
    }

    pub fn ratings_for_category(&self, category_id: &CategoryId) -> Vec<&Rating> {
        self.find_ratings(|rating| &rating.category_id == category_id)
    }

    pub fn score(&self, id: &ScoreId) -> Option<&Score> {
        self.scores.get(id)
    }

    /// All scores ordered by id.
    pub fn scores(&self) -> Vec<&Score> {
        let mut scores: Vec<&Score> = self.scores.values().collect();
        scores.sort_by(|a, b| a.id.cmp(&b.id));
        scores
    }

    pub fn scores_for_rating(&self, rating_id: &RatingId) -> Vec<&Score> {
        self.scores()
            .into_iter()
            .filter(|score| &score.rating_id == rating_id)
            .collect()
    }

    /// Whether any score references the metric.
    pub fn is_metric_scored(&self, rating_schema_id: &RatingSchemaId) -> bool {
        self.scores
            .values()
            .any(|score| &score.rating_schema_id == rating_schema_id)
    }

    pub(crate) fn put_category(&mut self, category: Category) {
        self.categories.insert(category.id.clone(), category);
    }

    pub(crate) fn drop_category(&mut self, id: &CategoryId) {
        self.categories.remove(id);
    }

    pub(crate) fn put_item(&mut self, item: Item) {
        self.items.insert(item.id.clone(), item);
    }

    pub(crate) fn drop_item(&mut self, id: &ItemId) {
        self.items.remove(id);
    }

    pub(crate) fn put_rating(&mut self, rating: Rating) {
        self.ratings.insert(rating.id.clone(), rating);
    }

    /// Remove a rating and the scores it owns.
    pub(crate) fn drop_rating(&mut self, id: &RatingId) {
        self.ratings.remove(id);
        self.scores.retain(|_, score| &score.rating_id != id);
    }

    pub(crate) fn put_score(&mut self, score: Score) {
        self.scores.insert(score.id.clone(), score);
    }

    pub(crate) fn drop_score(&mut self, id: &ScoreId) {
        self.scores.remove(id);
    }
}
