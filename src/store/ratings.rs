use chrono::Utc;

use crate::domain::category::Category;
use crate::domain::rating::{NewRating, Rating};
use crate::domain::score::{NewScore, Score};
use crate::domain::types::{RatingId, RatingSchemaId, ScoreId};
use crate::errors::{StoreError, StoreResult};
use crate::repository::Repository;
use crate::store::{RatingStore, constraint, logged};

impl<R: Repository> RatingStore<R> {
    /// Create a rating and its initial scores in one transaction.
    pub fn create_rating(&mut self, new_rating: NewRating) -> StoreResult<(Rating, Vec<Score>)> {
        let rating = Rating {
            id: new_rating.id.unwrap_or_else(RatingId::generate),
            item_id: new_rating.item_id,
            category_id: new_rating.category_id,
            created_at: Utc::now().naive_utc(),
        };

        if self.cache.rating(&rating.id).is_some() {
            return Err(constraint(format!("rating {} already exists", rating.id)));
        }
        let category = self.check_rating_references(&rating)?;

        let mut seen: Vec<&RatingSchemaId> = Vec::with_capacity(new_rating.scores.len());
        for entry in &new_rating.scores {
            check_metric_in_category(category, &entry.rating_schema_id)?;
            if seen.contains(&&entry.rating_schema_id) {
                return Err(constraint(format!(
                    "metric {} scored twice in rating {}",
                    entry.rating_schema_id, rating.id
                )));
            }
            seen.push(&entry.rating_schema_id);
        }

        let scores: Vec<Score> = new_rating
            .scores
            .into_iter()
            .map(|entry| Score {
                id: entry.id.unwrap_or_else(ScoreId::generate),
                rating_id: rating.id.clone(),
                rating_schema_id: entry.rating_schema_id,
                value: entry.value,
            })
            .collect();

        if let Some(taken) = scores.iter().find(|s| self.cache.score(&s.id).is_some()) {
            return Err(constraint(format!("score {} already exists", taken.id)));
        }

        logged("create rating", self.repo.create_rating(&rating, &scores))?;
        log::info!("Created rating {} with {} score(s)", rating.id, scores.len());

        self.cache.put_rating(rating.clone());
        for score in &scores {
            self.cache.put_score(score.clone());
        }
        Ok((rating, scores))
    }

    /// Replace a rating. Existing scores must still fit the rating's category.
    pub fn update_rating(&mut self, rating: Rating) -> StoreResult<Rating> {
        if self.cache.rating(&rating.id).is_none() {
            return Err(StoreError::NotFound(format!("rating {}", rating.id)));
        }
        let category = self.check_rating_references(&rating)?;
        for score in self.cache.scores_for_rating(&rating.id) {
            check_metric_in_category(category, &score.rating_schema_id)?;
        }

        logged("update rating", self.repo.update_rating(&rating))?;

        self.cache.put_rating(rating.clone());
        Ok(rating)
    }

    /// Delete a rating together with the scores it owns.
    pub fn remove_rating(&mut self, id: &RatingId) -> StoreResult<()> {
        if self.cache.rating(id).is_none() {
            return Err(StoreError::NotFound(format!("rating {id}")));
        }

        logged("delete rating", self.repo.delete_rating(id))?;
        log::info!("Deleted rating {id}");

        self.cache.drop_rating(id);
        Ok(())
    }

    /// Add a score for one metric of an existing rating.
    pub fn create_score(&mut self, new_score: NewScore) -> StoreResult<Score> {
        let score = new_score.into_score();
        if self.cache.score(&score.id).is_some() {
            return Err(constraint(format!("score {} already exists", score.id)));
        }
        self.check_score(&score)?;

        logged("create score", self.repo.create_score(&score))?;

        self.cache.put_score(score.clone());
        Ok(score)
    }

    pub fn update_score(&mut self, score: Score) -> StoreResult<Score> {
        if self.cache.score(&score.id).is_none() {
            return Err(StoreError::NotFound(format!("score {}", score.id)));
        }
        self.check_score(&score)?;

        logged("update score", self.repo.update_score(&score))?;

        self.cache.put_score(score.clone());
        Ok(score)
    }

    pub fn remove_score(&mut self, id: &ScoreId) -> StoreResult<()> {
        if self.cache.score(id).is_none() {
            return Err(StoreError::NotFound(format!("score {id}")));
        }

        logged("delete score", self.repo.delete_score(id))?;

        self.cache.drop_score(id);
        Ok(())
    }

    /// The rating's item and category must exist; returns the category.
    fn check_rating_references(&self, rating: &Rating) -> StoreResult<&Category> {
        if self.cache.item(&rating.item_id).is_none() {
            return Err(constraint(format!(
                "rating {} references unknown item {}",
                rating.id, rating.item_id
            )));
        }
        self.cache.category(&rating.category_id).ok_or_else(|| {
            constraint(format!(
                "rating {} references unknown category {}",
                rating.id, rating.category_id
            ))
        })
    }

    /// A score needs an existing rating, a metric of that rating's category
    /// and no other score for the same metric in the rating.
    fn check_score(&self, score: &Score) -> StoreResult<()> {
        let rating = self.cache.rating(&score.rating_id).ok_or_else(|| {
            constraint(format!(
                "score {} references unknown rating {}",
                score.id, score.rating_id
            ))
        })?;
        let category = self.check_rating_references(rating)?;
        check_metric_in_category(category, &score.rating_schema_id)?;

        let duplicate = self
            .cache
            .scores_for_rating(&score.rating_id)
            .into_iter()
            .any(|other| other.id != score.id && other.rating_schema_id == score.rating_schema_id);
        if duplicate {
            return Err(constraint(format!(
                "rating {} already has a score for metric {}",
                score.rating_id, score.rating_schema_id
            )));
        }
        Ok(())
    }
}

fn check_metric_in_category(category: &Category, id: &RatingSchemaId) -> StoreResult<()> {
    if category.has_metric(id) {
        Ok(())
    } else {
        Err(constraint(format!(
            "metric {id} does not belong to category {}",
            category.id
        )))
    }
}
