use crate::domain::category::{Category, NewCategory};
use crate::domain::types::CategoryId;
use crate::errors::{StoreError, StoreResult};
use crate::repository::Repository;
use crate::store::{RatingStore, constraint, logged};

impl<R: Repository> RatingStore<R> {
    /// Create a category with its metric list, assigning an id if absent.
    pub fn create_category(&mut self, new_category: NewCategory) -> StoreResult<Category> {
        let category = new_category.into_category();
        validate_metrics(&category)?;

        if self.cache.category(&category.id).is_some() {
            return Err(constraint(format!("category {} already exists", category.id)));
        }
        self.check_metric_ownership(&category)?;

        logged("create category", self.repo.create_category(&category))?;
        log::info!("Created category {}", category.id);

        self.cache.put_category(category.clone());
        Ok(category)
    }

    /// Replace a category, including its entire metric list.
    ///
    /// Callers must send the complete entity. Metrics missing from the new
    /// list are deleted, which is rejected while any score uses them.
    pub fn update_category(&mut self, category: Category) -> StoreResult<Category> {
        validate_metrics(&category)?;

        let existing = self
            .cache
            .category(&category.id)
            .ok_or_else(|| StoreError::NotFound(format!("category {}", category.id)))?;

        if let Some(scored) = existing
            .rating_schema
            .iter()
            .filter(|schema| !category.has_metric(&schema.id))
            .find(|schema| self.cache.is_metric_scored(&schema.id))
        {
            return Err(constraint(format!(
                "metric {} of category {} is still scored",
                scored.id, category.id
            )));
        }
        self.check_metric_ownership(&category)?;

        logged("update category", self.repo.update_category(&category))?;
        log::info!("Updated category {}", category.id);

        self.cache.put_category(category.clone());
        Ok(category)
    }

    /// Delete a category. Rejected while any rating or score references it.
    pub fn remove_category(&mut self, id: &CategoryId) -> StoreResult<()> {
        let category = self
            .cache
            .category(id)
            .ok_or_else(|| StoreError::NotFound(format!("category {id}")))?;

        let ratings = self.cache.ratings_for_category(id).len();
        let scored = category
            .rating_schema
            .iter()
            .any(|schema| self.cache.is_metric_scored(&schema.id));
        if ratings > 0 || scored {
            return Err(constraint(format!(
                "category {id} is referenced by {ratings} rating(s)"
            )));
        }

        logged("delete category", self.repo.delete_category(id))?;
        log::info!("Deleted category {id}");

        self.cache.drop_category(id);
        Ok(())
    }

    /// Metric ids are global keys; a category may not claim another's metric.
    fn check_metric_ownership(&self, category: &Category) -> StoreResult<()> {
        for schema in &category.rating_schema {
            if let Some(owner) = self.cache.category_owning(&schema.id)
                && owner.id != category.id
            {
                return Err(constraint(format!(
                    "metric {} already belongs to category {}",
                    schema.id, owner.id
                )));
            }
        }
        Ok(())
    }
}

fn validate_metrics(category: &Category) -> StoreResult<()> {
    match category.duplicate_metric_id() {
        Some(id) => Err(StoreError::ValidationError(format!(
            "metric {id} appears more than once in category {}",
            category.id
        ))),
        None => Ok(()),
    }
}
