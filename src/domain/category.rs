use serde::{Deserialize, Serialize};

use crate::domain::score::Score;
use crate::domain::types::{
    CategoryId, CategoryName, RatingSchemaId, RatingSchemaName, RatingSchemaType,
    RatingSchemaWeight,
};

/// One named, weighted axis along which items of a category are scored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RatingSchema {
    pub id: RatingSchemaId,
    pub name: RatingSchemaName,
    pub schema_type: RatingSchemaType,
    pub weight: RatingSchemaWeight,
}

/// A user-defined subject area owning an ordered list of metrics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    pub description: String,
    pub rating_schema: Vec<RatingSchema>,
}

/// Data required to insert a new [`Category`].
///
/// A missing id is assigned on creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewCategory {
    pub id: Option<CategoryId>,
    pub name: CategoryName,
    pub description: String,
    pub rating_schema: Vec<RatingSchema>,
}

impl NewCategory {
    /// Resolve the draft into a full category, generating an id if needed.
    pub fn into_category(self) -> Category {
        Category {
            id: self.id.unwrap_or_else(CategoryId::generate),
            name: self.name,
            description: self.description,
            rating_schema: self.rating_schema,
        }
    }
}

impl Category {
    /// Look up one of this category's metrics.
    pub fn metric(&self, id: &RatingSchemaId) -> Option<&RatingSchema> {
        self.rating_schema.iter().find(|schema| &schema.id == id)
    }

    /// Whether the metric belongs to this category.
    pub fn has_metric(&self, id: &RatingSchemaId) -> bool {
        self.metric(id).is_some()
    }

    /// First metric id that appears more than once, if any.
    pub fn duplicate_metric_id(&self) -> Option<&RatingSchemaId> {
        self.rating_schema.iter().enumerate().find_map(|(idx, schema)| {
            self.rating_schema[..idx]
                .iter()
                .any(|prev| prev.id == schema.id)
                .then_some(&schema.id)
        })
    }

    /// Weighted mean of the given scores using this category's weights.
    ///
    /// Scores for metrics outside the category are ignored. Returns `None`
    /// when no score contributes.
    pub fn aggregate_score<'a, I>(&self, scores: I) -> Option<f64>
    where
        I: IntoIterator<Item = &'a Score>,
    {
        let (weighted, total_weight) = scores
            .into_iter()
            .filter_map(|score| {
                self.metric(&score.rating_schema_id)
                    .map(|schema| (schema.weight.get() as i64, score.value.get() as i64))
            })
            .fold((0i64, 0i64), |(sum, weights), (weight, value)| {
                (sum + weight * value, weights + weight)
            });

        (total_weight > 0).then(|| weighted as f64 / total_weight as f64)
    }
}
