//! Category drafts staged by an editing form.
//!
//! Every transform here is a pure, total function over an in-memory draft.
//! Nothing touches storage until the draft is converted into a
//! [`NewCategory`] or [`Category`] and handed to the store.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::category::{Category, NewCategory, RatingSchema};
use crate::domain::types::{
    CategoryId, CategoryName, DEFAULT_RATING_SCHEMA_WEIGHT, RatingSchemaId, RatingSchemaName,
    RatingSchemaType, RatingSchemaWeight, TypeConstraintError,
};

/// Draft of one metric row in the category form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct RatingSchemaForm {
    pub rating_schema_id: RatingSchemaId,
    #[validate(length(min = 1))]
    pub rating_schema_name: String,
    pub rating_schema_type: RatingSchemaType,
    #[validate(range(min = 1))]
    pub rating_schema_weight: i32,
}

impl RatingSchemaForm {
    /// A blank slider metric with a fresh id and the default weight.
    pub fn new() -> Self {
        Self {
            rating_schema_id: RatingSchemaId::generate(),
            rating_schema_name: String::new(),
            rating_schema_type: RatingSchemaType::Slider,
            rating_schema_weight: DEFAULT_RATING_SCHEMA_WEIGHT,
        }
    }
}

impl Default for RatingSchemaForm {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&RatingSchema> for RatingSchemaForm {
    fn from(schema: &RatingSchema) -> Self {
        Self {
            rating_schema_id: schema.id.clone(),
            rating_schema_name: schema.name.as_str().to_string(),
            rating_schema_type: schema.schema_type,
            rating_schema_weight: schema.weight.get(),
        }
    }
}

/// Draft of a whole category. A missing id is assigned on creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CategoryForm {
    pub category_id: Option<CategoryId>,
    #[validate(length(min = 1))]
    pub category_name: String,
    pub category_description: String,
    #[validate(nested)]
    pub rating_schema: Vec<RatingSchemaForm>,
}

/// Field changes for the category itself. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryFormPatch {
    pub category_name: Option<String>,
    pub category_description: Option<String>,
}

/// Field changes for one metric. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricPatch {
    pub rating_schema_name: Option<String>,
    pub rating_schema_type: Option<RatingSchemaType>,
    pub rating_schema_weight: Option<i32>,
}

/// Edits a form can dispatch against its draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFormAction {
    Reset,
    Set(Category),
    Update(CategoryFormPatch),
    AddMetric,
    RemoveMetric(RatingSchemaId),
    UpdateMetric(RatingSchemaId, MetricPatch),
}

impl CategoryForm {
    /// An empty draft without metrics.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(self, action: CategoryFormAction) -> Self {
        match action {
            CategoryFormAction::Reset => Self::new(),
            CategoryFormAction::Set(category) => Self::from(&category),
            CategoryFormAction::Update(patch) => self.update(patch),
            CategoryFormAction::AddMetric => self.add_metric(),
            CategoryFormAction::RemoveMetric(id) => self.remove_metric(&id),
            CategoryFormAction::UpdateMetric(id, patch) => self.update_metric(&id, patch),
        }
    }

    pub fn update(mut self, patch: CategoryFormPatch) -> Self {
        if let Some(name) = patch.category_name {
            self.category_name = name;
        }
        if let Some(description) = patch.category_description {
            self.category_description = description;
        }
        self
    }

    /// Append a blank metric.
    pub fn add_metric(mut self) -> Self {
        self.rating_schema.push(RatingSchemaForm::new());
        self
    }

    pub fn remove_metric(mut self, id: &RatingSchemaId) -> Self {
        self.rating_schema
            .retain(|schema| &schema.rating_schema_id != id);
        self
    }

    /// Change fields of the matching metric only. Unknown ids are ignored.
    pub fn update_metric(mut self, id: &RatingSchemaId, patch: MetricPatch) -> Self {
        for schema in self
            .rating_schema
            .iter_mut()
            .filter(|schema| &schema.rating_schema_id == id)
        {
            if let Some(name) = &patch.rating_schema_name {
                schema.rating_schema_name = name.clone();
            }
            if let Some(schema_type) = patch.rating_schema_type {
                schema.rating_schema_type = schema_type;
            }
            if let Some(weight) = patch.rating_schema_weight {
                schema.rating_schema_weight = weight;
            }
        }
        self
    }

    fn validated_parts(
        self,
    ) -> Result<(Option<CategoryId>, CategoryName, String, Vec<RatingSchema>), CategoryFormError>
    {
        self.validate()?;

        let mut rating_schema: Vec<RatingSchema> = Vec::with_capacity(self.rating_schema.len());
        for schema in self.rating_schema {
            if rating_schema.iter().any(|s| s.id == schema.rating_schema_id) {
                return Err(CategoryFormError::Validation(format!(
                    "metric {} appears more than once",
                    schema.rating_schema_id
                )));
            }
            rating_schema.push(RatingSchema {
                id: schema.rating_schema_id,
                name: RatingSchemaName::new(schema.rating_schema_name)?,
                schema_type: schema.rating_schema_type,
                weight: RatingSchemaWeight::new(schema.rating_schema_weight)?,
            });
        }

        Ok((
            self.category_id,
            CategoryName::new(self.category_name)?,
            self.category_description,
            rating_schema,
        ))
    }
}

impl From<&Category> for CategoryForm {
    fn from(category: &Category) -> Self {
        Self {
            category_id: Some(category.id.clone()),
            category_name: category.name.as_str().to_string(),
            category_description: category.description.clone(),
            rating_schema: category
                .rating_schema
                .iter()
                .map(RatingSchemaForm::from)
                .collect(),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum CategoryFormError {
    #[error("Category form validation failed: {0}")]
    Validation(String),
    #[error("Category form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for CategoryFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for CategoryFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<CategoryForm> for NewCategory {
    type Error = CategoryFormError;

    fn try_from(value: CategoryForm) -> Result<Self, Self::Error> {
        let (id, name, description, rating_schema) = value.validated_parts()?;
        Ok(Self {
            id,
            name,
            description,
            rating_schema,
        })
    }
}

/// Converts an edited draft into the complete entity sent to an update.
impl TryFrom<CategoryForm> for Category {
    type Error = CategoryFormError;

    fn try_from(value: CategoryForm) -> Result<Self, Self::Error> {
        let (id, name, description, rating_schema) = value.validated_parts()?;
        let id = id.ok_or_else(|| {
            CategoryFormError::Validation("an existing category id is required".to_string())
        })?;
        Ok(Self {
            id,
            name,
            description,
            rating_schema,
        })
    }
}
