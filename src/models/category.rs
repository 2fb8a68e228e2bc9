use diesel::prelude::*;

use crate::domain::category::{Category as DomainCategory, RatingSchema as DomainRatingSchema};
use crate::domain::types::{
    CategoryId, CategoryName, RatingSchemaId, RatingSchemaName, RatingSchemaType,
    RatingSchemaWeight, TypeConstraintError,
};

/// Diesel model representing the `category` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::category, primary_key(category_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Category {
    pub category_id: String,
    pub category_name: String,
    pub category_description: String,
}

/// Diesel model representing the `ratingSchema` table.
///
/// `rating_schema_position` preserves the order of the owning category's
/// metric list.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::rating_schema, primary_key(rating_schema_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RatingSchema {
    pub rating_schema_id: String,
    pub category_id: String,
    pub rating_schema_name: String,
    pub rating_schema_type: String,
    pub rating_schema_weight: i32,
    pub rating_schema_position: i32,
}

impl TryFrom<RatingSchema> for DomainRatingSchema {
    type Error = TypeConstraintError;

    fn try_from(schema: RatingSchema) -> Result<Self, Self::Error> {
        Ok(Self {
            id: RatingSchemaId::new(schema.rating_schema_id)?,
            name: RatingSchemaName::new(schema.rating_schema_name)?,
            schema_type: RatingSchemaType::try_from(schema.rating_schema_type)?,
            weight: RatingSchemaWeight::new(schema.rating_schema_weight)?,
        })
    }
}

impl Category {
    /// Assemble a domain category from its row and its metric rows.
    ///
    /// Metric rows are ordered by position before conversion.
    pub fn into_domain(
        self,
        mut schemas: Vec<RatingSchema>,
    ) -> Result<DomainCategory, TypeConstraintError> {
        schemas.sort_by_key(|schema| schema.rating_schema_position);
        Ok(DomainCategory {
            id: CategoryId::new(self.category_id)?,
            name: CategoryName::new(self.category_name)?,
            description: self.category_description,
            rating_schema: schemas
                .into_iter()
                .map(TryInto::try_into)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

impl From<&DomainCategory> for Category {
    fn from(category: &DomainCategory) -> Self {
        Self {
            category_id: category.id.as_str().to_string(),
            category_name: category.name.as_str().to_string(),
            category_description: category.description.clone(),
        }
    }
}

/// Split a domain category into the metric rows it owns.
pub fn rating_schema_rows(category: &DomainCategory) -> Vec<RatingSchema> {
    category
        .rating_schema
        .iter()
        .enumerate()
        .map(|(position, schema)| RatingSchema {
            rating_schema_id: schema.id.as_str().to_string(),
            category_id: category.id.as_str().to_string(),
            rating_schema_name: schema.name.as_str().to_string(),
            rating_schema_type: schema.schema_type.as_str().to_string(),
            rating_schema_weight: schema.weight.get(),
            rating_schema_position: position as i32,
        })
        .collect()
}
