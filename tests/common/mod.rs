//! Helpers for integration tests.
#![allow(dead_code)]

use ratings_store::db::{DbPool, establish_connection_pool};
use ratings_store::domain::category::{NewCategory, RatingSchema};
use ratings_store::domain::item::NewItem;
use ratings_store::domain::types::{
    CategoryName, ItemName, RatingSchemaId, RatingSchemaName, RatingSchemaType,
    RatingSchemaWeight,
};
use ratings_store::{RatingStore, StoreConfig};
use tempfile::NamedTempFile;

/// Temporary database file used in integration tests.
pub struct TestDb {
    tempfile: NamedTempFile,
}

impl TestDb {
    pub fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        let tempfile = NamedTempFile::new().expect("Failed to create temp file");
        TestDb { tempfile }
    }

    pub fn config(&self) -> StoreConfig {
        StoreConfig::new(self.tempfile.path().to_str().unwrap())
    }

    /// Raw pool over the file, bypassing migrations and the store.
    pub fn pool(&self) -> DbPool {
        establish_connection_pool(&self.config()).expect("Failed to establish SQLite pool.")
    }

    pub fn open(&self) -> RatingStore {
        RatingStore::open(&self.config()).expect("Failed to open ratings store")
    }
}

pub fn metric(name: &str, weight: i32) -> RatingSchema {
    RatingSchema {
        id: RatingSchemaId::generate(),
        name: RatingSchemaName::new(name).unwrap(),
        schema_type: RatingSchemaType::Slider,
        weight: RatingSchemaWeight::new(weight).unwrap(),
    }
}

pub fn new_category(name: &str, metrics: Vec<RatingSchema>) -> NewCategory {
    NewCategory {
        id: None,
        name: CategoryName::new(name).unwrap(),
        description: format!("{name} I have rated"),
        rating_schema: metrics,
    }
}

pub fn new_item(name: &str) -> NewItem {
    NewItem {
        id: None,
        name: ItemName::new(name).unwrap(),
        description: String::new(),
    }
}
