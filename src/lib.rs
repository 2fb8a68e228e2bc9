//! Embedded, offline-first storage for user-defined rating categories.
//!
//! Categories own weighted rating metrics; items are rated against a
//! category and each rating stores one score per metric. Data lives in
//! SQLite behind a migrated relational schema and is mirrored in an
//! in-memory cache that collaborators read from. [`store::RatingStore`] is
//! the entry point.

pub mod config;
pub mod db;
pub mod domain;
pub mod error_conversions;
pub mod errors;
pub mod forms;
pub mod ids;
pub mod migrations;
pub mod models;
pub mod repository;
pub mod schema;
pub mod store;

pub use config::StoreConfig;
pub use errors::{StoreError, StoreResult};
pub use store::RatingStore;
