//! Schema migration engine.
//!
//! The schema version is the number of applied migrations recorded by the
//! Diesel harness. Each step runs inside its own transaction, so a failed
//! step leaves the store at the previous version. Every step is guarded DDL
//! (`IF NOT EXISTS`) that never drops data.

use diesel::migration::MigrationSource;
use diesel::sqlite::{Sqlite, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use crate::errors::{StoreError, StoreResult};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Number of applied migration steps. `0` means uninitialized.
pub type SchemaVersion = usize;

/// Version reached once every known migration has been applied.
pub fn latest_schema_version() -> StoreResult<SchemaVersion> {
    MigrationSource::<Sqlite>::migrations(&MIGRATIONS)
        .map(|migrations| migrations.len())
        .map_err(|e| StoreError::MigrationFailure(e.to_string()))
}

/// Current schema version of the connected store.
pub fn schema_version(conn: &mut SqliteConnection) -> StoreResult<SchemaVersion> {
    conn.applied_migrations()
        .map(|applied| applied.len())
        .map_err(|e| StoreError::MigrationFailure(e.to_string()))
}

/// Apply every pending migration in ascending order.
///
/// Running this on an up-to-date store is a no-op. Any failure is returned
/// as [`StoreError::MigrationFailure`] and must be treated as fatal.
pub fn run_pending_migrations(conn: &mut SqliteConnection) -> StoreResult<SchemaVersion> {
    let applied: Vec<String> = conn
        .run_pending_migrations(MIGRATIONS)
        .map(|versions| versions.iter().map(ToString::to_string).collect())
        .map_err(|e| {
            log::error!("Failed to apply schema migrations: {e}");
            StoreError::MigrationFailure(e.to_string())
        })?;

    for version in &applied {
        log::info!("Applied schema migration {version}");
    }

    let version = schema_version(conn)?;
    let latest = latest_schema_version()?;
    if version != latest {
        log::error!("Schema version {version} does not match latest {latest}");
        return Err(StoreError::MigrationFailure(format!(
            "schema at version {version}, expected {latest}"
        )));
    }

    Ok(version)
}
