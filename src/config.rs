//! Configuration for opening a ratings store.

use serde::Deserialize;

use crate::errors::StoreResult;

/// Default time to wait on a locked database file.
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Settings needed to open the durable store.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct StoreConfig {
    /// Path of the SQLite database file.
    pub database_url: String,
    /// Milliseconds SQLite waits on a locked database before failing.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

impl StoreConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }

    /// Load settings from an optional YAML file overlaid by `RATINGS_*`
    /// environment variables. A `.env` file is read first when present.
    pub fn load(path: &str) -> StoreResult<Self> {
        dotenvy::dotenv().ok();

        let settings = config::Config::builder()
            .set_default("busy_timeout_ms", DEFAULT_BUSY_TIMEOUT_MS)?
            .add_source(config::File::new(path, config::FileFormat::Yaml).required(false))
            .add_source(config::Environment::with_prefix("RATINGS"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
