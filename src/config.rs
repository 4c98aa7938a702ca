//! Runtime configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default SQLite database file.
pub const DEFAULT_DB_PATH: &str = "facturas.db";

/// Default upper bound for a single input file (20 MiB).
pub const DEFAULT_MAX_FILE_BYTES: u64 = 20 * 1024 * 1024;

/// Settings for ingesting invoices and opening the invoice store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Database file used by the SQLite store.
    pub db_path: PathBuf,
    /// Files larger than this are rejected without being parsed.
    pub max_file_bytes: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
        }
    }
}

/// Builder for [`Config`].
///
/// # Example
///
/// ```
/// use facturas::config::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .db_path("/var/lib/facturas/facturas.db")
///     .max_file_bytes(1024 * 1024)
///     .build();
/// assert_eq!(config.max_file_bytes, 1_048_576);
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.db_path = path.into();
        self
    }

    pub fn max_file_bytes(mut self, limit: u64) -> Self {
        self.config.max_file_bytes = limit;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
