//! Store configuration
//!
//! The storage location is an explicit value handed to the database
//! constructor. `from_env` exists for processes that want to keep driving it
//! from the environment, but the variable is read when called, never at
//! module load, so tests can run distinct stores side by side.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Environment variable naming the database file
pub const DATABASE_PATH_VAR: &str = "DATABASE_PATH";

/// Filename used when no path is configured
pub const DEFAULT_DATABASE_FILE: &str = "identity_mappings.db";

/// Userlink store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path to the SQLite database file
    pub database_path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_FILE),
        }
    }
}

impl StoreConfig {
    /// Create a config pointing at the given database file
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: path.into(),
        }
    }

    /// Build a config from `DATABASE_PATH`, falling back to the default
    /// filename in the working directory when unset
    pub fn from_env() -> Self {
        match env::var(DATABASE_PATH_VAR) {
            Ok(path) if !path.is_empty() => Self::with_path(path),
            _ => Self::default(),
        }
    }
}
