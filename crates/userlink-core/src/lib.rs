//! Userlink Core Library
//!
//! This crate provides the persistence layer for Userlink:
//! - Storage (SQLite database bootstrap and versioned migrations)
//! - Mapping store (messaging ID / handle to CRM user ID associations)
//! - Configuration (database location)
//!
//! The store is caller-driven: collaborators that already know both sides of
//! an association call into it one operation at a time. There is no network
//! transport, no caching, and no background activity here.

pub mod config;
pub mod error;
pub mod mappings;
pub mod storage;

pub use error::{Error, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::StoreConfig;
    pub use crate::error::{Error, Result};
    pub use crate::mappings::MappingStore;
    pub use crate::storage::database::{Database, DatabaseConfig};
}
