//! Identity mapping domain
//!
//! Associations between messaging-platform identities (numeric ID or handle)
//! and CRM user IDs, plus the store that persists them.

mod store;

pub use store::MappingStore;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A messaging ID to CRM user ID association
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct IdentityMapping {
    /// Numeric user ID on the messaging platform
    pub messaging_id: i64,

    /// User ID within the CRM platform
    pub crm_user_id: i64,

    /// When the mapping was first saved
    pub created_at: DateTime<Utc>,

    /// When the mapping was last written
    pub updated_at: DateTime<Utc>,
}

/// A messaging handle to CRM user ID association
///
/// The handle is stored without its leading sigil; `@alice` and `alice`
/// name the same row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct HandleMapping {
    /// Handle on the messaging platform, sigil stripped
    pub handle: String,

    /// User ID within the CRM platform
    pub crm_user_id: i64,

    /// When the mapping was first saved
    pub created_at: DateTime<Utc>,

    /// When the mapping was last written
    pub updated_at: DateTime<Utc>,
}

/// Strip every leading `@` from a handle
///
/// Applied before both store and lookup so the two sides always agree.
pub fn normalize_handle(handle: &str) -> &str {
    handle.trim_start_matches('@')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_sigil() {
        assert_eq!(normalize_handle("@alice"), "alice");
        assert_eq!(normalize_handle("alice"), "alice");
    }

    #[test]
    fn test_normalize_strips_repeated_sigils() {
        assert_eq!(normalize_handle("@@alice"), "alice");
    }

    #[test]
    fn test_normalize_keeps_inner_sigils() {
        assert_eq!(normalize_handle("al@ice"), "al@ice");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize_handle("@"), "");
        assert_eq!(normalize_handle(""), "");
    }
}
