//! Mapping store for database operations
//!
//! Handles all database interactions for identity and handle mappings. Each
//! operation is a single statement against the pool: it either commits or
//! reports its error, and there is no cross-call state. Not-found is never
//! an error here; lookups return `Ok(None)` and deletes `Ok(false)`.

use super::{HandleMapping, IdentityMapping, normalize_handle};
use crate::error::{Error, Result};
use chrono::Utc;
use sqlx::SqlitePool;
use std::collections::HashMap;

/// Store for messaging-to-CRM identity mappings
#[derive(Debug, Clone)]
pub struct MappingStore {
    pool: SqlitePool,
}

impl MappingStore {
    /// Create a new store with the given connection pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    // ========== Identity mappings ==========

    /// Upsert the mapping for a messaging ID
    ///
    /// A second save for the same `messaging_id` replaces the CRM user ID
    /// and refreshes `updated_at`; `created_at` is kept from the first save.
    pub async fn save_identity_mapping(&self, messaging_id: i64, crm_user_id: i64) -> Result<()> {
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO identity_mappings (messaging_id, crm_user_id, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(messaging_id) DO UPDATE SET
                crm_user_id = excluded.crm_user_id,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(messaging_id)
        .bind(crm_user_id)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        tracing::info!(messaging_id, crm_user_id, "Identity mapping saved");
        Ok(())
    }

    /// Look up the CRM user ID for a messaging ID
    pub async fn crm_user_id(&self, messaging_id: i64) -> Result<Option<i64>> {
        let row: Option<(i64,)> =
            sqlx::query_as("SELECT crm_user_id FROM identity_mappings WHERE messaging_id = ?")
                .bind(messaging_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(Error::Database)?;

        Ok(row.map(|(id,)| id))
    }

    /// Reverse lookup: find a messaging ID mapped to a CRM user ID
    ///
    /// Several messaging IDs may map to the same CRM user. The most recently
    /// updated row wins; among rows written in the same instant the highest
    /// messaging ID is returned, so the result is deterministic either way.
    pub async fn messaging_id_for(&self, crm_user_id: i64) -> Result<Option<i64>> {
        let row: Option<(i64,)> = sqlx::query_as(
            r#"
            SELECT messaging_id
            FROM identity_mappings
            WHERE crm_user_id = ?
            ORDER BY updated_at DESC, messaging_id DESC
            LIMIT 1
            "#,
        )
        .bind(crm_user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(row.map(|(id,)| id))
    }

    /// Get the full identity mapping row, timestamps included
    pub async fn identity_mapping(&self, messaging_id: i64) -> Result<Option<IdentityMapping>> {
        let row: Option<IdentityMapping> = sqlx::query_as(
            r#"
            SELECT messaging_id, crm_user_id, created_at, updated_at
            FROM identity_mappings
            WHERE messaging_id = ?
            "#,
        )
        .bind(messaging_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(row)
    }

    /// Load every identity mapping as `messaging_id -> crm_user_id`
    ///
    /// Used by callers to warm an in-process cache at startup. An empty
    /// store yields an empty map.
    pub async fn load_all_identity_mappings(&self) -> Result<HashMap<i64, i64>> {
        let rows: Vec<(i64, i64)> =
            sqlx::query_as("SELECT messaging_id, crm_user_id FROM identity_mappings")
                .fetch_all(&self.pool)
                .await
                .map_err(Error::Database)?;

        let mappings: HashMap<i64, i64> = rows.into_iter().collect();
        tracing::info!(count = mappings.len(), "Loaded identity mappings");
        Ok(mappings)
    }

    /// Delete the mapping for a messaging ID
    ///
    /// Returns `false` when no row matched; state is unchanged in that case.
    pub async fn delete_identity_mapping(&self, messaging_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM identity_mappings WHERE messaging_id = ?")
            .bind(messaging_id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        if result.rows_affected() > 0 {
            tracing::info!(messaging_id, "Identity mapping deleted");
            Ok(true)
        } else {
            tracing::warn!(messaging_id, "Identity mapping not found, nothing deleted");
            Ok(false)
        }
    }

    // ========== Handle mappings ==========

    /// Upsert the mapping for a messaging handle
    ///
    /// The handle is stored without its leading sigil, so `@alice` and
    /// `alice` address the same row.
    pub async fn save_handle_mapping(&self, handle: &str, crm_user_id: i64) -> Result<()> {
        let handle = normalized(handle)?;
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO handle_mappings (handle, crm_user_id, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(handle) DO UPDATE SET
                crm_user_id = excluded.crm_user_id,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(handle)
        .bind(crm_user_id)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        tracing::info!(handle, crm_user_id, "Handle mapping saved");
        Ok(())
    }

    /// Look up the CRM user ID for a handle (with or without sigil)
    pub async fn crm_user_id_by_handle(&self, handle: &str) -> Result<Option<i64>> {
        let handle = normalized(handle)?;

        let row: Option<(i64,)> =
            sqlx::query_as("SELECT crm_user_id FROM handle_mappings WHERE handle = ?")
                .bind(handle)
                .fetch_optional(&self.pool)
                .await
                .map_err(Error::Database)?;

        Ok(row.map(|(id,)| id))
    }

    /// Get the full handle mapping row, timestamps included
    pub async fn handle_mapping(&self, handle: &str) -> Result<Option<HandleMapping>> {
        let handle = normalized(handle)?;

        let row: Option<HandleMapping> = sqlx::query_as(
            r#"
            SELECT handle, crm_user_id, created_at, updated_at
            FROM handle_mappings
            WHERE handle = ?
            "#,
        )
        .bind(handle)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(row)
    }

    /// Delete the mapping for a handle
    ///
    /// Returns `false` when no row matched.
    pub async fn delete_handle_mapping(&self, handle: &str) -> Result<bool> {
        let handle = normalized(handle)?;

        let result = sqlx::query("DELETE FROM handle_mappings WHERE handle = ?")
            .bind(handle)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        if result.rows_affected() > 0 {
            tracing::info!(handle, "Handle mapping deleted");
            Ok(true)
        } else {
            tracing::warn!(handle, "Handle mapping not found, nothing deleted");
            Ok(false)
        }
    }
}

/// Normalize a handle and reject ones that are empty once the sigil is gone
fn normalized(handle: &str) -> Result<&str> {
    let handle = normalize_handle(handle);
    if handle.is_empty() {
        return Err(Error::InvalidInput("handle is empty".to_string()));
    }
    Ok(handle)
}
