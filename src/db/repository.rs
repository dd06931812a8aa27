use std::collections::HashMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::SqlitePool;

use crate::error::AppError;

/// A fetched transcript plus when it was fetched (RFC 3339).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub transcript: Value,
    pub fetched_at: String,
}

/// The whole persisted state object. Loaded with defaults applied for
/// absent keys; `grades` holds raw user-entered override text keyed by
/// course id, re-validated on every read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalState {
    pub transcript_cache: Option<CacheEntry>,
    pub grades: HashMap<String, String>,
}

/// Partial update merged over the stored state. `None` leaves a key
/// untouched; `transcript_cache: Some(None)` clears the cache entry.
#[derive(Debug, Clone, Default)]
pub struct StateUpdate {
    pub transcript_cache: Option<Option<CacheEntry>>,
    pub grades: Option<HashMap<String, String>>,
}

pub async fn load_state(db: &SqlitePool) -> Result<LocalState, AppError> {
    let row: Option<(String,)> = sqlx::query_as("SELECT state FROM local_state WHERE id = 1")
        .fetch_optional(db)
        .await?;

    match row {
        // Unreadable stored state degrades to defaults rather than failing.
        Some((raw,)) => Ok(serde_json::from_str(&raw).unwrap_or_default()),
        None => Ok(LocalState::default()),
    }
}

/// Read-modify-write merge against the full state object, so writers of one
/// key never clobber the others.
pub async fn save_state(db: &SqlitePool, update: StateUpdate) -> Result<LocalState, AppError> {
    let mut state = load_state(db).await?;

    if let Some(cache) = update.transcript_cache {
        state.transcript_cache = cache;
    }
    if let Some(grades) = update.grades {
        state.grades = grades;
    }

    let raw = serde_json::to_string(&state)?;
    let now = Utc::now().to_rfc3339();

    sqlx::query(
        r#"
        INSERT INTO local_state (id, state, updated_at)
        VALUES (1, ?1, ?2)
        ON CONFLICT(id) DO UPDATE SET state = excluded.state, updated_at = excluded.updated_at
        "#,
    )
    .bind(&raw)
    .bind(&now)
    .execute(db)
    .await?;

    Ok(state)
}
