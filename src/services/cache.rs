use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use sqlx::SqlitePool;
use tracing::info;

use crate::db::repository::{self, CacheEntry, StateUpdate};
use crate::error::AppError;
use crate::transcript::TranscriptFetch;

pub const CACHE_TTL_HOURS: i64 = 24;

/// TTL-bounded store for the raw transcript, so the popup does not refetch
/// on every open. All timestamps are passed in by the caller.
#[derive(Clone)]
pub struct TranscriptCache {
    db: SqlitePool,
}

impl TranscriptCache {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// The cached transcript, if one exists and is younger than the TTL.
    pub async fn get(&self, now: DateTime<Utc>) -> Result<Option<Value>, AppError> {
        let state = repository::load_state(&self.db).await?;
        let Some(entry) = state.transcript_cache else {
            return Ok(None);
        };

        // An entry with an unreadable timestamp is a miss, not an error.
        let Ok(fetched_at) = DateTime::parse_from_rfc3339(&entry.fetched_at) else {
            return Ok(None);
        };
        if now - fetched_at.with_timezone(&Utc) > Duration::hours(CACHE_TTL_HOURS) {
            return Ok(None);
        }

        Ok(Some(entry.transcript))
    }

    /// Stores the transcript stamped with `now`, replacing any prior entry.
    pub async fn set(&self, transcript: Value, now: DateTime<Utc>) -> Result<(), AppError> {
        repository::save_state(
            &self.db,
            StateUpdate {
                transcript_cache: Some(Some(CacheEntry {
                    transcript,
                    fetched_at: now.to_rfc3339(),
                })),
                ..Default::default()
            },
        )
        .await?;
        Ok(())
    }

    pub async fn invalidate(&self) -> Result<(), AppError> {
        repository::save_state(
            &self.db,
            StateUpdate {
                transcript_cache: Some(None),
                ..Default::default()
            },
        )
        .await?;
        Ok(())
    }

    /// Cached transcript when fresh, else one fetch attempt. A failed fetch
    /// yields `None` and leaves the store untouched.
    pub async fn get_or_refresh(
        &self,
        source: &dyn TranscriptFetch,
        now: DateTime<Utc>,
    ) -> Result<Option<Value>, AppError> {
        if let Some(cached) = self.get(now).await? {
            return Ok(Some(cached));
        }

        let Some(fresh) = source.fetch_transcript().await? else {
            return Ok(None);
        };

        info!("transcript cache refreshed");
        self.set(fresh.clone(), now).await?;
        Ok(Some(fresh))
    }
}
