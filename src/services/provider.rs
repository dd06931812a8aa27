use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::DegreeSnapshot;
use crate::scrape::{DomScraper, ScraperConfig};
use crate::services::cache::TranscriptCache;
use crate::services::reconciler::{PendingFilter, SnapshotReconciler};
use crate::transcript::{TranscriptConfig, TranscriptFetch, TranscriptHttpClient};

/// One of the two data pipelines, chosen once at startup. Handlers never
/// know which one is behind the trait.
#[async_trait]
pub trait SnapshotProvider: Send + Sync {
    /// Reconciled snapshot, or `None` when the source had no usable data.
    async fn degree_snapshot(&self) -> Result<Option<DegreeSnapshot>, AppError>;

    /// The raw transcript document, where the pipeline has one.
    async fn raw_transcript(&self) -> Result<Option<Value>, AppError>;

    /// Drops cached data and rebuilds the snapshot from a fresh fetch.
    async fn refresh(&self) -> Result<Option<DegreeSnapshot>, AppError>;
}

/// Canonical pipeline: fetch → TTL cache → reconcile.
pub struct ApiSnapshotProvider {
    cache: TranscriptCache,
    source: Arc<dyn TranscriptFetch>,
    reconciler: SnapshotReconciler,
}

impl ApiSnapshotProvider {
    pub fn new(db: SqlitePool, source: Arc<dyn TranscriptFetch>) -> Self {
        Self::with_reconciler(db, source, SnapshotReconciler::default())
    }

    pub fn with_reconciler(
        db: SqlitePool,
        source: Arc<dyn TranscriptFetch>,
        reconciler: SnapshotReconciler,
    ) -> Self {
        Self {
            cache: TranscriptCache::new(db),
            source,
            reconciler,
        }
    }
}

#[async_trait]
impl SnapshotProvider for ApiSnapshotProvider {
    async fn degree_snapshot(&self) -> Result<Option<DegreeSnapshot>, AppError> {
        let Some(raw) = self
            .cache
            .get_or_refresh(self.source.as_ref(), Utc::now())
            .await?
        else {
            return Ok(None);
        };
        Ok(self.reconciler.reconcile_value(&raw))
    }

    async fn raw_transcript(&self) -> Result<Option<Value>, AppError> {
        self.cache
            .get_or_refresh(self.source.as_ref(), Utc::now())
            .await
    }

    async fn refresh(&self) -> Result<Option<DegreeSnapshot>, AppError> {
        self.cache.invalidate().await?;
        self.degree_snapshot().await
    }
}

/// Legacy pipeline: fetch the rendered page and scrape it. There is no raw
/// document and nothing cached, so refresh is just another scrape.
pub struct DomSnapshotProvider {
    source: Arc<dyn TranscriptFetch>,
    scraper: DomScraper,
}

impl DomSnapshotProvider {
    pub fn new(source: Arc<dyn TranscriptFetch>, scraper: DomScraper) -> Self {
        Self { source, scraper }
    }
}

#[async_trait]
impl SnapshotProvider for DomSnapshotProvider {
    async fn degree_snapshot(&self) -> Result<Option<DegreeSnapshot>, AppError> {
        let Some(page) = self.source.fetch_page().await? else {
            return Ok(None);
        };
        Ok(self.scraper.collect_snapshot(&page))
    }

    async fn raw_transcript(&self) -> Result<Option<Value>, AppError> {
        Ok(None)
    }

    async fn refresh(&self) -> Result<Option<DegreeSnapshot>, AppError> {
        self.degree_snapshot().await
    }
}

pub fn from_env(db: SqlitePool) -> Result<Arc<dyn SnapshotProvider>, AppError> {
    let config = TranscriptConfig::new_from_env()?;
    let client: Arc<dyn TranscriptFetch> = Arc::new(TranscriptHttpClient::new(config)?);

    let mode = std::env::var("SNAPSHOT_SOURCE").unwrap_or_else(|_| "api".to_string());
    match mode.as_str() {
        "api" => {
            let reconciler = SnapshotReconciler::new(pending_filter_from_env()?);
            Ok(Arc::new(ApiSnapshotProvider::with_reconciler(
                db, client, reconciler,
            )))
        }
        "dom" => Ok(Arc::new(DomSnapshotProvider::new(
            client,
            DomScraper::new(ScraperConfig::from_env()),
        ))),
        other => Err(AppError::BadRequest(format!(
            "Unknown SNAPSHOT_SOURCE: {}",
            other
        ))),
    }
}

fn pending_filter_from_env() -> Result<PendingFilter, AppError> {
    match std::env::var("PENDING_FILTER").as_deref() {
        Err(_) | Ok("class-number") => Ok(PendingFilter::ClassNumberPresent),
        Ok("empty-grade") => Ok(PendingFilter::EmptyGrade),
        Ok(other) => Err(AppError::BadRequest(format!(
            "Unknown PENDING_FILTER: {}",
            other
        ))),
    }
}
