use std::sync::Arc;

use sqlx::SqlitePool;

use crate::services::provider::SnapshotProvider;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub provider: Arc<dyn SnapshotProvider>,
}
