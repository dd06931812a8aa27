pub mod cache;
pub mod projection;
pub mod provider;
pub mod reconciler;

pub use cache::TranscriptCache;
pub use projection::ProjectionEngine;
pub use provider::SnapshotProvider;
pub use reconciler::{PendingFilter, SnapshotReconciler};
