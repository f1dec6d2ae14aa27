// Source trait for dashboard records
use crate::domain::records::{DashboardRecords, ValidationError};
use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to read records from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed record document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Load every collection at once. Implementations validate before
    /// returning, so callers only ever see well-formed records.
    async fn load(&self) -> Result<DashboardRecords, SourceError>;
}
