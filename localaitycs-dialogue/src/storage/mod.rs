use async_trait::async_trait;
use shared_types::{CompleteSubmission, StoredSubmission};

mod memory;

pub use memory::InMemoryRecordStore;

/// Append-only persistence of completed submissions.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persist a submission, assigning its id and creation timestamp.
    /// Returns only after the write is durable.
    async fn save(&self, submission: &CompleteSubmission) -> Result<StoredSubmission, StorageError>;

    /// Every stored submission, newest first.
    async fn list_all(&self) -> Result<Vec<StoredSubmission>, StorageError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage operation failed: {0}")]
    OperationFailed(String),
    #[error("Constraint violated: {0}")]
    Constraint(String),
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}
