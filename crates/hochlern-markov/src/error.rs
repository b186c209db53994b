use thiserror::Error;

#[derive(Debug, Error)]
pub enum BanditError {
    #[error("Snapshot deserialization failed: {0}")]
    Snapshot(#[from] serde_json::Error),
    #[error("Snapshot field out of range: {0}")]
    SnapshotField(&'static str),
}

pub type Result<T> = std::result::Result<T, BanditError>;
