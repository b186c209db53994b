use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
    #[error("Run cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, HarnessError>;
