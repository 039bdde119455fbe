use thiserror::Error;

pub type Result<T> = std::result::Result<T, RiError>;

#[derive(Error, Debug)]
pub enum RiError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Corrupt vocabulary snapshot: {0}")]
    CorruptSnapshot(String),

    #[error("Invalid vector dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },
}
