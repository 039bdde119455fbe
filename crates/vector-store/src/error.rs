use thiserror::Error;

pub type Result<T> = std::result::Result<T, VectorStoreError>;

#[derive(Error, Debug)]
pub enum VectorStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Invalid note id '{0}'")]
    InvalidNoteId(String),

    #[error("Note '{0}' does not exist")]
    NoteMissing(String),
}
