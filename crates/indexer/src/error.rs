use thiserror::Error;

pub type Result<T> = std::result::Result<T, IndexerError>;

#[derive(Error, Debug)]
pub enum IndexerError {
    #[error("Vector store error: {0}")]
    Store(#[from] tenglish_vector_store::VectorStoreError),

    #[error("Random indexing error: {0}")]
    Ri(#[from] tenglish_ri::RiError),

    #[error("Note '{0}' already exists")]
    NoteExists(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
