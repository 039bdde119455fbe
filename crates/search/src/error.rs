use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Vector store error: {0}")]
    Store(#[from] tenglish_vector_store::VectorStoreError),

    #[error("Random indexing error: {0}")]
    Ri(#[from] tenglish_ri::RiError),
}
