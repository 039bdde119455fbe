use thiserror::Error;

pub type Result<T> = std::result::Result<T, PredictError>;

#[derive(Error, Debug)]
pub enum PredictError {
    #[error("No training sentences found in the notes corpus")]
    EmptyCorpus,

    #[error("Vector store error: {0}")]
    Store(#[from] tenglish_vector_store::VectorStoreError),
}
