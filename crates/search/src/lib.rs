//! # Tenglish Search
//!
//! Query-time retrieval: hybrid ranking of notes by a weighted
//! combination of dense-embedding similarity and Random-Indexing
//! similarity.
//!
//! The dense signal is primary (weight 0.7); the RI signal (weight 0.3)
//! disambiguates code-mixed vocabulary the dense model's training
//! distribution covers poorly. Similarity is computed by a full corpus
//! scan at query time, a deliberate simplicity/scale trade-off for
//! personal-sized corpora.

mod error;
mod ranker;
mod retriever;

pub use error::{Result, SearchError};
pub use ranker::{Candidate, HybridRanker};
pub use retriever::{Retriever, DEFAULT_TOP_K};
