//! # Tenglish RI
//!
//! Incremental Random Indexing for code-mixed text.
//!
//! Random Indexing approximates co-occurrence-based word vectors with
//! sparse random projections, without ever materializing a co-occurrence
//! matrix and without any pretrained model. Each accumulation event draws
//! a fresh sparse ternary signature; signatures are quasi-orthogonal in
//! high dimension, which is the property the whole technique rests on.
//!
//! ## Pipeline
//!
//! ```text
//! Tokens (one script bucket)
//!     │
//!     ├──> VocabularyStore (word → slot + frequency, dense arena)
//!     │      └─> scatter-add: sign × frequency_weight
//!     │
//!     └──> DocumentVectorBuilder
//!            └─> mean of current word vectors, L2-normalized
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use tenglish_ri::{DocumentVectorBuilder, RiParams, VocabularyStore};
//!
//! let params = RiParams::default();
//! let mut latin = VocabularyStore::new(params.dimension, params.delta);
//! let mut other = VocabularyStore::new(params.dimension, params.delta);
//! let mut builder = DocumentVectorBuilder::new(&params);
//!
//! let vectors = builder.build_note("college lo classes unnai", &mut latin, &mut other);
//! assert_eq!(vectors.combined.len(), params.dimension);
//! ```

mod builder;
mod error;
mod index;
mod vector;
mod vocab;
mod weight;

pub use builder::{project_bucket, project_query, DocumentVectorBuilder, NoteVectors};
pub use error::{Result, RiError};
pub use index::{IndexVector, SparseIndexGenerator};
pub use vector::{add_assign, cosine, l2_norm, l2_normalize, scale};
pub use vocab::{VocabularyEntry, VocabularyStore, VOCABULARY_SCHEMA_VERSION};
pub use weight::frequency_weight;

/// Parameters of the Random-Indexing space.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RiParams {
    /// Dimensionality of index and word vectors.
    pub dimension: usize,
    /// Non-zero entries per sparse index vector.
    pub nonzeros: usize,
    /// Sharpness of the frequency damping curve.
    pub delta: f32,
}

impl Default for RiParams {
    fn default() -> Self {
        Self {
            dimension: 300,
            nonzeros: 8,
            delta: 60.0,
        }
    }
}
