//! # Tenglish Vector Store
//!
//! Persisted per-note vector artifacts plus the two external
//! collaborator boundaries of the retrieval core: the dense embedding
//! provider and note storage.
//!
//! ## Artifacts
//!
//! ```text
//! embeddings dir
//!     ├── <note_id>.dense.vec     externally supplied dense embedding
//!     ├── <note_id>.ri_latin.vec  Latin-bucket RI vector
//!     └── <note_id>.ri_other.vec  other-bucket RI vector
//! ```
//!
//! Retrieval treats the absence of an artifact as "not yet indexed",
//! never as an error for the whole query.

mod artifacts;
mod embedder;
mod error;
mod notes;
mod types;

pub use artifacts::{VectorArtifactStore, VectorKind, VECTOR_ARTIFACT_MAGIC};
pub use embedder::{DenseEmbedder, StubEmbedder, DEFAULT_DENSE_DIMENSION};
pub use error::{Result, VectorStoreError};
pub use notes::{validate_note_id, FsNoteStore, NoteStore};
pub use types::ScoredNote;
