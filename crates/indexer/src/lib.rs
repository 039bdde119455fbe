//! # Tenglish Indexer
//!
//! Note lifecycle and the incremental indexing pipeline.
//!
//! ## Pipeline
//!
//! ```text
//! Note text
//!     │
//!     ├──> normalize + partition (script heuristic)
//!     │
//!     ├──> DenseEmbedder ────────────> <id>.dense.vec
//!     │
//!     ├──> DocumentVectorBuilder ────> <id>.ri_latin.vec / <id>.ri_other.vec
//!     │      └─> mutates per-language vocabularies
//!     │
//!     └──> vocabulary snapshots (written last)
//! ```
//!
//! The vocabulary snapshots are saved only after every per-note
//! artifact succeeded: a crash in between leaves a note that simply
//! gets re-indexed, which is the designated recovery mechanism.
//!
//! ## Example
//!
//! ```no_run
//! use tenglish_indexer::{IndexerConfig, NoteIndexer};
//! use tenglish_vector_store::StubEmbedder;
//!
//! #[tokio::main]
//! async fn main() -> tenglish_indexer::Result<()> {
//!     let config = IndexerConfig::under("./data");
//!     let mut indexer = NoteIndexer::open(config, Box::new(StubEmbedder::default())).await?;
//!
//!     indexer.create_note("standup").await?;
//!     let stats = indexer.edit_note("standup", "college lo classes unnai").await?;
//!     println!("indexed {} tokens", stats.token_count());
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod indexer;
mod stats;

pub use config::IndexerConfig;
pub use error::{IndexerError, Result};
pub use indexer::{NoteIndexer, NoteOverview};
pub use stats::IndexStats;
