use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tenglish_ri::RiParams;

/// Locations and Random-Indexing parameters of one notes corpus.
///
/// The retrieval side opens the same configuration read-only, so both
/// paths agree on where vocabularies and artifacts live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexerConfig {
    /// Flat directory of `<note_id>.txt` files.
    pub notes_dir: PathBuf,
    /// Directory of per-note vector artifacts and vocabulary snapshots.
    pub embeddings_dir: PathBuf,
    /// Random-Indexing space parameters.
    #[serde(default)]
    pub ri: RiParams,
}

impl IndexerConfig {
    /// Conventional layout under one data root: `notes/` + `embeddings/`.
    pub fn under(data_root: impl AsRef<Path>) -> Self {
        let root = data_root.as_ref();
        Self {
            notes_dir: root.join("notes"),
            embeddings_dir: root.join("embeddings"),
            ri: RiParams::default(),
        }
    }

    pub fn latin_vocabulary_path(&self) -> PathBuf {
        self.embeddings_dir.join("vocab_latin.json")
    }

    pub fn other_vocabulary_path(&self) -> PathBuf {
        self.embeddings_dir.join("vocab_other.json")
    }
}
