use crate::error::{Result, RiError};
use crate::index::IndexVector;
use crate::vector::add_assign;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

pub const VOCABULARY_SCHEMA_VERSION: u32 = 1;

/// Fixed record for one vocabulary word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    /// Stable slot into the dense-vector arena. Never moves once allocated.
    pub slot: usize,
    /// Occurrence count. Monotonically non-decreasing; never rolled back.
    pub frequency: u64,
}

/// Per-language vocabulary: word → entry map over an append-only arena
/// of dense accumulator vectors.
///
/// Slots are dense (`0..len`) and index-aligned with the arena; a new
/// zero vector is appended whenever a new word is seen, and existing
/// vectors are only ever mutated in place by weighted scatter-add.
/// Mutation requires a single writer; the load path is read-only.
pub struct VocabularyStore {
    dimension: usize,
    delta: f32,
    words: HashMap<String, VocabularyEntry>,
    vectors: Vec<Vec<f32>>,
}

#[derive(Serialize, Deserialize)]
struct PersistedVocabulary {
    schema_version: u32,
    dimension: usize,
    words: BTreeMap<String, VocabularyEntry>,
    vectors: Vec<Vec<f32>>,
}

impl VocabularyStore {
    pub fn new(dimension: usize, delta: f32) -> Self {
        Self {
            dimension,
            delta,
            words: HashMap::new(),
            vectors: Vec::new(),
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn delta(&self) -> f32 {
        self.delta
    }

    /// Number of distinct words seen.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Resolve a word's slot, inserting on first sight.
    ///
    /// New words get an appended zero vector and frequency 1; existing
    /// words get their frequency incremented. Returns the post-update
    /// entry. The increment is never rolled back, so retried processing
    /// can double-count; accepted, frequencies are monotonic.
    pub fn lookup_or_insert(&mut self, word: &str) -> VocabularyEntry {
        if let Some(entry) = self.words.get_mut(word) {
            entry.frequency += 1;
            return *entry;
        }
        let entry = VocabularyEntry {
            slot: self.vectors.len(),
            frequency: 1,
        };
        self.vectors.push(vec![0.0; self.dimension]);
        self.words.insert(word.to_string(), entry);
        entry
    }

    /// Read-only lookup; used by the query-projection path, which must
    /// not grow the vocabulary.
    pub fn get(&self, word: &str) -> Option<VocabularyEntry> {
        self.words.get(word).copied()
    }

    /// Scatter-add `sign * weight` into the slot's dense vector.
    ///
    /// This is the Random-Indexing analogue of updating a co-occurrence
    /// profile without materializing the matrix.
    pub fn accumulate(&mut self, slot: usize, index_vector: &IndexVector, weight: f32) {
        if let Some(vector) = self.vectors.get_mut(slot) {
            for &(position, sign) in index_vector.pairs() {
                if let Some(value) = vector.get_mut(position as usize) {
                    *value += f32::from(sign) * weight;
                }
            }
        }
    }

    /// Dense vector at a slot.
    pub fn vector(&self, slot: usize) -> Option<&[f32]> {
        self.vectors.get(slot).map(Vec::as_slice)
    }

    /// Iterate words with their entries (corpus-training and prediction).
    pub fn iter(&self) -> impl Iterator<Item = (&str, VocabularyEntry)> {
        self.words.iter().map(|(word, entry)| (word.as_str(), *entry))
    }

    /// Drop every word and vector. The only operation that resets
    /// frequencies.
    pub fn clear(&mut self) {
        self.words.clear();
        self.vectors.clear();
    }

    /// Subtract the mean vector from every entry in place, decorrelating
    /// common-word bias. Only meaningful over a complete, stable
    /// vocabulary snapshot (the corpus-training path), not during
    /// incremental per-note indexing.
    pub fn remove_centroid(&mut self) {
        if self.vectors.is_empty() {
            return;
        }
        let count = self.vectors.len() as f32;
        let mut centroid = vec![0.0f32; self.dimension];
        for vector in &self.vectors {
            add_assign(&mut centroid, vector);
        }
        for value in &mut centroid {
            *value /= count;
        }
        for vector in &mut self.vectors {
            for (value, mean) in vector.iter_mut().zip(centroid.iter()) {
                *value -= mean;
            }
        }
    }

    /// Persist the full word map and dense-vector arena.
    ///
    /// Atomic: written to a sibling `.tmp` file, then renamed.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let persisted = PersistedVocabulary {
            schema_version: VOCABULARY_SCHEMA_VERSION,
            dimension: self.dimension,
            words: self
                .words
                .iter()
                .map(|(word, entry)| (word.clone(), *entry))
                .collect(),
            vectors: self.vectors.clone(),
        };
        let bytes = serde_json::to_vec(&persisted)?;
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &path).await?;
        log::debug!("Saved vocabulary snapshot ({} words) to {:?}", self.len(), path);
        Ok(())
    }

    /// Load a snapshot; a missing file means "start empty", not an error.
    /// A malformed snapshot is fatal for this store: it must not silently
    /// produce wrong-dimension vectors.
    pub async fn load_or_empty(
        path: impl AsRef<Path>,
        dimension: usize,
        delta: f32,
    ) -> Result<Self> {
        let path = path.as_ref();
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No vocabulary snapshot at {path:?}, starting empty");
                return Ok(Self::new(dimension, delta));
            }
            Err(err) => return Err(err.into()),
        };
        let persisted: PersistedVocabulary = serde_json::from_slice(&bytes)?;
        if persisted.schema_version != VOCABULARY_SCHEMA_VERSION {
            return Err(RiError::CorruptSnapshot(format!(
                "unsupported schema_version {} (expected {VOCABULARY_SCHEMA_VERSION}) in {path:?}",
                persisted.schema_version
            )));
        }
        if persisted.dimension != dimension {
            return Err(RiError::InvalidDimension {
                expected: dimension,
                actual: persisted.dimension,
            });
        }
        Self::from_persisted(persisted, delta, path)
    }

    fn from_persisted(persisted: PersistedVocabulary, delta: f32, path: &Path) -> Result<Self> {
        let word_count = persisted.words.len();
        if persisted.vectors.len() != word_count {
            return Err(RiError::CorruptSnapshot(format!(
                "{} words but {} vectors in {path:?}",
                word_count,
                persisted.vectors.len()
            )));
        }
        let mut slot_seen = vec![false; word_count];
        for (word, entry) in &persisted.words {
            match slot_seen.get_mut(entry.slot) {
                Some(seen @ false) => *seen = true,
                _ => {
                    return Err(RiError::CorruptSnapshot(format!(
                        "slot {} for word '{word}' is out of range or duplicated in {path:?}",
                        entry.slot
                    )));
                }
            }
        }
        for vector in &persisted.vectors {
            if vector.len() != persisted.dimension {
                return Err(RiError::InvalidDimension {
                    expected: persisted.dimension,
                    actual: vector.len(),
                });
            }
        }
        log::info!("Loaded vocabulary snapshot ({word_count} words) from {path:?}");
        Ok(Self {
            dimension: persisted.dimension,
            delta,
            words: persisted.words.into_iter().collect(),
            vectors: persisted.vectors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::SparseIndexGenerator;
    use tempfile::TempDir;

    #[test]
    fn insert_allocates_dense_slots() {
        let mut vocab = VocabularyStore::new(10, 60.0);
        let a = vocab.lookup_or_insert("college");
        let b = vocab.lookup_or_insert("classes");
        assert_eq!(a.slot, 0);
        assert_eq!(b.slot, 1);
        assert_eq!(vocab.len(), 2);
        assert_eq!(vocab.vector(0).unwrap().len(), 10);
    }

    #[test]
    fn frequency_is_monotonic() {
        let mut vocab = VocabularyStore::new(10, 60.0);
        let first = vocab.lookup_or_insert("lo");
        let second = vocab.lookup_or_insert("lo");
        let third = vocab.lookup_or_insert("lo");
        assert_eq!(first.frequency, 1);
        assert_eq!(second.frequency, 2);
        assert_eq!(third.frequency, 3);
        assert_eq!(first.slot, third.slot);
    }

    #[test]
    fn accumulate_scatter_adds_signed_weight() {
        let mut vocab = VocabularyStore::new(20, 60.0);
        let entry = vocab.lookup_or_insert("word");
        let mut gen = SparseIndexGenerator::with_seed(20, 4, 3);
        let iv = gen.generate();
        vocab.accumulate(entry.slot, &iv, 0.5);

        let vector = vocab.vector(entry.slot).unwrap();
        for &(position, sign) in iv.pairs() {
            assert_eq!(vector[position as usize], f32::from(sign) * 0.5);
        }
        let touched: usize = vector.iter().filter(|v| **v != 0.0).count();
        assert_eq!(touched, 4);
    }

    #[test]
    fn remove_centroid_zeroes_the_mean() {
        let mut vocab = VocabularyStore::new(2, 60.0);
        let a = vocab.lookup_or_insert("a");
        let b = vocab.lookup_or_insert("b");
        // Hand-place values through accumulate-free mutation via slots.
        let mut gen = SparseIndexGenerator::with_seed(2, 2, 5);
        vocab.accumulate(a.slot, &gen.generate(), 1.0);
        vocab.accumulate(b.slot, &gen.generate(), 3.0);

        vocab.remove_centroid();

        let count = vocab.len() as f32;
        for position in 0..2 {
            let mean: f32 = (0..vocab.len())
                .map(|slot| vocab.vector(slot).unwrap()[position])
                .sum::<f32>()
                / count;
            assert!(mean.abs() < 1e-6, "residual mean {mean} at {position}");
        }
    }

    #[tokio::test]
    async fn snapshot_roundtrip_is_exact() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("vocab.json");

        let mut vocab = VocabularyStore::new(30, 60.0);
        let mut gen = SparseIndexGenerator::with_seed(30, 8, 11);
        for word in ["office", "work", "today", "office"] {
            let entry = vocab.lookup_or_insert(word);
            let iv = gen.generate();
            vocab.accumulate(entry.slot, &iv, 0.25);
        }
        vocab.save(&path).await.unwrap();

        let loaded = VocabularyStore::load_or_empty(&path, 30, 60.0).await.unwrap();
        assert_eq!(loaded.len(), vocab.len());
        assert_eq!(loaded.get("office").unwrap().frequency, 2);
        for slot in 0..vocab.len() {
            assert_eq!(loaded.vector(slot).unwrap(), vocab.vector(slot).unwrap());
        }
    }

    #[tokio::test]
    async fn missing_snapshot_starts_empty() {
        let tmp = TempDir::new().unwrap();
        let vocab = VocabularyStore::load_or_empty(tmp.path().join("none.json"), 300, 60.0)
            .await
            .unwrap();
        assert!(vocab.is_empty());
    }

    #[tokio::test]
    async fn unsupported_schema_version_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("vocab.json");
        let snapshot = r#"{"schema_version":2,"dimension":30,"words":{},"vectors":[]}"#;
        tokio::fs::write(&path, snapshot).await.unwrap();

        let err = VocabularyStore::load_or_empty(&path, 30, 60.0).await;
        assert!(matches!(err, Err(RiError::CorruptSnapshot(_))));
    }

    #[tokio::test]
    async fn corrupt_snapshot_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("vocab.json");
        tokio::fs::write(&path, b"{not json").await.unwrap();
        assert!(VocabularyStore::load_or_empty(&path, 300, 60.0).await.is_err());
    }

    #[tokio::test]
    async fn dimension_mismatch_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("vocab.json");
        let vocab = VocabularyStore::new(30, 60.0);
        vocab.save(&path).await.unwrap();
        let err = VocabularyStore::load_or_empty(&path, 300, 60.0).await;
        assert!(matches!(err, Err(RiError::InvalidDimension { .. })));
    }

    #[test]
    fn clear_is_the_only_reset() {
        let mut vocab = VocabularyStore::new(10, 60.0);
        vocab.lookup_or_insert("a");
        vocab.clear();
        assert!(vocab.is_empty());
        assert!(vocab.get("a").is_none());
    }
}
