use crate::config::IndexerConfig;
use crate::error::{IndexerError, Result};
use crate::stats::IndexStats;
use std::time::Instant;
use tenglish_ri::{DocumentVectorBuilder, VocabularyStore};
use tenglish_tokenize::{normalize_input, partition, tokenize};
use tenglish_vector_store::{
    DenseEmbedder, FsNoteStore, NoteStore, VectorArtifactStore, VectorKind,
};

/// One entry of the note listing.
#[derive(Debug, Clone)]
pub struct NoteOverview {
    pub note_id: String,
    pub bytes: usize,
    pub indexed: bool,
}

/// Owns the per-language vocabularies and drives the indexing pipeline.
///
/// Single-writer discipline: slot allocation and frequency counters are
/// not safe under concurrent mutation, so exactly one `NoteIndexer`
/// writes to a corpus at a time. The retrieval side only ever reads the
/// persisted snapshots.
pub struct NoteIndexer {
    config: IndexerConfig,
    latin: VocabularyStore,
    other: VocabularyStore,
    builder: DocumentVectorBuilder,
    embedder: Box<dyn DenseEmbedder>,
    notes: FsNoteStore,
    artifacts: VectorArtifactStore,
}

impl NoteIndexer {
    /// Open a corpus: create the data directories and load both
    /// vocabulary snapshots (missing snapshots start empty).
    pub async fn open(config: IndexerConfig, embedder: Box<dyn DenseEmbedder>) -> Result<Self> {
        Self::open_inner(config, embedder, None).await
    }

    /// Seeded variant for reproducible tests.
    pub async fn open_seeded(
        config: IndexerConfig,
        embedder: Box<dyn DenseEmbedder>,
        seed: u64,
    ) -> Result<Self> {
        Self::open_inner(config, embedder, Some(seed)).await
    }

    async fn open_inner(
        config: IndexerConfig,
        embedder: Box<dyn DenseEmbedder>,
        seed: Option<u64>,
    ) -> Result<Self> {
        log::info!("Opening note corpus at {:?}", config.notes_dir);
        tokio::fs::create_dir_all(&config.notes_dir).await?;
        tokio::fs::create_dir_all(&config.embeddings_dir).await?;

        let ri = config.ri;
        let latin =
            VocabularyStore::load_or_empty(config.latin_vocabulary_path(), ri.dimension, ri.delta)
                .await?;
        let other =
            VocabularyStore::load_or_empty(config.other_vocabulary_path(), ri.dimension, ri.delta)
                .await?;
        let builder = match seed {
            Some(seed) => DocumentVectorBuilder::with_seed(&ri, seed),
            None => DocumentVectorBuilder::new(&ri),
        };

        let notes = FsNoteStore::new(&config.notes_dir);
        let artifacts = VectorArtifactStore::new(&config.embeddings_dir);
        Ok(Self {
            config,
            latin,
            other,
            builder,
            embedder,
            notes,
            artifacts,
        })
    }

    pub fn config(&self) -> &IndexerConfig {
        &self.config
    }

    /// Create an empty note; refuses to clobber an existing one.
    pub async fn create_note(&self, note_id: &str) -> Result<()> {
        if self.notes.exists(note_id).await {
            return Err(IndexerError::NoteExists(note_id.to_string()));
        }
        self.notes.write(note_id, "").await?;
        log::info!("Created note '{note_id}'");
        Ok(())
    }

    /// Replace a note's content and re-index it.
    ///
    /// Order matters for crash recovery: note text first, then the
    /// dense artifact, then the RI artifacts, and the vocabulary
    /// snapshots only once every per-note artifact is durable.
    pub async fn edit_note(&mut self, note_id: &str, text: &str) -> Result<IndexStats> {
        if !self.notes.exists(note_id).await {
            return Err(tenglish_vector_store::VectorStoreError::NoteMissing(
                note_id.to_string(),
            )
            .into());
        }

        let started = Instant::now();
        let normalized = normalize_input(text);
        self.notes.write(note_id, &normalized).await?;

        let dense = self.embedder.embed(&normalized).await?;
        self.artifacts
            .put(note_id, VectorKind::Dense, &dense)
            .await?;

        let split = partition(tokenize(&normalized));
        let latin_before = self.latin.len();
        let other_before = self.other.len();
        let vectors = self
            .builder
            .build_note(&normalized, &mut self.latin, &mut self.other);

        match &vectors.latin {
            Some(vector) => {
                self.artifacts
                    .put(note_id, VectorKind::RiLatin, vector)
                    .await?;
            }
            None => {
                // Stale bucket from an earlier revision of the note.
                self.artifacts.remove(note_id, VectorKind::RiLatin).await?;
            }
        }
        match &vectors.other {
            Some(vector) => {
                self.artifacts
                    .put(note_id, VectorKind::RiOther, vector)
                    .await?;
            }
            None => {
                self.artifacts.remove(note_id, VectorKind::RiOther).await?;
            }
        }

        self.latin.save(self.config.latin_vocabulary_path()).await?;
        self.other.save(self.config.other_vocabulary_path()).await?;

        let stats = IndexStats {
            tokens_latin: split.latin.len(),
            tokens_other: split.other.len(),
            new_words_latin: self.latin.len() - latin_before,
            new_words_other: self.other.len() - other_before,
            time_ms: started.elapsed().as_millis() as u64,
        };
        log::info!(
            "Indexed note '{note_id}': {} tokens, {} new words",
            stats.token_count(),
            stats.new_word_count()
        );
        Ok(stats)
    }

    /// Delete a note and all of its artifacts. Idempotent.
    ///
    /// Vocabulary contributions stay: frequencies are monotonic and
    /// word accumulators keep what they learned from the note.
    pub async fn remove_note(&mut self, note_id: &str) -> Result<bool> {
        let had_note = self.notes.remove(note_id).await?;
        let had_artifacts = self.artifacts.remove_all(note_id).await?;
        if had_note || had_artifacts {
            log::info!("Removed note '{note_id}'");
        }
        Ok(had_note || had_artifacts)
    }

    pub async fn note_text(&self, note_id: &str) -> Result<String> {
        Ok(self.notes.read(note_id).await?)
    }

    pub async fn list_notes(&self) -> Result<Vec<NoteOverview>> {
        let mut overview = Vec::new();
        for note_id in self.notes.list_ids().await? {
            let bytes = self.notes.read(&note_id).await.map(|t| t.len()).unwrap_or(0);
            let indexed = self.artifacts.is_indexed(&note_id).await;
            overview.push(NoteOverview {
                note_id,
                bytes,
                indexed,
            });
        }
        Ok(overview)
    }

    /// Words currently known per language bucket (latin, other).
    pub fn vocabulary_sizes(&self) -> (usize, usize) {
        (self.latin.len(), self.other.len())
    }
}
