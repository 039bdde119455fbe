use crate::error::Result;
use crate::ranker::{Candidate, HybridRanker};
use tenglish_indexer::IndexerConfig;
use tenglish_ri::{add_assign, l2_normalize, project_query, VocabularyStore};
use tenglish_tokenize::normalize_input;
use tenglish_vector_store::{
    DenseEmbedder, FsNoteStore, NoteStore, ScoredNote, VectorArtifactStore, VectorKind,
};

pub const DEFAULT_TOP_K: usize = 3;

/// Query-side view of a notes corpus.
///
/// Loads the vocabulary snapshots read-only at open time: queries are
/// projected against the vocabulary as indexed so far and never grow
/// it. Matching itself only touches the persisted per-note vectors.
pub struct Retriever {
    config: IndexerConfig,
    latin: VocabularyStore,
    other: VocabularyStore,
    embedder: Box<dyn DenseEmbedder>,
    notes: FsNoteStore,
    artifacts: VectorArtifactStore,
    ranker: HybridRanker,
}

impl Retriever {
    pub async fn open(config: IndexerConfig, embedder: Box<dyn DenseEmbedder>) -> Result<Self> {
        let ri = config.ri;
        let latin =
            VocabularyStore::load_or_empty(config.latin_vocabulary_path(), ri.dimension, ri.delta)
                .await?;
        let other =
            VocabularyStore::load_or_empty(config.other_vocabulary_path(), ri.dimension, ri.delta)
                .await?;
        let notes = FsNoteStore::new(&config.notes_dir);
        let artifacts = VectorArtifactStore::new(&config.embeddings_dir);
        Ok(Self {
            config,
            latin,
            other,
            embedder,
            notes,
            artifacts,
            ranker: HybridRanker::default(),
        })
    }

    /// Find the notes most similar to a free-form query.
    ///
    /// An empty or blank query, like a query matching nothing, returns
    /// an empty list; both are valid outcomes, not errors. Notes whose
    /// vector artifacts are absent or unreadable are skipped silently:
    /// they are simply not yet indexed.
    pub async fn find(&self, query: &str, top_k: usize) -> Result<Vec<ScoredNote>> {
        let normalized = normalize_input(query);
        if normalized.is_empty() {
            return Ok(Vec::new());
        }
        log::debug!("Searching for '{normalized}' (top_k={top_k})");

        let query_dense = self.embedder.embed(&normalized).await?;
        let query_ri = project_query(&normalized, &self.latin, &self.other);

        let mut candidates = Vec::new();
        for note_id in self.notes.list_ids().await? {
            let Some(candidate) = self.load_candidate(&note_id).await else {
                continue;
            };
            candidates.push(candidate);
        }
        log::debug!("Scanning {} indexed notes", candidates.len());

        let mut ranked = self.ranker.rank(&query_dense, &query_ri, &candidates);
        ranked.truncate(top_k);

        let mut results = Vec::with_capacity(ranked.len());
        for (note_id, score) in ranked {
            // The note may have vanished between listing and read.
            let Ok(content) = self.notes.read(&note_id).await else {
                continue;
            };
            results.push(ScoredNote {
                note_id,
                score,
                content,
            });
        }
        log::info!("Query matched {} notes", results.len());
        Ok(results)
    }

    /// Assemble one candidate from its persisted vectors.
    ///
    /// The stored combined RI vector is the sum of the persisted bucket
    /// artifacts, renormalized; a note missing its dense artifact or
    /// both RI artifacts is not yet indexed.
    async fn load_candidate(&self, note_id: &str) -> Option<Candidate> {
        let dense = self
            .artifacts
            .get(note_id, VectorKind::Dense, self.embedder.dimension())
            .await?;

        let dimension = self.config.ri.dimension;
        let latin = self
            .artifacts
            .get(note_id, VectorKind::RiLatin, dimension)
            .await;
        let other = self
            .artifacts
            .get(note_id, VectorKind::RiOther, dimension)
            .await;
        if latin.is_none() && other.is_none() {
            return None;
        }

        let mut ri = vec![0.0f32; dimension];
        if let Some(vector) = &latin {
            add_assign(&mut ri, vector);
        }
        if let Some(vector) = &other {
            add_assign(&mut ri, vector);
        }
        l2_normalize(&mut ri);

        Some(Candidate {
            note_id: note_id.to_string(),
            dense,
            ri,
        })
    }
}
