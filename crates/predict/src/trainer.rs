use crate::error::{PredictError, Result};
use tenglish_ri::{frequency_weight, IndexVector, SparseIndexGenerator, VocabularyStore};
use tenglish_tokenize::{normalize_input, tokenize, Script};
use tenglish_vector_store::NoteStore;

/// Knobs for sliding-window corpus training.
///
/// The defaults mirror the distributional-semantics setup this model
/// was tuned with: a wider space than the note-indexing path (2000 vs
/// 300) because word-level co-occurrence profiles carry more structure
/// than whole-note summaries.
#[derive(Debug, Clone, Copy)]
pub struct TrainerConfig {
    pub dimension: usize,
    pub window: usize,
    pub nonzeros: usize,
    pub delta: f32,
    /// Fixed seed for reproducible training; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            dimension: 2000,
            window: 4,
            nonzeros: 8,
            delta: 60.0,
            seed: None,
        }
    }
}

/// Word-level Random-Indexing model over a full notes corpus.
///
/// Unlike the note-indexing path, every vocabulary word keeps one fixed
/// sparse signature drawn at first sight, and relative direction is
/// encoded by rotating a neighbor's signature one step left or right
/// before scatter-adding it into the focus word's vector. Words that
/// appear in interchangeable contexts end up with similar vectors.
pub struct PredictionModel {
    config: TrainerConfig,
    generator: SparseIndexGenerator,
    vocab: VocabularyStore,
    /// Slot-aligned fixed signatures, one per vocabulary word.
    signatures: Vec<IndexVector>,
}

impl PredictionModel {
    pub fn new(config: TrainerConfig) -> Self {
        let generator = match config.seed {
            Some(seed) => SparseIndexGenerator::with_seed(config.dimension, config.nonzeros, seed),
            None => SparseIndexGenerator::new(config.dimension, config.nonzeros),
        };
        Self {
            config,
            generator,
            vocab: VocabularyStore::new(config.dimension, config.delta),
            signatures: Vec::new(),
        }
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocab.len()
    }

    pub fn is_trained(&self) -> bool {
        !self.vocab.is_empty()
    }

    pub(crate) fn vocab(&self) -> &VocabularyStore {
        &self.vocab
    }

    /// Train from scratch on a batch of sentences.
    ///
    /// Any previous vocabulary is dropped: centroid removal bakes the
    /// corpus mean into every vector, so the model cannot be extended
    /// incrementally afterwards.
    pub fn train<S: AsRef<str>>(&mut self, sentences: &[S]) -> Result<()> {
        self.vocab.clear();
        self.signatures.clear();

        let token_lists: Vec<Vec<String>> = sentences
            .iter()
            .map(|sentence| prediction_tokens(sentence.as_ref()))
            .filter(|tokens| !tokens.is_empty())
            .collect();
        if token_lists.is_empty() {
            return Err(PredictError::EmptyCorpus);
        }

        for tokens in &token_lists {
            self.train_sentence(tokens);
        }
        self.vocab.remove_centroid();
        log::info!(
            "Trained prediction model: {} sentences, {} words",
            token_lists.len(),
            self.vocab.len()
        );
        Ok(())
    }

    /// Train on every note in a store, one sentence per `.`-or-newline
    /// separated fragment.
    pub async fn train_from_notes(&mut self, notes: &dyn NoteStore) -> Result<()> {
        let mut sentences = Vec::new();
        for note_id in notes.list_ids().await? {
            let text = notes.read(&note_id).await?;
            sentences.extend(
                text.split(['.', '\n'])
                    .map(str::trim)
                    .filter(|fragment| !fragment.is_empty())
                    .map(str::to_string),
            );
        }
        if sentences.is_empty() {
            return Err(PredictError::EmptyCorpus);
        }
        log::debug!("Collected {} training sentences", sentences.len());
        self.train(&sentences)
    }

    /// One sliding-window pass over a single sentence.
    fn train_sentence(&mut self, tokens: &[String]) {
        let slots: Vec<usize> = tokens.iter().map(|token| self.observe(token)).collect();

        for (focus, &focus_slot) in slots.iter().enumerate() {
            for offset in 1..=self.config.window {
                if let Some(left) = focus.checked_sub(offset) {
                    self.accumulate_neighbor(focus_slot, &tokens[left], slots[left], -1);
                }
                if let Some(&right_slot) = slots.get(focus + offset) {
                    self.accumulate_neighbor(focus_slot, &tokens[focus + offset], right_slot, 1);
                }
            }
        }
    }

    /// Record one occurrence, drawing the word's fixed signature on
    /// first sight.
    fn observe(&mut self, token: &str) -> usize {
        let known = self.vocab.get(token).is_some();
        let entry = self.vocab.lookup_or_insert(token);
        if !known {
            debug_assert_eq!(entry.slot, self.signatures.len());
            self.signatures.push(self.generator.generate());
        }
        entry.slot
    }

    /// Scatter-add one neighbor's rotated signature into the focus
    /// word's vector, damped by the neighbor's frequency.
    fn accumulate_neighbor(
        &mut self,
        focus_slot: usize,
        neighbor: &str,
        neighbor_slot: usize,
        direction: isize,
    ) {
        let Some(entry) = self.vocab.get(neighbor) else {
            return;
        };
        let weight = frequency_weight(entry.frequency, self.vocab.len(), self.config.delta);
        let rotated = self.signatures[neighbor_slot].rotated(direction, self.config.dimension);
        self.vocab.accumulate(focus_slot, &rotated, weight);
    }
}

/// Tokenize one training or context fragment, case-folding Latin
/// tokens the same way the script partitioner does. Both scripts share
/// one prediction vocabulary, so no bucket split here.
pub(crate) fn prediction_tokens(text: &str) -> Vec<String> {
    tokenize(&normalize_input(text))
        .into_iter()
        .map(|token| match Script::of(token) {
            Script::Latin => token.to_lowercase(),
            Script::Other => token.to_string(),
        })
        .collect()
}
