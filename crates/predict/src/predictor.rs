use crate::trainer::{prediction_tokens, PredictionModel};
use tenglish_ri::{add_assign, cosine, frequency_weight};

impl PredictionModel {
    /// Rank likely next words for a context fragment.
    ///
    /// The context vector is the sum of the trained vectors of the last
    /// `window` context words; unknown words are skipped. Every
    /// vocabulary word except the final context word itself is scored
    /// by cosine similarity damped by its corpus frequency. An
    /// untrained model or an empty context yields no candidates.
    pub fn predict(&self, context: &str, top_k: usize) -> Vec<(String, f32)> {
        let words = prediction_tokens(context);
        if words.is_empty() || !self.is_trained() {
            return Vec::new();
        }

        let vocab = self.vocab();
        let window = self.config().window;
        let tail = &words[words.len().saturating_sub(window)..];
        let mut context_vector = vec![0.0f32; vocab.dimension()];
        for word in tail {
            if let Some(entry) = vocab.get(word) {
                if let Some(vector) = vocab.vector(entry.slot) {
                    add_assign(&mut context_vector, vector);
                }
            }
        }

        let last = words.last().map(String::as_str).unwrap_or("");
        let mut candidates: Vec<(String, f32)> = vocab
            .iter()
            .filter(|(word, _)| *word != last)
            .filter_map(|(word, entry)| {
                let vector = vocab.vector(entry.slot)?;
                let similarity = cosine(&context_vector, vector);
                let score =
                    similarity * frequency_weight(entry.frequency, vocab.len(), vocab.delta());
                score.is_finite().then(|| (word.to_string(), score))
            })
            .collect();

        candidates
            .sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        candidates.truncate(top_k);
        log::debug!("Predicted {} candidates for '{context}'", candidates.len());
        candidates
    }
}

#[cfg(test)]
mod tests {
    use crate::trainer::{PredictionModel, TrainerConfig};

    fn trained(sentences: &[&str]) -> PredictionModel {
        let mut model = PredictionModel::new(TrainerConfig {
            seed: Some(21),
            ..TrainerConfig::default()
        });
        model.train(sentences).unwrap();
        model
    }

    #[test]
    fn untrained_model_predicts_nothing() {
        let model = PredictionModel::new(TrainerConfig::default());
        assert!(model.predict("college lo", 5).is_empty());
    }

    #[test]
    fn empty_context_predicts_nothing() {
        let model = trained(&["college lo classes unnai"]);
        assert!(model.predict("", 5).is_empty());
        assert!(model.predict("  \t ", 5).is_empty());
    }

    #[test]
    fn last_context_word_is_never_a_candidate() {
        let model = trained(&["college lo classes unnai", "college lo exams"]);
        let candidates = model.predict("repu college", 10);
        assert!(candidates.iter().all(|(word, _)| word != "college"));
    }

    #[test]
    fn shared_contexts_outrank_unrelated_words() {
        // "red" and "blue" occur in interchangeable slots, so their
        // trained vectors align; "zebra" shares no context with either.
        let mut sentences = Vec::new();
        for _ in 0..5 {
            sentences.push("the red car stopped");
            sentences.push("the blue car stopped");
        }
        sentences.push("zebra herds migrate");
        let model = trained(&sentences);

        let candidates = model.predict("red", 20);
        let score_of = |target: &str| {
            candidates
                .iter()
                .find(|(word, _)| word == target)
                .map(|(_, score)| *score)
                .unwrap()
        };
        assert!(score_of("blue") > score_of("zebra"));
    }

    #[test]
    fn top_k_bounds_the_candidate_list() {
        let model = trained(&["a b c d e f g h"]);
        assert!(model.predict("a", 3).len() <= 3);
        let all = model.predict("a", 100);
        // Everything except the context word itself.
        assert_eq!(all.len(), 7);
    }

    #[test]
    fn scores_are_sorted_descending() {
        let model = trained(&["college lo classes unnai", "college campus lo food"]);
        let candidates = model.predict("college lo", 10);
        for pair in candidates.windows(2) {
            assert!(pair[0].1 >= pair[1].1);
        }
    }
}
