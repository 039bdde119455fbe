use tenglish_ri::cosine;

/// One scorable document: its persisted dense embedding and combined
/// Random-Indexing vector.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub note_id: String,
    pub dense: Vec<f32>,
    pub ri: Vec<f32>,
}

/// Combines dense and RI cosine similarity into one ranked list.
///
/// Weights are fixed at 0.7 dense / 0.3 RI and the acceptance floor at
/// 0.05; near-orthogonal noise matches never surface. Ties keep the
/// candidates' input order (the note store's sorted listing): the sort
/// is stable and no further tie-break is defined.
#[derive(Debug, Clone)]
pub struct HybridRanker {
    dense_weight: f32,
    ri_weight: f32,
    threshold: f32,
}

impl Default for HybridRanker {
    fn default() -> Self {
        Self {
            dense_weight: 0.7,
            ri_weight: 0.3,
            threshold: 0.05,
        }
    }
}

impl HybridRanker {
    /// Score, filter, and sort candidates; descending by combined score.
    pub fn rank(
        &self,
        query_dense: &[f32],
        query_ri: &[f32],
        candidates: &[Candidate],
    ) -> Vec<(String, f32)> {
        let mut scored: Vec<(String, f32)> = candidates
            .iter()
            .filter_map(|candidate| {
                let dense_sim = cosine(query_dense, &candidate.dense);
                let ri_sim = cosine(query_ri, &candidate.ri);
                let combined = self.dense_weight * dense_sim + self.ri_weight * ri_sim;
                log::debug!(
                    "Candidate '{}': dense={dense_sim:.4}, ri={ri_sim:.4}, combined={combined:.4}",
                    candidate.note_id
                );
                (combined > self.threshold).then(|| (candidate.note_id.clone(), combined))
            })
            .collect();

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: &str, dense: Vec<f32>, ri: Vec<f32>) -> Candidate {
        Candidate {
            note_id: id.to_string(),
            dense,
            ri,
        }
    }

    #[test]
    fn results_are_sorted_descending() {
        let ranker = HybridRanker::default();
        let query = vec![1.0, 0.0];
        let candidates = vec![
            candidate("weak", vec![0.5, 0.86], vec![0.0, 0.0]),
            candidate("strong", vec![1.0, 0.0], vec![1.0, 0.0]),
        ];

        let ranked = ranker.rank(&query, &query, &candidates);
        assert_eq!(ranked[0].0, "strong");
        assert!((ranked[0].1 - 1.0).abs() < 1e-5);
        for pair in ranked.windows(2) {
            assert!(pair[0].1 >= pair[1].1);
        }
    }

    #[test]
    fn below_threshold_candidates_never_appear() {
        let ranker = HybridRanker::default();
        let query = vec![1.0, 0.0];
        // Orthogonal on both signals: combined 0.0 < 0.05.
        let candidates = vec![candidate("noise", vec![0.0, 1.0], vec![0.0, 1.0])];
        assert!(ranker.rank(&query, &query, &candidates).is_empty());
    }

    #[test]
    fn weights_favor_the_dense_signal() {
        let ranker = HybridRanker::default();
        let query = vec![1.0, 0.0];
        let candidates = vec![
            candidate("dense_hit", vec![1.0, 0.0], vec![0.0, 1.0]),
            candidate("ri_hit", vec![0.0, 1.0], vec![1.0, 0.0]),
        ];

        let ranked = ranker.rank(&query, &query, &candidates);
        assert_eq!(ranked[0].0, "dense_hit");
        assert!((ranked[0].1 - 0.7).abs() < 1e-5);
        assert!((ranked[1].1 - 0.3).abs() < 1e-5);
    }

    #[test]
    fn ties_keep_listing_order() {
        let ranker = HybridRanker::default();
        let query = vec![1.0, 0.0];
        let same = vec![1.0, 0.0];
        let candidates = vec![
            candidate("alpha", same.clone(), same.clone()),
            candidate("beta", same.clone(), same.clone()),
        ];

        let ranked = ranker.rank(&query, &query, &candidates);
        assert_eq!(ranked[0].0, "alpha");
        assert_eq!(ranked[1].0, "beta");
    }

    #[test]
    fn zero_query_vectors_match_nothing() {
        let ranker = HybridRanker::default();
        let zero = vec![0.0, 0.0];
        let candidates = vec![candidate("n", vec![1.0, 0.0], vec![1.0, 0.0])];
        assert!(ranker.rank(&zero, &zero, &candidates).is_empty());
    }
}
