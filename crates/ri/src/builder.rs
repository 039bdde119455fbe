use crate::index::SparseIndexGenerator;
use crate::vector::{add_assign, l2_normalize, scale};
use crate::vocab::VocabularyStore;
use crate::weight::frequency_weight;
use crate::RiParams;
use tenglish_tokenize::{partition, tokenize};

/// Per-language and combined Random-Indexing vectors of one note.
///
/// A language absent from the note contributes nothing; the combined
/// vector is then equal to the present bucket's vector.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteVectors {
    pub latin: Option<Vec<f32>>,
    pub other: Option<Vec<f32>>,
    pub combined: Vec<f32>,
}

/// Builds normalized document vectors, feeding the corpus-level word
/// accumulators as it goes.
///
/// Accumulation targets the corpus-level word vectors rather than
/// document-local ones, so word representations keep improving as more
/// notes are indexed. Documents indexed early are embedded against a
/// thinner vocabulary than later ones; retrieval compensates by always
/// projecting queries against the current vocabulary.
pub struct DocumentVectorBuilder {
    generator: SparseIndexGenerator,
}

impl DocumentVectorBuilder {
    pub fn new(params: &RiParams) -> Self {
        Self {
            generator: SparseIndexGenerator::new(params.dimension, params.nonzeros),
        }
    }

    /// Seeded variant for reproducible tests.
    pub fn with_seed(params: &RiParams, seed: u64) -> Self {
        Self {
            generator: SparseIndexGenerator::with_seed(params.dimension, params.nonzeros, seed),
        }
    }

    /// Build the normalized vector of one pre-partitioned token bucket,
    /// mutating the bucket's vocabulary.
    ///
    /// Per token: resolve the slot (inserting on first sight), draw a
    /// fresh index vector, weight it by the post-update frequency
    /// against the current vocabulary size, and scatter-add. The
    /// document vector is then the mean of the tokens' current word
    /// vectors, L2-normalized (zero stays zero).
    pub fn build_bucket(&mut self, tokens: &[String], vocab: &mut VocabularyStore) -> Vec<f32> {
        let dimension = vocab.dimension();
        let mut document = vec![0.0f32; dimension];
        if tokens.is_empty() {
            return document;
        }

        for token in tokens {
            let entry = vocab.lookup_or_insert(token);
            let signature = self.generator.generate();
            let weight = frequency_weight(entry.frequency, vocab.len(), vocab.delta());
            vocab.accumulate(entry.slot, &signature, weight);
        }

        // Sum the post-accumulation word vectors for every input token.
        for token in tokens {
            if let Some(entry) = vocab.get(token) {
                if let Some(vector) = vocab.vector(entry.slot) {
                    add_assign(&mut document, vector);
                }
            }
        }
        scale(&mut document, 1.0 / tokens.len() as f32);
        l2_normalize(&mut document);
        document
    }

    /// Build a note's per-bucket and combined vectors from raw text.
    ///
    /// Each script bucket is built independently against its own
    /// vocabulary; the combined vector is the unweighted sum of the
    /// normalized bucket vectors, renormalized once.
    pub fn build_note(
        &mut self,
        text: &str,
        latin: &mut VocabularyStore,
        other: &mut VocabularyStore,
    ) -> NoteVectors {
        let split = partition(tokenize(text));
        log::debug!(
            "Building note vectors: {} latin / {} other tokens",
            split.latin.len(),
            split.other.len()
        );

        let latin_vec = (!split.latin.is_empty()).then(|| self.build_bucket(&split.latin, latin));
        let other_vec = (!split.other.is_empty()).then(|| self.build_bucket(&split.other, other));

        let combined = combine(latin.dimension(), latin_vec.as_deref(), other_vec.as_deref());
        NoteVectors {
            latin: latin_vec,
            other: other_vec,
            combined,
        }
    }
}

/// Project one token bucket against its vocabulary without mutating it.
///
/// Unknown words are skipped; the result is the raw sum of the known
/// words' current vectors (normalization happens once at the combined
/// level). The read-only query path must never grow the vocabulary.
pub fn project_bucket(tokens: &[String], vocab: &VocabularyStore) -> Vec<f32> {
    let mut projected = vec![0.0f32; vocab.dimension()];
    let mut known = 0usize;
    for token in tokens {
        if let Some(entry) = vocab.get(token) {
            if let Some(vector) = vocab.vector(entry.slot) {
                add_assign(&mut projected, vector);
                known += 1;
            }
        }
    }
    log::debug!("Projected {known}/{} tokens", tokens.len());
    projected
}

/// Project a query against both vocabularies and normalize the sum.
///
/// A query with no recognized words yields the zero vector, which
/// simply matches nothing downstream.
pub fn project_query(text: &str, latin: &VocabularyStore, other: &VocabularyStore) -> Vec<f32> {
    let split = partition(tokenize(text));
    let mut combined = project_bucket(&split.latin, latin);
    let other_vec = project_bucket(&split.other, other);
    add_assign(&mut combined, &other_vec);
    l2_normalize(&mut combined);
    combined
}

fn combine(dimension: usize, latin: Option<&[f32]>, other: Option<&[f32]>) -> Vec<f32> {
    let mut combined = vec![0.0f32; dimension];
    if let Some(vector) = latin {
        add_assign(&mut combined, vector);
    }
    if let Some(vector) = other {
        add_assign(&mut combined, vector);
    }
    l2_normalize(&mut combined);
    combined
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::{cosine, l2_norm};

    fn params() -> RiParams {
        RiParams::default()
    }

    fn stores() -> (VocabularyStore, VocabularyStore) {
        let p = params();
        (
            VocabularyStore::new(p.dimension, p.delta),
            VocabularyStore::new(p.dimension, p.delta),
        )
    }

    #[test]
    fn bucket_vector_is_unit_norm() {
        let (mut latin, _) = stores();
        let mut builder = DocumentVectorBuilder::with_seed(&params(), 21);
        let tokens: Vec<String> = ["office", "work", "today"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let vector = builder.build_bucket(&tokens, &mut latin);
        assert!((l2_norm(&vector) - 1.0).abs() < 1e-5);
        assert_eq!(latin.len(), 3);
    }

    #[test]
    fn empty_bucket_yields_zero_vector() {
        let (mut latin, _) = stores();
        let mut builder = DocumentVectorBuilder::with_seed(&params(), 21);
        let vector = builder.build_bucket(&[], &mut latin);
        assert!(vector.iter().all(|v| *v == 0.0));
        assert!(latin.is_empty());
    }

    #[test]
    fn latin_only_note_combined_equals_latin_vector() {
        let (mut latin, mut other) = stores();
        let mut builder = DocumentVectorBuilder::with_seed(&params(), 5);
        let vectors = builder.build_note("office work today", &mut latin, &mut other);

        let latin_vec = vectors.latin.expect("latin bucket present");
        assert!(vectors.other.is_none());
        assert!(other.is_empty());
        // The absent bucket contributes the zero vector, so the combined
        // embedding is the (already unit-norm) latin vector.
        for (c, l) in vectors.combined.iter().zip(latin_vec.iter()) {
            assert!((c - l).abs() < 1e-6);
        }
    }

    #[test]
    fn code_mixed_note_fills_both_vocabularies() {
        let (mut latin, mut other) = stores();
        let mut builder = DocumentVectorBuilder::with_seed(&params(), 5);
        let vectors = builder.build_note("college lo నేను వెళ్లాను", &mut latin, &mut other);
        assert!(vectors.latin.is_some());
        assert!(vectors.other.is_some());
        assert_eq!(latin.len(), 2);
        assert_eq!(other.len(), 2);
        assert!((l2_norm(&vectors.combined) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn projection_does_not_grow_vocabulary() {
        let (mut latin, mut other) = stores();
        let mut builder = DocumentVectorBuilder::with_seed(&params(), 5);
        builder.build_note("college lo classes", &mut latin, &mut other);
        let before = latin.len();

        let projected = project_query("college brand_new_word", &latin, &other);
        assert_eq!(latin.len(), before);
        assert!(l2_norm(&projected) > 0.0);
    }

    #[test]
    fn query_with_only_unknown_words_projects_to_zero() {
        let (latin, other) = stores();
        let projected = project_query("never seen", &latin, &other);
        assert!(projected.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn shared_token_pulls_documents_together() {
        let (mut latin, mut other) = stores();
        let mut builder = DocumentVectorBuilder::with_seed(&params(), 77);
        builder.build_note("office work today", &mut latin, &mut other);
        builder.build_note("college lo classes unnai", &mut latin, &mut other);

        let query = project_query("college", &latin, &other);
        let overlap = project_query("college lo classes unnai", &latin, &other);
        let disjoint = project_query("office work today", &latin, &other);
        assert!(cosine(&query, &overlap) > cosine(&query, &disjoint));
    }
}
