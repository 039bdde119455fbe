use async_trait::async_trait;
use tenglish_indexer::{IndexerConfig, NoteIndexer};
use tenglish_search::{Retriever, DEFAULT_TOP_K};
use tenglish_vector_store::{DenseEmbedder, StubEmbedder};
use tempfile::TempDir;

/// Dense provider returning the zero vector for every text: all dense
/// similarities are zero, isolating the Random-Indexing signal.
struct ZeroEmbedder {
    dimension: usize,
}

#[async_trait]
impl DenseEmbedder for ZeroEmbedder {
    async fn embed(&self, _text: &str) -> tenglish_vector_store::Result<Vec<f32>> {
        Ok(vec![0.0; self.dimension])
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

fn zero_embedder() -> Box<dyn DenseEmbedder> {
    Box::new(ZeroEmbedder { dimension: 768 })
}

async fn index_notes(tmp: &TempDir, notes: &[(&str, &str)]) {
    let config = IndexerConfig::under(tmp.path());
    let mut indexer = NoteIndexer::open_seeded(config, zero_embedder(), 7)
        .await
        .unwrap();
    for (id, text) in notes {
        indexer.create_note(id).await.unwrap();
        indexer.edit_note(id, text).await.unwrap();
    }
}

#[tokio::test]
async fn token_overlap_outranks_disjoint_notes_on_ri_alone() {
    let tmp = TempDir::new().unwrap();
    index_notes(
        &tmp,
        &[
            ("note1", "office work today"),
            ("note2", "నేను కాలేజీకి వెళ్లాను"),
            ("note3", "college lo classes unnai"),
        ],
    )
    .await;

    let retriever = Retriever::open(IndexerConfig::under(tmp.path()), zero_embedder())
        .await
        .unwrap();
    let results = retriever.find("college", DEFAULT_TOP_K).await.unwrap();

    // With all dense similarities zeroed, the explicit token overlap of
    // note3 must beat note1, which shares no token with the query.
    let rank_of = |id: &str| results.iter().position(|r| r.note_id == id);
    let third = rank_of("note3").expect("note3 must be retrieved");
    if let Some(first) = rank_of("note1") {
        assert!(third < first, "note3 must rank above note1");
    }
    assert_eq!(results[third].content, "college lo classes unnai");
}

#[tokio::test]
async fn scores_are_non_increasing_and_above_threshold() {
    let tmp = TempDir::new().unwrap();
    index_notes(
        &tmp,
        &[
            ("a", "college lo classes unnai"),
            ("b", "college campus lo food"),
            ("c", "cinema hall ki vellanu"),
        ],
    )
    .await;

    let retriever = Retriever::open(IndexerConfig::under(tmp.path()), zero_embedder())
        .await
        .unwrap();
    let results = retriever.find("college lo", 10).await.unwrap();

    for pair in results.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
    for result in &results {
        assert!(result.score > 0.05);
    }
}

#[tokio::test]
async fn empty_query_returns_empty_without_error() {
    let tmp = TempDir::new().unwrap();
    index_notes(&tmp, &[("note1", "office work today")]).await;

    let retriever = Retriever::open(IndexerConfig::under(tmp.path()), zero_embedder())
        .await
        .unwrap();
    assert!(retriever.find("", DEFAULT_TOP_K).await.unwrap().is_empty());
    assert!(retriever.find("   \t ", DEFAULT_TOP_K).await.unwrap().is_empty());
}

#[tokio::test]
async fn query_on_empty_corpus_is_a_valid_empty_result() {
    let tmp = TempDir::new().unwrap();
    let retriever = Retriever::open(IndexerConfig::under(tmp.path()), zero_embedder())
        .await
        .unwrap();
    assert!(retriever.find("college", DEFAULT_TOP_K).await.unwrap().is_empty());
}

#[tokio::test]
async fn unindexed_notes_are_skipped_silently() {
    let tmp = TempDir::new().unwrap();
    {
        let config = IndexerConfig::under(tmp.path());
        let mut indexer = NoteIndexer::open_seeded(config, zero_embedder(), 7)
            .await
            .unwrap();
        indexer.create_note("indexed").await.unwrap();
        indexer.edit_note("indexed", "college lo classes").await.unwrap();
        // Created but never edited: no artifacts.
        indexer.create_note("bare").await.unwrap();
    }

    let retriever = Retriever::open(IndexerConfig::under(tmp.path()), zero_embedder())
        .await
        .unwrap();
    let results = retriever.find("college", 10).await.unwrap();
    assert!(results.iter().all(|r| r.note_id != "bare"));
}

#[tokio::test]
async fn identical_text_query_wins_on_the_dense_signal() {
    let tmp = TempDir::new().unwrap();
    let config = IndexerConfig::under(tmp.path());
    let mut indexer =
        NoteIndexer::open_seeded(config.clone(), Box::new(StubEmbedder::default()), 7)
            .await
            .unwrap();
    indexer.create_note("target").await.unwrap();
    indexer.edit_note("target", "exam schedule next week").await.unwrap();
    indexer.create_note("distractor").await.unwrap();
    indexer.edit_note("distractor", "lunch menu friday").await.unwrap();

    let retriever = Retriever::open(config, Box::new(StubEmbedder::default()))
        .await
        .unwrap();
    let results = retriever
        .find("exam schedule next week", DEFAULT_TOP_K)
        .await
        .unwrap();

    assert_eq!(results[0].note_id, "target");
    // Dense similarity 1.0 on identical text contributes the full 0.7.
    assert!(results[0].score > 0.7);
}

#[tokio::test]
async fn top_k_limits_the_result_count() {
    let tmp = TempDir::new().unwrap();
    index_notes(
        &tmp,
        &[
            ("a", "college lo classes"),
            ("b", "college lo exams"),
            ("c", "college lo events"),
            ("d", "college lo sports"),
        ],
    )
    .await;

    let retriever = Retriever::open(IndexerConfig::under(tmp.path()), zero_embedder())
        .await
        .unwrap();
    let results = retriever.find("college lo", 2).await.unwrap();
    assert!(results.len() <= 2);
}
