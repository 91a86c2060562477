//! Integration tests for the retrieval + grounded-generation flow over a
//! fixture corpus.

mod common;

use std::sync::Arc;

use common::mocks::{FailingLlm, ScriptedLlm, VocabEmbedder};
use hera::{
    AnswerGenerator, AppError, Chunk, ChunkKind, Corpus, Embedder, Retriever,
};
use hera_vector::{DistanceMetric, FlatIndex};

fn chunk(id: u64, source: &str, text: &str) -> Chunk {
    Chunk {
        id,
        source: source.to_string(),
        kind: ChunkKind::Sentence,
        section_hint: None,
        text: text.to_string(),
    }
}

/// The two-chunk minimum-necessary corpus.
fn mini_corpus() -> Corpus {
    Corpus::new(vec![
        chunk(
            0,
            "HIPAA_PART_164",
            "Covered entities must limit disclosures to the minimum necessary.",
        ),
        chunk(
            1,
            "MINIMUM_NECESSARY_GUIDANCE",
            "Minimum necessary does not apply to disclosures to the individual.",
        ),
    ])
    .unwrap()
}

async fn retriever_over(corpus: Corpus, embedder: Arc<VocabEmbedder>) -> Retriever {
    let vectors = embedder.embed_batch(&corpus.texts()).await.unwrap();
    let index =
        FlatIndex::build(embedder.dimensions(), DistanceMetric::InnerProduct, vectors).unwrap();
    Retriever::new(embedder, Arc::new(index), Arc::new(corpus)).unwrap()
}

#[tokio::test]
async fn test_minimum_necessary_query_retrieves_guidance_chunk() {
    let embedder = Arc::new(VocabEmbedder::hipaa_fixture());
    let retriever = retriever_over(mini_corpus(), embedder).await;

    let results = retriever
        .search("When does minimum necessary not apply?", 1)
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].source, "MINIMUM_NECESSARY_GUIDANCE");
    assert!(results[0].text.contains("disclosures to the individual"));
}

#[tokio::test]
async fn test_end_to_end_answer_is_grounded_in_retrieved_context() {
    let embedder = Arc::new(VocabEmbedder::hipaa_fixture());
    let retriever = retriever_over(mini_corpus(), embedder).await;

    let query = "When does minimum necessary not apply?";
    let retrieved = retriever.search(query, 1).await.unwrap();

    let llm = Arc::new(ScriptedLlm::new(
        "Per the cited guidance, the minimum necessary standard does not apply \
         to disclosures to the individual.",
    ));
    let generator = AnswerGenerator::new(llm.clone());

    let answer = generator.generate_answer(query, &retrieved).await.unwrap();
    assert!(answer.contains("disclosures to the individual"));

    // The model saw only the retrieved context and the original query.
    let prompt = llm.last_prompt().unwrap();
    assert!(prompt.contains("Minimum necessary does not apply to disclosures to the individual."));
    assert!(prompt.contains(query));
    assert!(!prompt.contains("Covered entities must limit"));
}

#[tokio::test]
async fn test_results_ordered_best_first() {
    let embedder = Arc::new(VocabEmbedder::hipaa_fixture());
    let retriever = retriever_over(mini_corpus(), embedder).await;

    let results = retriever
        .search("When does minimum necessary not apply?", 2)
        .await
        .unwrap();

    assert_eq!(results.len(), 2);
    for pair in results.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
    assert_eq!(results[0].source, "MINIMUM_NECESSARY_GUIDANCE");
}

#[tokio::test]
async fn test_k_beyond_corpus_size_returns_all_without_duplicates() {
    let embedder = Arc::new(VocabEmbedder::hipaa_fixture());
    let retriever = retriever_over(mini_corpus(), embedder).await;

    let results = retriever.search("minimum necessary", 50).await.unwrap();
    assert_eq!(results.len(), 2);

    let mut texts: Vec<&str> = results.iter().map(|r| r.text.as_str()).collect();
    texts.sort_unstable();
    texts.dedup();
    assert_eq!(texts.len(), 2);
}

#[tokio::test]
async fn test_empty_query_rejected_at_boundary() {
    let embedder = Arc::new(VocabEmbedder::hipaa_fixture());
    let retriever = retriever_over(mini_corpus(), embedder).await;

    for query in ["", "   ", "\t\n"] {
        let result = retriever.search(query, 3).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }
}

#[tokio::test]
async fn test_zero_k_rejected_at_boundary() {
    let embedder = Arc::new(VocabEmbedder::hipaa_fixture());
    let retriever = retriever_over(mini_corpus(), embedder).await;

    let result = retriever.search("minimum necessary", 0).await;
    assert!(matches!(result, Err(AppError::InvalidInput(_))));
}

#[tokio::test]
async fn test_row_count_mismatch_is_fatal_at_assembly() {
    let embedder = Arc::new(VocabEmbedder::hipaa_fixture());
    let corpus = mini_corpus();

    // Index with only one row for a two-chunk corpus.
    let one_vector = vec![embedder.embed("minimum necessary").await.unwrap()];
    let index =
        FlatIndex::build(embedder.dimensions(), DistanceMetric::InnerProduct, one_vector).unwrap();

    let result = Retriever::new(embedder, Arc::new(index), Arc::new(corpus));
    assert!(matches!(result, Err(AppError::Corpus(_))));
}

#[tokio::test]
async fn test_dimension_mismatch_is_fatal_at_assembly() {
    let build_embedder = Arc::new(VocabEmbedder::hipaa_fixture());
    let corpus = mini_corpus();
    let vectors = build_embedder.embed_batch(&corpus.texts()).await.unwrap();
    let index = FlatIndex::build(
        build_embedder.dimensions(),
        DistanceMetric::InnerProduct,
        vectors,
    )
    .unwrap();

    // A live embedder with a different vocabulary size than the index.
    let live_embedder = Arc::new(VocabEmbedder::new(&["minimum", "necessary"]));
    let result = Retriever::new(live_embedder, Arc::new(index), Arc::new(corpus));
    assert!(matches!(result, Err(AppError::Config(_))));
}

#[tokio::test]
async fn test_empty_retrieval_still_generates_via_model() {
    let llm = Arc::new(ScriptedLlm::new(
        "I do not have enough information in the provided context to answer that.",
    ));
    let generator = AnswerGenerator::new(llm.clone());

    let answer = generator.generate_answer("Anything?", &[]).await.unwrap();
    assert!(answer.contains("not have enough information"));

    let prompt = llm.last_prompt().unwrap();
    assert!(prompt.contains("Context:"));
}

#[tokio::test]
async fn test_generation_failure_surfaces_as_llm_error() {
    let generator = AnswerGenerator::new(Arc::new(FailingLlm));
    let result = generator.generate_answer("Q?", &[]).await;
    assert!(matches!(result, Err(AppError::Llm(_))));
}
