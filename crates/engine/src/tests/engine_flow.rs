//! End-to-end engine tests over the deterministic offline embedder and a
//! scripted generation client.

use crate::embed::providers::HashedProvider;
use crate::engine::{EngineOptions, RagEngine};
use crate::record::Record;
use crate::session::Session;
use inciq_core::{AppError, AppResult};
use inciq_llm::{
    LlmClient, LlmRequest, LlmResponse, LlmUsage, RetryPolicy, SERVICE_UNAVAILABLE_MESSAGE,
};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Scripted client: either always fails, or echoes a canned answer.
struct ScriptedLlm {
    answer: Option<String>,
    calls: AtomicU32,
}

impl ScriptedLlm {
    fn answering(answer: &str) -> Self {
        Self {
            answer: Some(answer.to_string()),
            calls: AtomicU32::new(0),
        }
    }

    fn failing() -> Self {
        Self {
            answer: None,
            calls: AtomicU32::new(0),
        }
    }
}

#[async_trait::async_trait]
impl LlmClient for ScriptedLlm {
    fn provider_name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.answer {
            Some(ref answer) => Ok(LlmResponse {
                content: answer.clone(),
                model: request.model.clone(),
                usage: LlmUsage::default(),
            }),
            None => Err(AppError::Generation("endpoint unreachable".to_string())),
        }
    }
}

fn row(pairs: &[(&str, &str)]) -> Record {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn incident_rows() -> Vec<Record> {
    vec![
        row(&[
            ("INC#", "I1"),
            ("Priority", "P1"),
            ("Product", "X"),
            ("Comments", "disk failure on the primary array"),
        ]),
        row(&[
            ("INC#", "I2"),
            ("Priority", "P3"),
            ("Product", "Y"),
            ("Comments", "certificate expiry on the gateway"),
        ]),
        row(&[
            ("INC#", "I3"),
            ("Priority", "P2"),
            ("Product", "Z"),
            ("Comments", "network outage in region east"),
        ]),
    ]
}

fn engine_with(llm: ScriptedLlm, top_k: usize) -> RagEngine {
    let options = EngineOptions {
        model: "scripted-model".to_string(),
        top_k,
        max_context_chars: 12_000,
        temperature: 0.3,
        max_tokens: 512,
    };

    RagEngine::new(
        Arc::new(HashedProvider::new(128)),
        Arc::new(llm),
        RetryPolicy::new(2, Duration::from_millis(1)),
        Default::default(),
        options,
    )
}

#[tokio::test]
async fn test_full_turn_answer_sources_confidence() {
    let mut engine = engine_with(
        ScriptedLlm::answering("Incident I1 was caused by a disk failure on the primary array."),
        6,
    );

    let stats = engine.load_dataset(&incident_rows()).await.unwrap();
    assert_eq!(stats.documents, 3);
    assert_eq!(stats.rows_skipped, 0);
    assert!(!stats.reused_index);

    let mut session = Session::new();
    let answer = engine.submit(&mut session, "what caused I1?").await.unwrap();

    assert!(answer.answer.contains("disk failure"));
    assert!(!answer.degraded);
    assert!(!answer.context_truncated);
    // k=6 over 3 documents: everything comes back
    assert_eq!(answer.sources.len(), 3);
    for pair in answer.sources.hits.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
    assert!((30..=99).contains(&answer.confidence.score));

    // Both turns recorded
    assert_eq!(session.len(), 2);
    assert_eq!(session.latest_question(), Some("what caused I1?"));
}

#[tokio::test]
async fn test_single_row_dataset_retrieves_that_row() {
    let mut engine = engine_with(ScriptedLlm::answering("Disk failure."), 6);

    let rows = vec![row(&[
        ("INC#", "I1"),
        ("Priority", "P1"),
        ("Product", "X"),
        ("Comments", "disk failure"),
    ])];
    engine.load_dataset(&rows).await.unwrap();

    let mut session = Session::new();
    let answer = engine.submit(&mut session, "what caused I1?").await.unwrap();

    // k effectively 1
    assert_eq!(answer.sources.len(), 1);
    assert_eq!(answer.sources.hits[0].document.id, "I1");
}

#[tokio::test]
async fn test_degraded_answer_completes_the_turn() {
    let mut engine = engine_with(ScriptedLlm::failing(), 3);
    engine.load_dataset(&incident_rows()).await.unwrap();

    let mut session = Session::new();
    let answer = engine.submit(&mut session, "what caused I1?").await.unwrap();

    assert!(answer.degraded);
    assert_eq!(answer.answer, SERVICE_UNAVAILABLE_MESSAGE);
    // The session still appends both turns; nothing crashed
    assert_eq!(session.len(), 2);
    assert_eq!(session.turns()[1].content, SERVICE_UNAVAILABLE_MESSAGE);
}

#[tokio::test]
async fn test_reload_same_dataset_reuses_index() {
    let mut engine = engine_with(ScriptedLlm::answering("ok"), 3);

    let first = engine.load_dataset(&incident_rows()).await.unwrap();
    assert!(!first.reused_index);
    let fingerprint = first.fingerprint.clone();

    let second = engine.load_dataset(&incident_rows()).await.unwrap();
    assert!(second.reused_index);
    assert_eq!(second.fingerprint, fingerprint);
}

#[tokio::test]
async fn test_new_dataset_discards_old_index() {
    let mut engine = engine_with(ScriptedLlm::answering("ok"), 6);

    engine.load_dataset(&incident_rows()).await.unwrap();
    let old_fingerprint = engine.fingerprint().unwrap().to_string();

    let replacement = vec![row(&[
        ("INC#", "I9"),
        ("Priority", "P1"),
        ("Comments", "power loss in the data hall"),
    ])];
    let stats = engine.load_dataset(&replacement).await.unwrap();

    assert!(!stats.reused_index);
    assert_ne!(engine.fingerprint().unwrap(), old_fingerprint);

    let mut session = Session::new();
    let answer = engine.submit(&mut session, "what happened?").await.unwrap();
    // Only the new corpus is visible
    assert_eq!(answer.sources.len(), 1);
    assert_eq!(answer.sources.hits[0].document.id, "I9");
}

#[tokio::test]
async fn test_retrieval_deterministic_across_rebuilds() {
    let question = "tell me about the network outage";

    let mut ids_per_run: Vec<Vec<String>> = Vec::new();
    for _ in 0..2 {
        let mut engine = engine_with(ScriptedLlm::answering("ok"), 3);
        engine.load_dataset(&incident_rows()).await.unwrap();

        let mut session = Session::new();
        let answer = engine.submit(&mut session, question).await.unwrap();
        ids_per_run.push(
            answer
                .sources
                .hits
                .iter()
                .map(|h| h.document.id.clone())
                .collect(),
        );
    }

    assert_eq!(ids_per_run[0], ids_per_run[1]);
}

#[tokio::test]
async fn test_submit_without_dataset_fails() {
    let engine = engine_with(ScriptedLlm::answering("ok"), 3);
    let mut session = Session::new();

    let result = engine.submit(&mut session, "anything").await;
    assert!(matches!(result, Err(AppError::Retrieval(_))));
    assert!(session.is_empty());
}

#[tokio::test]
async fn test_submit_empty_question_fails() {
    let mut engine = engine_with(ScriptedLlm::answering("ok"), 3);
    engine.load_dataset(&incident_rows()).await.unwrap();

    let mut session = Session::new();
    let result = engine.submit(&mut session, "   ").await;
    assert!(matches!(result, Err(AppError::Retrieval(_))));
    assert!(session.is_empty());
}

#[tokio::test]
async fn test_context_truncation_reported() {
    let options = EngineOptions {
        model: "scripted-model".to_string(),
        top_k: 3,
        max_context_chars: 150, // Fits roughly one rendered document
        temperature: 0.3,
        max_tokens: 512,
    };
    let mut engine = RagEngine::new(
        Arc::new(HashedProvider::new(128)),
        Arc::new(ScriptedLlm::answering("ok")),
        RetryPolicy::new(2, Duration::from_millis(1)),
        Default::default(),
        options,
    );
    engine.load_dataset(&incident_rows()).await.unwrap();

    let mut session = Session::new();
    let answer = engine.submit(&mut session, "what caused I1?").await.unwrap();
    assert!(answer.context_truncated);
}
