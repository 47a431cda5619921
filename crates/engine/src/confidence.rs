//! Grounding-confidence estimator over generated answer text.
//!
//! Counts lexical signals of an evidence-based answer (retrieval/knowledge
//! vocabulary) against hedging vocabulary (modal/uncertainty terms), plus
//! model/AI mentions. This is a heuristic proxy, not a factual verifier: it
//! annotates answers and never blocks them. Weights and thresholds are a
//! single fixed, documented set and should be read as approximate.

use serde::Serialize;
use std::collections::BTreeMap;

/// Vocabulary signalling retrieval-grounded content.
pub const GROUNDING_TERMS: &[&str] = &[
    "rag",
    "retrieval",
    "vector",
    "embedding",
    "grounding",
    "knowledge",
    "context",
    "chunk",
    "faiss",
    "pinecone",
    "source",
    "cite",
];

/// Hedging / uncertainty vocabulary.
pub const HEDGING_TERMS: &[&str] = &[
    "may",
    "might",
    "possibly",
    "typically",
    "seems",
    "perhaps",
    "probably",
    "could",
    "sometimes",
    "generally",
];

/// Model/AI vocabulary.
pub const MODEL_TERMS: &[&str] = &[
    "llm", "grok", "model", "ai", "neural", "gpt", "bert",
];

const BASE_SCORE: i32 = 80;
const GROUNDING_WEIGHT: i32 = 6;
const HEDGE_WEIGHT: i32 = 5;
const MODEL_MENTION_WEIGHT: i32 = 2;
const MIN_SCORE: i32 = 30;
const MAX_SCORE: i32 = 99;

const HIGHLY_GROUNDED_THRESHOLD: i32 = 85;
const MODERATE_THRESHOLD: i32 = 65;

/// Three-way confidence label derived purely from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConfidenceLabel {
    HighlyGrounded,
    Moderate,
    RiskOfHallucination,
}

impl ConfidenceLabel {
    fn from_score(score: i32) -> Self {
        if score >= HIGHLY_GROUNDED_THRESHOLD {
            ConfidenceLabel::HighlyGrounded
        } else if score >= MODERATE_THRESHOLD {
            ConfidenceLabel::Moderate
        } else {
            ConfidenceLabel::RiskOfHallucination
        }
    }

    /// Human-readable label for display.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceLabel::HighlyGrounded => "HIGHLY GROUNDED",
            ConfidenceLabel::Moderate => "MODERATE",
            ConfidenceLabel::RiskOfHallucination => "RISK OF HALLUCINATION",
        }
    }
}

/// Result of scoring one answer.
#[derive(Debug, Clone, Serialize)]
pub struct ConfidenceReport {
    /// Clamped heuristic score
    pub score: i32,

    /// Label derived from the score against fixed thresholds
    pub label: ConfidenceLabel,

    /// Raw signal counts by name
    pub counts: BTreeMap<String, usize>,
}

/// Score an already-generated answer for lexical grounding signals.
///
/// Independent of the retrieval step that produced the answer; operates on
/// the text alone.
pub fn estimate(answer: &str) -> ConfidenceReport {
    let tokens: Vec<String> = answer
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect();

    let count_hits = |lexicon: &[&str]| -> usize {
        tokens.iter().filter(|t| lexicon.contains(&t.as_str())).count()
    };

    let grounding = count_hits(GROUNDING_TERMS);
    let hedging = count_hits(HEDGING_TERMS);
    let model_mentions = count_hits(MODEL_TERMS);

    let raw = BASE_SCORE + GROUNDING_WEIGHT * grounding as i32 - HEDGE_WEIGHT * hedging as i32
        + MODEL_MENTION_WEIGHT * model_mentions as i32;
    let score = raw.clamp(MIN_SCORE, MAX_SCORE);

    let mut counts = BTreeMap::new();
    counts.insert("grounding".to_string(), grounding);
    counts.insert("hedging".to_string(), hedging);
    counts.insert("model_mentions".to_string(), model_mentions);

    ConfidenceReport {
        score,
        label: ConfidenceLabel::from_score(score),
        counts,
    }
}
