//! Deterministic hashing-based embedding provider.
//!
//! Maps text to a unit vector via character trigrams and word-frequency
//! hashing. Not semantically meaningful like a neural model, but consistent,
//! content-dependent, and fully offline — the default provider, and the one
//! the test suite runs against.

use crate::embed::provider::EmbeddingProvider;
use crate::types::EmbeddingVector;
use inciq_core::AppResult;
use std::collections::{HashMap, HashSet};

/// Offline deterministic embedding provider.
#[derive(Debug)]
pub struct HashedProvider {
    dimensions: usize,
}

impl HashedProvider {
    /// Create a provider with the given vector dimension.
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    /// Produce a content-dependent embedding for one text.
    fn embed_text(&self, text: &str) -> EmbeddingVector {
        let mut embedding = vec![0.0f32; self.dimensions];
        let lower = text.to_lowercase();

        // Stop words carry no discriminating signal
        let stop_words: HashSet<&str> = [
            "the", "is", "at", "which", "on", "a", "an", "as", "are", "was", "were", "for", "to",
            "of", "in", "and", "or", "but", "with", "by", "from", "this", "that", "be", "have",
            "has", "had", "it", "its", "their", "they", "them",
        ]
        .iter()
        .copied()
        .collect();

        let words: Vec<&str> = lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| w.len() > 2 && !stop_words.contains(w))
            .collect();

        let mut word_freq: HashMap<&str, u32> = HashMap::new();
        for word in &words {
            *word_freq.entry(*word).or_insert(0) += 1;
        }

        for (word, freq) in &word_freq {
            // Character trigrams spread each word over several dimensions
            let chars: Vec<char> = word.chars().collect();
            for window in chars.windows(3) {
                let mut hash = 0u64;
                for &c in window {
                    hash = hash.wrapping_mul(37).wrapping_add(c as u64);
                }
                let dim = (hash as usize) % self.dimensions;
                embedding[dim] += (*freq as f32).sqrt();
            }

            // Whole-word hash anchors exact matches
            let hash = word
                .bytes()
                .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
            let dim = (hash as usize) % self.dimensions;
            embedding[dim] += *freq as f32;
        }

        // Normalize to a unit vector so cosine scores stay comparable
        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut embedding {
                *v /= norm;
            }
        }

        embedding
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for HashedProvider {
    fn provider_name(&self) -> &str {
        "hashed"
    }

    fn model_name(&self) -> &str {
        "trigram-hash-v1"
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<EmbeddingVector>> {
        Ok(texts.iter().map(|text| self.embed_text(text)).collect())
    }
}
