//! RAG engine facade: dataset lifecycle plus the per-turn query path.

use crate::confidence;
use crate::dataset;
use crate::embed::EmbeddingProvider;
use crate::fingerprint::dataset_fingerprint;
use crate::index::{IndexEntry, VectorIndex};
use crate::record::Record;
use crate::retriever::Retriever;
use crate::session::Session;
use crate::types::{Answer, Document, IngestStats};
use inciq_core::{AppConfig, AppError, AppResult};
use inciq_llm::{generate_with_retry, LlmClient, LlmRequest, RetryPolicy};
use inciq_prompt::{assemble, ContextBudget, DynamicFacts, PromptTemplate};
use std::sync::Arc;

/// Tunables for the query path.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Chat model identifier
    pub model: String,

    /// Documents retrieved per query
    pub top_k: usize,

    /// Character budget for the assembled context block
    pub max_context_chars: usize,

    /// Sampling temperature
    pub temperature: f32,

    /// Maximum tokens per answer
    pub max_tokens: u32,
}

impl EngineOptions {
    /// Derive options from application configuration.
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            model: config.model.clone(),
            top_k: config.top_k,
            max_context_chars: config.max_context_chars,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }
}

/// One loaded dataset generation: documents plus the index built over them.
///
/// Swapped wholesale on a new load; an outstanding query holds `Arc` clones
/// and keeps its snapshot.
struct DatasetGeneration {
    fingerprint: String,
    documents: Arc<Vec<Document>>,
    index: Arc<VectorIndex>,
}

/// Retrieval-augmented query engine over one in-memory dataset.
pub struct RagEngine {
    embedder: Arc<dyn EmbeddingProvider>,
    llm: Arc<dyn LlmClient>,
    retry: RetryPolicy,
    template: PromptTemplate,
    options: EngineOptions,
    generation: Option<DatasetGeneration>,
}

impl RagEngine {
    /// Create an engine with explicit collaborators.
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        llm: Arc<dyn LlmClient>,
        retry: RetryPolicy,
        template: PromptTemplate,
        options: EngineOptions,
    ) -> Self {
        Self {
            embedder,
            llm,
            retry,
            template,
            options,
            generation: None,
        }
    }

    /// Whether a dataset is currently loaded.
    pub fn is_loaded(&self) -> bool {
        self.generation.is_some()
    }

    /// Fingerprint of the loaded dataset, if any.
    pub fn fingerprint(&self) -> Option<&str> {
        self.generation.as_ref().map(|g| g.fingerprint.as_str())
    }

    /// Load a dataset: normalize rows, embed, build the index, swap it in.
    ///
    /// Memoized by content fingerprint: reloading identical content keeps
    /// the existing index. A different fingerprint discards the old index
    /// entirely; the new one becomes visible only after `build` completes.
    pub async fn load_dataset(&mut self, rows: &[Record]) -> AppResult<IngestStats> {
        let (documents, rows_skipped) = dataset::ingest(rows)?;
        let fingerprint = dataset_fingerprint(&documents);

        let mut stats = IngestStats {
            rows_total: rows.len(),
            documents: documents.len(),
            rows_skipped,
            fingerprint: fingerprint.clone(),
            reused_index: false,
        };

        if let Some(ref generation) = self.generation {
            if generation.fingerprint == fingerprint {
                tracing::info!("Dataset unchanged (fingerprint match), reusing index");
                stats.reused_index = true;
                return Ok(stats);
            }
        }

        let texts: Vec<String> = documents.iter().map(|d| d.text.clone()).collect();
        tracing::info!(
            "Embedding {} documents with provider '{}' (model: {})",
            texts.len(),
            self.embedder.provider_name(),
            self.embedder.model_name()
        );
        let vectors = self.embedder.embed_batch(&texts).await?;

        if vectors.len() != documents.len() {
            return Err(AppError::Embedding(format!(
                "Expected {} embeddings, got {}",
                documents.len(),
                vectors.len()
            )));
        }

        let entries: Vec<IndexEntry> = documents
            .iter()
            .zip(vectors)
            .map(|(document, vector)| IndexEntry {
                document_id: document.id.clone(),
                vector,
            })
            .collect();

        let index = VectorIndex::build(entries)?;

        // Build-then-swap: the old generation is dropped only now, and any
        // outstanding query still holds its own Arc snapshot.
        self.generation = Some(DatasetGeneration {
            fingerprint,
            documents: Arc::new(documents),
            index: Arc::new(index),
        });

        tracing::info!(
            "Dataset loaded: {} documents indexed ({} rows skipped)",
            stats.documents,
            stats.rows_skipped
        );

        Ok(stats)
    }

    /// Answer one question against the loaded dataset.
    ///
    /// Retrieves evidence, assembles the bounded prompt, generates with the
    /// retry policy (a degraded answer still completes the turn), scores the
    /// answer for grounding signals, and appends both turns to the session.
    pub async fn submit(&self, session: &mut Session, question: &str) -> AppResult<Answer> {
        let question = question.trim();
        if question.is_empty() {
            return Err(AppError::Retrieval("Question must not be empty".to_string()));
        }

        let generation = self.generation.as_ref().ok_or_else(|| {
            AppError::Retrieval("No dataset loaded; call load_dataset first".to_string())
        })?;

        // Snapshot for this turn
        let retriever = Retriever::new(
            Arc::clone(&self.embedder),
            Arc::clone(&generation.index),
            Arc::clone(&generation.documents),
        );

        let sources = retriever.retrieve(question, self.options.top_k).await?;

        let facts = DynamicFacts::now();
        let budget = ContextBudget::new(self.options.max_context_chars);
        let prompt = assemble(&self.template, question, &sources.texts(), &facts, &budget)?;

        let request = LlmRequest::new(prompt.user, &self.options.model)
            .with_system(prompt.system)
            .with_temperature(self.options.temperature)
            .with_max_tokens(self.options.max_tokens);

        let outcome = generate_with_retry(self.llm.as_ref(), &request, &self.retry).await?;
        let degraded = outcome.is_degraded();
        let answer_text = outcome.text().to_string();

        let confidence = confidence::estimate(&answer_text);

        session.push_user(question);
        session.push_assistant(answer_text.clone());

        Ok(Answer {
            answer: answer_text,
            sources,
            confidence,
            context_truncated: prompt.truncated,
            degraded,
        })
    }
}
