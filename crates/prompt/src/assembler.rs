//! Prompt assembler: bounded context block + template rendering.

use crate::types::{AssembledPrompt, ContextBudget, DynamicFacts, PromptTemplate};
use handlebars::Handlebars;
use inciq_core::{AppError, AppResult};
use std::collections::HashMap;

/// Separator between documents in the context block.
const DOCUMENT_SEPARATOR: &str = "\n\n---\n\n";

/// Assemble the generation prompt for one query turn.
///
/// `documents` must arrive in retrieval order (highest similarity first);
/// when the budget forces truncation, documents are dropped from the end of
/// the list, so the lowest-scoring evidence goes first. The returned
/// `truncated` flag reports any reduction so downstream confidence handling
/// can account for thinner evidence.
pub fn assemble(
    template: &PromptTemplate,
    question: &str,
    documents: &[String],
    facts: &DynamicFacts,
    budget: &ContextBudget,
) -> AppResult<AssembledPrompt> {
    let (context, documents_included, truncated) = build_context(documents, budget);

    if truncated {
        tracing::warn!(
            "Context truncated to fit budget: {} of {} documents included",
            documents_included,
            documents.len()
        );
    }

    let mut variables = HashMap::new();
    variables.insert("today".to_string(), facts.today.clone());
    variables.insert("context".to_string(), context);
    variables.insert("question".to_string(), question.to_string());

    let user = render_template(&template.template, &variables)?;

    Ok(AssembledPrompt {
        system: template.system.clone(),
        user,
        documents_included,
        truncated,
    })
}

/// Concatenate documents into a numbered context block bounded by the budget.
///
/// Returns (context, documents included, truncated flag).
fn build_context(documents: &[String], budget: &ContextBudget) -> (String, usize, bool) {
    let mut context = String::new();
    let mut included = 0;
    let mut sliced = false;

    for (i, text) in documents.iter().enumerate() {
        let block = format!("[Document {}]\n{}", i + 1, text);
        let extra = if context.is_empty() {
            block.len()
        } else {
            DOCUMENT_SEPARATOR.len() + block.len()
        };

        if context.len() + extra > budget.max_context_chars {
            break;
        }

        if !context.is_empty() {
            context.push_str(DOCUMENT_SEPARATOR);
        }
        context.push_str(&block);
        included += 1;
    }

    // If even the top-scoring document exceeds the budget on its own, keep a
    // hard-truncated slice of it rather than sending no evidence at all.
    if included == 0 && !documents.is_empty() {
        let block = format!("[Document 1]\n{}", documents[0]);
        let mut end = budget.max_context_chars.min(block.len());
        while end > 0 && !block.is_char_boundary(end) {
            end -= 1;
        }
        context.push_str(&block[..end]);
        included = 1;
        sliced = end < block.len();
    }

    let truncated = sliced || included < documents.len();
    (context, included, truncated)
}

/// Render a Handlebars template with variables.
fn render_template(template: &str, variables: &HashMap<String, String>) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // Disable HTML escaping for plain text
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string("prompt", template)
        .map_err(|e| AppError::Config(format!("Failed to register prompt template: {}", e)))?;

    let rendered = handlebars
        .render("prompt", &variables)
        .map_err(|e| AppError::Config(format!("Failed to render prompt template: {}", e)))?;

    Ok(rendered)
}
