//! Optional template override loading.
//!
//! The built-in template works out of the box; a YAML file can replace it
//! for teams that want different instruction wording.

use crate::types::PromptTemplate;
use inciq_core::{AppError, AppResult};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct TemplateFile {
    id: Option<String>,
    system: Option<String>,
    template: Option<String>,
}

/// Load a prompt template from a YAML file, filling unset fields from the
/// built-in default.
pub fn load_template(path: &Path) -> AppResult<PromptTemplate> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        AppError::Config(format!("Failed to read template file {:?}: {}", path, e))
    })?;

    let file: TemplateFile = serde_yaml::from_str(&contents).map_err(|e| {
        AppError::Config(format!("Failed to parse template file {:?}: {}", path, e))
    })?;

    let defaults = PromptTemplate::default();
    let template = PromptTemplate {
        id: file.id.unwrap_or(defaults.id),
        system: file.system.unwrap_or(defaults.system),
        template: file.template.unwrap_or(defaults.template),
    };

    tracing::debug!("Loaded prompt template '{}' from {:?}", template.id, path);
    Ok(template)
}
