//! Record normalizer: one structured row → one canonical document.
//!
//! Rows are duck-typed mappings of column name to value; the column set is
//! dataset-dependent and unknown at build time. Missing or blank fields
//! render as an explicit placeholder so ingestion is total over arbitrary
//! column sets.

use crate::types::Document;
use std::collections::BTreeMap;

/// A single input row: column name → raw value.
pub type Record = BTreeMap<String, String>;

/// Placeholder rendered for missing or blank fields.
pub const MISSING_FIELD: &str = "N/A";

/// Column carrying the incident identifier.
const ID_COLUMN: &str = "INC#";

/// Columns the text template renders, in template order.
const TEMPLATE_COLUMNS: &[&str] = &[
    ID_COLUMN,
    "Priority",
    "Product",
    "Date",
    "Duration(min)",
    "Initial Causation",
    "Final Causation",
    "Causation Code",
    "Comments",
    "Repeat",
];

/// Look up a column, treating absent and blank values the same.
fn field<'a>(row: &'a Record, name: &str) -> &'a str {
    match row.get(name) {
        Some(value) if !value.trim().is_empty() => value.trim(),
        _ => MISSING_FIELD,
    }
}

/// Normalize one row into a [`Document`].
///
/// Returns `None` when no templated column carries a value — such a row has
/// nothing to embed and is skipped by ingestion. All original columns,
/// recognized or not, are retained in `fields` for provenance display.
pub fn normalize(row: &Record, source_index: usize) -> Option<Document> {
    let recognized = TEMPLATE_COLUMNS
        .iter()
        .any(|name| field(row, name) != MISSING_FIELD);
    if !recognized {
        return None;
    }

    let incident = field(row, ID_COLUMN);
    let text = format!(
        "Incident {} | Priority {} | Product {}\n\
         Date: {} | Duration: {} minutes\n\
         Causation: {} -> {}\n\
         Code: {}\n\
         Comments: {}\n\
         Repeat: {}",
        incident,
        field(row, "Priority"),
        field(row, "Product"),
        field(row, "Date"),
        field(row, "Duration(min)"),
        field(row, "Initial Causation"),
        field(row, "Final Causation"),
        field(row, "Causation Code"),
        field(row, "Comments"),
        field(row, "Repeat"),
    );

    let id = if incident != MISSING_FIELD {
        incident.to_string()
    } else {
        format!("row-{}", source_index)
    };

    let fields: BTreeMap<String, String> = row
        .iter()
        .map(|(k, v)| (k.clone(), v.trim().to_string()))
        .collect();

    Some(Document {
        id,
        text,
        fields,
        source_index,
    })
}
