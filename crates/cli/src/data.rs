//! Tabular input loading.
//!
//! Reads a CSV file into fully-loaded rows for the engine. Individual
//! unreadable records are skipped and counted (partial-failure semantics);
//! a file that cannot be opened, has no header, or yields no rows at all is
//! a fatal ingestion error.

use inciq_core::{AppError, AppResult};
use inciq_engine::Record;
use std::path::Path;

/// Result of loading a tabular file.
#[derive(Debug)]
pub struct LoadedRows {
    /// Parsed rows, column name → value
    pub rows: Vec<Record>,

    /// Records the CSV reader could not parse
    pub records_skipped: usize,
}

/// Load a CSV file into named-column rows.
pub fn load_rows(path: &Path) -> AppResult<LoadedRows> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| AppError::Ingestion(format!("Failed to open {:?}: {}", path, e)))?;

    let headers = reader
        .headers()
        .map_err(|e| AppError::Ingestion(format!("Failed to read header row: {}", e)))?
        .clone();

    if headers.is_empty() {
        return Err(AppError::Ingestion(
            "Dataset has no header row".to_string(),
        ));
    }

    let mut rows = Vec::new();
    let mut records_skipped = 0usize;

    for (position, result) in reader.records().enumerate() {
        match result {
            Ok(record) => {
                let row: Record = headers
                    .iter()
                    .zip(record.iter())
                    .map(|(name, value)| (name.to_string(), value.to_string()))
                    .collect();
                rows.push(row);
            }
            Err(e) => {
                tracing::warn!("Skipping unreadable record {}: {}", position + 1, e);
                records_skipped += 1;
            }
        }
    }

    if rows.is_empty() {
        return Err(AppError::Ingestion(format!(
            "Dataset {:?} contains no data rows",
            path
        )));
    }

    tracing::info!(
        "Loaded {} rows from {:?} ({} records skipped)",
        rows.len(),
        path,
        records_skipped
    );

    Ok(LoadedRows {
        rows,
        records_skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_basic_csv() {
        let file = write_csv("INC#,Priority,Comments\nI1,P1,disk failure\nI2,P2,cert expiry\n");
        let loaded = load_rows(file.path()).unwrap();

        assert_eq!(loaded.rows.len(), 2);
        assert_eq!(loaded.records_skipped, 0);
        assert_eq!(loaded.rows[0].get("INC#").map(String::as_str), Some("I1"));
        assert_eq!(
            loaded.rows[1].get("Comments").map(String::as_str),
            Some("cert expiry")
        );
    }

    #[test]
    fn test_short_record_tolerated() {
        // Second row is missing trailing columns; flexible parsing keeps it
        let file = write_csv("INC#,Priority,Comments\nI1,P1,disk failure\nI2\n");
        let loaded = load_rows(file.path()).unwrap();

        assert_eq!(loaded.rows.len(), 2);
        assert_eq!(loaded.rows[1].get("INC#").map(String::as_str), Some("I2"));
        assert_eq!(loaded.rows[1].get("Priority"), None);
    }

    #[test]
    fn test_values_trimmed() {
        let file = write_csv("INC#,Priority\n  I1  ,  P1 \n");
        let loaded = load_rows(file.path()).unwrap();
        assert_eq!(loaded.rows[0].get("INC#").map(String::as_str), Some("I1"));
    }

    #[test]
    fn test_empty_file_fatal() {
        let file = write_csv("");
        assert!(load_rows(file.path()).is_err());
    }

    #[test]
    fn test_header_only_fatal() {
        let file = write_csv("INC#,Priority\n");
        let result = load_rows(file.path());
        assert!(matches!(result, Err(AppError::Ingestion(_))));
    }

    #[test]
    fn test_missing_file_fatal() {
        let result = load_rows(Path::new("/nonexistent/incidents.csv"));
        assert!(matches!(result, Err(AppError::Ingestion(_))));
    }
}
