//! Loading observations from delimited text

use crate::core::data::{Dataset, Observation};
use crate::core::traits::DatasetSource;
use crate::utils::error::{AppError, AppResult};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// A delimited file with a header row
#[derive(Debug, Clone)]
pub struct CsvSource {
    pub path: PathBuf,
    pub delimiter: u8,
    pub group_column: String,
    pub outcome_column: String,
}

impl CsvSource {
    pub fn new(
        path: impl Into<PathBuf>,
        group_column: impl Into<String>,
        outcome_column: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            delimiter: b',',
            group_column: group_column.into(),
            outcome_column: outcome_column.into(),
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Parse observations from any reader using this source's settings
    pub fn read_from<R: Read>(&self, reader: R) -> AppResult<Dataset> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let group_idx = column_index(&headers, &self.group_column)?;
        let outcome_idx = column_index(&headers, &self.outcome_column)?;

        let mut dataset = Dataset::new(&self.group_column, &self.outcome_column);

        for record in csv_reader.records() {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();

            let group = record.get(group_idx).unwrap_or("");
            let outcome = record.get(outcome_idx).unwrap_or("");
            if group.is_empty() || outcome.is_empty() {
                log::debug!("line {}: empty group or outcome, skipping", line);
                dataset.skipped_rows += 1;
                continue;
            }

            let converted = parse_outcome(outcome).ok_or_else(|| AppError::InvalidOutcome {
                line,
                value: outcome.to_string(),
            })?;
            dataset.push(Observation::new(group, converted));
        }

        if dataset.skipped_rows > 0 {
            log::warn!(
                "skipped {} row(s) with an empty '{}' or '{}' value",
                dataset.skipped_rows,
                self.group_column,
                self.outcome_column
            );
        }

        if dataset.is_empty() {
            return Err(AppError::EmptyDataset);
        }

        log::debug!("loaded {} observations", dataset.len());
        Ok(dataset)
    }
}

impl DatasetSource for CsvSource {
    fn load_dataset(&self) -> AppResult<Dataset> {
        log::info!("reading observations from {}", self.path.display());
        let file = File::open(&self.path).map_err(|e| {
            AppError::Io(format!("Failed to open {}: {}", self.path.display(), e))
        })?;
        self.read_from(file)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

fn column_index(headers: &csv::StringRecord, name: &str) -> AppResult<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| AppError::MissingColumn {
            column: name.to_string(),
            available: headers.iter().map(str::to_string).collect(),
        })
}

/// Interpret a binary outcome cell: 0/1, 0.0/1.0 or true/false
pub fn parse_outcome(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "1.0" | "true" => Some(true),
        "0" | "0.0" | "false" => Some(false),
        _ => None,
    }
}

/// Convenience for callers holding a path and column names
pub fn load_csv(
    path: &Path,
    group_column: &str,
    outcome_column: &str,
    delimiter: u8,
) -> AppResult<Dataset> {
    CsvSource::new(path, group_column, outcome_column)
        .with_delimiter(delimiter)
        .load_dataset()
}
