use crate::utils::output::OutputStyle;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Column '{column}' not found (available: {})", .available.join(", "))]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    #[error("Group '{label}' not found in data (found: {})", .found.join(", "))]
    MissingGroup { label: String, found: Vec<String> },

    #[error("Invalid outcome value '{value}' on line {line}, expected 0/1 or true/false")]
    InvalidOutcome { line: u64, value: String },

    #[error("Dataset contains no usable rows")]
    EmptyDataset,

    #[error("Statistics error: {0}")]
    Statistics(String),
}

/// Result type alias for consistent error handling across the application
pub type AppResult<T> = Result<T, AppError>;

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        match err.kind() {
            csv::ErrorKind::Io(e) => AppError::Io(e.to_string()),
            _ => AppError::Csv(err.to_string()),
        }
    }
}

pub fn report_error(err: &AppError) {
    match err {
        AppError::MissingColumn { .. } | AppError::MissingGroup { .. } => {
            eprintln!("⚠️  {}", OutputStyle::warning(&err.to_string()));
        }
        AppError::Config(msg) => {
            eprintln!("⚙️  {}", OutputStyle::error(&format!("Config: {}", msg)));
        }
        _ => {
            eprintln!("❌ {}", OutputStyle::error(&err.to_string()));
        }
    }
}
