pub mod analyze;
pub mod configure;
pub mod summary;

use crate::cli::DataArgs;
use crate::config::Config;
use anyhow::{Context, Result};

/// Layer `--input`/column/delimiter flags over the `[data]` config section
pub fn apply_data_args(config: &mut Config, args: &DataArgs) -> Result<()> {
    if let Some(input) = &args.input {
        config.data.file = input.clone();
    }
    if let Some(column) = &args.group_column {
        config.data.group_column = column.clone();
    }
    if let Some(column) = &args.outcome_column {
        config.data.outcome_column = column.clone();
    }
    if let Some(delimiter) = args.delimiter {
        config.data.delimiter = u8::try_from(delimiter)
            .ok()
            .filter(u8::is_ascii)
            .with_context(|| format!("Delimiter '{}' is not a single ASCII character", delimiter))?;
    }
    Ok(())
}
