use crate::cli::{OutputFormat, SummaryArgs};
use crate::commands::apply_data_args;
use crate::config::Config;
use crate::core::operations::ExperimentOperations;
use crate::core::traits::{DatasetSource, ExperimentAnalysis};
use crate::utils::OutputStyle;
use crate::utils::report::{render_group_table, render_summary_json};
use anyhow::{Context, Result};

pub fn handle_summary_command(
    mut config: Config,
    args: &SummaryArgs,
) -> Result<()> {
    apply_data_args(&mut config, &args.data)?;
    config.validate()?;

    let format = args.format.unwrap_or(config.general.format);
    let operations = ExperimentOperations::new(config);

    let groups = operations
        .summarize()
        .with_context(|| format!("Failed to summarize {}", operations.describe()))?;

    match format {
        OutputFormat::Text => {
            OutputStyle::print_header("Test groups statistics:");
            print!("{}", render_group_table(&groups));
            println!(
                "{}",
                OutputStyle::muted(&format!(
                    "{} groups, {} observations",
                    groups.len(),
                    groups.total_observations()
                ))
            );
        }
        OutputFormat::Json => println!("{}", render_summary_json(&groups)?),
    }

    Ok(())
}
