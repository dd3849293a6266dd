use crate::cli::{AnalyzeArgs, OutputFormat};
use crate::commands::apply_data_args;
use crate::config::Config;
use crate::core::operations::ExperimentOperations;
use crate::core::traits::{DatasetSource, ExperimentAnalysis};
use crate::utils::report::{render_json, render_text};
use anyhow::{Context, Result};

pub fn handle_analyze_command(
    config: Config,
    args: &AnalyzeArgs,
) -> Result<()> {
    let config = resolve_config(config, args)?;
    let format = args.format.unwrap_or(config.general.format);
    let operations = ExperimentOperations::new(config);

    let report = operations
        .analyze()
        .with_context(|| format!("Analysis of {} failed", operations.describe()))?;

    match format {
        OutputFormat::Text => println!("{}", render_text(&report)),
        OutputFormat::Json => println!("{}", render_json(&report)?),
    }

    Ok(())
}

/// Apply command-line overrides and re-validate the result
pub fn resolve_config(mut config: Config, args: &AnalyzeArgs) -> Result<Config> {
    apply_data_args(&mut config, &args.data)?;

    if let Some(treatment) = &args.treatment {
        config.test.treatment = treatment.clone();
    }
    if let Some(control) = &args.control {
        config.test.control = control.clone();
    }
    if let Some(alpha) = args.alpha {
        config.test.alpha = alpha;
    }
    if let Some(alternative) = args.alternative {
        config.test.alternative = alternative;
    }

    config.validate()?;
    Ok(config)
}
