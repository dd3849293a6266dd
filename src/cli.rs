use clap::{Parser, Subcommand, Args};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use anyhow::Result;
use crate::config::Config;
use crate::commands::{analyze, summary, configure};
use crate::core::ztest::Alternative;

#[derive(Parser)]
#[command(name = "abtest")]
#[command(about = "Two-proportion significance test for A/B conversion data")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable debug logging")]
    pub debug: bool,

    #[arg(long, global = true, help = "Disable coloured output")]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Commands {
    pub fn execute(self, config: Config) -> Result<()> {
        match self {
            Commands::Analyze(args) => {
                analyze::handle_analyze_command(config, &args)?;
            }
            Commands::Summary(args) => {
                summary::handle_summary_command(config, &args)?;
            }
            Commands::Config(args) => {
                configure::handle_config_command(config, args.command)?;
            }
        }
        Ok(())
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the significance test (default when no subcommand is given)
    Analyze(AnalyzeArgs),

    /// Show per-group conversion counts without testing
    Summary(SummaryArgs),

    /// Configuration management
    Config(ConfigArgs),
}

/// Where to read observations from; overrides the `[data]` config section
#[derive(Args, Default, Clone)]
pub struct DataArgs {
    #[arg(short, long, value_name = "FILE", help = "Delimited data file")]
    pub input: Option<PathBuf>,

    #[arg(long, help = "Column holding the group label")]
    pub group_column: Option<String>,

    #[arg(long, help = "Column holding the 0/1 conversion outcome")]
    pub outcome_column: Option<String>,

    #[arg(long, help = "Field delimiter (single ASCII character)")]
    pub delimiter: Option<char>,
}

#[derive(Args, Default, Clone)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub data: DataArgs,

    #[arg(short, long, help = "Treatment group label")]
    pub treatment: Option<String>,

    #[arg(long, help = "Control group label")]
    pub control: Option<String>,

    #[arg(short, long, help = "Significance threshold")]
    pub alpha: Option<f64>,

    #[arg(long, value_enum)]
    pub alternative: Option<Alternative>,

    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

#[derive(Args, Default, Clone)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub data: DataArgs,

    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: Option<ConfigCommands>,
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Reset configuration to defaults
    Reset,
}
