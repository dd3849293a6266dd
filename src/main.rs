use abtest::cli::{AnalyzeArgs, Cli, Commands};
use abtest::config::Config;
use abtest::utils::{AppError, OutputStyle, report_error, set_color_enabled};
use clap::Parser;
use log::LevelFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli) {
        match err.downcast_ref::<AppError>() {
            Some(app_err) => {
                let message = err.to_string();
                if message != app_err.to_string() {
                    eprintln!("{}", OutputStyle::muted(&message));
                }
                report_error(app_err);
            }
            None => eprintln!("❌ {}", OutputStyle::error(&format!("{:#}", err))),
        }
        std::process::exit(1);
    }
}

fn init_logging(debug: bool) {
    let level = if debug { LevelFilter::Debug } else { LevelFilter::Warn };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    // Ensure configuration exists and load it
    if cli.config.is_none() {
        Config::ensure_config_exists()?;
    }

    let config = if let Some(config_path) = &cli.config {
        Config::load_custom(config_path)?
    } else {
        Config::load()?
    };
    log::debug!("configuration: {:?}", config);

    set_color_enabled(config.general.color && !cli.no_color);

    let command = cli
        .command
        .unwrap_or_else(|| Commands::Analyze(AnalyzeArgs::default()));
    command.execute(config)
}
