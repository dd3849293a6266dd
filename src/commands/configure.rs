use crate::config::Config;
use crate::cli::ConfigCommands;
use crate::utils::{OutputStyle, print_success};
use anyhow::Result;

pub fn handle_config_command(
    config: Config,
    command: Option<ConfigCommands>,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) => handle_show_command(&config),
        Some(ConfigCommands::Path) => handle_path_command(),
        Some(ConfigCommands::Reset) => handle_reset_command(),
        None => handle_config_help(),
    }
}

fn handle_show_command(config: &Config) -> Result<()> {
    OutputStyle::print_header("⚙️  abtest Configuration");

    println!("General:");
    OutputStyle::print_field_colored("Color", &config.general.color.to_string(), OutputStyle::info);
    OutputStyle::print_field_colored("Format", &format!("{:?}", config.general.format).to_lowercase(), OutputStyle::info);

    println!("Data:");
    OutputStyle::print_field_colored("File", &config.data.file.display().to_string(), OutputStyle::info);
    OutputStyle::print_field_colored("Delimiter", &format!("{:?}", config.data.delimiter as char), OutputStyle::info);
    OutputStyle::print_field_colored("Group column", &config.data.group_column, OutputStyle::info);
    OutputStyle::print_field_colored("Outcome column", &config.data.outcome_column, OutputStyle::info);

    println!("Test:");
    OutputStyle::print_field_colored("Treatment", &config.test.treatment, OutputStyle::group);
    OutputStyle::print_field_colored("Control", &config.test.control, OutputStyle::group);
    OutputStyle::print_field_colored("Alpha", &config.test.alpha.to_string(), OutputStyle::number);
    OutputStyle::print_field_colored("Alternative", &config.test.alternative.to_string(), OutputStyle::number);

    Ok(())
}

fn handle_path_command() -> Result<()> {
    println!("{}", Config::config_file_path().display());
    Ok(())
}

fn handle_config_help() -> Result<()> {
    OutputStyle::print_header("⚙️  Configuration Management");
    println!("Available configuration commands:");
    println!("  abtest config show    - Show current configuration");
    println!("  abtest config path    - Print configuration file location");
    println!("  abtest config reset   - Reset configuration to defaults");
    println!();
    println!("Configuration file location: {}", Config::config_file_path().display());
    Ok(())
}

fn handle_reset_command() -> Result<()> {
    Config::default().save()?;
    print_success(&format!(
        "Configuration reset to defaults: {}",
        Config::config_file_path().display()
    ));
    Ok(())
}
