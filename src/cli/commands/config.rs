//! Config command implementation.

use colored::Colorize;
use serde_json::json;

use crate::cli::args::{ConfigCommands, OutputFormat};
use crate::config::{Config, Paths};
use crate::error::StudyError;
use crate::output::to_json;

/// Execute config subcommands.
///
/// # Errors
///
/// Returns an error if the file cannot be written or already exists without
/// `--force`.
pub fn config(
    cmd: ConfigCommands,
    config: &Config,
    paths: &Paths,
    format: OutputFormat,
) -> Result<String, StudyError> {
    match cmd {
        ConfigCommands::Show => match format {
            OutputFormat::Json => to_json(config),
            OutputFormat::Pretty => config.to_yaml(),
        },
        ConfigCommands::Init { force } => init_config(paths, force, format),
        ConfigCommands::Path => match format {
            OutputFormat::Json => to_json(&json!({
                "config": paths.config_file,
                "database": paths.database,
                "logs": paths.logs,
            })),
            OutputFormat::Pretty => Ok(paths.config_file.display().to_string()),
        },
    }
}

fn init_config(paths: &Paths, force: bool, format: OutputFormat) -> Result<String, StudyError> {
    if paths.config_file.exists() && !force {
        return Err(StudyError::Config(format!(
            "{} already exists.\nUse --force to overwrite.",
            paths.config_file.display()
        )));
    }

    paths.ensure_dirs()?;
    Config::default().save_to_path(&paths.config_file)?;

    match format {
        OutputFormat::Json => to_json(&json!({ "written": paths.config_file })),
        OutputFormat::Pretty => Ok(format!(
            "{} Wrote {}",
            "✓".green(),
            paths.config_file.display()
        )),
    }
}
