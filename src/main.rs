use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use studybuddy::cli::args::{Cli, Commands};
use studybuddy::cli::commands;
use studybuddy::config::{Config, Paths};
use studybuddy::logging;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let paths = Paths::new()?;
    let config = Config::load_from_path(&paths.config_file)?;
    config.general.color.apply();

    let _guard = logging::init(&config.logging, &paths).context("setting up logging")?;
    tracing::debug!(root = %paths.root.display(), "starting");

    let format = cli.output.unwrap_or(config.general.default_output);

    let output = match cli.command {
        Commands::Focus(args) => commands::focus(args.command, &config, &paths, format)?,
        Commands::Config(args) => commands::config(args.command, &config, &paths, format)?,
        Commands::Completions { shell } => commands::completions(shell)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
