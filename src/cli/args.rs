use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "studybuddy")]
#[command(about = "A Pomodoro focus timer for study sessions")]
#[command(long_about = "studybuddy - A Pomodoro focus timer for study sessions

Cycles focus periods with short and long breaks, records every completed
focus interval, and reports on your study history.

QUICK START:
  studybuddy focus run             Open the focus timer
  studybuddy focus today           Intervals completed today
  studybuddy focus report week     Focus time over the last 7 days

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  studybuddy <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output (default),
    /// or 'json' for machine-readable output suitable for scripting.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Focus timer and history
    ///
    /// # Subcommands
    ///
    ///   run      Open the interactive focus timer
    ///   history  Recent completed focus intervals
    ///   today    Intervals completed today
    ///   report   Focus time summary for a period
    ///   delete   Remove one recorded interval
    ///   clear    Remove all recorded intervals
    ///
    /// # Examples
    ///
    ///   studybuddy focus run
    ///   studybuddy focus run --focus 50m --short 10m
    ///   studybuddy focus history -n 20
    ///   studybuddy focus report month
    #[command(alias = "f")]
    Focus(FocusArgs),

    /// Show or create the configuration file
    Config(ConfigArgs),

    /// Generate shell completions
    ///
    /// Example: studybuddy completions zsh > ~/.zsh/completions/_studybuddy
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for focus commands.
#[derive(Args)]
pub struct FocusArgs {
    #[command(subcommand)]
    pub command: FocusCommands,
}

/// Focus subcommands.
#[derive(Subcommand)]
pub enum FocusCommands {
    /// Open the interactive focus timer
    ///
    /// Durations default to the values in config.yaml.
    /// A bare number is read as minutes (e.g. 25, 25m, 1h30m, 90s).
    ///
    /// Keys: space start/pause, s skip, r reset, ? help, q quit
    Run {
        /// Focus phase length
        #[arg(long, short = 'f')]
        focus: Option<String>,

        /// Short break length
        #[arg(long, short = 's')]
        short: Option<String>,

        /// Long break length
        #[arg(long, short = 'l')]
        long: Option<String>,

        /// Focus intervals before a long break
        #[arg(long, short = 'i')]
        intervals: Option<u32>,
    },

    /// View recent focus intervals
    History {
        /// Number of intervals to show
        #[arg(long, short = 'n', default_value = "10")]
        limit: usize,
    },

    /// Show intervals completed today
    Today,

    /// Generate a focus report
    ///
    /// Summary of focus time, streak and daily breakdown.
    Report {
        /// Time period (today, week, month, all)
        #[arg(default_value = "week")]
        period: String,
    },

    /// Delete one recorded interval
    Delete {
        /// Interval ID (see 'focus history')
        id: i64,
    },

    /// Delete all recorded intervals
    Clear {
        /// Skip confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },
}

/// Arguments for config commands.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Write a default config.yaml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the configuration file path
    Path,
}
