//! Focus command implementation.
//!
//! Runs the interactive timer and manages the recorded focus history.

use chrono::Local;
use colored::Colorize;
use serde_json::json;
use tracing::warn;

use crate::cli::args::{FocusCommands, OutputFormat};
use crate::config::{Config, FocusConfig, Paths};
use crate::error::StudyError;
use crate::features::focus::format::parse_duration_seconds;
use crate::features::focus::{
    FocusMachine, FocusReport, FocusService, FocusStorage, MemoryRecords, RecordSink,
    ReportPeriod, SessionConfig, SystemClock, TerminalBell,
};
use crate::features::notify::{Notifier, Toast, ToastQueue};
use crate::output::{format_record, format_records, to_json};
use crate::storage::Database;
use crate::tui;

/// Command-line overrides for `focus run`.
#[derive(Debug, Default, Clone)]
pub struct TimerOverrides {
    pub focus: Option<String>,
    pub short: Option<String>,
    pub long: Option<String>,
    pub intervals: Option<u32>,
}

/// Execute focus subcommands.
///
/// # Errors
///
/// Returns an error if the history cannot be read or written, an argument is
/// invalid, or the terminal cannot be driven.
pub fn focus(
    cmd: FocusCommands,
    config: &Config,
    paths: &Paths,
    format: OutputFormat,
) -> Result<String, StudyError> {
    match cmd {
        FocusCommands::Run {
            focus,
            short,
            long,
            intervals,
        } => {
            let overrides = TimerOverrides {
                focus,
                short,
                long,
                intervals,
            };
            run_timer(config, paths, &overrides, format)
        }
        FocusCommands::History { limit } => show_history(&open_storage(paths)?, limit, format),
        FocusCommands::Today => show_today(&open_storage(paths)?, format),
        FocusCommands::Report { period } => {
            generate_report(&open_storage(paths)?, &period, format)
        }
        FocusCommands::Delete { id } => delete_record(&open_storage(paths)?, id, format),
        FocusCommands::Clear { force } => clear_records(&open_storage(paths)?, force, format),
    }
}

fn open_storage(paths: &Paths) -> Result<FocusStorage, StudyError> {
    Ok(FocusStorage::with_database(Database::open_with(paths)?))
}

/// Resolve the timer configuration from the config file plus overrides.
///
/// # Errors
///
/// Returns `StudyError::Parse` for an unreadable duration and
/// `StudyError::InvalidConfig` for a zero value.
pub fn session_config(
    focus: &FocusConfig,
    overrides: &TimerOverrides,
) -> Result<SessionConfig, StudyError> {
    let base = focus.session_config()?;

    SessionConfig::new(
        override_seconds("focus", overrides.focus.as_deref(), base.focus_duration_seconds())?,
        override_seconds(
            "short break",
            overrides.short.as_deref(),
            base.short_break_duration_seconds(),
        )?,
        override_seconds(
            "long break",
            overrides.long.as_deref(),
            base.long_break_duration_seconds(),
        )?,
        overrides
            .intervals
            .unwrap_or_else(|| base.intervals_before_long_break()),
    )
}

fn override_seconds(label: &str, value: Option<&str>, default: u32) -> Result<u32, StudyError> {
    value.map_or(Ok(default), |s| {
        parse_duration_seconds(s)
            .ok_or_else(|| StudyError::Parse(format!("Invalid {label} duration: {s}")))
    })
}

/// Open the interactive timer.
fn run_timer(
    config: &Config,
    paths: &Paths,
    overrides: &TimerOverrides,
    format: OutputFormat,
) -> Result<String, StudyError> {
    let session = session_config(&config.focus, overrides)?;
    let toasts = ToastQueue::new();
    let mut notifier = toasts.clone();

    let sink: Box<dyn RecordSink> = match Database::open_with(paths) {
        Ok(db) => Box::new(FocusStorage::with_database(db)),
        Err(e) => {
            warn!(error = %e, "focus history unavailable, keeping records in memory");
            notifier.notify(Toast::warning(format!(
                "History unavailable, intervals will not be kept: {e}"
            )));
            Box::new(MemoryRecords::new())
        }
    };

    let machine = FocusMachine::new(session, SystemClock)
        .with_auto_resume_delay(config.focus.auto_resume_delay());
    let service = FocusService::new(
        machine,
        sink,
        Box::new(TerminalBell::new(config.focus.bell)),
        Box::new(notifier),
    );

    let summary = tui::run(service, toasts)?;

    match format {
        OutputFormat::Json => to_json(&summary),
        OutputFormat::Pretty => Ok(format!(
            "{} {} focus interval{} recorded this session",
            "✓".green(),
            summary.recorded_intervals,
            if summary.recorded_intervals == 1 { "" } else { "s" }
        )),
    }
}

/// Show the most recent focus intervals.
fn show_history(
    storage: &FocusStorage,
    limit: usize,
    format: OutputFormat,
) -> Result<String, StudyError> {
    let records = storage.get_recent(limit)?;
    format_records(&records, "Focus History", format)
}

/// Show the focus intervals that ended today.
fn show_today(storage: &FocusStorage, format: OutputFormat) -> Result<String, StudyError> {
    let (start, end) = ReportPeriod::Today.bounds(&Local::now());
    let records = storage.records_between(start, end)?;
    format_records(&records, "Today", format)
}

/// Generate a focus report.
fn generate_report(
    storage: &FocusStorage,
    period: &str,
    format: OutputFormat,
) -> Result<String, StudyError> {
    let report = FocusReport::generate(storage, ReportPeriod::parse(period)?)?;

    match format {
        OutputFormat::Json => to_json(&report),
        OutputFormat::Pretty => Ok(report.format()),
    }
}

/// Delete one recorded interval.
fn delete_record(
    storage: &FocusStorage,
    id: i64,
    format: OutputFormat,
) -> Result<String, StudyError> {
    let record = storage
        .get(id)?
        .ok_or_else(|| StudyError::NotFound(format!("Focus interval {id} not found")))?;
    storage.delete(id)?;

    match format {
        OutputFormat::Json => to_json(&json!({ "deleted": record })),
        OutputFormat::Pretty => Ok(format!(
            "{} Deleted focus interval {id}\n{}",
            "✓".green(),
            format_record(&record, format)?
        )),
    }
}

/// Delete every recorded interval.
fn clear_records(
    storage: &FocusStorage,
    force: bool,
    format: OutputFormat,
) -> Result<String, StudyError> {
    if !force {
        return Err(StudyError::Config(
            "This will delete all focus history.\nUse --force to confirm.".to_string(),
        ));
    }

    let removed = storage.clear()?;

    match format {
        OutputFormat::Json => to_json(&json!({ "cleared": removed })),
        OutputFormat::Pretty => Ok(format!("Focus history cleared ({removed} intervals).")),
    }
}
