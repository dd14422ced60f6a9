//! Output formatting for studybuddy.
//!
//! This module provides formatters for displaying focus history in various formats.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::error::StudyError;
use crate::features::focus::CompletedFocusRecord;

pub use json::*;
pub use pretty::*;

/// Format focus records based on output format
///
/// # Errors
///
/// Returns `StudyError::Parse` if JSON serialization fails.
pub fn format_records(
    records: &[CompletedFocusRecord],
    title: &str,
    format: OutputFormat,
) -> Result<String, StudyError> {
    match format {
        OutputFormat::Pretty => Ok(format_records_pretty(records, title)),
        OutputFormat::Json => format_records_json(records, title),
    }
}

/// Format a single focus record based on output format
///
/// # Errors
///
/// Returns `StudyError::Parse` if JSON serialization fails.
pub fn format_record(
    record: &CompletedFocusRecord,
    format: OutputFormat,
) -> Result<String, StudyError> {
    match format {
        OutputFormat::Pretty => Ok(format_record_pretty(record)),
        OutputFormat::Json => to_json(record),
    }
}
