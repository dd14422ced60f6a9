//! JSON output formatting.

use serde::Serialize;
use serde_json::json;

use crate::error::StudyError;
use crate::features::focus::CompletedFocusRecord;

/// Format focus records as JSON
///
/// # Errors
///
/// Returns `StudyError::Parse` if JSON serialization fails.
pub fn format_records_json(
    records: &[CompletedFocusRecord],
    list_name: &str,
) -> Result<String, StudyError> {
    let total_seconds: i64 = records.iter().map(CompletedFocusRecord::duration_seconds).sum();
    let output = json!({
        "list": list_name,
        "count": records.len(),
        "total_seconds": total_seconds,
        "items": records
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `StudyError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, StudyError> {
    Ok(serde_json::to_string_pretty(value)?)
}
