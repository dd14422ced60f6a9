use colored::Colorize;

use crate::features::focus::format::format_duration_short;
use crate::features::focus::{format_duration, CompletedFocusRecord};

/// Format a list of focus records as a pretty table
pub fn format_records_pretty(records: &[CompletedFocusRecord], title: &str) -> String {
    if records.is_empty() {
        return format!("{title} (0 intervals)\n  No focus intervals recorded");
    }

    let mut output = format!("{} ({} intervals)\n", title.bold(), records.len());
    output.push_str(&"─".repeat(50));
    output.push('\n');
    output.push_str(&format!(
        "{:<6} {:<12} {:<13} {}\n",
        "ID", "Date", "Time", "Length"
    ));

    for record in records {
        let id = record.id.map_or_else(|| "-".to_string(), |id| id.to_string());
        let start = record.started_at_local();
        let end = record.ended_at_local();

        output.push_str(&format!(
            "{:<6} {:<12} {:<13} {}\n",
            id.dimmed(),
            end.format("%Y-%m-%d"),
            format!("{}-{}", start.format("%H:%M"), end.format("%H:%M")),
            format_duration_short(record.duration()).green()
        ));
    }

    let total = records
        .iter()
        .fold(chrono::Duration::zero(), |acc, r| acc + r.duration());
    output.push_str(&"─".repeat(50));
    output.push('\n');
    output.push_str(&format!("{} {}", "Total:".dimmed(), format_duration_short(total)));

    output
}

/// Format a single focus record as pretty output
pub fn format_record_pretty(record: &CompletedFocusRecord) -> String {
    let mut output = format!("{} {}\n", "●".green(), "Focus interval".bold());

    if let Some(id) = record.id {
        output.push_str(&format!("  {}: {}\n", "ID".dimmed(), id));
    }
    output.push_str(&format!(
        "  {}: {}\n",
        "Started".dimmed(),
        record.started_at_local().format("%Y-%m-%d %H:%M:%S")
    ));
    output.push_str(&format!(
        "  {}: {}\n",
        "Ended".dimmed(),
        record.ended_at_local().format("%Y-%m-%d %H:%M:%S")
    ));
    output.push_str(&format!(
        "  {}: {}\n",
        "Length".dimmed(),
        format_duration(record.duration())
    ));

    output
}
