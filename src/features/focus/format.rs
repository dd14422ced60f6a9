//! Duration parsing and formatting for focus output.

use chrono::Duration;

/// Format seconds as MM:SS (minutes may exceed 59).
#[must_use]
pub fn format_clock(seconds: u32) -> String {
    let minutes = seconds / 60;
    let seconds = seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

fn plural(n: i64, unit: &str) -> String {
    format!("{n} {unit}{}", if n == 1 { "" } else { "s" })
}

/// Format a duration as a human-readable string.
#[must_use]
pub fn format_duration(d: Duration) -> String {
    let total_minutes = d.num_minutes();

    if total_minutes < 1 {
        return plural(d.num_seconds(), "second");
    }

    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    match (hours, minutes) {
        (0, m) => plural(m, "minute"),
        (h, 0) => plural(h, "hour"),
        (h, m) => format!("{}, {}", plural(h, "hour"), plural(m, "minute")),
    }
}

/// Format a duration compactly, e.g. "25m" or "1h 30m".
#[must_use]
pub fn format_duration_short(d: Duration) -> String {
    let total_minutes = d.num_minutes();
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// Parse a duration string like "25m", "1h30m", "90s".
///
/// A bare number is read as minutes. Returns `None` for anything that is
/// not positive or does not fit in a `Duration`.
#[must_use]
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim().to_lowercase();

    if let Ok(minutes) = s.parse::<i64>() {
        if minutes <= 0 {
            return None;
        }
        return minutes.checked_mul(60).and_then(Duration::try_seconds);
    }

    let mut total_seconds: i64 = 0;
    let mut current_num = String::new();

    for c in s.chars() {
        if c.is_ascii_digit() {
            current_num.push(c);
            continue;
        }
        if current_num.is_empty() {
            return None;
        }
        let num: i64 = current_num.parse().ok()?;
        current_num.clear();

        let seconds = match c {
            'h' => num.checked_mul(3600)?,
            'm' => num.checked_mul(60)?,
            's' => num,
            _ => return None,
        };
        total_seconds = total_seconds.checked_add(seconds)?;
    }

    if !current_num.is_empty() {
        let num: i64 = current_num.parse().ok()?;
        total_seconds = total_seconds.checked_add(num.checked_mul(60)?)?;
    }

    if total_seconds > 0 {
        Duration::try_seconds(total_seconds)
    } else {
        None
    }
}

/// Parse a duration string into whole seconds for a session config.
#[must_use]
pub fn parse_duration_seconds(s: &str) -> Option<u32> {
    parse_duration(s).and_then(|d| u32::try_from(d.num_seconds()).ok())
}
