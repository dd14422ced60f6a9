//! Focus history reports.
//!
//! Summaries are computed from completed focus records. Day boundaries are
//! taken in the caller's timezone (local time for the CLI).

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::format::format_duration;
use super::record::{count_completed_on, CompletedFocusRecord, RecordSink};
use crate::error::StudyError;

/// How far back the streak looks.
const STREAK_LOOKBACK_DAYS: i64 = 366;

/// Report time period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPeriod {
    /// Today only
    Today,
    /// Last 7 days, including today
    Week,
    /// Last 30 days, including today
    Month,
    /// All time
    AllTime,
}

impl ReportPeriod {
    /// First day covered, or `None` for all time.
    #[must_use]
    pub fn first_day(&self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::Today => Some(today),
            Self::Week => Some(today - Duration::days(6)),
            Self::Month => Some(today - Duration::days(29)),
            Self::AllTime => None,
        }
    }

    /// UTC range `[start, end)` covered by this period in `tz`.
    #[must_use]
    pub fn bounds<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> (DateTime<Utc>, DateTime<Utc>) {
        let tz = now.timezone();
        let today = now.date_naive();
        let end = start_of_day(&tz, today + Duration::days(1));
        let start = self
            .first_day(today)
            .map_or_else(epoch, |day| start_of_day(&tz, day));
        (start, end)
    }

    /// Parse period from string.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Parse` for an unknown period.
    pub fn parse(s: &str) -> Result<Self, StudyError> {
        match s.to_lowercase().as_str() {
            "today" | "t" | "d" => Ok(Self::Today),
            "week" | "w" | "7d" => Ok(Self::Week),
            "month" | "m" | "30d" => Ok(Self::Month),
            "all" | "alltime" | "all-time" => Ok(Self::AllTime),
            other => Err(StudyError::Parse(format!(
                "Unknown report period '{other}' (expected today, week, month or all)"
            ))),
        }
    }

    /// Get display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::Week => "Last 7 Days",
            Self::Month => "Last 30 Days",
            Self::AllTime => "All Time",
        }
    }
}

fn epoch() -> DateTime<Utc> {
    Utc.timestamp_opt(0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// UTC instant at which `day` starts in `tz`.
#[must_use]
pub fn start_of_day<Tz: TimeZone>(tz: &Tz, day: NaiveDate) -> DateTime<Utc> {
    let midnight = day.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&midnight)
        .earliest()
        .map_or_else(|| Utc.from_utc_datetime(&midnight), |t| t.with_timezone(&Utc))
}

/// Number of focus intervals that ended on the same calendar day as `now`.
///
/// # Errors
///
/// Returns an error if the sink cannot be read.
pub fn completed_on_day<S: RecordSink + ?Sized, Tz: TimeZone>(
    sink: &S,
    now: &DateTime<Tz>,
) -> Result<usize, StudyError> {
    let (start, end) = ReportPeriod::Today.bounds(now);
    let records = sink.records_between(start, end)?;
    Ok(count_completed_on(&records, now.date_naive(), &now.timezone()))
}

/// Focus report data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusReport {
    /// Report period name
    pub period: String,
    /// Total focus time in seconds
    pub total_seconds: i64,
    /// Number of completed focus intervals
    pub completed_intervals: usize,
    /// Average interval length in seconds
    pub avg_interval_seconds: f64,
    /// Longest interval in seconds
    pub longest_interval_seconds: i64,
    /// Focus minutes by day of week, Monday first
    pub by_day_of_week: [i64; 7],
    /// Daily breakdown, newest first
    pub daily: Vec<DailyFocusTime>,
    /// Intervals completed today
    pub today_count: usize,
    /// Consecutive days with at least one interval, ending today or yesterday
    pub streak_days: i64,
}

/// Focus time per day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyFocusTime {
    /// Date
    pub date: NaiveDate,
    /// Total focus minutes
    pub minutes: i64,
    /// Interval count
    pub intervals: usize,
}

impl FocusReport {
    /// Generate a report for the given period in local time.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink cannot be read.
    pub fn generate<S: RecordSink + ?Sized>(
        sink: &S,
        period: ReportPeriod,
    ) -> Result<Self, StudyError> {
        Self::generate_at(sink, period, &Local::now())
    }

    /// Generate a report for the given period as of `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink cannot be read.
    pub fn generate_at<S: RecordSink + ?Sized, Tz: TimeZone>(
        sink: &S,
        period: ReportPeriod,
        now: &DateTime<Tz>,
    ) -> Result<Self, StudyError> {
        let tz = now.timezone();
        let today = now.date_naive();
        let (start, end) = period.bounds(now);
        let records = sink.records_between(start, end)?;

        let total_seconds: i64 = records.iter().map(CompletedFocusRecord::duration_seconds).sum();
        let completed_intervals = records.len();

        #[allow(clippy::cast_precision_loss)]
        let avg_interval_seconds = if completed_intervals > 0 {
            total_seconds as f64 / completed_intervals as f64
        } else {
            0.0
        };

        let longest_interval_seconds = records
            .iter()
            .map(CompletedFocusRecord::duration_seconds)
            .max()
            .unwrap_or(0);

        let mut by_day_seconds = [0i64; 7];
        let mut daily_map: BTreeMap<NaiveDate, (i64, usize)> = BTreeMap::new();
        for record in &records {
            let day = record.ended_on(&tz);
            by_day_seconds[day.weekday().num_days_from_monday() as usize] +=
                record.duration_seconds();
            let entry = daily_map.entry(day).or_insert((0, 0));
            entry.0 += record.duration_seconds();
            entry.1 += 1;
        }
        let by_day_of_week = by_day_seconds.map(|s| s / 60);

        let daily = daily_map
            .into_iter()
            .rev()
            .map(|(date, (seconds, intervals))| DailyFocusTime {
                date,
                minutes: seconds / 60,
                intervals,
            })
            .collect();

        let streak_start = start_of_day(&tz, today - Duration::days(STREAK_LOOKBACK_DAYS));
        let streak_records = sink.records_between(streak_start, end)?;
        let days: HashSet<NaiveDate> = streak_records.iter().map(|r| r.ended_on(&tz)).collect();

        Ok(Self {
            period: period.display_name().to_string(),
            total_seconds,
            completed_intervals,
            avg_interval_seconds,
            longest_interval_seconds,
            by_day_of_week,
            daily,
            today_count: count_completed_on(&streak_records, today, &tz),
            streak_days: calculate_streak(&days, today),
        })
    }

    /// Get total hours.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn total_hours(&self) -> f64 {
        self.total_seconds as f64 / 3600.0
    }

    /// Format the report for display.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn format(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Focus Report: {}", self.period));
        lines.push("═".repeat(50));
        lines.push(String::new());

        lines.push("Summary".to_string());
        lines.push("─".repeat(40));
        lines.push(format!(
            "  Total focus time:     {} ({:.1}h)",
            format_duration(Duration::seconds(self.total_seconds)),
            self.total_hours()
        ));
        lines.push(format!("  Completed intervals:  {}", self.completed_intervals));
        lines.push(format!(
            "  Average interval:     {:.0} minutes",
            self.avg_interval_seconds / 60.0
        ));
        lines.push(format!(
            "  Longest interval:     {} minutes",
            self.longest_interval_seconds / 60
        ));
        lines.push(format!("  Completed today:      {}", self.today_count));
        lines.push(format!("  Current streak:       {} days", self.streak_days));
        lines.push(String::new());

        if self.total_seconds > 0 {
            lines.push("By Day of Week".to_string());
            lines.push("─".repeat(40));
            let days = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
            let max_day = self.by_day_of_week.iter().max().copied().unwrap_or(1).max(1);

            for (day, minutes) in days.iter().zip(self.by_day_of_week) {
                let bar_len = (minutes as f64 / max_day as f64 * 20.0) as usize;
                lines.push(format!("  {day} {minutes:>4}m {}", "█".repeat(bar_len)));
            }
            lines.push(String::new());
        }

        if !self.daily.is_empty() {
            lines.push("Recent Days".to_string());
            lines.push("─".repeat(40));

            for day in self.daily.iter().take(7) {
                lines.push(format!(
                    "  {} {:>4}m ({} intervals)",
                    day.date, day.minutes, day.intervals
                ));
            }
        }

        lines.join("\n")
    }
}

/// Count consecutive days with focus time, from today backwards.
///
/// A day without focus yet does not break the streak until it is over, so
/// counting starts from yesterday when today is empty.
fn calculate_streak(days: &HashSet<NaiveDate>, today: NaiveDate) -> i64 {
    let mut check_date = today;
    if !days.contains(&check_date) {
        check_date = today - Duration::days(1);
    }

    let mut streak = 0;
    while days.contains(&check_date) {
        streak += 1;
        check_date -= Duration::days(1);
    }
    streak
}
