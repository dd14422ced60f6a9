//! Completed focus intervals and where they go.

use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StudyError;

/// One finished or skipped focus interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedFocusRecord {
    /// Database ID (None until persisted)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// When the focus phase began
    pub started_at: DateTime<Utc>,
    /// When the focus phase ended
    pub ended_at: DateTime<Utc>,
}

impl CompletedFocusRecord {
    /// Build a record, or `None` if `ended_at` is not after `started_at`.
    #[must_use]
    pub fn new(started_at: DateTime<Utc>, ended_at: DateTime<Utc>) -> Option<Self> {
        (ended_at > started_at).then_some(Self {
            id: None,
            started_at,
            ended_at,
        })
    }

    /// Length of the interval.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.ended_at.signed_duration_since(self.started_at)
    }

    /// Length of the interval in whole seconds.
    #[must_use]
    pub fn duration_seconds(&self) -> i64 {
        self.duration().num_seconds()
    }

    /// Calendar day the interval ended on, in `tz`.
    #[must_use]
    pub fn ended_on<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDate {
        self.ended_at.with_timezone(tz).date_naive()
    }

    /// End time in the local timezone.
    #[must_use]
    pub fn ended_at_local(&self) -> DateTime<Local> {
        self.ended_at.with_timezone(&Local)
    }

    /// Start time in the local timezone.
    #[must_use]
    pub fn started_at_local(&self) -> DateTime<Local> {
        self.started_at.with_timezone(&Local)
    }
}

/// Persistence collaborator for completed focus intervals.
#[cfg_attr(test, mockall::automock)]
pub trait RecordSink {
    /// Persist one record, assigning its ID on success.
    ///
    /// # Errors
    ///
    /// Returns an error if the record could not be stored.
    fn save(&mut self, record: &mut CompletedFocusRecord) -> Result<(), StudyError>;

    /// Records whose `ended_at` lies in `[start, end)`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the records could not be read.
    fn records_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CompletedFocusRecord>, StudyError>;
}

impl<S: RecordSink + ?Sized> RecordSink for Box<S> {
    fn save(&mut self, record: &mut CompletedFocusRecord) -> Result<(), StudyError> {
        (**self).save(record)
    }

    fn records_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CompletedFocusRecord>, StudyError> {
        (**self).records_between(start, end)
    }
}

/// Count records that ended on `day` in `tz`.
#[must_use]
pub fn count_completed_on<Tz: TimeZone>(
    records: &[CompletedFocusRecord],
    day: NaiveDate,
    tz: &Tz,
) -> usize {
    records.iter().filter(|r| r.ended_on(tz) == day).count()
}

/// In-memory record sink.
#[derive(Debug, Default, Clone)]
pub struct MemoryRecords {
    records: Vec<CompletedFocusRecord>,
    next_id: i64,
}

impl MemoryRecords {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All stored records, oldest first.
    #[must_use]
    pub fn records(&self) -> &[CompletedFocusRecord] {
        &self.records
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordSink for MemoryRecords {
    fn save(&mut self, record: &mut CompletedFocusRecord) -> Result<(), StudyError> {
        self.next_id += 1;
        record.id = Some(self.next_id);
        self.records.push(record.clone());
        Ok(())
    }

    fn records_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CompletedFocusRecord>, StudyError> {
        let mut found: Vec<_> = self
            .records
            .iter()
            .filter(|r| r.ended_at >= start && r.ended_at < end)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.ended_at.cmp(&a.ended_at));
        Ok(found)
    }
}
