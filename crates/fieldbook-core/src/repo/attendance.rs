//! Attendance repository and the check-in/check-out protocol
//!
//! At most one record exists per (date, representative) pair; `create`
//! enforces that atomically, so the invariant holds even for callers that
//! skip `get_by_date`. Attendance is an append/update-only log; there is
//! no delete path.

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;
use tracing::warn;

use crate::models::{
    round2, Attendance, AttendanceDraft, AttendancePatch, AttendanceStatus,
};
use crate::query::{self, Filter, Page, Sort};
use crate::storage::{new_record_id, Collection, RecordStore};

/// Attendance protocol failures, with human-readable reasons
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AttendanceError {
    /// A check-in already exists for (today, representative)
    #[error("Already checked in today")]
    AlreadyCheckedIn,

    /// Check-out without a check-in record for today
    #[error("No check-in record found for today")]
    NotCheckedIn,

    /// The day's record already has a check-out
    #[error("Already checked out today")]
    AlreadyCheckedOut,

    /// A record already exists for this (date, representative) pair
    #[error("Attendance already recorded for {date}")]
    Duplicate { date: NaiveDate },
}

/// CRUD + protocol operations over the attendance collection
pub struct AttendanceLog<'a> {
    records: &'a RecordStore,
}

impl<'a> AttendanceLog<'a> {
    pub(crate) fn new(records: &'a RecordStore) -> Self {
        Self { records }
    }

    fn load(&self) -> Vec<Attendance> {
        match self.records.read_all(Collection::Attendance) {
            Ok(records) => records,
            Err(error) => {
                warn!(%error, "reading attendance failed; treating collection as empty");
                Vec::new()
            }
        }
    }

    fn persist(&self, records: &[Attendance]) {
        if let Err(error) = self.records.write_all(Collection::Attendance, records) {
            warn!(%error, "persisting attendance failed; returning in-memory result");
        }
    }

    /// All attendance records, filtered, sorted, and paginated in that order
    pub fn get_all(
        &self,
        filter: Option<&Filter>,
        sort: Option<&Sort>,
        page: Option<Page>,
    ) -> Vec<Attendance> {
        query::apply(self.load(), filter, sort, page)
    }

    pub fn get_by_id(&self, id: &str) -> Option<Attendance> {
        self.load().into_iter().find(|record| record.id == id)
    }

    /// The record for a (date, representative) pair, if any
    pub fn get_by_date(&self, date: NaiveDate, representative_id: &str) -> Option<Attendance> {
        self.load()
            .into_iter()
            .find(|record| record.date == date && record.representative_id == representative_id)
    }

    /// Create an attendance record, rejecting a duplicate
    /// (date, representative) pair atomically
    pub fn create(&self, draft: AttendanceDraft) -> Result<Attendance, AttendanceError> {
        let mut records = self.load();
        if records
            .iter()
            .any(|r| r.date == draft.date && r.representative_id == draft.representative_id)
        {
            return Err(AttendanceError::Duplicate { date: draft.date });
        }

        let record = draft.into_record(new_record_id(), Utc::now());
        records.push(record.clone());
        self.persist(&records);
        Ok(record)
    }

    /// Merge a partial update; `None` if the id is unknown
    pub fn update(&self, id: &str, patch: AttendancePatch) -> Option<Attendance> {
        let mut records = self.load();
        let record = records.iter_mut().find(|record| record.id == id)?;
        patch.apply(record);
        record.updated_at = Utc::now();
        let updated = record.clone();
        self.persist(&records);
        Some(updated)
    }

    /// Check a representative in for today
    pub fn check_in(
        &self,
        representative_id: &str,
        notes: Option<String>,
    ) -> Result<Attendance, AttendanceError> {
        self.check_in_at(Utc::now(), representative_id, notes)
    }

    /// Check-in against an explicit clock
    pub fn check_in_at(
        &self,
        now: DateTime<Utc>,
        representative_id: &str,
        notes: Option<String>,
    ) -> Result<Attendance, AttendanceError> {
        let today = now.date_naive();
        if self.get_by_date(today, representative_id).is_some() {
            return Err(AttendanceError::AlreadyCheckedIn);
        }

        let draft = AttendanceDraft {
            date: today,
            check_in: now,
            check_out: None,
            status: AttendanceStatus::Present,
            representative_id: representative_id.to_string(),
            working_hours: None,
            notes,
        };
        match self.create(draft) {
            Ok(record) => Ok(record),
            Err(AttendanceError::Duplicate { .. }) => Err(AttendanceError::AlreadyCheckedIn),
            Err(other) => Err(other),
        }
    }

    /// Check a representative out for today, computing working hours
    pub fn check_out(&self, representative_id: &str) -> Result<Attendance, AttendanceError> {
        self.check_out_at(Utc::now(), representative_id)
    }

    /// Check-out against an explicit clock
    pub fn check_out_at(
        &self,
        now: DateTime<Utc>,
        representative_id: &str,
    ) -> Result<Attendance, AttendanceError> {
        let today = now.date_naive();
        let existing = self
            .get_by_date(today, representative_id)
            .ok_or(AttendanceError::NotCheckedIn)?;

        if existing.check_out.is_some() {
            return Err(AttendanceError::AlreadyCheckedOut);
        }

        let elapsed_ms = (now - existing.check_in).num_milliseconds() as f64;
        let patch = AttendancePatch {
            check_out: Some(now),
            working_hours: Some(round2(elapsed_ms / 3_600_000.0)),
            ..Default::default()
        };
        self.update(&existing.id, patch)
            .ok_or(AttendanceError::NotCheckedIn)
    }
}
