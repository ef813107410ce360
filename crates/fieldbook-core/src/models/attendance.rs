//! Attendance records
//!
//! One record per representative per calendar date, enforced by the
//! attendance repository at create time. Working hours appear only once a
//! check-out has been recorded.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::InvalidLabel;
use crate::query::{Queryable, SortField, SortValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Present,
    Absent,
    #[serde(rename = "Half Day")]
    HalfDay,
}

impl AttendanceStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Present => "Present",
            Self::Absent => "Absent",
            Self::HalfDay => "Half Day",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AttendanceStatus {
    type Err = InvalidLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Present" => Ok(Self::Present),
            "Absent" => Ok(Self::Absent),
            "Half Day" => Ok(Self::HalfDay),
            _ => Err(InvalidLabel::new("attendance status", s)),
        }
    }
}

/// One representative-day of attendance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    pub id: String,
    pub date: NaiveDate,
    pub check_in: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_out: Option<DateTime<Utc>>,
    pub status: AttendanceStatus,
    pub representative_id: String,
    /// Check-out minus check-in, in hours rounded to 2 decimals; present
    /// only once check-out is set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied fields for creating an attendance record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AttendanceDraft {
    pub date: NaiveDate,
    pub check_in: DateTime<Utc>,
    #[serde(default)]
    pub check_out: Option<DateTime<Utc>>,
    pub status: AttendanceStatus,
    pub representative_id: String,
    #[serde(default)]
    pub working_hours: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl AttendanceDraft {
    pub(crate) fn into_record(self, id: String, now: DateTime<Utc>) -> Attendance {
        Attendance {
            id,
            date: self.date,
            check_in: self.check_in,
            check_out: self.check_out,
            status: self.status,
            representative_id: self.representative_id,
            working_hours: self.working_hours,
            notes: self.notes,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update for an attendance record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct AttendancePatch {
    pub date: Option<NaiveDate>,
    pub check_in: Option<DateTime<Utc>>,
    pub check_out: Option<DateTime<Utc>>,
    pub status: Option<AttendanceStatus>,
    pub representative_id: Option<String>,
    pub working_hours: Option<f64>,
    pub notes: Option<String>,
}

impl AttendancePatch {
    pub(crate) fn apply(self, record: &mut Attendance) {
        if let Some(date) = self.date {
            record.date = date;
        }
        if let Some(check_in) = self.check_in {
            record.check_in = check_in;
        }
        if let Some(check_out) = self.check_out {
            record.check_out = Some(check_out);
        }
        if let Some(status) = self.status {
            record.status = status;
        }
        if let Some(representative_id) = self.representative_id {
            record.representative_id = representative_id;
        }
        if let Some(working_hours) = self.working_hours {
            record.working_hours = Some(working_hours);
        }
        if let Some(notes) = self.notes {
            record.notes = Some(notes);
        }
    }
}

impl Queryable for Attendance {
    fn record_date(&self) -> Option<NaiveDate> {
        Some(self.date)
    }

    fn status_label(&self) -> Option<&str> {
        Some(self.status.label())
    }

    fn representative_id(&self) -> Option<&str> {
        Some(&self.representative_id)
    }

    fn sort_value(&self, field: SortField) -> Option<SortValue> {
        match field {
            SortField::Date => Some(SortValue::Date(self.date)),
            SortField::Status => Some(SortValue::Text(self.status.label().to_string())),
            SortField::CreatedAt => Some(SortValue::Instant(self.created_at)),
            SortField::UpdatedAt => Some(SortValue::Instant(self.updated_at)),
            SortField::Name | SortField::TotalAmount | SortField::Target => None,
        }
    }
}
