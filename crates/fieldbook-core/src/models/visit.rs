//! Visit records
//!
//! A visit is a planned or completed call on a medical facility, owned by
//! one representative.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::InvalidLabel;
use crate::query::{Queryable, SortField, SortValue};

/// Kind of facility a visit targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FacilityType {
    Hospital,
    Clinic,
    Pharmacy,
    #[serde(rename = "Doctor Office")]
    DoctorOffice,
}

impl FacilityType {
    /// Label used in the persisted format and in filters
    pub fn label(self) -> &'static str {
        match self {
            Self::Hospital => "Hospital",
            Self::Clinic => "Clinic",
            Self::Pharmacy => "Pharmacy",
            Self::DoctorOffice => "Doctor Office",
        }
    }
}

impl fmt::Display for FacilityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FacilityType {
    type Err = InvalidLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Hospital" => Ok(Self::Hospital),
            "Clinic" => Ok(Self::Clinic),
            "Pharmacy" => Ok(Self::Pharmacy),
            "Doctor Office" => Ok(Self::DoctorOffice),
            _ => Err(InvalidLabel::new("facility type", s)),
        }
    }
}

/// Visit lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisitStatus {
    Planned,
    Completed,
    Cancelled,
}

impl VisitStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Planned => "Planned",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for VisitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for VisitStatus {
    type Err = InvalidLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Planned" => Ok(Self::Planned),
            "Completed" => Ok(Self::Completed),
            "Cancelled" => Ok(Self::Cancelled),
            _ => Err(InvalidLabel::new("visit status", s)),
        }
    }
}

/// A planned or completed facility visit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    /// Unique identifier, assigned at creation and immutable
    pub id: String,
    pub facility_name: String,
    pub facility_type: FacilityType,
    /// Scheduled calendar date
    pub date: NaiveDate,
    /// Scheduled time of day
    pub time: NaiveTime,
    pub notes: String,
    pub status: VisitStatus,
    /// Owning representative (weak reference, never validated)
    pub representative_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied fields for creating a visit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct VisitDraft {
    pub facility_name: String,
    pub facility_type: FacilityType,
    pub date: NaiveDate,
    pub time: NaiveTime,
    #[serde(default)]
    pub notes: String,
    pub status: VisitStatus,
    pub representative_id: String,
}

impl VisitDraft {
    pub(crate) fn into_record(self, id: String, now: DateTime<Utc>) -> Visit {
        Visit {
            id,
            facility_name: self.facility_name,
            facility_type: self.facility_type,
            date: self.date,
            time: self.time,
            notes: self.notes,
            status: self.status,
            representative_id: self.representative_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update for a visit; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct VisitPatch {
    pub facility_name: Option<String>,
    pub facility_type: Option<FacilityType>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub notes: Option<String>,
    pub status: Option<VisitStatus>,
    pub representative_id: Option<String>,
}

impl VisitPatch {
    pub fn status(status: VisitStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub(crate) fn apply(self, visit: &mut Visit) {
        if let Some(facility_name) = self.facility_name {
            visit.facility_name = facility_name;
        }
        if let Some(facility_type) = self.facility_type {
            visit.facility_type = facility_type;
        }
        if let Some(date) = self.date {
            visit.date = date;
        }
        if let Some(time) = self.time {
            visit.time = time;
        }
        if let Some(notes) = self.notes {
            visit.notes = notes;
        }
        if let Some(status) = self.status {
            visit.status = status;
        }
        if let Some(representative_id) = self.representative_id {
            visit.representative_id = representative_id;
        }
    }
}

impl Queryable for Visit {
    fn record_date(&self) -> Option<NaiveDate> {
        Some(self.date)
    }

    fn status_label(&self) -> Option<&str> {
        Some(self.status.label())
    }

    fn facility_type_label(&self) -> Option<&str> {
        Some(self.facility_type.label())
    }

    fn representative_id(&self) -> Option<&str> {
        Some(&self.representative_id)
    }

    fn sort_value(&self, field: SortField) -> Option<SortValue> {
        match field {
            SortField::Date => Some(SortValue::Date(self.date)),
            SortField::Name => Some(SortValue::Text(self.facility_name.clone())),
            SortField::Status => Some(SortValue::Text(self.status.label().to_string())),
            SortField::CreatedAt => Some(SortValue::Instant(self.created_at)),
            SortField::UpdatedAt => Some(SortValue::Instant(self.updated_at)),
            SortField::TotalAmount | SortField::Target => None,
        }
    }
}
