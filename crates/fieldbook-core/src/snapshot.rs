//! Whole-store snapshots for export and import
//!
//! A snapshot is one self-describing JSON document holding the five
//! collections plus the export timestamp. Collections are optional on the
//! way in: a partial document replaces only the collections it names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Attendance, Goal, Order, Representative, Visit};
use crate::store::Crm;

/// Serialized contents of every collection plus export metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visits: Option<Vec<Visit>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orders: Option<Vec<Order>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendance: Option<Vec<Attendance>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals: Option<Vec<Goal>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub representatives: Option<Vec<Representative>>,
    pub export_date: DateTime<Utc>,
}

impl Snapshot {
    /// Capture every collection through the repositories
    pub fn capture(crm: &Crm) -> Self {
        Self {
            visits: Some(crm.visits().get_all(None, None, None)),
            orders: Some(crm.orders().get_all(None, None, None)),
            attendance: Some(crm.attendance().get_all(None, None, None)),
            goals: Some(crm.goals().get_all(None, None, None)),
            representatives: Some(crm.representatives().get_all(None, None, None)),
            export_date: Utc::now(),
        }
    }

    /// Parse a snapshot document
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Pretty-printed JSON, for human-readable exports
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_document_parses() {
        let snapshot = Snapshot::parse(
            r#"{
                "visits": [],
                "exportDate": "2025-03-10T12:00:00Z"
            }"#,
        )
        .unwrap();

        assert_eq!(snapshot.visits, Some(vec![]));
        assert!(snapshot.orders.is_none());
        assert!(snapshot.representatives.is_none());
    }

    #[test]
    fn test_garbage_fails_to_parse() {
        assert!(Snapshot::parse("not a snapshot").is_err());
        assert!(Snapshot::parse("{}").is_err()); // missing exportDate
    }

    #[test]
    fn test_export_date_round_trips() {
        let snapshot = Snapshot {
            visits: None,
            orders: None,
            attendance: None,
            goals: None,
            representatives: None,
            export_date: "2025-03-10T12:00:00Z".parse().unwrap(),
        };
        let json = snapshot.to_json().unwrap();
        assert!(json.contains("exportDate"));
        assert_eq!(Snapshot::parse(&json).unwrap(), snapshot);
    }
}
