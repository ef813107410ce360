//! Data models for Fieldbook
//!
//! One module per entity: visits, orders, attendance, goals, and
//! representatives. Each entity comes in three shapes:
//!
//! - the record itself, with id and timestamps assigned by its repository;
//! - a `Draft` holding the caller-supplied fields for `create`;
//! - a `Patch` of optional fields for partial `update`, merged
//!   field-by-field. Unknown fields are rejected at the serde boundary.
//!
//! Serialized field names and enum labels match the persisted data format
//! ("Doctor Office", "Half Day", camelCase keys), so snapshots written by
//! earlier versions of the product import cleanly.

mod attendance;
mod goal;
mod order;
mod rep;
mod visit;

pub use attendance::{Attendance, AttendanceDraft, AttendancePatch, AttendanceStatus};
pub use goal::{Goal, GoalDraft, GoalPatch, GoalPeriod, GoalStatus, GoalType};
pub use order::{order_total, CustomerType, Order, OrderDraft, OrderItem, OrderPatch, OrderStatus};
pub use rep::{Representative, RepresentativeDraft, RepresentativePatch};
pub use visit::{FacilityType, Visit, VisitDraft, VisitPatch, VisitStatus};

use thiserror::Error;

/// Error returned when an enum label fails to parse
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid {what}: '{value}'")]
pub struct InvalidLabel {
    what: &'static str,
    value: String,
}

impl InvalidLabel {
    pub(crate) fn new(what: &'static str, value: &str) -> Self {
        Self {
            what,
            value: value.to_string(),
        }
    }
}

/// Round to two decimal places, half away from zero.
///
/// The rounding rule for every monetary amount, working-hours figure, and
/// percentage the store reports.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
