//! Fieldbook Core Library
//!
//! This crate provides the data-access layer for Fieldbook, a local-first
//! CRM for field sales representatives. Visits, orders, attendance, goals,
//! and representative records persist in a single synchronous key-value
//! medium; typed repositories expose filter/sort/paginate queries over
//! them, and a metrics engine derives dashboard and performance summaries.
//!
//! # Architecture
//!
//! - **Storage medium**: one JSON document per collection, file-backed or
//!   in-memory. Storage never throws past a repository: failures are
//!   logged and converted to safe defaults.
//! - **Repositories**: typed CRUD + query over each collection, injected
//!   with the record store (no global state).
//! - **Metrics**: composed entirely from repository queries.
//!
//! # Quick Start
//!
//! ```text
//! let crm = Crm::open()?;
//!
//! // Record a visit
//! let visit = crm.visits().create(draft);
//!
//! // Query planned visits
//! let filter = Filter::new().status(VisitStatus::Planned);
//! let planned = crm.visits().get_all(Some(&filter), None, None);
//!
//! // Dashboard for the active representative
//! let user = crm.current_user();
//! let metrics = crm.metrics().dashboard(user.as_ref().map(|u| u.id.as_str()));
//! ```
//!
//! # Modules
//!
//! - `store`: unified store facade (main entry point)
//! - `models`: record, draft, and patch types per entity
//! - `repo`: per-entity repositories
//! - `query`: the filter/sort/paginate engine
//! - `metrics`: dashboard and performance summaries
//! - `snapshot`: whole-store export/import
//! - `storage`: key-value medium and keyed record persistence
//! - `dates`: calendar arithmetic for metric windows
//! - `config`: application configuration

pub mod config;
pub mod dates;
pub mod metrics;
pub mod models;
pub mod query;
pub mod repo;
pub mod snapshot;
pub mod storage;
pub mod store;

pub use config::Config;
pub use metrics::{DashboardMetrics, Metrics, PerformanceMetrics};
pub use models::{
    Attendance, AttendanceDraft, AttendancePatch, AttendanceStatus, CustomerType, FacilityType,
    Goal, GoalDraft, GoalPatch, GoalPeriod, GoalStatus, GoalType, InvalidLabel, Order, OrderDraft,
    OrderItem, OrderPatch, OrderStatus, Representative, RepresentativeDraft, RepresentativePatch,
    Visit, VisitDraft, VisitPatch, VisitStatus,
};
pub use query::{Filter, Page, Queryable, Sort, SortDirection, SortField};
pub use repo::{AttendanceError, AttendanceLog, Goals, Orders, Representatives, Visits};
pub use snapshot::Snapshot;
pub use storage::{
    Collection, FileMedium, MemoryMedium, RecordStore, StorageError, StorageMedium,
};
pub use store::{Crm, StoreCounts};
