//! Entity repositories
//!
//! Typed CRUD + query operations over one collection each. Repositories
//! borrow the [`RecordStore`](crate::storage::RecordStore) they are
//! given; there is no global store instance.
//!
//! Storage-layer failures never escape a repository: each operation
//! catches the typed error, logs it, and returns a safe default (empty
//! collection, absent record, `false`). A create or update still returns
//! its in-memory result when persistence fails, so callers must not
//! treat a returned record as proof of durability.

mod attendance;
mod goals;
mod orders;
mod reps;
mod visits;

pub use attendance::{AttendanceError, AttendanceLog};
pub use goals::Goals;
pub use orders::Orders;
pub use reps::Representatives;
pub use visits::Visits;
