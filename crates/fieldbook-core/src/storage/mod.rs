//! Storage layer
//!
//! A single synchronous key-value medium holds one JSON document per
//! collection. [`RecordStore`] layers typed whole-collection reads and
//! writes on top; repositories decide what to do with failures.

pub mod error;
pub mod medium;
pub mod records;

pub use error::{StorageError, StorageResult};
pub use medium::{FileMedium, MemoryMedium, StorageMedium};
pub use records::{new_record_id, Collection, RecordStore, CURRENT_USER_KEY};
