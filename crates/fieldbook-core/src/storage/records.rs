//! Keyed record persistence
//!
//! [`RecordStore`] reads and writes whole collections as JSON documents
//! against a [`StorageMedium`], plus single-value access for the
//! current-user pointer. A missing key reads as an empty collection;
//! everything else surfaces as a typed [`StorageError`] for the calling
//! repository to convert.

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use super::error::{StorageError, StorageResult};
use super::medium::StorageMedium;

/// Named record collections persisted by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Visits,
    Orders,
    Attendance,
    Goals,
    Representatives,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Visits,
        Collection::Orders,
        Collection::Attendance,
        Collection::Goals,
        Collection::Representatives,
    ];

    /// Storage key for the collection (the original product's key set)
    pub fn key(self) -> &'static str {
        match self {
            Self::Visits => "crm_visits",
            Self::Orders => "crm_orders",
            Self::Attendance => "crm_attendance",
            Self::Goals => "crm_goals",
            Self::Representatives => "crm_representatives",
        }
    }
}

/// Storage key for the current-user pointer, independent of the collections
pub const CURRENT_USER_KEY: &str = "crm_current_user";

/// Whole-collection persistence over a storage medium
pub struct RecordStore {
    medium: Box<dyn StorageMedium>,
}

impl RecordStore {
    pub fn new(medium: Box<dyn StorageMedium>) -> Self {
        Self { medium }
    }

    /// Read every record in a collection; a missing key is an empty
    /// collection, a corrupt payload is an error for the caller to handle
    pub fn read_all<T: DeserializeOwned>(&self, collection: Collection) -> StorageResult<Vec<T>> {
        match self.medium.get(collection.key())? {
            Some(raw) => serde_json::from_str(&raw).map_err(|source| StorageError::Corrupt {
                key: collection.key().to_string(),
                source,
            }),
            None => Ok(Vec::new()),
        }
    }

    /// Replace a collection wholesale
    pub fn write_all<T: Serialize>(
        &self,
        collection: Collection,
        records: &[T],
    ) -> StorageResult<()> {
        let raw = serde_json::to_string(records).map_err(|source| StorageError::Serialize {
            key: collection.key().to_string(),
            source,
        })?;
        self.medium.put(collection.key(), &raw)
    }

    /// Read a single value stored under its own key
    pub fn read_value<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Option<T>> {
        match self.medium.get(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|source| StorageError::Corrupt {
                    key: key.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    /// Store a single value under its own key
    pub fn write_value<T: Serialize>(&self, key: &str, value: &T) -> StorageResult<()> {
        let raw = serde_json::to_string(value).map_err(|source| StorageError::Serialize {
            key: key.to_string(),
            source,
        })?;
        self.medium.put(key, &raw)
    }

    /// Remove a key entirely
    pub fn remove_key(&self, key: &str) -> StorageResult<()> {
        self.medium.remove(key)
    }
}

/// Generate a record identifier.
///
/// Base-36 of the current Unix-epoch milliseconds concatenated with a
/// random suffix: unique enough for a single-device, single-process
/// setting, not cryptographic and not safe for distributed allocation.
pub fn new_record_id() -> String {
    let millis = Utc::now().timestamp_millis().max(0) as u64;
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}{}", to_base36(millis), &suffix[..10])
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    out.iter().map(|&b| b as char).collect()
}
