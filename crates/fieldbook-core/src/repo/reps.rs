//! Representative repository

use chrono::Utc;
use tracing::warn;

use crate::models::{Representative, RepresentativeDraft, RepresentativePatch};
use crate::query::{self, Filter, Page, Sort};
use crate::storage::{new_record_id, Collection, RecordStore};

/// CRUD + query operations over the representative collection
pub struct Representatives<'a> {
    records: &'a RecordStore,
}

impl<'a> Representatives<'a> {
    pub(crate) fn new(records: &'a RecordStore) -> Self {
        Self { records }
    }

    fn load(&self) -> Vec<Representative> {
        match self.records.read_all(Collection::Representatives) {
            Ok(records) => records,
            Err(error) => {
                warn!(%error, "reading representatives failed; treating collection as empty");
                Vec::new()
            }
        }
    }

    fn persist(&self, records: &[Representative]) {
        if let Err(error) = self.records.write_all(Collection::Representatives, records) {
            warn!(%error, "persisting representatives failed; returning in-memory result");
        }
    }

    /// All representatives, filtered, sorted, and paginated in that order
    pub fn get_all(
        &self,
        filter: Option<&Filter>,
        sort: Option<&Sort>,
        page: Option<Page>,
    ) -> Vec<Representative> {
        query::apply(self.load(), filter, sort, page)
    }

    pub fn get_by_id(&self, id: &str) -> Option<Representative> {
        self.load().into_iter().find(|rep| rep.id == id)
    }

    /// Create a representative, assigning a fresh identifier and timestamps
    pub fn create(&self, draft: RepresentativeDraft) -> Representative {
        let rep = draft.into_record(new_record_id(), Utc::now());
        let mut records = self.load();
        records.push(rep.clone());
        self.persist(&records);
        rep
    }

    /// Merge a partial update; `None` if the id is unknown
    pub fn update(&self, id: &str, patch: RepresentativePatch) -> Option<Representative> {
        let mut records = self.load();
        let rep = records.iter_mut().find(|rep| rep.id == id)?;
        patch.apply(rep);
        rep.updated_at = Utc::now();
        let updated = rep.clone();
        self.persist(&records);
        Some(updated)
    }
}
