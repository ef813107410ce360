//! Visit repository

use chrono::Utc;
use tracing::warn;

use crate::models::{Visit, VisitDraft, VisitPatch};
use crate::query::{self, Filter, Page, Sort};
use crate::storage::{new_record_id, Collection, RecordStore};

/// CRUD + query operations over the visit collection
pub struct Visits<'a> {
    records: &'a RecordStore,
}

impl<'a> Visits<'a> {
    pub(crate) fn new(records: &'a RecordStore) -> Self {
        Self { records }
    }

    fn load(&self) -> Vec<Visit> {
        match self.records.read_all(Collection::Visits) {
            Ok(records) => records,
            Err(error) => {
                warn!(%error, "reading visits failed; treating collection as empty");
                Vec::new()
            }
        }
    }

    fn persist(&self, records: &[Visit]) {
        if let Err(error) = self.records.write_all(Collection::Visits, records) {
            warn!(%error, "persisting visits failed; returning in-memory result");
        }
    }

    /// All visits, filtered, sorted, and paginated in that order
    pub fn get_all(
        &self,
        filter: Option<&Filter>,
        sort: Option<&Sort>,
        page: Option<Page>,
    ) -> Vec<Visit> {
        query::apply(self.load(), filter, sort, page)
    }

    pub fn get_by_id(&self, id: &str) -> Option<Visit> {
        self.load().into_iter().find(|visit| visit.id == id)
    }

    /// Create a visit, assigning a fresh identifier and timestamps
    pub fn create(&self, draft: VisitDraft) -> Visit {
        let visit = draft.into_record(new_record_id(), Utc::now());
        let mut records = self.load();
        records.push(visit.clone());
        self.persist(&records);
        visit
    }

    /// Merge a partial update into a visit; `None` if the id is unknown
    pub fn update(&self, id: &str, patch: VisitPatch) -> Option<Visit> {
        let mut records = self.load();
        let visit = records.iter_mut().find(|visit| visit.id == id)?;
        patch.apply(visit);
        visit.updated_at = Utc::now();
        let updated = visit.clone();
        self.persist(&records);
        Some(updated)
    }

    /// Delete a visit by id; `false` if the id is unknown
    pub fn delete(&self, id: &str) -> bool {
        let mut records = self.load();
        let before = records.len();
        records.retain(|visit| visit.id != id);
        if records.len() == before {
            return false;
        }
        self.persist(&records);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FacilityType, VisitStatus};
    use crate::query::{SortDirection, SortField};
    use crate::storage::MemoryMedium;

    fn store() -> RecordStore {
        RecordStore::new(Box::new(MemoryMedium::new()))
    }

    fn draft(facility: &str, date: &str, status: VisitStatus, rep: &str) -> VisitDraft {
        VisitDraft {
            facility_name: facility.to_string(),
            facility_type: FacilityType::Clinic,
            date: date.parse().unwrap(),
            time: "09:00:00".parse().unwrap(),
            notes: String::new(),
            status,
            representative_id: rep.to_string(),
        }
    }

    #[test]
    fn test_create_assigns_fresh_id_and_timestamps() {
        let store = store();
        let visits = Visits::new(&store);

        let first = visits.create(draft("A", "2025-03-01", VisitStatus::Planned, "rep_001"));
        let second = visits.create(draft("B", "2025-03-02", VisitStatus::Planned, "rep_001"));

        assert!(!first.id.is_empty());
        assert_ne!(first.id, second.id);
        assert_eq!(first.created_at, first.updated_at);
    }

    #[test]
    fn test_get_all_unfiltered_returns_storage_order() {
        let store = store();
        let visits = Visits::new(&store);
        let a = visits.create(draft("A", "2025-03-02", VisitStatus::Planned, "rep_001"));
        let b = visits.create(draft("B", "2025-03-01", VisitStatus::Planned, "rep_001"));

        let all = visits.get_all(None, None, None);
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, a.id);
        assert_eq!(all[1].id, b.id);
    }

    #[test]
    fn test_get_all_filters_by_status_and_rep() {
        let store = store();
        let visits = Visits::new(&store);
        visits.create(draft("A", "2025-03-01", VisitStatus::Planned, "rep_001"));
        visits.create(draft("B", "2025-03-02", VisitStatus::Completed, "rep_001"));
        visits.create(draft("C", "2025-03-03", VisitStatus::Planned, "rep_002"));

        let filter = Filter::new()
            .status(VisitStatus::Planned)
            .representative("rep_001");
        let result = visits.get_all(Some(&filter), None, None);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].facility_name, "A");
    }

    #[test]
    fn test_get_all_sorts_by_date_descending() {
        let store = store();
        let visits = Visits::new(&store);
        visits.create(draft("old", "2025-01-05", VisitStatus::Planned, "rep_001"));
        visits.create(draft("new", "2025-03-05", VisitStatus::Planned, "rep_001"));
        visits.create(draft("mid", "2025-02-05", VisitStatus::Planned, "rep_001"));

        let sort = Sort {
            field: SortField::Date,
            direction: SortDirection::Descending,
        };
        let result = visits.get_all(None, Some(&sort), None);
        let names: Vec<_> = result.iter().map(|v| v.facility_name.as_str()).collect();
        assert_eq!(names, vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_get_by_id() {
        let store = store();
        let visits = Visits::new(&store);
        let created = visits.create(draft("A", "2025-03-01", VisitStatus::Planned, "rep_001"));

        assert_eq!(visits.get_by_id(&created.id), Some(created));
        assert!(visits.get_by_id("missing").is_none());
    }

    #[test]
    fn test_update_merges_and_bumps_updated_at() {
        let store = store();
        let visits = Visits::new(&store);
        let created = visits.create(draft("A", "2025-03-01", VisitStatus::Planned, "rep_001"));

        let updated = visits
            .update(&created.id, VisitPatch::status(VisitStatus::Completed))
            .unwrap();

        assert_eq!(updated.status, VisitStatus::Completed);
        assert_eq!(updated.facility_name, "A");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);

        // The merge is persisted
        let reread = visits.get_by_id(&created.id).unwrap();
        assert_eq!(reread.status, VisitStatus::Completed);
    }

    #[test]
    fn test_update_unknown_id_leaves_storage_untouched() {
        let store = store();
        let visits = Visits::new(&store);
        visits.create(draft("A", "2025-03-01", VisitStatus::Planned, "rep_001"));

        let before = visits.get_all(None, None, None);
        assert!(visits
            .update("missing", VisitPatch::status(VisitStatus::Cancelled))
            .is_none());
        assert_eq!(visits.get_all(None, None, None), before);
    }

    #[test]
    fn test_delete() {
        let store = store();
        let visits = Visits::new(&store);
        let created = visits.create(draft("A", "2025-03-01", VisitStatus::Planned, "rep_001"));

        assert!(!visits.delete("missing"));
        assert_eq!(visits.get_all(None, None, None).len(), 1);

        assert!(visits.delete(&created.id));
        assert!(visits.get_all(None, None, None).is_empty());
        assert!(visits.get_by_id(&created.id).is_none());
    }

    #[test]
    fn test_corrupt_collection_reads_empty() {
        let medium = MemoryMedium::new();
        use crate::storage::StorageMedium;
        medium.put(Collection::Visits.key(), "{broken").unwrap();
        let store = RecordStore::new(Box::new(medium));
        let visits = Visits::new(&store);

        assert!(visits.get_all(None, None, None).is_empty());
        // Creating over a corrupt collection starts fresh rather than failing
        let created = visits.create(draft("A", "2025-03-01", VisitStatus::Planned, "rep_001"));
        assert_eq!(visits.get_all(None, None, None), vec![created]);
    }
}
