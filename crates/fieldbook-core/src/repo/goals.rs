//! Goal repository
//!
//! Goals are an append/update-only log; there is no delete path.

use chrono::Utc;
use tracing::warn;

use crate::models::{Goal, GoalDraft, GoalPatch};
use crate::query::{self, Filter, Page, Sort};
use crate::storage::{new_record_id, Collection, RecordStore};

/// CRUD + query operations over the goal collection
pub struct Goals<'a> {
    records: &'a RecordStore,
}

impl<'a> Goals<'a> {
    pub(crate) fn new(records: &'a RecordStore) -> Self {
        Self { records }
    }

    fn load(&self) -> Vec<Goal> {
        match self.records.read_all(Collection::Goals) {
            Ok(records) => records,
            Err(error) => {
                warn!(%error, "reading goals failed; treating collection as empty");
                Vec::new()
            }
        }
    }

    fn persist(&self, records: &[Goal]) {
        if let Err(error) = self.records.write_all(Collection::Goals, records) {
            warn!(%error, "persisting goals failed; returning in-memory result");
        }
    }

    /// All goals, filtered, sorted, and paginated in that order
    pub fn get_all(
        &self,
        filter: Option<&Filter>,
        sort: Option<&Sort>,
        page: Option<Page>,
    ) -> Vec<Goal> {
        query::apply(self.load(), filter, sort, page)
    }

    pub fn get_by_id(&self, id: &str) -> Option<Goal> {
        self.load().into_iter().find(|goal| goal.id == id)
    }

    /// Create a goal, assigning a fresh identifier and timestamps
    pub fn create(&self, draft: GoalDraft) -> Goal {
        let goal = draft.into_record(new_record_id(), Utc::now());
        let mut records = self.load();
        records.push(goal.clone());
        self.persist(&records);
        goal
    }

    /// Merge a partial update into a goal; `None` if the id is unknown
    pub fn update(&self, id: &str, patch: GoalPatch) -> Option<Goal> {
        let mut records = self.load();
        let goal = records.iter_mut().find(|goal| goal.id == id)?;
        patch.apply(goal);
        goal.updated_at = Utc::now();
        let updated = goal.clone();
        self.persist(&records);
        Some(updated)
    }
}
