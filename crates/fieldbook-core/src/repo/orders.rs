//! Order repository

use chrono::Utc;
use tracing::warn;

use crate::models::{Order, OrderDraft, OrderPatch};
use crate::query::{self, Filter, Page, Sort};
use crate::storage::{new_record_id, Collection, RecordStore};

/// CRUD + query operations over the order collection
pub struct Orders<'a> {
    records: &'a RecordStore,
}

impl<'a> Orders<'a> {
    pub(crate) fn new(records: &'a RecordStore) -> Self {
        Self { records }
    }

    fn load(&self) -> Vec<Order> {
        match self.records.read_all(Collection::Orders) {
            Ok(records) => records,
            Err(error) => {
                warn!(%error, "reading orders failed; treating collection as empty");
                Vec::new()
            }
        }
    }

    fn persist(&self, records: &[Order]) {
        if let Err(error) = self.records.write_all(Collection::Orders, records) {
            warn!(%error, "persisting orders failed; returning in-memory result");
        }
    }

    /// All orders, filtered, sorted, and paginated in that order
    pub fn get_all(
        &self,
        filter: Option<&Filter>,
        sort: Option<&Sort>,
        page: Option<Page>,
    ) -> Vec<Order> {
        query::apply(self.load(), filter, sort, page)
    }

    pub fn get_by_id(&self, id: &str) -> Option<Order> {
        self.load().into_iter().find(|order| order.id == id)
    }

    /// Create an order; the total is derived from its line items
    pub fn create(&self, draft: OrderDraft) -> Order {
        let order = draft.into_record(new_record_id(), Utc::now());
        let mut records = self.load();
        records.push(order.clone());
        self.persist(&records);
        order
    }

    /// Merge a partial update into an order; `None` if the id is unknown
    pub fn update(&self, id: &str, patch: OrderPatch) -> Option<Order> {
        let mut records = self.load();
        let order = records.iter_mut().find(|order| order.id == id)?;
        patch.apply(order);
        order.updated_at = Utc::now();
        let updated = order.clone();
        self.persist(&records);
        Some(updated)
    }

    /// Delete an order by id; `false` if the id is unknown
    pub fn delete(&self, id: &str) -> bool {
        let mut records = self.load();
        let before = records.len();
        records.retain(|order| order.id != id);
        if records.len() == before {
            return false;
        }
        self.persist(&records);
        true
    }
}
