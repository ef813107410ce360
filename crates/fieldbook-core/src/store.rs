//! Unified store facade
//!
//! [`Crm`] owns the record store and hands out the per-entity
//! repositories, the metrics engine, and the data-management operations
//! (current user, export/import, clear, seeding). Construct it once at
//! startup and pass it by reference; there is no global instance.
//!
//! ## Usage
//!
//! ```ignore
//! let crm = Crm::open()?; // loads config, opens the data directory
//!
//! let visit = crm.visits().create(draft);
//! let planned = crm.visits().get_all(Some(&filter), None, None);
//! let dashboard = crm.metrics().dashboard(Some("rep_001"));
//! ```

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::warn;

use crate::config::Config;
use crate::metrics::Metrics;
use crate::models::Representative;
use crate::repo::{AttendanceLog, Goals, Orders, Representatives, Visits};
use crate::snapshot::Snapshot;
use crate::storage::{
    Collection, FileMedium, RecordStore, StorageMedium, CURRENT_USER_KEY,
};

/// Per-collection record counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreCounts {
    pub visits: usize,
    pub orders: usize,
    pub attendance: usize,
    pub goals: usize,
    pub representatives: usize,
}

/// The CRM data store
pub struct Crm {
    records: RecordStore,
    config: Config,
}

impl Crm {
    /// Open the store using configuration from the default location
    pub fn open() -> Result<Self> {
        let config = Config::load().context("Failed to load configuration")?;
        Self::open_with_config(config)
    }

    /// Open the store with a specific configuration
    pub fn open_with_config(config: Config) -> Result<Self> {
        let medium = FileMedium::new(&config.data_dir)
            .with_context(|| format!("Failed to open data directory {:?}", config.data_dir))?;
        Ok(Self {
            records: RecordStore::new(Box::new(medium)),
            config,
        })
    }

    /// Build a store over an arbitrary medium (tests, embedding)
    pub fn with_medium(medium: Box<dyn StorageMedium>) -> Self {
        Self {
            records: RecordStore::new(medium),
            config: Config::default(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // ==================== Repositories ====================

    pub fn visits(&self) -> Visits<'_> {
        Visits::new(&self.records)
    }

    pub fn orders(&self) -> Orders<'_> {
        Orders::new(&self.records)
    }

    pub fn attendance(&self) -> AttendanceLog<'_> {
        AttendanceLog::new(&self.records)
    }

    pub fn goals(&self) -> Goals<'_> {
        Goals::new(&self.records)
    }

    pub fn representatives(&self) -> Representatives<'_> {
        Representatives::new(&self.records)
    }

    /// Metrics engine over this store's repositories
    pub fn metrics(&self) -> Metrics<'_> {
        Metrics::new(self)
    }

    // ==================== Current user ====================

    /// The active representative, if one has been set
    pub fn current_user(&self) -> Option<Representative> {
        match self.records.read_value(CURRENT_USER_KEY) {
            Ok(user) => user,
            Err(error) => {
                warn!(%error, "reading current user failed");
                None
            }
        }
    }

    /// Point the store at an active representative
    pub fn set_current_user(&self, user: &Representative) {
        if let Err(error) = self.records.write_value(CURRENT_USER_KEY, user) {
            warn!(%error, "persisting current user failed");
        }
    }

    // ==================== Data management ====================

    /// Serialize every collection into one pretty-printed snapshot.
    ///
    /// Returns an empty string if serialization fails; export never errors.
    pub fn export_data(&self) -> String {
        match Snapshot::capture(self).to_json() {
            Ok(json) => json,
            Err(error) => {
                warn!(%error, "exporting data failed");
                String::new()
            }
        }
    }

    /// Import a snapshot document.
    ///
    /// On parse failure nothing is modified and `false` is returned. On
    /// success each collection present replaces the stored collection;
    /// collections absent from the document are left untouched. Writes are
    /// not atomic across collections: a failed write leaves earlier
    /// collections committed. The current-user pointer is never touched.
    pub fn import_data(&self, json: &str) -> bool {
        let snapshot = match Snapshot::parse(json) {
            Ok(snapshot) => snapshot,
            Err(error) => {
                warn!(%error, "importing data failed: unparseable snapshot");
                return false;
            }
        };

        if let Some(visits) = snapshot.visits {
            self.replace_collection(Collection::Visits, &visits);
        }
        if let Some(orders) = snapshot.orders {
            self.replace_collection(Collection::Orders, &orders);
        }
        if let Some(attendance) = snapshot.attendance {
            self.replace_collection(Collection::Attendance, &attendance);
        }
        if let Some(goals) = snapshot.goals {
            self.replace_collection(Collection::Goals, &goals);
        }
        if let Some(representatives) = snapshot.representatives {
            self.replace_collection(Collection::Representatives, &representatives);
        }
        true
    }

    fn replace_collection<T: serde::Serialize>(&self, collection: Collection, records: &[T]) {
        if let Err(error) = self.records.write_all(collection, records) {
            warn!(%error, key = collection.key(), "importing collection failed");
        }
    }

    /// Remove every known key from the medium
    pub fn clear_all_data(&self) {
        for collection in Collection::ALL {
            if let Err(error) = self.records.remove_key(collection.key()) {
                warn!(%error, key = collection.key(), "clearing collection failed");
            }
        }
        if let Err(error) = self.records.remove_key(CURRENT_USER_KEY) {
            warn!(%error, "clearing current user failed");
        }
    }

    /// First-run seeding: one representative, set as the current user.
    ///
    /// Does nothing once any representative exists.
    pub fn seed_sample_data(&self) {
        if !self.representatives().get_all(None, None, None).is_empty() {
            return;
        }

        let now = Utc::now();
        let user = Representative {
            id: "rep_001".to_string(),
            name: "John Smith".to_string(),
            email: "john.smith@company.com".to_string(),
            phone: "+1-555-0123".to_string(),
            territory: "North District".to_string(),
            join_date: chrono::NaiveDate::from_ymd_opt(2023, 1, 15)
                .unwrap_or_else(|| now.date_naive()),
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        if let Err(error) = self
            .records
            .write_all(Collection::Representatives, &[user.clone()])
        {
            warn!(%error, "seeding representatives failed");
        }
        self.set_current_user(&user);
    }

    /// Record counts per collection
    pub fn counts(&self) -> StoreCounts {
        StoreCounts {
            visits: self.visits().get_all(None, None, None).len(),
            orders: self.orders().get_all(None, None, None).len(),
            attendance: self.attendance().get_all(None, None, None).len(),
            goals: self.goals().get_all(None, None, None).len(),
            representatives: self.representatives().get_all(None, None, None).len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        FacilityType, GoalDraft, GoalPeriod, GoalStatus, GoalType, OrderDraft, OrderItem,
        OrderStatus, RepresentativeDraft, VisitDraft, VisitStatus,
    };
    use crate::models::CustomerType;
    use crate::storage::MemoryMedium;
    use tempfile::TempDir;

    fn crm() -> Crm {
        Crm::with_medium(Box::new(MemoryMedium::new()))
    }

    fn rep_draft(name: &str) -> RepresentativeDraft {
        RepresentativeDraft {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: "+1-555-0100".to_string(),
            territory: "North District".to_string(),
            join_date: "2024-01-15".parse().unwrap(),
            is_active: true,
        }
    }

    fn visit_draft(rep: &str) -> VisitDraft {
        VisitDraft {
            facility_name: "City General Hospital".to_string(),
            facility_type: FacilityType::Hospital,
            date: "2025-03-14".parse().unwrap(),
            time: "09:30:00".parse().unwrap(),
            notes: String::new(),
            status: VisitStatus::Planned,
            representative_id: rep.to_string(),
        }
    }

    fn order_draft(rep: &str) -> OrderDraft {
        OrderDraft {
            customer_name: "Lakeside Pharmacy".to_string(),
            customer_type: CustomerType::Pharmacy,
            products: vec![OrderItem::new("Amoxicillin 500mg", 10, 12.50)],
            status: OrderStatus::Pending,
            date: "2025-03-10".parse().unwrap(),
            representative_id: rep.to_string(),
            visit_id: None,
        }
    }

    fn goal_draft(rep: &str) -> GoalDraft {
        GoalDraft {
            goal_type: GoalType::Visits,
            title: "March visits".to_string(),
            target: 20.0,
            achieved: 0.0,
            period: GoalPeriod::Monthly,
            start_date: "2025-03-01".parse().unwrap(),
            end_date: "2025-03-31".parse().unwrap(),
            representative_id: rep.to_string(),
            status: GoalStatus::Active,
        }
    }

    #[test]
    fn test_current_user_round_trip() {
        let crm = crm();
        assert!(crm.current_user().is_none());

        let rep = crm.representatives().create(rep_draft("Dana"));
        crm.set_current_user(&rep);
        assert_eq!(crm.current_user(), Some(rep));
    }

    #[test]
    fn test_export_import_round_trip() {
        let crm = crm();
        let rep = crm.representatives().create(rep_draft("Dana"));
        crm.visits().create(visit_draft(&rep.id));
        crm.orders().create(order_draft(&rep.id));
        crm.goals().create(goal_draft(&rep.id));
        crm.attendance().check_in(&rep.id, None).unwrap();

        let exported = crm.export_data();
        assert!(!exported.is_empty());

        let fresh = Crm::with_medium(Box::new(MemoryMedium::new()));
        assert!(fresh.import_data(&exported));

        assert_eq!(
            fresh.visits().get_all(None, None, None),
            crm.visits().get_all(None, None, None)
        );
        assert_eq!(
            fresh.orders().get_all(None, None, None),
            crm.orders().get_all(None, None, None)
        );
        assert_eq!(
            fresh.attendance().get_all(None, None, None),
            crm.attendance().get_all(None, None, None)
        );
        assert_eq!(
            fresh.goals().get_all(None, None, None),
            crm.goals().get_all(None, None, None)
        );
        assert_eq!(
            fresh.representatives().get_all(None, None, None),
            crm.representatives().get_all(None, None, None)
        );
    }

    #[test]
    fn test_import_rejects_garbage_without_modifying() {
        let crm = crm();
        crm.representatives().create(rep_draft("Dana"));

        assert!(!crm.import_data("definitely not json"));
        assert_eq!(crm.counts().representatives, 1);
    }

    #[test]
    fn test_partial_import_leaves_missing_collections_untouched() {
        let crm = crm();
        let rep = crm.representatives().create(rep_draft("Dana"));
        crm.visits().create(visit_draft(&rep.id));

        // Snapshot naming only orders: visits and reps stay as they are
        let imported = crm.import_data(
            r#"{
                "orders": [],
                "exportDate": "2025-03-10T12:00:00Z"
            }"#,
        );
        assert!(imported);
        assert_eq!(crm.counts().visits, 1);
        assert_eq!(crm.counts().representatives, 1);
        assert_eq!(crm.counts().orders, 0);
    }

    #[test]
    fn test_import_replaces_named_collections_wholesale() {
        let crm = crm();
        let rep = crm.representatives().create(rep_draft("Dana"));
        crm.visits().create(visit_draft(&rep.id));
        crm.visits().create(visit_draft(&rep.id));

        crm.import_data(
            r#"{
                "visits": [],
                "exportDate": "2025-03-10T12:00:00Z"
            }"#,
        );
        assert_eq!(crm.counts().visits, 0);
    }

    #[test]
    fn test_import_leaves_current_user_alone() {
        let crm = crm();
        let rep = crm.representatives().create(rep_draft("Dana"));
        crm.set_current_user(&rep);

        crm.import_data(
            r#"{
                "representatives": [],
                "exportDate": "2025-03-10T12:00:00Z"
            }"#,
        );
        assert_eq!(crm.current_user(), Some(rep));
    }

    #[test]
    fn test_clear_all_data() {
        let crm = crm();
        let rep = crm.representatives().create(rep_draft("Dana"));
        crm.set_current_user(&rep);
        crm.visits().create(visit_draft(&rep.id));

        crm.clear_all_data();

        assert_eq!(crm.counts(), StoreCounts::default());
        assert!(crm.current_user().is_none());
    }

    #[test]
    fn test_seed_sample_data_is_idempotent() {
        let crm = crm();
        crm.seed_sample_data();

        let reps = crm.representatives().get_all(None, None, None);
        assert_eq!(reps.len(), 1);
        assert_eq!(reps[0].id, "rep_001");
        assert_eq!(crm.current_user().map(|u| u.id), Some("rep_001".to_string()));

        crm.seed_sample_data();
        assert_eq!(crm.counts().representatives, 1);
    }

    #[test]
    fn test_seed_skips_when_reps_exist() {
        let crm = crm();
        crm.representatives().create(rep_draft("Dana"));
        crm.seed_sample_data();

        let reps = crm.representatives().get_all(None, None, None);
        assert_eq!(reps.len(), 1);
        assert_eq!(reps[0].name, "Dana");
    }

    #[test]
    fn test_data_persists_across_reopens() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            data_dir: temp_dir.path().to_path_buf(),
        };

        let visit_id;
        {
            let crm = Crm::open_with_config(config.clone()).unwrap();
            let rep = crm.representatives().create(rep_draft("Dana"));
            visit_id = crm.visits().create(visit_draft(&rep.id)).id;
        }

        let crm = Crm::open_with_config(config).unwrap();
        assert_eq!(crm.counts().representatives, 1);
        assert!(crm.visits().get_by_id(&visit_id).is_some());
    }

    #[test]
    fn test_counts() {
        let crm = crm();
        let rep = crm.representatives().create(rep_draft("Dana"));
        crm.visits().create(visit_draft(&rep.id));
        crm.visits().create(visit_draft(&rep.id));
        crm.orders().create(order_draft(&rep.id));

        let counts = crm.counts();
        assert_eq!(counts.visits, 2);
        assert_eq!(counts.orders, 1);
        assert_eq!(counts.representatives, 1);
        assert_eq!(counts.attendance, 0);
        assert_eq!(counts.goals, 0);
    }
}
