//! Visit command handlers

use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};

use fieldbook_core::{Crm, FacilityType, Filter, VisitDraft, VisitPatch, VisitStatus};

use super::{page_opt, resolve_prefix, resolve_rep};
use crate::output::Output;

/// Schedule a new visit
#[allow(clippy::too_many_arguments)]
pub fn create(
    crm: &Crm,
    facility: String,
    facility_type: FacilityType,
    date: NaiveDate,
    time: Option<NaiveTime>,
    notes: Option<String>,
    rep: Option<String>,
    output: &Output,
) -> Result<()> {
    let representative_id = resolve_rep(crm, rep)?;
    let default_time = NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default();

    let visit = crm.visits().create(VisitDraft {
        facility_name: facility,
        facility_type,
        date,
        time: time.unwrap_or(default_time),
        notes: notes.unwrap_or_default(),
        status: VisitStatus::Planned,
        representative_id,
    });

    output.success(&format!("Created visit: {}", visit.id));
    output.print_visit(&visit);
    Ok(())
}

/// List visits with optional filters
#[allow(clippy::too_many_arguments)]
pub fn list(
    crm: &Crm,
    status: Option<VisitStatus>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    rep: Option<String>,
    page: Option<usize>,
    limit: Option<usize>,
    output: &Output,
) -> Result<()> {
    let mut filter = Filter::new();
    if let Some(status) = status {
        filter = filter.status(status);
    }
    if let Some(from) = from {
        filter = filter.date_from(from);
    }
    if let Some(to) = to {
        filter = filter.date_to(to);
    }
    if let Some(rep) = rep {
        filter = filter.representative(rep);
    }

    let visits = crm
        .visits()
        .get_all(Some(&filter), None, page_opt(page, limit));
    output.print_visits(&visits);
    Ok(())
}

/// Show a single visit
pub fn show(crm: &Crm, id: &str, output: &Output) -> Result<()> {
    let id = resolve_visit_id(crm, id)?;
    if let Some(visit) = crm.visits().get_by_id(&id) {
        output.print_visit(&visit);
    }
    Ok(())
}

/// Move a visit to a new status
pub fn set_status(crm: &Crm, id: &str, status: VisitStatus, output: &Output) -> Result<()> {
    let id = resolve_visit_id(crm, id)?;
    match crm.visits().update(&id, VisitPatch::status(status)) {
        Some(visit) => {
            output.success(&format!("Visit {} is now {}", visit.id, visit.status));
            Ok(())
        }
        None => anyhow::bail!("Visit not found: {}", id),
    }
}

/// Delete a visit
pub fn delete(crm: &Crm, id: &str, output: &Output) -> Result<()> {
    let id = resolve_visit_id(crm, id)?;
    if crm.visits().delete(&id) {
        output.success(&format!("Deleted visit: {}", id));
        Ok(())
    } else {
        anyhow::bail!("Visit not found: {}", id)
    }
}

fn resolve_visit_id(crm: &Crm, prefix: &str) -> Result<String> {
    let ids = crm
        .visits()
        .get_all(None, None, None)
        .into_iter()
        .map(|visit| visit.id)
        .collect();
    resolve_prefix("Visit", prefix, ids)
}
