//! Representative command handlers

use anyhow::{bail, Result};
use chrono::{NaiveDate, Utc};

use fieldbook_core::{Crm, RepresentativeDraft};

use crate::output::Output;

/// Create a new representative
pub fn create(
    crm: &Crm,
    name: String,
    email: String,
    phone: String,
    territory: String,
    join_date: Option<NaiveDate>,
    output: &Output,
) -> Result<()> {
    let rep = crm.representatives().create(RepresentativeDraft {
        name,
        email,
        phone,
        territory,
        join_date: join_date.unwrap_or_else(|| Utc::now().date_naive()),
        is_active: true,
    });

    output.success(&format!("Created representative: {}", rep.id));

    // First representative becomes the current user
    if crm.current_user().is_none() {
        crm.set_current_user(&rep);
        output.message(&format!("Set {} as the current user", rep.name));
    }
    Ok(())
}

/// List all representatives
pub fn list(crm: &Crm, output: &Output) -> Result<()> {
    let reps = crm.representatives().get_all(None, None, None);
    let current = crm.current_user().map(|user| user.id);
    output.print_reps(&reps, current.as_deref());
    Ok(())
}

/// Set the current user
pub fn use_rep(crm: &Crm, id: &str, output: &Output) -> Result<()> {
    let Some(rep) = crm.representatives().get_by_id(id) else {
        bail!("Representative not found: {}", id);
    };
    crm.set_current_user(&rep);
    output.success(&format!("Current user is now {} ({})", rep.name, rep.id));
    Ok(())
}
