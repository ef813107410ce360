//! Attendance command handlers

use anyhow::{anyhow, Result};
use chrono::NaiveDate;

use fieldbook_core::{AttendanceStatus, Crm, Filter};

use super::resolve_rep;
use crate::output::Output;

/// Check the acting representative in for today
pub fn check_in(
    crm: &Crm,
    rep: Option<String>,
    notes: Option<String>,
    output: &Output,
) -> Result<()> {
    let representative_id = resolve_rep(crm, rep)?;
    let record = crm
        .attendance()
        .check_in(&representative_id, notes)
        .map_err(|err| anyhow!("{}", err))?;

    output.success(&format!(
        "Checked in at {}",
        record.check_in.format("%H:%M:%S")
    ));
    output.print_attendance(&record);
    Ok(())
}

/// Check the acting representative out for today
pub fn check_out(crm: &Crm, rep: Option<String>, output: &Output) -> Result<()> {
    let representative_id = resolve_rep(crm, rep)?;
    let record = crm
        .attendance()
        .check_out(&representative_id)
        .map_err(|err| anyhow!("{}", err))?;

    let hours = record.working_hours.unwrap_or(0.0);
    output.success(&format!("Checked out after {:.2} hours", hours));
    output.print_attendance(&record);
    Ok(())
}

/// List attendance records with optional filters
pub fn list(
    crm: &Crm,
    status: Option<AttendanceStatus>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    rep: Option<String>,
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

    let records = crm.attendance().get_all(Some(&filter), None, None);
    output.print_attendance_list(&records);
    Ok(())
}
