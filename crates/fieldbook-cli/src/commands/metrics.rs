//! Dashboard and performance command handlers

use anyhow::Result;

use fieldbook_core::Crm;

use super::resolve_rep;
use crate::output::Output;

/// Show dashboard metrics
pub fn dashboard(crm: &Crm, rep: Option<String>, all: bool, output: &Output) -> Result<()> {
    let scope = scope(crm, rep, all)?;
    let metrics = crm.metrics().dashboard(scope.as_deref());
    output.print_dashboard(&metrics);
    Ok(())
}

/// Show performance metrics
pub fn performance(crm: &Crm, rep: Option<String>, all: bool, output: &Output) -> Result<()> {
    let scope = scope(crm, rep, all)?;
    let metrics = crm.metrics().performance(scope.as_deref());
    output.print_performance(&metrics);
    Ok(())
}

/// `--all` covers every representative; otherwise an explicit `--rep` or
/// the current user
fn scope(crm: &Crm, rep: Option<String>, all: bool) -> Result<Option<String>> {
    if all {
        return Ok(None);
    }
    resolve_rep(crm, rep).map(Some)
}
