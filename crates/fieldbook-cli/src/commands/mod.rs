//! Command handlers

pub mod attendance;
pub mod config;
pub mod data;
pub mod goal;
pub mod metrics;
pub mod order;
pub mod rep;
pub mod status;
pub mod visit;

use anyhow::{bail, Result};
use fieldbook_core::{Crm, Page};

/// Resolve the acting representative: an explicit id, or the current user
pub(crate) fn resolve_rep(crm: &Crm, rep: Option<String>) -> Result<String> {
    if let Some(rep) = rep {
        return Ok(rep);
    }
    match crm.current_user() {
        Some(user) => Ok(user.id),
        None => bail!(
            "No representative given and no current user set. \
             Run 'fieldbook rep use <id>' first."
        ),
    }
}

/// Resolve a full record id from an exact id or unique prefix
pub(crate) fn resolve_prefix(what: &str, prefix: &str, ids: Vec<String>) -> Result<String> {
    let mut matches: Vec<String> = ids.into_iter().filter(|id| id.starts_with(prefix)).collect();
    match matches.len() {
        0 => bail!("{} not found: {}", what, prefix),
        1 => Ok(matches.remove(0)),
        n => bail!("Ambiguous {} id '{}' ({} matches)", what, prefix, n),
    }
}

/// Pagination descriptor from the --page/--limit flags
pub(crate) fn page_opt(page: Option<usize>, limit: Option<usize>) -> Option<Page> {
    limit.map(|limit| Page::new(page.unwrap_or(1), limit))
}
