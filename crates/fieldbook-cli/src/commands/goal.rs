//! Goal command handlers

use anyhow::{bail, Result};
use chrono::NaiveDate;

use fieldbook_core::{Crm, Filter, GoalDraft, GoalPatch, GoalPeriod, GoalStatus, GoalType};

use super::{resolve_prefix, resolve_rep};
use crate::output::Output;

/// Create a new goal
#[allow(clippy::too_many_arguments)]
pub fn create(
    crm: &Crm,
    title: String,
    goal_type: GoalType,
    target: f64,
    period: GoalPeriod,
    start: NaiveDate,
    end: NaiveDate,
    rep: Option<String>,
    output: &Output,
) -> Result<()> {
    let representative_id = resolve_rep(crm, rep)?;
    let goal = crm.goals().create(GoalDraft {
        goal_type,
        title,
        target,
        achieved: 0.0,
        period,
        start_date: start,
        end_date: end,
        representative_id,
        status: GoalStatus::Active,
    });

    output.success(&format!("Created goal: {}", goal.id));
    Ok(())
}

/// List goals with optional filters
pub fn list(
    crm: &Crm,
    status: Option<GoalStatus>,
    rep: Option<String>,
    output: &Output,
) -> Result<()> {
    let mut filter = Filter::new();
    if let Some(status) = status {
        filter = filter.status(status);
    }
    if let Some(rep) = rep {
        filter = filter.representative(rep);
    }

    let goals = crm.goals().get_all(Some(&filter), None, None);
    output.print_goals(&goals);
    Ok(())
}

/// Record progress toward a goal
pub fn progress(crm: &Crm, id: &str, achieved: f64, output: &Output) -> Result<()> {
    let ids = crm
        .goals()
        .get_all(None, None, None)
        .into_iter()
        .map(|goal| goal.id)
        .collect();
    let id = resolve_prefix("Goal", id, ids)?;

    // Completing the target also completes the goal
    let mut patch = GoalPatch::achieved(achieved);
    if let Some(goal) = crm.goals().get_by_id(&id) {
        if achieved >= goal.target {
            patch.status = Some(GoalStatus::Completed);
        }
    }

    match crm.goals().update(&id, patch) {
        Some(goal) => {
            output.success(&format!(
                "Goal {} at {:.1}/{:.1} ({})",
                goal.id, goal.achieved, goal.target, goal.status
            ));
            Ok(())
        }
        None => bail!("Goal not found: {}", id),
    }
}
