//! Goal records
//!
//! Weekly or monthly targets a representative works toward. Goals are an
//! append/update-only log; there is no delete path.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::InvalidLabel;
use crate::query::{Queryable, SortField, SortValue};

/// What a goal measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalType {
    Visits,
    Orders,
    Revenue,
}

impl GoalType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Visits => "Visits",
            Self::Orders => "Orders",
            Self::Revenue => "Revenue",
        }
    }
}

impl fmt::Display for GoalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GoalType {
    type Err = InvalidLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Visits" => Ok(Self::Visits),
            "Orders" => Ok(Self::Orders),
            "Revenue" => Ok(Self::Revenue),
            _ => Err(InvalidLabel::new("goal type", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalPeriod {
    Weekly,
    Monthly,
}

impl GoalPeriod {
    pub fn label(self) -> &'static str {
        match self {
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
        }
    }
}

impl fmt::Display for GoalPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GoalPeriod {
    type Err = InvalidLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Weekly" => Ok(Self::Weekly),
            "Monthly" => Ok(Self::Monthly),
            _ => Err(InvalidLabel::new("goal period", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalStatus {
    Active,
    Completed,
    Overdue,
}

impl GoalStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Completed => "Completed",
            Self::Overdue => "Overdue",
        }
    }
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GoalStatus {
    type Err = InvalidLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(Self::Active),
            "Completed" => Ok(Self::Completed),
            "Overdue" => Ok(Self::Overdue),
            _ => Err(InvalidLabel::new("goal status", s)),
        }
    }
}

/// A representative's target for a period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    #[serde(rename = "type")]
    pub goal_type: GoalType,
    pub title: String,
    pub target: f64,
    pub achieved: f64,
    pub period: GoalPeriod,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub representative_id: String,
    pub status: GoalStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied fields for creating a goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GoalDraft {
    #[serde(rename = "type")]
    pub goal_type: GoalType,
    pub title: String,
    pub target: f64,
    #[serde(default)]
    pub achieved: f64,
    pub period: GoalPeriod,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub representative_id: String,
    pub status: GoalStatus,
}

impl GoalDraft {
    pub(crate) fn into_record(self, id: String, now: DateTime<Utc>) -> Goal {
        Goal {
            id,
            goal_type: self.goal_type,
            title: self.title,
            target: self.target,
            achieved: self.achieved,
            period: self.period,
            start_date: self.start_date,
            end_date: self.end_date,
            representative_id: self.representative_id,
            status: self.status,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update for a goal
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct GoalPatch {
    #[serde(rename = "type")]
    pub goal_type: Option<GoalType>,
    pub title: Option<String>,
    pub target: Option<f64>,
    pub achieved: Option<f64>,
    pub period: Option<GoalPeriod>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub representative_id: Option<String>,
    pub status: Option<GoalStatus>,
}

impl GoalPatch {
    pub fn achieved(achieved: f64) -> Self {
        Self {
            achieved: Some(achieved),
            ..Self::default()
        }
    }

    pub(crate) fn apply(self, goal: &mut Goal) {
        if let Some(goal_type) = self.goal_type {
            goal.goal_type = goal_type;
        }
        if let Some(title) = self.title {
            goal.title = title;
        }
        if let Some(target) = self.target {
            goal.target = target;
        }
        if let Some(achieved) = self.achieved {
            goal.achieved = achieved;
        }
        if let Some(period) = self.period {
            goal.period = period;
        }
        if let Some(start_date) = self.start_date {
            goal.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            goal.end_date = end_date;
        }
        if let Some(representative_id) = self.representative_id {
            goal.representative_id = representative_id;
        }
        if let Some(status) = self.status {
            goal.status = status;
        }
    }
}

impl Queryable for Goal {
    // Goals carry period bounds rather than a single record date, so the
    // query engine's date-range predicates leave them unconstrained.

    fn status_label(&self) -> Option<&str> {
        Some(self.status.label())
    }

    fn representative_id(&self) -> Option<&str> {
        Some(&self.representative_id)
    }

    fn sort_value(&self, field: SortField) -> Option<SortValue> {
        match field {
            SortField::Date => Some(SortValue::Date(self.start_date)),
            SortField::Name => Some(SortValue::Text(self.title.clone())),
            SortField::Status => Some(SortValue::Text(self.status.label().to_string())),
            SortField::Target => Some(SortValue::Number(self.target)),
            SortField::CreatedAt => Some(SortValue::Instant(self.created_at)),
            SortField::UpdatedAt => Some(SortValue::Instant(self.updated_at)),
            SortField::TotalAmount => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_goal() -> Goal {
        GoalDraft {
            goal_type: GoalType::Revenue,
            title: "March revenue push".to_string(),
            target: 50_000.0,
            achieved: 12_500.0,
            period: GoalPeriod::Monthly,
            start_date: "2025-03-01".parse().unwrap(),
            end_date: "2025-03-31".parse().unwrap(),
            representative_id: "rep_001".to_string(),
            status: GoalStatus::Active,
        }
        .into_record("g1".to_string(), Utc::now())
    }

    #[test]
    fn test_type_field_serializes_as_type() {
        let goal = sample_goal();
        let json = serde_json::to_string(&goal).unwrap();
        assert!(json.contains("\"type\":\"Revenue\""));
        assert!(json.contains("\"startDate\""));

        let back: Goal = serde_json::from_str(&json).unwrap();
        assert_eq!(back, goal);
    }

    #[test]
    fn test_patch_achieved() {
        let mut goal = sample_goal();
        GoalPatch::achieved(20_000.0).apply(&mut goal);
        assert_eq!(goal.achieved, 20_000.0);
        assert_eq!(goal.target, 50_000.0);
    }

    #[test]
    fn test_date_bounds_do_not_constrain_goals() {
        use crate::query::Filter;

        let goal = sample_goal();
        let filter = Filter::new()
            .date_from("2030-01-01".parse().unwrap())
            .date_to("2030-12-31".parse().unwrap());
        assert!(filter.matches(&goal));
    }
}
