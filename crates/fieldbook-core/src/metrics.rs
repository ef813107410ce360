//! Derived dashboard and performance metrics
//!
//! The engine composes repository queries only; it never touches the
//! record store directly. Every function takes an optional representative
//! id (`None` = all representatives) and exists in a `*_at` variant with
//! an explicit clock for deterministic tests.
//!
//! All percentages and monetary figures are rounded to two decimal
//! places, half away from zero. Any internal failure (calendar
//! arithmetic included) yields a complete zero-filled structure rather
//! than an error, so callers can always read every field.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::dates;
use crate::models::{round2, AttendanceStatus, GoalStatus, OrderStatus, VisitStatus};
use crate::query::Filter;
use crate::store::Crm;

// TODO: derive monthly/weekly targets from Revenue goal records instead of
// these fixed placeholders.
const MONTHLY_TARGET: f64 = 50_000.0;
const WEEKLY_TARGET: f64 = 12_500.0;
const TERRITORY_RANKING: u32 = 3;
const CUSTOMER_SATISFACTION: f64 = 4.2;

/// Month-over-month visit counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitTrend {
    pub current: usize,
    pub previous: usize,
    pub percentage_change: f64,
}

/// Planned-visit counts for the near term
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedVisits {
    pub this_week: usize,
    pub next_week: usize,
}

/// Month-over-month order counts and revenue
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTrend {
    pub current: usize,
    pub previous: usize,
    pub percentage_change: f64,
    pub total_revenue: f64,
}

/// Completed-over-total percentages per collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRates {
    pub visits: f64,
    pub orders: f64,
    pub goals: f64,
}

/// Current-month attendance summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummary {
    /// Days present over total calendar days, as a percentage
    pub this_month: f64,
    pub days_present: usize,
    pub total_working_days: u32,
}

/// Everything the dashboard renders
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_visits: VisitTrend,
    pub planned_visits: PlannedVisits,
    pub orders: OrderTrend,
    pub completion_rate: CompletionRates,
    pub attendance: AttendanceSummary,
}

/// Current-month performance summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    pub visit_to_order_conversion: f64,
    pub average_order_value: f64,
    pub monthly_target: f64,
    pub monthly_achieved: f64,
    pub weekly_target: f64,
    pub weekly_achieved: f64,
    pub territory_ranking: u32,
    pub customer_satisfaction: f64,
}

/// Metrics engine over a store's repositories
pub struct Metrics<'a> {
    crm: &'a Crm,
}

impl<'a> Metrics<'a> {
    pub(crate) fn new(crm: &'a Crm) -> Self {
        Self { crm }
    }

    /// Dashboard metrics relative to now
    pub fn dashboard(&self, representative_id: Option<&str>) -> DashboardMetrics {
        self.dashboard_at(Utc::now(), representative_id)
    }

    /// Dashboard metrics against an explicit clock
    pub fn dashboard_at(
        &self,
        now: DateTime<Utc>,
        representative_id: Option<&str>,
    ) -> DashboardMetrics {
        let today = now.date_naive();

        let windows = match MonthWindows::compute(today) {
            Some(windows) => windows,
            None => return DashboardMetrics::default(),
        };

        let current_visits = self.crm.visits().get_all(
            Some(&range_filter(
                windows.current.0,
                windows.current.1,
                representative_id,
            )),
            None,
            None,
        );
        let previous_visits = self.crm.visits().get_all(
            Some(&range_filter(
                windows.previous.0,
                windows.previous.1,
                representative_id,
            )),
            None,
            None,
        );
        let current_orders = self.crm.orders().get_all(
            Some(&range_filter(
                windows.current.0,
                windows.current.1,
                representative_id,
            )),
            None,
            None,
        );
        let previous_orders = self.crm.orders().get_all(
            Some(&range_filter(
                windows.previous.0,
                windows.previous.1,
                representative_id,
            )),
            None,
            None,
        );

        let next_week_planned = self.crm.visits().get_all(
            Some(
                &range_filter(windows.next_week.0, windows.next_week.1, representative_id)
                    .status(VisitStatus::Planned),
            ),
            None,
            None,
        );

        let completed_visits = current_visits
            .iter()
            .filter(|visit| visit.status == VisitStatus::Completed)
            .count();
        let completed_orders = current_orders
            .iter()
            .filter(|order| order.status == OrderStatus::Completed)
            .count();

        let goals = self.crm.goals().get_all(
            Some(&rep_filter(representative_id)),
            None,
            None,
        );
        let completed_goals = goals
            .iter()
            .filter(|goal| goal.status == GoalStatus::Completed)
            .count();

        let attendance_records = self.crm.attendance().get_all(
            Some(&range_filter(
                windows.current.0,
                windows.current.1,
                representative_id,
            )),
            None,
            None,
        );
        let days_present = attendance_records
            .iter()
            .filter(|record| record.status == AttendanceStatus::Present)
            .count();
        let attendance_rate = completion_rate(days_present, windows.days_in_current_month as usize);

        let total_revenue = round2(
            current_orders
                .iter()
                .map(|order| order.total_amount)
                .sum(),
        );

        DashboardMetrics {
            total_visits: VisitTrend {
                current: current_visits.len(),
                previous: previous_visits.len(),
                percentage_change: percentage_change(current_visits.len(), previous_visits.len()),
            },
            planned_visits: PlannedVisits {
                // Planned count within the current month window, as the
                // dashboard has always reported it
                this_week: current_visits
                    .iter()
                    .filter(|visit| visit.status == VisitStatus::Planned)
                    .count(),
                next_week: next_week_planned.len(),
            },
            orders: OrderTrend {
                current: current_orders.len(),
                previous: previous_orders.len(),
                percentage_change: percentage_change(current_orders.len(), previous_orders.len()),
                total_revenue,
            },
            completion_rate: CompletionRates {
                visits: completion_rate(completed_visits, current_visits.len()),
                orders: completion_rate(completed_orders, current_orders.len()),
                goals: completion_rate(completed_goals, goals.len()),
            },
            attendance: AttendanceSummary {
                this_month: attendance_rate,
                days_present,
                total_working_days: windows.days_in_current_month,
            },
        }
    }

    /// Performance metrics relative to now
    pub fn performance(&self, representative_id: Option<&str>) -> PerformanceMetrics {
        self.performance_at(Utc::now(), representative_id)
    }

    /// Performance metrics against an explicit clock
    pub fn performance_at(
        &self,
        now: DateTime<Utc>,
        representative_id: Option<&str>,
    ) -> PerformanceMetrics {
        let today = now.date_naive();

        let (month_start, month_end) = match dates::month_bounds(today) {
            Some(bounds) => bounds,
            None => return PerformanceMetrics::default(),
        };

        let visits = self.crm.visits().get_all(
            Some(&range_filter(month_start, month_end, representative_id)),
            None,
            None,
        );
        let orders = self.crm.orders().get_all(
            Some(&range_filter(month_start, month_end, representative_id)),
            None,
            None,
        );

        let conversion = completion_rate(orders.len(), visits.len());

        let total_revenue: f64 = orders.iter().map(|order| order.total_amount).sum();
        let average_order_value = if orders.is_empty() {
            0.0
        } else {
            round2(total_revenue / orders.len() as f64)
        };

        PerformanceMetrics {
            visit_to_order_conversion: conversion,
            average_order_value,
            monthly_target: MONTHLY_TARGET,
            monthly_achieved: round2(total_revenue),
            weekly_target: WEEKLY_TARGET,
            weekly_achieved: round2(total_revenue / 4.0),
            territory_ranking: TERRITORY_RANKING,
            customer_satisfaction: CUSTOMER_SATISFACTION,
        }
    }
}

/// Calendar windows the dashboard aggregates over
struct MonthWindows {
    current: (NaiveDate, NaiveDate),
    previous: (NaiveDate, NaiveDate),
    next_week: (NaiveDate, NaiveDate),
    days_in_current_month: u32,
}

impl MonthWindows {
    fn compute(today: NaiveDate) -> Option<Self> {
        let current = dates::month_bounds(today)?;
        let previous = dates::previous_month_bounds(today)?;
        let next_week = dates::next_week_window(today)?;
        let days_in_current_month = dates::days_in_month(today)?;
        Some(Self {
            current,
            previous,
            next_week,
            days_in_current_month,
        })
    }
}

fn rep_filter(representative_id: Option<&str>) -> Filter {
    match representative_id {
        Some(id) => Filter::new().representative(id),
        None => Filter::new(),
    }
}

fn range_filter(start: NaiveDate, end: NaiveDate, representative_id: Option<&str>) -> Filter {
    rep_filter(representative_id).date_from(start).date_to(end)
}

/// (current - previous) / previous * 100, defined as 0 when previous is 0
fn percentage_change(current: usize, previous: usize) -> f64 {
    if previous == 0 {
        return 0.0;
    }
    round2((current as f64 - previous as f64) / previous as f64 * 100.0)
}

/// completed / total * 100, defined as 0 when total is 0
fn completion_rate(completed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(completed as f64 / total as f64 * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AttendanceDraft, CustomerType, FacilityType, GoalDraft, GoalPeriod, GoalType, OrderDraft,
        OrderItem, VisitDraft,
    };
    use crate::storage::MemoryMedium;
    use chrono::NaiveDateTime;

    fn crm() -> Crm {
        Crm::with_medium(Box::new(MemoryMedium::new()))
    }

    fn at(s: &str) -> DateTime<Utc> {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
            .unwrap()
            .and_utc()
    }

    fn add_visit(crm: &Crm, date: &str, status: VisitStatus, rep: &str) {
        crm.visits().create(VisitDraft {
            facility_name: "Clinic".to_string(),
            facility_type: FacilityType::Clinic,
            date: date.parse().unwrap(),
            time: "09:00:00".parse().unwrap(),
            notes: String::new(),
            status,
            representative_id: rep.to_string(),
        });
    }

    fn add_order(crm: &Crm, date: &str, status: OrderStatus, rep: &str, amount: f64) {
        crm.orders().create(OrderDraft {
            customer_name: "Pharmacy".to_string(),
            customer_type: CustomerType::Pharmacy,
            products: vec![OrderItem::new("Product", 1, amount)],
            status,
            date: date.parse().unwrap(),
            representative_id: rep.to_string(),
            visit_id: None,
        });
    }

    fn add_attendance(crm: &Crm, date: &str, status: AttendanceStatus, rep: &str) {
        crm.attendance()
            .create(AttendanceDraft {
                date: date.parse().unwrap(),
                check_in: at(&format!("{date} 08:00:00")),
                check_out: None,
                status,
                representative_id: rep.to_string(),
                working_hours: None,
                notes: None,
            })
            .unwrap();
    }

    fn add_goal(crm: &Crm, status: GoalStatus, rep: &str) {
        crm.goals().create(GoalDraft {
            goal_type: GoalType::Visits,
            title: "goal".to_string(),
            target: 10.0,
            achieved: 0.0,
            period: GoalPeriod::Monthly,
            start_date: "2025-03-01".parse().unwrap(),
            end_date: "2025-03-31".parse().unwrap(),
            representative_id: rep.to_string(),
            status,
        });
    }

    const NOW: &str = "2025-03-10 12:00:00";

    #[test]
    fn test_empty_store_is_all_zeroes() {
        let crm = crm();
        let metrics = crm.metrics().dashboard_at(at(NOW), None);
        assert_eq!(metrics.total_visits, VisitTrend::default());
        assert_eq!(metrics.planned_visits, PlannedVisits::default());
        assert_eq!(metrics.orders, OrderTrend::default());
        assert_eq!(metrics.completion_rate, CompletionRates::default());
        assert_eq!(metrics.attendance.days_present, 0);
        assert_eq!(metrics.attendance.this_month, 0.0);
        // The calendar denominator is reported even with no records
        assert_eq!(metrics.attendance.total_working_days, 31);

        let perf = crm.metrics().performance_at(at(NOW), None);
        assert_eq!(perf.visit_to_order_conversion, 0.0);
        assert_eq!(perf.average_order_value, 0.0);
        assert_eq!(perf.monthly_achieved, 0.0);
        // Fixed placeholders survive even with no data
        assert_eq!(perf.monthly_target, 50_000.0);
        assert_eq!(perf.weekly_target, 12_500.0);
    }

    #[test]
    fn test_month_over_month_visit_change() {
        let crm = crm();
        // Previous month: 2 visits; current month: 3
        add_visit(&crm, "2025-02-05", VisitStatus::Completed, "rep_001");
        add_visit(&crm, "2025-02-20", VisitStatus::Completed, "rep_001");
        add_visit(&crm, "2025-03-01", VisitStatus::Completed, "rep_001");
        add_visit(&crm, "2025-03-05", VisitStatus::Planned, "rep_001");
        add_visit(&crm, "2025-03-09", VisitStatus::Cancelled, "rep_001");

        let metrics = crm.metrics().dashboard_at(at(NOW), Some("rep_001"));
        assert_eq!(metrics.total_visits.current, 3);
        assert_eq!(metrics.total_visits.previous, 2);
        assert_eq!(metrics.total_visits.percentage_change, 50.0);
    }

    #[test]
    fn test_percentage_change_zero_previous_is_zero() {
        let crm = crm();
        add_visit(&crm, "2025-03-01", VisitStatus::Planned, "rep_001");

        let metrics = crm.metrics().dashboard_at(at(NOW), None);
        assert_eq!(metrics.total_visits.previous, 0);
        assert_eq!(metrics.total_visits.percentage_change, 0.0);
    }

    #[test]
    fn test_planned_visit_next_week_is_counted() {
        let crm = crm();
        // One week out from 2025-03-10 -> inside the +7..+13 window
        add_visit(&crm, "2025-03-17", VisitStatus::Planned, "rep_001");
        // Outside the window
        add_visit(&crm, "2025-03-24", VisitStatus::Planned, "rep_001");
        // In the window but not Planned
        add_visit(&crm, "2025-03-18", VisitStatus::Completed, "rep_001");

        let metrics = crm.metrics().dashboard_at(at(NOW), Some("rep_001"));
        assert_eq!(metrics.planned_visits.next_week, 1);

        // A different representative's dashboard excludes it
        let other = crm.metrics().dashboard_at(at(NOW), Some("rep_999"));
        assert_eq!(other.planned_visits.next_week, 0);
    }

    #[test]
    fn test_next_week_window_bounds_are_inclusive() {
        let crm = crm();
        add_visit(&crm, "2025-03-17", VisitStatus::Planned, "rep_001"); // +7
        add_visit(&crm, "2025-03-23", VisitStatus::Planned, "rep_001"); // +13
        add_visit(&crm, "2025-03-16", VisitStatus::Planned, "rep_001"); // +6

        let metrics = crm.metrics().dashboard_at(at(NOW), None);
        assert_eq!(metrics.planned_visits.next_week, 2);
    }

    #[test]
    fn test_completion_rates() {
        let crm = crm();
        add_visit(&crm, "2025-03-01", VisitStatus::Completed, "rep_001");
        add_visit(&crm, "2025-03-02", VisitStatus::Completed, "rep_001");
        add_visit(&crm, "2025-03-03", VisitStatus::Planned, "rep_001");

        add_order(&crm, "2025-03-01", OrderStatus::Completed, "rep_001", 100.0);
        add_order(&crm, "2025-03-02", OrderStatus::Pending, "rep_001", 50.0);

        add_goal(&crm, GoalStatus::Completed, "rep_001");
        add_goal(&crm, GoalStatus::Active, "rep_001");
        add_goal(&crm, GoalStatus::Overdue, "rep_001");
        add_goal(&crm, GoalStatus::Active, "rep_001");

        let metrics = crm.metrics().dashboard_at(at(NOW), Some("rep_001"));
        assert_eq!(metrics.completion_rate.visits, 66.67);
        assert_eq!(metrics.completion_rate.orders, 50.0);
        assert_eq!(metrics.completion_rate.goals, 25.0);
    }

    #[test]
    fn test_order_revenue_sums_current_month_only() {
        let crm = crm();
        add_order(&crm, "2025-02-15", OrderStatus::Completed, "rep_001", 999.0);
        add_order(&crm, "2025-03-01", OrderStatus::Pending, "rep_001", 100.50);
        add_order(&crm, "2025-03-05", OrderStatus::Completed, "rep_001", 49.50);

        let metrics = crm.metrics().dashboard_at(at(NOW), None);
        assert_eq!(metrics.orders.current, 2);
        assert_eq!(metrics.orders.previous, 1);
        assert_eq!(metrics.orders.total_revenue, 150.0);
    }

    #[test]
    fn test_attendance_rate_uses_calendar_days() {
        let crm = crm();
        add_attendance(&crm, "2025-03-03", AttendanceStatus::Present, "rep_001");
        add_attendance(&crm, "2025-03-04", AttendanceStatus::Present, "rep_001");
        add_attendance(&crm, "2025-03-05", AttendanceStatus::Absent, "rep_001");

        let metrics = crm.metrics().dashboard_at(at(NOW), Some("rep_001"));
        assert_eq!(metrics.attendance.days_present, 2);
        assert_eq!(metrics.attendance.total_working_days, 31);
        // 2 / 31 days in March
        assert_eq!(metrics.attendance.this_month, 6.45);
    }

    #[test]
    fn test_year_rollover_previous_month() {
        let crm = crm();
        add_visit(&crm, "2024-12-20", VisitStatus::Completed, "rep_001");
        add_visit(&crm, "2025-01-05", VisitStatus::Completed, "rep_001");

        let metrics = crm
            .metrics()
            .dashboard_at(at("2025-01-10 12:00:00"), None);
        assert_eq!(metrics.total_visits.current, 1);
        assert_eq!(metrics.total_visits.previous, 1);
    }

    #[test]
    fn test_conversion_and_average_order_value() {
        let crm = crm();
        add_visit(&crm, "2025-03-01", VisitStatus::Completed, "rep_001");
        add_visit(&crm, "2025-03-02", VisitStatus::Completed, "rep_001");
        add_visit(&crm, "2025-03-03", VisitStatus::Planned, "rep_001");
        add_visit(&crm, "2025-03-04", VisitStatus::Planned, "rep_001");
        add_order(&crm, "2025-03-05", OrderStatus::Completed, "rep_001", 120.0);
        add_order(&crm, "2025-03-06", OrderStatus::Pending, "rep_001", 80.0);

        let perf = crm.metrics().performance_at(at(NOW), Some("rep_001"));
        assert_eq!(perf.visit_to_order_conversion, 50.0);
        assert_eq!(perf.average_order_value, 100.0);
        assert_eq!(perf.monthly_achieved, 200.0);
        assert_eq!(perf.weekly_achieved, 50.0);
    }

    #[test]
    fn test_conversion_zero_visits_is_zero() {
        let crm = crm();
        add_order(&crm, "2025-03-05", OrderStatus::Completed, "rep_001", 120.0);
        let perf = crm.metrics().performance_at(at(NOW), None);
        assert_eq!(perf.visit_to_order_conversion, 0.0);
    }

    #[test]
    fn test_rep_scope_none_covers_everyone() {
        let crm = crm();
        add_visit(&crm, "2025-03-01", VisitStatus::Planned, "rep_001");
        add_visit(&crm, "2025-03-02", VisitStatus::Planned, "rep_002");

        let all = crm.metrics().dashboard_at(at(NOW), None);
        assert_eq!(all.total_visits.current, 2);

        let scoped = crm.metrics().dashboard_at(at(NOW), Some("rep_002"));
        assert_eq!(scoped.total_visits.current, 1);
    }

    #[test]
    fn test_metrics_serialize_camel_case() {
        let metrics = DashboardMetrics::default();
        let json = serde_json::to_string(&metrics).unwrap();
        assert!(json.contains("totalVisits"));
        assert!(json.contains("percentageChange"));
        assert!(json.contains("totalWorkingDays"));
    }
}
