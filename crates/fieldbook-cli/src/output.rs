//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use fieldbook_core::{
    Attendance, DashboardMetrics, Goal, Order, PerformanceMetrics, Representative, Visit,
};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print a single visit
    pub fn print_visit(&self, visit: &Visit) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:        {}", visit.id);
                println!("Facility:  {} ({})", visit.facility_name, visit.facility_type);
                println!("When:      {} {}", visit.date, visit.time.format("%H:%M"));
                println!("Status:    {}", visit.status);
                println!("Rep:       {}", visit.representative_id);
                if !visit.notes.is_empty() {
                    println!("Notes:     {}", visit.notes);
                }
                println!("Created:   {}", visit.created_at.format("%Y-%m-%d %H:%M"));
                println!("Updated:   {}", visit.updated_at.format("%Y-%m-%d %H:%M"));
            }
            OutputFormat::Json => print_json(visit),
            OutputFormat::Quiet => println!("{}", visit.id),
        }
    }

    /// Print a list of visits
    pub fn print_visits(&self, visits: &[Visit]) {
        match self.format {
            OutputFormat::Human => {
                if visits.is_empty() {
                    println!("No visits found.");
                    return;
                }
                for visit in visits {
                    println!(
                        "{} | {} {} | {:9} | {}",
                        short_id(&visit.id),
                        visit.date,
                        visit.time.format("%H:%M"),
                        visit.status.label(),
                        truncate(&visit.facility_name, 40)
                    );
                }
                println!("\n{} visit(s)", visits.len());
            }
            OutputFormat::Json => print_json(visits),
            OutputFormat::Quiet => {
                for visit in visits {
                    println!("{}", visit.id);
                }
            }
        }
    }

    /// Print a single order
    pub fn print_order(&self, order: &Order) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:        {}", order.id);
                println!("Customer:  {} ({})", order.customer_name, order.customer_type);
                println!("Date:      {}", order.date);
                println!("Status:    {}", order.status);
                println!("Rep:       {}", order.representative_id);
                if let Some(ref visit_id) = order.visit_id {
                    println!("Visit:     {}", visit_id);
                }
                println!();
                for item in &order.products {
                    println!(
                        "  {:3} x {:30} @ {:>9.2} = {:>10.2}",
                        item.quantity,
                        truncate(&item.product_name, 30),
                        item.unit_price,
                        item.total_price
                    );
                }
                println!("  Total: {:.2}", order.total_amount);
            }
            OutputFormat::Json => print_json(order),
            OutputFormat::Quiet => println!("{}", order.id),
        }
    }

    /// Print a list of orders
    pub fn print_orders(&self, orders: &[Order]) {
        match self.format {
            OutputFormat::Human => {
                if orders.is_empty() {
                    println!("No orders found.");
                    return;
                }
                for order in orders {
                    println!(
                        "{} | {} | {:10} | {:>10.2} | {}",
                        short_id(&order.id),
                        order.date,
                        order.status.label(),
                        order.total_amount,
                        truncate(&order.customer_name, 35)
                    );
                }
                println!("\n{} order(s)", orders.len());
            }
            OutputFormat::Json => print_json(orders),
            OutputFormat::Quiet => {
                for order in orders {
                    println!("{}", order.id);
                }
            }
        }
    }

    /// Print a single attendance record
    pub fn print_attendance(&self, record: &Attendance) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:        {}", record.id);
                println!("Date:      {}", record.date);
                println!("Status:    {}", record.status);
                println!("Rep:       {}", record.representative_id);
                println!("Check-in:  {}", record.check_in.format("%H:%M:%S"));
                if let Some(check_out) = record.check_out {
                    println!("Check-out: {}", check_out.format("%H:%M:%S"));
                }
                if let Some(hours) = record.working_hours {
                    println!("Hours:     {:.2}", hours);
                }
                if let Some(ref notes) = record.notes {
                    println!("Notes:     {}", notes);
                }
            }
            OutputFormat::Json => print_json(record),
            OutputFormat::Quiet => println!("{}", record.id),
        }
    }

    /// Print a list of attendance records
    pub fn print_attendance_list(&self, records: &[Attendance]) {
        match self.format {
            OutputFormat::Human => {
                if records.is_empty() {
                    println!("No attendance records found.");
                    return;
                }
                for record in records {
                    let hours = record
                        .working_hours
                        .map(|h| format!("{:.2}h", h))
                        .unwrap_or_else(|| "-".to_string());
                    println!(
                        "{} | {} | {:8} | {:>7} | {}",
                        short_id(&record.id),
                        record.date,
                        record.status.label(),
                        hours,
                        record.representative_id
                    );
                }
                println!("\n{} record(s)", records.len());
            }
            OutputFormat::Json => print_json(records),
            OutputFormat::Quiet => {
                for record in records {
                    println!("{}", record.id);
                }
            }
        }
    }

    /// Print a list of goals
    pub fn print_goals(&self, goals: &[Goal]) {
        match self.format {
            OutputFormat::Human => {
                if goals.is_empty() {
                    println!("No goals found.");
                    return;
                }
                for goal in goals {
                    println!(
                        "{} | {:7} | {:9} | {:>10.1}/{:<10.1} | {}",
                        short_id(&goal.id),
                        goal.goal_type.label(),
                        goal.status.label(),
                        goal.achieved,
                        goal.target,
                        truncate(&goal.title, 35)
                    );
                }
                println!("\n{} goal(s)", goals.len());
            }
            OutputFormat::Json => print_json(goals),
            OutputFormat::Quiet => {
                for goal in goals {
                    println!("{}", goal.id);
                }
            }
        }
    }

    /// Print a list of representatives
    pub fn print_reps(&self, reps: &[Representative], current: Option<&str>) {
        match self.format {
            OutputFormat::Human => {
                if reps.is_empty() {
                    println!("No representatives found.");
                    return;
                }
                for rep in reps {
                    let marker = if Some(rep.id.as_str()) == current {
                        "*"
                    } else {
                        " "
                    };
                    let active = if rep.is_active { "active" } else { "inactive" };
                    println!(
                        "{} {} | {:20} | {:15} | {}",
                        marker,
                        rep.id,
                        truncate(&rep.name, 20),
                        truncate(&rep.territory, 15),
                        active
                    );
                }
                println!("\n{} representative(s)", reps.len());
            }
            OutputFormat::Json => print_json(reps),
            OutputFormat::Quiet => {
                for rep in reps {
                    println!("{}", rep.id);
                }
            }
        }
    }

    /// Print dashboard metrics
    pub fn print_dashboard(&self, metrics: &DashboardMetrics) {
        match self.format {
            OutputFormat::Human => {
                println!("Dashboard");
                println!("=========");
                println!();
                println!("Visits this month:  {} ({:+.2}% vs last month)",
                    metrics.total_visits.current, metrics.total_visits.percentage_change);
                println!("Planned visits:     {} this month, {} next week",
                    metrics.planned_visits.this_week, metrics.planned_visits.next_week);
                println!();
                println!("Orders this month:  {} ({:+.2}% vs last month)",
                    metrics.orders.current, metrics.orders.percentage_change);
                println!("Revenue this month: {:.2}", metrics.orders.total_revenue);
                println!();
                println!("Completion rates:");
                println!("  Visits: {:.2}%", metrics.completion_rate.visits);
                println!("  Orders: {:.2}%", metrics.completion_rate.orders);
                println!("  Goals:  {:.2}%", metrics.completion_rate.goals);
                println!();
                println!(
                    "Attendance: {:.2}% ({} of {} days)",
                    metrics.attendance.this_month,
                    metrics.attendance.days_present,
                    metrics.attendance.total_working_days
                );
            }
            OutputFormat::Json => print_json(metrics),
            OutputFormat::Quiet => {
                println!(
                    "{} {} {:.2}",
                    metrics.total_visits.current,
                    metrics.orders.current,
                    metrics.orders.total_revenue
                );
            }
        }
    }

    /// Print performance metrics
    pub fn print_performance(&self, metrics: &PerformanceMetrics) {
        match self.format {
            OutputFormat::Human => {
                println!("Performance");
                println!("===========");
                println!();
                println!("Visit -> order conversion: {:.2}%", metrics.visit_to_order_conversion);
                println!("Average order value:       {:.2}", metrics.average_order_value);
                println!();
                println!(
                    "Monthly: {:.2} / {:.2}",
                    metrics.monthly_achieved, metrics.monthly_target
                );
                println!(
                    "Weekly:  {:.2} / {:.2}",
                    metrics.weekly_achieved, metrics.weekly_target
                );
                println!();
                println!("Territory ranking:     #{}", metrics.territory_ranking);
                println!("Customer satisfaction: {:.1}", metrics.customer_satisfaction);
            }
            OutputFormat::Json => print_json(metrics),
            OutputFormat::Quiet => {
                println!(
                    "{:.2} {:.2}",
                    metrics.visit_to_order_conversion, metrics.average_order_value
                );
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(err) => eprintln!("Failed to serialize output: {}", err),
    }
}

/// First 8 characters of an id, for list output
fn short_id(id: &str) -> &str {
    if id.len() > 8 {
        &id[..8]
    } else {
        id
    }
}

/// Truncate a string to max length, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len - 3])
    }
}
