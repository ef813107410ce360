//! Fieldbook CLI
//!
//! Command-line interface for Fieldbook - local-first CRM for field sales
//! representatives.

use std::path::PathBuf;

use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fieldbook_core::{
    AttendanceStatus, Crm, CustomerType, FacilityType, GoalPeriod, GoalStatus, GoalType,
    VisitStatus,
};

mod commands;
mod output;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "fieldbook")]
#[command(about = "Fieldbook - local-first CRM for field sales representatives")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage representatives
    Rep {
        #[command(subcommand)]
        command: RepCommands,
    },
    /// Manage visits
    Visit {
        #[command(subcommand)]
        command: VisitCommands,
    },
    /// Manage orders
    Order {
        #[command(subcommand)]
        command: OrderCommands,
    },
    /// Check in/out and list attendance
    Attendance {
        #[command(subcommand)]
        command: AttendanceCommands,
    },
    /// Manage goals
    Goal {
        #[command(subcommand)]
        command: GoalCommands,
    },
    /// Show dashboard metrics
    Dashboard {
        /// Representative id (defaults to the current user)
        #[arg(long)]
        rep: Option<String>,
        /// Cover every representative
        #[arg(long, conflicts_with = "rep")]
        all: bool,
    },
    /// Show performance metrics
    Performance {
        /// Representative id (defaults to the current user)
        #[arg(long)]
        rep: Option<String>,
        /// Cover every representative
        #[arg(long, conflicts_with = "rep")]
        all: bool,
    },
    /// Export, import, or clear the store
    Data {
        #[command(subcommand)]
        command: DataCommands,
    },
    /// Show store status
    Status,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum RepCommands {
    /// Create a new representative
    #[command(alias = "add")]
    Create {
        /// Full name
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long, default_value = "")]
        territory: String,
        /// Join date (defaults to today)
        #[arg(long)]
        join_date: Option<NaiveDate>,
    },
    /// List all representatives
    #[command(alias = "ls")]
    List,
    /// Set the current user
    Use {
        /// Representative id
        id: String,
    },
}

#[derive(Subcommand)]
enum VisitCommands {
    /// Schedule a new visit
    #[command(alias = "add")]
    Create {
        /// Facility name
        facility: String,
        /// Facility type (Hospital, Clinic, Pharmacy, "Doctor Office")
        #[arg(short = 't', long = "type")]
        facility_type: FacilityType,
        /// Visit date
        #[arg(long)]
        date: NaiveDate,
        /// Visit time (defaults to 09:00)
        #[arg(long)]
        time: Option<NaiveTime>,
        #[arg(long)]
        notes: Option<String>,
        /// Owning representative (defaults to the current user)
        #[arg(long)]
        rep: Option<String>,
    },
    /// List visits
    #[command(alias = "ls")]
    List {
        /// Filter by status (Planned, Completed, Cancelled)
        #[arg(long)]
        status: Option<VisitStatus>,
        /// Inclusive lower date bound
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Inclusive upper date bound
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Filter by representative
        #[arg(long)]
        rep: Option<String>,
        /// 1-indexed page (requires --limit)
        #[arg(long, requires = "limit")]
        page: Option<usize>,
        /// Page size
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show visit details
    Show {
        /// Visit id (or prefix)
        id: String,
    },
    /// Mark a visit completed
    Complete {
        /// Visit id (or prefix)
        id: String,
    },
    /// Mark a visit cancelled
    Cancel {
        /// Visit id (or prefix)
        id: String,
    },
    /// Delete a visit
    #[command(alias = "rm")]
    Delete {
        /// Visit id (or prefix)
        id: String,
    },
}

#[derive(Subcommand)]
enum OrderCommands {
    /// Create a new order
    #[command(alias = "add")]
    Create {
        /// Customer name
        customer: String,
        /// Customer type (Hospital, Clinic, Pharmacy, Doctor)
        #[arg(short = 't', long = "type")]
        customer_type: CustomerType,
        /// Line item as "product:quantity:unit-price" (repeatable)
        #[arg(long = "item", required = true)]
        items: Vec<String>,
        /// Order date (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Owning representative (defaults to the current user)
        #[arg(long)]
        rep: Option<String>,
        /// Originating visit id
        #[arg(long)]
        visit: Option<String>,
    },
    /// List orders
    #[command(alias = "ls")]
    List {
        /// Filter by status (Pending, Processing, Completed, Cancelled)
        #[arg(long)]
        status: Option<fieldbook_core::OrderStatus>,
        /// Inclusive lower date bound
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Inclusive upper date bound
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Filter by representative
        #[arg(long)]
        rep: Option<String>,
        /// 1-indexed page (requires --limit)
        #[arg(long, requires = "limit")]
        page: Option<usize>,
        /// Page size
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show order details
    Show {
        /// Order id (or prefix)
        id: String,
    },
    /// Mark an order completed
    Complete {
        /// Order id (or prefix)
        id: String,
    },
    /// Delete an order
    #[command(alias = "rm")]
    Delete {
        /// Order id (or prefix)
        id: String,
    },
}

#[derive(Subcommand)]
enum AttendanceCommands {
    /// Check in for today
    Checkin {
        /// Representative (defaults to the current user)
        #[arg(long)]
        rep: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Check out for today
    Checkout {
        /// Representative (defaults to the current user)
        #[arg(long)]
        rep: Option<String>,
    },
    /// List attendance records
    #[command(alias = "ls")]
    List {
        /// Filter by status (Present, Absent, "Half Day")
        #[arg(long)]
        status: Option<AttendanceStatus>,
        /// Inclusive lower date bound
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Inclusive upper date bound
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Filter by representative
        #[arg(long)]
        rep: Option<String>,
    },
}

#[derive(Subcommand)]
enum GoalCommands {
    /// Create a new goal
    #[command(alias = "add")]
    Create {
        /// Goal title
        title: String,
        /// Goal type (Visits, Orders, Revenue)
        #[arg(short = 't', long = "type")]
        goal_type: GoalType,
        /// Numeric target
        #[arg(long)]
        target: f64,
        /// Period (Weekly, Monthly)
        #[arg(long)]
        period: GoalPeriod,
        /// Period start
        #[arg(long)]
        start: NaiveDate,
        /// Period end
        #[arg(long)]
        end: NaiveDate,
        /// Owning representative (defaults to the current user)
        #[arg(long)]
        rep: Option<String>,
    },
    /// List goals
    #[command(alias = "ls")]
    List {
        /// Filter by status (Active, Completed, Overdue)
        #[arg(long)]
        status: Option<GoalStatus>,
        /// Filter by representative
        #[arg(long)]
        rep: Option<String>,
    },
    /// Record progress toward a goal
    Progress {
        /// Goal id (or prefix)
        id: String,
        /// Achieved-so-far value
        #[arg(long)]
        achieved: f64,
    },
}

#[derive(Subcommand)]
enum DataCommands {
    /// Export every collection as one snapshot document
    Export {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Import a snapshot document
    Import {
        /// Snapshot file
        file: PathBuf,
    },
    /// Wipe the store entirely
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Config commands don't need the store
    if let Commands::Config { command } = &cli.command {
        return commands::config::handle(command.clone(), &output);
    }

    let crm = Crm::open()?;
    crm.seed_sample_data();

    match cli.command {
        Commands::Rep { command } => match command {
            RepCommands::Create {
                name,
                email,
                phone,
                territory,
                join_date,
            } => commands::rep::create(&crm, name, email, phone, territory, join_date, &output),
            RepCommands::List => commands::rep::list(&crm, &output),
            RepCommands::Use { id } => commands::rep::use_rep(&crm, &id, &output),
        },
        Commands::Visit { command } => match command {
            VisitCommands::Create {
                facility,
                facility_type,
                date,
                time,
                notes,
                rep,
            } => commands::visit::create(&crm, facility, facility_type, date, time, notes, rep, &output),
            VisitCommands::List {
                status,
                from,
                to,
                rep,
                page,
                limit,
            } => commands::visit::list(&crm, status, from, to, rep, page, limit, &output),
            VisitCommands::Show { id } => commands::visit::show(&crm, &id, &output),
            VisitCommands::Complete { id } => {
                commands::visit::set_status(&crm, &id, VisitStatus::Completed, &output)
            }
            VisitCommands::Cancel { id } => {
                commands::visit::set_status(&crm, &id, VisitStatus::Cancelled, &output)
            }
            VisitCommands::Delete { id } => commands::visit::delete(&crm, &id, &output),
        },
        Commands::Order { command } => match command {
            OrderCommands::Create {
                customer,
                customer_type,
                items,
                date,
                rep,
                visit,
            } => commands::order::create(&crm, customer, customer_type, items, date, rep, visit, &output),
            OrderCommands::List {
                status,
                from,
                to,
                rep,
                page,
                limit,
            } => commands::order::list(&crm, status, from, to, rep, page, limit, &output),
            OrderCommands::Show { id } => commands::order::show(&crm, &id, &output),
            OrderCommands::Complete { id } => commands::order::complete(&crm, &id, &output),
            OrderCommands::Delete { id } => commands::order::delete(&crm, &id, &output),
        },
        Commands::Attendance { command } => match command {
            AttendanceCommands::Checkin { rep, notes } => {
                commands::attendance::check_in(&crm, rep, notes, &output)
            }
            AttendanceCommands::Checkout { rep } => {
                commands::attendance::check_out(&crm, rep, &output)
            }
            AttendanceCommands::List {
                status,
                from,
                to,
                rep,
            } => commands::attendance::list(&crm, status, from, to, rep, &output),
        },
        Commands::Goal { command } => match command {
            GoalCommands::Create {
                title,
                goal_type,
                target,
                period,
                start,
                end,
                rep,
            } => commands::goal::create(&crm, title, goal_type, target, period, start, end, rep, &output),
            GoalCommands::List { status, rep } => commands::goal::list(&crm, status, rep, &output),
            GoalCommands::Progress { id, achieved } => {
                commands::goal::progress(&crm, &id, achieved, &output)
            }
        },
        Commands::Dashboard { rep, all } => commands::metrics::dashboard(&crm, rep, all, &output),
        Commands::Performance { rep, all } => {
            commands::metrics::performance(&crm, rep, all, &output)
        }
        Commands::Data { command } => match command {
            DataCommands::Export { output: path } => commands::data::export(&crm, path, &output),
            DataCommands::Import { file } => commands::data::import(&crm, &file, &output),
            DataCommands::Clear { yes } => commands::data::clear(&crm, yes, &output),
        },
        Commands::Status => commands::status::show(&crm, &output),
        Commands::Config { .. } => unreachable!("handled above"),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("fieldbook_core=warn,fieldbook_cli=warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
