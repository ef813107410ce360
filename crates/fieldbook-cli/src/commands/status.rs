//! Status command handler

use anyhow::Result;

use fieldbook_core::Crm;

use crate::output::{Output, OutputFormat};

/// Show store status
pub fn show(crm: &Crm, output: &Output) -> Result<()> {
    let counts = crm.counts();
    let config = crm.config();
    let current = crm.current_user();

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "current_user": current.as_ref().map(|user| &user.id),
                    "counts": {
                        "visits": counts.visits,
                        "orders": counts.orders,
                        "attendance": counts.attendance,
                        "goals": counts.goals,
                        "representatives": counts.representatives
                    }
                })
            );
        }
        OutputFormat::Quiet => {
            if let Some(user) = current {
                println!("{}", user.id);
            }
        }
        OutputFormat::Human => {
            println!("Fieldbook Status");
            println!("================");
            println!();
            match current {
                Some(user) => println!("Current user: {} ({})", user.name, user.id),
                None => println!("Current user: none"),
            }
            println!();
            println!("Storage:");
            println!("  Location: {}", config.data_dir.display());
            println!();
            println!("Contents:");
            println!("  Visits:          {}", counts.visits);
            println!("  Orders:          {}", counts.orders);
            println!("  Attendance:      {}", counts.attendance);
            println!("  Goals:           {}", counts.goals);
            println!("  Representatives: {}", counts.representatives);
        }
    }

    Ok(())
}
