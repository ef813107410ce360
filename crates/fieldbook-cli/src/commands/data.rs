//! Data management command handlers

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use fieldbook_core::Crm;

use crate::output::Output;

/// Export every collection as one snapshot document
pub fn export(crm: &Crm, path: Option<PathBuf>, output: &Output) -> Result<()> {
    let snapshot = crm.export_data();
    if snapshot.is_empty() {
        bail!("Export failed");
    }

    match path {
        Some(path) => {
            fs::write(&path, &snapshot)
                .with_context(|| format!("Failed to write snapshot to {:?}", path))?;
            output.success(&format!("Exported to {}", path.display()));
        }
        None => println!("{}", snapshot),
    }
    Ok(())
}

/// Import a snapshot document, replacing the collections it names
pub fn import(crm: &Crm, file: &Path, output: &Output) -> Result<()> {
    let snapshot = fs::read_to_string(file)
        .with_context(|| format!("Failed to read snapshot from {:?}", file))?;

    if !crm.import_data(&snapshot) {
        bail!("Import failed: {:?} is not a valid snapshot", file);
    }

    let counts = crm.counts();
    output.success(&format!(
        "Imported: {} visits, {} orders, {} attendance, {} goals, {} representatives",
        counts.visits, counts.orders, counts.attendance, counts.goals, counts.representatives
    ));
    Ok(())
}

/// Wipe the store entirely
pub fn clear(crm: &Crm, yes: bool, output: &Output) -> Result<()> {
    if !yes && output.should_prompt() && !confirm("Delete ALL data? This cannot be undone.")? {
        output.message("Aborted.");
        return Ok(());
    }

    crm.clear_all_data();
    output.success("All data cleared");
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
