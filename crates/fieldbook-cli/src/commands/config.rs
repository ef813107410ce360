//! Config command handlers

use std::path::PathBuf;

use anyhow::{bail, Result};

use fieldbook_core::Config;

use crate::output::{Output, OutputFormat};
use crate::ConfigCommands;

/// Show or set configuration
pub fn handle(command: Option<ConfigCommands>, output: &Output) -> Result<()> {
    match command {
        None | Some(ConfigCommands::Show) => show(output),
        Some(ConfigCommands::Set { key, value }) => set(&key, &value, output),
    }
}

fn show(output: &Output) -> Result<()> {
    let config = Config::load()?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "config_file": Config::config_file_path(),
                    "data_dir": config.data_dir
                })
            );
        }
        _ => {
            println!("Config file: {}", Config::config_file_path().display());
            println!("data_dir = {}", config.data_dir.display());
        }
    }
    Ok(())
}

fn set(key: &str, value: &str, output: &Output) -> Result<()> {
    let mut config = Config::load()?;

    match key {
        "data_dir" => config.data_dir = PathBuf::from(value),
        _ => bail!("Unknown configuration key: {} (expected data_dir)", key),
    }

    config.save()?;
    output.success(&format!("Set {} = {}", key, value));
    Ok(())
}
