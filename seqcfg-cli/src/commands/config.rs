//! Config command implementation - show or write the settings file

use anyhow::{Context, Result};
use std::path::Path;

use crate::config::Config;

pub fn execute(config: &Config, example: bool, output: Option<&Path>) -> Result<()> {
    let config = if example { Config::default() } else { config.clone() };

    match output {
        Some(path) => {
            config.save_to_file(path)?;
            log::info!("Configuration written to: {}", path.display());
        }
        None => {
            let content = if example {
                Config::example_toml()?
            } else {
                toml::to_string_pretty(&config).context("Failed to serialize configuration")?
            };
            print!("{}", content);
        }
    }
    Ok(())
}
