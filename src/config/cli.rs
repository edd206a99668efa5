use super::TomlConfig;
use crate::utils::error::Result;
use clap::Parser;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "employee-tracker.toml";

#[derive(Debug, Clone, Parser)]
#[command(name = "employee-tracker")]
#[command(about = "Browse and edit an employee directory from the terminal")]
pub struct CliConfig {
    /// TOML configuration file (defaults to ./employee-tracker.toml when present)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Database file to open, overriding the configuration file
    #[arg(long)]
    pub database: Option<String>,

    /// Load the sample directory into an empty database
    #[arg(long)]
    pub seed: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliConfig {
    /// Reads the configuration file, if any, and applies command-line overrides.
    pub fn load(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                TomlConfig::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => TomlConfig::default(),
        };

        if let Some(database) = &self.database {
            config.database.path = database.clone();
        }
        if self.seed {
            config.database.seed = true;
        }

        Ok(config)
    }
}
