//! Global calstats configuration.

use std::path::{Path, PathBuf};

use config::{Config, File};
use serde::Deserialize;

use crate::error::{CalStatsError, CalStatsResult};

/// Configuration at ~/.config/calstats/config.toml
///
/// Every value can be overridden from the command line.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct StatsConfig {
    /// The .ics file to read when none is given on the command line.
    pub calendar_file: Option<PathBuf>,

    /// Events whose summary contains any of these are left out.
    #[serde(default)]
    pub exclusions: Vec<String>,

    /// Only report these years.
    #[serde(default)]
    pub years: Vec<i32>,
}

impl StatsConfig {
    pub fn config_path() -> CalStatsResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalStatsError::Config("Could not determine config directory".into()))?
            .join("calstats");

        Ok(config_dir.join("config.toml"))
    }

    /// Load ~/.config/calstats/config.toml, creating a commented-out default
    /// on first use.
    pub fn load() -> CalStatsResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> CalStatsResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .build()
            .map_err(|e| CalStatsError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CalStatsError::Config(e.to_string()))
    }

    /// The configured calendar file with `~` expanded.
    pub fn calendar_path(&self) -> Option<PathBuf> {
        self.calendar_file
            .as_ref()
            .map(|p| PathBuf::from(shellexpand::tilde(&p.to_string_lossy()).into_owned()))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CalStatsResult<()> {
        let contents = "\
# calstats configuration

# Calendar export to read when --file is not given:
# calendar_file = \"~/Downloads/calendar.ics\"

# Leave out events whose summary contains any of these:
# exclusions = [\"Lunch\", \"Focus time\"]

# Only report these years:
# years = [2020, 2021]
";

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CalStatsError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CalStatsError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
