//! Foreman tool configuration
//!
//! Layered via figment: serialized defaults, then an optional
//! `foreman.toml`, then `FOREMAN_`-prefixed environment variables.
//! CLI flags override the extracted result last.

use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file looked for in the working directory
pub const CONFIG_FILE: &str = "foreman.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForemanConfig {
    /// Directory holding the reference CSVs
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Where the audit findings report is written
    #[serde(default = "default_report_file")]
    pub report_file: PathBuf,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_report_file() -> PathBuf {
    PathBuf::from("data/problematic_cables.csv")
}

impl Default for ForemanConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            report_file: default_report_file(),
        }
    }
}

impl ForemanConfig {
    /// Load configuration, optionally from an explicit config file path
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let file = config_file.unwrap_or(Path::new(CONFIG_FILE));

        let mut figment = Figment::from(Serialized::defaults(ForemanConfig::default()));
        if file.exists() {
            figment = figment.merge(Toml::file(file));
        }
        figment
            .merge(Env::prefixed("FOREMAN_"))
            .extract()
            .with_context(|| format!("invalid configuration ({})", file.display()))
    }
}
