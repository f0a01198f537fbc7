use crate::core::quick::QuickConfig;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

/// Per-unit returns served by the table oracle.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct TableOracleConfig {
    pub currency_code: String,
    pub currency_symbol: String,
    pub decimals: u32,
    /// Commission the amounts below were priced with
    pub relative_commission: Decimal,
    pub recommend_offer: Decimal,
    pub create_offer: Decimal,
    pub invite_buyer: Decimal,
    pub invite_seller: Decimal,
    pub bonus: Decimal,
}

impl Default for TableOracleConfig {
    fn default() -> Self {
        TableOracleConfig {
            currency_code: "USD".to_string(),
            currency_symbol: "$".to_string(),
            decimals: 2,
            relative_commission: dec!(0.05),
            recommend_offer: dec!(0.35),
            create_offer: dec!(0.35),
            invite_buyer: dec!(0.35),
            invite_seller: dec!(0.10),
            bonus: dec!(0.05),
        }
    }
}

fn default_retries() -> usize {
    3
}

fn default_retry_delay_ms() -> u64 {
    500
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RemoteOracleConfig {
    pub base_url: String,
    #[serde(default = "default_retries")]
    pub retries: usize,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum OracleConfig {
    Table(TableOracleConfig),
    Remote(RemoteOracleConfig),
}

impl Default for OracleConfig {
    fn default() -> Self {
        OracleConfig::Table(TableOracleConfig::default())
    }
}

fn default_cache() -> bool {
    true
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub quick: QuickConfig,
    #[serde(default)]
    pub oracle: OracleConfig,
    /// Memoize oracle answers for the lifetime of a run
    #[serde(default = "default_cache")]
    pub cache: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            quick: QuickConfig::default(),
            oracle: OracleConfig::default(),
            cache: default_cache(),
        }
    }
}

impl AppConfig {
    /// Loads the configuration file from the default location, falling back
    /// to built-in defaults when none was set up.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using built-in defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "impact", "impact")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}
