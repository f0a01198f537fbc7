pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::AppConfig;
use crate::core::{Estimator, ImpactOracle, ImpactReport, QuickConverter, ReportAdapter};
use anyhow::Result;
use rust_decimal::Decimal;
use tracing::{debug, info};

pub enum AppCommand {
    /// Estimate from the three quick answers
    Quick {
        num_invites: u64,
        daily_hours: Decimal,
        have_website: bool,
        json: bool,
    },
    /// Estimate from a JSON report file
    Report { path: String, json: bool },
}

/// Wires the configured oracle and quick assumptions into an estimator.
pub fn build_estimator(config: AppConfig) -> Estimator<Box<dyn ImpactOracle>> {
    let oracle = providers::oracle_from_config(&config.oracle, config.cache);
    let adapter = ReportAdapter::new(QuickConverter::new(config.quick));
    Estimator::new(oracle, adapter)
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Impact estimator starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let estimator = build_estimator(config);

    match command {
        AppCommand::Quick {
            num_invites,
            daily_hours,
            have_website,
            json,
        } => {
            let report = ImpactReport::quick(num_invites, daily_hours, have_website);
            cli::estimate::run(&estimator, &report, json).await
        }
        AppCommand::Report { path, json } => {
            let report = ImpactReport::load_from_path(&path)?;
            cli::estimate::run(&estimator, &report, json).await
        }
    }
}
