//! Core estimation logic and abstractions

pub mod cache;
pub mod config;
pub mod estimator;
pub mod log;
pub mod model;
pub mod money;
pub mod oracle;
pub mod quick;
pub mod report;

// Re-export main types for cleaner imports
pub use estimator::Estimator;
pub use model::{Activity, ActivityEstimate, EstimationParams, ImpactEstimation, OfferPrice};
pub use money::Money;
pub use oracle::ImpactOracle;
pub use quick::{QuickConfig, QuickConverter};
pub use report::{ImpactReport, ReportAdapter};
