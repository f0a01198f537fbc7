//! Impact reports and their mapping onto the quick converter

use crate::core::model::EstimationParams;
use crate::core::quick::QuickConverter;
use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickReport {
    /// `"yes"` or `"no"`
    pub have_website: String,
    pub num_invites: u64,
    pub num_hours: Decimal,
}

impl QuickReport {
    pub fn new(num_invites: u64, num_hours: Decimal, have_website: bool) -> Self {
        Self {
            have_website: if have_website { "yes" } else { "no" }.to_string(),
            num_invites,
            num_hours,
        }
    }

    pub fn has_website(&self) -> bool {
        self.have_website == "yes"
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactReport {
    pub quick: Option<QuickReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_params: Option<serde_json::Value>,
}

impl ImpactReport {
    pub fn quick(num_invites: u64, num_hours: Decimal, have_website: bool) -> Self {
        Self {
            quick: Some(QuickReport::new(num_invites, num_hours, have_website)),
            state_params: None,
        }
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let report_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read report file: {}", path.as_ref().display()))?;

        let report: Self = serde_json::from_str(&report_str)
            .with_context(|| format!("Failed to parse report file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded report");
        Ok(report)
    }
}

/// Turns reports into detailed estimation parameters.
///
/// Only quick reports are understood; a report without one yields nothing.
#[derive(Debug, Clone, Default)]
pub struct ReportAdapter {
    converter: QuickConverter,
}

impl ReportAdapter {
    pub fn new(converter: QuickConverter) -> Self {
        Self { converter }
    }

    pub fn parse(&self, report: &ImpactReport) -> Option<EstimationParams> {
        let quick = report.quick.as_ref()?;
        Some(
            self.converter
                .convert(quick.num_invites, quick.num_hours, quick.has_website()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;

    #[test]
    fn test_report_deserialization() {
        let json = r#"
        {
            "quick": { "haveWebsite": "yes", "numInvites": 100, "numHours": 1.5 },
            "stateParams": { "step": 3 }
        }"#;
        let report: ImpactReport = serde_json::from_str(json).unwrap();
        let quick = report.quick.as_ref().unwrap();
        assert!(quick.has_website());
        assert_eq!(quick.num_invites, 100);
        assert_eq!(quick.num_hours, dec!(1.5));
        assert!(report.state_params.is_some());
    }

    #[test]
    fn test_website_flag_only_accepts_yes() {
        for (flag, expected) in [("yes", true), ("no", false), ("YES", false), ("", false)] {
            let quick = QuickReport {
                have_website: flag.to_string(),
                num_invites: 0,
                num_hours: Decimal::ZERO,
            };
            assert_eq!(quick.has_website(), expected, "flag {flag:?}");
        }
        assert!(QuickReport::new(1, dec!(1), true).has_website());
        assert!(!QuickReport::new(1, dec!(1), false).has_website());
    }

    #[test]
    fn test_report_without_quick_yields_nothing() {
        let report: ImpactReport = serde_json::from_str("{}").unwrap();
        assert!(ReportAdapter::default().parse(&report).is_none());
    }

    #[test]
    fn test_parse_delegates_to_converter() {
        let report = ImpactReport::quick(1000, dec!(40), true);
        let params = ReportAdapter::default().parse(&report).unwrap();
        assert_eq!(params, QuickConverter::default().convert(1000, dec!(40), true));
        assert!(params.host.is_some());

        let report = ImpactReport::quick(1000, dec!(40), false);
        let params = ReportAdapter::default().parse(&report).unwrap();
        assert!(params.host.is_none());
    }

    #[test]
    fn test_load_from_path() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        write!(
            file,
            r#"{{"quick": {{"haveWebsite": "no", "numInvites": 5, "numHours": 2}}}}"#
        )?;

        let report = ImpactReport::load_from_path(file.path())?;
        assert_eq!(report.quick, Some(QuickReport::new(5, dec!(2), false)));

        let missing = ImpactReport::load_from_path("/nonexistent/report.json");
        assert!(missing.unwrap_err().to_string().contains("Failed to read report file"));
        Ok(())
    }
}
