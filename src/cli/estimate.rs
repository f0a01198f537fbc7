use super::ui;
use crate::core::{
    Activity, ActivityEstimate, EstimationParams, Estimator, ImpactOracle, ImpactReport, Money,
};
use anyhow::{Context, Result};
use comfy_table::Cell;
use serde::Serialize;
use tracing::info;

const ACTIVITIES: [Activity; 5] = [
    Activity::Creation,
    Activity::Hosting,
    Activity::BuyerInvitation,
    Activity::SellerInvitation,
    Activity::Recommendation,
];

/// Everything shown to the user for one report.
#[derive(Debug, Serialize)]
pub struct EstimateSummary {
    pub params: EstimationParams,
    pub breakdown: Vec<ActivityEstimate>,
    pub total: Money,
}

/// Human readable volume behind an activity, `None` when it was not derived.
fn volume(params: &EstimationParams, activity: Activity) -> Option<String> {
    match activity {
        Activity::Creation => params.create.as_ref().map(|p| {
            format!(
                "{} offers x {} sales x {} days",
                p.num_offers, p.num_sales, p.period
            )
        }),
        Activity::Hosting => params
            .host
            .as_ref()
            .map(|p| format!("{} sales x {} days", p.num_offers, p.period)),
        Activity::BuyerInvitation => params.invite_buyer.as_ref().map(|p| {
            format!(
                "{} buyers x {} offers x {} days",
                p.num_invites, p.num_offers, p.period
            )
        }),
        Activity::SellerInvitation => params.invite_seller.as_ref().map(|p| {
            format!(
                "{} sellers x {} offers x {} days",
                p.num_invites, p.num_offers, p.period
            )
        }),
        Activity::Recommendation => params
            .recommend
            .as_ref()
            .map(|p| format!("{} offers x {} days", p.num_offers, p.period)),
    }
}

impl EstimateSummary {
    pub fn display_as_table(&self) -> String {
        let mut table = ui::new_styled_table();

        table.set_header(vec![
            ui::header_cell("Activity"),
            ui::header_cell("Volume"),
            ui::header_cell(&format!("Return ({})", self.total.currency_code())),
        ]);

        for activity in ACTIVITIES {
            let volume_cell = match volume(&self.params, activity) {
                Some(v) => Cell::new(v),
                None => Cell::new(ui::style_text("-", ui::StyleType::Subtle)),
            };
            let amount_cell = self
                .breakdown
                .iter()
                .find(|e| e.activity == activity)
                .map_or_else(ui::na_cell, |e| ui::amount_cell(&e.amount));

            table.add_row(vec![Cell::new(activity.to_string()), volume_cell, amount_cell]);
        }

        let mut output = format!(
            "{}\n\n",
            ui::style_text("Projected yearly return", ui::StyleType::Title)
        );
        output.push_str(&table.to_string());
        output.push_str(&format!(
            "\n\n{}: {}",
            ui::style_text("Total", ui::StyleType::TotalLabel),
            ui::style_text(&self.total.to_string(), ui::StyleType::TotalValue)
        ));
        output
    }
}

/// Estimates the report, keeping the per-activity breakdown next to the total.
pub async fn summarize<O: ImpactOracle>(
    estimator: &Estimator<O>,
    report: &ImpactReport,
) -> Result<EstimateSummary> {
    let params = estimator.params(report).unwrap_or_default();
    let breakdown = estimator.breakdown(&params).await?;
    let total = Money::checked_sum(breakdown.iter().map(|e| &e.amount))
        .context("Projected return exceeds the decimal range")?;
    Ok(EstimateSummary {
        params,
        breakdown,
        total,
    })
}

pub async fn run<O: ImpactOracle>(
    estimator: &Estimator<O>,
    report: &ImpactReport,
    json: bool,
) -> Result<()> {
    info!("Estimating projected return...");
    let summary = summarize(estimator, report).await?;

    if json {
        let output =
            serde_json::to_string_pretty(&summary).context("Failed to serialize estimate")?;
        println!("{output}");
    } else {
        println!("{}", summary.display_as_table());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ReportAdapter;
    use crate::core::config::TableOracleConfig;
    use crate::providers::table::TableOracle;
    use rust_decimal_macros::dec;

    fn estimator() -> Estimator<TableOracle> {
        Estimator::new(
            TableOracle::new(TableOracleConfig::default()),
            ReportAdapter::default(),
        )
    }

    #[tokio::test]
    async fn test_summary_matches_total() {
        let estimator = estimator();
        let report = ImpactReport::quick(100, dec!(10), true);

        let summary = summarize(&estimator, &report).await.unwrap();
        assert_eq!(summary.breakdown.len(), 5);
        assert_eq!(summary.total, estimator.total(&report).await.unwrap());
    }

    #[tokio::test]
    async fn test_table_lists_every_activity() {
        let summary = summarize(&estimator(), &ImpactReport::quick(0, dec!(1), false))
            .await
            .unwrap();
        let output = summary.display_as_table();

        for activity in ACTIVITIES {
            assert!(output.contains(&activity.to_string()), "missing {activity}");
        }
        assert!(output.contains("N/A"));
        assert!(output.contains(&summary.total.to_string()));
    }

    #[tokio::test]
    async fn test_empty_report_summary() {
        let summary = summarize(&estimator(), &ImpactReport::default())
            .await
            .unwrap();
        assert!(summary.breakdown.is_empty());
        assert!(summary.params.is_empty());
        assert_eq!(summary.total, Money::zero());

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["total"]["value"], "0.00");
    }
}
