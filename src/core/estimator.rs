//! Aggregates per-activity oracle estimates into a projected return

use crate::core::model::{
    Activity, ActivityEstimate, BuyerInvitationParams, CreationParams, EstimationParams,
    HostParams, ImpactEstimation, RecommendParams, SellerInvitationParams,
};
use crate::core::money::Money;
use crate::core::oracle::ImpactOracle;
use crate::core::report::{ImpactReport, ReportAdapter};
use anyhow::{Context, Result, anyhow};
use futures::future::{BoxFuture, FutureExt, try_join_all};
use rust_decimal::Decimal;
use tracing::debug;

pub struct Estimator<O: ImpactOracle> {
    oracle: O,
    adapter: ReportAdapter,
}

/// Product of the counts describing an activity.
fn volume(counts: &[u64]) -> Result<Decimal> {
    counts
        .iter()
        .try_fold(Decimal::ONE, |product, &count| {
            product.checked_mul(Decimal::from(count))
        })
        .context("Activity volume exceeds the decimal range")
}

/// Scales an activity volume by the commission we keep, relative to the
/// commission the oracle priced its estimation with.
fn scaling_factor(
    volume: Decimal,
    commission: Decimal,
    estimation: &ImpactEstimation,
) -> Result<Decimal> {
    let rel = match estimation.price.rel_commission {
        Some(rel) if !rel.is_zero() => rel,
        Some(_) => return Err(anyhow!("Oracle returned a zero relative commission")),
        None => {
            return Err(anyhow!(
                "Oracle returned an offer price without relative commission"
            ));
        }
    };
    volume
        .checked_mul(commission)
        .and_then(|scaled| scaled.checked_div(rel))
        .context("Activity multiplier exceeds the decimal range")
}

impl<O: ImpactOracle> Estimator<O> {
    pub fn new(oracle: O, adapter: ReportAdapter) -> Self {
        Self { oracle, adapter }
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Detailed parameters the report maps to, if any.
    pub fn params(&self, report: &ImpactReport) -> Option<EstimationParams> {
        self.adapter.parse(report)
    }

    /// Projected return of everything the report describes.
    pub async fn total(&self, report: &ImpactReport) -> Result<Money> {
        match self.params(report) {
            Some(params) => self.estimate(&params).await,
            None => {
                debug!("Report has no parameters to estimate");
                Ok(Money::zero())
            }
        }
    }

    /// Sum of all activity estimates, `0.00` when no activity is present.
    pub async fn estimate(&self, params: &EstimationParams) -> Result<Money> {
        let breakdown = self.breakdown(params).await?;
        Money::checked_sum(breakdown.iter().map(|e| &e.amount))
            .context("Projected return exceeds the decimal range")
    }

    /// Estimates every present activity concurrently.
    ///
    /// Fails as soon as any oracle call fails or an amount leaves the decimal
    /// range. Activities with a negative multiplier are left out of the result.
    pub async fn breakdown(&self, params: &EstimationParams) -> Result<Vec<ActivityEstimate>> {
        let mut pending: Vec<BoxFuture<'_, Result<Option<ActivityEstimate>>>> = Vec::new();

        if let Some(p) = &params.create {
            pending.push(self.create(p).boxed());
        }
        if let Some(p) = &params.host {
            pending.push(self.host(p).boxed());
        }
        if let Some(p) = &params.invite_buyer {
            pending.push(self.invite_buyer(p).boxed());
        }
        if let Some(p) = &params.invite_seller {
            pending.push(self.invite_seller(p).boxed());
        }
        if let Some(p) = &params.recommend {
            pending.push(self.recommend(p).boxed());
        }

        debug!(activities = pending.len(), "Requesting oracle estimates");
        let estimates = try_join_all(pending).await?;
        Ok(estimates.into_iter().flatten().collect())
    }

    async fn create(&self, params: &CreationParams) -> Result<Option<ActivityEstimate>> {
        let estimation = self
            .oracle
            .estimate(&params.offer_price, params.num_sellers)
            .await?;
        let multiplier = scaling_factor(
            volume(&[params.num_offers, params.num_sales, params.period])?,
            params.commission,
            &estimation,
        )?;
        activity(
            Activity::Creation,
            multiplier,
            estimation.create_offer.scale(multiplier),
        )
    }

    async fn host(&self, params: &HostParams) -> Result<Option<ActivityEstimate>> {
        let estimation = self.oracle.estimate(&params.offer_price, 0).await?;
        let multiplier = scaling_factor(
            volume(&[params.num_offers, params.period])?,
            params.commission,
            &estimation,
        )?;
        activity(
            Activity::Hosting,
            multiplier,
            estimation.recommend_offer.scale(multiplier),
        )
    }

    async fn invite_buyer(
        &self,
        params: &BuyerInvitationParams,
    ) -> Result<Option<ActivityEstimate>> {
        let estimation = self
            .oracle
            .estimate(&params.offer_price, params.num_sellers)
            .await?;
        let multiplier = scaling_factor(
            volume(&[params.num_invites, params.num_offers, params.period])?,
            params.commission,
            &estimation,
        )?;
        activity(
            Activity::BuyerInvitation,
            multiplier,
            estimation.invite_buyer.scale(multiplier),
        )
    }

    async fn invite_seller(
        &self,
        params: &SellerInvitationParams,
    ) -> Result<Option<ActivityEstimate>> {
        // The invited sellers are the seller population the oracle prices for
        let estimation = self
            .oracle
            .estimate(&params.offer_price, params.num_invites)
            .await?;
        let multiplier = scaling_factor(
            volume(&[params.num_invites, params.num_offers, params.period])?,
            params.commission,
            &estimation,
        )?;
        let amount = estimation
            .invite_seller
            .scale(multiplier)
            .zip(estimation.bonus.scale(multiplier))
            .and_then(|(main, bonus)| Money::checked_sum([&main, &bonus]));
        activity(Activity::SellerInvitation, multiplier, amount)
    }

    async fn recommend(&self, params: &RecommendParams) -> Result<Option<ActivityEstimate>> {
        let estimation = self
            .oracle
            .estimate(&params.offer_price, params.num_sellers)
            .await?;
        let multiplier = scaling_factor(
            volume(&[params.num_offers, params.period])?,
            params.commission,
            &estimation,
        )?;
        activity(
            Activity::Recommendation,
            multiplier,
            estimation.recommend_offer.scale(multiplier),
        )
    }
}

fn activity(
    activity: Activity,
    multiplier: Decimal,
    amount: Option<Money>,
) -> Result<Option<ActivityEstimate>> {
    match amount {
        Some(amount) => {
            debug!(%activity, %multiplier, %amount, "Estimated activity");
            Ok(Some(ActivityEstimate { activity, amount }))
        }
        None if multiplier < Decimal::ZERO => {
            debug!(%activity, %multiplier, "Activity contributes nothing");
            Ok(None)
        }
        None => Err(anyhow!("{activity} estimate exceeds the decimal range")),
    }
}
