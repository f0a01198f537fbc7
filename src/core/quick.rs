//! Converts quick estimation inputs into detailed per-activity parameters

use crate::core::model::{
    BuyerInvitationParams, CreationParams, EstimationParams, HostParams, OfferPrice,
    RecommendParams, SellerInvitationParams,
};
use crate::core::money::Money;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Expected sales per unit of activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalesConfig {
    /// Offers bought by each invited buyer
    pub buyer: u64,
    /// Daily sales of each created offer
    pub creation: u64,
    /// Fraction of invitations turning into hosted sales
    pub host: Decimal,
}

impl Default for SalesConfig {
    fn default() -> Self {
        Self {
            buyer: 1,
            creation: 1,
            host: dec!(0.03),
        }
    }
}

/// How the daily time budget is shared between activities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimePercentage {
    pub creation: Decimal,
    pub invitation: Decimal,
    pub recommendation: Decimal,
}

impl Default for TimePercentage {
    fn default() -> Self {
        Self {
            creation: dec!(0.60),
            invitation: dec!(0.35),
            recommendation: dec!(0.05),
        }
    }
}

/// Fixed assumptions behind a quick estimation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuickConfig {
    /// Days the activity is spread over
    pub period: u64,
    /// Buyers invited for every seller
    pub buyer_seller_ratio: u64,
    pub relative_commission: Decimal,
    pub offer_price: OfferPrice,
    pub sales: SalesConfig,
    pub time_per_creation: Decimal,
    pub time_per_invitation: Decimal,
    pub time_per_recommendation: Decimal,
    pub time_percentage: TimePercentage,
}

impl Default for QuickConfig {
    fn default() -> Self {
        Self {
            period: 365,
            buyer_seller_ratio: 12,
            relative_commission: dec!(0.05),
            offer_price: OfferPrice {
                cost: Money::from_decimal(dec!(7)),
                msrp: Money::from_decimal(dec!(7)),
                tax_rate: Decimal::ZERO,
                abs_commission: None,
                rel_commission: None,
            },
            sales: SalesConfig::default(),
            time_per_creation: dec!(75),
            time_per_invitation: dec!(8),
            time_per_recommendation: dec!(4),
            time_percentage: TimePercentage::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct TimeSplit {
    creation: Decimal,
    invitation: Decimal,
    recommendation: Decimal,
}

/// Whole units of an activity that fit in `time`. Partial units are dropped
/// and counts beyond `u64::MAX` saturate.
fn units(time: Decimal, time_per_unit: Decimal) -> u64 {
    if time <= Decimal::ZERO || time_per_unit <= Decimal::ZERO {
        return 0;
    }
    whole(time.checked_div(time_per_unit).unwrap_or(Decimal::MAX))
}

/// Floors a non-negative quantity into a count, saturating at `u64::MAX`.
fn whole(quantity: Decimal) -> u64 {
    if quantity <= Decimal::ZERO {
        return 0;
    }
    quantity.floor().to_u64().unwrap_or(u64::MAX)
}

/// `value * numerator / denominator` for positive operands, saturating at
/// `Decimal::MAX`.
fn share_of(value: Decimal, numerator: Decimal, denominator: Decimal) -> Decimal {
    value
        .saturating_mul(numerator)
        .checked_div(denominator)
        .unwrap_or(Decimal::MAX)
}

#[derive(Debug, Clone, Default)]
pub struct QuickConverter {
    config: QuickConfig,
}

impl QuickConverter {
    pub fn new(config: QuickConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &QuickConfig {
        &self.config
    }

    /// Derives the five detailed parameter slots from the quick inputs.
    ///
    /// Invitations are capped by the time available for inviting, the rest
    /// of the time budget goes to offer creation and recommendations. Slots
    /// whose volume rounds down to zero are left empty. Time budgets beyond
    /// the decimal range saturate instead of overflowing.
    pub fn convert(&self, num_invites: u64, daily_hours: Decimal, have_website: bool) -> EstimationParams {
        let invitations = self.invitations(num_invites, daily_hours);
        let time = self.time(invitations, daily_hours);
        let sellers = self.sellers(invitations);
        debug!(
            num_invites,
            %daily_hours,
            have_website,
            invitations,
            sellers,
            creation_time = %time.creation,
            invitation_time = %time.invitation,
            recommendation_time = %time.recommendation,
            "Converting quick parameters"
        );

        let create = self.create_offer(time.creation, sellers);
        let offers = create.as_ref().map_or(0, |c| c.num_offers);

        EstimationParams {
            host: self.host(have_website, invitations),
            invite_buyer: self.invite_buyer(invitations, sellers),
            invite_seller: self.invite_seller(sellers, offers),
            recommend: self.recommend_offer(time.recommendation, sellers),
            create,
        }
    }

    fn total_time(&self, daily_hours: Decimal) -> Decimal {
        Decimal::from(self.config.period).saturating_mul(daily_hours)
    }

    fn invitations(&self, num_invites: u64, daily_hours: Decimal) -> u64 {
        let available = self
            .total_time(daily_hours)
            .saturating_mul(self.config.time_percentage.invitation);
        let requested = Decimal::from(num_invites).saturating_mul(self.config.time_per_invitation);
        if requested > available {
            units(available, self.config.time_per_invitation)
        } else {
            num_invites
        }
    }

    fn time(&self, invitations: u64, daily_hours: Decimal) -> TimeSplit {
        let total = self.total_time(daily_hours);
        let invitation = Decimal::from(invitations).saturating_mul(self.config.time_per_invitation);
        let remains = total.saturating_sub(invitation);

        let shares = &self.config.time_percentage;
        let weight = shares.creation + shares.recommendation;
        let (creation, recommendation) = if remains > Decimal::ZERO && weight > Decimal::ZERO {
            (
                share_of(remains, shares.creation, weight),
                share_of(remains, shares.recommendation, weight),
            )
        } else {
            (Decimal::ZERO, Decimal::ZERO)
        };

        TimeSplit {
            creation,
            invitation,
            recommendation,
        }
    }

    fn sellers(&self, invitations: u64) -> u64 {
        invitations / self.config.buyer_seller_ratio.saturating_add(1)
    }

    fn invite_buyer(&self, invitations: u64, sellers: u64) -> Option<BuyerInvitationParams> {
        (invitations > 0).then(|| BuyerInvitationParams {
            num_invites: invitations,
            offer_price: self.config.offer_price.clone(),
            num_offers: self.config.sales.buyer,
            commission: self.config.relative_commission,
            period: self.config.period,
            num_sellers: sellers,
        })
    }

    fn invite_seller(&self, sellers: u64, offers: u64) -> Option<SellerInvitationParams> {
        (sellers > 0).then(|| SellerInvitationParams {
            num_invites: sellers,
            offer_price: self.config.offer_price.clone(),
            num_offers: self.config.sales.creation.saturating_mul(offers) / sellers,
            commission: self.config.relative_commission,
            period: self.config.period,
        })
    }

    fn create_offer(&self, time: Decimal, sellers: u64) -> Option<CreationParams> {
        let quantity = units(time, self.config.time_per_creation);
        (quantity > 0).then(|| CreationParams {
            offer_price: self.config.offer_price.clone(),
            num_offers: quantity,
            commission: self.config.relative_commission,
            num_sales: self.config.sales.creation,
            period: self.config.period,
            num_sellers: sellers,
        })
    }

    fn recommend_offer(&self, time: Decimal, sellers: u64) -> Option<RecommendParams> {
        if time <= Decimal::ZERO {
            return None;
        }
        let quantity = units(time, self.config.time_per_recommendation);
        if quantity == 0 {
            return None;
        }

        // Less than one recommendation a day stays a one-off count
        let (num_offers, period) = if quantity < self.config.period {
            (quantity, 1)
        } else {
            (quantity / self.config.period, self.config.period)
        };

        Some(RecommendParams {
            offer_price: self.config.offer_price.clone(),
            num_offers,
            commission: self.config.relative_commission,
            period,
            num_sellers: sellers,
        })
    }

    fn host(&self, have_website: bool, invitations: u64) -> Option<HostParams> {
        let sales = whole(Decimal::from(invitations).saturating_mul(self.config.sales.host));
        (have_website && sales > 0).then(|| HostParams {
            offer_price: self.config.offer_price.clone(),
            num_offers: sales,
            commission: self.config.relative_commission,
            period: self.config.period,
        })
    }
}
