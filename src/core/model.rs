//! Offer economics, per-activity parameter records and oracle results

use crate::core::money::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Economics of one reference offer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferPrice {
    pub cost: Money,
    pub msrp: Money,
    #[serde(default)]
    pub tax_rate: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abs_commission: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rel_commission: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreationParams {
    pub offer_price: OfferPrice,
    pub num_offers: u64,
    pub commission: Decimal,
    pub num_sales: u64,
    pub period: u64,
    pub num_sellers: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostParams {
    pub offer_price: OfferPrice,
    pub num_offers: u64,
    pub commission: Decimal,
    pub period: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyerInvitationParams {
    pub num_invites: u64,
    pub offer_price: OfferPrice,
    pub num_offers: u64,
    pub commission: Decimal,
    pub period: u64,
    pub num_sellers: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerInvitationParams {
    pub num_invites: u64,
    pub offer_price: OfferPrice,
    pub num_offers: u64,
    pub commission: Decimal,
    pub period: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendParams {
    pub offer_price: OfferPrice,
    pub num_offers: u64,
    pub commission: Decimal,
    pub period: u64,
    pub num_sellers: u64,
}

/// The detailed parameters: one slot per activity, `None` when the activity
/// has no volume and should not be estimated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimationParams {
    pub create: Option<CreationParams>,
    pub host: Option<HostParams>,
    pub invite_buyer: Option<BuyerInvitationParams>,
    pub invite_seller: Option<SellerInvitationParams>,
    pub recommend: Option<RecommendParams>,
}

impl EstimationParams {
    pub fn is_empty(&self) -> bool {
        self.create.is_none()
            && self.host.is_none()
            && self.invite_buyer.is_none()
            && self.invite_seller.is_none()
            && self.recommend.is_none()
    }
}

/// Per-unit estimates returned by a price oracle for one offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactEstimation {
    pub price: OfferPrice,
    pub recommend_offer: Money,
    pub create_offer: Money,
    pub invite_buyer: Money,
    pub invite_seller: Money,
    pub bonus: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Activity {
    Creation,
    Hosting,
    BuyerInvitation,
    SellerInvitation,
    Recommendation,
}

impl Display for Activity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Activity::Creation => "Offer creation",
                Activity::Hosting => "Hosting",
                Activity::BuyerInvitation => "Buyer invitations",
                Activity::SellerInvitation => "Seller invitations",
                Activity::Recommendation => "Recommendations",
            }
        )
    }
}

/// The projected return of a single activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEstimate {
    pub activity: Activity,
    pub amount: Money,
}
