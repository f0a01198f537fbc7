use crate::core::config::TableOracleConfig;
use crate::core::{ImpactEstimation, ImpactOracle, Money, OfferPrice};
use anyhow::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::debug;

/// Serves fixed per-unit returns from configuration, whatever the offer.
pub struct TableOracle {
    config: TableOracleConfig,
}

impl TableOracle {
    pub fn new(config: TableOracleConfig) -> Self {
        Self { config }
    }

    fn money(&self, value: Decimal) -> Money {
        Money::new(
            self.config.currency_code.clone(),
            self.config.currency_symbol.clone(),
            self.config.decimals,
            value,
        )
    }
}

#[async_trait]
impl ImpactOracle for TableOracle {
    async fn estimate(&self, price: &OfferPrice, sellers: u64) -> Result<ImpactEstimation> {
        debug!(sellers, "Serving table estimation");
        let mut price = price.clone();
        if price.rel_commission.is_none() {
            price.rel_commission = Some(self.config.relative_commission);
        }

        Ok(ImpactEstimation {
            price,
            recommend_offer: self.money(self.config.recommend_offer),
            create_offer: self.money(self.config.create_offer),
            invite_buyer: self.money(self.config.invite_buyer),
            invite_seller: self.money(self.config.invite_seller),
            bonus: self.money(self.config.bonus),
        })
    }
}
