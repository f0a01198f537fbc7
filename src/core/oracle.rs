//! Price oracle abstraction

use crate::core::model::{ImpactEstimation, OfferPrice};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Estimates the per-unit return of every activity for one offer, given the
/// size of the seller population.
#[async_trait]
pub trait ImpactOracle: Send + Sync {
    async fn estimate(&self, price: &OfferPrice, sellers: u64) -> Result<ImpactEstimation>;
}

#[async_trait]
impl<T: ImpactOracle + ?Sized> ImpactOracle for Box<T> {
    async fn estimate(&self, price: &OfferPrice, sellers: u64) -> Result<ImpactEstimation> {
        (**self).estimate(price, sellers).await
    }
}

#[async_trait]
impl<T: ImpactOracle + ?Sized> ImpactOracle for Arc<T> {
    async fn estimate(&self, price: &OfferPrice, sellers: u64) -> Result<ImpactEstimation> {
        (**self).estimate(price, sellers).await
    }
}
