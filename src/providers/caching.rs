use crate::core::cache::Cache;
use crate::core::{ImpactEstimation, ImpactOracle, OfferPrice};
use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;

/// Memoizes successful estimations per offer and seller count. Failures are
/// passed through and asked again next time.
pub struct CachingOracle<T: ImpactOracle> {
    inner: T,
    cache: Cache<String, ImpactEstimation>,
}

impl<T: ImpactOracle> CachingOracle<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            cache: Cache::new(),
        }
    }

    pub fn cache(&self) -> &Cache<String, ImpactEstimation> {
        &self.cache
    }

    fn key(price: &OfferPrice, sellers: u64) -> Result<String> {
        let price = serde_json::to_string(price).context("Failed to serialize offer price")?;
        Ok(format!("{price}:{sellers}"))
    }
}

#[async_trait]
impl<T: ImpactOracle> ImpactOracle for CachingOracle<T> {
    async fn estimate(&self, price: &OfferPrice, sellers: u64) -> Result<ImpactEstimation> {
        let key = Self::key(price, sellers)?;
        if let Some(cached) = self.cache.get(&key).await {
            debug!(sellers, "Cache hit for estimation");
            return Ok(cached);
        }
        debug!(sellers, "Cache miss for estimation");
        let estimation = self.inner.estimate(price, sellers).await?;
        self.cache.put(key, estimation.clone()).await;
        Ok(estimation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::TableOracleConfig;
    use crate::core::{Estimator, ImpactReport, QuickConfig, ReportAdapter};
    use crate::providers::table::TableOracle;
    use anyhow::anyhow;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockInnerOracle {
        call_count: AtomicUsize,
        table: TableOracle,
    }

    impl MockInnerOracle {
        fn new() -> Self {
            Self {
                call_count: AtomicUsize::new(0),
                table: TableOracle::new(TableOracleConfig::default()),
            }
        }
    }

    #[async_trait]
    impl<'a> ImpactOracle for &'a MockInnerOracle {
        async fn estimate(&self, price: &OfferPrice, sellers: u64) -> Result<ImpactEstimation> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            if sellers == 99 {
                return Err(anyhow!("Unknown seller population"));
            }
            self.table.estimate(price, sellers).await
        }
    }

    #[tokio::test]
    async fn test_caching_oracle() {
        let inner = MockInnerOracle::new();
        let caching = CachingOracle::new(&inner);
        let offer = QuickConfig::default().offer_price;

        // First call - should hit inner oracle
        let first = caching.estimate(&offer, 7).await.unwrap();
        assert_eq!(inner.call_count.load(Ordering::SeqCst), 1);

        // Second call - should be cached
        let second = caching.estimate(&offer, 7).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(inner.call_count.load(Ordering::SeqCst), 1);

        // Different seller count is a different entry
        caching.estimate(&offer, 0).await.unwrap();
        assert_eq!(inner.call_count.load(Ordering::SeqCst), 2);

        // Different offer is a different entry
        let pricier = OfferPrice {
            msrp: crate::core::Money::from_decimal(dec!(9)),
            ..offer.clone()
        };
        caching.estimate(&pricier, 7).await.unwrap();
        assert_eq!(inner.call_count.load(Ordering::SeqCst), 3);
        assert_eq!(caching.cache().len().await, 3);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let inner = MockInnerOracle::new();
        let caching = CachingOracle::new(&inner);
        let offer = QuickConfig::default().offer_price;

        assert!(caching.estimate(&offer, 99).await.is_err());
        assert!(caching.estimate(&offer, 99).await.is_err());
        assert_eq!(inner.call_count.load(Ordering::SeqCst), 2);
        assert!(caching.cache().is_empty().await);
    }

    #[tokio::test]
    async fn test_shared_seller_counts_reuse_estimations() {
        let inner = MockInnerOracle::new();
        let estimator = Estimator::new(CachingOracle::new(&inner), ReportAdapter::default());

        // Five activities, but only two distinct seller counts: 0 and 7
        let total = estimator
            .total(&ImpactReport::quick(100, dec!(10), true))
            .await
            .unwrap();
        assert!(total.value() > rust_decimal::Decimal::ZERO);
        assert!(inner.call_count.load(Ordering::SeqCst) >= 2);
        assert_eq!(estimator_cache_len(&estimator).await, 2);
    }

    async fn estimator_cache_len(estimator: &Estimator<CachingOracle<&MockInnerOracle>>) -> usize {
        estimator.oracle().cache().len().await
    }
}
