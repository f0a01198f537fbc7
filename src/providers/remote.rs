use super::util::with_retry;
use crate::core::config::RemoteOracleConfig;
use crate::core::{ImpactEstimation, ImpactOracle, OfferPrice};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, error};

#[derive(Debug, Serialize)]
struct EstimationRequest<'a> {
    price: &'a OfferPrice,
    sellers: u64,
}

/// Asks an HTTP pricing service for estimations.
///
/// Sends `POST {base_url}/estimate` with the offer price and seller count and
/// expects an `ImpactEstimation` JSON body back.
pub struct RemoteOracle {
    config: RemoteOracleConfig,
    client: reqwest::Client,
}

impl RemoteOracle {
    pub fn new(config: RemoteOracleConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn url(&self) -> String {
        format!("{}/estimate", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ImpactOracle for RemoteOracle {
    async fn estimate(&self, price: &OfferPrice, sellers: u64) -> Result<ImpactEstimation> {
        let url = self.url();
        let request = EstimationRequest { price, sellers };
        debug!("Requesting estimation from {} for {} sellers", url, sellers);

        let response = with_retry(
            || async { self.client.post(&url).json(&request).send().await },
            self.config.retries,
            self.config.retry_delay_ms,
        )
        .await
        .with_context(|| format!("Failed to send estimation request to {url}"))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .context("Failed to get estimation response text")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Estimation request failed with status {}: {}",
                status,
                response_text
            ));
        }
        if response_text.trim().is_empty() {
            return Err(anyhow!("Received empty estimation response from {}", url));
        }

        match serde_json::from_str::<ImpactEstimation>(&response_text) {
            Ok(estimation) => Ok(estimation),
            Err(e) => {
                error!(
                    error = ?e,
                    response = %response_text,
                    "Failed to parse estimation response"
                );
                Err(e).context("Failed to parse estimation response")
            }
        }
    }
}
