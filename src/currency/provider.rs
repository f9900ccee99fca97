//! Fetching live exchange rates from a remote provider.

use std::{collections::HashMap, fmt::Debug, time::Duration};

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// The default provider URL, quoting rates against the base currency.
pub const DEFAULT_RATES_URL: &str = "https://api.exchangerate-api.com/v4/latest/INR";

/// The errors that may occur while fetching exchange rates.
#[derive(Debug, thiserror::Error)]
pub enum RateError {
    /// The request failed, timed out, returned a non-2xx status or a body that
    /// was not the expected JSON.
    #[error("exchange rate request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider answered without any rates.
    #[error("the exchange rate provider returned no rates")]
    EmptyRates,
}

/// A source of live exchange rates.
#[async_trait]
pub trait RateProvider: Debug + Send + Sync {
    /// Fetch the latest quotes, keyed by currency code and expressed as
    /// foreign currency units per one base currency unit.
    async fn fetch_quotes(&self) -> Result<HashMap<String, f64>, RateError>;
}

/// Fetches rates from an API that answers `GET <url>` with `{"rates": {"USD": 0.012, ...}}`,
/// such as <https://www.exchangerate-api.com>.
#[derive(Debug, Clone)]
pub struct ExchangeRateApi {
    client: Client,
    url: String,
}

#[derive(Debug, Deserialize)]
struct LatestRates {
    rates: HashMap<String, f64>,
}

impl ExchangeRateApi {
    /// Create a provider for `url` where each request is abandoned after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client could not be built.
    pub fn new(url: &str, timeout: Duration) -> Result<Self, RateError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            url: url.to_owned(),
        })
    }
}

#[async_trait]
impl RateProvider for ExchangeRateApi {
    async fn fetch_quotes(&self) -> Result<HashMap<String, f64>, RateError> {
        let latest = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json::<LatestRates>()
            .await?;

        if latest.rates.is_empty() {
            return Err(RateError::EmptyRates);
        }

        tracing::debug!("Fetched {} exchange rates from {}", latest.rates.len(), self.url);

        Ok(latest.rates)
    }
}
