//! Conversion of amounts into the base currency using cached exchange rates.

use std::{
    sync::{Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use time::OffsetDateTime;

use crate::currency::{
    BASE_CURRENCY, Clock, DEFAULT_RATES_URL, ExchangeRateApi, RateError, RateProvider, RateTable,
    SystemClock,
};

/// Settings for fetching and caching exchange rates.
#[derive(Debug, Clone, PartialEq)]
pub struct RatesConfig {
    /// The URL of the exchange rate provider.
    pub url: String,
    /// How long to wait for the provider before using the fallback rates.
    pub timeout: Duration,
    /// How long fetched rates are reused before they are fetched again.
    pub refresh_interval: Duration,
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_RATES_URL.to_owned(),
            timeout: Duration::from_secs(10),
            refresh_interval: Duration::from_secs(60 * 60),
        }
    }
}

/// The result of converting an amount to the base currency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conversion {
    /// The converted amount rounded to two decimal places.
    pub amount: f64,
    /// The number of base currency units per one unit of the original currency.
    pub rate: f64,
}

#[derive(Debug)]
struct CachedRates {
    table: RateTable,
    fetched_at: OffsetDateTime,
}

/// Converts amounts to the base currency.
///
/// Rates fetched from the provider are cached until they are older than the
/// refresh interval. When the provider cannot be reached the static fallback
/// rates are used and the cache is left as it was, so the next conversion
/// tries the provider again.
#[derive(Debug)]
pub struct CurrencyConverter {
    provider: Box<dyn RateProvider>,
    clock: Box<dyn Clock>,
    refresh_interval: Duration,
    cache: Mutex<Option<CachedRates>>,
}

impl CurrencyConverter {
    /// Create a converter with an empty cache.
    pub fn new(
        provider: impl RateProvider + 'static,
        clock: impl Clock + 'static,
        refresh_interval: Duration,
    ) -> Self {
        Self {
            provider: Box::new(provider),
            clock: Box::new(clock),
            refresh_interval,
            cache: Mutex::new(None),
        }
    }

    /// Create a converter that fetches rates over HTTP as described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client could not be built.
    pub fn from_config(config: &RatesConfig) -> Result<Self, RateError> {
        let provider = ExchangeRateApi::new(&config.url, config.timeout)?;

        Ok(Self::new(provider, SystemClock, config.refresh_interval))
    }

    /// Convert `amount` in the currency with the code `currency` to the base currency.
    ///
    /// Amounts already in the base currency are returned unchanged with a rate
    /// of 1.0 and no rate lookup. Currencies without a live or fallback rate
    /// are converted with a rate of 1.0.
    pub async fn convert(&self, amount: f64, currency: &str) -> Conversion {
        if currency == BASE_CURRENCY.code() {
            return Conversion { amount, rate: 1.0 };
        }

        let rate = self.rate_table().await.rate_for(currency);

        Conversion {
            amount: round_to_cents(amount * rate),
            rate,
        }
    }

    /// The current rate table, from the cache if it is fresh, otherwise from
    /// the provider, or the fallback table if the provider fails.
    pub async fn rate_table(&self) -> RateTable {
        let now = self.clock.now();

        if let Some(table) = self.cached_table(now) {
            return table;
        }

        match self.provider.fetch_quotes().await {
            Ok(quotes) => {
                let table = RateTable::from_base_quotes(&quotes);
                *self.lock_cache() = Some(CachedRates {
                    table: table.clone(),
                    fetched_at: now,
                });
                tracing::info!("Refreshed exchange rates");

                table
            }
            Err(error) => {
                tracing::warn!("Could not fetch exchange rates, using fallback rates: {error}");

                RateTable::fallback()
            }
        }
    }

    fn cached_table(&self, now: OffsetDateTime) -> Option<RateTable> {
        self.lock_cache()
            .as_ref()
            .filter(|cached| now - cached.fetched_at < self.refresh_interval)
            .map(|cached| cached.table.clone())
    }

    fn lock_cache(&self) -> MutexGuard<'_, Option<CachedRates>> {
        // The cache is replaced in one assignment, so a poisoned lock still holds a whole table.
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Round `amount` to two decimal places.
///
/// Amounts too large to scale to cents already have no fractional part and
/// are returned unchanged.
pub fn round_to_cents(amount: f64) -> f64 {
    let cents = amount * 100.0;

    if cents.is_finite() {
        cents.round() / 100.0
    } else {
        amount
    }
}
