//! Tables of exchange rates into the base currency.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::currency::{BASE_CURRENCY, Currency};

/// Approximate rates used when live rates are unavailable, as base currency
/// units per one unit of each currency.
const FALLBACK_RATES: [(Currency, f64); 4] = [
    (Currency::Inr, 1.0),
    (Currency::Usd, 83.0),
    (Currency::Gbp, 105.0),
    (Currency::Thb, 2.4),
];

/// Maps a currency code to the number of base currency units per one unit of
/// that currency.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RateTable(BTreeMap<String, f64>);

impl RateTable {
    /// The static table of approximate rates.
    pub fn fallback() -> Self {
        Self(
            FALLBACK_RATES
                .iter()
                .map(|(currency, rate)| (currency.code().to_owned(), *rate))
                .collect(),
        )
    }

    /// Build a table from provider quotes.
    ///
    /// `quotes` are expressed as foreign units per one base unit, so each
    /// supported currency's quote is inverted. Quotes that are missing or not
    /// positive are left out and unsupported currencies are ignored.
    pub fn from_base_quotes(quotes: &HashMap<String, f64>) -> Self {
        let mut rates = BTreeMap::from([(BASE_CURRENCY.code().to_owned(), 1.0)]);

        for currency in Currency::ALL.into_iter().filter(|c| !c.is_base()) {
            match quotes.get(currency.code()) {
                Some(&quote) if quote > 0.0 && quote.is_finite() => {
                    rates.insert(currency.code().to_owned(), 1.0 / quote);
                }
                _ => tracing::warn!("Exchange rate provider has no usable quote for {currency}"),
            }
        }

        Self(rates)
    }

    /// The rate for `code`, if the table has one.
    pub fn get(&self, code: &str) -> Option<f64> {
        self.0.get(code).copied()
    }

    /// The rate for `code`, falling back to the static rate and then to 1.0
    /// for currencies that neither table knows about.
    pub fn rate_for(&self, code: &str) -> f64 {
        self.get(code)
            .or_else(|| fallback_rate(code))
            .unwrap_or(1.0)
    }
}

fn fallback_rate(code: &str) -> Option<f64> {
    FALLBACK_RATES
        .iter()
        .find(|(currency, _)| currency.code() == code)
        .map(|(_, rate)| *rate)
}
