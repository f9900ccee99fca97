//! Endpoint for reading the exchange rates currently in use.

use std::sync::Arc;

use axum::{
    Json,
    extract::{FromRef, State},
};
use serde::Serialize;

use crate::{
    AppState,
    currency::{BASE_CURRENCY, Currency, CurrencyConverter, RateTable},
};

/// The state needed for reading exchange rates.
#[derive(Debug, Clone)]
pub struct RatesState {
    /// Holds the cached rates.
    pub currency_converter: Arc<CurrencyConverter>,
}

impl FromRef<AppState> for RatesState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            currency_converter: state.currency_converter.clone(),
        }
    }
}

/// The body of the response to `GET /api/rates`.
#[derive(Debug, Serialize)]
pub struct RatesResponse {
    /// The currency that every rate converts to.
    pub base: Currency,
    /// Base currency units per one unit of each currency.
    pub rates: RateTable,
}

/// Get the current rate table, fetching it first if the cache is stale.
pub async fn get_rates_endpoint(State(state): State<RatesState>) -> Json<RatesResponse> {
    let rates = state.currency_converter.rate_table().await;

    Json(RatesResponse {
        base: BASE_CURRENCY,
        rates,
    })
}
