//! Implements a struct that holds the state of the server.

use std::sync::Arc;

use crate::{CurrencyConverter, store::SharedStore};

/// The state of the server.
///
/// Each endpoint takes the parts it needs through its own state struct that
/// implements `FromRef<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Where expenses and budgets are saved.
    pub store: SharedStore,

    /// Converts foreign amounts to the base currency and caches the rates.
    pub currency_converter: Arc<CurrencyConverter>,
}

impl AppState {
    /// Create a new [AppState] from a record store and a currency converter.
    pub fn new(store: SharedStore, currency_converter: CurrencyConverter) -> Self {
        Self {
            store,
            currency_converter: Arc::new(currency_converter),
        }
    }
}
