//! Currency handling: the supported currencies, exchange rates and conversion
//! of expenses to the base currency.

mod clock;
mod code;
mod converter;
mod endpoint;
mod provider;
mod rates;

pub use clock::{Clock, SystemClock};
pub use code::{BASE_CURRENCY, Currency};
pub use converter::{Conversion, CurrencyConverter, RatesConfig};
pub use endpoint::get_rates_endpoint;
pub use provider::{DEFAULT_RATES_URL, ExchangeRateApi, RateError, RateProvider};
pub use rates::RateTable;
