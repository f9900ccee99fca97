//! The currencies that expenses may be recorded in.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// A supported currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Currency {
    /// Indian rupee.
    #[serde(rename = "INR")]
    Inr,
    /// United States dollar.
    #[serde(rename = "USD")]
    Usd,
    /// British pound.
    #[serde(rename = "GBP")]
    Gbp,
    /// Thai baht.
    #[serde(rename = "THB")]
    Thb,
}

/// The currency that all aggregation and budget comparison happens in.
pub const BASE_CURRENCY: Currency = Currency::Inr;

impl Currency {
    /// Every supported currency, base currency first.
    pub const ALL: [Currency; 4] = [Currency::Inr, Currency::Usd, Currency::Gbp, Currency::Thb];

    /// The ISO 4217 code, e.g. "USD".
    pub fn code(self) -> &'static str {
        match self {
            Currency::Inr => "INR",
            Currency::Usd => "USD",
            Currency::Gbp => "GBP",
            Currency::Thb => "THB",
        }
    }

    /// The symbol shown in front of amounts, e.g. "$".
    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Inr => "₹",
            Currency::Usd => "$",
            Currency::Gbp => "£",
            Currency::Thb => "฿",
        }
    }

    /// Whether this is the [BASE_CURRENCY].
    pub fn is_base(self) -> bool {
        self == BASE_CURRENCY
    }

    /// Format `amount` with the currency symbol and two decimal places, e.g. "£12.50".
    pub fn format(self, amount: f64) -> String {
        format!("{}{:.2}", self.symbol(), amount)
    }
}

impl FromStr for Currency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();

        Currency::ALL
            .into_iter()
            .find(|currency| currency.code() == code)
            .ok_or_else(|| Error::UnsupportedCurrency(s.to_owned()))
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
