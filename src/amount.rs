//! Validated monetary amounts for expenses and budgets.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// A finite monetary amount that is zero or greater.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Amount(f64);

impl Amount {
    /// Create an amount.
    ///
    /// # Errors
    ///
    /// Returns an [Error::InvalidAmount] if `value` is negative, infinite or NaN.
    pub fn new(value: f64) -> Result<Self, Error> {
        if value.is_finite() && value >= 0.0 {
            Ok(Self(value))
        } else {
            Err(Error::InvalidAmount(value.to_string()))
        }
    }

    /// Create an amount without validation.
    ///
    /// The caller should ensure that `value` is finite and not negative.
    pub fn new_unchecked(value: f64) -> Self {
        Self(value)
    }

    /// The amount as a float.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl FromStr for Amount {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<f64>()
            .map_err(|_| Error::InvalidAmount(s.to_owned()))?;

        Amount::new(value).map_err(|_| Error::InvalidAmount(s.to_owned()))
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// An amount as submitted by a client, either a JSON number or a string.
///
/// HTML forms submit every value as a string, so both must be accepted.
/// Call [AmountInput::parse] to validate it before touching the store.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    /// A JSON number, e.g. `12.5`.
    Number(f64),
    /// A string that should contain a number, e.g. `"12.5"`.
    Text(String),
}

impl AmountInput {
    /// Validate the input as an [Amount].
    ///
    /// # Errors
    ///
    /// Returns an [Error::InvalidAmount] if the input is not a finite,
    /// non-negative number.
    pub fn parse(&self) -> Result<Amount, Error> {
        match self {
            AmountInput::Number(value) => Amount::new(*value),
            AmountInput::Text(text) => text.parse(),
        }
    }
}

#[cfg(test)]
mod amount_tests {
    use crate::{Amount, AmountInput, Error};

    #[test]
    fn new_fails_on_negative_amount() {
        assert_eq!(Amount::new(-0.01), Err(Error::InvalidAmount("-0.01".to_owned())));
    }

    #[test]
    fn new_fails_on_non_finite_amount() {
        assert!(Amount::new(f64::NAN).is_err());
        assert!(Amount::new(f64::INFINITY).is_err());
    }

    #[test]
    fn new_accepts_zero() {
        assert_eq!(Amount::new(0.0).map(Amount::value), Ok(0.0));
    }

    #[test]
    fn parses_numeric_text() {
        let amount = AmountInput::Text(" 12.50 ".to_owned()).parse();

        assert_eq!(amount, Ok(Amount::new_unchecked(12.5)));
    }

    #[test]
    fn rejects_non_numeric_text() {
        let amount = AmountInput::Text("abc".to_owned()).parse();

        assert_eq!(amount, Err(Error::InvalidAmount("abc".to_owned())));
    }

    #[test]
    fn rejects_nan_text() {
        let amount = AmountInput::Text("NaN".to_owned()).parse();

        assert_eq!(amount, Err(Error::InvalidAmount("NaN".to_owned())));
    }

    #[test]
    fn deserializes_numbers_and_strings() {
        let number: AmountInput = serde_json::from_str("42").unwrap();
        let text: AmountInput = serde_json::from_str("\"42\"").unwrap();

        assert_eq!(number, AmountInput::Number(42.0));
        assert_eq!(text, AmountInput::Text("42".to_owned()));
    }
}
