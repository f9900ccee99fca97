//! Core expense domain types.

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    Amount, AmountInput, Category, Error,
    currency::{BASE_CURRENCY, Conversion, Currency},
};

/// Database identifier for an expense.
pub type ExpenseId = i64;

/// The format of expense dates, e.g. "2025-01-31".
pub(crate) const DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Parse a date in the format YYYY-MM-DD.
///
/// # Errors
///
/// Returns an [Error::InvalidDate] if `text` is not a valid date in that format.
pub(crate) fn parse_date(text: &str) -> Result<Date, Error> {
    Date::parse(text.trim(), DATE_FORMAT).map_err(|_| Error::InvalidDate(text.to_owned()))
}

/// An expense that has been saved to the store.
///
/// `amount` is always in the base currency. The amount and currency that the
/// user entered are kept along with the rate that was used to convert them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expense {
    /// The ID assigned by the store.
    pub id: ExpenseId,
    /// The day the money was spent.
    #[serde(with = "iso_date")]
    pub date: Date,
    /// What the money was spent on.
    pub category: Category,
    /// The amount in the base currency, rounded to two decimal places.
    pub amount: f64,
    /// The amount as entered, in `original_currency`.
    pub original_amount: f64,
    /// The currency the expense was entered in.
    pub original_currency: Currency,
    /// Base currency units per one unit of `original_currency`.
    pub exchange_rate: f64,
    /// When the expense was saved.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// An expense that has been validated and converted, but not yet saved.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    /// The day the money was spent.
    pub date: Date,
    /// What the money was spent on.
    pub category: Category,
    /// The amount in the base currency.
    pub amount: f64,
    /// The amount as entered.
    pub original_amount: f64,
    /// The currency the expense was entered in.
    pub original_currency: Currency,
    /// Base currency units per one unit of `original_currency`.
    pub exchange_rate: f64,
}

impl NewExpense {
    /// Create an expense from an amount entered in `currency` and the result
    /// of converting it to the base currency.
    pub fn new(
        date: Date,
        category: Category,
        original_amount: Amount,
        currency: Currency,
        conversion: Conversion,
    ) -> Self {
        Self {
            date,
            category,
            amount: conversion.amount,
            original_amount: original_amount.value(),
            original_currency: currency,
            exchange_rate: conversion.rate,
        }
    }

    /// Create an expense entered in the base currency.
    pub fn in_base_currency(date: Date, category: Category, amount: Amount) -> Self {
        Self::new(
            date,
            category,
            amount,
            BASE_CURRENCY,
            Conversion {
                amount: amount.value(),
                rate: 1.0,
            },
        )
    }

    /// Attach the ID and creation time assigned by the store.
    pub fn into_expense(self, id: ExpenseId, created_at: OffsetDateTime) -> Expense {
        Expense {
            id,
            date: self.date,
            category: self.category,
            amount: self.amount,
            original_amount: self.original_amount,
            original_currency: self.original_currency,
            exchange_rate: self.exchange_rate,
            created_at,
        }
    }
}

/// The JSON body for creating an expense.
#[derive(Debug, Clone, Deserialize)]
pub struct ExpenseForm {
    /// The date formatted as YYYY-MM-DD.
    pub date: String,
    /// The category label.
    pub category: String,
    /// The amount in `currency`.
    pub amount: AmountInput,
    /// The currency code, the base currency if omitted or empty.
    #[serde(default)]
    pub currency: Option<String>,
}

/// An [ExpenseForm] that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedExpense {
    pub date: Date,
    pub category: Category,
    pub amount: Amount,
    pub currency: Currency,
}

impl ExpenseForm {
    /// Check every field of the form.
    ///
    /// # Errors
    ///
    /// Returns the first validation error found: an invalid date, an empty
    /// category, an invalid amount or an unsupported currency.
    pub fn validate(&self) -> Result<ValidatedExpense, Error> {
        let date = parse_date(&self.date)?;
        let category = Category::new(&self.category)?;
        let amount = self.amount.parse()?;
        let currency = match self.currency.as_deref().map(str::trim) {
            None | Some("") => BASE_CURRENCY,
            Some(code) => code.parse()?,
        };

        Ok(ValidatedExpense {
            date,
            category,
            amount,
            currency,
        })
    }
}

#[cfg(test)]
mod expense_form_tests {
    use time::macros::date;

    use crate::{
        Amount, AmountInput, Category, Currency, Error,
        expense::domain::{ExpenseForm, ValidatedExpense},
    };

    fn form(amount: AmountInput, currency: Option<&str>) -> ExpenseForm {
        ExpenseForm {
            date: "2025-01-31".to_owned(),
            category: "Food".to_owned(),
            amount,
            currency: currency.map(str::to_owned),
        }
    }

    #[test]
    fn validates_complete_form() {
        let validated = form(AmountInput::Number(12.5), Some("usd")).validate();

        assert_eq!(
            validated,
            Ok(ValidatedExpense {
                date: date!(2025 - 01 - 31),
                category: Category::new_unchecked("Food"),
                amount: Amount::new_unchecked(12.5),
                currency: Currency::Usd,
            })
        );
    }

    #[test]
    fn missing_currency_defaults_to_base_currency() {
        let without = form(AmountInput::Number(1.0), None).validate().unwrap();
        let empty = form(AmountInput::Number(1.0), Some("")).validate().unwrap();

        assert_eq!(without.currency, Currency::Inr);
        assert_eq!(empty.currency, Currency::Inr);
    }

    #[test]
    fn rejects_invalid_date() {
        let mut form = form(AmountInput::Number(1.0), None);
        form.date = "31/01/2025".to_owned();

        assert_eq!(
            form.validate(),
            Err(Error::InvalidDate("31/01/2025".to_owned()))
        );
    }

    #[test]
    fn rejects_non_numeric_amount() {
        let validated = form(AmountInput::Text("abc".to_owned()), None).validate();

        assert_eq!(validated, Err(Error::InvalidAmount("abc".to_owned())));
    }

    #[test]
    fn rejects_unsupported_currency() {
        let validated = form(AmountInput::Number(1.0), Some("EUR")).validate();

        assert_eq!(validated, Err(Error::UnsupportedCurrency("EUR".to_owned())));
    }
}
