//! Expense Tracker is a web app for recording expenses and comparing your
//! spending against per-category budgets.
//!
//! Expenses may be entered in any of the supported currencies. They are
//! converted to the base currency (INR) when they are recorded, using
//! exchange rates fetched from a remote provider and cached for an hour.
//!
//! This library provides a JSON API plus an overview page rendered as HTML.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod amount;
mod app_state;
mod budget;
mod category;
mod config;
mod currency;
mod dashboard;
mod endpoints;
mod expense;
mod html;
mod internal_server_error;
mod logging;
mod not_found;
mod report;
mod routing;
mod store;

#[cfg(test)]
mod test_utils;

pub use amount::{Amount, AmountInput};
pub use app_state::AppState;
pub use category::Category;
pub use config::{RatesArgs, StoreArgs};
pub use currency::{
    BASE_CURRENCY, Clock, Conversion, Currency, CurrencyConverter, ExchangeRateApi, RateError,
    RateProvider, RateTable, RatesConfig, SystemClock,
};
pub use dashboard::{BudgetStatus, BudgetSummary, budget_view, calculate_totals};
pub use expense::{Expense, ExpenseId, NewExpense};
pub use logging::logging_middleware;
pub use report::{parse_budget_arg, render_report, run_report};
pub use routing::build_router;
pub use store::{FileStore, RecordStore, SQLiteStore, SharedStore};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The amount of an expense or budget was not a finite, non-negative number.
    #[error("\"{0}\" is not a valid amount, expected a number zero or greater")]
    InvalidAmount(String),

    /// The date of an expense was not formatted as YYYY-MM-DD.
    #[error("\"{0}\" is not a valid date, expected the format YYYY-MM-DD")]
    InvalidDate(String),

    /// An empty string was used as a category.
    #[error("Category cannot be empty")]
    EmptyCategory,

    /// The request body was not valid JSON or was missing a field.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// The currency code is not one of the supported currencies.
    #[error("the currency \"{0}\" is not supported")]
    UnsupportedCurrency(String),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows or when
    /// deleting an expense that does not exist.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The expenses CSV file does not have one of the required columns.
    #[error("missing column {0} in the expenses CSV file")]
    MissingColumn(String),

    /// A row in the expenses CSV file could not be parsed.
    #[error("could not parse the expenses CSV file: {0}")]
    InvalidCsv(String),

    /// A data file could not be read or written.
    #[error("could not access a data file: {0}")]
    Io(String),

    /// The budgets could not be read from or written as JSON.
    #[error("could not read or write JSON: {0}")]
    JSONSerializationError(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the lock on the record store.
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl Error {
    /// Whether the error was caused by invalid input from the client.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidAmount(_)
                | Error::InvalidBody(_)
                | Error::InvalidDate(_)
                | Error::EmptyCategory
                | Error::UnsupportedCurrency(_)
        )
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(value: JsonRejection) -> Self {
        Error::InvalidBody(value.body_text())
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::Io(value.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        match value.kind() {
            csv::ErrorKind::Io(error) => Error::Io(error.to_string()),
            _ => Error::InvalidCsv(value.to_string()),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::JSONSerializationError(value.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            error if error.is_validation_error() => (StatusCode::BAD_REQUEST, error.to_string()),
            Error::NotFound => (StatusCode::NOT_FOUND, Error::NotFound.to_string()),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred, check the server logs for more details."
                        .to_owned(),
                )
            }
        };

        (status, Json(json!({ "success": false, "error": message }))).into_response()
    }
}

#[cfg(test)]
mod error_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::Error;

    #[test]
    fn validation_errors_are_bad_requests() {
        for error in [
            Error::InvalidAmount("abc".to_owned()),
            Error::InvalidDate("yesterday".to_owned()),
            Error::InvalidBody("missing field `amount`".to_owned()),
            Error::EmptyCategory,
            Error::UnsupportedCurrency("EUR".to_owned()),
        ] {
            assert!(error.is_validation_error());
            assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn not_found_is_distinct_from_validation_and_io_errors() {
        assert!(!Error::NotFound.is_validation_error());
        assert_eq!(
            Error::NotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            Error::Io("disk full".to_owned()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn no_rows_maps_to_not_found() {
        let error: Error = rusqlite::Error::QueryReturnedNoRows.into();

        assert_eq!(error, Error::NotFound);
    }
}
