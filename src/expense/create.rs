//! Expense creation endpoint.

use std::sync::Arc;

use axum::{
    Json,
    extract::{FromRef, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRefresh;
use serde_json::json;

use crate::{
    AppState, CurrencyConverter, Error,
    expense::{ExpenseForm, NewExpense},
    store::{SharedStore, lock_store},
};

/// The state needed for recording an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseState {
    /// Where expenses are saved.
    pub store: SharedStore,
    /// Converts foreign amounts to the base currency.
    pub currency_converter: Arc<CurrencyConverter>,
}

impl FromRef<AppState> for CreateExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            currency_converter: state.currency_converter.clone(),
        }
    }
}

/// Validate, convert and save a new expense.
///
/// Responds with 201 and the saved expense. Invalid input is rejected with
/// 400 before anything is saved.
pub async fn create_expense_endpoint(
    State(state): State<CreateExpenseState>,
    form: Result<Json<ExpenseForm>, JsonRejection>,
) -> Result<Response, Error> {
    let Json(form) = form?;
    let validated = form.validate()?;

    let conversion = state
        .currency_converter
        .convert(validated.amount.value(), validated.currency.code())
        .await;

    if !conversion.amount.is_finite() {
        return Err(Error::InvalidAmount(validated.amount.value().to_string()));
    }

    let new_expense = NewExpense::new(
        validated.date,
        validated.category,
        validated.amount,
        validated.currency,
        conversion,
    );

    let expense = lock_store(&state.store)?
        .add_expense(new_expense)
        .inspect_err(|error| tracing::error!("could not save expense: {error}"))?;

    tracing::info!(
        "Recorded expense {} of {} in {}",
        expense.id,
        expense.original_currency.format(expense.original_amount),
        expense.category
    );

    Ok((
        StatusCode::CREATED,
        HxRefresh(true),
        Json(json!({ "success": true, "expense": expense })),
    )
        .into_response())
}
