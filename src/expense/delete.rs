//! Expense deletion endpoint.

use axum::{
    Json,
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use axum_htmx::HxRefresh;
use serde_json::json;

use crate::{
    AppState, Error,
    expense::ExpenseId,
    store::{SharedStore, lock_store},
};

/// The state needed for deleting an expense.
#[derive(Debug, Clone)]
pub struct DeleteExpenseState {
    /// Where expenses are saved.
    pub store: SharedStore,
}

impl FromRef<AppState> for DeleteExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// Delete the expense with `expense_id`, responding with 404 if it does not exist.
pub async fn delete_expense_endpoint(
    Path(expense_id): Path<ExpenseId>,
    State(state): State<DeleteExpenseState>,
) -> Result<Response, Error> {
    lock_store(&state.store)?
        .delete_expense(expense_id)
        .inspect_err(|error| {
            if *error != Error::NotFound {
                tracing::error!("could not delete expense {expense_id}: {error}");
            }
        })?;

    tracing::info!("Deleted expense {expense_id}");

    Ok((HxRefresh(true), Json(json!({ "success": true }))).into_response())
}
