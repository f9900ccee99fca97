//! Endpoints for setting and listing budgets.

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{FromRef, State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use axum_htmx::HxRefresh;
use serde::Deserialize;
use serde_json::json;

use crate::{
    AmountInput, AppState, Category, Error,
    store::{SharedStore, lock_store},
};

/// The state needed for the budget endpoints.
#[derive(Debug, Clone)]
pub struct BudgetState {
    /// Where budgets are saved.
    pub store: SharedStore,
}

impl FromRef<AppState> for BudgetState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// The JSON body for setting a budget.
#[derive(Debug, Clone, Deserialize)]
pub struct BudgetForm {
    /// The category the budget applies to.
    pub category: String,
    /// The budget amount in the base currency.
    pub budget: AmountInput,
}

/// Set the budget for a category, replacing any existing budget.
pub async fn set_budget_endpoint(
    State(state): State<BudgetState>,
    form: Result<Json<BudgetForm>, JsonRejection>,
) -> Result<Response, Error> {
    let Json(form) = form?;
    let category = Category::new(&form.category)?;
    let amount = form.budget.parse()?;

    lock_store(&state.store)?
        .upsert_budget(&category, amount)
        .inspect_err(|error| tracing::error!("could not save budget for {category}: {error}"))?;

    tracing::info!("Set budget for {category} to {amount}");

    Ok((HxRefresh(true), Json(json!({ "success": true }))).into_response())
}

/// Get the budget for every category that has one.
pub async fn get_budgets_endpoint(
    State(state): State<BudgetState>,
) -> Result<Json<BTreeMap<String, f64>>, Error> {
    let budgets = lock_store(&state.store)?.get_budgets()?;

    Ok(Json(budgets))
}
