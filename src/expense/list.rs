//! Endpoint for listing every expense.

use axum::{
    Json,
    extract::{FromRef, State},
};

use crate::{
    AppState, Error,
    expense::Expense,
    store::{SharedStore, lock_store},
};

/// The state needed for listing expenses.
#[derive(Debug, Clone)]
pub struct ListExpensesState {
    /// Where expenses are saved.
    pub store: SharedStore,
}

impl FromRef<AppState> for ListExpensesState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// Get all expenses, oldest first.
pub async fn list_expenses_endpoint(
    State(state): State<ListExpensesState>,
) -> Result<Json<Vec<Expense>>, Error> {
    let expenses = lock_store(&state.store)?.list_expenses()?;

    Ok(Json(expenses))
}

#[cfg(test)]
mod list_expenses_endpoint_tests {
    use axum::http::StatusCode;
    use serde_json::{Value, json};
    use time::macros::date;

    use crate::{
        Amount, Category, endpoints,
        expense::NewExpense,
        store::lock_store,
        test_utils::{get_test_server, get_test_state},
    };

    #[tokio::test]
    async fn empty_store_returns_empty_list() {
        let server = get_test_server(get_test_state());

        let response = server.get(endpoints::EXPENSES_API).await;

        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.json::<Value>(), json!([]));
    }

    #[tokio::test]
    async fn returns_expenses_in_insertion_order() {
        let state = get_test_state();
        {
            let store = lock_store(&state.store).unwrap();
            for (category, amount) in [("Rent", 500.0), ("Food", 25.5)] {
                store
                    .add_expense(NewExpense::in_base_currency(
                        date!(2025 - 03 - 01),
                        Category::new_unchecked(category),
                        Amount::new_unchecked(amount),
                    ))
                    .unwrap();
            }
        }
        let server = get_test_server(state);

        let body: Value = server.get(endpoints::EXPENSES_API).await.json();

        let expenses = body.as_array().expect("want a JSON array");
        assert_eq!(expenses.len(), 2);
        assert_eq!(expenses[0]["category"], "Rent");
        assert_eq!(expenses[1]["category"], "Food");
        assert_eq!(expenses[1]["amount"], 25.5);
    }
}
