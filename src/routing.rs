//! Application router configuration.

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

use crate::{
    AppState,
    budget::{get_budgets_endpoint, set_budget_endpoint},
    currency::get_rates_endpoint,
    dashboard::get_overview_page,
    endpoints,
    expense::{create_expense_endpoint, delete_expense_endpoint, list_expenses_endpoint},
    logging::logging_middleware,
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_overview_page))
        .route(endpoints::EXPENSE_API, post(create_expense_endpoint))
        .route(endpoints::EXPENSES_API, get(list_expenses_endpoint))
        .route(endpoints::EXPENSE, delete(delete_expense_endpoint))
        .route(
            endpoints::BUDGETS_API,
            get(get_budgets_endpoint).post(set_budget_endpoint),
        )
        .route(endpoints::RATES_API, get(get_rates_endpoint))
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}
