//! Setting and reading per-category budgets.

mod endpoints;

pub use endpoints::{get_budgets_endpoint, set_budget_endpoint};
