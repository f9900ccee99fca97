//! Dashboard module
//!
//! Provides the overview page comparing spending in each category against its
//! budget, and the aggregation behind it.

mod aggregation;
mod handlers;

pub use aggregation::{BudgetStatus, BudgetSummary, budget_view, calculate_totals};
pub use handlers::get_overview_page;
