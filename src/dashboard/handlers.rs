//! Overview page handler and view rendering.
//!
//! The page shows the budget status of every category with spending, the
//! totals, any budget alerts and the most recent expenses, along with the
//! forms for recording an expense and setting a budget.

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    currency::{BASE_CURRENCY, Currency},
    dashboard::aggregation::{BudgetStatus, BudgetSummary, budget_view, calculate_totals},
    endpoints::{self, format_endpoint},
    expense::Expense,
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE,
        TABLE_ROW_STYLE, base, format_currency,
    },
    internal_server_error::InternalServerError,
    store::{SharedStore, lock_store},
};

/// How many of the latest expenses are listed on the overview page.
const RECENT_EXPENSE_COUNT: usize = 10;

const TABLE_CELL_RED_STYLE: &str = "text-red-600 dark:text-red-400";
const TABLE_CELL_GREEN_STYLE: &str = "text-green-600 dark:text-green-400";

/// The state needed for displaying the overview page.
#[derive(Debug, Clone)]
pub struct OverviewState {
    /// Where expenses and budgets are saved.
    pub store: SharedStore,
}

impl FromRef<AppState> for OverviewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// Display the overview page.
pub async fn get_overview_page(State(state): State<OverviewState>) -> Response {
    match load_overview(&state.store) {
        Ok((summary, expenses)) => {
            let start = expenses.len().saturating_sub(RECENT_EXPENSE_COUNT);
            overview_view(&summary, &expenses[start..]).into_response()
        }
        Err(error) => {
            tracing::error!("could not load the overview page: {error}");
            InternalServerError::default().into_response()
        }
    }
}

fn load_overview(store: &SharedStore) -> Result<(BudgetSummary, Vec<Expense>), Error> {
    let (expenses, budgets) = {
        let store = lock_store(store)?;
        (store.list_expenses()?, store.get_budgets()?)
    };

    let summary = budget_view(&calculate_totals(&expenses), &budgets);

    Ok((summary, expenses))
}

fn overview_view(summary: &BudgetSummary, recent_expenses: &[Expense]) -> Markup {
    let alerts = summary.budget_alerts();

    let content = html! {
        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-3xl font-bold" { "Expense Tracker" }

            @if !alerts.is_empty() {
                (budget_alerts_view(&alerts))
            }

            section class="w-full max-w-4xl"
            {
                h2 class="text-xl font-semibold mb-4" { "Budget Status" }
                (budget_table(summary))
            }

            div class="flex flex-col md:flex-row gap-8 w-full max-w-4xl justify-center"
            {
                (expense_form())
                (budget_form())
            }

            section class="w-full max-w-4xl"
            {
                h2 class="text-xl font-semibold mb-4" { "Recent Expenses" }
                (recent_expenses_table(recent_expenses))
            }
        }
    };

    base("Overview", &content)
}

fn budget_alerts_view(alerts: &[&BudgetStatus]) -> Markup {
    html! {
        div
            id="budget-alerts"
            role="alert"
            class="w-full max-w-4xl p-4 rounded-lg text-red-800 bg-red-50 dark:bg-gray-800 dark:text-red-400"
        {
            h2 class="font-semibold" { "⚠️ Budget Alerts" }
            ul class="list-disc list-inside"
            {
                @for alert in alerts {
                    li {
                        (alert.category) ": spent " (format_currency(alert.spent, BASE_CURRENCY))
                        " of " (format_currency(alert.budget, BASE_CURRENCY))
                        " (over by " (format_currency(alert.over_amount, BASE_CURRENCY)) ")"
                    }
                }
            }
        }
    }
}

fn budget_table(summary: &BudgetSummary) -> Markup {
    html! {
        div class="overflow-x-auto rounded-lg shadow"
        {
            table id="budget-status" class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Spent" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Budget" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Used" }
                    }
                }

                tbody
                {
                    @for row in &summary.rows {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            th scope="row" class={(TABLE_CELL_STYLE) " font-medium text-gray-900 dark:text-white"} {
                                (row.category)
                            }
                            td class=(TABLE_CELL_STYLE) { (format_currency(row.spent, BASE_CURRENCY)) }
                            td class=(TABLE_CELL_STYLE) {
                                @if row.budget > 0.0 {
                                    (format_currency(row.budget, BASE_CURRENCY))
                                } @else {
                                    "No budget"
                                }
                            }
                            td class={(TABLE_CELL_STYLE) " " (status_color_class(row))} {
                                progress max="100" value=(format!("{:.0}", row.percentage)) {}
                                " " (format!("{:.0}%", row.percentage))
                            }
                        }
                    }

                    @if summary.rows.is_empty() {
                        tr class=(TABLE_ROW_STYLE) {
                            td colspan="4" class={(TABLE_CELL_STYLE) " text-center"} {
                                "No expenses recorded yet."
                            }
                        }
                    }
                }

                tfoot
                {
                    tr class="font-semibold text-gray-900 dark:text-white"
                    {
                        th scope="row" class=(TABLE_CELL_STYLE) { "Total" }
                        td id="grand-total" class=(TABLE_CELL_STYLE) {
                            (format_currency(summary.grand_total, BASE_CURRENCY))
                        }
                        td id="total-budget" class=(TABLE_CELL_STYLE) {
                            (format_currency(summary.total_budget, BASE_CURRENCY))
                        }
                        td class=(TABLE_CELL_STYLE) {}
                    }
                }
            }
        }
    }
}

fn status_color_class(row: &BudgetStatus) -> &'static str {
    if row.over_budget {
        TABLE_CELL_RED_STYLE
    } else {
        TABLE_CELL_GREEN_STYLE
    }
}

fn recent_expenses_table(expenses: &[Expense]) -> Markup {
    html! {
        div class="overflow-x-auto rounded-lg shadow"
        {
            table id="recent-expenses" class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Entered As" }
                        th scope="col" class=(TABLE_CELL_STYLE) { span class="sr-only" { "Actions" } }
                    }
                }

                tbody
                {
                    @for expense in expenses.iter().rev() {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td class=(TABLE_CELL_STYLE) { (expense.date) }
                            td class=(TABLE_CELL_STYLE) { (expense.category) }
                            td class=(TABLE_CELL_STYLE) { (format_currency(expense.amount, BASE_CURRENCY)) }
                            td class=(TABLE_CELL_STYLE) {
                                @if !expense.original_currency.is_base() {
                                    (format_currency(expense.original_amount, expense.original_currency))
                                    " @ " (format!("{:.4}", expense.exchange_rate))
                                }
                            }
                            td class=(TABLE_CELL_STYLE) {
                                button
                                    hx-delete=(format_endpoint(endpoints::EXPENSE, expense.id))
                                    hx-confirm="Are you sure you want to delete this expense?"
                                    class=(BUTTON_DELETE_STYLE)
                                {
                                    "Delete"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn expense_form() -> Markup {
    html! {
        form
            id="expense-form"
            hx-post=(endpoints::EXPENSE_API)
            hx-ext="json-enc"
            hx-target-error="#expense-form-error"
            class=(FORM_CONTAINER_STYLE)
        {
            h2 class="text-xl font-semibold" { "Add Expense" }

            div {
                label for="date" class=(FORM_LABEL_STYLE) { "Date" }
                input id="date" type="date" name="date" required class=(FORM_TEXT_INPUT_STYLE);
            }

            div {
                label for="expense-category" class=(FORM_LABEL_STYLE) { "Category" }
                input
                    id="expense-category"
                    type="text"
                    name="category"
                    placeholder="Food"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }
                input
                    id="amount"
                    type="number"
                    name="amount"
                    min="0"
                    step="0.01"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div {
                label for="currency" class=(FORM_LABEL_STYLE) { "Currency" }
                select id="currency" name="currency" class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for currency in Currency::ALL {
                        option value=(currency.code()) selected[currency.is_base()] {
                            (currency.code()) " (" (currency.symbol()) ")"
                        }
                    }
                }
            }

            p id="expense-form-error" class="text-red-600 dark:text-red-400" {}

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add Expense" }
        }
    }
}

fn budget_form() -> Markup {
    html! {
        form
            id="budget-form"
            hx-post=(endpoints::BUDGETS_API)
            hx-ext="json-enc"
            hx-target-error="#budget-form-error"
            class=(FORM_CONTAINER_STYLE)
        {
            h2 class="text-xl font-semibold" { "Set Budget" }

            div {
                label for="budget-category" class=(FORM_LABEL_STYLE) { "Category" }
                input
                    id="budget-category"
                    type="text"
                    name="category"
                    placeholder="Food"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div {
                label for="budget" class=(FORM_LABEL_STYLE) { "Budget (" (BASE_CURRENCY.symbol()) ")" }
                input
                    id="budget"
                    type="number"
                    name="budget"
                    min="0"
                    step="0.01"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            p id="budget-form-error" class="text-red-600 dark:text-red-400" {}

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Set Budget" }
        }
    }
}
