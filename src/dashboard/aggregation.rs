//! Expense aggregation and budget comparison.
//!
//! Sums expenses by category and merges the totals with the budgets into the
//! rows shown on the overview page and in the spending report.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::expense::Expense;

/// How the spending in one category compares to its budget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetStatus {
    /// The category label.
    pub category: String,
    /// The total spent in the base currency.
    pub spent: f64,
    /// The budget for the category, zero if it has none.
    pub budget: f64,
    /// How much of the budget has been spent, capped at 100.
    pub percentage: f64,
    /// Whether more than the budget has been spent. Always false without a budget.
    pub over_budget: bool,
    /// How much more than the budget has been spent, zero when not over budget.
    pub over_amount: f64,
}

/// The budget status of every category with spending, plus the totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetSummary {
    /// One row per category with spending, sorted by category.
    pub rows: Vec<BudgetStatus>,
    /// The total spent across every category.
    pub grand_total: f64,
    /// The sum of every budget, including budgets for categories without spending.
    pub total_budget: f64,
}

impl BudgetSummary {
    /// The rows that are over budget, in category order.
    pub fn budget_alerts(&self) -> Vec<&BudgetStatus> {
        self.rows.iter().filter(|row| row.over_budget).collect()
    }
}

/// Sum the amount spent in each category.
///
/// Categories are grouped by exact string equality, so "Food" and "food" are
/// separate categories.
pub fn calculate_totals(expenses: &[Expense]) -> BTreeMap<String, f64> {
    let mut totals = BTreeMap::new();

    for expense in expenses {
        *totals
            .entry(expense.category.to_string())
            .or_insert(0.0) += expense.amount;
    }

    totals
}

/// Compare the category totals against the budgets.
///
/// Only categories with spending get a row. Categories that have a budget
/// but no spending still count towards [BudgetSummary::total_budget].
pub fn budget_view(
    totals: &BTreeMap<String, f64>,
    budgets: &BTreeMap<String, f64>,
) -> BudgetSummary {
    let rows: Vec<BudgetStatus> = totals
        .iter()
        .map(|(category, &spent)| {
            let budget = budgets.get(category).copied().unwrap_or(0.0);
            budget_status(category, spent, budget)
        })
        .collect();

    BudgetSummary {
        grand_total: totals.values().sum(),
        total_budget: budgets.values().sum(),
        rows,
    }
}

fn budget_status(category: &str, spent: f64, budget: f64) -> BudgetStatus {
    let (percentage, over_budget) = if budget > 0.0 {
        ((spent / budget * 100.0).min(100.0), spent > budget)
    } else {
        (0.0, false)
    };

    BudgetStatus {
        category: category.to_owned(),
        spent,
        budget,
        percentage,
        over_budget,
        over_amount: if over_budget { spent - budget } else { 0.0 },
    }
}

#[cfg(test)]
mod aggregation_tests {
    use std::collections::BTreeMap;

    use time::macros::{date, datetime};

    use crate::{
        Category,
        currency::Currency,
        dashboard::aggregation::{BudgetStatus, budget_view, calculate_totals},
        expense::Expense,
    };

    fn expense(id: i64, category: &str, amount: f64) -> Expense {
        Expense {
            id,
            date: date!(2025 - 01 - 15),
            category: Category::new_unchecked(category),
            amount,
            original_amount: amount,
            original_currency: Currency::Inr,
            exchange_rate: 1.0,
            created_at: datetime!(2025-01-15 12:00 UTC),
        }
    }

    fn budgets(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
        entries
            .iter()
            .map(|(category, amount)| ((*category).to_owned(), *amount))
            .collect()
    }

    #[test]
    fn totals_sum_by_category() {
        let expenses = [
            expense(1, "Food", 100.0),
            expense(2, "Food", 50.0),
            expense(3, "Transport", 30.0),
        ];

        let totals = calculate_totals(&expenses);

        assert_eq!(
            totals,
            BTreeMap::from([("Food".to_owned(), 150.0), ("Transport".to_owned(), 30.0)])
        );
    }

    #[test]
    fn totals_are_case_sensitive() {
        let expenses = [expense(1, "Food", 1.0), expense(2, "food", 2.0)];

        let totals = calculate_totals(&expenses);

        assert_eq!(totals.len(), 2);
    }

    #[test]
    fn no_expenses_gives_no_totals() {
        assert!(calculate_totals(&[]).is_empty());
    }

    #[test]
    fn food_over_budget_and_transport_without_budget() {
        let expenses = [
            expense(1, "Food", 100.0),
            expense(2, "Food", 50.0),
            expense(3, "Transport", 30.0),
        ];
        let totals = calculate_totals(&expenses);

        let summary = budget_view(&totals, &budgets(&[("Food", 120.0), ("Transport", 0.0)]));

        assert_eq!(
            summary.rows,
            vec![
                BudgetStatus {
                    category: "Food".to_owned(),
                    spent: 150.0,
                    budget: 120.0,
                    percentage: 100.0,
                    over_budget: true,
                    over_amount: 30.0,
                },
                BudgetStatus {
                    category: "Transport".to_owned(),
                    spent: 30.0,
                    budget: 0.0,
                    percentage: 0.0,
                    over_budget: false,
                    over_amount: 0.0,
                },
            ]
        );
        assert_eq!(summary.grand_total, 180.0);
        assert_eq!(summary.total_budget, 120.0);
    }

    #[test]
    fn under_budget_has_partial_percentage() {
        let totals = BTreeMap::from([("Rent".to_owned(), 250.0)]);

        let summary = budget_view(&totals, &budgets(&[("Rent", 1000.0)]));

        let row = &summary.rows[0];
        assert_eq!(row.percentage, 25.0);
        assert!(!row.over_budget);
        assert_eq!(row.over_amount, 0.0);
    }

    #[test]
    fn spending_equal_to_budget_is_not_over_budget() {
        let totals = BTreeMap::from([("Rent".to_owned(), 1000.0)]);

        let summary = budget_view(&totals, &budgets(&[("Rent", 1000.0)]));

        assert_eq!(summary.rows[0].percentage, 100.0);
        assert!(!summary.rows[0].over_budget);
    }

    #[test]
    fn category_without_budget_is_never_over_budget() {
        let totals = BTreeMap::from([("Gifts".to_owned(), 500.0)]);

        let summary = budget_view(&totals, &BTreeMap::new());

        assert_eq!(summary.rows[0].budget, 0.0);
        assert_eq!(summary.rows[0].percentage, 0.0);
        assert!(!summary.rows[0].over_budget);
        assert_eq!(summary.total_budget, 0.0);
    }

    #[test]
    fn budget_only_categories_count_towards_total_budget() {
        let totals = BTreeMap::from([("Food".to_owned(), 10.0)]);

        let summary = budget_view(&totals, &budgets(&[("Food", 20.0), ("Holiday", 300.0)]));

        assert_eq!(summary.rows.len(), 1);
        assert_eq!(summary.rows[0].category, "Food");
        assert_eq!(summary.total_budget, 320.0);
    }

    #[test]
    fn rows_are_sorted_and_sum_to_grand_total() {
        let expenses = [
            expense(1, "Utilities", 12.25),
            expense(2, "Food", 7.5),
            expense(3, "Rent", 400.0),
            expense(4, "Food", 2.25),
        ];
        let totals = calculate_totals(&expenses);

        let summary = budget_view(&totals, &budgets(&[("Food", 5.0), ("Rent", 1000.0)]));

        let categories: Vec<_> = summary.rows.iter().map(|row| row.category.as_str()).collect();
        assert_eq!(categories, ["Food", "Rent", "Utilities"]);
        let row_sum: f64 = summary.rows.iter().map(|row| row.spent).sum();
        assert_eq!(row_sum, summary.grand_total);
        for row in &summary.rows {
            assert!((0.0..=100.0).contains(&row.percentage));
            if row.over_budget {
                assert_eq!(row.over_amount, row.spent - row.budget);
            }
        }
    }

    #[test]
    fn budget_alerts_lists_over_budget_rows() {
        let totals = BTreeMap::from([
            ("Food".to_owned(), 150.0),
            ("Rent".to_owned(), 100.0),
            ("Travel".to_owned(), 90.0),
        ]);

        let summary = budget_view(
            &totals,
            &budgets(&[("Food", 120.0), ("Rent", 500.0), ("Travel", 50.0)]),
        );

        let alerts: Vec<_> = summary
            .budget_alerts()
            .into_iter()
            .map(|row| row.category.as_str())
            .collect();
        assert_eq!(alerts, ["Food", "Travel"]);
    }
}
