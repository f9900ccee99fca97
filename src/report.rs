//! A plain text report of spending by category, for use on the command line.

use std::collections::BTreeMap;

use crate::{
    Amount, Category, Error,
    currency::BASE_CURRENCY,
    dashboard::calculate_totals,
    store::RecordStore,
};

/// Parse a budget given as `CATEGORY=AMOUNT`, e.g. `Food=120`.
///
/// # Errors
/// Returns an error if there is no `=`, the category is empty or the amount
/// is not a valid amount.
pub fn parse_budget_arg(text: &str) -> Result<(Category, Amount), Error> {
    let (category, amount) = text
        .rsplit_once('=')
        .ok_or_else(|| Error::InvalidAmount(text.to_owned()))?;

    Ok((Category::new(category)?, amount.parse()?))
}

/// Save `budgets` to `store`, then render the spending report for everything
/// in the store.
///
/// # Errors
/// Returns an error if the store cannot be read or written.
pub fn run_report(store: &dyn RecordStore, budgets: &[(Category, Amount)]) -> Result<String, Error> {
    for (category, amount) in budgets {
        store.upsert_budget(category, *amount)?;
    }

    let totals = calculate_totals(&store.list_expenses()?);
    let budgets = store.get_budgets()?;

    Ok(render_report(&totals, &budgets))
}

/// Render the total spent in each category along with how it compares to
/// the category's budget, followed by the grand total and a list of the
/// categories that are over budget.
///
/// Any category with an entry in `budgets` is compared against it, so a
/// category with a zero budget is over budget as soon as anything is spent.
pub fn render_report(totals: &BTreeMap<String, f64>, budgets: &BTreeMap<String, f64>) -> String {
    let money = |amount: f64| BASE_CURRENCY.format(amount);

    let mut report = String::from("\n=== Spending by Category ===\n\n");
    let mut alerts = Vec::new();

    for (category, &spent) in totals {
        let budget_info = match budgets.get(category) {
            Some(&budget) if spent > budget => {
                alerts.push((category, spent, budget));
                format!(" [OVER BUDGET by {}]", money(spent - budget))
            }
            Some(&budget) => format!(" [{} remaining of {}]", money(budget - spent), money(budget)),
            None => String::new(),
        };

        report.push_str(&format!("{category}: {}{budget_info}\n", money(spent)));
    }

    let grand_total: f64 = totals.values().sum();
    report.push_str(&format!("\n{:-<20} {}\n", "Total", money(grand_total)));

    if !alerts.is_empty() {
        report.push_str("\n⚠️  BUDGET ALERTS ⚠️\n");
        for (category, spent, budget) in alerts {
            report.push_str(&format!(
                "  • {category}: Spent {} / Budget {}\n",
                money(spent),
                money(budget)
            ));
        }
    }

    report
}

#[cfg(test)]
mod report_tests {
    use std::collections::BTreeMap;

    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Amount, Category, Error, SQLiteStore,
        expense::NewExpense,
        report::{parse_budget_arg, render_report, run_report},
        store::RecordStore,
    };

    fn map(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
        entries
            .iter()
            .map(|(category, amount)| ((*category).to_owned(), *amount))
            .collect()
    }

    #[test]
    fn report_shows_budget_status_and_alerts() {
        let totals = map(&[("Transport", 30.0), ("Food", 150.0), ("Gifts", 20.0)]);
        let budgets = map(&[("Food", 120.0), ("Transport", 50.0)]);

        let report = render_report(&totals, &budgets);

        assert_eq!(
            report,
            "\n=== Spending by Category ===\n\n\
            Food: ₹150.00 [OVER BUDGET by ₹30.00]\n\
            Gifts: ₹20.00\n\
            Transport: ₹30.00 [₹20.00 remaining of ₹50.00]\n\
            \n\
            Total--------------- ₹200.00\n\
            \n\
            ⚠️  BUDGET ALERTS ⚠️\n  \
            • Food: Spent ₹150.00 / Budget ₹120.00\n"
        );
    }

    #[test]
    fn report_without_alerts_ends_at_total() {
        let totals = map(&[("Food", 10.0)]);

        let report = render_report(&totals, &map(&[("Food", 10.0)]));

        assert!(report.ends_with("Total--------------- ₹10.00\n"));
        assert!(report.contains("Food: ₹10.00 [₹0.00 remaining of ₹10.00]"));
    }

    #[test]
    fn parses_budget_argument() {
        assert_eq!(
            parse_budget_arg("Eating Out=120.5"),
            Ok((Category::new_unchecked("Eating Out"), Amount::new_unchecked(120.5)))
        );
        assert_eq!(
            parse_budget_arg("Food=abc"),
            Err(Error::InvalidAmount("abc".to_owned()))
        );
        assert_eq!(parse_budget_arg("=10"), Err(Error::EmptyCategory));
        assert!(parse_budget_arg("Food").is_err());
    }

    #[test]
    fn run_report_saves_budgets_before_rendering() {
        let connection = Connection::open_in_memory().unwrap();
        let store = SQLiteStore::new(connection).unwrap();
        store
            .add_expense(NewExpense::in_base_currency(
                date!(2025 - 01 - 15),
                Category::new_unchecked("Food"),
                Amount::new_unchecked(150.0),
            ))
            .unwrap();

        let report = run_report(
            &store,
            &[(Category::new_unchecked("Food"), Amount::new_unchecked(120.0))],
        )
        .expect("Could not run report");

        assert!(report.contains("Food: ₹150.00 [OVER BUDGET by ₹30.00]"));
        assert_eq!(store.get_budgets(), Ok(map(&[("Food", 120.0)])));
    }
}
