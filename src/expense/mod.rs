//! Recording, listing and deleting expenses.

mod create;
mod delete;
mod domain;
mod list;

pub use create::create_expense_endpoint;
pub use delete::delete_expense_endpoint;
pub(crate) use domain::{DATE_FORMAT, parse_date};
pub use domain::{Expense, ExpenseForm, ExpenseId, NewExpense};
pub use list::list_expenses_endpoint;
