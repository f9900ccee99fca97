//! Persistence of expenses and budgets.
//!
//! The rest of the app only talks to the [RecordStore] trait, so it does not
//! matter whether the records live in a SQLite database or in flat files.

mod file;
mod sqlite;

use std::{
    collections::BTreeMap,
    fmt::Debug,
    sync::{Arc, Mutex, MutexGuard},
};

use time::OffsetDateTime;

pub use file::FileStore;
pub use sqlite::SQLiteStore;

use crate::{
    Amount, Category, Error,
    expense::{Expense, ExpenseId, NewExpense},
};

/// Stores expenses and budgets.
pub trait RecordStore: Debug {
    /// Get every expense, oldest first.
    fn list_expenses(&self) -> Result<Vec<Expense>, Error>;

    /// Save an expense and return it with its ID and creation time.
    ///
    /// The expense is either fully written or not written at all.
    fn add_expense(&self, expense: NewExpense) -> Result<Expense, Error>;

    /// Delete the expense with `id`.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotFound] if there is no expense with `id`.
    fn delete_expense(&self, id: ExpenseId) -> Result<(), Error>;

    /// Get the budget amount for each category that has one.
    fn get_budgets(&self) -> Result<BTreeMap<String, f64>, Error>;

    /// Set the budget for `category`, replacing any existing budget.
    fn upsert_budget(&self, category: &Category, amount: Amount) -> Result<(), Error>;
}

/// A record store that can be shared between request handlers.
pub type SharedStore = Arc<Mutex<dyn RecordStore + Send>>;

/// Lock `store` for the duration of one operation.
///
/// The guard must be dropped before the caller awaits anything.
pub(crate) fn lock_store(
    store: &SharedStore,
) -> Result<MutexGuard<'_, dyn RecordStore + Send + 'static>, Error> {
    store.lock().map_err(|error| {
        tracing::error!("could not acquire database lock: {error}");
        Error::DatabaseLockError
    })
}

/// The current UTC time truncated to whole seconds, used for record timestamps.
pub(crate) fn timestamp_now() -> OffsetDateTime {
    let now = OffsetDateTime::now_utc();

    now.replace_nanosecond(0).unwrap_or(now)
}
