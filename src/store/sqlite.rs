//! A record store backed by a SQLite database.

use std::{collections::BTreeMap, path::Path};

use rusqlite::{
    Connection, Row,
    types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef},
};

use crate::{
    Amount, Category, Error,
    currency::Currency,
    expense::{Expense, ExpenseId, NewExpense},
    store::{RecordStore, timestamp_now},
};

/// Stores expenses and budgets in the tables `expense` and `budget`.
#[derive(Debug)]
pub struct SQLiteStore {
    connection: Connection,
}

impl SQLiteStore {
    /// Create a store from an open connection, creating the tables if needed.
    ///
    /// # Errors
    /// Returns an error if the tables cannot be created.
    pub fn new(connection: Connection) -> Result<Self, Error> {
        initialize(&connection)?;

        Ok(Self { connection })
    }

    /// Open (or create) the database file at `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or the tables cannot be created.
    pub fn open(path: &Path) -> Result<Self, Error> {
        Self::new(Connection::open(path)?)
    }
}

/// Create the tables for expenses and budgets if they do not exist.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS expense (
            id INTEGER PRIMARY KEY,
            date TEXT NOT NULL,
            category TEXT NOT NULL,
            amount REAL NOT NULL,
            original_amount REAL NOT NULL,
            original_currency TEXT NOT NULL,
            exchange_rate REAL NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_expense_category ON expense(category);

        CREATE TABLE IF NOT EXISTS budget (
            id INTEGER PRIMARY KEY,
            category TEXT NOT NULL UNIQUE,
            amount REAL NOT NULL,
            updated_at TEXT NOT NULL
        );",
    )
}

impl RecordStore for SQLiteStore {
    fn list_expenses(&self) -> Result<Vec<Expense>, Error> {
        self.connection
            .prepare(
                "SELECT id, date, category, amount, original_amount, original_currency, \
                exchange_rate, created_at FROM expense ORDER BY id ASC;",
            )?
            .query_map([], map_expense_row)?
            .map(|maybe_expense| maybe_expense.map_err(|error| error.into()))
            .collect()
    }

    fn add_expense(&self, expense: NewExpense) -> Result<Expense, Error> {
        let created_at = timestamp_now();

        self.connection.execute(
            "INSERT INTO expense (date, category, amount, original_amount, original_currency, \
            exchange_rate, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            (
                expense.date,
                expense.category.as_ref(),
                expense.amount,
                expense.original_amount,
                expense.original_currency,
                expense.exchange_rate,
                created_at,
            ),
        )?;

        let id = self.connection.last_insert_rowid();

        Ok(expense.into_expense(id, created_at))
    }

    fn delete_expense(&self, id: ExpenseId) -> Result<(), Error> {
        let rows_affected = self
            .connection
            .execute("DELETE FROM expense WHERE id = ?1", [id])?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }

    fn get_budgets(&self) -> Result<BTreeMap<String, f64>, Error> {
        self.connection
            .prepare("SELECT category, amount FROM budget;")?
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .map(|maybe_budget| maybe_budget.map_err(|error| error.into()))
            .collect()
    }

    fn upsert_budget(&self, category: &Category, amount: Amount) -> Result<(), Error> {
        self.connection.execute(
            "INSERT INTO budget (category, amount, updated_at) VALUES (?1, ?2, ?3)
            ON CONFLICT(category) DO UPDATE SET
                amount = excluded.amount,
                updated_at = excluded.updated_at;",
            (category.as_ref(), amount.value(), timestamp_now()),
        )?;

        Ok(())
    }
}

fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    let raw_category: String = row.get(2)?;

    Ok(Expense {
        id: row.get(0)?,
        date: row.get(1)?,
        category: Category::new_unchecked(&raw_category),
        amount: row.get(3)?,
        original_amount: row.get(4)?,
        original_currency: row.get(5)?,
        exchange_rate: row.get(6)?,
        created_at: row.get(7)?,
    })
}

impl ToSql for Currency {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.code()))
    }
}

impl FromSql for Currency {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error: Error| FromSqlError::Other(Box::new(error)))
    }
}
