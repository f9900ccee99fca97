//! A record store backed by a CSV file of expenses and a JSON file of budgets.

use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::{self, BufReader, BufWriter},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::{
    Amount, Category, Error,
    currency::{BASE_CURRENCY, Currency},
    expense::{DATE_FORMAT, Expense, ExpenseId, NewExpense, parse_date},
    store::{RecordStore, timestamp_now},
};

/// The name of the file that expenses are saved to.
pub const EXPENSES_FILE: &str = "expenses.csv";
/// The name of the file that budgets are saved to.
pub const BUDGETS_FILE: &str = "budgets.json";

/// The columns every expenses CSV file must have.
const REQUIRED_COLUMNS: [&str; 3] = ["Date", "Category", "Amount"];

/// Stores expenses in `expenses.csv` and budgets in `budgets.json` inside a
/// data directory.
///
/// The CSV file starts with the columns `Date,Category,Amount`. Files that
/// only have those three columns are read as expenses in the base currency.
/// Every write replaces the whole file via a temporary file, so an expense is
/// either fully saved or not at all.
#[derive(Debug, Clone)]
pub struct FileStore {
    expenses_path: PathBuf,
    budgets_path: PathBuf,
}

/// One row of the expenses CSV file.
#[derive(Debug, Serialize, Deserialize)]
struct ExpenseRecord {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Amount")]
    amount: f64,
    #[serde(rename = "OriginalAmount", default)]
    original_amount: Option<f64>,
    #[serde(rename = "OriginalCurrency", default)]
    original_currency: Option<String>,
    #[serde(rename = "ExchangeRate", default)]
    exchange_rate: Option<f64>,
    #[serde(rename = "Id", default)]
    id: Option<ExpenseId>,
    #[serde(rename = "CreatedAt", default)]
    created_at: Option<String>,
}

const CSV_HEADER: [&str; 8] = [
    "Date",
    "Category",
    "Amount",
    "OriginalAmount",
    "OriginalCurrency",
    "ExchangeRate",
    "Id",
    "CreatedAt",
];

impl ExpenseRecord {
    /// Convert the record at `row_index` (zero based, excluding the header) to an expense.
    fn into_expense(self, row_index: usize) -> Result<Expense, Error> {
        let line = row_index + 2;
        let date = parse_date(&self.date)
            .map_err(|_| Error::InvalidCsv(format!("invalid date {:?} on line {line}", self.date)))?;

        let original_currency = match self.original_currency.as_deref() {
            None | Some("") => BASE_CURRENCY,
            Some(code) => code.parse::<Currency>().map_err(|_| {
                Error::InvalidCsv(format!("unsupported currency {code:?} on line {line}"))
            })?,
        };

        let created_at = match self.created_at.as_deref() {
            None | Some("") => date.midnight().assume_utc(),
            Some(text) => OffsetDateTime::parse(text, &Rfc3339).map_err(|_| {
                Error::InvalidCsv(format!("invalid timestamp {text:?} on line {line}"))
            })?,
        };

        Ok(Expense {
            id: self.id.unwrap_or(row_index as ExpenseId + 1),
            date,
            category: Category::new_unchecked(&self.category),
            amount: self.amount,
            original_amount: self.original_amount.unwrap_or(self.amount),
            original_currency,
            exchange_rate: self.exchange_rate.unwrap_or(1.0),
            created_at,
        })
    }

    fn from_expense(expense: &Expense) -> Result<Self, Error> {
        let date = expense
            .date
            .format(DATE_FORMAT)
            .map_err(|error| Error::InvalidCsv(error.to_string()))?;
        let created_at = expense
            .created_at
            .format(&Rfc3339)
            .map_err(|error| Error::InvalidCsv(error.to_string()))?;

        Ok(Self {
            date,
            category: expense.category.to_string(),
            amount: expense.amount,
            original_amount: Some(expense.original_amount),
            original_currency: Some(expense.original_currency.code().to_owned()),
            exchange_rate: Some(expense.exchange_rate),
            id: Some(expense.id),
            created_at: Some(created_at),
        })
    }
}

impl FileStore {
    /// Create a store that keeps its files in `data_dir`, creating the
    /// directory if needed.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created.
    pub fn new(data_dir: &Path) -> Result<Self, Error> {
        fs::create_dir_all(data_dir)?;

        Ok(Self {
            expenses_path: data_dir.join(EXPENSES_FILE),
            budgets_path: data_dir.join(BUDGETS_FILE),
        })
    }

    fn read_expenses(&self) -> Result<Vec<Expense>, Error> {
        let Some(file) = open_if_exists(&self.expenses_path)? else {
            return Ok(Vec::new());
        };

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(BufReader::new(file));
        let headers = reader.headers()?.clone();

        if headers.is_empty() {
            return Ok(Vec::new());
        }

        if let Some(missing) = REQUIRED_COLUMNS
            .iter()
            .find(|column| !headers.iter().any(|header| header == **column))
        {
            return Err(Error::MissingColumn((*missing).to_owned()));
        }

        reader
            .deserialize::<ExpenseRecord>()
            .enumerate()
            .map(|(row_index, record)| record?.into_expense(row_index))
            .collect()
    }

    fn write_expenses(&self, expenses: &[Expense]) -> Result<(), Error> {
        let temp_path = temp_path_for(&self.expenses_path);
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&temp_path)?;

        writer.write_record(CSV_HEADER)?;
        for expense in expenses {
            writer.serialize(ExpenseRecord::from_expense(expense)?)?;
        }
        writer.flush()?;
        drop(writer);

        fs::rename(&temp_path, &self.expenses_path)?;

        Ok(())
    }

    fn read_budgets(&self) -> Result<BTreeMap<String, f64>, Error> {
        match open_if_exists(&self.budgets_path)? {
            Some(file) => Ok(serde_json::from_reader(BufReader::new(file))?),
            None => Ok(BTreeMap::new()),
        }
    }

    fn write_budgets(&self, budgets: &BTreeMap<String, f64>) -> Result<(), Error> {
        let temp_path = temp_path_for(&self.budgets_path);
        let mut writer = BufWriter::new(File::create(&temp_path)?);

        serde_json::to_writer_pretty(&mut writer, budgets)?;
        writer.into_inner().map_err(|error| error.into_error())?;

        fs::rename(&temp_path, &self.budgets_path)?;

        Ok(())
    }
}

impl RecordStore for FileStore {
    fn list_expenses(&self) -> Result<Vec<Expense>, Error> {
        self.read_expenses()
    }

    fn add_expense(&self, expense: NewExpense) -> Result<Expense, Error> {
        let mut expenses = self.read_expenses()?;
        let id = expenses.iter().map(|expense| expense.id).max().unwrap_or(0) + 1;
        let expense = expense.into_expense(id, timestamp_now());

        expenses.push(expense.clone());
        self.write_expenses(&expenses)?;

        Ok(expense)
    }

    fn delete_expense(&self, id: ExpenseId) -> Result<(), Error> {
        let mut expenses = self.read_expenses()?;
        let position = expenses
            .iter()
            .position(|expense| expense.id == id)
            .ok_or(Error::NotFound)?;

        expenses.remove(position);
        self.write_expenses(&expenses)
    }

    fn get_budgets(&self) -> Result<BTreeMap<String, f64>, Error> {
        self.read_budgets()
    }

    fn upsert_budget(&self, category: &Category, amount: Amount) -> Result<(), Error> {
        let mut budgets = self.read_budgets()?;
        budgets.insert(category.to_string(), amount.value());

        self.write_budgets(&budgets)
    }
}

/// Open the file at `path`, or `None` if it does not exist yet.
fn open_if_exists(path: &Path) -> Result<Option<File>, Error> {
    match File::open(path) {
        Ok(file) => Ok(Some(file)),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(error) => Err(error.into()),
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut file_name = path.file_name().unwrap_or_default().to_owned();
    file_name.push(".tmp");

    path.with_file_name(file_name)
}
