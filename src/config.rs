//! Command line options shared by the binaries.
//!
//! Every option can also be set with an environment variable, which is used
//! when the option is not given on the command line.

use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
    time::Duration,
};

use clap::Args;

use crate::{
    Error, FileStore, SQLiteStore,
    currency::{DEFAULT_RATES_URL, RatesConfig},
    store::SharedStore,
};

/// Where expenses and budgets are stored.
///
/// At most one of `--db-path` and `--data-dir` may be given. Without either,
/// flat files in the current directory are used.
#[derive(Debug, Clone, PartialEq, Args)]
#[group(multiple = false)]
pub struct StoreArgs {
    /// File path to a SQLite database for expenses and budgets.
    #[arg(long, env = "EXPENSE_TRACKER_DB_PATH")]
    pub db_path: Option<PathBuf>,

    /// Directory holding `expenses.csv` and `budgets.json`.
    #[arg(long, env = "EXPENSE_TRACKER_DATA_DIR")]
    pub data_dir: Option<PathBuf>,
}

impl StoreArgs {
    /// Open the record store these options point to.
    ///
    /// # Errors
    /// Returns an error if the database or data directory cannot be opened.
    pub fn open(&self) -> Result<SharedStore, Error> {
        let store: SharedStore = match (&self.db_path, &self.data_dir) {
            (Some(db_path), _) => {
                tracing::info!("Using SQLite database {}", db_path.display());
                Arc::new(Mutex::new(SQLiteStore::open(db_path)?))
            }
            (None, data_dir) => {
                let data_dir = data_dir.clone().unwrap_or_else(|| PathBuf::from("."));
                tracing::info!("Using data files in {}", data_dir.display());
                Arc::new(Mutex::new(FileStore::new(&data_dir)?))
            }
        };

        Ok(store)
    }
}

/// Where exchange rates come from and how long they are cached.
#[derive(Debug, Clone, PartialEq, Args)]
pub struct RatesArgs {
    /// URL of the exchange rate provider, quoting rates against INR.
    #[arg(long, env = "EXPENSE_TRACKER_RATES_URL", default_value = DEFAULT_RATES_URL)]
    pub rates_url: String,

    /// Seconds to wait for the exchange rate provider before using fallback rates.
    #[arg(long, env = "EXPENSE_TRACKER_RATES_TIMEOUT_SECS", default_value_t = 10)]
    pub rates_timeout_secs: u64,

    /// Seconds that fetched exchange rates are reused for.
    #[arg(long, env = "EXPENSE_TRACKER_RATES_REFRESH_SECS", default_value_t = 60 * 60)]
    pub rates_refresh_secs: u64,
}

impl From<&RatesArgs> for RatesConfig {
    fn from(args: &RatesArgs) -> Self {
        Self {
            url: args.rates_url.clone(),
            timeout: Duration::from_secs(args.rates_timeout_secs),
            refresh_interval: Duration::from_secs(args.rates_refresh_secs),
        }
    }
}
