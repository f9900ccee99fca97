use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use expense_tracker::{Amount, Category, Error, StoreArgs, parse_budget_arg, run_report};

/// Print spending by category and warn about categories that are over budget.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(flatten)]
    store: StoreArgs,

    /// Set a budget before printing the report, e.g. `--budget Food=120`.
    /// May be given more than once.
    #[arg(long = "budget", value_name = "CATEGORY=AMOUNT", value_parser = parse_budget_arg)]
    budgets: Vec<(Category, Amount)>,
}

fn main() -> ExitCode {
    // Logs go to stderr so they do not mix with the report.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    match report(&args) {
        Ok(report) => {
            print!("{report}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            println!("Error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn report(args: &Args) -> Result<String, Error> {
    let store = args.store.open()?;
    let store = store.lock().map_err(|_| Error::DatabaseLockError)?;

    run_report(&*store, &args.budgets)
}
