use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use axum_test::TestServer;
use rusqlite::Connection;

use crate::{
    AppState, CurrencyConverter, SQLiteStore, build_router,
    test_utils::{ManualClock, StubRateProvider},
};

/// App state backed by an in-memory database and a rate provider that is
/// unreachable, so foreign amounts are converted with the fallback rates.
pub(crate) fn get_test_state() -> AppState {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");
    let store = SQLiteStore::new(connection).expect("Could not initialize database");
    let converter = CurrencyConverter::new(
        StubRateProvider::failing(),
        ManualClock::default(),
        Duration::from_secs(60 * 60),
    );

    AppState::new(Arc::new(Mutex::new(store)), converter)
}

pub(crate) fn get_test_server(state: AppState) -> TestServer {
    TestServer::try_new(build_router(state)).expect("Could not create test server.")
}
