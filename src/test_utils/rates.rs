use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use time::{OffsetDateTime, macros::datetime};

use crate::currency::{Clock, RateError, RateProvider};

#[derive(Debug, Default)]
struct StubState {
    quotes: Option<HashMap<String, f64>>,
    calls: usize,
}

/// A [RateProvider] that answers with canned quotes, or fails when it has none.
///
/// Clones share their state, so a test can keep a clone to change the quotes
/// or count the requests after handing the provider to a converter.
#[derive(Debug, Clone, Default)]
pub(crate) struct StubRateProvider {
    state: Arc<Mutex<StubState>>,
}

impl StubRateProvider {
    pub(crate) fn with_quotes(quotes: HashMap<String, f64>) -> Self {
        let provider = Self::default();
        provider.set_quotes(quotes);
        provider
    }

    pub(crate) fn failing() -> Self {
        Self::default()
    }

    pub(crate) fn set_quotes(&self, quotes: HashMap<String, f64>) {
        self.state.lock().unwrap().quotes = Some(quotes);
    }

    pub(crate) fn fail(&self) {
        self.state.lock().unwrap().quotes = None;
    }

    pub(crate) fn calls(&self) -> usize {
        self.state.lock().unwrap().calls
    }
}

#[async_trait]
impl RateProvider for StubRateProvider {
    async fn fetch_quotes(&self) -> Result<HashMap<String, f64>, RateError> {
        let mut state = self.state.lock().unwrap();
        state.calls += 1;
        state.quotes.clone().ok_or(RateError::EmptyRates)
    }
}

/// A [Clock] that only moves when told to.
#[derive(Debug, Clone)]
pub(crate) struct ManualClock {
    now: Arc<Mutex<OffsetDateTime>>,
}

impl ManualClock {
    pub(crate) fn new(now: OffsetDateTime) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    pub(crate) fn advance(&self, duration: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += duration;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(datetime!(2025-01-01 00:00 UTC))
    }
}

impl Clock for ManualClock {
    fn now(&self) -> OffsetDateTime {
        *self.now.lock().unwrap()
    }
}
