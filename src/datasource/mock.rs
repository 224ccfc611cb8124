//! Mock data source for testing without network calls.

use super::{DataSource, DataSourceError};
use crate::domain::{Address, Fill, FundingEntry, LedgerEntry, TimeMs};
use async_trait::async_trait;

/// Mock data source returning predefined data, filtered by user and time
/// range like the real API. Individual endpoints can be made to fail to
/// exercise degradation paths.
#[derive(Debug, Clone, Default)]
pub struct MockDataSource {
    fills: Vec<Fill>,
    funding: Vec<FundingEntry>,
    ledger: Vec<LedgerEntry>,
    fail_fills: bool,
    fail_funding: bool,
    fail_ledger: bool,
}

impl MockDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fill(mut self, fill: Fill) -> Self {
        self.fills.push(fill);
        self
    }

    pub fn with_fills(mut self, fills: Vec<Fill>) -> Self {
        self.fills.extend(fills);
        self
    }

    pub fn with_funding(mut self, entries: Vec<FundingEntry>) -> Self {
        self.funding.extend(entries);
        self
    }

    pub fn with_ledger(mut self, entries: Vec<LedgerEntry>) -> Self {
        self.ledger.extend(entries);
        self
    }

    /// Make `fetch_fills` fail with a network error.
    pub fn failing_fills(mut self) -> Self {
        self.fail_fills = true;
        self
    }

    /// Make `fetch_funding` fail with a network error.
    pub fn failing_funding(mut self) -> Self {
        self.fail_funding = true;
        self
    }

    /// Make `fetch_ledger_updates` fail with a network error.
    pub fn failing_ledger(mut self) -> Self {
        self.fail_ledger = true;
        self
    }
}

fn in_range(time_ms: TimeMs, from_ms: TimeMs, to_ms: TimeMs) -> bool {
    time_ms >= from_ms && time_ms <= to_ms
}

#[async_trait]
impl DataSource for MockDataSource {
    async fn fetch_fills(
        &self,
        user: &Address,
        from_ms: TimeMs,
        to_ms: TimeMs,
    ) -> Result<Vec<Fill>, DataSourceError> {
        if self.fail_fills {
            return Err(DataSourceError::NetworkError("mock fills failure".into()));
        }
        Ok(self
            .fills
            .iter()
            .filter(|f| f.user == *user && in_range(f.time_ms, from_ms, to_ms))
            .cloned()
            .collect())
    }

    async fn fetch_funding(
        &self,
        user: &Address,
        from_ms: TimeMs,
        to_ms: TimeMs,
    ) -> Result<Vec<FundingEntry>, DataSourceError> {
        if self.fail_funding {
            return Err(DataSourceError::NetworkError("mock funding failure".into()));
        }
        Ok(self
            .funding
            .iter()
            .filter(|f| f.user == *user && in_range(f.time_ms, from_ms, to_ms))
            .cloned()
            .collect())
    }

    async fn fetch_ledger_updates(
        &self,
        user: &Address,
        from_ms: TimeMs,
        to_ms: TimeMs,
    ) -> Result<Vec<LedgerEntry>, DataSourceError> {
        if self.fail_ledger {
            return Err(DataSourceError::NetworkError("mock ledger failure".into()));
        }
        Ok(self
            .ledger
            .iter()
            .filter(|l| l.user == *user && in_range(l.time_ms, from_ms, to_ms))
            .cloned()
            .collect())
    }
}
