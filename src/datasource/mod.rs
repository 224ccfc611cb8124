//! Data source abstraction for fetching fills, funding and ledger updates.

use crate::domain::{Address, Fill, FundingEntry, LedgerEntry, TimeMs};
use async_trait::async_trait;
use std::fmt;

pub mod hyperliquid;
pub mod mock;

pub use hyperliquid::HyperliquidDataSource;
pub use mock::MockDataSource;

/// Source of raw exchange data for a user.
///
/// Implementations own transport concerns (retry/backoff, rate limiting);
/// callers never retry. Returned entries carry no ordering guarantee;
/// consumers sort before replay.
#[async_trait]
pub trait DataSource: Send + Sync + fmt::Debug {
    /// Fetch trade fills for a user in `[from_ms, to_ms]` (both inclusive).
    async fn fetch_fills(
        &self,
        user: &Address,
        from_ms: TimeMs,
        to_ms: TimeMs,
    ) -> Result<Vec<Fill>, DataSourceError>;

    /// Fetch funding payments for a user in `[from_ms, to_ms]`.
    async fn fetch_funding(
        &self,
        user: &Address,
        from_ms: TimeMs,
        to_ms: TimeMs,
    ) -> Result<Vec<FundingEntry>, DataSourceError>;

    /// Fetch non-funding ledger updates (deposits/withdrawals) for a user in
    /// `[from_ms, to_ms]`.
    async fn fetch_ledger_updates(
        &self,
        user: &Address,
        from_ms: TimeMs,
        to_ms: TimeMs,
    ) -> Result<Vec<LedgerEntry>, DataSourceError>;
}

/// Error type for data source operations.
#[derive(Debug, Clone)]
pub enum DataSourceError {
    /// Network error (connection timeout, DNS failure).
    NetworkError(String),
    /// HTTP error (4xx/5xx from the upstream API).
    HttpError { status: u16, message: String },
    /// Parsing error (invalid JSON or malformed response).
    ParseError(String),
    /// Rate limit exceeded.
    RateLimited,
    /// Other error.
    Other(String),
}

impl fmt::Display for DataSourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSourceError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            DataSourceError::HttpError { status, message } => {
                write!(f, "HTTP error {}: {}", status, message)
            }
            DataSourceError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            DataSourceError::RateLimited => write!(f, "Rate limited"),
            DataSourceError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for DataSourceError {}
