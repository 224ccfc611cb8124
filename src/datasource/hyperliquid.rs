//! Hyperliquid Info API client.

use super::{DataSource, DataSourceError};
use crate::domain::{Address, Coin, Decimal, Fill, FundingEntry, LedgerEntry, Side, TimeMs};
use async_trait::async_trait;
use backoff::future::retry;
use backoff::ExponentialBackoff;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Hyperliquid data source using the public Info API.
///
/// Retries transient failures with exponential backoff; permanent failures
/// surface to the caller unmodified.
#[derive(Debug, Clone)]
pub struct HyperliquidDataSource {
    client: Client,
    base_url: String,
}

impl HyperliquidDataSource {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// Create with the default Hyperliquid API URL.
    pub fn default_url() -> Self {
        Self::new("https://api.hyperliquid.xyz".to_string())
    }

    async fn post_info(
        &self,
        payload: serde_json::Value,
    ) -> Result<serde_json::Value, DataSourceError> {
        let url = format!("{}/info", self.base_url);
        let backoff = ExponentialBackoff {
            max_elapsed_time: Some(Duration::from_secs(30)),
            ..Default::default()
        };

        retry(backoff, || async {
            let response = self
                .client
                .post(&url)
                .json(&payload)
                .send()
                .await
                .map_err(|e| {
                    backoff::Error::transient(DataSourceError::NetworkError(e.to_string()))
                })?;

            let status = response.status();
            if status == 429 {
                return Err(backoff::Error::transient(DataSourceError::RateLimited));
            }
            if status.is_server_error() {
                return Err(backoff::Error::transient(DataSourceError::HttpError {
                    status: status.as_u16(),
                    message: "Server error".to_string(),
                }));
            }
            if !status.is_success() {
                return Err(backoff::Error::permanent(DataSourceError::HttpError {
                    status: status.as_u16(),
                    message: "Client error".to_string(),
                }));
            }

            response
                .json::<serde_json::Value>()
                .await
                .map_err(|e| backoff::Error::permanent(DataSourceError::ParseError(e.to_string())))
        })
        .await
    }

    async fn post_info_array(
        &self,
        payload: serde_json::Value,
    ) -> Result<Vec<serde_json::Value>, DataSourceError> {
        let response = self.post_info(payload).await?;
        response
            .as_array()
            .cloned()
            .ok_or_else(|| DataSourceError::ParseError("Expected array response".to_string()))
    }
}

#[async_trait]
impl DataSource for HyperliquidDataSource {
    async fn fetch_fills(
        &self,
        user: &Address,
        from_ms: TimeMs,
        to_ms: TimeMs,
    ) -> Result<Vec<Fill>, DataSourceError> {
        debug!(user = %user, from_ms = from_ms.as_ms(), to_ms = to_ms.as_ms(), "Fetching fills");

        let payload = serde_json::json!({
            "type": "userFillsByTime",
            "user": user.as_str(),
            "startTime": from_ms.as_ms(),
            "endTime": to_ms.as_ms(),
            "aggregateByTime": false
        });

        let entries = self.post_info_array(payload).await?;

        let mut fills = Vec::with_capacity(entries.len());
        for entry in &entries {
            match parse_fill(entry, user) {
                Ok(fill) => fills.push(fill),
                Err(e) => warn!("Skipping unparseable fill: {}", e),
            }
        }
        Ok(fills)
    }

    async fn fetch_funding(
        &self,
        user: &Address,
        from_ms: TimeMs,
        to_ms: TimeMs,
    ) -> Result<Vec<FundingEntry>, DataSourceError> {
        debug!(user = %user, from_ms = from_ms.as_ms(), to_ms = to_ms.as_ms(), "Fetching funding");

        let payload = serde_json::json!({
            "type": "userFunding",
            "user": user.as_str(),
            "startTime": from_ms.as_ms(),
            "endTime": to_ms.as_ms()
        });

        let entries = self.post_info_array(payload).await?;

        let mut funding = Vec::with_capacity(entries.len());
        for entry in &entries {
            match parse_funding(entry, user) {
                Ok(f) => funding.push(f),
                Err(e) => warn!("Skipping unparseable funding entry: {}", e),
            }
        }
        Ok(funding)
    }

    async fn fetch_ledger_updates(
        &self,
        user: &Address,
        from_ms: TimeMs,
        to_ms: TimeMs,
    ) -> Result<Vec<LedgerEntry>, DataSourceError> {
        debug!(user = %user, from_ms = from_ms.as_ms(), to_ms = to_ms.as_ms(), "Fetching ledger updates");

        let payload = serde_json::json!({
            "type": "userNonFundingLedgerUpdates",
            "user": user.as_str(),
            "startTime": from_ms.as_ms(),
            "endTime": to_ms.as_ms()
        });

        let entries = self.post_info_array(payload).await?;

        let mut updates = Vec::with_capacity(entries.len());
        for entry in &entries {
            match parse_ledger_update(entry, user) {
                Ok(u) => updates.push(u),
                Err(e) => warn!("Skipping unparseable ledger update: {}", e),
            }
        }
        Ok(updates)
    }
}

fn require_time(value: &serde_json::Value) -> Result<TimeMs, DataSourceError> {
    value
        .get("time")
        .and_then(|v| v.as_i64())
        .map(TimeMs::new)
        .ok_or_else(|| DataSourceError::ParseError("Missing time field".to_string()))
}

fn require_decimal_str(value: &serde_json::Value, field: &str) -> Result<Decimal, DataSourceError> {
    let raw = value
        .get(field)
        .and_then(|v| v.as_str())
        .ok_or_else(|| DataSourceError::ParseError(format!("Missing {} field", field)))?;
    Decimal::from_str_canonical(raw)
        .map_err(|e| DataSourceError::ParseError(format!("Invalid {}: {}", field, e)))
}

fn parse_fill(entry: &serde_json::Value, user: &Address) -> Result<Fill, DataSourceError> {
    let time_ms = require_time(entry)?;

    let coin = entry
        .get("coin")
        .and_then(|v| v.as_str())
        .ok_or_else(|| DataSourceError::ParseError("Missing coin field".to_string()))?;

    // Wire encoding: "B" = bid (buy), "A" = ask (sell).
    let side = match entry.get("side").and_then(|v| v.as_str()) {
        Some("B") => Side::Buy,
        Some("A") => Side::Sell,
        Some(other) => {
            return Err(DataSourceError::ParseError(format!(
                "Invalid side: {}",
                other
            )))
        }
        None => return Err(DataSourceError::ParseError("Missing side field".to_string())),
    };

    let px = require_decimal_str(entry, "px")?;
    let sz = require_decimal_str(entry, "sz")?;
    let fee = require_decimal_str(entry, "fee")?;
    let closed_pnl = require_decimal_str(entry, "closedPnl")?;

    let builder = entry
        .get("builder")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(|s| Address::new(s.to_string()));

    let hash = entry
        .get("hash")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();

    Ok(Fill {
        time_ms,
        user: user.clone(),
        coin: Coin::new(coin.to_string()),
        side,
        px,
        sz,
        fee,
        closed_pnl,
        builder,
        hash,
        oid: entry.get("oid").and_then(|v| v.as_i64()),
        tid: entry.get("tid").and_then(|v| v.as_i64()),
    })
}

fn parse_funding(entry: &serde_json::Value, user: &Address) -> Result<FundingEntry, DataSourceError> {
    Ok(FundingEntry {
        user: user.clone(),
        time_ms: require_time(entry)?,
        amount: require_decimal_str(entry, "amount")?,
    })
}

fn parse_ledger_update(
    entry: &serde_json::Value,
    user: &Address,
) -> Result<LedgerEntry, DataSourceError> {
    Ok(LedgerEntry {
        user: user.clone(),
        time_ms: require_time(entry)?,
        amount: require_decimal_str(entry, "amount")?,
        hash: entry
            .get("hash")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> Address {
        Address::new("0x123".to_string())
    }

    #[test]
    fn test_parse_fill_valid() {
        let entry = serde_json::json!({
            "time": 1000,
            "coin": "BTC",
            "side": "B",
            "px": "50000",
            "sz": "1",
            "fee": "10",
            "closedPnl": "0",
            "builder": "0xbuilder",
            "hash": "0xdead",
            "tid": 123,
            "oid": 456
        });

        let fill = parse_fill(&entry, &user()).unwrap();
        assert_eq!(fill.coin, Coin::new("BTC".to_string()));
        assert_eq!(fill.side, Side::Buy);
        assert_eq!(fill.builder, Some(Address::new("0xbuilder".to_string())));
        assert_eq!(fill.hash, "0xdead");
        assert_eq!(fill.tid, Some(123));
    }

    #[test]
    fn test_parse_fill_sell_side_and_absent_builder() {
        let entry = serde_json::json!({
            "time": 1000,
            "coin": "ETH",
            "side": "A",
            "px": "2000",
            "sz": "2",
            "fee": "1",
            "closedPnl": "-5",
            "hash": "0xbeef"
        });

        let fill = parse_fill(&entry, &user()).unwrap();
        assert_eq!(fill.side, Side::Sell);
        assert_eq!(fill.builder, None);
    }

    #[test]
    fn test_parse_fill_invalid_side() {
        let entry = serde_json::json!({
            "time": 1000,
            "coin": "BTC",
            "side": "X",
            "px": "1",
            "sz": "1",
            "fee": "0",
            "closedPnl": "0"
        });
        assert!(parse_fill(&entry, &user()).is_err());
    }

    #[test]
    fn test_parse_ledger_update_valid() {
        let entry = serde_json::json!({
            "time": 1000,
            "amount": "1000",
            "hash": "0xaa"
        });
        let update = parse_ledger_update(&entry, &user()).unwrap();
        assert_eq!(update.time_ms, TimeMs::new(1000));
        assert!(update.is_deposit());
        assert_eq!(update.hash.as_deref(), Some("0xaa"));
    }

    #[test]
    fn test_parse_funding_missing_amount() {
        let entry = serde_json::json!({ "time": 1000 });
        assert!(parse_funding(&entry, &user()).is_err());
    }
}
