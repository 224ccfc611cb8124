//! Deposit listing over non-funding ledger updates.

use crate::datasource::{DataSource, DataSourceError};
use crate::domain::{Address, Decimal, TimeMs};
use crate::engine::window::{Clock, TimeWindow};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A single deposit event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositRecord {
    pub time_ms: TimeMs,
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

/// Deposits in a window plus summary totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositsReport {
    pub total_deposits: Decimal,
    pub deposit_count: i64,
    pub deposits: Vec<DepositRecord>,
}

/// Filters ledger updates down to deposits (positive amounts).
#[derive(Clone)]
pub struct LedgerService {
    source: Arc<dyn DataSource>,
    clock: Arc<dyn Clock>,
}

impl LedgerService {
    pub fn new(source: Arc<dyn DataSource>, clock: Arc<dyn Clock>) -> Self {
        Self { source, clock }
    }

    pub async fn deposits(
        &self,
        user: &Address,
        from_ms: Option<TimeMs>,
        to_ms: Option<TimeMs>,
    ) -> Result<DepositsReport, DataSourceError> {
        let window = TimeWindow::resolve(from_ms, to_ms, self.clock.as_ref());

        let updates = self
            .source
            .fetch_ledger_updates(user, window.start, window.end)
            .await?;

        let deposits: Vec<DepositRecord> = updates
            .into_iter()
            .filter(|u| u.is_deposit())
            .map(|u| DepositRecord {
                time_ms: u.time_ms,
                amount: u.amount,
                hash: u.hash,
            })
            .collect();

        let mut total_deposits = Decimal::zero();
        for deposit in &deposits {
            total_deposits += deposit.amount;
        }

        Ok(DepositsReport {
            total_deposits,
            deposit_count: deposits.len() as i64,
            deposits,
        })
    }
}
