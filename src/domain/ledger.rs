//! Ledger (deposit/withdrawal) and funding events.

use crate::domain::{Address, Decimal, TimeMs};
use serde::{Deserialize, Serialize};

/// A non-funding ledger update: deposit (positive) or withdrawal (negative).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    /// User/wallet address.
    pub user: Address,
    /// Time of the event in milliseconds since Unix epoch.
    pub time_ms: TimeMs,
    /// Signed amount.
    pub amount: Decimal,
    /// Transaction hash when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

impl LedgerEntry {
    /// Only strictly positive amounts count as deposits.
    pub fn is_deposit(&self) -> bool {
        self.amount.is_positive()
    }
}

/// A funding payment event (signed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingEntry {
    /// User/wallet address.
    pub user: Address,
    /// Time of the payment in milliseconds since Unix epoch.
    pub time_ms: TimeMs,
    /// Signed funding amount.
    pub amount: Decimal,
}
