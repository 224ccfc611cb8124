//! Aggregate PnL metrics for a query window.

use crate::domain::Decimal;
use serde::{Deserialize, Serialize};

/// Realized PnL and return metrics over a requested window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PnlMetrics {
    /// Sum of closed PnL over the (filtered) fills in the window.
    pub realized_pnl: Decimal,
    /// Realized PnL as a percentage of effective capital.
    pub return_pct: Decimal,
    /// Sum of fees over the (filtered) fills in the window.
    pub fees_paid: Decimal,
    /// Number of fills counted.
    pub trade_count: i64,
    /// Sum of px * sz over the (filtered) fills in the window.
    pub volume: Decimal,
    /// True when builder-only filtering excluded a violated lifecycle.
    pub tainted: bool,
    /// Approximated starting equity used to normalize `return_pct`.
    pub effective_capital: Decimal,
}
