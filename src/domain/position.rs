//! Derived position state emitted by the replay engine.

use crate::domain::{Coin, Decimal, TimeMs};
use serde::{Deserialize, Serialize};

/// Position state after applying one fill. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionState {
    pub time_ms: TimeMs,
    pub coin: Coin,
    /// Signed net size: positive = long, negative = short, zero = flat.
    pub net_size: Decimal,
    /// Weighted-average entry price of the open position (0 when flat).
    pub avg_entry_px: Decimal,
    /// Present only when builder-only annotation was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tainted: Option<bool>,
}
