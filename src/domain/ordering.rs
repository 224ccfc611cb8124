//! Deterministic fill ordering for replay.
//!
//! The exchange does not guarantee order; replays require strictly
//! non-decreasing timestamps, and ties must break the same way on every run.
//! Ordering: time_ms -> tid -> oid -> hash.

use crate::domain::Fill;

fn ordering_key(fill: &Fill) -> (i64, Option<i64>, Option<i64>, &str) {
    (
        fill.time_ms.as_ms(),
        fill.tid,
        fill.oid,
        fill.hash.as_str(),
    )
}

/// Sort fills chronologically with a stable tie-break.
pub fn sort_fills_chronological(fills: &mut [Fill]) {
    fills.sort_by(|a, b| ordering_key(a).cmp(&ordering_key(b)));
}

/// Sort fills newest first (listing order).
pub fn sort_fills_newest_first(fills: &mut [Fill]) {
    fills.sort_by(|a, b| ordering_key(b).cmp(&ordering_key(a)));
}
