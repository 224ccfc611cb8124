//! Position reconstruction by chronological replay of fills.
//!
//! The exchange exposes fills but no historical position snapshots, so net
//! size and average entry price are rebuilt by replaying the ledger. State is
//! path-dependent: callers replay from the earliest fill even when only a
//! later output window is requested.

use crate::domain::numeric::{is_effectively_zero, weighted_average};
use crate::domain::{Address, Coin, Decimal, Fill, PositionState, TimeMs};
use crate::engine::taint::ForwardTaint;
use std::collections::HashMap;

/// Options for a position replay.
#[derive(Debug, Clone, Default)]
pub struct ReplayOptions {
    /// Annotate each state with the forward-only taint flag.
    pub builder_only: bool,
    /// Target builder address; when absent, no fill is ever marked tainted.
    pub target_builder: Option<Address>,
    /// Inclusive lower bound for emitted states (replay itself starts at the
    /// first fill regardless).
    pub from_ms: Option<TimeMs>,
    /// Inclusive upper bound for emitted states.
    pub to_ms: Option<TimeMs>,
}

#[derive(Debug)]
struct CoinState {
    net_size: Decimal,
    avg_entry_px: Decimal,
    taint: ForwardTaint,
}

impl CoinState {
    fn new() -> Self {
        Self {
            net_size: Decimal::zero(),
            avg_entry_px: Decimal::zero(),
            taint: ForwardTaint::default(),
        }
    }
}

/// Replay fills into a chronological sequence of position states.
///
/// Fills must be sorted by time (see `domain::ordering`); one state is
/// emitted per fill whose timestamp falls inside the output window. State is
/// tracked independently per coin.
pub fn replay_positions(fills: &[Fill], options: &ReplayOptions) -> Vec<PositionState> {
    let mut states: HashMap<Coin, CoinState> = HashMap::new();
    let mut history = Vec::new();

    for fill in fills {
        let state = states
            .entry(fill.coin.clone())
            .or_insert_with(CoinState::new);

        // Flat before this fill: a fresh lifecycle, clear the taint flag.
        if is_effectively_zero(state.net_size) {
            state.taint.reset();
        }

        if options.builder_only {
            if let Some(target) = &options.target_builder {
                state.taint.observe(fill.attributed_to(target));
            }
        }

        let signed = fill.signed_size();

        // Entry price moves only on fills extending the current direction
        // (or opening from flat), weighted by the pre-update net size.
        let is_opening = (!state.net_size.is_negative() && signed.is_positive())
            || (!state.net_size.is_positive() && signed.is_negative());
        if is_opening {
            state.avg_entry_px =
                weighted_average(state.avg_entry_px, state.net_size, fill.px, signed);
        }

        state.net_size += signed;
        if is_effectively_zero(state.net_size) {
            state.net_size = Decimal::zero();
            state.avg_entry_px = Decimal::zero();
        }

        let after_start = options.from_ms.map_or(true, |from| fill.time_ms >= from);
        let before_end = options.to_ms.map_or(true, |to| fill.time_ms <= to);
        if after_start && before_end {
            history.push(PositionState {
                time_ms: fill.time_ms,
                coin: fill.coin.clone(),
                net_size: state.net_size,
                avg_entry_px: state.avg_entry_px,
                tainted: options.builder_only.then(|| state.taint.is_tainted()),
            });
        }
    }

    history
}
