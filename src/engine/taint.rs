//! Lifecycle-based builder-attribution (taint) classification.
//!
//! A lifecycle is the maximal run of fills for one coin during which the net
//! size never returns to (epsilon-)zero after becoming non-zero. A lifecycle
//! is *violated* when any fill in it carries an attribution different from
//! the target builder, including fills with no attribution at all.
//!
//! Two consumers use this classification with deliberately different
//! policies, kept as separate named strategies:
//!
//! - [`filter_retroactive`] (PnL aggregation): every fill of a violated
//!   lifecycle is dropped, including fills that preceded the violation.
//! - [`ForwardTaint`] (position annotation): a per-lifecycle flag that resets
//!   at lifecycle start and turns sticky from the first violating fill
//!   onward; fills before the violation keep their clean flag.
//!
//! The divergence is a product decision carried over intact; see DESIGN.md.

use crate::domain::numeric::is_effectively_zero;
use crate::domain::{Address, Coin, Decimal, Fill};
use std::collections::{HashMap, HashSet};

pub type LifecycleId = u64;

/// Per-fill lifecycle assignments and the set of violated lifecycles.
#[derive(Debug, Clone)]
pub struct TaintReport {
    /// (coin, lifecycle) for each input fill, in input order.
    assignments: Vec<(Coin, LifecycleId)>,
    violated: HashSet<(Coin, LifecycleId)>,
}

impl TaintReport {
    /// True if the fill at `index` belongs to a violated lifecycle.
    pub fn is_violated(&self, index: usize) -> bool {
        self.violated.contains(&self.assignments[index])
    }

    /// True if any lifecycle in the classified set was violated.
    pub fn any_violated(&self) -> bool {
        !self.violated.is_empty()
    }
}

/// Classify fills into lifecycles and mark violated ones.
///
/// Fills must be chronologically sorted; lifecycles are scoped per coin, so a
/// mixed-coin sequence is fine.
pub fn classify_lifecycles(fills: &[Fill], target: &Address) -> TaintReport {
    struct CoinState {
        net_size: Decimal,
        lifecycle: LifecycleId,
    }

    let mut states: HashMap<Coin, CoinState> = HashMap::new();
    let mut assignments = Vec::with_capacity(fills.len());
    let mut violated = HashSet::new();

    for fill in fills {
        let state = states.entry(fill.coin.clone()).or_insert(CoinState {
            net_size: Decimal::zero(),
            lifecycle: 0,
        });

        // Flat before this fill: a new lifecycle begins.
        if is_effectively_zero(state.net_size) {
            state.lifecycle += 1;
        }

        let key = (fill.coin.clone(), state.lifecycle);
        if !fill.attributed_to(target) {
            violated.insert(key.clone());
        }
        assignments.push(key);

        state.net_size += fill.signed_size();
        if is_effectively_zero(state.net_size) {
            state.net_size = Decimal::zero();
        }
    }

    TaintReport {
        assignments,
        violated,
    }
}

/// Retroactive strategy: drop every fill of a violated lifecycle.
///
/// Returns the surviving fills and whether any lifecycle was violated. Fills
/// must be chronologically sorted.
pub fn filter_retroactive(fills: Vec<Fill>, target: &Address) -> (Vec<Fill>, bool) {
    let report = classify_lifecycles(&fills, target);
    let tainted = report.any_violated();

    let kept = fills
        .into_iter()
        .enumerate()
        .filter(|(index, fill)| !report.is_violated(*index) && fill.attributed_to(target))
        .map(|(_, fill)| fill)
        .collect();

    (kept, tainted)
}

/// Forward-only strategy: sticky per-lifecycle flag, never retroactive.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForwardTaint {
    tainted: bool,
}

impl ForwardTaint {
    /// Reset at lifecycle start (position flat before the fill).
    pub fn reset(&mut self) {
        self.tainted = false;
    }

    /// Record one fill's attribution verdict.
    pub fn observe(&mut self, attributed: bool) {
        if !attributed {
            self.tainted = true;
        }
    }

    pub fn is_tainted(&self) -> bool {
        self.tainted
    }
}
