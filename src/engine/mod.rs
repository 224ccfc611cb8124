//! Pure computation engines for deterministic ledger replay.

pub mod replay;
pub mod taint;
pub mod window;

pub use replay::{replay_positions, ReplayOptions};
pub use taint::{classify_lifecycles, filter_retroactive, ForwardTaint, TaintReport};
pub use window::{Clock, FixedClock, SystemClock, TimeWindow};
