//! Domain types and determinism layer for the trade-ledger analytics service.
//!
//! This module provides:
//! - Lossless numeric handling via the Decimal wrapper
//! - Domain primitives: TimeMs, Address, Coin, Side
//! - Fill, ledger and funding records parsed once at the source boundary
//! - Shared epsilon/zero-crossing utilities
//! - Stable fill ordering for deterministic replay

pub mod decimal;
pub mod fill;
pub mod ledger;
pub mod numeric;
pub mod ordering;
pub mod pnl;
pub mod position;
pub mod primitives;

pub use decimal::Decimal;
pub use fill::Fill;
pub use ledger::{FundingEntry, LedgerEntry};
pub use pnl::PnlMetrics;
pub use position::PositionState;
pub use primitives::{Address, AddressParseError, Coin, Side, TimeMs};
