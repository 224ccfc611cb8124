//! Request-scoped services: each fetches from the data source and runs its
//! own replay; they share only the domain model and taint semantics.

pub mod ledger;
pub mod leaderboard;
pub mod pnl;
pub mod positions;
pub mod trades;

pub use ledger::{DepositRecord, DepositsReport, LedgerService};
pub use leaderboard::{
    InMemoryUserRegistry, LeaderboardEntry, LeaderboardMetric, LeaderboardQuery,
    LeaderboardService, UserRegistry,
};
pub use pnl::{PnlQuery, PnlService};
pub use positions::{PositionHistoryQuery, PositionService};
pub use trades::{TradeService, TradesQuery};
