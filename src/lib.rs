pub mod api;
pub mod config;
pub mod datasource;
pub mod domain;
pub mod engine;
pub mod error;
pub mod service;

pub use config::Config;
pub use datasource::{DataSource, DataSourceError, HyperliquidDataSource, MockDataSource};
pub use domain::{
    Address, Coin, Decimal, Fill, FundingEntry, LedgerEntry, PnlMetrics, PositionState, Side,
    TimeMs,
};
pub use engine::{Clock, FixedClock, SystemClock};
pub use error::AppError;
pub use service::{
    InMemoryUserRegistry, LeaderboardService, LedgerService, PnlService, PositionService,
    TradeService, UserRegistry,
};
