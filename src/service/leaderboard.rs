//! Leaderboard ranking across the tracked-user registry.

use crate::domain::{Address, Coin, Decimal, TimeMs};
use crate::service::pnl::{PnlQuery, PnlService};
use serde::Serialize;
use std::str::FromStr;
use std::sync::{Arc, RwLock};
use tracing::error;

/// Registry of user addresses tracked by the leaderboard.
pub trait UserRegistry: Send + Sync + std::fmt::Debug {
    /// Tracked users, deterministic order.
    fn users(&self) -> Vec<Address>;

    /// Register a user; duplicates are ignored.
    fn track(&self, user: Address);
}

/// In-memory registry seeded from configuration.
#[derive(Debug, Default)]
pub struct InMemoryUserRegistry {
    users: RwLock<Vec<Address>>,
}

impl InMemoryUserRegistry {
    pub fn new(seed: Vec<Address>) -> Self {
        let mut users = seed;
        users.sort_unstable_by(|a, b| a.as_str().cmp(b.as_str()));
        users.dedup();
        Self {
            users: RwLock::new(users),
        }
    }
}

impl UserRegistry for InMemoryUserRegistry {
    fn users(&self) -> Vec<Address> {
        self.users.read().expect("registry lock poisoned").clone()
    }

    fn track(&self, user: Address) {
        let mut users = self.users.write().expect("registry lock poisoned");
        if !users.contains(&user) {
            users.push(user);
        }
    }
}

/// Ranking metric for the leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderboardMetric {
    Volume,
    Pnl,
    ReturnPct,
}

impl FromStr for LeaderboardMetric {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "volume" => Ok(LeaderboardMetric::Volume),
            "pnl" => Ok(LeaderboardMetric::Pnl),
            "returnpct" => Ok(LeaderboardMetric::ReturnPct),
            _ => Err(()),
        }
    }
}

/// Query parameters for a leaderboard ranking.
#[derive(Debug, Clone)]
pub struct LeaderboardQuery {
    pub coin: Option<Coin>,
    pub from_ms: Option<TimeMs>,
    pub to_ms: Option<TimeMs>,
    pub metric: LeaderboardMetric,
    pub builder_only: bool,
    pub max_start_capital: Option<Decimal>,
}

/// One ranked leaderboard row.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub rank: i64,
    pub user: Address,
    pub metric_value: Decimal,
    pub trade_count: i64,
    pub tainted: bool,
}

/// Thin ranking layer over the PnL aggregator.
#[derive(Clone)]
pub struct LeaderboardService {
    pnl: Arc<PnlService>,
    registry: Arc<dyn UserRegistry>,
}

impl LeaderboardService {
    pub fn new(pnl: Arc<PnlService>, registry: Arc<dyn UserRegistry>) -> Self {
        Self { pnl, registry }
    }

    pub fn registry(&self) -> &Arc<dyn UserRegistry> {
        &self.registry
    }

    /// Rank tracked users by the requested metric, best first.
    ///
    /// Users whose PnL computation fails are logged and skipped rather than
    /// failing the whole board.
    pub async fn leaderboard(&self, query: &LeaderboardQuery) -> Vec<LeaderboardEntry> {
        let users = self.registry.users();

        let per_user = users.into_iter().map(|user| {
            let pnl = Arc::clone(&self.pnl);
            let query = query.clone();
            async move {
                let pnl_query = PnlQuery {
                    user: user.clone(),
                    coin: query.coin.clone(),
                    from_ms: query.from_ms,
                    to_ms: query.to_ms,
                    builder_only: query.builder_only,
                    max_start_capital: query.max_start_capital,
                };
                match pnl.compute_pnl(&pnl_query).await {
                    Ok(metrics) => {
                        let metric_value = match query.metric {
                            LeaderboardMetric::Volume => metrics.volume,
                            LeaderboardMetric::Pnl => metrics.realized_pnl,
                            LeaderboardMetric::ReturnPct => metrics.return_pct,
                        };
                        Some(LeaderboardEntry {
                            rank: 0,
                            user,
                            metric_value,
                            trade_count: metrics.trade_count,
                            tainted: metrics.tainted,
                        })
                    }
                    Err(e) => {
                        error!(user = %user, error = %e, "Leaderboard PnL computation failed, skipping user");
                        None
                    }
                }
            }
        });

        let mut entries: Vec<LeaderboardEntry> = futures::future::join_all(per_user)
            .await
            .into_iter()
            .flatten()
            .collect();

        entries.sort_by(|a, b| {
            b.metric_value
                .cmp(&a.metric_value)
                .then_with(|| a.user.as_str().cmp(b.user.as_str()))
        });
        for (index, entry) in entries.iter_mut().enumerate() {
            entry.rank = (index + 1) as i64;
        }

        entries
    }
}
