pub mod deposits;
pub mod health;
pub mod leaderboard;
pub mod pnl;
pub mod positions;
pub mod trades;

use crate::domain::{Address, Coin, Decimal, TimeMs};
use crate::error::AppError;
use crate::service::{
    LeaderboardService, LedgerService, PnlService, PositionService, TradeService,
};
use axum::{
    routing::{get, post},
    Router,
};
use std::str::FromStr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub trades: Arc<TradeService>,
    pub positions: Arc<PositionService>,
    pub pnl: Arc<PnlService>,
    pub ledger: Arc<LedgerService>,
    pub leaderboard: Arc<LeaderboardService>,
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/v1/trades", get(trades::get_trades))
        .route(
            "/v1/positions/history",
            get(positions::get_positions_history),
        )
        .route("/v1/pnl", get(pnl::get_pnl))
        .route("/v1/deposits", get(deposits::get_deposits))
        .route("/v1/leaderboard", get(leaderboard::get_leaderboard))
        .route(
            "/v1/leaderboard/users",
            post(leaderboard::add_leaderboard_user),
        )
        .layer(cors)
        .with_state(state)
}

pub(crate) fn parse_user_address(input: &str) -> Result<Address, AppError> {
    Address::from_str(input).map_err(|_| AppError::BadRequest("Invalid user address".to_string()))
}

pub(crate) fn parse_coin(input: Option<&str>) -> Option<Coin> {
    input
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| Coin::new(s.to_string()))
}

pub(crate) fn parse_time_range(
    from_ms: Option<i64>,
    to_ms: Option<i64>,
) -> Result<(Option<TimeMs>, Option<TimeMs>), AppError> {
    let from_ms = from_ms.map(TimeMs::new);
    let to_ms = to_ms.map(TimeMs::new);
    if let (Some(from), Some(to)) = (from_ms, to_ms) {
        if from > to {
            return Err(AppError::BadRequest("fromMs must be <= toMs".to_string()));
        }
    }
    Ok((from_ms, to_ms))
}

pub(crate) fn parse_max_start_capital(input: Option<&str>) -> Result<Option<Decimal>, AppError> {
    input
        .map(Decimal::from_str_canonical)
        .transpose()
        .map_err(|_| AppError::BadRequest("Invalid maxStartCapital".to_string()))
}
