use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use std::str::FromStr;

use crate::api::{parse_coin, parse_max_start_capital, parse_time_range, parse_user_address, AppState};
use crate::error::AppError;
use crate::service::{LeaderboardEntry, LeaderboardMetric, LeaderboardQuery};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardParams {
    pub coin: Option<String>,
    pub from_ms: Option<i64>,
    pub to_ms: Option<i64>,
    pub metric: Option<String>,
    pub builder_only: Option<bool>,
    pub max_start_capital: Option<String>,
}

pub async fn get_leaderboard(
    Query(params): Query<LeaderboardParams>,
    State(state): State<AppState>,
) -> Result<Json<Vec<LeaderboardEntry>>, AppError> {
    let metric = params
        .metric
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("metric is required".to_string()))?;
    let metric = LeaderboardMetric::from_str(metric).map_err(|_| {
        AppError::BadRequest("metric must be one of: volume, pnl, returnPct".to_string())
    })?;

    let coin = parse_coin(params.coin.as_deref());
    let (from_ms, to_ms) = parse_time_range(params.from_ms, params.to_ms)?;
    let max_start_capital = parse_max_start_capital(params.max_start_capital.as_deref())?;

    let query = LeaderboardQuery {
        coin,
        from_ms,
        to_ms,
        metric,
        builder_only: params.builder_only.unwrap_or(false),
        max_start_capital,
    };

    let entries = state.leaderboard.leaderboard(&query).await;
    Ok(Json(entries))
}

#[derive(Debug, Deserialize)]
pub struct AddUserBody {
    pub user: String,
}

pub async fn add_leaderboard_user(
    State(state): State<AppState>,
    Json(body): Json<AddUserBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let user = parse_user_address(&body.user)?;
    state.leaderboard.registry().track(user);
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "User added to leaderboard tracking"
    })))
}
