use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::{parse_coin, parse_time_range, parse_user_address, AppState};
use crate::domain::PositionState;
use crate::error::AppError;
use crate::service::PositionHistoryQuery;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionsHistoryParams {
    pub user: String,
    pub coin: Option<String>,
    pub from_ms: Option<i64>,
    pub to_ms: Option<i64>,
    pub builder_only: Option<bool>,
}

pub async fn get_positions_history(
    Query(params): Query<PositionsHistoryParams>,
    State(state): State<AppState>,
) -> Result<Json<Vec<PositionState>>, AppError> {
    let user = parse_user_address(&params.user)?;
    let coin = parse_coin(params.coin.as_deref());
    let (from_ms, to_ms) = parse_time_range(params.from_ms, params.to_ms)?;

    let query = PositionHistoryQuery {
        user,
        coin,
        from_ms,
        to_ms,
        builder_only: params.builder_only.unwrap_or(false),
    };

    let history = state.positions.position_history(&query).await?;
    Ok(Json(history))
}
