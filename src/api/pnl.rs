use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::{
    parse_coin, parse_max_start_capital, parse_time_range, parse_user_address, AppState,
};
use crate::domain::PnlMetrics;
use crate::error::AppError;
use crate::service::PnlQuery;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PnlParams {
    pub user: String,
    pub coin: Option<String>,
    pub from_ms: Option<i64>,
    pub to_ms: Option<i64>,
    pub builder_only: Option<bool>,
    pub max_start_capital: Option<String>,
}

pub async fn get_pnl(
    Query(params): Query<PnlParams>,
    State(state): State<AppState>,
) -> Result<Json<PnlMetrics>, AppError> {
    let user = parse_user_address(&params.user)?;
    let coin = parse_coin(params.coin.as_deref());
    let (from_ms, to_ms) = parse_time_range(params.from_ms, params.to_ms)?;
    let max_start_capital = parse_max_start_capital(params.max_start_capital.as_deref())?;

    let query = PnlQuery {
        user,
        coin,
        from_ms,
        to_ms,
        builder_only: params.builder_only.unwrap_or(false),
        max_start_capital,
    };

    let metrics = state.pnl.compute_pnl(&query).await?;
    Ok(Json(metrics))
}
