use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::{parse_time_range, parse_user_address, AppState};
use crate::error::AppError;
use crate::service::DepositsReport;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositsParams {
    pub user: String,
    pub from_ms: Option<i64>,
    pub to_ms: Option<i64>,
}

pub async fn get_deposits(
    Query(params): Query<DepositsParams>,
    State(state): State<AppState>,
) -> Result<Json<DepositsReport>, AppError> {
    let user = parse_user_address(&params.user)?;
    let (from_ms, to_ms) = parse_time_range(params.from_ms, params.to_ms)?;

    let report = state.ledger.deposits(&user, from_ms, to_ms).await?;
    Ok(Json(report))
}
