//! Supporter API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use shared::{ApiResponse, SortOrder, Supporter, SupporterApplyRequest};

use crate::core::ServerState;
use crate::utils::{AppResult, ok, ok_with_message};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub order: SortOrder,
}

#[derive(Serialize)]
pub struct CountResponse {
    pub total: u64,
}

/// POST /api/supporters - 提交体验团申请
pub async fn apply(
    State(state): State<ServerState>,
    Json(payload): Json<SupporterApplyRequest>,
) -> AppResult<Json<ApiResponse<Supporter>>> {
    let created = state.supporters.apply(payload).await?;
    Ok(ok_with_message(created, "Application received. Thank you!"))
}

/// GET /api/supporters - 管理端列表
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<Vec<Supporter>>>> {
    let all = state.supporters.list(query.order).await?;
    Ok(ok(all))
}

/// GET /api/supporters/count - 落地页申请人数
pub async fn count(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<CountResponse>>> {
    let total = state.supporters.count().await?;
    Ok(ok(CountResponse { total }))
}
