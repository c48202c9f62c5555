//! Reservation API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::{
    ApiResponse, Reservation, SlotAvailability, SortOrder, SubmitReservationRequest,
    UpdateStatusRequest,
};

use crate::core::ServerState;
use crate::utils::{AppResult, ok, ok_with_message};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// 排序 (asc | desc)，默认 desc
    #[serde(default)]
    pub order: SortOrder,
}

/// POST /api/reservations - 提交预约
///
/// 准入判定基于提交瞬间捕获的余量快照；竞争造成的超额由管理端对账。
pub async fn submit(
    State(state): State<ServerState>,
    Json(payload): Json<SubmitReservationRequest>,
) -> AppResult<Json<ApiResponse<Reservation>>> {
    let created = state.reservations.submit(payload).await?;
    Ok(ok_with_message(
        created,
        "Reservation received. We will confirm your deposit shortly.",
    ))
}

/// GET /api/reservations/availability - 各时段余量
pub async fn availability(
    State(state): State<ServerState>,
) -> Json<ApiResponse<Vec<SlotAvailability>>> {
    ok(state.availability.slots())
}

/// GET /api/reservations - 管理端列表 (默认最新在前)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<Vec<Reservation>>>> {
    let all = state.reservations.list(query.order).await?;
    Ok(ok(all))
}

/// POST /api/reservations/:id/status - 管理端确认/取消
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<Json<ApiResponse<Reservation>>> {
    let updated = state.reservations.update_status(&id, payload.status).await?;
    Ok(ok(updated))
}
