//! Reservation API Handlers

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
};
use serde::Deserialize;
use shared::models::{
    CancelResponse, ReservationCreate, ReservationId, ReservationListResponse, ReserveResponse,
};

use crate::api::convert;
use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub date: Option<String>,
}

/// POST /reserve - 创建预订 (指定桌号或自动分配)
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<ReservationCreate>, JsonRejection>,
) -> AppResult<Json<ReserveResponse>> {
    let Json(payload) = payload.map_err(|e| AppError::invalid_request(e.body_text()))?;
    let request = convert::create_request(&state.reservations, payload)?;

    let reservation = state
        .reservations
        .create_reservation(
            request.slot,
            request.party_size,
            request.table_id,
            request.customer,
        )
        .await?;

    Ok(Json(ReserveResponse::new(reservation)))
}

/// GET /reservations?date - 预订列表
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ReservationListResponse>> {
    let date = match query.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        Some(raw) => Some(convert::parse_date(raw, "date")?),
        None => None,
    };

    let reservations = state.reservations.list_reservations(date).await?;
    Ok(Json(ReservationListResponse { reservations }))
}

/// DELETE /reservations/:id - 取消预订
pub async fn cancel(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<CancelResponse>> {
    let id: ReservationId = id.trim().parse().map_err(|_| {
        AppError::invalid_request(format!("Invalid reservation id: {id}"))
            .with_detail("id", id.as_str())
    })?;

    let cancelled = state.reservations.cancel_reservation(id).await?;
    Ok(Json(CancelResponse::new(cancelled.id)))
}
