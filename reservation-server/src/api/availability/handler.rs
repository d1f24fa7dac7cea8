//! Availability API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use shared::models::{AvailabilityResponse, TableStatusResponse};

use crate::api::convert;
use crate::core::ServerState;
use crate::utils::AppResult;

/// 参数全部可选，缺失由 convert 统一报错
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    pub date: Option<String>,
    pub meal: Option<String>,
    pub time_slot: Option<String>,
    pub party_size: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableReservationsQuery {
    pub date: Option<String>,
    pub meal_type: Option<String>,
    pub time_slot: Option<String>,
}

/// GET /availability?date&meal&timeSlot&partySize - 空闲桌台
pub async fn availability(
    State(state): State<ServerState>,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<AvailabilityResponse>> {
    let service = &state.reservations;
    let slot = convert::parse_slot(
        service,
        query.date.as_deref(),
        query.meal.as_deref(),
        query.time_slot.as_deref(),
        "meal",
    )?;
    let party_size = convert::parse_party_size(query.party_size.as_deref())?;

    let free_tables = service.availability(&slot, party_size).await?;
    Ok(Json(AvailabilityResponse {
        count: free_tables.len(),
        free_tables,
        total_tables: state.catalog.tables.len(),
    }))
}

/// GET /tableReservations?date&mealType&timeSlot - 各桌已订座位数
pub async fn table_reservations(
    State(state): State<ServerState>,
    Query(query): Query<TableReservationsQuery>,
) -> AppResult<Json<TableStatusResponse>> {
    let service = &state.reservations;
    let slot = convert::parse_slot(
        service,
        query.date.as_deref(),
        query.meal_type.as_deref(),
        query.time_slot.as_deref(),
        "mealType",
    )?;

    let tables = service.table_status(&slot).await?;
    Ok(Json(TableStatusResponse { tables }))
}
