//! Catalog API Handlers

use axum::{Json, extract::State};
use shared::models::{ConfigResponse, Table};

use crate::core::ServerState;

/// GET /config - 桌台和时段目录
pub async fn config(State(state): State<ServerState>) -> Json<ConfigResponse> {
    let tables = state.reservations.tables();
    let slots = state.reservations.slot_catalog();
    Json(ConfigResponse {
        total_tables: tables.len(),
        tables,
        lunch_slots: slots.lunch_slots,
        dinner_rounds: slots.dinner_rounds,
    })
}

/// GET /tables - 获取所有桌台
pub async fn tables(State(state): State<ServerState>) -> Json<Vec<Table>> {
    Json(state.reservations.tables())
}
