//! Availability API 模块

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/availability", get(handler::availability))
        .route("/tableReservations", get(handler::table_reservations))
}
