//! Reservation API 模块

mod handler;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/reserve", post(handler::create))
        .route("/reservations", get(handler::list))
        .route("/reservations/{id}", delete(handler::cancel))
}
