//! Catalog API 模块

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/config", get(handler::config))
        .route("/tables", get(handler::tables))
}
