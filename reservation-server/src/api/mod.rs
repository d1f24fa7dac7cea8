//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`config`] - 桌台和时段目录
//! - [`availability`] - 空闲桌台 / 桌台占用
//! - [`reservations`] - 预订创建、查询、取消
//!
//! 所有原始查询参数在 [`convert`] 中一次性转换为领域类型，
//! 错误统一以 `AppError` 信封返回。

pub mod convert;

pub mod availability;
pub mod config;
pub mod health;
pub mod reservations;

use axum::{Router, middleware};
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let status = response.status();

    tracing::info!(target: "http_access", "{} {} {}", method, uri, status);

    response
}

/// Build the Axum router with state and middleware applied
pub fn build_app(state: ServerState) -> Router {
    let max_connections = state.config.max_connections;

    Router::<ServerState>::new()
        .merge(health::router())
        .merge(config::router())
        .merge(availability::router())
        .merge(reservations::router())
        .with_state(state)
        .layer(ConcurrencyLimitLayer::new(max_connections))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        // HTTP 请求日志中间件
        .layer(middleware::from_fn(log_request))
}
