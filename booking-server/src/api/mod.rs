//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`reservations`] - 预约接口 (提交 / 余量 / 管理)
//! - [`supporters`] - 体验团申请接口

pub mod health;
pub mod reservations;
pub mod supporters;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};

/// Assemble all route groups
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(reservations::router())
        .merge(supporters::router())
}

/// The full application: routes, state and middleware
///
/// The forms are served from a static-hosted frontend on another
/// origin, so CORS stays permissive.
pub fn build_app(state: ServerState) -> Router {
    build_router()
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
