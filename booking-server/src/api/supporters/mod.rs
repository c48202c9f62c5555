//! Supporter API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/supporters", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::apply).get(handler::list))
        .route("/count", get(handler::count))
}
