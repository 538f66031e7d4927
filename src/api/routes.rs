use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers::*;
use crate::config::ServerConfig;

pub fn create_router(config: ServerConfig) -> Router {
    let body_limit = config.body_limit_bytes;

    Router::new()
        .route("/api/mgrs", get(get_mgrs))
        .route("/api/coordinate", get(get_coordinate))
        .route("/api/utm", get(get_utm))
        .route("/api/format", get(get_format))
        .route("/api/upload", post(upload_csv))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(body_limit))
                .layer(CorsLayer::permissive()),
        )
        .with_state(Arc::new(config))
}
