use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use super::{api, assets};
use crate::app::SharedState;

/// Create the axum router with all routes.
pub fn create_router(state: SharedState) -> Router {
    let upload_limit = state.config().max_upload_bytes;

    Router::new()
        // --- Core ---
        .route("/status", get(status_handler))
        // --- Form UI ---
        .route("/", get(api::generate::index))
        .route(
            "/generate",
            post(api::generate::generate).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/static/{*path}", get(assets::static_handler))
        .fallback(assets::fallback)
        // --- Middleware ---
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn status_handler() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
