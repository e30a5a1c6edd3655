//! Axum router configuration with middleware.
//!
//! The generation endpoints sit at the paths the external contract fixes
//! (`/generate-dialogue`, `/generate-scene`); session and export routes
//! live beside them. Middleware: CORS, request tracing.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Generation (fixed wire contract)
        .route(
            "/generate-dialogue",
            post(handlers::generate::generate_dialogue),
        )
        .route("/generate-scene", post(handlers::generate::generate_scene))
        // Session lifecycle
        .route(
            "/session",
            post(handlers::session::create_session).delete(handlers::session::clear_all),
        )
        .route(
            "/session/{mode}",
            get(handlers::session::get_session)
                .put(handlers::session::save_session)
                .delete(handlers::session::clear_mode),
        )
        .route(
            "/session/{mode}/reset",
            post(handlers::session::reset_session),
        )
        // Export
        .route("/export/{mode}", get(handlers::export::export_script))
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
