//! Application route configuration.

use axum::{extract::State, middleware, response::Json, routing::get, Router};
use serde::Serialize;
use tower_http::{services::ServeDir, trace::TraceLayer};

use super::handlers::{contact_routes, not_found, page_routes};
use super::middleware::{host_guard, origin_guard, security_headers};
use super::AppState;
use crate::config::STATIC_URL;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.static_root);

    Router::new()
        // Content pages
        .merge(page_routes())
        // Contact form (GET renders, POST submits)
        .merge(contact_routes())
        // Health check
        .route("/health", get(health))
        // Static assets
        .nest_service(STATIC_URL, static_files)
        .fallback(not_found)
        // Global middleware (last added runs first)
        .layer(middleware::from_fn_with_state(state.clone(), origin_guard))
        .layer(middleware::from_fn_with_state(state.clone(), host_guard))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            security_headers,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    mail_backend: &'static str,
}

/// Health check endpoint
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        mail_backend: state.config.email.backend.as_str(),
    })
}
