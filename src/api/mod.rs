//! REST API module using Axum
//!
//! Provides HTTP endpoints for the anesthesia recommendation dashboard:
//! - `/api/v1` JSON API with a consistent envelope, never cached
//! - `/health` liveness probe
//! - `/` single-page dashboard compiled into the binary

pub mod charts;
pub mod envelope;
pub mod handlers;
pub mod middleware;
mod routes;

pub use charts::DashboardFigures;
pub use handlers::DashboardState;

use axum::http::{header, Method};
use axum::middleware as axum_mw;
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::config::defaults::{CORS_ORIGINS_ENV_VAR, MAX_REQUEST_BODY_BYTES};

/// Dashboard page (embedded at compile time)
const DASHBOARD_HTML: &str = include_str!("../../static/dashboard.html");

async fn serve_dashboard() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

/// Build a CORS layer that is restrictive by default (same-origin only).
///
/// Set `ANESTHESIA_CORS_ORIGINS` to a comma-separated list of allowed origins
/// when the page is served from somewhere else during development.
fn build_cors_layer() -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    match std::env::var(CORS_ORIGINS_ENV_VAR) {
        Ok(origins) => {
            let allowed: Vec<_> = origins
                .split(',')
                .filter_map(|o| o.trim().parse().ok())
                .collect();
            tracing::info!(origins = %origins, "CORS: allowing configured origins");
            base.allow_origin(allowed)
        }
        Err(_) => base,
    }
}

/// Create the complete application router with API and page serving.
pub fn create_app(state: DashboardState) -> Router {
    let cors = build_cors_layer();

    Router::new()
        .route("/", get(serve_dashboard))
        .nest(
            "/api/v1",
            routes::api_routes(state).layer(axum_mw::from_fn(middleware::no_store)),
        )
        .merge(routes::root_routes())
        // Middleware
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}
