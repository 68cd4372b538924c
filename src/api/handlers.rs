//! API route handlers
//!
//! Request handling for the dashboard endpoints:
//! - Liveness probe
//! - Catalog of selectable drugs and ASA classes for populating the form
//! - Placeholder figures for the initial render
//! - Recommendation trigger: form state in, result and figures out

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Response;
use axum::Json;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::info;

use super::charts::DashboardFigures;
use super::envelope::{ApiErrorResponse, ApiResponse};
use crate::engine::{RecommendationEngine, RecommendationRequest};
use crate::types::{AsaClass, RecommendationResult};

// ============================================================================
// API State
// ============================================================================

/// Shared state for API handlers
#[derive(Clone)]
pub struct DashboardState {
    pub engine: Arc<RecommendationEngine>,
}

impl DashboardState {
    pub fn new(engine: RecommendationEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(RecommendationEngine::default())
    }
}

// ============================================================================
// Health
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /health
pub async fn get_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

// ============================================================================
// Catalog
// ============================================================================

#[derive(Debug, Serialize)]
pub struct DrugOption {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct AsaOption {
    pub score: u8,
    pub label: String,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub drugs: Vec<DrugOption>,
    pub asa_classes: Vec<AsaOption>,
}

/// GET /api/v1/catalog
pub async fn get_catalog(State(state): State<DashboardState>) -> Response {
    let drugs = state
        .engine
        .catalog()
        .iter()
        .map(|d| DrugOption {
            id: d.id.to_string(),
            name: d.name.clone(),
        })
        .collect();

    let asa_classes = AsaClass::ALL
        .iter()
        .map(|c| AsaOption {
            score: c.score(),
            label: c.to_string(),
            description: c.description(),
        })
        .collect();

    ApiResponse::ok(CatalogResponse { drugs, asa_classes })
}

// ============================================================================
// Figures
// ============================================================================

/// GET /api/v1/figures/empty
pub async fn get_empty_figures() -> Response {
    ApiResponse::ok(DashboardFigures::empty())
}

// ============================================================================
// Recommendation
// ============================================================================

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub result: RecommendationResult,
    pub figures: DashboardFigures,
}

/// POST /api/v1/recommendation
///
/// Incomplete form input answers 422 `NO_UPDATE`; the page keeps its current
/// view when it sees that code. Unparseable JSON answers 400; oversized
/// bodies and a missing JSON content type keep their own status (413, 415).
pub async fn post_recommendation(
    State(state): State<DashboardState>,
    payload: Result<Json<RecommendationRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(json) => json,
        // Malformed or mistyped JSON is a client error, not "no update"
        Err(rejection @ (JsonRejection::JsonSyntaxError(_) | JsonRejection::JsonDataError(_))) => {
            return ApiErrorResponse::bad_request(format!("Invalid request body: {rejection}"))
        }
        Err(rejection) => return ApiErrorResponse::rejected(rejection.status(), rejection.body_text()),
    };

    let mut rng = match request.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    match state.engine.evaluate(&request, &mut rng) {
        Ok(result) => {
            let figures = DashboardFigures::from_result(&result);
            ApiResponse::ok(RecommendationResponse { result, figures })
        }
        Err(err) => {
            info!(reason = err.code(), "Recommendation skipped: {}", err);
            ApiErrorResponse::no_update(err.to_string(), err.code())
        }
    }
}
