//! API route definitions
//!
//! - /api/v1/catalog - drugs and ASA classes for the form
//! - /api/v1/figures/empty - placeholder charts
//! - /api/v1/recommendation - compute a recommendation
//! - /health - liveness probe at root level

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{self, DashboardState};

/// Create all versioned API routes
pub fn api_routes(state: DashboardState) -> Router {
    Router::new()
        .route("/catalog", get(handlers::get_catalog))
        .route("/figures/empty", get(handlers::get_empty_figures))
        .route("/recommendation", post(handlers::post_recommendation))
        .with_state(state)
}

/// Unversioned endpoints at root level
pub fn root_routes() -> Router {
    Router::new().route("/health", get(handlers::get_health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_root_routes_health() {
        let response = root_routes()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_api_routes_catalog() {
        let response = api_routes(DashboardState::default())
            .oneshot(Request::builder().uri("/catalog").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let v = body_json(response).await;
        assert_eq!(v["data"]["drugs"].as_array().map(Vec::len), Some(3));
        assert_eq!(v["data"]["drugs"][0]["id"], "drug_a");
        assert_eq!(v["data"]["asa_classes"].as_array().map(Vec::len), Some(6));
        assert_eq!(v["data"]["asa_classes"][2]["label"], "ASA III");
    }

    #[tokio::test]
    async fn test_api_routes_recommendation() {
        let body = r#"{"weight": 70, "drugs": ["drug_a"], "duration_minutes": 60, "seed": 3}"#;
        let response = api_routes(DashboardState::default())
            .oneshot(
                Request::post("/recommendation")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let v = body_json(response).await;
        assert_eq!(v["data"]["result"]["recommendation_text"][0], "Propofol: 420.00 mg");
        assert_eq!(
            v["data"]["figures"]["interaction_timeline"]["layout"]["title"]["text"],
            "Drug Interaction Timeline"
        );
    }

    #[tokio::test]
    async fn test_api_routes_recommendation_incomplete() {
        let body = r#"{"weight": 70, "drugs": [], "duration_minutes": 60}"#;
        let response = api_routes(DashboardState::default())
            .oneshot(
                Request::post("/recommendation")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let v = body_json(response).await;
        assert_eq!(v["error"]["code"], "NO_UPDATE");
        assert_eq!(v["error"]["reason"], "EMPTY_DRUG_SELECTION");
    }

    #[tokio::test]
    async fn test_api_routes_recommendation_malformed() {
        let response = api_routes(DashboardState::default())
            .oneshot(
                Request::post("/recommendation")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "BAD_REQUEST");
    }
}
