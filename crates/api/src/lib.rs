// Course Library API Library
// Decision: Shared library for binaries (API server, OpenAPI export) and router tests

// API routes and types (shared for OpenAPI generation)
pub mod api;

// Environment configuration
pub mod config;

// Services layer
pub mod services;

// Storage layer
pub mod storage;

// OpenAPI spec generation
pub mod openapi;

use axum::http::{header, Method};
use axum::{extract::State, middleware, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::middleware::{
    handle_panic, request_id_layer, request_id_propagation_layer,
    require_acceptable_representation,
};
use crate::config::ApiConfig;
use crate::openapi::ApiDoc;
use crate::storage::StorageBackend;

pub use crate::api::ApiError;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    storage: &'static str,
}

/// State for health endpoint
#[derive(Clone)]
struct HealthState {
    storage: &'static str,
}

async fn health(State(state): State<HealthState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        storage: state.storage,
    })
}

/// Build the complete application router: API routes, health, Swagger UI and middleware.
pub fn build_app(db: Arc<StorageBackend>, config: &ApiConfig) -> Router {
    let authors_state = api::authors::AppState::new(db.clone());
    let author_collections_state = api::author_collections::AppState::new(db.clone());
    let courses_state = api::courses::AppState::new(db.clone());
    let health_state = HealthState {
        storage: if db.is_dev_mode() { "memory" } else { "postgres" },
    };

    let api_routes = Router::new()
        .merge(api::authors::routes(authors_state))
        .merge(api::author_collections::routes(author_collections_state))
        .merge(api::courses::routes(courses_state))
        .layer(middleware::from_fn(require_acceptable_representation));

    // Build main router with health (not prefixed) and prefixed API routes
    let mut app = Router::new().route("/health", get(health).with_state(health_state));
    app = app.merge(build_router_with_prefix(api_routes, &config.api_prefix));

    // Add Swagger UI
    let app =
        app.merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()));

    // Panic recovery is the innermost layer
    let app = app
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(request_id_propagation_layer())
        .layer(TraceLayer::new_for_http());

    // Add CORS layer only if origins are configured
    let app = if !config.cors_origins.is_empty() {
        app.layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(config.cors_origins.clone()))
                .allow_methods([
                    Method::GET,
                    Method::HEAD,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    header::CONTENT_TYPE,
                    header::ACCEPT,
                    header::ORIGIN,
                    header::CACHE_CONTROL,
                ])
                .expose_headers([header::LOCATION]),
        )
    } else {
        app
    };

    // Request id assignment is the outermost layer
    app.layer(request_id_layer())
}

/// Build router with optional API prefix (extracted for testing)
pub fn build_router_with_prefix<S: Clone + Send + Sync + 'static>(
    api_routes: Router<S>,
    api_prefix: &str,
) -> Router<S> {
    if api_prefix.is_empty() {
        api_routes
    } else {
        Router::new().nest(api_prefix, api_routes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_routes() -> Router {
        Router::new().route("/api/test", get(|| async { "ok" }))
    }

    #[tokio::test]
    async fn test_api_prefix_empty() {
        let app = build_router_with_prefix(test_routes(), "");

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/test")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"ok");
    }

    #[tokio::test]
    async fn test_api_prefix_set() {
        let app = build_router_with_prefix(test_routes(), "/v2");

        // Route should work with prefix
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/v2/api/test")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), 200);

        // Route should NOT work without prefix
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/test")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), 404);
    }

    #[tokio::test]
    async fn test_health_reports_storage() {
        let app = build_app(
            Arc::new(StorageBackend::in_memory()),
            &ApiConfig::default(),
        );

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        assert!(response.headers().contains_key("x-request-id"));
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["storage"], "memory");
    }
}
