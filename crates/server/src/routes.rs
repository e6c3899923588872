use std::sync::Arc;

use axum::{routing::get, Json, Router};
use service::hospital::HospitalRepository;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::{observability, openapi::ApiDoc};

pub mod hospitals;

/// Shared handler state. Handlers only ever see the repository, never the data file.
#[derive(Clone)]
pub struct AppState {
    pub hospitals: Arc<dyn HospitalRepository>,
}

impl AppState {
    pub fn new(hospitals: Arc<dyn HospitalRepository>) -> Self {
        Self { hospitals }
    }
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn metrics() -> (axum::http::StatusCode, String) {
    observability::encode_metrics()
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: hospital CRUD plus health, metrics and API docs.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let hospital_routes = Router::new()
        .route("/hospitals", get(hospitals::list))
        .route(
            "/hospitals/:id",
            get(hospitals::get)
                .post(hospitals::create)
                .put(hospitals::update)
                .delete(hospitals::delete),
        );

    let ops = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/api-docs/openapi.json", get(openapi_json));

    hospital_routes
        .merge(ops)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
