use std::env;
use std::sync::Arc;

use anyhow::Result;
use axum::body::Body;
use axum::extract::{Json, State};
use axum::http::{Request, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use mesero_catalog::Catalog;
use mesero_lang::LanguageStack;
use mesero_observability::AppMetrics;
use mesero_pipeline::DialogPipeline;
use serde::Serialize;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct ApiState {
    pub pipeline: Arc<DialogPipeline<LanguageStack, Catalog>>,
    pub metrics: Arc<AppMetrics>,
    pub api_key: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp_utc: String,
    metrics: mesero_observability::MetricsSnapshot,
}

pub async fn build_app() -> Result<Router> {
    let metrics = AppMetrics::shared();

    let services = Arc::new(LanguageStack::from_env()?);
    let catalog = if let Ok(database_url) = env::var("MESERO_DATABASE_URL") {
        Catalog::sqlite(&database_url).await?
    } else {
        Catalog::memory()
    };

    let pipeline = Arc::new(DialogPipeline::new(
        services,
        Arc::new(catalog),
        metrics.clone(),
    ));

    let api_key = env::var("MESERO_API_KEY").unwrap_or_else(|_| "dev-mesero-key".to_string());

    Ok(build_router(ApiState {
        pipeline,
        metrics,
        api_key,
    }))
}

pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/v1/fulfill", post(fulfill))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(RequestBodyLimitLayer::new(64 * 1024))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api_key_middleware,
        ))
        .with_state(state)
}

async fn health(State(state): State<ApiState>) -> impl IntoResponse {
    let payload = HealthResponse {
        status: "ok",
        timestamp_utc: chrono::Utc::now().to_rfc3339(),
        metrics: state.metrics.snapshot(),
    };
    (StatusCode::OK, Json(payload))
}

/// The front end expects an envelope on every call, so this route always
/// answers 200: malformed bodies come back as the technical-error envelope.
async fn fulfill(
    State(state): State<ApiState>,
    Json(event): Json<serde_json::Value>,
) -> impl IntoResponse {
    let envelope = state.pipeline.handle_value(event).await;
    (StatusCode::OK, Json(envelope))
}

async fn api_key_middleware(
    State(state): State<ApiState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if request.uri().path() == "/health" {
        return next.run(request).await;
    }

    let presented = request
        .headers()
        .get("x-api-key")
        .and_then(|value| value.to_str().ok());

    if presented != Some(state.api_key.as_str()) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "error": "invalid_api_key" })),
        )
            .into_response();
    }

    next.run(request).await
}
