//! HTTP handlers.
//!
//! `POST /wfs` takes an already-decoded request as JSON, which stands in for
//! the XML/KVP decoders of a full WFS front end.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::Extension,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::instrument;
use wfs_common::WfsError;
use wfs_protocol::{ExceptionReport, WfsRequest};

use crate::state::AppState;

/// All routes of the service.
pub fn router(state: Arc<AppState>, prometheus: PrometheusHandle) -> Router {
    Router::new()
        .route("/wfs", post(wfs_handler))
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/metrics", get(metrics_handler))
        .route("/api/metrics", get(api_metrics_handler))
        .layer(Extension(state))
        .layer(Extension(prometheus))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// POST /wfs
#[instrument(skip(state, body))]
pub async fn wfs_handler(Extension(state): Extension<Arc<AppState>>, body: Bytes) -> Response {
    let request: WfsRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            return error_response(&WfsError::invalid_parameter(
                "request",
                format!("Could not decode request: {}", e),
            ))
        }
    };

    match state.registry.process(request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => error_response(&e),
    }
}

fn error_response(error: &WfsError) -> Response {
    let status =
        StatusCode::from_u16(error.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ExceptionReport::from_error(error))).into_response()
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Serialize)]
pub struct ReadyResponse {
    pub ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capabilities_updated: Option<String>,
}

/// GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// GET /ready - ready once capabilities have been computed
pub async fn ready_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    let updated = state.cache.last_updated().await;
    let status = if updated.is_some() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let body = ReadyResponse {
        ready: updated.is_some(),
        capabilities_updated: updated.map(|t| t.to_rfc3339()),
    };
    (status, Json(body)).into_response()
}

/// GET /metrics - Prometheus metrics
pub async fn metrics_handler(Extension(handle): Extension<PrometheusHandle>) -> Response {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        handle.render(),
    )
        .into_response()
}

/// GET /api/metrics - JSON snapshot
pub async fn api_metrics_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    Json(state.metrics.snapshot()).into_response()
}
