//! Liveness and introspection endpoints
//!
//! Static responses only; none of these touch cue or playhead state.

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

/// Service descriptor response
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub service: String,
    pub status: String,
    pub endpoints: Vec<String>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
}

/// Build information response
#[derive(Debug, Serialize)]
pub struct BuildInfo {
    pub version: String,
    pub git_hash: String,
    pub build_timestamp: String,
    pub build_profile: String,
}

/// GET /
pub async fn service_info() -> Json<ServiceInfo> {
    let endpoints = [
        "/health",
        "/build_info",
        "/cue/trigger",
        "/cue/claim",
        "/cue/schema",
        "/queue",
        "/playhead",
    ];

    Json(ServiceInfo {
        service: "cue-engine".to_string(),
        status: "ok".to_string(),
        endpoints: endpoints.iter().map(|e| e.to_string()).collect(),
    })
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        module: "vixio-ce".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /build_info
pub async fn get_build_info() -> Json<BuildInfo> {
    Json(BuildInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
        git_hash: env!("GIT_HASH").to_string(),
        build_timestamp: env!("BUILD_TIMESTAMP").to_string(),
        build_profile: env!("BUILD_PROFILE").to_string(),
    })
}

/// Build health and introspection routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(service_info))
        .route("/health", get(health_check))
        .route("/build_info", get(get_build_info))
}
