//! Service banner and health check.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::config;

#[derive(Serialize)]
pub struct BannerResponse {
    pub message: String,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct ConnectionTestResponse {
    pub status: &'static str,
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub bible_id: String,
    pub generative: bool,
    pub curated_entries: usize,
    pub version: &'static str,
    pub started_at: String,
}

/// `GET /` and `GET /api/`
pub async fn banner() -> Json<BannerResponse> {
    Json(BannerResponse {
        message: format!("{} API", config::APP_NAME),
        version: config::APP_VERSION,
    })
}

/// `GET /api/test`: reachability check for front ends. Touches no provider.
pub async fn connection_test() -> Json<ConnectionTestResponse> {
    Json(ConnectionTestResponse {
        status: "Backend accessible",
        message: "Connection OK",
    })
}

/// `GET /api/health`
pub async fn check(State(ctx): State<ApiContext>) -> Result<Json<HealthResponse>, ApiError> {
    let snapshot = ctx.service.health().await;

    Ok(Json(HealthResponse {
        status: "ok",
        bible_id: snapshot.bible_id.unwrap_or_else(|| "unknown".to_string()),
        generative: snapshot.generative,
        curated_entries: snapshot.curated_entries,
        version: config::APP_VERSION,
        started_at: ctx.started_at.clone(),
    }))
}
