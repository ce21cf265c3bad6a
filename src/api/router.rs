//! Study API router.
//!
//! Layer stack (outermost → innermost): CORS → trace → no-store cache
//! header → handler.

use std::sync::Arc;

use axum::http::header::CACHE_CONTROL;
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;
use crate::config::ServiceConfig;
use crate::study::StudyService;

/// Build the router for a wired service.
pub fn study_api_router(service: Arc<StudyService>, config: Arc<ServiceConfig>) -> Router {
    build_router(ApiContext::new(service)).layer(cors_layer(&config.allowed_origins))
}

fn build_router(ctx: ApiContext) -> Router {
    Router::new()
        .route("/", get(endpoints::health::banner))
        .route("/api", get(endpoints::health::banner))
        .route("/api/", get(endpoints::health::banner))
        .route("/api/health", get(endpoints::health::check))
        .route("/api/test", get(endpoints::health::connection_test))
        .route(
            "/api/generate-verse-by-verse-progressive",
            post(endpoints::study::progressive),
        )
        .route(
            "/api/generate-verse-by-verse",
            post(endpoints::study::full),
        )
        .route("/api/generate-study", post(endpoints::study::rubric_study))
        .with_state(ctx)
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(TraceLayer::new_for_http())
}

/// Empty list → any origin. Unparseable origins are skipped.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    if origins.is_empty() {
        return base.allow_origin(Any);
    }

    let values: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    base.allow_origin(AllowOrigin::list(values))
}
