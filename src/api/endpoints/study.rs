//! Study generation endpoints.

use std::future::Future;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::study::{ProgressiveRequest, RubricRequest, StudyError, StudyRequest, VerseStats};

pub const DEFAULT_BATCH_SIZE: u32 = 5;
pub const MAX_BATCH_SIZE: u32 = 50;

// ═══════════════════════════════════════════════════════════
// Progressive
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
pub struct ProgressiveBody {
    #[serde(default)]
    pub passage: String,
    #[serde(default, alias = "batchSize")]
    pub batch_size: Option<i64>,
    #[serde(default, alias = "startVerse")]
    pub start_verse: Option<i64>,
    #[serde(default = "default_true")]
    pub enriched: bool,
    #[serde(default, alias = "targetChars")]
    pub target_chars: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ProgressiveResponse {
    pub batch_content: String,
    pub verse_range: Option<String>,
    pub has_more: bool,
    pub next_start_verse: Option<u32>,
    pub total_progress: f64,
    pub verse_stats: VerseStats,
}

impl ProgressiveBody {
    fn into_request(self) -> ProgressiveRequest {
        ProgressiveRequest {
            passage: self.passage,
            batch_size: clamp_batch_size(self.batch_size),
            start_verse: self.start_verse.map_or(1, |v| v.clamp(1, u32::MAX as i64) as u32),
            enriched: self.enriched,
            target_chars: self.target_chars,
        }
    }
}

fn clamp_batch_size(raw: Option<i64>) -> u32 {
    raw.map_or(DEFAULT_BATCH_SIZE, |v| v.clamp(1, MAX_BATCH_SIZE as i64) as u32)
}

fn default_true() -> bool {
    true
}

/// Run study work on its own task so a panic becomes a 500 JSON body.
async fn isolated<T, F>(work: F) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, StudyError>> + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::spawn(work).await??)
}

/// `POST /api/generate-verse-by-verse-progressive`
pub async fn progressive(
    State(ctx): State<ApiContext>,
    body: Result<Json<ProgressiveBody>, JsonRejection>,
) -> Result<Json<ProgressiveResponse>, ApiError> {
    let Json(body) = body?;
    let service = ctx.service.clone();
    let page = isolated(async move { service.progressive(body.into_request()).await }).await?;

    Ok(Json(ProgressiveResponse {
        batch_content: page.content,
        verse_range: page.bounds.range_label(),
        has_more: page.bounds.has_more,
        next_start_verse: page.bounds.next_start,
        total_progress: page.bounds.total_progress_pct,
        verse_stats: page.bounds.stats,
    }))
}

// ═══════════════════════════════════════════════════════════
// Full passage
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
pub struct FullBody {
    #[serde(default)]
    pub passage: String,
    #[serde(default)]
    pub enriched: bool,
    #[serde(default, alias = "targetChars")]
    pub target_chars: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct FullResponse {
    pub content: String,
}

/// `POST /api/generate-verse-by-verse`
pub async fn full(
    State(ctx): State<ApiContext>,
    body: Result<Json<FullBody>, JsonRejection>,
) -> Result<Json<FullResponse>, ApiError> {
    let Json(body) = body?;
    let service = ctx.service.clone();
    let request = StudyRequest {
        passage: body.passage,
        enriched: body.enriched,
        target_chars: body.target_chars,
    };
    let study = isolated(async move { service.full(request).await }).await?;

    Ok(Json(FullResponse {
        content: study.content,
    }))
}

// ═══════════════════════════════════════════════════════════
// Sectioned study
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
pub struct RubricBody {
    #[serde(default)]
    pub passage: String,
    /// 0-based section indices. Absent or empty → all sections.
    #[serde(default, alias = "requestedRubriques", alias = "requestedRubrics")]
    pub requested_rubrics: Option<Vec<usize>>,
    /// Soft length cap; 0 means no cap.
    #[serde(default)]
    pub tokens: usize,
}

/// `POST /api/generate-study`
pub async fn rubric_study(
    State(ctx): State<ApiContext>,
    body: Result<Json<RubricBody>, JsonRejection>,
) -> Result<Json<FullResponse>, ApiError> {
    let Json(body) = body?;
    let service = ctx.service.clone();
    let request = RubricRequest {
        passage: body.passage,
        rubrics: body.requested_rubrics,
        tokens: (body.tokens > 0).then_some(body.tokens),
    };
    let study = isolated(async move { service.rubric_study(request).await }).await?;

    Ok(Json(FullResponse {
        content: study.content,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_size_defaults_and_clamps() {
        assert_eq!(clamp_batch_size(None), 5);
        assert_eq!(clamp_batch_size(Some(0)), 1);
        assert_eq!(clamp_batch_size(Some(-3)), 1);
        assert_eq!(clamp_batch_size(Some(12)), 12);
        assert_eq!(clamp_batch_size(Some(500)), 50);
    }

    #[test]
    fn progressive_body_accepts_camel_case() {
        let body: ProgressiveBody = serde_json::from_str(
            r#"{"passage":"Genesis 1","batchSize":3,"startVerse":7,"targetChars":900}"#,
        )
        .unwrap();
        let req = body.into_request();
        assert_eq!(req.batch_size, 3);
        assert_eq!(req.start_verse, 7);
        assert_eq!(req.target_chars, Some(900));
        assert!(req.enriched);
    }

    #[test]
    fn progressive_body_defaults() {
        let body: ProgressiveBody = serde_json::from_str(r#"{"passage":"John 3"}"#).unwrap();
        let req = body.into_request();
        assert_eq!(req.batch_size, DEFAULT_BATCH_SIZE);
        assert_eq!(req.start_verse, 1);
        assert!(req.enriched);
        assert_eq!(req.target_chars, None);
    }

    #[test]
    fn rubric_body_accepts_legacy_field_name() {
        let body: RubricBody =
            serde_json::from_str(r#"{"passage":"Genesis 1","requestedRubriques":[0,9],"tokens":0}"#).unwrap();
        assert_eq!(body.requested_rubrics, Some(vec![0, 9]));
        assert_eq!(body.tokens, 0);
    }

    #[tokio::test]
    async fn isolated_turns_panic_into_internal_error() {
        let result = isolated(async {
            let verses: Vec<u32> = Vec::new();
            Ok::<u32, StudyError>(verses[0])
        })
        .await;
        assert!(matches!(result, Err(ApiError::Internal(_))));
    }

    #[tokio::test]
    async fn isolated_passes_study_errors_through() {
        let result = isolated(async { Err::<(), _>(StudyError::EmptyPassage) }).await;
        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn full_body_defaults_to_not_enriched() {
        let body: FullBody = serde_json::from_str(r#"{"passage":"John 3:16"}"#).unwrap();
        assert!(!body.enriched);
    }
}
