//! Shared handler state.

use std::sync::Arc;

use crate::study::StudyService;

/// State handed to every endpoint via `State<ApiContext>`.
#[derive(Clone)]
pub struct ApiContext {
    pub service: Arc<StudyService>,
    /// RFC 3339 timestamp of router construction.
    pub started_at: String,
}

impl ApiContext {
    pub fn new(service: Arc<StudyService>) -> Self {
        Self {
            service,
            started_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
