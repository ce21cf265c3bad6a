//! External scripture text provider and verse enumeration.
//!
//! The provider is a fallible collaborator (`TextProvider`). The enumerator
//! wraps it and never fails: numeric ordering, placeholder ranges and
//! placeholder texts absorb every provider error.

pub mod api_bible;
pub mod enumerate;

use async_trait::async_trait;
use thiserror::Error;

use crate::reference::{Book, VerseId};

pub use api_bible::{ApiBibleCatalog, ApiBibleClient};
pub use enumerate::{sort_verse_ids, Enumeration, VerseEnumerator};

#[derive(Error, Debug)]
pub enum ScriptureError {
    #[error("Scripture provider unreachable at {0}")]
    Connection(String),

    #[error("Scripture provider returned error (status {status}): {body}")]
    Status { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),

    #[error("No Bible edition found for language '{0}'")]
    CatalogNotFound(String),

    #[error("Scripture API key is not configured")]
    MissingApiKey,
}

/// Source of raw verse ids and verse texts.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Verse ids (`"GEN.1.1"`, ...) of a chapter, in provider order.
    async fn list_verses(&self, book: Book, chapter: u32) -> Result<Vec<String>, ScriptureError>;

    /// Plain text of one verse.
    async fn verse_text(&self, id: &VerseId) -> Result<String, ScriptureError>;

    /// Resolved edition id, when the provider has one. Used by health checks.
    async fn edition_id(&self) -> Option<String> {
        None
    }
}

/// Resolves which Bible edition (catalog id) the provider should read.
///
/// Implementations memoize: resolution is deterministic, so the first
/// successful value is kept for the life of the process.
#[async_trait]
pub trait CatalogResolver: Send + Sync {
    async fn bible_id(&self) -> Result<String, ScriptureError>;
}

/// Strip markdown emphasis and collapse whitespace in provider text.
pub fn clean_plain_text(text: &str) -> String {
    text.replace("**", "")
        .replace('*', "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
