//! Shared annotation types and the `Annotator` seam.

use async_trait::async_trait;
use serde::Serialize;
use std::fmt;

use crate::reference::{Book, VerseId};

/// Which tier produced an annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceTier {
    Curated,
    Generative,
    Heuristic,
}

impl fmt::Display for SourceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Curated => write!(f, "curated"),
            Self::Generative => write!(f, "generative"),
            Self::Heuristic => write!(f, "heuristic"),
        }
    }
}

/// Explanatory text attached to one verse. `text` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Annotation {
    pub text: String,
    pub source_tier: SourceTier,
    /// Length of `text` in chars.
    pub length: usize,
}

impl Annotation {
    pub fn new(text: String, source_tier: SourceTier) -> Self {
        let length = text.chars().count();
        Self {
            text,
            source_tier,
            length,
        }
    }
}

/// One verse to annotate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationRequest {
    pub book: Book,
    pub chapter: u32,
    pub number: u32,
    pub verse_text: String,
}

impl AnnotationRequest {
    pub fn verse_id(&self) -> VerseId {
        VerseId::new(self.book, self.chapter, self.number)
    }

    /// Human-readable reference, e.g. "Genesis 1:3".
    pub fn reference(&self) -> String {
        format!("{} {}:{}", self.book.name(), self.chapter, self.number)
    }
}

/// Result of one tier attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TierOutcome {
    Produced(String),
    Miss(String),
}

impl TierOutcome {
    pub fn miss(reason: impl Into<String>) -> Self {
        Self::Miss(reason.into())
    }

    pub fn is_produced(&self) -> bool {
        matches!(self, Self::Produced(_))
    }
}

/// Per-request knobs passed to every tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnotateOptions {
    /// Per-verse character budget.
    pub budget: usize,
    /// Whether the curated tier may ask the LLM to elaborate.
    pub elaborate: bool,
}

/// One annotation strategy in the chain.
#[async_trait]
pub trait Annotator: Send + Sync {
    fn tier(&self) -> SourceTier;

    async fn annotate(&self, request: &AnnotationRequest, options: AnnotateOptions) -> TierOutcome;
}
