//! Curated commentary library and the curated annotation tier.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use super::generative::{build_elaboration_prompt, generate_checked};
use super::ollama::LlmClient;
use super::types::{AnnotateOptions, AnnotationRequest, Annotator, SourceTier, TierOutcome};
use crate::reference::VerseId;

/// Curated entries shorter than this are candidates for elaboration.
pub const RICHNESS_THRESHOLD: usize = 200;

#[derive(Error, Debug)]
pub enum CuratedError {
    #[error("Cannot read curated library {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid curated library JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid verse id in curated library: {0}")]
    InvalidVerseId(String),
}

/// Read access to curated explanations.
pub trait CuratedStore: Send + Sync {
    fn lookup(&self, id: &VerseId) -> Option<String>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One entry of a curated library file.
#[derive(Debug, Deserialize)]
struct CuratedEntry {
    /// `BOOK.C.V` verse id.
    id: String,
    explanation: String,
}

/// In-memory curated library keyed by verse id.
#[derive(Debug, Default)]
pub struct CuratedLibrary {
    entries: HashMap<VerseId, String>,
}

const SEED: &[(&str, &str)] = &[
    (
        "GEN.1.1",
        "\"In the beginning\" (bereshit) affirms the absolute origin of time and matter. \
         God (Elohim), a plural of majesty, hints at the fullness of the Godhead. \
         \"Created\" (bara) is creation out of nothing, a sovereign act. \
         \"The heavens and the earth\" name the whole cosmos, visible and invisible.",
    ),
    (
        "GEN.1.2",
        "Tohu va-bohu marks the absence of order and content. \
         The Spirit of God (ruach Elohim) hovers over the waters, preparing order by the divine presence.",
    ),
    (
        "EXO.1.1",
        "The list of names opens Exodus on the memory of the promises: God knows his chosen ones by name. \
         The move from Genesis to Exodus stands under the sign of faithfulness.",
    ),
    (
        "EXO.1.2",
        "A tribal roll call: each name carries a prophetic path (see Genesis 49). \
         Judah, the messianic tribe, prepares the royal line.",
    ),
    (
        "EXO.2.1",
        "Providence at work: Moses is born into the priestly line of Levi. \
         God shapes his instrument in the middle of adversity.",
    ),
    (
        "JHN.1.1",
        "The pre-existent Word (Logos) is with God and is God. \
         The prologue lays a trinitarian foundation and a high Christology.",
    ),
    (
        "JHN.1.3",
        "The Son is the mediator of creation: nothing created exists apart from him. \
         The Christ who creates is also the Christ who redeems.",
    ),
    (
        "JHN.3.16",
        "The motive of salvation is the love of God; its means, the gift of the only Son; \
         its goal, eternal life received through living faith.",
    ),
];

impl CuratedLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Library holding the built-in seed entries.
    pub fn seeded() -> Self {
        let mut library = Self::new();
        for (id, text) in SEED {
            if let Ok(id) = id.parse::<VerseId>() {
                library.insert(id, (*text).to_string());
            }
        }
        library
    }

    pub fn insert(&mut self, id: VerseId, explanation: String) {
        self.entries.insert(id, explanation);
    }

    /// Add entries from a JSON array of `{ "id": "GEN.1.1", "explanation": "..." }`.
    ///
    /// Later entries override earlier ones (and seed entries).
    pub fn extend_from_json(&mut self, json: &str) -> Result<usize, CuratedError> {
        let parsed: Vec<CuratedEntry> = serde_json::from_str(json)?;
        let mut added = 0;
        for entry in parsed {
            let id = entry
                .id
                .parse::<VerseId>()
                .map_err(|_| CuratedError::InvalidVerseId(entry.id.clone()))?;
            let text = entry.explanation.trim();
            if text.is_empty() {
                continue;
            }
            self.insert(id, text.to_string());
            added += 1;
        }
        Ok(added)
    }

    pub fn extend_from_file(&mut self, path: &Path) -> Result<usize, CuratedError> {
        let json = std::fs::read_to_string(path).map_err(|source| CuratedError::Io {
            path: path.display().to_string(),
            source,
        })?;
        self.extend_from_json(&json)
    }
}

impl CuratedStore for CuratedLibrary {
    fn lookup(&self, id: &VerseId) -> Option<String> {
        self.entries.get(id).cloned()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Looks up curated commentary, optionally elaborating short entries.
pub struct CuratedTier {
    store: Arc<dyn CuratedStore>,
    elaborator: Option<Arc<dyn LlmClient>>,
    timeout: Duration,
}

impl CuratedTier {
    pub fn new(store: Arc<dyn CuratedStore>) -> Self {
        Self {
            store,
            elaborator: None,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_elaborator(mut self, llm: Arc<dyn LlmClient>, timeout: Duration) -> Self {
        self.elaborator = Some(llm);
        self.timeout = timeout;
        self
    }

    async fn elaborate(&self, llm: &dyn LlmClient, request: &AnnotationRequest, curated: String, budget: usize) -> String {
        let prompt = build_elaboration_prompt(request, &curated, budget);
        match generate_checked(llm, &prompt, self.timeout).await {
            Ok(text) if text.chars().count() > curated.chars().count() => text,
            Ok(_) => curated,
            Err(reason) => {
                tracing::debug!(verse = %request.verse_id(), reason = %reason, "Curated elaboration failed");
                curated
            }
        }
    }
}

#[async_trait]
impl Annotator for CuratedTier {
    fn tier(&self) -> SourceTier {
        SourceTier::Curated
    }

    async fn annotate(&self, request: &AnnotationRequest, options: AnnotateOptions) -> TierOutcome {
        let Some(curated) = self
            .store
            .lookup(&request.verse_id())
            .filter(|text| !text.trim().is_empty())
        else {
            return TierOutcome::miss("no curated entry");
        };

        match &self.elaborator {
            Some(llm) if options.elaborate && curated.chars().count() < RICHNESS_THRESHOLD => {
                TierOutcome::Produced(self.elaborate(llm.as_ref(), request, curated, options.budget).await)
            }
            _ => TierOutcome::Produced(curated),
        }
    }
}
