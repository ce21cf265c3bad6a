//! End-to-end study orchestration.
//!
//! parse → verse range → page → per-verse fetch + annotate (bounded,
//! order-preserving fan-out) → assemble.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use futures_util::stream::{self, StreamExt};
use serde::Serialize;
use thiserror::Error;

use super::assemble::{assemble, AssemblyMode, StudyHeading, Verse};
use super::batch::{self, PageBounds};
use super::rubrics::{self, EXCERPT_VERSES, RUBRICS};
use crate::config::ServiceConfig;
use crate::pipeline::{
    Annotation, AnnotationChain, AnnotationRequest, BudgetAllocator, BudgetSpec, CuratedLibrary, CuratedStore,
    CuratedTier, GenerativeTier, LlmClient, LlmError, OllamaClient,
};
use crate::reference::{self, CanonicalReference, ReferenceError, VerseSpec};
use crate::scripture::{ApiBibleCatalog, ApiBibleClient, CatalogResolver, ScriptureError, TextProvider, VerseEnumerator};

#[derive(Error, Debug)]
pub enum StudyError {
    #[error("Passage is required")]
    EmptyPassage,

    #[error(transparent)]
    Reference(#[from] ReferenceError),

    #[error("Unknown rubric index {index} (expected 0 to {max})")]
    UnknownRubric { index: usize, max: usize },
}

#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("Scripture provider setup failed: {0}")]
    Scripture(#[from] ScriptureError),

    #[error("Generative provider setup failed: {0}")]
    Llm(#[from] LlmError),
}

/// Progressive request, already defaulted and clamped by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressiveRequest {
    pub passage: String,
    pub batch_size: u32,
    pub start_verse: u32,
    pub enriched: bool,
    pub target_chars: Option<usize>,
}

/// Whole-passage request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyRequest {
    pub passage: String,
    pub enriched: bool,
    pub target_chars: Option<usize>,
}

/// One assembled page and its accounting.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressivePage {
    pub reference: CanonicalReference,
    pub content: String,
    pub bounds: PageBounds,
    pub budget: BudgetSpec,
}

/// Whole-passage study.
#[derive(Debug, Clone, Serialize)]
pub struct FullStudy {
    pub reference: CanonicalReference,
    pub content: String,
    pub verse_count: usize,
    pub budget: BudgetSpec,
}

/// Sectioned chapter study request. `rubrics` holds 0-based section
/// indices; `None` or empty selects all of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RubricRequest {
    pub passage: String,
    pub rubrics: Option<Vec<usize>>,
    /// Soft length cap, roughly five characters per token.
    pub tokens: Option<usize>,
}

/// Sectioned chapter study.
#[derive(Debug, Clone, Serialize)]
pub struct RubricStudy {
    pub reference: CanonicalReference,
    pub content: String,
    pub rubric_count: usize,
}

/// Runtime facts reported by the health endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthSnapshot {
    pub bible_id: Option<String>,
    pub generative: bool,
    pub curated_entries: usize,
}

pub struct StudyService {
    enumerator: VerseEnumerator,
    chain: AnnotationChain,
    max_concurrency: usize,
    max_range_verses: u32,
    default_target_chars: usize,
    curated_entries: usize,
}

impl StudyService {
    pub fn new(enumerator: VerseEnumerator, chain: AnnotationChain) -> Self {
        Self {
            enumerator,
            chain,
            max_concurrency: 4,
            max_range_verses: 176,
            default_target_chars: 1500,
            curated_entries: 0,
        }
    }

    pub fn with_max_concurrency(mut self, max: usize) -> Self {
        self.max_concurrency = max.max(1);
        self
    }

    pub fn with_max_range_verses(mut self, max: u32) -> Self {
        self.max_range_verses = max.max(1);
        self
    }

    pub fn with_default_target_chars(mut self, chars: usize) -> Self {
        self.default_target_chars = chars;
        self
    }

    pub fn with_curated_entries(mut self, count: usize) -> Self {
        self.curated_entries = count;
        self
    }

    /// Wire providers and tiers from configuration.
    pub fn from_config(config: &ServiceConfig) -> Result<Self, BootstrapError> {
        let timeout_secs = config.llm_timeout_secs;

        let catalog: Arc<dyn CatalogResolver> = Arc::new(ApiBibleCatalog::new(
            &config.bible_api_base,
            config.bible_api_key.clone(),
            config.bible_id.clone(),
            &config.bible_language,
            timeout_secs,
        )?);
        let provider: Arc<dyn TextProvider> = Arc::new(ApiBibleClient::new(
            &config.bible_api_base,
            config.bible_api_key.clone(),
            catalog,
            timeout_secs,
        )?);
        let enumerator = VerseEnumerator::new(provider, config.fallback_verse_ceiling);

        let mut library = CuratedLibrary::seeded();
        if let Some(path) = &config.curated_library_path {
            match library.extend_from_file(Path::new(path)) {
                Ok(added) => tracing::info!(path = %path, added, "Loaded curated library"),
                Err(e) => tracing::warn!(error = %e, "Curated library not loaded, using built-in entries"),
            }
        }
        let curated_entries = library.len();

        let llm: Option<Arc<dyn LlmClient>> = match &config.ollama_model {
            Some(model) => Some(Arc::new(OllamaClient::new(&config.ollama_url, model, timeout_secs)?)),
            None => None,
        };

        let timeout = Duration::from_secs(timeout_secs);
        let mut curated = CuratedTier::new(Arc::new(library));
        if let Some(llm) = &llm {
            curated = curated.with_elaborator(llm.clone(), timeout);
        }

        let allocator = BudgetAllocator::new(config.budget_floor, config.budget_ceiling);
        let mut chain = AnnotationChain::new(allocator, config.tier_order).with_curated(Arc::new(curated));
        if let Some(llm) = llm {
            tracing::info!(model = llm.model(), "Generative tier enabled");
            chain = chain.with_generative(Arc::new(GenerativeTier::new(llm, timeout)));
        }

        Ok(Self::new(enumerator, chain)
            .with_max_concurrency(config.max_concurrency)
            .with_max_range_verses(config.max_range_verses)
            .with_default_target_chars(config.default_target_chars)
            .with_curated_entries(curated_entries))
    }

    /// One page of a progressive study.
    pub async fn progressive(&self, request: ProgressiveRequest) -> Result<ProgressivePage, StudyError> {
        let reference = parse_passage(&request.passage)?;
        let (range_start, range_end) = self.verse_range(&reference).await;
        let bounds = batch::page(range_start, range_end, request.start_verse, request.batch_size);

        let target = request.target_chars.unwrap_or(self.default_target_chars);
        let budget = self.chain.allocator().budget(target, bounds.len());
        let items = self
            .annotate_verses(&reference, bounds.verses().collect(), budget.per_verse_chars, request.enriched)
            .await;

        let mode = AssemblyMode::Batch {
            at_range_start: !bounds.is_empty && bounds.start_verse == range_start,
        };
        let content = assemble(&heading(&reference), &items, mode);

        tracing::info!(
            reference = %reference,
            range = ?bounds.range_label(),
            has_more = bounds.has_more,
            progress = bounds.total_progress_pct,
            per_verse_chars = budget.per_verse_chars,
            "Progressive page assembled"
        );

        Ok(ProgressivePage {
            reference,
            content,
            bounds,
            budget,
        })
    }

    /// The whole passage in one response.
    pub async fn full(&self, request: StudyRequest) -> Result<FullStudy, StudyError> {
        let reference = parse_passage(&request.passage)?;
        let (range_start, range_end) = self.verse_range(&reference).await;
        let numbers: Vec<u32> = (range_start..=range_end).collect();

        let target = request.target_chars.unwrap_or(self.default_target_chars);
        let budget = self.chain.allocator().budget(target, numbers.len());
        let verse_count = numbers.len();
        let items = self
            .annotate_verses(&reference, numbers, budget.per_verse_chars, request.enriched)
            .await;
        let content = assemble(&heading(&reference), &items, AssemblyMode::FullChapter);

        tracing::info!(reference = %reference, verse_count, "Full study assembled");

        Ok(FullStudy {
            reference,
            content,
            verse_count,
            budget,
        })
    }

    /// Chapter study organized in numbered sections, opened by a short
    /// excerpt of the passage.
    pub async fn rubric_study(&self, request: RubricRequest) -> Result<RubricStudy, StudyError> {
        let reference = parse_passage(&request.passage)?;
        let selection = rubrics::select(request.rubrics.as_deref()).map_err(|index| StudyError::UnknownRubric {
            index,
            max: RUBRICS.len() - 1,
        })?;

        let (range_start, range_end) = self.verse_range(&reference).await;
        let numbers: Vec<u32> = (range_start..=range_end).take(EXCERPT_VERSES).collect();
        let excerpt = self.fetch_verses(&reference, numbers).await;

        let content = rubrics::render(
            &heading(&reference),
            reference.book,
            reference.chapter,
            &excerpt,
            &selection,
            request.tokens,
        );

        tracing::info!(reference = %reference, rubrics = selection.len(), "Rubric study assembled");

        Ok(RubricStudy {
            reference,
            content,
            rubric_count: selection.len(),
        })
    }

    pub async fn health(&self) -> HealthSnapshot {
        HealthSnapshot {
            bible_id: self.enumerator.provider().edition_id().await,
            generative: self.chain.capabilities().generative,
            curated_entries: self.curated_entries,
        }
    }

    /// Verse bounds of the reference. Whole chapters are enumerated;
    /// explicit ranges longer than `max_range_verses` are clamped to the
    /// chapter's last verse and to `max_range_verses`.
    async fn verse_range(&self, reference: &CanonicalReference) -> (u32, u32) {
        match reference.verse_spec {
            VerseSpec::Single { verse } => (verse, verse),
            VerseSpec::Range { start, end } if end - start < self.max_range_verses => (start, end),
            VerseSpec::Range { start, end } => {
                let last = self.chapter_bounds(reference).await.1;
                let clamped = end
                    .min(last)
                    .min(start.saturating_add(self.max_range_verses - 1))
                    .max(start);
                tracing::warn!(
                    reference = %reference,
                    requested_end = end,
                    end = clamped,
                    "Clamping oversized verse range"
                );
                (start, clamped)
            }
            VerseSpec::Chapter => self.chapter_bounds(reference).await,
        }
    }

    async fn chapter_bounds(&self, reference: &CanonicalReference) -> (u32, u32) {
        let enumeration = self
            .enumerator
            .list_verse_numbers(reference.book, reference.chapter)
            .await;
        if enumeration.degraded {
            tracing::warn!(reference = %reference, "Using placeholder verse range");
        }
        match (enumeration.first(), enumeration.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => (1, 1),
        }
    }

    async fn fetch_verses(&self, reference: &CanonicalReference, numbers: Vec<u32>) -> Vec<Verse> {
        let book = reference.book;
        let chapter = reference.chapter;

        stream::iter(numbers)
            .map(|number| async move {
                Verse {
                    number,
                    text: self.enumerator.fetch_verse_text(book, chapter, number).await,
                }
            })
            .buffered(self.max_concurrency)
            .collect()
            .await
    }

    async fn annotate_verses(
        &self,
        reference: &CanonicalReference,
        numbers: Vec<u32>,
        budget: usize,
        enriched: bool,
    ) -> Vec<(Verse, Annotation)> {
        let book = reference.book;
        let chapter = reference.chapter;

        stream::iter(numbers)
            .map(|number| async move {
                let text = self.enumerator.fetch_verse_text(book, chapter, number).await;
                let request = AnnotationRequest {
                    book,
                    chapter,
                    number,
                    verse_text: text,
                };
                let annotation = self.chain.annotate(&request, budget, enriched).await;
                (
                    Verse {
                        number,
                        text: request.verse_text,
                    },
                    annotation,
                )
            })
            .buffered(self.max_concurrency)
            .collect()
            .await
    }
}

fn parse_passage(passage: &str) -> Result<CanonicalReference, StudyError> {
    let passage = passage.trim();
    if passage.is_empty() {
        return Err(StudyError::EmptyPassage);
    }
    Ok(reference::parse(passage)?)
}

fn heading(reference: &CanonicalReference) -> StudyHeading {
    StudyHeading {
        label: reference.label.clone(),
        chapter: reference.chapter,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{SourceTier, TierOrder};
    use crate::reference::{Book, VerseId};
    use crate::scripture::enumerate::tests::FakeProvider;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Provider that lists `verses` verses of John 3 and records how many
    /// text fetches run at once.
    struct CountingProvider {
        verses: u32,
        delay: Duration,
        fetches: AtomicUsize,
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    impl CountingProvider {
        fn new(verses: u32, delay_ms: u64) -> Self {
            Self {
                verses,
                delay: Duration::from_millis(delay_ms),
                fetches: AtomicUsize::new(0),
                in_flight: AtomicUsize::new(0),
                peak: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl TextProvider for CountingProvider {
        async fn list_verses(&self, _book: Book, _chapter: u32) -> Result<Vec<String>, ScriptureError> {
            Ok((1..=self.verses).map(|n| format!("JHN.3.{n}")).collect())
        }

        async fn verse_text(&self, id: &VerseId) -> Result<String, ScriptureError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(format!("Text {}.", id.number))
        }
    }

    fn counting_service(provider: Arc<CountingProvider>, max_concurrency: usize) -> StudyService {
        let chain = AnnotationChain::new(BudgetAllocator::default(), TierOrder::CuratedFirst);
        StudyService::new(VerseEnumerator::new(provider, 31), chain).with_max_concurrency(max_concurrency)
    }

    fn full_request(passage: &str) -> StudyRequest {
        StudyRequest {
            passage: passage.into(),
            enriched: false,
            target_chars: None,
        }
    }

    fn genesis_one() -> FakeProvider {
        let ids: Vec<String> = (1..=31).rev().map(|n| format!("GEN.1.{n}")).collect();
        let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        FakeProvider::with_ids(&refs)
            .text("GEN.1.1", "In the beginning God created the heaven and the earth.")
            .text("GEN.1.3", "And God said, Let there be light: and there was light.")
    }

    fn service(provider: FakeProvider) -> StudyService {
        let chain = AnnotationChain::new(BudgetAllocator::default(), TierOrder::CuratedFirst)
            .with_curated(Arc::new(CuratedTier::new(Arc::new(CuratedLibrary::seeded()))));
        StudyService::new(VerseEnumerator::new(Arc::new(provider), 31), chain)
            .with_max_concurrency(3)
            .with_curated_entries(8)
    }

    fn progressive(passage: &str, start_verse: u32, batch_size: u32) -> ProgressiveRequest {
        ProgressiveRequest {
            passage: passage.into(),
            batch_size,
            start_verse,
            enriched: true,
            target_chars: Some(500),
        }
    }

    #[tokio::test]
    async fn first_page_of_genesis_one() {
        let svc = service(genesis_one());
        let page = svc.progressive(progressive("Genesis 1", 1, 5)).await.unwrap();

        assert_eq!(page.bounds.range_label().as_deref(), Some("1-5"));
        assert!(page.bounds.has_more);
        assert_eq!(page.bounds.next_start, Some(6));
        assert_eq!(page.bounds.total_progress_pct, 16.1);
        assert_eq!(page.budget.per_verse_chars, 140);

        assert!(page.content.starts_with("# Verse-by-Verse Study - Genesis Chapter 1"));
        assert_eq!(page.content.matches("## VERSE ").count(), 5);
        for n in 1..=5 {
            assert!(page.content.contains(&format!("## VERSE {n}\n")));
        }
        assert!(page.content.contains("Let there be light"));
        // Verses are in order.
        let p1 = page.content.find("## VERSE 1\n").unwrap();
        let p5 = page.content.find("## VERSE 5\n").unwrap();
        assert!(p1 < p5);
    }

    #[tokio::test]
    async fn annotations_respect_per_verse_budget() {
        let svc = service(genesis_one());
        let reference = reference::parse("Genesis 1").unwrap();
        let items = svc.annotate_verses(&reference, vec![1, 2, 3, 4, 5], 140, true).await;
        assert_eq!(items.len(), 5);
        assert_eq!(items[0].1.source_tier, SourceTier::Curated);
        assert_eq!(items[2].1.source_tier, SourceTier::Heuristic);
        for (verse, annotation) in &items {
            assert!(!annotation.text.is_empty());
            assert!(annotation.length <= 140, "verse {} too long: {}", verse.number, annotation.length);
            assert!(annotation.length >= 60, "verse {} too short: {}", verse.number, annotation.length);
        }
    }

    #[tokio::test]
    async fn later_page_has_no_intro() {
        let svc = service(genesis_one());
        let page = svc.progressive(progressive("Genesis 1", 6, 5)).await.unwrap();
        assert!(page.content.starts_with("## VERSE 6"));
        assert_eq!(page.bounds.range_label().as_deref(), Some("6-10"));
    }

    #[tokio::test]
    async fn page_past_end_is_empty() {
        let svc = service(genesis_one());
        let page = svc.progressive(progressive("Genesis 1", 40, 5)).await.unwrap();
        assert!(page.bounds.is_empty);
        assert_eq!(page.bounds.next_start, None);
        assert_eq!(page.bounds.total_progress_pct, 100.0);
        assert_eq!(page.content, "");
    }

    #[tokio::test]
    async fn explicit_range_bypasses_enumeration() {
        let svc = service(FakeProvider::failing(500));
        let page = svc.progressive(progressive("John 3:16-18", 1, 5)).await.unwrap();
        assert_eq!(page.bounds.range_label().as_deref(), Some("16-18"));
        assert!(!page.bounds.has_more);
        assert!(page.content.starts_with("# Verse-by-Verse Study - John Chapter 3"));
        assert!(page.content.contains("[Placeholder text] JHN.3.17"));
    }

    #[tokio::test]
    async fn degraded_enumeration_uses_placeholder_range() {
        let svc = service(FakeProvider::failing(503));
        let page = svc.progressive(progressive("Ruth 1", 29, 5)).await.unwrap();
        assert_eq!(page.bounds.range_label().as_deref(), Some("29-31"));
        assert!(!page.bounds.has_more);
    }

    #[tokio::test]
    async fn full_study_single_verse() {
        let svc = service(FakeProvider::with_ids(&[]).text("JHN.3.16", "For God so loved the world."));
        let study = svc
            .full(StudyRequest {
                passage: "Jean 3:16".into(),
                enriched: false,
                target_chars: None,
            })
            .await
            .unwrap();
        assert_eq!(study.verse_count, 1);
        assert!(study.content.starts_with("# Verse-by-Verse Study - Jean Chapter 3"));
        assert!(study.content.contains("For God so loved the world."));
        assert!(study.content.contains("The motive of salvation"));
        assert!(!study.content.ends_with("---\n\n"));
    }

    #[tokio::test]
    async fn empty_passage_is_rejected() {
        let svc = service(genesis_one());
        let err = svc.progressive(progressive("   ", 1, 5)).await.unwrap_err();
        assert!(matches!(err, StudyError::EmptyPassage));
    }

    #[tokio::test]
    async fn parse_errors_propagate() {
        let svc = service(genesis_one());
        let err = svc.progressive(progressive("Wibble 1", 1, 5)).await.unwrap_err();
        assert!(matches!(
            err,
            StudyError::Reference(ReferenceError::BookNotFound { .. })
        ));
        let err = svc.progressive(progressive("John", 1, 5)).await.unwrap_err();
        assert!(matches!(err, StudyError::Reference(ReferenceError::Format { .. })));
    }

    #[tokio::test]
    async fn health_reports_capabilities() {
        let svc = service(genesis_one());
        let health = svc.health().await;
        assert_eq!(
            health,
            HealthSnapshot {
                bible_id: None,
                generative: false,
                curated_entries: 8
            }
        );
    }

    #[test]
    fn from_config_builds_with_defaults() {
        let svc = StudyService::from_config(&ServiceConfig::default()).unwrap();
        assert!(!svc.chain.capabilities().generative);
        assert!(svc.chain.capabilities().curated);
        assert_eq!(svc.curated_entries, 8);
        assert_eq!(svc.max_concurrency, 4);
    }

    #[tokio::test]
    async fn oversized_range_is_clamped_to_chapter() {
        let provider = Arc::new(CountingProvider::new(36, 0));
        let svc = counting_service(provider.clone(), 4);
        let study = svc.full(full_request("John 3:1-20000")).await.unwrap();
        assert_eq!(study.verse_count, 36);
        assert_eq!(provider.fetches.load(Ordering::SeqCst), 36);
        assert_eq!(study.content.matches("## VERSE ").count(), 36);
    }

    #[tokio::test]
    async fn near_u32_max_range_stays_bounded() {
        let provider = Arc::new(CountingProvider::new(36, 0));
        let svc = counting_service(provider.clone(), 4);
        let study = svc.full(full_request("John 3:30-4000000000")).await.unwrap();
        assert_eq!(study.verse_count, 7);
        assert!(study.content.contains("## VERSE 36\n"));
    }

    #[tokio::test]
    async fn oversized_range_on_degraded_listing_uses_fallback_ceiling() {
        let svc = service(FakeProvider::failing(503)).with_max_range_verses(50);
        let page = svc.progressive(progressive("John 3:1-9000", 1, 5)).await.unwrap();
        assert_eq!(page.bounds.stats.total, 31);
    }

    #[tokio::test]
    async fn range_within_limit_is_not_enumerated() {
        let svc = service(FakeProvider::failing(500)).with_max_range_verses(10);
        let page = svc.progressive(progressive("John 3:1-10", 1, 50)).await.unwrap();
        assert_eq!(page.bounds.range_label().as_deref(), Some("1-10"));
    }

    #[tokio::test]
    async fn fan_out_is_capped_and_ordered() {
        let provider = Arc::new(CountingProvider::new(12, 20));
        let svc = counting_service(provider.clone(), 3);
        let reference = reference::parse("John 3").unwrap();
        let items = svc
            .annotate_verses(&reference, (1..=12).collect(), 200, false)
            .await;

        assert_eq!(provider.peak.load(Ordering::SeqCst), 3);
        assert_eq!(provider.in_flight.load(Ordering::SeqCst), 0);
        let numbers: Vec<u32> = items.iter().map(|(v, _)| v.number).collect();
        assert_eq!(numbers, (1..=12).collect::<Vec<_>>());
        for (verse, _) in &items {
            assert_eq!(verse.text, format!("Text {}.", verse.number));
        }
    }

    #[tokio::test]
    async fn rubric_study_quotes_excerpt_and_sections() {
        let svc = service(genesis_one());
        let study = svc
            .rubric_study(RubricRequest {
                passage: "Genesis 1".into(),
                rubrics: None,
                tokens: None,
            })
            .await
            .unwrap();
        assert_eq!(study.rubric_count, 28);
        assert!(study.content.starts_with("# 28-Point Study - Genesis 1"));
        assert!(study.content.contains("1. In the beginning God created"));
        assert!(study.content.contains("8. Text of GEN.1.8."));
        assert!(!study.content.contains("9. Text of GEN.1.9."));
        assert!(study.content.contains("## 28. Action plan"));
    }

    #[tokio::test]
    async fn rubric_study_honours_selection() {
        let svc = service(genesis_one());
        let study = svc
            .rubric_study(RubricRequest {
                passage: "Genesis 1".into(),
                rubrics: Some(vec![0, 9]),
                tokens: None,
            })
            .await
            .unwrap();
        assert_eq!(study.rubric_count, 2);
        assert!(study.content.contains("## 10. Biblical parallels"));
        assert!(!study.content.contains("## 2. Literary structure"));
    }

    #[tokio::test]
    async fn rubric_study_rejects_unknown_section() {
        let svc = service(genesis_one());
        let err = svc
            .rubric_study(RubricRequest {
                passage: "Genesis 1".into(),
                rubrics: Some(vec![3, 31]),
                tokens: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StudyError::UnknownRubric { index: 31, max: 27 }));
    }
}
