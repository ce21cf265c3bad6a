//! Verse enumeration with numeric ordering and best-effort fallback.

use std::sync::Arc;

use serde::Serialize;

use super::TextProvider;
use crate::reference::{Book, VerseId};

/// Ordered verse numbers of a chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Enumeration {
    pub numbers: Vec<u32>,
    /// True when the numbers are a synthesized placeholder range.
    pub degraded: bool,
}

impl Enumeration {
    pub fn first(&self) -> Option<u32> {
        self.numbers.first().copied()
    }

    pub fn last(&self) -> Option<u32> {
        self.numbers.last().copied()
    }
}

/// Sort verse ids by their trailing verse number (never lexically).
///
/// Ids whose trailing segment is not a number keep their relative order
/// after all numeric ids.
pub fn sort_verse_ids(mut ids: Vec<String>) -> Vec<String> {
    ids.sort_by_key(|id| trailing_number(id).map_or((1, 0), |n| (0, n)));
    ids
}

fn trailing_number(id: &str) -> Option<u32> {
    id.rsplit('.').next()?.trim().parse::<u32>().ok()
}

/// Lists verse numbers and fetches verse texts without ever failing.
pub struct VerseEnumerator {
    provider: Arc<dyn TextProvider>,
    fallback_ceiling: u32,
}

impl VerseEnumerator {
    pub fn new(provider: Arc<dyn TextProvider>, fallback_ceiling: u32) -> Self {
        Self {
            provider,
            fallback_ceiling: fallback_ceiling.max(1),
        }
    }

    pub fn provider(&self) -> &Arc<dyn TextProvider> {
        &self.provider
    }

    /// Ordered verse numbers of `book chapter`.
    ///
    /// Provider failure or an empty listing yields `1..=fallback_ceiling`
    /// flagged as degraded.
    pub async fn list_verse_numbers(&self, book: Book, chapter: u32) -> Enumeration {
        match self.provider.list_verses(book, chapter).await {
            Ok(ids) => {
                let mut numbers: Vec<u32> = sort_verse_ids(ids)
                    .iter()
                    .filter_map(|id| match id.parse::<VerseId>() {
                        Ok(v) if v.book == book && v.chapter == chapter && v.number >= 1 => {
                            Some(v.number)
                        }
                        _ => {
                            tracing::debug!(id, "Skipping unexpected verse id");
                            None
                        }
                    })
                    .collect();
                numbers.dedup();

                if numbers.is_empty() {
                    tracing::warn!(book = %book, chapter, "Provider returned no verses, using placeholder range");
                    self.placeholder()
                } else {
                    Enumeration {
                        numbers,
                        degraded: false,
                    }
                }
            }
            Err(e) => {
                tracing::warn!(book = %book, chapter, error = %e, "Verse listing failed, using placeholder range");
                self.placeholder()
            }
        }
    }

    /// Text of one verse. Provider failure yields a placeholder text.
    pub async fn fetch_verse_text(&self, book: Book, chapter: u32, number: u32) -> String {
        let id = VerseId::new(book, chapter, number);
        match self.provider.verse_text(&id).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => {
                tracing::warn!(verse = %id, "Provider returned empty verse text");
                placeholder_text(&id)
            }
            Err(e) => {
                tracing::warn!(verse = %id, error = %e, "Verse text fetch failed");
                placeholder_text(&id)
            }
        }
    }

    fn placeholder(&self) -> Enumeration {
        Enumeration {
            numbers: (1..=self.fallback_ceiling).collect(),
            degraded: true,
        }
    }
}

/// Placeholder shown when the provider cannot supply a verse.
pub fn placeholder_text(id: &VerseId) -> String {
    format!("[Placeholder text] {id}")
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::scripture::ScriptureError;
    use async_trait::async_trait;
    use std::collections::HashMap;

    /// In-memory provider double.
    pub(crate) struct FakeProvider {
        pub ids: Result<Vec<String>, u16>,
        pub texts: HashMap<String, String>,
        pub fail_text: bool,
    }

    impl FakeProvider {
        pub fn with_ids(ids: &[&str]) -> Self {
            Self {
                ids: Ok(ids.iter().map(|s| s.to_string()).collect()),
                texts: HashMap::new(),
                fail_text: false,
            }
        }

        pub fn failing(status: u16) -> Self {
            Self {
                ids: Err(status),
                texts: HashMap::new(),
                fail_text: true,
            }
        }

        pub fn text(mut self, id: &str, text: &str) -> Self {
            self.texts.insert(id.to_string(), text.to_string());
            self
        }
    }

    #[async_trait]
    impl TextProvider for FakeProvider {
        async fn list_verses(&self, _book: Book, _chapter: u32) -> Result<Vec<String>, ScriptureError> {
            match &self.ids {
                Ok(ids) => Ok(ids.clone()),
                Err(status) => Err(ScriptureError::Status {
                    status: *status,
                    body: "unavailable".into(),
                }),
            }
        }

        async fn verse_text(&self, id: &VerseId) -> Result<String, ScriptureError> {
            if self.fail_text {
                return Err(ScriptureError::Connection("fake".into()));
            }
            Ok(self
                .texts
                .get(&id.to_string())
                .cloned()
                .unwrap_or_else(|| format!("Text of {id}.")))
        }
    }

    #[test]
    fn sorts_numerically_not_lexically() {
        let sorted = sort_verse_ids(vec![
            "GEN.1.10".into(),
            "GEN.1.2".into(),
            "GEN.1.1".into(),
        ]);
        assert_eq!(sorted, vec!["GEN.1.1", "GEN.1.2", "GEN.1.10"]);
    }

    #[test]
    fn non_numeric_ids_sort_last() {
        let sorted = sort_verse_ids(vec!["GEN.1.x".into(), "GEN.1.3".into(), "GEN.1.1".into()]);
        assert_eq!(sorted, vec!["GEN.1.1", "GEN.1.3", "GEN.1.x"]);
    }

    #[tokio::test]
    async fn lists_sorted_numbers() {
        let provider = Arc::new(FakeProvider::with_ids(&["GEN.1.10", "GEN.1.2", "GEN.1.1"]));
        let enumerator = VerseEnumerator::new(provider, 31);
        let e = enumerator.list_verse_numbers(Book::Genesis, 1).await;
        assert_eq!(e.numbers, vec![1, 2, 10]);
        assert!(!e.degraded);
        assert_eq!(e.first(), Some(1));
        assert_eq!(e.last(), Some(10));
    }

    #[tokio::test]
    async fn provider_failure_falls_back_to_placeholder_range() {
        let enumerator = VerseEnumerator::new(Arc::new(FakeProvider::failing(503)), 31);
        let e = enumerator.list_verse_numbers(Book::Genesis, 1).await;
        assert!(e.degraded);
        assert_eq!(e.numbers.len(), 31);
        assert_eq!(e.first(), Some(1));
        assert_eq!(e.last(), Some(31));
    }

    #[tokio::test]
    async fn empty_listing_falls_back_to_placeholder_range() {
        let enumerator = VerseEnumerator::new(Arc::new(FakeProvider::with_ids(&[])), 12);
        let e = enumerator.list_verse_numbers(Book::John, 3).await;
        assert!(e.degraded);
        assert_eq!(e.numbers, (1..=12).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn foreign_ids_are_skipped() {
        let provider = Arc::new(FakeProvider::with_ids(&["GEN.1.2", "EXO.1.1", "junk", "GEN.1.1"]));
        let enumerator = VerseEnumerator::new(provider, 31);
        let e = enumerator.list_verse_numbers(Book::Genesis, 1).await;
        assert_eq!(e.numbers, vec![1, 2]);
    }

    #[tokio::test]
    async fn text_failure_yields_placeholder() {
        let enumerator = VerseEnumerator::new(Arc::new(FakeProvider::failing(500)), 31);
        let text = enumerator.fetch_verse_text(Book::John, 3, 16).await;
        assert_eq!(text, "[Placeholder text] JHN.3.16");
    }

    #[tokio::test]
    async fn text_is_returned_from_provider() {
        let provider = FakeProvider::with_ids(&[]).text("JHN.3.16", "For God so loved the world.");
        let enumerator = VerseEnumerator::new(Arc::new(provider), 31);
        assert_eq!(
            enumerator.fetch_verse_text(Book::John, 3, 16).await,
            "For God so loved the world."
        );
    }
}
