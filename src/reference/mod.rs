//! Passage reference parsing.
//!
//! `parse()` turns "John 3:16", "Genèse 1" or "1er Jean 2:1-5 LSG" into a
//! `CanonicalReference`. Three shapes are accepted, tried in order:
//! range (`<book> <c>:<s>-<e>`), single verse (`<book> <c>:<v>`), whole
//! chapter (`<book> <c>`). Anything after the numeric part is ignored.

pub mod books;

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

pub use books::{resolve_book, Book, Genre, Testament};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReferenceError {
    #[error("Invalid passage format: '{input}'. Expected e.g. 'John 3', 'John 3:16' or 'John 3:1-5'")]
    Format { input: String },

    #[error("Book not recognized: '{raw_book_token}'")]
    BookNotFound { raw_book_token: String },
}

/// Which verses of the chapter a reference selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VerseSpec {
    Chapter,
    Single { verse: u32 },
    Range { start: u32, end: u32 },
}

/// Parsed, unambiguous reference. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanonicalReference {
    pub book: Book,
    pub chapter: u32,
    pub verse_spec: VerseSpec,
    /// Book token as the caller typed it (used in headings).
    #[serde(skip)]
    pub label: String,
}

impl CanonicalReference {
    /// Explicit verse bounds, when the reference names them.
    pub fn explicit_range(&self) -> Option<(u32, u32)> {
        match self.verse_spec {
            VerseSpec::Chapter => None,
            VerseSpec::Single { verse } => Some((verse, verse)),
            VerseSpec::Range { start, end } => Some((start, end)),
        }
    }
}

impl fmt::Display for CanonicalReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.book.name(), self.chapter)?;
        match self.verse_spec {
            VerseSpec::Chapter => Ok(()),
            VerseSpec::Single { verse } => write!(f, ":{verse}"),
            VerseSpec::Range { start, end } => write!(f, ":{start}-{end}"),
        }
    }
}

/// Identifier of one verse, serialized as `BOOK.CHAPTER.NUMBER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VerseId {
    pub book: Book,
    pub chapter: u32,
    pub number: u32,
}

impl VerseId {
    pub fn new(book: Book, chapter: u32, number: u32) -> Self {
        Self { book, chapter, number }
    }
}

impl fmt::Display for VerseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.book.code(), self.chapter, self.number)
    }
}

impl FromStr for VerseId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().split('.');
        let (Some(book), Some(chapter), Some(number), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(format!("Invalid verse id: {s}"));
        };
        let book = Book::from_code(book).ok_or_else(|| format!("Unknown book code in verse id: {s}"))?;
        let chapter = chapter
            .parse::<u32>()
            .map_err(|_| format!("Invalid chapter in verse id: {s}"))?;
        let number = number
            .parse::<u32>()
            .map_err(|_| format!("Invalid verse number in verse id: {s}"))?;
        Ok(Self { book, chapter, number })
    }
}

static RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?)[\s,]+(\d+)\s*:\s*(\d+)\s*[-–]\s*(\d+)(?:\s+.*)?$")
        .expect("Invalid range reference regex")
});

static SINGLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?)[\s,]+(\d+)\s*:\s*(\d+)(?:\s+.*)?$").expect("Invalid verse reference regex")
});

static CHAPTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?)[\s,]+(\d+)(?:\s+.*)?$").expect("Invalid chapter reference regex")
});

/// Parse a free-text passage reference.
pub fn parse(raw: &str) -> Result<CanonicalReference, ReferenceError> {
    let input = raw.trim();
    let format_error = || ReferenceError::Format {
        input: input.to_string(),
    };

    let (book_token, chapter, verse_spec) = if let Some(caps) = RANGE_RE.captures(input) {
        let start = parse_number(&caps[3]).ok_or_else(format_error)?;
        let end = parse_number(&caps[4]).ok_or_else(format_error)?;
        if start > end {
            return Err(format_error());
        }
        (caps[1].to_string(), caps[2].to_string(), VerseSpec::Range { start, end })
    } else if let Some(caps) = SINGLE_RE.captures(input) {
        let verse = parse_number(&caps[3]).ok_or_else(format_error)?;
        (caps[1].to_string(), caps[2].to_string(), VerseSpec::Single { verse })
    } else if let Some(caps) = CHAPTER_RE.captures(input) {
        (caps[1].to_string(), caps[2].to_string(), VerseSpec::Chapter)
    } else {
        return Err(format_error());
    };
    let chapter = parse_number(&chapter).ok_or_else(format_error)?;

    let label = book_token.trim().to_string();
    let book = resolve_book(&label).ok_or_else(|| ReferenceError::BookNotFound {
        raw_book_token: label.clone(),
    })?;

    Ok(CanonicalReference {
        book,
        chapter,
        verse_spec,
        label,
    })
}

/// Parse a positive verse/chapter number.
fn parse_number(raw: &str) -> Option<u32> {
    raw.parse::<u32>().ok().filter(|n| *n >= 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_verse() {
        let r = parse("John 3:16").unwrap();
        assert_eq!(r.book, Book::John);
        assert_eq!(r.book.code(), "JHN");
        assert_eq!(r.chapter, 3);
        assert_eq!(r.verse_spec, VerseSpec::Single { verse: 16 });
        assert_eq!(r.label, "John");
    }

    #[test]
    fn parses_range() {
        let r = parse("John 3:1-5").unwrap();
        assert_eq!(r.verse_spec, VerseSpec::Range { start: 1, end: 5 });
        assert_eq!(r.explicit_range(), Some((1, 5)));
    }

    #[test]
    fn parses_whole_chapter() {
        let r = parse("John 3").unwrap();
        assert_eq!(r.verse_spec, VerseSpec::Chapter);
        assert_eq!(r.explicit_range(), None);
    }

    #[test]
    fn ignores_trailing_version_label() {
        let r = parse("Genèse 1 LSG").unwrap();
        assert_eq!(r.book, Book::Genesis);
        assert_eq!(r.chapter, 1);
        assert_eq!(r.verse_spec, VerseSpec::Chapter);

        let r = parse("Jean 3:16 Darby").unwrap();
        assert_eq!(r.verse_spec, VerseSpec::Single { verse: 16 });
    }

    #[test]
    fn multi_word_and_numbered_books() {
        let r = parse("1er Jean 2:1-3").unwrap();
        assert_eq!(r.book, Book::FirstJohn);
        assert_eq!(r.verse_spec, VerseSpec::Range { start: 1, end: 3 });

        let r = parse("Song of Songs 2").unwrap();
        assert_eq!(r.book, Book::SongOfSongs);

        let r = parse("1 John 4:8").unwrap();
        assert_eq!(r.book, Book::FirstJohn);
        assert_eq!(r.chapter, 4);
    }

    #[test]
    fn tolerates_spacing_and_comma() {
        let r = parse("  Genèse, 1  ").unwrap();
        assert_eq!(r.book, Book::Genesis);
        let r = parse("John 3 : 1 - 5").unwrap();
        assert_eq!(r.verse_spec, VerseSpec::Range { start: 1, end: 5 });
    }

    #[test]
    fn unknown_book_is_an_error() {
        let err = parse("Wibble 1").unwrap_err();
        assert_eq!(
            err,
            ReferenceError::BookNotFound {
                raw_book_token: "Wibble".into()
            }
        );
        assert!(err.to_string().contains("Wibble"));
    }

    #[test]
    fn malformed_input_is_a_format_error() {
        for input in ["", "John", "3:16", "John 0", "John 3:0", "John 3:5-1", "John 3:1-3:5"] {
            assert!(
                matches!(parse(input), Err(ReferenceError::Format { .. })),
                "expected format error for {input:?}"
            );
        }
    }

    #[test]
    fn display_uses_english_name() {
        assert_eq!(parse("Jean 3:16").unwrap().to_string(), "John 3:16");
        assert_eq!(parse("Jean 3:1-5").unwrap().to_string(), "John 3:1-5");
        assert_eq!(parse("Jean 3").unwrap().to_string(), "John 3");
    }

    #[test]
    fn verse_id_round_trips_through_display() {
        let id: VerseId = "GEN.1.10".parse().unwrap();
        assert_eq!(id, VerseId::new(Book::Genesis, 1, 10));
        assert_eq!(id.to_string(), "GEN.1.10");
        assert!("GEN.1".parse::<VerseId>().is_err());
        assert!("XYZ.1.1".parse::<VerseId>().is_err());
        assert!("GEN.1.x".parse::<VerseId>().is_err());
    }
}
