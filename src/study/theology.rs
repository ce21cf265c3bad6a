//! Chapter-level theological library: summaries, historical setting and
//! cross references. Chapters without an entry get a generic template.

use std::fmt;

use crate::reference::{Book, Genre, Testament};

/// Summary of one chapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterTheology {
    pub title: String,
    pub narrative: String,
    pub points: Vec<String>,
}

/// A related passage with a one-line note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrossReference {
    pub book: Book,
    pub chapter: u32,
    pub verse: Option<u32>,
    pub note: &'static str,
}

impl fmt::Display for CrossReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.book.name(), self.chapter)?;
        if let Some(verse) = self.verse {
            write!(f, ":{verse}")?;
        }
        write!(f, " - {}", self.note)
    }
}

struct LibraryEntry {
    book: Book,
    chapter: u32,
    title: &'static str,
    narrative: &'static str,
    points: [&'static str; 3],
}

const LIBRARY: &[LibraryEntry] = &[
    LibraryEntry {
        book: Book::Genesis,
        chapter: 4,
        title: "Cain and Abel: grace and judgment at the origins",
        narrative: "The tension after the fall comes to a head in the contrast between faith and works. \
                    Abel's offering by faith foreshadows the perfect Lamb; Cain's anger exposes religious pride.",
        points: [
            "Authentic worship against mere ritual.",
            "Sacrificial typology pointing to Christ.",
            "Brotherly ethics and moral responsibility.",
        ],
    },
    LibraryEntry {
        book: Book::Exodus,
        chapter: 2,
        title: "The formation of Moses: providence in adversity",
        narrative: "Drawn out of the water, Moses is prepared in Pharaoh's house. \
                    God shapes his instruments before he sends them.",
        points: [
            "God's sovereignty over history.",
            "Calling and preparation of the one who is sent.",
            "Redemption announced in figure.",
        ],
    },
    LibraryEntry {
        book: Book::John,
        chapter: 1,
        title: "The eternal Word: the supreme revelation",
        narrative: "The prologue unveils the divinity of Christ, the creating and revealing Word, \
                    source of life and light.",
        points: [
            "High christology: pre-existence and divinity.",
            "Creation through the Son.",
            "Revelation and salvation.",
        ],
    },
];

/// Library entry for the chapter, or a generic template.
pub fn theological_content(book: Book, chapter: u32) -> ChapterTheology {
    match LIBRARY.iter().find(|e| e.book == book && e.chapter == chapter) {
        Some(entry) => ChapterTheology {
            title: entry.title.to_string(),
            narrative: entry.narrative.to_string(),
            points: entry.points.iter().map(|p| p.to_string()).collect(),
        },
        None => {
            let name = book.name();
            ChapterTheology {
                title: format!("Theological study of {name} {chapter}"),
                narrative: format!(
                    "A study of {name} {chapter}: canonical setting, doctrine, application and christology."
                ),
                points: vec![
                    format!("Canonical setting of {name} {chapter}."),
                    "Main doctrinal teaching.".to_string(),
                    "Practical application for personal and community life.".to_string(),
                    "A Christ-centered perspective.".to_string(),
                ],
            }
        }
    }
}

/// Historical setting of the book.
pub fn historical_context(book: Book) -> &'static str {
    match book {
        Book::Genesis => "The age of origins and of the patriarchs, where the covenants are first established.",
        Book::Exodus => "Oppression in Egypt, deliverance, and the covenant at Sinai.",
        Book::John => "Second Temple Judea: the ministry of Jesus under Roman occupation.",
        other => match (other.testament(), other.genre()) {
            (_, Genre::Gospel | Genre::Acts) => "First-century Judea and the Roman world of the early church.",
            (Testament::New, _) => "The churches of the first century, gathered across the Roman empire.",
            (Testament::Old, Genre::MajorProphet | Genre::MinorProphet) => {
                "The prophetic era, from the divided kingdom through exile and return."
            }
            (Testament::Old, _) => "The history of Israel in the ancient Near East.",
        },
    }
}

/// Known cross references for the chapter. Empty when none are recorded.
pub fn cross_references(book: Book, chapter: u32) -> Vec<CrossReference> {
    match (book, chapter) {
        (Book::Genesis, 1) => vec![
            CrossReference {
                book: Book::Psalms,
                chapter: 33,
                verse: Some(6),
                note: "By the word of the Lord were the heavens made.",
            },
            CrossReference {
                book: Book::John,
                chapter: 1,
                verse: Some(1),
                note: "The creating Word.",
            },
            CrossReference {
                book: Book::Hebrews,
                chapter: 11,
                verse: Some(3),
                note: "The worlds were framed by the word of God.",
            },
        ],
        (Book::John, 1) => vec![
            CrossReference {
                book: Book::Genesis,
                chapter: 1,
                verse: Some(1),
                note: "An echo of the beginning.",
            },
            CrossReference {
                book: Book::Colossians,
                chapter: 1,
                verse: Some(16),
                note: "All things were created by him and for him.",
            },
        ],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn library_entry_is_returned() {
        let t = theological_content(Book::Exodus, 2);
        assert_eq!(t.title, "The formation of Moses: providence in adversity");
        assert_eq!(t.points.len(), 3);
    }

    #[test]
    fn unknown_chapter_gets_template() {
        let t = theological_content(Book::Ruth, 3);
        assert_eq!(t.title, "Theological study of Ruth 3");
        assert_eq!(t.points.len(), 4);
        assert!(t.points[0].contains("Ruth 3"));
    }

    #[test]
    fn historical_context_falls_back_by_testament() {
        assert!(historical_context(Book::Exodus).contains("Sinai"));
        assert!(historical_context(Book::Romans).contains("first century"));
        assert!(historical_context(Book::Amos).contains("prophetic era"));
    }

    #[test]
    fn cross_references_render_with_verse() {
        let refs = cross_references(Book::Genesis, 1);
        assert_eq!(refs.len(), 3);
        assert_eq!(
            refs[0].to_string(),
            "Psalms 33:6 - By the word of the Lord were the heavens made."
        );
        assert!(cross_references(Book::Ruth, 1).is_empty());
    }
}
