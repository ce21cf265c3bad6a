//! Markdown assembly of verse/annotation pairs.

use serde::Serialize;

use crate::pipeline::Annotation;

const BLOCK_SEPARATOR: &str = "\n\n---\n\n";

/// One verse with its text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verse {
    pub number: u32,
    pub text: String,
}

/// How the content will be delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyMode {
    /// Whole passage in one response. Always carries the intro.
    FullChapter,
    /// One page of a progressive study. The intro is only on the page
    /// that begins at the range start.
    Batch { at_range_start: bool },
}

impl AssemblyMode {
    fn includes_intro(&self) -> bool {
        match self {
            Self::FullChapter => true,
            Self::Batch { at_range_start } => *at_range_start,
        }
    }
}

/// Title data for the intro block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyHeading {
    /// Book as the caller typed it.
    pub label: String,
    pub chapter: u32,
}

/// Render the study content.
pub fn assemble(heading: &StudyHeading, items: &[(Verse, Annotation)], mode: AssemblyMode) -> String {
    let mut out = String::new();

    if mode.includes_intro() {
        out.push_str(&intro(heading));
    }

    for (verse, annotation) in items {
        out.push_str(&verse_block(verse, annotation));
        out.push_str(BLOCK_SEPARATOR);
    }

    match mode {
        AssemblyMode::FullChapter => out.trim_end_matches(BLOCK_SEPARATOR).trim_end().to_string(),
        // Pages are concatenated by the caller; keep the trailing separator.
        AssemblyMode::Batch { .. } => out,
    }
}

fn intro(heading: &StudyHeading) -> String {
    format!(
        "# Verse-by-Verse Study - {} Chapter {}\n\n\
         This study walks through the text verse by verse, pairing each verse \
         with a theological explanation.\n\n",
        heading.label, heading.chapter
    )
}

fn verse_block(verse: &Verse, annotation: &Annotation) -> String {
    format!(
        "## VERSE {}\n\n**BIBLE TEXT:**\n{}\n\n**THEOLOGICAL EXPLANATION:**\n{}",
        verse.number,
        verse.text.trim(),
        annotation.text.trim()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::SourceTier;

    fn heading() -> StudyHeading {
        StudyHeading {
            label: "Genèse".into(),
            chapter: 1,
        }
    }

    fn item(n: u32) -> (Verse, Annotation) {
        (
            Verse {
                number: n,
                text: format!("Text {n}."),
            },
            Annotation::new(format!("Explanation {n}."), SourceTier::Heuristic),
        )
    }

    #[test]
    fn full_chapter_has_intro_and_blocks() {
        let out = assemble(&heading(), &[item(1), item(2)], AssemblyMode::FullChapter);
        assert!(out.starts_with("# Verse-by-Verse Study - Genèse Chapter 1\n\n"));
        assert!(out.contains("## VERSE 1\n\n**BIBLE TEXT:**\nText 1.\n\n**THEOLOGICAL EXPLANATION:**\nExplanation 1."));
        assert!(out.contains("---\n\n## VERSE 2"));
        assert!(out.ends_with("Explanation 2."));
    }

    #[test]
    fn batch_at_range_start_has_intro() {
        let out = assemble(&heading(), &[item(1)], AssemblyMode::Batch { at_range_start: true });
        assert!(out.starts_with("# Verse-by-Verse Study"));
        assert!(out.ends_with("---\n\n"));
    }

    #[test]
    fn later_batch_has_no_intro() {
        let out = assemble(&heading(), &[item(6), item(7)], AssemblyMode::Batch { at_range_start: false });
        assert!(out.starts_with("## VERSE 6"));
        assert_eq!(out.matches("## VERSE").count(), 2);
    }

    #[test]
    fn blocks_keep_input_order() {
        let out = assemble(&heading(), &[item(3), item(4), item(5)], AssemblyMode::FullChapter);
        let p3 = out.find("## VERSE 3").unwrap();
        let p4 = out.find("## VERSE 4").unwrap();
        let p5 = out.find("## VERSE 5").unwrap();
        assert!(p3 < p4 && p4 < p5);
    }

    #[test]
    fn empty_batch_is_empty() {
        assert_eq!(assemble(&heading(), &[], AssemblyMode::Batch { at_range_start: false }), "");
    }
}
