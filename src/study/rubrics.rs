//! Chapter study in 28 numbered sections.
//!
//! Each section draws on the chapter library in `theology` where it has
//! something specific to say, and on a fixed prompt line otherwise.

use super::assemble::{StudyHeading, Verse};
use super::theology::{self, ChapterTheology};
use crate::reference::Book;

/// Section titles, in display order.
pub const RUBRICS: [&str; 28] = [
    "Opening prayer",
    "Literary structure",
    "Questions from the previous chapter",
    "Doctrinal theme",
    "Theological foundations",
    "Historical context",
    "Cultural context",
    "Geographical context",
    "Lexical analysis",
    "Biblical parallels",
    "Prophecy and fulfilment",
    "Characters",
    "Rhetorical structure",
    "Trinitarian theology",
    "Christ at the center",
    "Gospel and grace",
    "Personal application",
    "Community application",
    "Prayer of response",
    "Study questions",
    "Points of caution",
    "Objections and answers",
    "Missional perspective",
    "Christian ethics",
    "Praise and liturgy",
    "Guided meditation",
    "Memory verses",
    "Action plan",
];

/// Verses quoted at the top of the study.
pub const EXCERPT_VERSES: usize = 8;

const ABRIDGED_MARKER: &str = "*…(abridged)*";

/// Validate 0-based section indices. `None` or empty selects every section;
/// the first out-of-range index is returned as the error.
pub fn select(requested: Option<&[usize]>) -> Result<Vec<usize>, usize> {
    match requested {
        None | Some([]) => Ok((0..RUBRICS.len()).collect()),
        Some(indices) => match indices.iter().find(|i| **i >= RUBRICS.len()) {
            Some(bad) => Err(*bad),
            None => Ok(indices.to_vec()),
        },
    }
}

/// Render the study. `tokens` caps the length at `max(600, tokens × 5)`
/// chars, cut on a line boundary.
pub fn render(
    heading: &StudyHeading,
    book: Book,
    chapter: u32,
    excerpt: &[Verse],
    selection: &[usize],
    tokens: Option<usize>,
) -> String {
    let theology = theology::theological_content(book, chapter);

    let mut blocks = vec![
        format!("# 28-Point Study - {} {}", heading.label, heading.chapter),
        format!("**{}**", theology.title),
        format!("## Text excerpt\n\n{}", excerpt_lines(excerpt)),
        "---".to_string(),
    ];
    for index in selection {
        blocks.push(format!(
            "## {}. {}\n\n{}",
            index + 1,
            RUBRICS[*index],
            section_body(*index, book, chapter, &theology)
        ));
    }
    blocks.push("---".to_string());
    blocks.push(format!("### Chapter summary\n\n{}", theology.narrative));

    let text = blocks.join("\n\n");
    match tokens {
        Some(tokens) if tokens > 0 => abridge(&text, (tokens.saturating_mul(5)).max(600)),
        _ => text,
    }
}

fn excerpt_lines(excerpt: &[Verse]) -> String {
    if excerpt.is_empty() {
        return "(no text available)".to_string();
    }
    excerpt
        .iter()
        .map(|v| format!("{}. {}", v.number, v.text.trim()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn section_body(index: usize, book: Book, chapter: u32, theology: &ChapterTheology) -> String {
    let passage = format!("{} {chapter}", book.name());
    match index {
        0 => format!("Father, open our hearts and minds to your Word as we read {passage}; lead us into the truth."),
        1 => format!("How {passage} is divided, how its argument progresses and which motifs carry it."),
        3 => theology
            .points
            .first()
            .cloned()
            .unwrap_or_else(|| "The main doctrine brought to light by the passage.".to_string()),
        5 => theology::historical_context(book).to_string(),
        9 => {
            let refs = theology::cross_references(book, chapter);
            if refs.is_empty() {
                format!("Other passages that shed light on {passage} within the unity of the canon.")
            } else {
                refs.iter().map(|r| format!("- {r}")).collect::<Vec<_>>().join("\n")
            }
        }
        14 => theology
            .points
            .get(2)
            .cloned()
            .unwrap_or_else(|| format!("Christ revealed or foreshadowed in {passage}.")),
        16 => format!("How does {passage} shape our walk: virtues, prayer, disciplines, hope?"),
        18 => "Lord, write these truths on our hearts and lead our lives according to your will.".to_string(),
        19 => "- What does the text teach about God?\n- About humanity?\n- About salvation?".to_string(),
        other => generic_line(other).to_string(),
    }
}

fn generic_line(index: usize) -> &'static str {
    match index {
        2 => "Which questions raised earlier find an answer or a development here?",
        4 => "Links with covenant, law, promise, wisdom and prophecy.",
        6 => "Customs and cultural references that help interpretation.",
        7 => "Places, routes and the symbolic weight of the settings.",
        8 => "Key Hebrew or Greek terms, their semantic fields and theological weight.",
        10 => "Messianic expectations and their fulfilment in Christ.",
        11 => "Roles, virtues and failings; spiritual trajectories.",
        12 => "Figures of speech, symmetries, inclusions, climax.",
        13 => "Traces of the work of the Father, the Son and the Spirit.",
        15 => "Grace, forgiveness, reconciliation, new life.",
        17 => "The church in unity, mission and service.",
        20 => "Interpretive pitfalls and reductive readings to avoid.",
        21 => "Common questions and answers faithful to Scripture.",
        22 => "Implications for witness and for the justice of the Kingdom.",
        23 => "Commandments, virtues, practical wisdom.",
        24 => "Starting points for praise, confession and intercession.",
        25 => "Silence, slow reading of the text, prayer.",
        26 => "A selection of verses to memorize.",
        _ => "Concrete, measurable steps to put into practice.",
    }
}

/// Cut `text` to at most `max_chars` chars on the last line break, then
/// append the abridged marker.
fn abridge(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let head: String = text.chars().take(max_chars).collect();
    let kept = match head.rfind('\n') {
        Some(pos) => &head[..pos],
        None => head.as_str(),
    };
    format!("{}\n\n{ABRIDGED_MARKER}", kept.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heading() -> StudyHeading {
        StudyHeading {
            label: "Gen\u{e8}se".into(),
            chapter: 1,
        }
    }

    fn excerpt() -> Vec<Verse> {
        (1..=3)
            .map(|n| Verse {
                number: n,
                text: format!("Verse {n} text."),
            })
            .collect()
    }

    #[test]
    fn select_defaults_to_all_sections() {
        assert_eq!(select(None).unwrap().len(), 28);
        assert_eq!(select(Some(&[][..])).unwrap().len(), 28);
    }

    #[test]
    fn select_keeps_requested_order() {
        assert_eq!(select(Some(&[9, 0, 5][..])).unwrap(), vec![9, 0, 5]);
    }

    #[test]
    fn select_rejects_out_of_range_index() {
        assert_eq!(select(Some(&[1, 28, 40][..])), Err(28));
    }

    #[test]
    fn full_study_has_every_section() {
        let all = select(None).unwrap();
        let out = render(&heading(), Book::Genesis, 1, &excerpt(), &all, None);
        assert!(out.starts_with("# 28-Point Study - Gen\u{e8}se 1"));
        assert!(out.contains("## Text excerpt\n\n1. Verse 1 text.\n2. Verse 2 text.\n3. Verse 3 text."));
        for (i, title) in RUBRICS.iter().enumerate() {
            assert!(out.contains(&format!("## {}. {title}", i + 1)), "missing section {}", i + 1);
        }
        assert!(out.contains("### Chapter summary"));
    }

    #[test]
    fn parallels_section_lists_cross_references() {
        let out = render(&heading(), Book::Genesis, 1, &excerpt(), &[9], None);
        assert!(out.contains("## 10. Biblical parallels\n\n- Psalms 33:6"));
        assert!(out.contains("- Hebrews 11:3"));
        assert!(!out.contains("## 1. Opening prayer"));
    }

    #[test]
    fn library_points_feed_doctrine_and_christ_sections() {
        let out = render(&heading(), Book::John, 1, &excerpt(), &[3, 14], None);
        assert!(out.contains("## 4. Doctrinal theme\n\nHigh christology"));
        assert!(out.contains("## 15. Christ at the center\n\nRevelation and salvation."));
    }

    #[test]
    fn token_cap_abridges_on_line_boundary() {
        let all = select(None).unwrap();
        let out = render(&heading(), Book::Genesis, 1, &excerpt(), &all, Some(100));
        assert!(out.ends_with(ABRIDGED_MARKER));
        let body = out.trim_end_matches(ABRIDGED_MARKER).trim_end();
        assert!(body.chars().count() <= 600);
    }

    #[test]
    fn empty_excerpt_is_marked() {
        let out = render(&heading(), Book::Ruth, 1, &[], &[0], None);
        assert!(out.contains("(no text available)"));
    }
}
