// Clean LLM output before it becomes an annotation.
// Strips markdown/HTML noise, invisible Unicode and role markers, then
// checks the result reads like prose.

use std::sync::LazyLock;

use regex::Regex;

/// Any HTML-like tag.
static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script.*?</script>|<style.*?</style>|</?[a-z][^>]*>").expect("Invalid html tag regex"));

/// Markdown link `[label](url)` → label.
static MD_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\([^)]*\)").expect("Invalid markdown link regex"));

/// Leading list/heading/quote markers.
static LINE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:#{1,6}\s+|[-*+•]\s+|>\s*|\d+[.)]\s+)").expect("Invalid line marker regex"));

/// Phrases that mean the model declined or talked about itself.
static REFUSAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:as an ai|i cannot|i can't|i am unable|i'm unable|language model|je ne peux pas|en tant qu'ia)\b")
        .expect("Invalid refusal regex")
});

/// Clean generated text for display.
pub fn clean_generated(raw: &str) -> String {
    let visible = remove_invisible_chars(raw);
    let no_html = HTML_TAG.replace_all(&visible, "");
    let no_links = MD_LINK.replace_all(&no_html, "$1");

    let mut lines: Vec<String> = Vec::new();
    let mut prev_blank = false;
    for line in no_links.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("```") || is_role_marker(&trimmed.to_lowercase()) {
            continue;
        }
        let unmarked = LINE_MARKER.replace(trimmed, "");
        let plain = unmarked.replace("**", "").replace("__", "").replace('`', "");
        let plain = plain.trim();
        if plain.is_empty() {
            if !prev_blank && !lines.is_empty() {
                lines.push(String::new());
                prev_blank = true;
            }
        } else {
            lines.push(plain.to_string());
            prev_blank = false;
        }
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

/// Whether cleaned text reads as a usable explanation.
///
/// Needs several words, sentence punctuation, no refusal phrasing and no
/// degenerate repetition.
pub fn is_well_formed(text: &str) -> bool {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() < 5 {
        return false;
    }
    if !text.contains(['.', '!', '?', ';']) {
        return false;
    }
    if REFUSAL.is_match(text) {
        return false;
    }
    !has_degenerate_run(&words, 4)
}

/// Same word repeated more than `max_repeats` times in a row.
fn has_degenerate_run(words: &[&str], max_repeats: usize) -> bool {
    let mut run = 1;
    for pair in words.windows(2) {
        if pair[0].eq_ignore_ascii_case(pair[1]) {
            run += 1;
            if run > max_repeats {
                return true;
            }
        } else {
            run = 1;
        }
    }
    false
}

fn is_role_marker(lowered: &str) -> bool {
    lowered.starts_with("system:")
        || lowered.starts_with("assistant:")
        || lowered.starts_with("user:")
        || lowered.starts_with("[inst]")
        || lowered.starts_with("[/inst]")
}

/// Zero-width, bidi and control characters (whitespace kept).
fn remove_invisible_chars(text: &str) -> String {
    text.chars()
        .filter(|c| {
            if matches!(*c, ' ' | '\n' | '\t') {
                return true;
            }
            if matches!(*c, '\u{200B}'..='\u{200F}' | '\u{202A}'..='\u{202E}' | '\u{2060}'..='\u{2064}' | '\u{FEFF}') {
                return false;
            }
            !c.is_control()
        })
        .collect()
}
