//! Deterministic, always-available explanation synthesizer.
//!
//! Builds an explanation from keyword triggers over the verse text
//! (English and French, case- and diacritic-insensitive), a sentence keyed
//! on the book's genre and a christological closing. Never fails.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::types::AnnotationRequest;
use crate::reference::{Book, Genre, Testament};

// ═══════════════════════════════════════════════════════════
// Trigger tables
// ═══════════════════════════════════════════════════════════

/// Trigger scoped to one book (and optionally one chapter).
struct NarrativeTrigger {
    book: Book,
    chapter: Option<u32>,
    regex: Regex,
    fragment: &'static str,
}

/// Cross-cutting thematic trigger.
struct ThemeTrigger {
    theme: &'static str,
    regex: Regex,
    fragment: &'static str,
}

fn narrative(book: Book, chapter: Option<u32>, pattern: &str, fragment: &'static str) -> NarrativeTrigger {
    NarrativeTrigger {
        book,
        chapter,
        regex: Regex::new(pattern).expect("Invalid narrative trigger regex"),
        fragment,
    }
}

fn theme(theme: &'static str, pattern: &str, fragment: &'static str) -> ThemeTrigger {
    ThemeTrigger {
        theme,
        regex: Regex::new(pattern).expect("Invalid theme trigger regex"),
        fragment,
    }
}

static NARRATIVE_TRIGGERS: LazyLock<Vec<NarrativeTrigger>> = LazyLock::new(|| {
    vec![
        narrative(
            Book::Genesis,
            Some(1),
            r"\b(let there be|que la lumiere soit|qu'il y ait|yehi)\b",
            "The formula \"let there be\" (yehi) shows the effective power of the creating Word: God speaks and it is.",
        ),
        narrative(
            Book::Genesis,
            Some(1),
            r"\b(evening|morning|soir|matin)\b",
            "The refrain of evening and morning frames creation as an ordered week under God's rule.",
        ),
        narrative(
            Book::Genesis,
            Some(1),
            r"\b(image|likeness|ressemblance)\b",
            "Humanity bears the image of God, called to reflect his rule over creation.",
        ),
        narrative(
            Book::Genesis,
            Some(3),
            r"\b(serpent|tree|arbre|fruit)\b",
            "The serpent's question casts doubt on God's word, the first step of the fall.",
        ),
        narrative(
            Book::Genesis,
            None,
            r"\b(abram|abraham|seed|posterite|descendance)\b",
            "The promise to Abraham and his seed runs through Genesis and shapes all that follows.",
        ),
        narrative(
            Book::Exodus,
            None,
            r"\b(egypt|egypte|pharaoh|pharaon|moses|moise)\b",
            "The setting in Egypt recalls the bondage from which God will bring his people out.",
        ),
        narrative(
            Book::Exodus,
            Some(12),
            r"\b(passover|paque|lamb|agneau)\b",
            "The Passover lamb, whose blood marks the doors, becomes the pattern of redemption.",
        ),
        narrative(
            Book::Exodus,
            Some(20),
            r"\b(commandments?|commandements?|shalt|tu ne)\b",
            "The Ten Words are given to a people already redeemed: law follows grace.",
        ),
        narrative(
            Book::Psalms,
            Some(23),
            r"\b(shepherd|berger|pasture|paturages?)\b",
            "The Lord as shepherd gathers the whole of Israel's trust in one image of care.",
        ),
        narrative(
            Book::John,
            Some(1),
            r"\b(word|parole|logos|verbe)\b",
            "The Word (Logos) is eternal, personal and divine: John opens his gospel where Genesis opens the Bible.",
        ),
        narrative(
            Book::John,
            Some(3),
            r"\b(born|nait|naitre|again|nouveau|anew)\b",
            "The new birth is a work of the Spirit from above, not a human achievement.",
        ),
        narrative(
            Book::Romans,
            None,
            r"\b(justif\w*|righteous\w*|justice)\b",
            "Paul's argument turns on justification: God declares righteous the one who believes.",
        ),
    ]
});

static THEME_TRIGGERS: LazyLock<Vec<ThemeTrigger>> = LazyLock::new(|| {
    vec![
        theme(
            "creation",
            r"\b(creat\w*|crea\w*|beginning|commencement|heavens?|cieux|made|fait)\b",
            "God appears as sovereign Creator; everything that exists comes from his word.",
        ),
        theme(
            "covenant",
            r"\b(covenant|alliance|promise\w*|promesse\w*|oath|serment)\b",
            "Covenant language recalls God's binding commitment to his people.",
        ),
        theme(
            "light",
            r"\b(light|lumiere|darkness|tenebres)\b",
            "Light and darkness set the stage for the revelation that overcomes darkness.",
        ),
        theme(
            "sacrifice",
            r"\b(sacrific\w*|offering|offrande|blood|sang|altar|autel)\b",
            "The sacrificial vocabulary points to atonement through a life given in another's place.",
        ),
        theme(
            "love",
            r"\b(love\w*|loved|aime\w*|amour|charite)\b",
            "The love of God is the source and motive of his saving work.",
        ),
        theme(
            "faith",
            r"\b(believ\w*|faith|foi|croi\w*|trust|confiance)\b",
            "Faith receives what God gives; it rests on his faithfulness, not on human strength.",
        ),
        theme(
            "sin and forgiveness",
            r"\b(sins?|peches?|forgiv\w*|pardon\w*|iniquit\w*|transgress\w*)\b",
            "Sin is named honestly, and forgiveness is offered as God's free gift.",
        ),
        theme(
            "kingdom",
            r"\b(kingdom|royaume|king|roi|throne|trone|reign\w*|regne\w*)\b",
            "Royal language announces the reign of God over his people and the nations.",
        ),
        theme(
            "spirit",
            r"\b(spirit|esprit|breath|souffle)\b",
            "The Spirit of God is present and active, bringing order and life.",
        ),
        theme(
            "praise",
            r"\b(prais\w*|louange|loue\w*|glory|gloire|hallelujah|alleluia|worship\w*|ador\w*)\b",
            "The verse invites praise: worship is the fitting answer to who God is.",
        ),
    ]
});

// ═══════════════════════════════════════════════════════════
// Synthesis
// ═══════════════════════════════════════════════════════════

/// Keyword-driven explanation builder.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicSynthesizer;

impl HeuristicSynthesizer {
    pub fn new() -> Self {
        Self
    }

    /// Build an explanation for one verse. Total and deterministic.
    pub fn synthesize(&self, request: &AnnotationRequest) -> String {
        let folded = fold(&request.verse_text);
        let mut sentences: Vec<&str> = Vec::new();

        for trigger in NARRATIVE_TRIGGERS.iter() {
            let book_match = trigger.book == request.book;
            let chapter_match = trigger.chapter.map_or(true, |c| c == request.chapter);
            if book_match && chapter_match && trigger.regex.is_match(&folded) {
                sentences.push(trigger.fragment);
            }
        }

        for trigger in THEME_TRIGGERS.iter() {
            if trigger.regex.is_match(&folded) {
                tracing::trace!(verse = %request.verse_id(), theme = trigger.theme, "Theme matched");
                sentences.push(trigger.fragment);
            }
        }

        let mut out = genre_sentence(request);
        for sentence in sentences {
            out.push(' ');
            out.push_str(sentence);
        }
        out.push(' ');
        out.push_str(closing_sentence(request.book));
        out
    }

    /// Filler lines used to pad short explanations, chosen by book.
    pub fn elaboration_clauses(&self, book: Book) -> Vec<String> {
        vec![
            "Context: the verse sits within the flow of the narrative and its historical setting.".to_string(),
            "Lexical analysis: one or two key terms carry the weight of the verse.".to_string(),
            format!("Biblical parallels: {}.", parallels(book)),
            "Doctrine: the verse belongs to the history of salvation, centered on Christ.".to_string(),
            "Application: it shapes personal faith and the life of the church in mission.".to_string(),
        ]
    }
}

/// Lowercase with diacritics removed.
fn fold(text: &str) -> String {
    text.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .map(|c| if c == '\u{2019}' { '\'' } else { c })
        .collect()
}

fn genre_sentence(request: &AnnotationRequest) -> String {
    let reference = request.reference();
    match request.book.genre() {
        Genre::Law => format!("In the Torah, {reference} shows God shaping his people by his word and his covenant."),
        Genre::History => format!("{reference} belongs to Israel's history, where God keeps his promises through real events."),
        Genre::Wisdom => format!("{reference} is wisdom and poetry: it teaches how to live and pray before God."),
        Genre::MajorProphet | Genre::MinorProphet => {
            format!("{reference} is prophetic speech, calling God's people back and announcing what he will do.")
        }
        Genre::Gospel => format!("{reference} belongs to the gospel witness to the words and works of Jesus."),
        Genre::Acts => format!("{reference} records the spread of the gospel by the power of the Spirit."),
        Genre::PaulineEpistle => format!("{reference} is apostolic teaching: Paul draws out the meaning of the gospel for the church."),
        Genre::GeneralEpistle => format!("{reference} is a pastoral letter, strengthening believers to persevere in faith."),
        Genre::Apocalyptic => format!("{reference} unveils, in symbols, the final victory of God and of the Lamb."),
    }
}

fn closing_sentence(book: Book) -> &'static str {
    match book {
        Book::Genesis => "Genesis already points to the promised seed, fulfilled in Christ, through whom all things were made.",
        Book::Exodus => "The deliverance from Egypt prefigures the redemption accomplished by Christ, our Passover.",
        Book::Leviticus => "The sacrifices and the priesthood find their fulfilment in Christ, priest and offering.",
        Book::Psalms => "The psalms find their fullest voice in Christ, the true King and the praying Son.",
        Book::Isaiah => "The servant of Isaiah is revealed in Christ, who bears the sins of many.",
        Book::John => "John writes that we may believe that Jesus is the Christ, and have life in his name.",
        Book::Hebrews => "Christ is the better priest and the better sacrifice to whom the whole law pointed.",
        Book::Revelation => "The Lamb who was slain is the one who reigns and makes all things new.",
        other => match other.testament() {
            Testament::Old => "Read in the light of the whole canon, the verse prepares the coming of Christ, in whom the promises find their yes.",
            Testament::New => "The verse keeps Christ at the center, in whom God's saving purpose is revealed and accomplished.",
        },
    }
}

fn parallels(book: Book) -> &'static str {
    match book {
        Book::Genesis => "John 1; Hebrews 11; Psalm 33",
        Book::Exodus => "Hebrews 3-4; 1 Corinthians 10; Deuteronomy 6",
        Book::John => "Genesis 1; Colossians 1; Hebrews 1",
        Book::Psalms => "Hebrews 1; Acts 2; Romans 15",
        Book::Romans => "Genesis 15; Galatians 3; Habakkuk 2",
        _ => "related passages across the canon",
    }
}
