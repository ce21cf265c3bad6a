//! Static book table for the 66-book canon.
//!
//! Every book has a canonical three-character code (the api.bible / USFM
//! code), an English display name, a testament and a literary genre. The
//! alias table maps normalized English and French names and abbreviations
//! to a `Book`. Lookups of unknown keys return `None`; callers turn that into
//! a hard error.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use serde::{Serialize, Serializer};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Testament {
    Old,
    New,
}

/// Literary grouping used to pick generic commentary sentences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Genre {
    Law,
    History,
    Wisdom,
    MajorProphet,
    MinorProphet,
    Gospel,
    Acts,
    PaulineEpistle,
    GeneralEpistle,
    Apocalyptic,
}

macro_rules! canon {
    ($($variant:ident => $code:literal, $name:literal, $testament:ident, $genre:ident;)+) => {
        /// A book of the 66-book canon.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Book {
            $($variant,)+
        }

        impl Book {
            /// All books in canonical order.
            pub const ALL: &'static [Book] = &[$(Book::$variant,)+];

            /// Canonical three-character code, e.g. `"JHN"`.
            pub fn code(&self) -> &'static str {
                match self {
                    $(Book::$variant => $code,)+
                }
            }

            /// English display name, e.g. `"John"`.
            pub fn name(&self) -> &'static str {
                match self {
                    $(Book::$variant => $name,)+
                }
            }

            pub fn testament(&self) -> Testament {
                match self {
                    $(Book::$variant => Testament::$testament,)+
                }
            }

            pub fn genre(&self) -> Genre {
                match self {
                    $(Book::$variant => Genre::$genre,)+
                }
            }
        }
    };
}

canon! {
    Genesis => "GEN", "Genesis", Old, Law;
    Exodus => "EXO", "Exodus", Old, Law;
    Leviticus => "LEV", "Leviticus", Old, Law;
    Numbers => "NUM", "Numbers", Old, Law;
    Deuteronomy => "DEU", "Deuteronomy", Old, Law;
    Joshua => "JOS", "Joshua", Old, History;
    Judges => "JDG", "Judges", Old, History;
    Ruth => "RUT", "Ruth", Old, History;
    FirstSamuel => "1SA", "1 Samuel", Old, History;
    SecondSamuel => "2SA", "2 Samuel", Old, History;
    FirstKings => "1KI", "1 Kings", Old, History;
    SecondKings => "2KI", "2 Kings", Old, History;
    FirstChronicles => "1CH", "1 Chronicles", Old, History;
    SecondChronicles => "2CH", "2 Chronicles", Old, History;
    Ezra => "EZR", "Ezra", Old, History;
    Nehemiah => "NEH", "Nehemiah", Old, History;
    Esther => "EST", "Esther", Old, History;
    Job => "JOB", "Job", Old, Wisdom;
    Psalms => "PSA", "Psalms", Old, Wisdom;
    Proverbs => "PRO", "Proverbs", Old, Wisdom;
    Ecclesiastes => "ECC", "Ecclesiastes", Old, Wisdom;
    SongOfSongs => "SNG", "Song of Songs", Old, Wisdom;
    Isaiah => "ISA", "Isaiah", Old, MajorProphet;
    Jeremiah => "JER", "Jeremiah", Old, MajorProphet;
    Lamentations => "LAM", "Lamentations", Old, MajorProphet;
    Ezekiel => "EZK", "Ezekiel", Old, MajorProphet;
    Daniel => "DAN", "Daniel", Old, MajorProphet;
    Hosea => "HOS", "Hosea", Old, MinorProphet;
    Joel => "JOL", "Joel", Old, MinorProphet;
    Amos => "AMO", "Amos", Old, MinorProphet;
    Obadiah => "OBA", "Obadiah", Old, MinorProphet;
    Jonah => "JON", "Jonah", Old, MinorProphet;
    Micah => "MIC", "Micah", Old, MinorProphet;
    Nahum => "NAM", "Nahum", Old, MinorProphet;
    Habakkuk => "HAB", "Habakkuk", Old, MinorProphet;
    Zephaniah => "ZEP", "Zephaniah", Old, MinorProphet;
    Haggai => "HAG", "Haggai", Old, MinorProphet;
    Zechariah => "ZEC", "Zechariah", Old, MinorProphet;
    Malachi => "MAL", "Malachi", Old, MinorProphet;
    Matthew => "MAT", "Matthew", New, Gospel;
    Mark => "MRK", "Mark", New, Gospel;
    Luke => "LUK", "Luke", New, Gospel;
    John => "JHN", "John", New, Gospel;
    Acts => "ACT", "Acts", New, Acts;
    Romans => "ROM", "Romans", New, PaulineEpistle;
    FirstCorinthians => "1CO", "1 Corinthians", New, PaulineEpistle;
    SecondCorinthians => "2CO", "2 Corinthians", New, PaulineEpistle;
    Galatians => "GAL", "Galatians", New, PaulineEpistle;
    Ephesians => "EPH", "Ephesians", New, PaulineEpistle;
    Philippians => "PHP", "Philippians", New, PaulineEpistle;
    Colossians => "COL", "Colossians", New, PaulineEpistle;
    FirstThessalonians => "1TH", "1 Thessalonians", New, PaulineEpistle;
    SecondThessalonians => "2TH", "2 Thessalonians", New, PaulineEpistle;
    FirstTimothy => "1TI", "1 Timothy", New, PaulineEpistle;
    SecondTimothy => "2TI", "2 Timothy", New, PaulineEpistle;
    Titus => "TIT", "Titus", New, PaulineEpistle;
    Philemon => "PHM", "Philemon", New, PaulineEpistle;
    Hebrews => "HEB", "Hebrews", New, GeneralEpistle;
    James => "JAS", "James", New, GeneralEpistle;
    FirstPeter => "1PE", "1 Peter", New, GeneralEpistle;
    SecondPeter => "2PE", "2 Peter", New, GeneralEpistle;
    FirstJohn => "1JN", "1 John", New, GeneralEpistle;
    SecondJohn => "2JN", "2 John", New, GeneralEpistle;
    ThirdJohn => "3JN", "3 John", New, GeneralEpistle;
    Jude => "JUD", "Jude", New, GeneralEpistle;
    Revelation => "REV", "Revelation", New, Apocalyptic;
}

impl Book {
    /// Resolve a canonical code (`"GEN"`, `"jhn"`). Case-insensitive.
    pub fn from_code(code: &str) -> Option<Book> {
        Book::ALL
            .iter()
            .copied()
            .find(|b| b.code().eq_ignore_ascii_case(code.trim()))
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for Book {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// Localized names and abbreviations. Keys are normalized at table build.
const ALIASES: &[(&str, Book)] = &[
    // Law
    ("gen", Book::Genesis), ("ge", Book::Genesis), ("gn", Book::Genesis), ("genese", Book::Genesis),
    ("exod", Book::Exodus), ("ex", Book::Exodus), ("exode", Book::Exodus),
    ("lev", Book::Leviticus), ("lv", Book::Leviticus), ("levitique", Book::Leviticus),
    ("num", Book::Numbers), ("nb", Book::Numbers), ("nbr", Book::Numbers), ("nombres", Book::Numbers), ("nom", Book::Numbers),
    ("deut", Book::Deuteronomy), ("dt", Book::Deuteronomy), ("deuteronome", Book::Deuteronomy),
    // History
    ("josh", Book::Joshua), ("jos", Book::Joshua), ("josue", Book::Joshua),
    ("judg", Book::Judges), ("jg", Book::Judges), ("juges", Book::Judges),
    ("ru", Book::Ruth), ("rt", Book::Ruth),
    ("1 sam", Book::FirstSamuel), ("1 sm", Book::FirstSamuel),
    ("2 sam", Book::SecondSamuel), ("2 sm", Book::SecondSamuel),
    ("1 kgs", Book::FirstKings), ("1 kings", Book::FirstKings), ("1 rois", Book::FirstKings), ("1 r", Book::FirstKings),
    ("2 kgs", Book::SecondKings), ("2 kings", Book::SecondKings), ("2 rois", Book::SecondKings), ("2 r", Book::SecondKings),
    ("1 chron", Book::FirstChronicles), ("1 chr", Book::FirstChronicles), ("1 chroniques", Book::FirstChronicles),
    ("2 chron", Book::SecondChronicles), ("2 chr", Book::SecondChronicles), ("2 chroniques", Book::SecondChronicles),
    ("ezr", Book::Ezra), ("esdras", Book::Ezra), ("esd", Book::Ezra),
    ("neh", Book::Nehemiah), ("nehemie", Book::Nehemiah), ("ne", Book::Nehemiah),
    ("esth", Book::Esther), ("est", Book::Esther),
    // Wisdom
    ("jb", Book::Job),
    ("ps", Book::Psalms), ("psa", Book::Psalms), ("psalm", Book::Psalms), ("pss", Book::Psalms),
    ("psaumes", Book::Psalms), ("psaume", Book::Psalms),
    ("prov", Book::Proverbs), ("pr", Book::Proverbs), ("prv", Book::Proverbs), ("proverbes", Book::Proverbs),
    ("eccl", Book::Ecclesiastes), ("ecc", Book::Ecclesiastes), ("qoheleth", Book::Ecclesiastes),
    ("ecclesiaste", Book::Ecclesiastes), ("qo", Book::Ecclesiastes),
    ("song", Book::SongOfSongs), ("song of solomon", Book::SongOfSongs), ("sos", Book::SongOfSongs),
    ("canticles", Book::SongOfSongs), ("cantique des cantiques", Book::SongOfSongs),
    ("cantique", Book::SongOfSongs), ("ct", Book::SongOfSongs),
    // Prophets
    ("isa", Book::Isaiah), ("is", Book::Isaiah), ("esaie", Book::Isaiah), ("isaie", Book::Isaiah), ("es", Book::Isaiah),
    ("jer", Book::Jeremiah), ("jr", Book::Jeremiah), ("jeremie", Book::Jeremiah),
    ("lam", Book::Lamentations), ("la", Book::Lamentations),
    ("ezek", Book::Ezekiel), ("eze", Book::Ezekiel), ("ezechiel", Book::Ezekiel), ("ez", Book::Ezekiel),
    ("dan", Book::Daniel), ("dn", Book::Daniel),
    ("hos", Book::Hosea), ("osee", Book::Hosea), ("os", Book::Hosea),
    ("jl", Book::Joel),
    ("am", Book::Amos),
    ("obad", Book::Obadiah), ("ob", Book::Obadiah), ("abdias", Book::Obadiah), ("abdi", Book::Obadiah), ("ab", Book::Obadiah),
    ("jon", Book::Jonah), ("jonas", Book::Jonah),
    ("mic", Book::Micah), ("mi", Book::Micah), ("michee", Book::Micah),
    ("nah", Book::Nahum), ("na", Book::Nahum),
    ("hab", Book::Habakkuk), ("habacuc", Book::Habakkuk), ("habakuk", Book::Habakkuk), ("ha", Book::Habakkuk),
    ("zeph", Book::Zephaniah), ("zep", Book::Zephaniah), ("sophonie", Book::Zephaniah), ("so", Book::Zephaniah),
    ("hag", Book::Haggai), ("aggee", Book::Haggai), ("ag", Book::Haggai),
    ("zech", Book::Zechariah), ("zec", Book::Zechariah), ("zacharie", Book::Zechariah), ("za", Book::Zechariah),
    ("mal", Book::Malachi), ("malachie", Book::Malachi), ("ml", Book::Malachi),
    // Gospels and Acts
    ("matt", Book::Matthew), ("mt", Book::Matthew), ("mat", Book::Matthew), ("matthieu", Book::Matthew),
    ("mk", Book::Mark), ("mrk", Book::Mark), ("mc", Book::Mark), ("marc", Book::Mark),
    ("lk", Book::Luke), ("luk", Book::Luke), ("lc", Book::Luke), ("luc", Book::Luke),
    ("jn", Book::John), ("jhn", Book::John), ("jean", Book::John),
    ("act", Book::Acts), ("ac", Book::Acts), ("actes", Book::Acts),
    // Epistles
    ("rom", Book::Romans), ("rm", Book::Romans), ("ro", Book::Romans), ("romains", Book::Romans),
    ("1 cor", Book::FirstCorinthians), ("1 co", Book::FirstCorinthians), ("1 corinthiens", Book::FirstCorinthians),
    ("2 cor", Book::SecondCorinthians), ("2 co", Book::SecondCorinthians), ("2 corinthiens", Book::SecondCorinthians),
    ("gal", Book::Galatians), ("ga", Book::Galatians), ("galates", Book::Galatians),
    ("eph", Book::Ephesians), ("ep", Book::Ephesians), ("ephesiens", Book::Ephesians),
    ("phil", Book::Philippians), ("php", Book::Philippians), ("ph", Book::Philippians), ("philippiens", Book::Philippians),
    ("col", Book::Colossians), ("colossiens", Book::Colossians),
    ("1 thess", Book::FirstThessalonians), ("1 th", Book::FirstThessalonians), ("1 thessaloniciens", Book::FirstThessalonians),
    ("2 thess", Book::SecondThessalonians), ("2 th", Book::SecondThessalonians), ("2 thessaloniciens", Book::SecondThessalonians),
    ("1 tim", Book::FirstTimothy), ("1 tm", Book::FirstTimothy), ("1 timothee", Book::FirstTimothy),
    ("2 tim", Book::SecondTimothy), ("2 tm", Book::SecondTimothy), ("2 timothee", Book::SecondTimothy),
    ("tit", Book::Titus), ("tt", Book::Titus), ("tite", Book::Titus),
    ("philem", Book::Philemon), ("phlm", Book::Philemon), ("phm", Book::Philemon),
    ("heb", Book::Hebrews), ("he", Book::Hebrews), ("hebreux", Book::Hebrews),
    ("jas", Book::James), ("jm", Book::James), ("jc", Book::James), ("jacques", Book::James),
    ("1 pet", Book::FirstPeter), ("1 pt", Book::FirstPeter), ("1 pe", Book::FirstPeter), ("1 pierre", Book::FirstPeter),
    ("2 pet", Book::SecondPeter), ("2 pt", Book::SecondPeter), ("2 pe", Book::SecondPeter), ("2 pierre", Book::SecondPeter),
    ("1 jn", Book::FirstJohn), ("1 jean", Book::FirstJohn),
    ("2 jn", Book::SecondJohn), ("2 jean", Book::SecondJohn),
    ("3 jn", Book::ThirdJohn), ("3 jean", Book::ThirdJohn),
    ("jud", Book::Jude), ("jd", Book::Jude),
    // Apocalyptic
    ("rev", Book::Revelation), ("rv", Book::Revelation), ("revelations", Book::Revelation),
    ("apocalypse", Book::Revelation), ("apoc", Book::Revelation), ("ap", Book::Revelation),
];

/// Normalized alias → book. Built once from codes, display names and aliases.
static ALIAS_TABLE: LazyLock<HashMap<String, Book>> = LazyLock::new(|| {
    let mut table = HashMap::with_capacity(ALIASES.len() + Book::ALL.len() * 2);
    for book in Book::ALL {
        table.insert(normalize_book_token(book.code()), *book);
        table.insert(normalize_book_token(book.name()), *book);
    }
    for (alias, book) in ALIASES {
        table.insert(normalize_book_token(alias), *book);
    }
    table
});

/// Resolve a free-text book token to a `Book`.
pub fn resolve_book(raw: &str) -> Option<Book> {
    let key = normalize_book_token(raw);
    if key.is_empty() {
        return None;
    }
    ALIAS_TABLE.get(&key).copied()
}

/// Normalize a book token for alias lookup.
///
/// Strips diacritics, lowercases, turns punctuation into spaces, collapses
/// whitespace, splits a leading digit from letters (`1john` → `1 john`) and
/// rewrites ordinal prefixes (`first`, `1er`, `premier`, `ii`, ...) to digits.
pub fn normalize_book_token(raw: &str) -> String {
    let folded: String = raw
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(|c| c.to_lowercase())
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    let mut tokens: Vec<String> = Vec::new();
    for token in folded.split_whitespace() {
        match split_leading_digit(token) {
            Some((digit, rest)) => {
                tokens.push(digit.to_string());
                tokens.push(rest.to_string());
            }
            None => tokens.push(token.to_string()),
        }
    }

    if tokens.len() > 1 {
        if let Some(digit) = ordinal_digit(&tokens[0]) {
            tokens[0] = digit.to_string();
        }
    }

    tokens.join(" ")
}

/// `"1john"` → `("1", "john")`. Only a single leading digit 1-3 qualifies.
fn split_leading_digit(token: &str) -> Option<(&str, &str)> {
    let first = token.chars().next()?;
    if !matches!(first, '1' | '2' | '3') {
        return None;
    }
    let rest = &token[1..];
    if rest.is_empty() || !rest.chars().next()?.is_alphabetic() {
        return None;
    }
    if ordinal_suffix(rest) {
        return None;
    }
    Some((&token[..1], rest))
}

/// Suffixes that make a digit-led token an ordinal (`1st`, `2nd`, `1er`).
fn ordinal_suffix(rest: &str) -> bool {
    matches!(rest, "st" | "nd" | "rd" | "er" | "re" | "ere" | "e" | "eme" | "d" | "de")
}

fn ordinal_digit(token: &str) -> Option<char> {
    match token {
        "1" | "1st" | "first" | "1er" | "1re" | "1ere" | "premier" | "premiere" | "i" => Some('1'),
        "2" | "2nd" | "second" | "seconde" | "2e" | "2eme" | "2d" | "2de" | "deuxieme" | "ii" => {
            Some('2')
        }
        "3" | "3rd" | "third" | "3e" | "3eme" | "troisieme" | "iii" => Some('3'),
        _ => None,
    }
}
