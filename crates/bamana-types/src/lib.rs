//! Shared types for Bambara wordform analysis.
//!
//! Everything here is small and owned so the syllabifier, the tone codec, the
//! lexicon and the analyzer can agree on one vocabulary without depending on
//! each other. Text is compared in canonical decomposed form (NFD) and handed
//! back in composed form (NFC); [`detone`], [`tonal_key`] and [`detoned_key`]
//! encode that convention once.
//!
//! ```rust
//! use bamana_types::{CharClass, Pos, classify, detone};
//!
//! assert_eq!(Pos::from_tag("n.prop"), Some(Pos::ProperNoun));
//! assert_eq!(classify('ɛ'), CharClass::Vowel);
//! assert_eq!(detone("nàrɛ"), "narɛ");
//! ```

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Part-of-speech tag as written in Bambara dictionary sources (`n`, `v`, `vq`, ...).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Pos {
    #[serde(rename = "n")]
    Noun,
    #[serde(rename = "n.prop")]
    ProperNoun,
    #[serde(rename = "v")]
    Verb,
    #[serde(rename = "vq")]
    QualVerb,
    #[serde(rename = "adj")]
    Adj,
    #[serde(rename = "num")]
    Num,
    #[serde(rename = "adv")]
    Adv,
    #[serde(rename = "pp")]
    Postposition,
    #[serde(rename = "prn")]
    Pronoun,
    #[serde(rename = "pers")]
    Personal,
    #[serde(rename = "dtm")]
    Determiner,
    #[serde(rename = "cop")]
    Copula,
    #[serde(rename = "pm")]
    PredicateMarker,
    #[serde(rename = "conj")]
    Conj,
    #[serde(rename = "prt")]
    Particle,
    #[serde(rename = "intj")]
    Interjection,
    #[serde(rename = "onomat")]
    Onomatopoeia,
    #[serde(rename = "ptcp")]
    Participle,
    #[serde(rename = "mrph")]
    Morpheme,
}

impl Pos {
    pub const ALL: [Pos; 19] = [
        Pos::Noun,
        Pos::ProperNoun,
        Pos::Verb,
        Pos::QualVerb,
        Pos::Adj,
        Pos::Num,
        Pos::Adv,
        Pos::Postposition,
        Pos::Pronoun,
        Pos::Personal,
        Pos::Determiner,
        Pos::Copula,
        Pos::PredicateMarker,
        Pos::Conj,
        Pos::Particle,
        Pos::Interjection,
        Pos::Onomatopoeia,
        Pos::Participle,
        Pos::Morpheme,
    ];

    /// Parse a dictionary tag into an enum.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        Pos::ALL.into_iter().find(|pos| pos.as_tag() == tag)
    }

    /// Emit the tag used in dictionary sources.
    pub fn as_tag(self) -> &'static str {
        match self {
            Pos::Noun => "n",
            Pos::ProperNoun => "n.prop",
            Pos::Verb => "v",
            Pos::QualVerb => "vq",
            Pos::Adj => "adj",
            Pos::Num => "num",
            Pos::Adv => "adv",
            Pos::Postposition => "pp",
            Pos::Pronoun => "prn",
            Pos::Personal => "pers",
            Pos::Determiner => "dtm",
            Pos::Copula => "cop",
            Pos::PredicateMarker => "pm",
            Pos::Conj => "conj",
            Pos::Particle => "prt",
            Pos::Interjection => "intj",
            Pos::Onomatopoeia => "onomat",
            Pos::Participle => "ptcp",
            Pos::Morpheme => "mrph",
        }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// Split a slash-delimited tag string (`"n/v"`) into known tags and leftovers.
///
/// Unknown tags are returned rather than dropped so loaders can report them.
pub fn parse_pos_tags(raw: &str) -> (BTreeSet<Pos>, Vec<String>) {
    let mut known = BTreeSet::new();
    let mut unknown = Vec::new();
    for tag in raw.split('/').map(str::trim).filter(|t| !t.is_empty()) {
        match Pos::from_tag(tag) {
            Some(pos) => {
                known.insert(pos);
            }
            None => unknown.push(tag.to_string()),
        }
    }
    (known, unknown)
}

/// Phonological class of a single NFD code point.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum CharClass {
    Vowel,
    /// Combining mark (general category M*); tone diacritics fall here.
    Mark,
    /// The nasal `n`, which may close a syllable or open the next one.
    Nasal,
    Consonant,
    Other,
}

const VOWELS: &[char] = &['a', 'e', 'ɛ', 'i', 'o', 'ɔ', 'u'];
const CONSONANTS: &[char] = &[
    'b', 'c', 'd', 'f', 'g', 'h', 'j', 'k', 'l', 'm', 'ɲ', 'ŋ', 'p', 'r', 's', 't', 'v', 'w',
    'x', 'y', 'z',
];

/// Classify one code point of an NFD string.
///
/// Precomposed letters (`è`) are classified as [`CharClass::Other`]; decompose first.
pub fn classify(c: char) -> CharClass {
    if is_combining_mark(c) {
        return CharClass::Mark;
    }
    let lower = c.to_lowercase().next().unwrap_or(c);
    if lower == 'n' {
        CharClass::Nasal
    } else if VOWELS.contains(&lower) {
        CharClass::Vowel
    } else if CONSONANTS.contains(&lower) {
        CharClass::Consonant
    } else {
        CharClass::Other
    }
}

/// True for combining marks, which carry tone in the tonal orthography.
pub fn is_tone_mark(c: char) -> bool {
    is_combining_mark(c)
}

/// Remove tone diacritics, returning NFC text.
pub fn detone(text: &str) -> String {
    text.nfd().filter(|c| !is_tone_mark(*c)).nfc().collect()
}

/// Key for tonal lookups: trimmed, lowercased, NFC.
pub fn tonal_key(text: &str) -> String {
    text.trim().to_lowercase().nfc().collect()
}

/// Key for tone-insensitive lookups: trimmed, lowercased, detoned, NFC.
pub fn detoned_key(text: &str) -> String {
    detone(&text.trim().to_lowercase())
}

/// A dictionary headword with its tags and translation.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LexicalEntry {
    pub lemma: String,
    pub pos: BTreeSet<Pos>,
    pub gloss: String,
}

/// Loader-facing record: one headword, its alternate spellings, a
/// slash-delimited POS string and a gloss.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LexiconRecord {
    pub lemma: String,
    #[serde(default)]
    pub variants: Vec<String>,
    pub pos: String,
    pub gloss: String,
}

impl LexiconRecord {
    pub fn new(lemma: &str, pos: &str, gloss: &str) -> Self {
        Self {
            lemma: lemma.to_string(),
            variants: Vec::new(),
            pos: pos.to_string(),
            gloss: gloss.to_string(),
        }
    }

    pub fn with_variants<I, S>(mut self, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.variants.extend(variants.into_iter().map(Into::into));
        self
    }
}

/// Which lookup tier produced a lemmatization candidate.
///
/// This is provenance, not a score; [`Stage::code`] gives the numeric tag
/// consumed by coverage statistics.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Unrecognized,
    Direct,
    Derivation,
    Reduplication,
    Compound,
}

impl Stage {
    pub fn code(self) -> i8 {
        match self {
            Stage::Unrecognized => -1,
            Stage::Direct => 0,
            Stage::Derivation => 1,
            Stage::Reduplication => 2,
            Stage::Compound => 3,
        }
    }

    pub fn from_code(code: i8) -> Option<Self> {
        match code {
            -1 => Some(Stage::Unrecognized),
            0 => Some(Stage::Direct),
            1 => Some(Stage::Derivation),
            2 => Some(Stage::Reduplication),
            3 => Some(Stage::Compound),
            _ => None,
        }
    }
}

/// One lemmatization result: `(lemma, pos-set, gloss, stage)`.
///
/// The unrecognized marker has no lemma and no gloss.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub lemma: Option<String>,
    pub pos: BTreeSet<Pos>,
    pub gloss: Option<String>,
    pub stage: Stage,
}

impl Candidate {
    pub fn unrecognized() -> Self {
        Self {
            lemma: None,
            pos: BTreeSet::new(),
            gloss: None,
            stage: Stage::Unrecognized,
        }
    }

    pub fn from_entry(entry: &LexicalEntry, stage: Stage) -> Self {
        Self {
            lemma: Some(entry.lemma.clone()),
            pos: entry.pos.clone(),
            gloss: Some(entry.gloss.clone()),
            stage,
        }
    }

    pub fn is_unrecognized(&self) -> bool {
        self.stage == Stage::Unrecognized
    }
}
