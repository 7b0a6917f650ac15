use bamana_types::{CharClass, classify, detone, is_tone_mark};
use unicode_normalization::UnicodeNormalization;

use crate::syllabify::syllabify;

/// Combining acute accent, the high tone.
pub const HIGH_TONE: char = '\u{0301}';

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct NormalizerConfig {
    /// Mark inserted when the first syllable carries none.
    pub default_tone: char,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            default_tone: HIGH_TONE,
        }
    }
}

/// Collapse inconsistent diacritic placement into one convention.
///
/// **Lossy.** Per word: the first syllable keeps its diacritic or receives the
/// default high tone on its vowel; later syllables lose theirs; a syllable
/// that is a bare `n` is marked with the default tone. Tone information on
/// non-initial syllables is discarded and cannot be recovered, so this is not
/// an inverse of the tone codec.
pub fn normalize(text: &str) -> String {
    normalize_with(text, &NormalizerConfig::default())
}

pub fn normalize_with(text: &str, config: &NormalizerConfig) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut word = String::new();
    for c in text.nfd() {
        if c.is_alphabetic() || is_tone_mark(c) {
            word.push(c);
            continue;
        }
        if !word.is_empty() {
            out.push_str(&normalize_word(&word, config));
            word.clear();
        }
        out.push(c);
    }
    if !word.is_empty() {
        out.push_str(&normalize_word(&word, config));
    }
    out.nfc().collect()
}

fn normalize_word(word: &str, config: &NormalizerConfig) -> String {
    let syllables = syllabify(word).into_first();
    let mut out = String::with_capacity(word.len() + 2);
    for (idx, syllable) in syllables.iter().enumerate() {
        let bare = detone(syllable);
        if is_bare_nasal(&bare) && (idx > 0 || !syllable.nfd().any(is_tone_mark)) {
            out.push_str(&bare);
            out.push(config.default_tone);
        } else if idx == 0 {
            mark_first(syllable, config.default_tone, &mut out);
        } else {
            out.push_str(&bare);
        }
    }
    out
}

fn is_bare_nasal(syllable: &str) -> bool {
    syllable.eq_ignore_ascii_case("n")
}

fn mark_first(syllable: &str, tone: char, out: &mut String) {
    if syllable.nfd().any(is_tone_mark) {
        out.push_str(syllable);
        return;
    }
    let mut placed = false;
    for c in syllable.nfd() {
        out.push(c);
        if !placed && classify(c) == CharClass::Vowel {
            out.push(tone);
            placed = true;
        }
    }
}
