use std::slice;

use bamana_types::{CharClass, classify};
use tracing::debug;
use unicode_normalization::UnicodeNormalization;

/// Upper bound on enumerated segmentations. Ambiguous points beyond the
/// budget keep the nasal-closes reading.
pub const MAX_ALTERNATIVES: usize = 64;

/// Alternative syllable sequences for one word.
///
/// Every alternative partitions the word exactly; syllables are NFC. Past
/// [`MAX_ALTERNATIVES`] the list is incomplete: further ambiguous nasals
/// only appear in their nasal-closes reading.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Syllabification {
    Single(Vec<String>),
    Ambiguous(Vec<Vec<String>>),
}

impl Syllabification {
    /// All segmentations, never empty.
    pub fn alternatives(&self) -> &[Vec<String>] {
        match self {
            Syllabification::Single(syllables) => slice::from_ref(syllables),
            Syllabification::Ambiguous(alts) => alts.as_slice(),
        }
    }

    /// The first segmentation. Ambiguous nasals attach to the preceding syllable here.
    pub fn first(&self) -> &[String] {
        &self.alternatives()[0]
    }

    pub fn into_first(self) -> Vec<String> {
        match self {
            Syllabification::Single(syllables) => syllables,
            Syllabification::Ambiguous(mut alts) => alts.swap_remove(0),
        }
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Syllabification::Ambiguous(_))
    }

    pub fn len(&self) -> usize {
        self.alternatives().len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

/// A base code point plus the combining marks that follow it.
#[derive(Clone, Copy, Debug)]
struct Cluster {
    end: usize,
    class: CharClass,
    base: char,
}

fn clusters(chars: &[char]) -> Vec<Cluster> {
    let mut out: Vec<Cluster> = Vec::with_capacity(chars.len());
    for (idx, &c) in chars.iter().enumerate() {
        let class = classify(c);
        match out.last_mut() {
            Some(last) if class == CharClass::Mark => last.end = idx + 1,
            _ => out.push(Cluster {
                end: idx + 1,
                // A stray leading mark has nothing to attach to.
                class: if class == CharClass::Mark {
                    CharClass::Other
                } else {
                    class
                },
                base: c.to_lowercase().next().unwrap_or(c),
            }),
        }
    }
    out
}

/// Segment a word into syllables.
///
/// Works on the NFD form, one cluster (base letter plus its marks) at a time,
/// so tone diacritics never move a boundary. A vowel followed by `n` and a
/// consonant is ambiguous and yields both placements of the nasal.
pub fn syllabify(word: &str) -> Syllabification {
    let chars: Vec<char> = word.nfd().collect();
    if chars.is_empty() {
        return Syllabification::Single(vec![String::new()]);
    }
    let units = clusters(&chars);
    let n = units.len();
    let class_at = |idx: usize| units.get(idx).map(|u| u.class);

    // ends[k]: a syllable ends after cluster k.
    let mut ends = vec![false; n];
    // (nasal closes, nasal opens) pairs of candidate boundary positions.
    let mut choices: Vec<(usize, usize)> = Vec::new();

    let mut i = 0;
    while i < n {
        if units[i].class != CharClass::Vowel {
            i += 1;
            continue;
        }
        let mut last = i;
        if class_at(i + 1) == Some(CharClass::Vowel) && units[i + 1].base == units[i].base {
            last = i + 1;
        }
        let next = last + 1;
        match class_at(next) {
            None => {}
            Some(CharClass::Nasal) => match class_at(next + 1) {
                Some(CharClass::Vowel) => ends[last] = true,
                Some(CharClass::Consonant | CharClass::Nasal) => choices.push((next, last)),
                _ => ends[next] = true,
            },
            Some(_) => ends[last] = true,
        }
        i = next;
    }
    ends[n - 1] = true;

    let mut markers: Vec<Vec<bool>> = vec![ends];
    let mut truncated = 0;
    for &(close, open) in &choices {
        if markers.len() * 2 > MAX_ALTERNATIVES {
            for m in &mut markers {
                m[close] = true;
            }
            truncated += 1;
            continue;
        }
        let mut next_round = Vec::with_capacity(markers.len() * 2);
        for m in markers {
            let mut closed = m.clone();
            closed[close] = true;
            let mut opened = m;
            opened[open] = true;
            next_round.push(closed);
            next_round.push(opened);
        }
        markers = next_round;
    }
    if truncated > 0 {
        debug!(
            word,
            ambiguous = choices.len(),
            truncated,
            cap = MAX_ALTERNATIVES,
            "alternatives capped; remaining nasals close their syllable"
        );
    } else if choices.len() > 1 {
        debug!(word, ambiguous = choices.len(), alternatives = markers.len(), "syllabified");
    }

    let mut alternatives: Vec<Vec<String>> = markers
        .iter()
        .map(|m| split_at_markers(&chars, &units, m))
        .collect();
    if alternatives.len() == 1 {
        Syllabification::Single(alternatives.swap_remove(0))
    } else {
        Syllabification::Ambiguous(alternatives)
    }
}

fn split_at_markers(chars: &[char], units: &[Cluster], ends: &[bool]) -> Vec<String> {
    let mut out = Vec::new();
    let mut start = 0;
    for (unit, &is_end) in units.iter().zip(ends) {
        if is_end {
            out.push(chars[start..unit.end].iter().copied().nfc().collect());
            start = unit.end;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn syls(word: &str) -> Vec<Vec<String>> {
        syllabify(word).alternatives().to_vec()
    }

    #[test]
    fn open_syllables() {
        assert_eq!(syls("bamako"), vec![vec!["ba", "ma", "ko"]]);
        assert_eq!(syls("nàrɛ"), vec![vec!["nà", "rɛ"]]);
    }

    #[test]
    fn long_vowel_is_one_nucleus() {
        assert_eq!(syls("baara"), vec![vec!["baa", "ra"]]);
        assert_eq!(syls("sàa"), vec![vec!["sàa"]]);
    }

    #[test]
    fn nasal_before_vowel_opens_next_syllable() {
        assert_eq!(syls("bana"), vec![vec!["ba", "na"]]);
    }

    #[test]
    fn nasal_at_word_end_closes() {
        assert_eq!(syls("kalan"), vec![vec!["ka", "lan"]]);
        assert_eq!(syls("kalán"), vec![vec!["ka", "lán"]]);
    }

    #[test]
    fn nasal_before_consonant_is_ambiguous() {
        let result = syllabify("bamanankan");
        assert!(result.is_ambiguous());
        assert_eq!(
            result.alternatives(),
            &[
                vec!["ba", "ma", "nan", "kan"],
                vec!["ba", "ma", "na", "nkan"],
            ]
        );
        assert_eq!(result.first(), &["ba", "ma", "nan", "kan"]);
    }

    #[test]
    fn final_consonant_splits_after_vowel() {
        assert_eq!(syls("musow"), vec![vec!["mu", "so", "w"]]);
    }

    #[test]
    fn tone_marks_do_not_move_boundaries() {
        let plain = syllabify("sanji");
        let marked = syllabify("sánji");
        assert_eq!(plain.len(), marked.len());
        for (a, b) in plain.alternatives().iter().zip(marked.alternatives()) {
            assert_eq!(a.len(), b.len());
        }
    }

    #[test]
    fn degenerate_words() {
        assert_eq!(syls(""), vec![vec![""]]);
        assert_eq!(syls("n"), vec![vec!["n"]]);
        assert_eq!(syls("ń"), vec![vec!["ń"]]);
        assert_eq!(syls("pst"), vec![vec!["pst"]]);
    }

    #[test]
    fn alternatives_are_capped() {
        let word = format!("an{}", "ankan".repeat(10));
        let result = syllabify(&word);
        // Ten ambiguous nasals: the first six fan out, the rest close.
        assert_eq!(result.len(), MAX_ALTERNATIVES);
        let alts = result.alternatives();
        for (idx, alt) in alts.iter().enumerate() {
            assert_eq!(alt.concat(), word);
            assert!(!alts[..idx].contains(alt));
            let [.., closed, last] = alt.as_slice() else {
                panic!("too few syllables: {alt:?}");
            };
            assert!(closed.ends_with('n'), "{alt:?}");
            assert_eq!(last, "kan");
        }
    }

    #[test]
    fn every_alternative_covers_the_word() {
        for word in ["bamanankan", "Mɔ̀gɔ", "dɔ́nkili", "kɔnɔntɔn", "a'", "sanbɛ"] {
            for alt in syllabify(word).alternatives() {
                let joined: String = alt.concat();
                assert_eq!(joined.nfc().collect::<String>(), word.nfc().collect::<String>());
            }
        }
    }
}
