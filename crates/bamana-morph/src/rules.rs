use std::collections::BTreeSet;
use std::fmt;

use bamana_types::{Pos, is_tone_mark};
use regex::Regex;
use thiserror::Error;
use tracing::warn;
use unicode_normalization::UnicodeNormalization;

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("invalid pattern {pattern:?} in rule {rule}: {source}")]
    InvalidPattern {
        rule: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("rule {0} declares no syllable tests")]
    EmptyWindow(String),
}

/// `(core, context)` patterns for one trailing syllable. `None` always matches.
pub type PatternPair<'a> = (Option<&'a str>, Option<&'a str>);

/// Test applied to one syllable (tone-stripped, lowercased).
#[derive(Clone)]
pub struct SyllableTest {
    core: Option<Regex>,
    context: Option<Regex>,
}

impl SyllableTest {
    pub fn matches(&self, syllable: &str) -> bool {
        self.core.as_ref().is_none_or(|re| re.is_match(syllable))
            && self.context.as_ref().is_none_or(|re| re.is_match(syllable))
    }
}

impl fmt::Debug for SyllableTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyllableTest")
            .field("core", &self.core.as_ref().map(Regex::as_str))
            .field("context", &self.context.as_ref().map(Regex::as_str))
            .finish()
    }
}

/// A suffix recognised over the last syllables of a word.
///
/// `tests` line up with the trailing syllables left to right; `anchor` is the
/// number of trailing letters (tone marks not counted) that belong to the
/// affix and are removed to get the stem.
#[derive(Clone, Debug)]
pub struct AffixRule {
    name: String,
    tests: Vec<SyllableTest>,
    anchor: usize,
    pos: BTreeSet<Pos>,
    gloss: String,
}

impl AffixRule {
    pub fn new(
        name: &str,
        patterns: &[PatternPair<'_>],
        anchor: usize,
        pos: &[Pos],
        gloss: &str,
    ) -> Result<Self, RuleError> {
        if patterns.is_empty() {
            return Err(RuleError::EmptyWindow(name.to_string()));
        }
        let compile = |pattern: Option<&str>| -> Result<Option<Regex>, RuleError> {
            pattern
                .filter(|p| !p.is_empty())
                .map(|p| {
                    Regex::new(p).map_err(|source| {
                        warn!(rule = name, pattern = p, error = %source, "rejecting affix pattern");
                        RuleError::InvalidPattern {
                            rule: name.to_string(),
                            pattern: p.to_string(),
                            source,
                        }
                    })
                })
                .transpose()
        };
        let tests = patterns
            .iter()
            .map(|&(core, context)| {
                Ok(SyllableTest {
                    core: compile(core)?,
                    context: compile(context)?,
                })
            })
            .collect::<Result<Vec<_>, RuleError>>()?;
        Ok(Self {
            name: name.to_string(),
            tests,
            anchor,
            pos: pos.iter().copied().collect(),
            gloss: gloss.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn gloss(&self) -> &str {
        &self.gloss
    }

    pub fn anchor(&self) -> usize {
        self.anchor
    }

    /// Number of trailing syllables the rule inspects.
    pub fn window(&self) -> usize {
        self.tests.len()
    }

    /// Test the trailing syllables right to left, stopping at the first failure.
    pub fn matches<S: AsRef<str>>(&self, syllables: &[S]) -> bool {
        if syllables.len() < self.tests.len() {
            return false;
        }
        self.tests
            .iter()
            .rev()
            .zip(syllables.iter().rev())
            .all(|(test, syllable)| test.matches(syllable.as_ref()))
    }

    /// Remove the anchored span; `None` if nothing would be left.
    pub fn strip(&self, word: &str) -> Option<String> {
        let mut chars: Vec<char> = word.trim().nfd().collect();
        let mut removed = 0;
        while removed < self.anchor {
            let c = chars.pop()?;
            if !is_tone_mark(c) {
                removed += 1;
            }
        }
        if chars.is_empty() {
            return None;
        }
        Some(chars.into_iter().nfc().collect())
    }

    /// Whether a stem with tags `pos` may take this affix. An empty rule set admits anything.
    pub fn admits(&self, pos: &BTreeSet<Pos>) -> bool {
        self.pos.is_empty() || !self.pos.is_disjoint(pos)
    }
}

struct RuleRow {
    name: &'static str,
    patterns: &'static [PatternPair<'static>],
    anchor: usize,
    pos: &'static [Pos],
    gloss: &'static str,
}

const NASAL: Option<&str> = Some("[mnɲŋ]");
const VERBAL: &[Pos] = &[Pos::Verb, Pos::QualVerb];
const NOMINAL: &[Pos] = &[Pos::Noun, Pos::ProperNoun, Pos::Adj, Pos::Participle, Pos::Num];

// Longer windows precede the single-syllable rules they would otherwise shadow.
const DEFAULT_RULES: &[RuleRow] = &[
    RuleRow {
        name: "ntan",
        patterns: &[(Some("n$"), None), (Some("^tan$"), None)],
        anchor: 4,
        pos: &[Pos::Noun],
        gloss: "PRIV",
    },
    RuleRow {
        name: "baga",
        patterns: &[(Some("^ba$"), None), (Some("^ga$"), None)],
        anchor: 4,
        pos: VERBAL,
        gloss: "AG.EX",
    },
    RuleRow {
        name: "bali",
        patterns: &[(Some("^ba$"), None), (Some("^li$"), None)],
        anchor: 4,
        pos: VERBAL,
        gloss: "PTCP.NEG",
    },
    RuleRow {
        name: "baa",
        patterns: &[(Some("^baa$"), None)],
        anchor: 3,
        pos: VERBAL,
        gloss: "AG.EX",
    },
    RuleRow {
        name: "ni",
        patterns: &[(None, NASAL), (Some("^ni$"), None)],
        anchor: 2,
        pos: VERBAL,
        gloss: "NMLZ",
    },
    RuleRow {
        name: "li",
        patterns: &[(Some("^li$"), None)],
        anchor: 2,
        pos: VERBAL,
        gloss: "NMLZ",
    },
    RuleRow {
        name: "na",
        patterns: &[(None, NASAL), (Some("^na$"), None)],
        anchor: 2,
        pos: VERBAL,
        gloss: "AG.OCC",
    },
    RuleRow {
        name: "la",
        patterns: &[(Some("^la$"), None)],
        anchor: 2,
        pos: VERBAL,
        gloss: "AG.OCC",
    },
    RuleRow {
        name: "nan",
        patterns: &[(None, NASAL), (Some("^nan$"), None)],
        anchor: 3,
        pos: VERBAL,
        gloss: "INSTR",
    },
    RuleRow {
        name: "lan",
        patterns: &[(Some("^lan$"), None)],
        anchor: 3,
        pos: VERBAL,
        gloss: "INSTR",
    },
    RuleRow {
        name: "ya",
        patterns: &[(Some("^ya$"), None)],
        anchor: 2,
        pos: &[Pos::Noun, Pos::Adj, Pos::Verb, Pos::QualVerb],
        gloss: "ABSTR",
    },
    RuleRow {
        name: "ta",
        patterns: &[(Some("^ta$"), None)],
        anchor: 2,
        pos: VERBAL,
        gloss: "PTCP.POT",
    },
    RuleRow {
        name: "tɔ",
        patterns: &[(Some("^tɔ$"), None)],
        anchor: 2,
        pos: VERBAL,
        gloss: "CONV.PROG",
    },
    RuleRow {
        name: "nin",
        patterns: &[(Some("^nin$"), None)],
        anchor: 3,
        pos: NOMINAL,
        gloss: "DIM",
    },
    RuleRow {
        name: "ba",
        patterns: &[(Some("^ba$"), None)],
        anchor: 2,
        pos: NOMINAL,
        gloss: "AUGM",
    },
    RuleRow {
        name: "ma",
        patterns: &[(Some("^ma$"), None)],
        anchor: 2,
        pos: &[Pos::Noun],
        gloss: "COM",
    },
    RuleRow {
        name: "w",
        patterns: &[(Some("^w$"), None)],
        anchor: 1,
        pos: NOMINAL,
        gloss: "PL",
    },
];

/// The built-in Bambara suffix table, in evaluation order.
pub fn default_rules() -> Vec<AffixRule> {
    DEFAULT_RULES
        .iter()
        .map(|row| {
            AffixRule::new(row.name, row.patterns, row.anchor, row.pos, row.gloss)
                .expect("built-in affix patterns compile")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(name: &str) -> AffixRule {
        default_rules()
            .into_iter()
            .find(|r| r.name() == name)
            .unwrap()
    }

    #[test]
    fn default_table_compiles() {
        let rules = default_rules();
        assert_eq!(rules.len(), DEFAULT_RULES.len());
        assert!(rules.iter().all(|r| r.window() >= 1 && r.anchor() >= 1));
    }

    #[test]
    fn none_and_empty_patterns_always_match() {
        let r = AffixRule::new("any", &[(None, Some(""))], 1, &[], "X").unwrap();
        assert!(r.matches(&["whatever"]));
        assert!(!r.matches::<&str>(&[]));
    }

    #[test]
    fn tests_align_right_to_left() {
        let ni = rule("ni");
        assert!(ni.matches(&["du", "mu", "ni"]));
        assert!(!ni.matches(&["si", "gi", "ni"]));
        assert!(!ni.matches(&["ni"]));
        let bali = rule("bali");
        assert!(bali.matches(&["dɔn", "ba", "li"]));
        assert!(!bali.matches(&["ba", "ka", "li"]));
    }

    #[test]
    fn strip_counts_letters_not_marks() {
        let w = rule("w");
        assert_eq!(w.strip("mùsow").as_deref(), Some("mùso"));
        let la = rule("la");
        assert_eq!(la.strip("baarakɛlá").as_deref(), Some("baarakɛ"));
        assert_eq!(la.strip("la"), None);
    }

    #[test]
    fn admits_by_pos_intersection() {
        let w = rule("w");
        assert!(w.admits(&BTreeSet::from([Pos::Noun, Pos::Verb])));
        assert!(!w.admits(&BTreeSet::from([Pos::Verb])));
        let open = AffixRule::new("open", &[(Some("x"), None)], 1, &[], "X").unwrap();
        assert!(open.admits(&BTreeSet::new()));
    }

    #[test]
    fn invalid_patterns_are_reported() {
        let err = AffixRule::new("bad", &[(Some("("), None)], 1, &[], "X").unwrap_err();
        assert!(matches!(err, RuleError::InvalidPattern { .. }));
        assert!(matches!(
            AffixRule::new("empty", &[], 1, &[], "X"),
            Err(RuleError::EmptyWindow(_))
        ));
    }
}
