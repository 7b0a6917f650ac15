//! Affix-stripping lemmatizer for Bambara wordforms.
//!
//! The analyzer is decoupled from how the dictionary is loaded: it borrows a
//! read-only [`Lexicon`] per call and owns only its rule table and options.
//!
//! # How it works
//! 1. Look the lowercased wordform up in the tonal map (stage 0).
//! 2. Syllabify the tone-stripped word and try each [`AffixRule`] in order
//!    against its trailing syllables. The first rule that matches strips its
//!    affix and looks the residual up (stage 1).
//! 3. Look the tone-stripped wordform up in the tone-stripped map (stage 0).
//! 4. Optionally try reduplication (stage 2) and two-part compounds (stage 3).
//! 5. Otherwise return a single unrecognized marker (stage -1).
//!
//! Each tier short-circuits: the first tier with hits returns all of them,
//! deduplicated.
//!
//! # Example
//! ```rust
//! use bamana_lexicon::Lexicon;
//! use bamana_morph::lemmatize;
//! use bamana_types::{LexiconRecord, Stage};
//!
//! let lex = Lexicon::build([LexiconRecord::new("mùso", "n", "woman")]);
//! let cands = lemmatize("mùsow", &lex);
//! assert_eq!(cands[0].lemma.as_deref(), Some("mùso"));
//! assert_eq!(cands[0].gloss.as_deref(), Some("woman-PL"));
//! assert_eq!(cands[0].stage, Stage::Derivation);
//! ```

use std::collections::HashSet;
use std::sync::LazyLock;

use bamana_lexicon::Lexicon;
use bamana_syllable::syllabify;
use bamana_types::{Candidate, LexicalEntry, Stage, detoned_key};
use tracing::{debug, trace};

mod rules;

pub use rules::{AffixRule, PatternPair, RuleError, SyllableTest, default_rules};

/// Which lookup tiers beyond the direct and affix ones are enabled.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AnalyzerOptions {
    /// Fall back to the tone-stripped map before giving up.
    pub detone_fallback: bool,
    /// Recognise `XX` and `X-X` reduplications of a known `X`.
    pub reduplication: bool,
    /// Split at a syllable boundary into two known parts.
    pub compounds: bool,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            detone_fallback: true,
            reduplication: false,
            compounds: false,
        }
    }
}

impl AnalyzerOptions {
    /// Every tier enabled.
    pub fn extended() -> Self {
        Self {
            detone_fallback: true,
            reduplication: true,
            compounds: true,
        }
    }
}

/// Rule table plus options; cheap to share across threads.
#[derive(Clone, Debug)]
pub struct Analyzer {
    rules: Vec<AffixRule>,
    options: AnalyzerOptions,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(default_rules(), AnalyzerOptions::default())
    }
}

impl Analyzer {
    /// Rules are tried in the order given.
    pub fn new(rules: Vec<AffixRule>, options: AnalyzerOptions) -> Self {
        Self { rules, options }
    }

    pub fn with_options(mut self, options: AnalyzerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn rules(&self) -> &[AffixRule] {
        &self.rules
    }

    pub fn options(&self) -> AnalyzerOptions {
        self.options
    }

    /// Candidates for `wordform`; never empty.
    pub fn lemmatize(&self, wordform: &str, lexicon: &Lexicon) -> Vec<Candidate> {
        let word = wordform.trim().to_lowercase();
        if word.is_empty() {
            return vec![Candidate::unrecognized()];
        }

        let direct = lexicon.lookup(&word);
        if !direct.is_empty() {
            trace!(word, hits = direct.len(), "direct tonal match");
            return collect(direct, Stage::Direct);
        }

        let derived = self.derive(&word, lexicon);
        if !derived.is_empty() {
            return derived;
        }

        if self.options.detone_fallback {
            let hits = lexicon.lookup_detoned(&word);
            if !hits.is_empty() {
                trace!(word, hits = hits.len(), "tone-stripped match");
                return collect(hits, Stage::Direct);
            }
        }

        if self.options.reduplication {
            let hits = reduplicated(&word, lexicon);
            if !hits.is_empty() {
                debug!(word, hits = hits.len(), "reduplication");
                return collect(hits, Stage::Reduplication);
            }
        }

        if self.options.compounds {
            let hits = compound(&word, lexicon);
            if !hits.is_empty() {
                debug!(word, hits = hits.len(), "compound");
                return hits;
            }
        }

        trace!(word, "unrecognized");
        vec![Candidate::unrecognized()]
    }

    /// Affix tier: the first rule whose syllable tests all pass decides.
    fn derive(&self, word: &str, lexicon: &Lexicon) -> Vec<Candidate> {
        let syllables = syllabify(&detoned_key(word)).into_first();
        let Some(rule) = self.rules.iter().find(|r| r.matches(&syllables)) else {
            return Vec::new();
        };
        let Some(residual) = rule.strip(word) else {
            return Vec::new();
        };
        let hits: Vec<&LexicalEntry> = lexicon
            .lookup_any(&residual)
            .iter()
            .filter(|entry| rule.admits(&entry.pos))
            .collect();
        debug!(word, rule = rule.name(), residual, hits = hits.len(), "affix rule matched");

        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for entry in hits {
            push_unique(
                &mut out,
                &mut seen,
                Candidate {
                    lemma: Some(entry.lemma.clone()),
                    pos: entry.pos.clone(),
                    gloss: Some(format!("{}-{}", entry.gloss, rule.gloss())),
                    stage: Stage::Derivation,
                },
            );
        }
        out
    }
}

static DEFAULT_ANALYZER: LazyLock<Analyzer> = LazyLock::new(Analyzer::default);

/// Lemmatize with the built-in rule table and default options.
pub fn lemmatize(wordform: &str, lexicon: &Lexicon) -> Vec<Candidate> {
    DEFAULT_ANALYZER.lemmatize(wordform, lexicon)
}

fn collect(entries: &[LexicalEntry], stage: Stage) -> Vec<Candidate> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for entry in entries {
        push_unique(&mut out, &mut seen, Candidate::from_entry(entry, stage));
    }
    out
}

fn push_unique(
    out: &mut Vec<Candidate>,
    seen: &mut HashSet<(Option<String>, Option<String>)>,
    candidate: Candidate,
) {
    if seen.insert((candidate.lemma.clone(), candidate.gloss.clone())) {
        out.push(candidate);
    }
}

fn reduplicated<'a>(word: &str, lexicon: &'a Lexicon) -> &'a [LexicalEntry] {
    let key = detoned_key(word);
    let half = match key.split_once('-') {
        Some((left, right)) if left == right => left,
        Some(_) => return &[],
        None => {
            let chars: Vec<char> = key.chars().collect();
            let mid = chars.len() / 2;
            if chars.len() < 2 || chars.len() % 2 != 0 || chars[..mid] != chars[mid..] {
                return &[];
            }
            let split = key.char_indices().nth(mid).map_or(key.len(), |(i, _)| i);
            &key[..split]
        }
    };
    if half.is_empty() {
        return &[];
    }
    lexicon.lookup_any(half)
}

fn compound(word: &str, lexicon: &Lexicon) -> Vec<Candidate> {
    let syllables = syllabify(&detoned_key(word)).into_first();
    for split in 1..syllables.len() {
        let left = syllables[..split].concat();
        let right = syllables[split..].concat();
        let (lhs, rhs) = (lexicon.lookup_any(&left), lexicon.lookup_any(&right));
        if lhs.is_empty() || rhs.is_empty() {
            continue;
        }
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for l in lhs {
            for r in rhs {
                push_unique(
                    &mut out,
                    &mut seen,
                    Candidate {
                        lemma: Some(word.to_string()),
                        pos: r.pos.clone(),
                        gloss: Some(format!("{}.{}", l.gloss, r.gloss)),
                        stage: Stage::Compound,
                    },
                );
            }
        }
        return out;
    }
    Vec::new()
}
