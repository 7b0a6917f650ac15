//! Read-only Bambara lexicon keyed by tonal and tone-stripped wordform.
//!
//! A [`Lexicon`] is built once from [`LexiconRecord`]s (headword, alternate
//! spellings, slash-delimited POS, gloss) and never mutated afterwards, so it
//! can be shared by reference across threads without locking. Parsing the
//! dictionary source into records is the caller's job; [`Lexicon::from_json`]
//! and [`Lexicon::load_json`] accept records already serialized as JSON.
//!
//! Two parallel maps are kept:
//! - tonal key (lowercased, NFC) -> entries
//! - tone-stripped key (lowercased, diacritics removed) -> entries
//!
//! Every headword and every alternate spelling is indexed in both.
//!
//! # Example
//! ```rust
//! use bamana_lexicon::Lexicon;
//! use bamana_types::LexiconRecord;
//!
//! let lex = Lexicon::build([
//!     LexiconRecord::new("mùso", "n", "woman").with_variants(["muso"]),
//!     LexiconRecord::new("dɔ́n", "v/n", "know"),
//! ]);
//! assert_eq!(lex.lookup("Mùso")[0].gloss, "woman");
//! assert_eq!(lex.lookup_detoned("dɔn")[0].lemma, "dɔ́n");
//! assert!(lex.lookup("xyz").is_empty());
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use bamana_types::{LexicalEntry, LexiconRecord, detoned_key, parse_pos_tags, tonal_key};
use tracing::{info, warn};

/// In-memory lexicon; no public fields, lookups only.
#[derive(Debug, Default)]
pub struct Lexicon {
    tonal: HashMap<String, Vec<LexicalEntry>>,
    detoned: HashMap<String, Vec<LexicalEntry>>,
    entries: usize,
}

impl Lexicon {
    /// Index a sequence of records.
    ///
    /// Unknown POS tags are logged and left out of the entry's tag set; the
    /// entry itself is kept.
    pub fn build<I>(records: I) -> Self
    where
        I: IntoIterator<Item = LexiconRecord>,
    {
        let mut lexicon = Lexicon::default();
        for record in records {
            let (pos, unknown) = parse_pos_tags(&record.pos);
            if !unknown.is_empty() {
                warn!(lemma = %record.lemma, tags = ?unknown, "skipping unknown POS tags");
            }
            let entry = LexicalEntry {
                lemma: record.lemma.trim().to_string(),
                pos,
                gloss: record.gloss.trim().to_string(),
            };
            for form in std::iter::once(&record.lemma).chain(&record.variants) {
                if form.trim().is_empty() {
                    continue;
                }
                insert_unique(&mut lexicon.tonal, tonal_key(form), &entry);
                insert_unique(&mut lexicon.detoned, detoned_key(form), &entry);
            }
            lexicon.entries += 1;
        }
        info!(
            entries = lexicon.entries,
            tonal_keys = lexicon.tonal.len(),
            detoned_keys = lexicon.detoned.len(),
            "lexicon built"
        );
        lexicon
    }

    /// Build from a JSON array of records.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let records: Vec<LexiconRecord> =
            serde_json::from_slice(bytes).context("parse lexicon records")?;
        Ok(Self::build(records))
    }

    /// Read a JSON array of records from disk and build.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
        Self::from_json(&bytes).with_context(|| format!("load lexicon {}", path.display()))
    }

    /// Entries whose tonal form matches `form` case-insensitively, or an empty slice.
    pub fn lookup(&self, form: &str) -> &[LexicalEntry] {
        self.tonal
            .get(&tonal_key(form))
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Entries whose tone-stripped form matches the tone-stripped `form`.
    pub fn lookup_detoned(&self, form: &str) -> &[LexicalEntry] {
        self.detoned
            .get(&detoned_key(form))
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Tonal lookup first, tone-stripped lookup if that misses.
    pub fn lookup_any(&self, form: &str) -> &[LexicalEntry] {
        let hits = self.lookup(form);
        if hits.is_empty() {
            self.lookup_detoned(form)
        } else {
            hits
        }
    }

    /// Check whether `form` is known with or without tones.
    pub fn contains(&self, form: &str) -> bool {
        !self.lookup_any(form).is_empty()
    }

    /// Number of records indexed.
    pub fn entry_count(&self) -> usize {
        self.entries
    }

    /// Number of distinct tonal keys.
    pub fn key_count(&self) -> usize {
        self.tonal.len()
    }

    /// Number of distinct tone-stripped keys.
    pub fn detoned_key_count(&self) -> usize {
        self.detoned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }
}

fn insert_unique(map: &mut HashMap<String, Vec<LexicalEntry>>, key: String, entry: &LexicalEntry) {
    let bucket = map.entry(key).or_default();
    if !bucket.contains(entry) {
        bucket.push(entry.clone());
    }
}
