//! Bambara wordform toolkit: syllabification, orthographic normalization,
//! differential tone coding and lemmatization.
//!
//! This crate re-exports the public surface of the workspace members so a
//! caller needs a single dependency:
//! - [`syllabify`] and [`normalize`] from `bamana-syllable`
//! - [`encode`], [`decode`] and [`canonicalize`] from `bamana-tonecode`
//! - [`Lexicon`] from `bamana-lexicon`
//! - [`lemmatize`] and [`Analyzer`] from `bamana-morph`
//!
//! # Example
//! ```rust
//! use bamana::{LexiconRecord, Lexicon, Stage, encode, lemmatize, syllabify};
//!
//! assert_eq!(syllabify("bamako").first(), ["ba", "ma", "ko"]);
//!
//! let encoded = encode("narè", "nàrɛ");
//! assert_eq!(encoded.reconstruct().unwrap(), "nàrɛ");
//!
//! let lex = Lexicon::build([LexiconRecord::new("nàrɛ", "n", "néré tree")]);
//! assert_eq!(lemmatize("nàrɛw", &lex)[0].stage, Stage::Derivation);
//! ```

pub use bamana_lexicon::Lexicon;
pub use bamana_morph::{
    AffixRule, Analyzer, AnalyzerOptions, RuleError, default_rules, lemmatize,
};
pub use bamana_syllable::{
    HIGH_TONE, MAX_ALTERNATIVES, NormalizerConfig, Syllabification, normalize, normalize_with,
    syllabify,
};
pub use bamana_tonecode::{
    CodecStats, DecodeError, EditMode, EditOperation, Encoded, ToneCode, canonicalize, decode,
    decode_str, decode_word, encode, encode_with_stats,
};
pub use bamana_types::{
    Candidate, LexicalEntry, LexiconRecord, Pos, Stage, detone, detoned_key, tonal_key,
};
