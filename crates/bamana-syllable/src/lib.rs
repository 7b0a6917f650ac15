//! Syllable segmentation and diacritic normalization for Bambara orthography.
//!
//! [`syllabify`] partitions a word into syllables (onset, vowel nucleus with
//! its tone mark, optional nasal coda). A vowel followed by `n` and a
//! consonant is read both ways, so the result is a [`Syllabification`] that
//! may hold several alternatives; every alternative concatenates back to the
//! input.
//!
//! [`normalize`] rewrites legacy diacritic placement into one convention. It
//! discards information and is not an inverse of anything.
//!
//! # Example
//! ```rust
//! use bamana_syllable::{normalize, syllabify};
//!
//! let result = syllabify("bamanankan");
//! assert_eq!(result.first(), &["ba", "ma", "nan", "kan"]);
//! assert_eq!(result.alternatives().len(), 2);
//!
//! assert_eq!(normalize("bamako"), "bámako");
//! ```

pub mod normalize;
pub mod syllabify;

pub use normalize::{HIGH_TONE, NormalizerConfig, normalize, normalize_with};
pub use syllabify::{MAX_ALTERNATIVES, Syllabification, syllabify};
