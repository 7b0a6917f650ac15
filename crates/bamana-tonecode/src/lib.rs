//! Differential tone codes between practical and tonal Bambara orthography.
//!
//! Given the same word written without tones (`narè`, practical spelling) and
//! with tones (`nàrɛ`), [`encode`] aligns the tone-stripped practical form
//! with the tonal form and files each insert/delete under the syllable it
//! touches. [`decode`] replays one syllable's script to regenerate the tonal
//! syllable.
//!
//! # How it works
//! 1. Strip diacritics from the practical form and syllabify it into chunks.
//! 2. Align the decomposed chunk text against the decomposed tonal form with a
//!    minimum edit-distance backtrace ([`editops`]).
//! 3. Split every replace into an insert followed by a delete at the same
//!    point; the serialized format has no replace.
//! 4. Rebase each operation onto its chunk and append it, in order, to that
//!    chunk's [`ToneCode`].
//! 5. Decode the fresh codes and compare with the tonal input. Mismatches are
//!    counted in [`CodecStats`], never raised.
//!
//! # Example
//! ```rust
//! use bamana_tonecode::{decode_str, encode};
//!
//! let encoded = encode("narè", "nàrɛ");
//! assert_eq!(encoded.chunks, ["na", "re"]);
//! assert_eq!(encoded.codes[1].to_string(), "+;1;ɛ;-;1;e");
//! assert_eq!(decode_str("re", "+;1;ɛ;-;1;e").unwrap(), "rɛ");
//! assert!(decode_str("re", "+;1").is_err());
//! ```

pub mod code;
pub mod codec;
pub mod editops;

pub use code::{
    DecodeError, Dispatch, EditMode, EditOperation, SEGMENT_SEPARATOR, ToneCode, canonicalize,
    decode, decode_str, decode_word, dispatch,
};
pub use codec::{CodecStats, Encoded, encode, encode_with_stats};
pub use editops::{EditKind, EditOp, editops};
