use std::fmt;
use std::str::FromStr;

use bamana_types::{detone, is_tone_mark};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

/// Separator between the segments of a serialized [`ToneCode`].
pub const SEGMENT_SEPARATOR: char = ';';

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("tone code has {count} segments, expected a multiple of 3")]
    SegmentCount { count: usize },
    #[error("unknown edit mode {0:?}")]
    UnknownMode(String),
    #[error("invalid edit position {0:?}")]
    InvalidPosition(String),
    #[error("edit character {0:?} is not a single code point")]
    InvalidCharacter(String),
    #[error("edit at {position} is outside a chunk of length {len}")]
    OutOfRange { position: isize, len: usize },
    #[error("{chunks} chunks but {codes} codes")]
    ChunkCount { chunks: usize, codes: usize },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
    Insert,
    Delete,
}

impl EditMode {
    pub fn symbol(self) -> char {
        match self {
            EditMode::Insert => '+',
            EditMode::Delete => '-',
        }
    }

    pub fn from_symbol(token: &str) -> Option<Self> {
        match token {
            "+" => Some(EditMode::Insert),
            "-" => Some(EditMode::Delete),
            _ => None,
        }
    }
}

/// One step of a tone code: insert or delete `character` at a chunk-local
/// position of the tone-stripped chunk.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct EditOperation {
    pub mode: EditMode,
    pub position: usize,
    pub character: char,
}

impl EditOperation {
    pub fn insert(position: usize, character: char) -> Self {
        Self {
            mode: EditMode::Insert,
            position,
            character,
        }
    }

    pub fn delete(position: usize, character: char) -> Self {
        Self {
            mode: EditMode::Delete,
            position,
            character,
        }
    }

    /// Whether the affected character is a tone diacritic.
    pub fn is_tonal(&self) -> bool {
        is_tone_mark(self.character)
    }
}

/// Ordered edit script for one syllable chunk.
///
/// Serialized as `mode;position;character` triples joined by `;`, e.g.
/// `+;1;ɔ;-;1;o`. The empty code is the empty string.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToneCode {
    ops: Vec<EditOperation>,
}

impl ToneCode {
    pub fn new(ops: Vec<EditOperation>) -> Self {
        Self { ops }
    }

    pub fn ops(&self) -> &[EditOperation] {
        &self.ops
    }

    pub fn push(&mut self, op: EditOperation) {
        self.ops.push(op);
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Canonical reordering; see [`canonicalize`].
    pub fn canonical(&self) -> ToneCode {
        canonicalize(self)
    }
}

impl fmt::Display for ToneCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, op) in self.ops.iter().enumerate() {
            if idx > 0 {
                write!(f, "{SEGMENT_SEPARATOR}")?;
            }
            write!(
                f,
                "{}{SEGMENT_SEPARATOR}{}{SEGMENT_SEPARATOR}{}",
                op.mode.symbol(),
                op.position,
                op.character
            )?;
        }
        Ok(())
    }
}

impl FromStr for ToneCode {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(ToneCode::default());
        }
        let segments: Vec<&str> = s.split(SEGMENT_SEPARATOR).collect();
        if segments.len() % 3 != 0 {
            return Err(DecodeError::SegmentCount {
                count: segments.len(),
            });
        }
        let mut ops = Vec::with_capacity(segments.len() / 3);
        for triple in segments.chunks_exact(3) {
            let mode = EditMode::from_symbol(triple[0])
                .ok_or_else(|| DecodeError::UnknownMode(triple[0].to_string()))?;
            let position = triple[1]
                .parse::<usize>()
                .map_err(|_| DecodeError::InvalidPosition(triple[1].to_string()))?;
            let mut chars = triple[2].chars();
            let character = match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => return Err(DecodeError::InvalidCharacter(triple[2].to_string())),
            };
            ops.push(EditOperation {
                mode,
                position,
                character,
            });
        }
        Ok(ToneCode { ops })
    }
}

/// Rebuild a tonal syllable from a chunk and its code.
///
/// The chunk is tone-stripped and decomposed first; each operation addresses
/// its recorded position shifted by the inserts and deletes applied before
/// it. Any operation falling outside the buffer fails the whole call.
pub fn decode(chunk: &str, code: &ToneCode) -> Result<String, DecodeError> {
    let mut buf: Vec<char> = detone(chunk).nfd().collect();
    let mut offset: isize = 0;
    for op in code.ops() {
        let at = op.position as isize + offset;
        match op.mode {
            EditMode::Insert => {
                if at < 0 || at as usize > buf.len() {
                    return Err(DecodeError::OutOfRange {
                        position: at,
                        len: buf.len(),
                    });
                }
                buf.insert(at as usize, op.character);
                offset += 1;
            }
            EditMode::Delete => {
                if at < 0 || at as usize >= buf.len() {
                    return Err(DecodeError::OutOfRange {
                        position: at,
                        len: buf.len(),
                    });
                }
                buf.remove(at as usize);
                offset -= 1;
            }
        }
    }
    Ok(buf.into_iter().nfc().collect())
}

/// Parse a serialized code and decode it against `chunk`.
pub fn decode_str(chunk: &str, code: &str) -> Result<String, DecodeError> {
    decode(chunk, &code.parse()?)
}

/// Decode every chunk and join the syllables into one NFC word.
pub fn decode_word(chunks: &[String], codes: &[ToneCode]) -> Result<String, DecodeError> {
    if chunks.len() != codes.len() {
        return Err(DecodeError::ChunkCount {
            chunks: chunks.len(),
            codes: codes.len(),
        });
    }
    let mut word = String::new();
    for (chunk, code) in chunks.iter().zip(codes) {
        word.push_str(&decode(chunk, code)?);
    }
    Ok(word.nfc().collect())
}

/// A code's operations split by mode, then by segmental vs. tonal character.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Dispatch {
    pub insert_segmental: Vec<EditOperation>,
    pub insert_tonal: Vec<EditOperation>,
    pub delete_segmental: Vec<EditOperation>,
    pub delete_tonal: Vec<EditOperation>,
}

impl Dispatch {
    /// Buckets in canonical order.
    pub fn buckets(&self) -> [&[EditOperation]; 4] {
        [
            &self.insert_segmental,
            &self.insert_tonal,
            &self.delete_segmental,
            &self.delete_tonal,
        ]
    }
}

/// Sort each operation into its bucket, keeping relative order inside a bucket.
pub fn dispatch(code: &ToneCode) -> Dispatch {
    let mut out = Dispatch::default();
    for op in code.ops() {
        let bucket = match (op.mode, op.is_tonal()) {
            (EditMode::Insert, false) => &mut out.insert_segmental,
            (EditMode::Insert, true) => &mut out.insert_tonal,
            (EditMode::Delete, false) => &mut out.delete_segmental,
            (EditMode::Delete, true) => &mut out.delete_tonal,
        };
        bucket.push(*op);
    }
    out
}

/// Reorder a code so equivalent scripts compare and aggregate identically.
///
/// Order: inserts before deletes; within a mode, segmental characters before
/// tone marks; then by position and character. Every key is taken from the
/// operation itself. The result is a comparison form: decoding relies on the
/// recorded order, so decode the original code, not its canonical form.
pub fn canonicalize(code: &ToneCode) -> ToneCode {
    let dispatched = dispatch(code);
    let mut ops = Vec::with_capacity(code.len());
    for bucket in dispatched.buckets() {
        let mut sorted = bucket.to_vec();
        sorted.sort_by_key(|op| (op.position, op.character));
        ops.extend(sorted);
    }
    ToneCode { ops }
}
