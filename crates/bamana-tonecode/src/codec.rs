use std::collections::BTreeMap;

use bamana_syllable::syllabify;
use bamana_types::detone;
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};
use unicode_normalization::UnicodeNormalization;

use crate::code::{DecodeError, EditMode, EditOperation, ToneCode, decode_word};
use crate::editops::{EditKind, editops};

/// Per-syllable codes plus the tone-stripped chunks they apply to.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Encoded {
    pub codes: Vec<ToneCode>,
    pub chunks: Vec<String>,
}

impl Encoded {
    /// Decode every chunk and join them back into the tonal word.
    pub fn reconstruct(&self) -> Result<String, DecodeError> {
        decode_word(&self.chunks, &self.codes)
    }
}

/// Counters fed by [`encode_with_stats`].
///
/// Not shared between threads: give each worker its own instance and
/// [`merge`](CodecStats::merge) them afterwards.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct CodecStats {
    pub words: u64,
    pub chunks: u64,
    /// Words whose code failed to reproduce the tonal input.
    pub mismatches: u64,
    pub segmental_inserts: u64,
    pub tonal_inserts: u64,
    pub segmental_deletes: u64,
    pub tonal_deletes: u64,
    /// Canonical chunk code -> occurrences; the empty code counts too.
    pub codes: BTreeMap<String, u64>,
}

impl CodecStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge(&mut self, other: &CodecStats) {
        self.words += other.words;
        self.chunks += other.chunks;
        self.mismatches += other.mismatches;
        self.segmental_inserts += other.segmental_inserts;
        self.tonal_inserts += other.tonal_inserts;
        self.segmental_deletes += other.segmental_deletes;
        self.tonal_deletes += other.tonal_deletes;
        for (code, count) in &other.codes {
            *self.codes.entry(code.clone()).or_insert(0) += count;
        }
    }

    /// Share of encoded words that failed the self-check.
    pub fn mismatch_rate(&self) -> f64 {
        if self.words == 0 {
            0.0
        } else {
            self.mismatches as f64 / self.words as f64
        }
    }

    fn record(&mut self, codes: &[ToneCode], round_trips: bool) {
        self.words += 1;
        if !round_trips {
            self.mismatches += 1;
        }
        self.chunks += codes.len() as u64;
        for code in codes {
            for op in code.ops() {
                let counter = match (op.mode, op.is_tonal()) {
                    (EditMode::Insert, false) => &mut self.segmental_inserts,
                    (EditMode::Insert, true) => &mut self.tonal_inserts,
                    (EditMode::Delete, false) => &mut self.segmental_deletes,
                    (EditMode::Delete, true) => &mut self.tonal_deletes,
                };
                *counter += 1;
            }
            *self.codes.entry(code.canonical().to_string()).or_insert(0) += 1;
        }
    }
}

/// Compute per-syllable codes turning `non_tonal` into `tonal`.
///
/// Chunks come from syllabifying the tone-stripped `non_tonal`. The result is
/// checked by decoding it again; a mismatch is logged and the code is still
/// returned.
pub fn encode(non_tonal: &str, tonal: &str) -> Encoded {
    encode_inner(non_tonal, tonal, None)
}

/// Like [`encode`], recording counts and self-check mismatches in `stats`.
pub fn encode_with_stats(non_tonal: &str, tonal: &str, stats: &mut CodecStats) -> Encoded {
    encode_inner(non_tonal, tonal, Some(stats))
}

fn encode_inner(non_tonal: &str, tonal: &str, stats: Option<&mut CodecStats>) -> Encoded {
    let stripped = detone(non_tonal);
    let src: Vec<char> = stripped.nfd().collect();
    let dst: Vec<char> = tonal.nfd().collect();
    let chunks = syllabify(&stripped).into_first();
    let bounds = chunk_bounds(&chunks);

    let mut codes = vec![ToneCode::default(); chunks.len()];
    for op in editops(&src, &dst) {
        match op.kind {
            EditKind::Insert => {
                let (idx, local) = locate_insert(&bounds, op.src);
                codes[idx].push(EditOperation::insert(local, dst[op.dst]));
            }
            EditKind::Delete => {
                let (idx, local) = locate(&bounds, op.src);
                codes[idx].push(EditOperation::delete(local, src[op.src]));
            }
            EditKind::Replace => {
                let (idx, local) = locate(&bounds, op.src);
                codes[idx].push(EditOperation::insert(local, dst[op.dst]));
                codes[idx].push(EditOperation::delete(local, src[op.src]));
            }
        }
    }

    let encoded = Encoded { codes, chunks };
    trace!(non_tonal, tonal, chunks = encoded.chunks.len(), "encoded");
    let matches = self_check(&encoded, non_tonal, tonal);
    if let Some(stats) = stats {
        stats.record(&encoded.codes, matches);
    }
    encoded
}

/// Decode `encoded` again and compare with `tonal`; failures are logged.
fn self_check(encoded: &Encoded, non_tonal: &str, tonal: &str) -> bool {
    let expected: String = tonal.nfc().collect();
    match encoded.reconstruct() {
        Ok(rebuilt) if rebuilt == expected => true,
        Ok(rebuilt) => {
            warn!(non_tonal, tonal, rebuilt = %rebuilt, "tone code does not round-trip");
            false
        }
        Err(err) => {
            warn!(non_tonal, tonal, error = %err, "tone code failed to decode");
            false
        }
    }
}

/// `[start, end)` of each chunk in decomposed code points.
fn chunk_bounds(chunks: &[String]) -> Vec<(usize, usize)> {
    let mut start = 0;
    chunks
        .iter()
        .map(|chunk| {
            let end = start + chunk.nfd().count();
            let bound = (start, end);
            start = end;
            bound
        })
        .collect()
}

/// Chunk holding source position `pos`, with the position made chunk-local.
fn locate(bounds: &[(usize, usize)], pos: usize) -> (usize, usize) {
    bounds
        .iter()
        .position(|&(start, end)| start <= pos && pos < end)
        .map(|idx| (idx, pos - bounds[idx].0))
        .unwrap_or_else(|| last_chunk(bounds, pos))
}

/// Like [`locate`], but an insert on a boundary joins the chunk to its left,
/// so a tone mark following a nucleus stays with that syllable.
fn locate_insert(bounds: &[(usize, usize)], pos: usize) -> (usize, usize) {
    if pos == 0 {
        return (0, 0);
    }
    bounds
        .iter()
        .position(|&(start, end)| start < pos && pos <= end)
        .map(|idx| (idx, pos - bounds[idx].0))
        .unwrap_or_else(|| last_chunk(bounds, pos))
}

fn last_chunk(bounds: &[(usize, usize)], pos: usize) -> (usize, usize) {
    let idx = bounds.len().saturating_sub(1);
    let start = bounds.get(idx).map_or(0, |b| b.0);
    (idx, pos.saturating_sub(start))
}
