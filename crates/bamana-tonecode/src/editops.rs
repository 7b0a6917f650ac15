//! Minimum edit-distance alignment between two code-point sequences.

/// Primitive alignment step.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum EditKind {
    /// Insert `dst[dst]` before `src[src]`.
    Insert,
    /// Drop `src[src]`.
    Delete,
    /// Turn `src[src]` into `dst[dst]`.
    Replace,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct EditOp {
    pub kind: EditKind,
    pub src: usize,
    pub dst: usize,
}

impl EditOp {
    fn new(kind: EditKind, src: usize, dst: usize) -> Self {
        Self { kind, src, dst }
    }
}

/// Levenshtein alignment of `src` onto `dst`, ordered by source position.
///
/// Inserts at a position precede the delete/replace of the character at that
/// position. Among equal-cost paths the backtrace prefers keep, then replace,
/// then insert, then delete.
pub fn editops(src: &[char], dst: &[char]) -> Vec<EditOp> {
    let (n, m) = (src.len(), dst.len());
    let width = m + 1;
    let mut dist = vec![0u32; (n + 1) * width];
    for (j, cell) in dist.iter_mut().take(width).enumerate() {
        *cell = j as u32;
    }
    for i in 1..=n {
        dist[i * width] = i as u32;
        for j in 1..=m {
            let cost = u32::from(src[i - 1] != dst[j - 1]);
            let diag = dist[(i - 1) * width + j - 1] + cost;
            let up = dist[(i - 1) * width + j] + 1;
            let left = dist[i * width + j - 1] + 1;
            dist[i * width + j] = diag.min(up).min(left);
        }
    }

    let at = |i: usize, j: usize| dist[i * width + j];
    let mut ops = Vec::with_capacity(at(n, m) as usize);
    let (mut i, mut j) = (n, m);
    while i > 0 || j > 0 {
        let here = at(i, j);
        if i > 0 && j > 0 {
            if src[i - 1] == dst[j - 1] && here == at(i - 1, j - 1) {
                i -= 1;
                j -= 1;
                continue;
            }
            if here == at(i - 1, j - 1) + 1 {
                ops.push(EditOp::new(EditKind::Replace, i - 1, j - 1));
                i -= 1;
                j -= 1;
                continue;
            }
        }
        if j > 0 && here == at(i, j - 1) + 1 {
            ops.push(EditOp::new(EditKind::Insert, i, j - 1));
            j -= 1;
        } else {
            ops.push(EditOp::new(EditKind::Delete, i - 1, j));
            i -= 1;
        }
    }
    ops.reverse();
    ops
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn identical_inputs_need_no_ops() {
        assert!(editops(&chars("bamako"), &chars("bamako")).is_empty());
        assert!(editops(&[], &[]).is_empty());
    }

    #[test]
    fn single_replace() {
        assert_eq!(
            editops(&chars("to"), &chars("tɔ")),
            vec![EditOp::new(EditKind::Replace, 1, 1)]
        );
    }

    #[test]
    fn insert_and_replace_in_source_order() {
        // "nàrɛ" decomposed: n a U+0300 r ɛ
        let dst = vec!['n', 'a', '\u{0300}', 'r', 'ɛ'];
        assert_eq!(
            editops(&chars("nare"), &dst),
            vec![
                EditOp::new(EditKind::Insert, 2, 2),
                EditOp::new(EditKind::Replace, 3, 4),
            ]
        );
    }

    #[test]
    fn pure_inserts_and_deletes() {
        assert_eq!(
            editops(&[], &chars("ab")),
            vec![
                EditOp::new(EditKind::Insert, 0, 0),
                EditOp::new(EditKind::Insert, 0, 1),
            ]
        );
        assert_eq!(
            editops(&chars("ab"), &[]),
            vec![
                EditOp::new(EditKind::Delete, 0, 0),
                EditOp::new(EditKind::Delete, 1, 0),
            ]
        );
    }

    #[test]
    fn op_count_is_the_distance() {
        let ops = editops(&chars("kitten"), &chars("sitting"));
        assert_eq!(ops.len(), 3);
    }
}
