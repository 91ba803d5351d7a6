//! Discrete metrics over mode-label sequences, `lcss` and `edit_distance`.
//!
//! These ignore the point data entirely and read the trace's comma-joined
//! mode sequence through [`ModeSequence`].

use std::collections::HashMap;
use std::hash::Hash;

use crate::metrics::TraceDistance;
use crate::trace::{
    ModeSequence,
    Trace,
};

pub const MODE_DELIMITER: char = ',';

/// Returned by [`lcss_distance`] when the sequences share nothing.
pub const NO_COMMON_SUBSEQUENCE: f64 = 2.;

/// Splits a raw mode sequence into labels. An empty sequence has no labels.
pub fn tokenize_modes(sequence: &str) -> Vec<&str> {
    if sequence.is_empty() {
        return Vec::new();
    }
    sequence.split(MODE_DELIMITER).collect()
}

fn trace_modes<T: ModeSequence>(trace: &T) -> Vec<&str> {
    trace
        .mode_sequence()
        .map(tokenize_modes)
        .unwrap_or_default()
}

/// A run of `size` equal elements starting at `a[a_start]` and `b[b_start]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MatchingBlock {
    pub a_start: usize,
    pub b_start: usize,
    pub size: usize,
}

/// Index of where every element of a sequence shows up.
struct PositionIndex<'a, T> {
    positions: HashMap<&'a T, Vec<usize>>,
}

impl<'a, T: Eq + Hash> PositionIndex<'a, T> {
    fn new(seq: &'a [T]) -> Self {
        let mut positions: HashMap<&'a T, Vec<usize>> = HashMap::new();
        for (i, elem) in seq.iter().enumerate() {
            positions.entry(elem).or_default().push(i);
        }
        PositionIndex { positions }
    }

    /// Longest block of `a[alo..ahi]` that also appears in `b[blo..bhi]`.
    /// Ties go to the block starting earliest in `a`, then earliest in `b`.
    fn longest_match(
        &self,
        a: &[T],
        (alo, ahi): (usize, usize),
        (blo, bhi): (usize, usize),
    ) -> MatchingBlock {
        let mut best = MatchingBlock {
            a_start: alo,
            b_start: blo,
            size: 0,
        };
        // Length of the match ending at a[i - 1], b[j], keyed by j.
        let mut run_lengths: HashMap<usize, usize> = HashMap::new();

        for (i, elem) in a.iter().enumerate().take(ahi).skip(alo) {
            let mut next_run_lengths = HashMap::new();
            let Some(positions) = self.positions.get(elem) else {
                run_lengths = next_run_lengths;
                continue;
            };
            for &j in positions {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let prev = if j == 0 {
                    0
                } else {
                    run_lengths.get(&(j - 1)).copied().unwrap_or(0)
                };
                let k = prev + 1;
                next_run_lengths.insert(j, k);
                if k > best.size {
                    best = MatchingBlock {
                        a_start: i + 1 - k,
                        b_start: j + 1 - k,
                        size: k,
                    };
                }
            }
            run_lengths = next_run_lengths;
        }

        best
    }
}

/// All maximal matching blocks between `a` and `b`, in order.
///
/// Finds the longest block, then recurses on the pieces to its left and to
/// its right. Nothing is treated as junk.
pub fn matching_blocks<T: Eq + Hash>(
    a: &[T],
    b: &[T],
) -> Vec<MatchingBlock> {
    let index = PositionIndex::new(b);
    let mut pending = vec![((0, a.len()), (0, b.len()))];
    let mut blocks = Vec::new();

    while let Some(((alo, ahi), (blo, bhi))) = pending.pop() {
        let block = index.longest_match(a, (alo, ahi), (blo, bhi));
        if block.size == 0 {
            continue;
        }
        if alo < block.a_start && blo < block.b_start {
            pending.push(((alo, block.a_start), (blo, block.b_start)));
        }
        let a_end = block.a_start + block.size;
        let b_end = block.b_start + block.size;
        if a_end < ahi && b_end < bhi {
            pending.push(((a_end, ahi), (b_end, bhi)));
        }
        blocks.push(block);
    }

    blocks.sort();
    blocks
}

/// Concatenation of all matching blocks, taken from `a`.
pub fn longest_common_subsequence<'a, T: Eq + Hash>(
    a: &'a [T],
    b: &[T],
) -> Vec<&'a T> {
    matching_blocks(a, b)
        .into_iter()
        .flat_map(|block| a[block.a_start..block.a_start + block.size].iter())
        .collect()
}

/// `1 / len(lcss)`, or [`NO_COMMON_SUBSEQUENCE`] when nothing matches.
///
/// Not a true distance: a non-empty sequence is `1 / len` away from itself.
pub fn lcss_distance<T: Eq + Hash>(
    a: &[T],
    b: &[T],
) -> f64 {
    let length = longest_common_subsequence(a, b).len();
    if length == 0 {
        NO_COMMON_SUBSEQUENCE
    } else {
        1. / length as f64
    }
}

/// Unit-cost Levenshtein distance between two sequences.
pub fn levenshtein<T: PartialEq>(
    a: &[T],
    b: &[T],
) -> usize {
    let mut prev_row = (0..=b.len()).collect::<Vec<_>>();
    let mut curr_row = vec![0; b.len() + 1];

    for (i, ea) in a.iter().enumerate() {
        curr_row[0] = i + 1;
        for (j, eb) in b.iter().enumerate() {
            let substitution = prev_row[j] + usize::from(ea != eb);
            let deletion = prev_row[j + 1] + 1;
            let insertion = curr_row[j] + 1;
            curr_row[j + 1] = substitution.min(deletion).min(insertion);
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b.len()]
}

/// Distinct labels in order of first appearance.
pub fn distinct_labels<'a>(labels: &[&'a str]) -> Vec<&'a str> {
    let mut out: Vec<&str> = Vec::with_capacity(labels.len());
    for &label in labels {
        if !out.contains(&label) {
            out.push(label);
        }
    }
    out
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Lcss;

impl TraceDistance for Lcss {
    fn distance(
        &self,
        a: &Trace,
        b: &Trace,
    ) -> f64 {
        lcss_distance(&trace_modes(a), &trace_modes(b))
    }

    fn requires_modes(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "lcss"
    }
}

/// Edit distance between the sets of labels visited by each trace.
#[derive(Debug, Clone, Copy, Default)]
pub struct EditDistance;

impl TraceDistance for EditDistance {
    fn distance(
        &self,
        a: &Trace,
        b: &Trace,
    ) -> f64 {
        let labels_a = distinct_labels(&trace_modes(a));
        let labels_b = distinct_labels(&trace_modes(b));
        levenshtein(&labels_a, &labels_b) as f64
    }

    fn requires_modes(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "edit_distance"
    }
}
