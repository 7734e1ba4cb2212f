//! Line compaction - slide and merge a single row or column
//!
//! A line is given in travel order: index 0 is the edge tiles slide toward.
//! Compaction is a single left-to-right pass with a write cursor:
//!
//! 1. Empty cells are skipped.
//! 2. A tile equal to the last written tile merges into it, unless that tile
//!    was itself produced by a merge in this pass.
//! 3. Otherwise the tile is written at the cursor and the cursor advances.
//! 4. Everything past the last write is emptied.
//!
//! So `[2, 2, 2, 0]` becomes `[4, 2, 0, 0]` and `[2, 2, 2, 2]` becomes
//! `[4, 4, 0, 0]`: a tile merges at most once per swipe.
//!
//! The hot path writes into caller-owned buffers so a whole-board move can
//! reuse one output line and one step list.

use crate::types::EMPTY;

/// What happened to one source tile, in line-local indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStep {
    /// The tile slid from `from` to `to` without merging.
    Moved { from: usize, to: usize },
    /// The tile at `from` merged into the tile at `to`, which now holds `value`.
    Merged { from: usize, to: usize, value: u32 },
}

/// Result of compacting one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineSummary {
    /// Sum of every tile produced by a merge.
    pub score: u64,
    /// Number of merges performed.
    pub merges: u32,
    /// False if the output values equal the input values.
    pub changed: bool,
}

/// Compact `input` into `out`, appending steps in source order.
///
/// `out` must be the same length as `input`. Tiles whose doubled value would
/// not fit in a `u32` do not merge.
pub fn compact_into(input: &[u32], out: &mut [u32], steps: &mut Vec<LineStep>) -> LineSummary {
    debug_assert_eq!(input.len(), out.len());
    out.fill(EMPTY);

    let mut summary = LineSummary::default();
    let mut write = 0usize;
    // Last written slot and whether a merge produced it.
    let mut last: Option<(usize, bool)> = None;

    for (src, &value) in input.iter().enumerate() {
        if value == EMPTY {
            continue;
        }

        if let Some((dst, false)) = last {
            if out[dst] == value {
                if let Some(doubled) = value.checked_mul(2) {
                    out[dst] = doubled;
                    summary.score += u64::from(doubled);
                    summary.merges += 1;
                    steps.push(LineStep::Merged {
                        from: src,
                        to: dst,
                        value: doubled,
                    });
                    last = Some((dst, true));
                    continue;
                }
            }
        }

        out[write] = value;
        if src != write {
            steps.push(LineStep::Moved {
                from: src,
                to: write,
            });
        }
        last = Some((write, false));
        write += 1;
    }

    summary.changed = input != &*out;
    summary
}

/// Allocating convenience wrapper around [`compact_into`].
pub fn compact(input: &[u32]) -> (Vec<u32>, Vec<LineStep>, LineSummary) {
    let mut out = vec![EMPTY; input.len()];
    let mut steps = Vec::new();
    let summary = compact_into(input, &mut out, &mut steps);
    (out, steps, summary)
}

/// True if compacting `line` would change it. Does not allocate.
pub fn can_compact(line: &[u32]) -> bool {
    let mut seen_empty = false;
    let mut prev = EMPTY;
    for &value in line {
        if value == EMPTY {
            seen_empty = true;
            continue;
        }
        if seen_empty || (value == prev && value.checked_mul(2).is_some()) {
            return true;
        }
        prev = value;
    }
    false
}
