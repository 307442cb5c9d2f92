//! Generic sequence alignment: LCS table fill plus iterative backtrack.
//!
//! One routine serves both granularities. Line-level alignment passes a
//! pair-collapse hook that may turn a delete + add at the same position into
//! a single substitution; word-level alignment passes a hook that always
//! declines, which reduces the walk to the plain three-outcome LCS diff.
//!
//! The backtrack is an explicit cursor loop, not recursion: recursion depth
//! would scale with the combined document length.

use crate::error::{DiffError, DiffResult};

/// One step of an alignment, in left-to-right order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum AlignStep {
    /// The elements at both cursors are equal.
    Equal,
    /// The left element has no counterpart.
    Delete,
    /// The right element has no counterpart.
    Add,
    /// The pair-collapse hook claimed this unequal pair.
    Substitute,
}

/// Flat 2D table of LCS prefix lengths.
///
/// Reusable across alignment calls: `prepare` resizes the single backing
/// buffer in place, so successive word-level alignments within one diff do
/// not reallocate.
pub(crate) struct DpTable {
    cells: Vec<u32>,
    cols: usize,
}

impl DpTable {
    pub(crate) fn new() -> Self {
        Self {
            cells: Vec::new(),
            cols: 0,
        }
    }

    /// Size the table for a `rows x cols` element alignment, enforcing the
    /// cell budget before anything is allocated.
    fn prepare(
        &mut self,
        rows: usize,
        cols: usize,
        limit: usize,
        scope: &'static str,
    ) -> DiffResult<()> {
        if rows.checked_mul(cols).map_or(true, |n| n > limit) {
            return Err(DiffError::TableTooLarge {
                scope,
                rows,
                cols,
                limit,
            });
        }
        let total = (rows + 1).checked_mul(cols + 1).ok_or(DiffError::TableTooLarge {
            scope,
            rows,
            cols,
            limit,
        })?;
        self.cols = cols + 1;
        self.cells.clear();
        self.cells.resize(total, 0);
        Ok(())
    }

    #[inline]
    fn get(&self, i: usize, j: usize) -> u32 {
        self.cells[i * self.cols + j]
    }

    #[inline]
    fn set(&mut self, i: usize, j: usize, value: u32) {
        self.cells[i * self.cols + j] = value;
    }
}

/// Align two element sequences by longest common subsequence.
///
/// `eq` decides element equality. `pair` is consulted on the mismatch branch
/// of the backtrack, only at positions where collapsing the two elements
/// keeps the alignment LCS-consistent (`dp[i-1][j-1] + 1` at least as good
/// as both alternatives); a `true` verdict emits [`AlignStep::Substitute`]
/// and consumes one element from each side. Otherwise the walk falls through
/// to the plain delete/add rule, preferring delete when keeping the left
/// element's row scores strictly higher.
pub(crate) fn align<T, E, P>(
    left: &[T],
    right: &[T],
    table: &mut DpTable,
    limit: usize,
    scope: &'static str,
    eq: E,
    mut pair: P,
) -> DiffResult<Vec<AlignStep>>
where
    E: Fn(&T, &T) -> bool,
    P: FnMut(&T, &T) -> DiffResult<bool>,
{
    let rows = left.len();
    let cols = right.len();
    table.prepare(rows, cols, limit, scope)?;

    for i in 1..=rows {
        for j in 1..=cols {
            let value = if eq(&left[i - 1], &right[j - 1]) {
                table.get(i - 1, j - 1) + 1
            } else {
                table.get(i - 1, j).max(table.get(i, j - 1))
            };
            table.set(i, j, value);
        }
    }

    // Walk back from the far corner, collecting steps newest-first.
    let mut steps = Vec::with_capacity(rows.max(cols));
    let (mut i, mut j) = (rows, cols);
    while i > 0 || j > 0 {
        if i == 0 {
            steps.push(AlignStep::Add);
            j -= 1;
        } else if j == 0 {
            steps.push(AlignStep::Delete);
            i -= 1;
        } else if eq(&left[i - 1], &right[j - 1]) {
            steps.push(AlignStep::Equal);
            i -= 1;
            j -= 1;
        } else {
            let keep_left = table.get(i - 1, j);
            let keep_right = table.get(i, j - 1);
            let diagonal_ok = table.get(i - 1, j - 1) + 1 >= keep_left.max(keep_right);
            if diagonal_ok && pair(&left[i - 1], &right[j - 1])? {
                steps.push(AlignStep::Substitute);
                i -= 1;
                j -= 1;
            } else if keep_left > keep_right {
                steps.push(AlignStep::Delete);
                i -= 1;
            } else {
                steps.push(AlignStep::Add);
                j -= 1;
            }
        }
    }
    steps.reverse();
    Ok(steps)
}
