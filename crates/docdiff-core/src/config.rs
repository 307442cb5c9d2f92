use serde::{Deserialize, Serialize};

/// Tuning knobs for the diff engine.
///
/// The modify-detection values are policy, not derived constants: the
/// threshold and the collapse switch exist so the presentation of changed
/// lines can be tuned without touching the algorithm.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DiffConfig {
    /// Minimum similarity (exclusive) for an unaligned line pair to collapse
    /// into a single modification instead of separate delete + add.
    pub modify_threshold: f64,
    /// Whether modify detection runs at all. When `false`, every changed
    /// line pair is reported as delete + add.
    pub collapse_modified: bool,
    /// Cell budget for the line-level DP table (left lines x right lines).
    pub max_line_cells: usize,
    /// Cell budget for each within-line DP table: token alignment of a
    /// modified pair, and the char-level edit distance behind the
    /// similarity score.
    pub max_intraline_cells: usize,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            modify_threshold: 0.3,
            collapse_modified: true,
            max_line_cells: 16_000_000,
            max_intraline_cells: 1_000_000,
        }
    }
}
