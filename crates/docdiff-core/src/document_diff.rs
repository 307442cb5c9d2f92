//! Line-level document diff with nested word-level diffs for modified lines.
//!
//! [`diff_lines`] aligns the two documents by longest common subsequence,
//! collapses sufficiently similar unaligned line pairs into single
//! [`Modify`] entries, and attaches a token-level diff to each of those.
//!
//! [`Modify`]: LineChange::Modify

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::align::{align, AlignStep, DpTable};
use crate::config::DiffConfig;
use crate::error::DiffResult;
use crate::similarity::similarity;
use crate::tokenize::{split_lines, tokenize_line};

/// The kind of change a diff entry represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffOp {
    Equal,
    Add,
    Delete,
    Modify,
}

/// One entry of a word-level diff. Position is implicit in sequence order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", content = "content", rename_all = "snake_case")]
pub enum WordChange {
    /// Token present in both lines.
    Equal(String),
    /// Token present only in the new line.
    Add(String),
    /// Token present only in the original line.
    Delete(String),
}

impl WordChange {
    /// The kind of change.
    pub fn op(&self) -> DiffOp {
        match self {
            WordChange::Equal(_) => DiffOp::Equal,
            WordChange::Add(_) => DiffOp::Add,
            WordChange::Delete(_) => DiffOp::Delete,
        }
    }

    /// The token text.
    pub fn content(&self) -> &str {
        match self {
            WordChange::Equal(text) | WordChange::Add(text) | WordChange::Delete(text) => text,
        }
    }
}

/// One entry of a line-level diff.
///
/// Each variant carries exactly the fields defined for its op: indices are
/// 0-based positions in the respective document, and [`Modify`] nests the
/// word-level diff of its line pair. The accessor methods expose the
/// optional-field view of the same contract.
///
/// [`Modify`]: LineChange::Modify
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum LineChange {
    /// The same line appears on both sides.
    Equal {
        original_index: usize,
        new_index: usize,
        content: String,
    },
    /// A line present only in the new document.
    Add { new_index: usize, content: String },
    /// A line present only in the original document.
    Delete {
        original_index: usize,
        content: String,
    },
    /// A changed line: an unaligned pair similar enough to present as one
    /// edit rather than separate delete + add.
    Modify {
        original_index: usize,
        new_index: usize,
        original_content: String,
        new_content: String,
        word_changes: Vec<WordChange>,
    },
}

impl LineChange {
    /// The kind of change.
    pub fn op(&self) -> DiffOp {
        match self {
            LineChange::Equal { .. } => DiffOp::Equal,
            LineChange::Add { .. } => DiffOp::Add,
            LineChange::Delete { .. } => DiffOp::Delete,
            LineChange::Modify { .. } => DiffOp::Modify,
        }
    }

    /// Index of this entry's line in the original document, if it has one.
    pub fn original_index(&self) -> Option<usize> {
        match self {
            LineChange::Equal { original_index, .. }
            | LineChange::Delete { original_index, .. }
            | LineChange::Modify { original_index, .. } => Some(*original_index),
            LineChange::Add { .. } => None,
        }
    }

    /// Index of this entry's line in the new document, if it has one.
    pub fn new_index(&self) -> Option<usize> {
        match self {
            LineChange::Equal { new_index, .. }
            | LineChange::Add { new_index, .. }
            | LineChange::Modify { new_index, .. } => Some(*new_index),
            LineChange::Delete { .. } => None,
        }
    }

    /// This entry's line content on the original side, if present.
    pub fn original_content(&self) -> Option<&str> {
        match self {
            LineChange::Equal { content, .. } | LineChange::Delete { content, .. } => {
                Some(content)
            }
            LineChange::Modify {
                original_content, ..
            } => Some(original_content),
            LineChange::Add { .. } => None,
        }
    }

    /// This entry's line content on the new side, if present.
    pub fn new_content(&self) -> Option<&str> {
        match self {
            LineChange::Equal { content, .. } | LineChange::Add { content, .. } => Some(content),
            LineChange::Modify { new_content, .. } => Some(new_content),
            LineChange::Delete { .. } => None,
        }
    }

    /// The nested word-level diff; present exactly when the op is Modify.
    pub fn word_changes(&self) -> Option<&[WordChange]> {
        match self {
            LineChange::Modify { word_changes, .. } => Some(word_changes),
            _ => None,
        }
    }
}

/// Summary counts over a document diff. Equal entries are not counted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStats {
    pub added: usize,
    pub deleted: usize,
    pub modified: usize,
}

/// The result of diffing two documents.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentDiff {
    /// The ordered change entries. Filtered to entries carrying an original
    /// index they reconstruct the original document in order; filtered to
    /// entries carrying a new index they reconstruct the new document.
    pub changes: Vec<LineChange>,
}

impl DocumentDiff {
    /// Returns `true` if the two documents were identical.
    pub fn is_unchanged(&self) -> bool {
        self.changes.iter().all(|c| c.op() == DiffOp::Equal)
    }

    /// Number of added lines.
    pub fn additions(&self) -> usize {
        self.changes.iter().filter(|c| c.op() == DiffOp::Add).count()
    }

    /// Number of deleted lines.
    pub fn deletions(&self) -> usize {
        self.changes
            .iter()
            .filter(|c| c.op() == DiffOp::Delete)
            .count()
    }

    /// Number of modified lines.
    pub fn modifications(&self) -> usize {
        self.changes
            .iter()
            .filter(|c| c.op() == DiffOp::Modify)
            .count()
    }

    /// Summary counts for display.
    pub fn stats(&self) -> DiffStats {
        DiffStats {
            added: self.additions(),
            deleted: self.deletions(),
            modified: self.modifications(),
        }
    }

    /// The entry covering line `index` of the original document. Unique by
    /// the reconstruction invariant on [`changes`](Self::changes).
    pub fn change_for_original(&self, index: usize) -> Option<&LineChange> {
        self.changes
            .iter()
            .find(|c| c.original_index() == Some(index))
    }

    /// The entry covering line `index` of the new document.
    pub fn change_for_new(&self, index: usize) -> Option<&LineChange> {
        self.changes.iter().find(|c| c.new_index() == Some(index))
    }
}

/// Compute a line-level diff between two documents, with word-level diffs
/// nested inside modified lines.
///
/// Deterministic and side-effect-free: identical inputs always produce an
/// identical result, and each call owns its DP buffers. Empty strings are
/// valid documents of exactly one empty line.
///
/// # Errors
///
/// [`TableTooLarge`] if a DP table would exceed the budgets in `config`;
/// the table is not allocated in that case.
///
/// [`TableTooLarge`]: crate::DiffError::TableTooLarge
pub fn diff_lines(original: &str, new: &str, config: &DiffConfig) -> DiffResult<DocumentDiff> {
    let left = split_lines(original);
    let right = split_lines(new);
    debug!(
        original_lines = left.len(),
        new_lines = right.len(),
        "diffing documents"
    );

    let mut line_table = DpTable::new();
    let steps = align(
        &left,
        &right,
        &mut line_table,
        config.max_line_cells,
        "line",
        |a, b| a == b,
        |a: &&str, b: &&str| {
            if !config.collapse_modified {
                return Ok(false);
            }
            Ok(similarity(a, b, config.max_intraline_cells)? > config.modify_threshold)
        },
    )?;

    // One scratch table reused across every modified pair's word alignment.
    let mut word_table = DpTable::new();
    let mut changes = Vec::with_capacity(steps.len());
    let (mut i, mut j) = (0usize, 0usize);
    for step in steps {
        match step {
            AlignStep::Equal => {
                changes.push(LineChange::Equal {
                    original_index: i,
                    new_index: j,
                    content: left[i].to_string(),
                });
                i += 1;
                j += 1;
            }
            AlignStep::Delete => {
                changes.push(LineChange::Delete {
                    original_index: i,
                    content: left[i].to_string(),
                });
                i += 1;
            }
            AlignStep::Add => {
                changes.push(LineChange::Add {
                    new_index: j,
                    content: right[j].to_string(),
                });
                j += 1;
            }
            AlignStep::Substitute => {
                let word_changes = diff_words(left[i], right[j], &mut word_table, config)?;
                changes.push(LineChange::Modify {
                    original_index: i,
                    new_index: j,
                    original_content: left[i].to_string(),
                    new_content: right[j].to_string(),
                    word_changes,
                });
                i += 1;
                j += 1;
            }
        }
    }

    let diff = DocumentDiff { changes };
    debug!(
        added = diff.additions(),
        deleted = diff.deletions(),
        modified = diff.modifications(),
        "document diff complete"
    );
    Ok(diff)
}

/// Token-level diff of one modified line pair.
fn diff_words(
    original: &str,
    new: &str,
    table: &mut DpTable,
    config: &DiffConfig,
) -> DiffResult<Vec<WordChange>> {
    let left = tokenize_line(original);
    let right = tokenize_line(new);
    let steps = align(
        &left,
        &right,
        table,
        config.max_intraline_cells,
        "token",
        |a, b| a.text == b.text,
        |_, _| Ok(false),
    )?;

    let mut changes = Vec::with_capacity(steps.len());
    let (mut i, mut j) = (0usize, 0usize);
    for step in steps {
        match step {
            AlignStep::Equal => {
                changes.push(WordChange::Equal(left[i].text.to_string()));
                i += 1;
                j += 1;
            }
            AlignStep::Delete => {
                changes.push(WordChange::Delete(left[i].text.to_string()));
                i += 1;
            }
            AlignStep::Add => {
                changes.push(WordChange::Add(right[j].text.to_string()));
                j += 1;
            }
            // The word-level pair hook always declines.
            AlignStep::Substitute => unreachable!(),
        }
    }
    Ok(changes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DiffError;

    fn diff(original: &str, new: &str) -> DocumentDiff {
        diff_lines(original, new, &DiffConfig::default()).unwrap()
    }

    fn ops(diff: &DocumentDiff) -> Vec<DiffOp> {
        diff.changes.iter().map(|c| c.op()).collect()
    }

    #[test]
    fn pure_insertion() {
        let diff = diff("A\nB", "A\nX\nB");
        assert_eq!(ops(&diff), vec![DiffOp::Equal, DiffOp::Add, DiffOp::Equal]);
        assert_eq!(
            diff.changes[1],
            LineChange::Add {
                new_index: 1,
                content: "X".to_string(),
            }
        );
        assert_eq!(diff.stats(), DiffStats { added: 1, deleted: 0, modified: 0 });
    }

    #[test]
    fn pure_deletion() {
        let diff = diff("A\nB\nC", "A\nC");
        assert_eq!(ops(&diff), vec![DiffOp::Equal, DiffOp::Delete, DiffOp::Equal]);
        assert_eq!(
            diff.changes[1],
            LineChange::Delete {
                original_index: 1,
                content: "B".to_string(),
            }
        );
        assert_eq!(diff.stats(), DiffStats { added: 0, deleted: 1, modified: 0 });
    }

    #[test]
    fn similar_cjk_lines_collapse_into_modify() {
        let diff = diff("这是第二行内容", "这是修改后的第二行内容");
        assert_eq!(ops(&diff), vec![DiffOp::Modify]);

        let words = diff.changes[0].word_changes().unwrap();
        let added: String = words
            .iter()
            .filter(|w| w.op() == DiffOp::Add)
            .map(WordChange::content)
            .collect();
        assert_eq!(added, "修改后的");
        assert!(words.iter().all(|w| w.op() != DiffOp::Delete));

        let unchanged: String = words
            .iter()
            .filter(|w| w.op() == DiffOp::Equal)
            .map(WordChange::content)
            .collect();
        assert_eq!(unchanged, "这是第二行内容");
    }

    #[test]
    fn dissimilar_lines_never_merge() {
        let diff = diff("abc", "xyz12345");
        assert_eq!(ops(&diff), vec![DiffOp::Delete, DiffOp::Add]);
    }

    #[test]
    fn empty_documents_compare_equal() {
        let diff = diff("", "");
        assert_eq!(
            diff.changes,
            vec![LineChange::Equal {
                original_index: 0,
                new_index: 0,
                content: String::new(),
            }]
        );
        assert!(diff.is_unchanged());
        assert_eq!(diff.stats(), DiffStats::default());
    }

    #[test]
    fn self_diff_is_all_equal_in_order() {
        let text = "one\ntwo\n\nthree";
        let diff = diff(text, text);
        assert_eq!(diff.changes.len(), 4);
        for (index, change) in diff.changes.iter().enumerate() {
            assert_eq!(change.op(), DiffOp::Equal);
            assert_eq!(change.original_index(), Some(index));
            assert_eq!(change.new_index(), Some(index));
        }
    }

    #[test]
    fn modify_carries_both_contents_and_word_diff() {
        let diff = diff("hello world", "hello there");
        assert_eq!(ops(&diff), vec![DiffOp::Modify]);

        let change = &diff.changes[0];
        assert_eq!(change.original_content(), Some("hello world"));
        assert_eq!(change.new_content(), Some("hello there"));
        assert_eq!(
            change.word_changes().unwrap(),
            &[
                WordChange::Equal("hello".to_string()),
                WordChange::Equal(" ".to_string()),
                WordChange::Delete("world".to_string()),
                WordChange::Add("there".to_string()),
            ]
        );
    }

    #[test]
    fn word_diffs_appear_only_on_modify() {
        let diff = diff("A\nhello world", "A\nhello there\nB");
        for change in &diff.changes {
            assert_eq!(
                change.word_changes().is_some(),
                change.op() == DiffOp::Modify
            );
        }
    }

    #[test]
    fn threshold_is_a_strict_boundary() {
        // distance 7 over max length 10: similarity exactly 0.3
        let at_threshold = diff("aaaaaaaaaa", "aaabbbbbbb");
        assert_eq!(ops(&at_threshold), vec![DiffOp::Delete, DiffOp::Add]);

        // distance 6 over max length 10: similarity 0.4
        let above_threshold = diff("aaaaaaaaaa", "aaaabbbbbb");
        assert_eq!(ops(&above_threshold), vec![DiffOp::Modify]);
    }

    #[test]
    fn threshold_is_configurable() {
        let strict = DiffConfig {
            modify_threshold: 0.9,
            ..Default::default()
        };
        let diff = diff_lines("hello world", "hello there", &strict).unwrap();
        assert_eq!(ops(&diff), vec![DiffOp::Delete, DiffOp::Add]);
    }

    #[test]
    fn collapse_can_be_disabled() {
        let plain = DiffConfig {
            collapse_modified: false,
            ..Default::default()
        };
        let diff = diff_lines("hello world", "hello there", &plain).unwrap();
        assert_eq!(ops(&diff), vec![DiffOp::Delete, DiffOp::Add]);
    }

    #[test]
    fn indices_reconstruct_both_documents() {
        let original = "alpha\nbeta\ngamma\ndelta";
        let new = "alpha\nbeta prime\ndelta\nepsilon";
        let diff = diff(original, new);

        let left: Vec<&str> = diff
            .changes
            .iter()
            .filter_map(|c| c.original_content())
            .collect();
        assert_eq!(left.join("\n"), original);
        let left_indices: Vec<usize> = diff
            .changes
            .iter()
            .filter_map(|c| c.original_index())
            .collect();
        assert_eq!(left_indices, vec![0, 1, 2, 3]);

        let right: Vec<&str> = diff
            .changes
            .iter()
            .filter_map(|c| c.new_content())
            .collect();
        assert_eq!(right.join("\n"), new);
        let right_indices: Vec<usize> = diff
            .changes
            .iter()
            .filter_map(|c| c.new_index())
            .collect();
        assert_eq!(right_indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn counts_mirror_when_sides_swap() {
        let a = "A\nB\nC";
        let b = "A\nX\nB\nY";
        let forward = diff(a, b).stats();
        let backward = diff(b, a).stats();
        assert_eq!(forward.added, backward.deleted);
        assert_eq!(forward.deleted, backward.added);
        assert_eq!(forward.modified, backward.modified);
    }

    #[test]
    fn index_lookup_finds_the_unique_entry() {
        let diff = diff("A\nB\nC", "A\nX\nC");
        let deleted = diff.change_for_original(1).unwrap();
        assert_eq!(deleted.original_content(), Some("B"));
        let added = diff.change_for_new(1).unwrap();
        assert_eq!(added.new_content(), Some("X"));
        assert!(diff.change_for_original(3).is_none());
        assert!(diff.change_for_new(3).is_none());
    }

    #[test]
    fn line_budget_is_enforced() {
        let config = DiffConfig {
            max_line_cells: 4,
            ..Default::default()
        };
        let result = diff_lines("a\nb\nc", "x\ny\nz", &config);
        assert_eq!(
            result,
            Err(DiffError::TableTooLarge {
                scope: "line",
                rows: 3,
                cols: 3,
                limit: 4,
            })
        );
    }

    #[test]
    fn intraline_budget_is_enforced_during_classification() {
        let config = DiffConfig {
            max_intraline_cells: 16,
            ..Default::default()
        };
        let result = diff_lines("hello world", "hello there", &config);
        assert!(matches!(
            result,
            Err(DiffError::TableTooLarge { scope: "char", .. })
        ));
    }

    #[test]
    fn changes_serialize_with_tagged_ops() {
        let diff = diff("hello world", "hello there");
        let json = serde_json::to_string(&diff).unwrap();
        assert!(json.contains(r#""op":"modify""#));
        assert!(json.contains(r#""op":"delete""#));
        assert!(json.contains(r#""op":"add""#));

        let parsed: DocumentDiff = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, diff);
    }
}
