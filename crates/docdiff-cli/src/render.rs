//! Terminal rendering of document diffs.
//!
//! Two layouts, matching the compare views of the product UI: a merged
//! inline column, and the two documents side by side. Modified lines render
//! their word-level diff in place: removed tokens red with strikethrough,
//! inserted tokens green.

use colored::Colorize;
use docdiff_core::{DocumentDiff, LineChange, WordChange};

/// One merged column: unchanged rows plain, removed rows red, added rows
/// green, modified rows with word-level coloring.
pub fn inline(diff: &DocumentDiff) {
    for change in &diff.changes {
        match change {
            LineChange::Equal { content, .. } => println!("  {content}"),
            LineChange::Delete { content, .. } => {
                println!("{} {}", "-".red().bold(), content.red());
            }
            LineChange::Add { content, .. } => {
                println!("{} {}", "+".green().bold(), content.green());
            }
            LineChange::Modify { word_changes, .. } => {
                println!("{} {}", "~".yellow().bold(), merged_words(word_changes));
            }
        }
    }
}

/// Two numbered columns, original on the left, new on the right.
pub fn split(diff: &DocumentDiff) {
    let width = diff
        .changes
        .iter()
        .map(|change| left_cell(change).1)
        .max()
        .unwrap_or(0);

    for change in &diff.changes {
        let (left, left_width) = left_cell(change);
        let (right, _) = right_cell(change);
        let pad = " ".repeat(width - left_width);
        println!(
            "{} {left}{pad} {} {} {right}",
            line_number(change.original_index()),
            "│".dimmed(),
            line_number(change.new_index()),
        );
    }
}

fn line_number(index: Option<usize>) -> String {
    match index {
        Some(index) => format!("{:>4}", index + 1).dimmed().to_string(),
        None => " ".repeat(4),
    }
}

/// Rendered text and visible width of an entry's original-side cell.
fn left_cell(change: &LineChange) -> (String, usize) {
    match change {
        LineChange::Equal { content, .. } => (content.clone(), content.chars().count()),
        LineChange::Delete { content, .. } => {
            (content.red().to_string(), content.chars().count())
        }
        LineChange::Add { .. } => (String::new(), 0),
        LineChange::Modify {
            original_content,
            word_changes,
            ..
        } => (
            original_words(word_changes),
            original_content.chars().count(),
        ),
    }
}

/// Rendered text and visible width of an entry's new-side cell.
fn right_cell(change: &LineChange) -> (String, usize) {
    match change {
        LineChange::Equal { content, .. } => (content.clone(), content.chars().count()),
        LineChange::Add { content, .. } => {
            (content.green().to_string(), content.chars().count())
        }
        LineChange::Delete { .. } => (String::new(), 0),
        LineChange::Modify {
            new_content,
            word_changes,
            ..
        } => (new_words(word_changes), new_content.chars().count()),
    }
}

fn merged_words(words: &[WordChange]) -> String {
    words
        .iter()
        .map(|word| match word {
            WordChange::Equal(text) => text.clone(),
            WordChange::Delete(text) => text.red().strikethrough().to_string(),
            WordChange::Add(text) => text.green().to_string(),
        })
        .collect()
}

fn original_words(words: &[WordChange]) -> String {
    words
        .iter()
        .filter_map(|word| match word {
            WordChange::Equal(text) => Some(text.clone()),
            WordChange::Delete(text) => Some(text.red().strikethrough().to_string()),
            WordChange::Add(_) => None,
        })
        .collect()
}

fn new_words(words: &[WordChange]) -> String {
    words
        .iter()
        .filter_map(|word| match word {
            WordChange::Equal(text) => Some(text.clone()),
            WordChange::Add(text) => Some(text.green().to_string()),
            WordChange::Delete(_) => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use docdiff_core::{diff_lines, DiffConfig};

    fn plain_colors() {
        colored::control::set_override(false);
    }

    #[test]
    fn cells_split_a_modified_line_by_side() {
        plain_colors();
        let diff = diff_lines("hello world", "hello there", &DiffConfig::default()).unwrap();
        let change = &diff.changes[0];
        assert_eq!(left_cell(change), ("hello world".to_string(), 11));
        assert_eq!(right_cell(change), ("hello there".to_string(), 11));
    }

    #[test]
    fn added_rows_leave_the_original_column_blank() {
        plain_colors();
        let diff = diff_lines("A", "A\nB", &DiffConfig::default()).unwrap();
        let added = &diff.changes[1];
        assert_eq!(left_cell(added), (String::new(), 0));
        assert_eq!(right_cell(added), ("B".to_string(), 1));
    }

    #[test]
    fn cell_width_counts_chars_not_bytes() {
        plain_colors();
        let diff = diff_lines("这是内容", "", &DiffConfig::default()).unwrap();
        let deleted = diff
            .changes
            .iter()
            .find(|c| c.original_content() == Some("这是内容"))
            .unwrap();
        assert_eq!(left_cell(deleted).1, 4);
    }
}
