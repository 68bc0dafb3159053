//! Consecutive duplicate line detection

use serde::{Deserialize, Serialize};

use super::is_space;

/// Default minimum trimmed length for a line to count as a duplicate
pub const DEFAULT_MIN_LENGTH: usize = 8;

/// Number of lines inspected after the current one
pub const LOOKAHEAD_WINDOW: usize = 9;

/// A run of lines whose trimmed content repeats within the lookahead window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateFinding {
    /// 1-based number of the first line of the run
    #[serde(rename = "ligne")]
    pub line: usize,
    /// Trimmed content of the repeated line
    #[serde(rename = "texte")]
    pub text: String,
    #[serde(rename = "répétitions")]
    pub repetitions: usize,
    /// 1-based line numbers covered by the run, ascending and contiguous
    pub positions: Vec<usize>,
}

/// Split text on every universal line boundary.
///
/// `\r\n` counts as a single break and a trailing terminator does not
/// produce an empty final line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        let is_break = matches!(
            ch,
            '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
        );
        if !is_break {
            continue;
        }

        lines.push(&text[start..idx]);
        let mut next = idx + ch.len_utf8();
        if ch == '\r' {
            if let Some(&(lf_idx, '\n')) = chars.peek() {
                chars.next();
                next = lf_idx + 1;
            }
        }
        start = next;
    }

    if start < text.len() {
        lines.push(&text[start..]);
    }

    lines
}

/// Find runs of repeated lines
///
/// # Arguments
/// * `text` - Document to scan
/// * `min_length` - Minimum trimmed length, in characters, of a reported line
///
/// # Returns
/// One DuplicateFinding per run, in document order
pub fn find_consecutive_duplicates(text: &str, min_length: usize) -> Vec<DuplicateFinding> {
    let lines = split_lines(text);
    let mut duplicates = Vec::new();

    let mut i = 0;
    while i + 1 < lines.len() {
        let current = lines[i].trim_matches(is_space);
        if current.is_empty() {
            i += 1;
            continue;
        }

        let window_end = (i + LOOKAHEAD_WINDOW + 1).min(lines.len());
        let matched = (i + 1..window_end)
            .find(|&j| lines[j].trim_matches(is_space) == current && current.chars().count() >= min_length);

        match matched {
            Some(j) => {
                duplicates.push(DuplicateFinding {
                    line: i + 1,
                    text: current.to_string(),
                    repetitions: j - i + 1,
                    positions: (i + 1..=j + 1).collect(),
                });
                // Resume on the closing line so overlapping runs are not reported twice
                i = j;
            }
            None => i += 1,
        }
    }

    duplicates
}
