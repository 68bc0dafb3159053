//! Matcher for a unit of non-whitespace characters repeated back-to-back
//!
//! Equivalent to the back-referencing expression `([^\s]{3,})\1{2,}`, which
//! the `regex` crate cannot compile. Matching follows backtracking order: at
//! each start the longest unit wins, the repeat is greedy, and the scan moves
//! one character forward when nothing matches.

use std::ops::Range;

use super::is_space;

/// Shortest unit that may be reported
pub const MIN_UNIT_LEN: usize = 3;

/// Minimum number of occurrences of the unit, the first one included
pub const MIN_OCCURRENCES: usize = 3;

/// Source text of the equivalent back-referencing expression
pub const SOURCE: &str = r"([^\s]{3,})\1{2,}";

/// Find every non-overlapping repeated sequence
///
/// # Returns
/// Byte ranges into `text`, left to right
pub fn find_repeated_sequences(text: &str) -> Vec<Range<usize>> {
    let chars: Vec<char> = text.chars().collect();
    let mut offsets: Vec<usize> = text.char_indices().map(|(idx, _)| idx).collect();
    offsets.push(text.len());

    let run_ends = run_ends(&chars);
    let mut matches = Vec::new();

    let mut start = 0;
    while start < chars.len() {
        if is_space(chars[start]) {
            start += 1;
            continue;
        }

        match longest_repeat(&chars, start, run_ends[start]) {
            Some(end) => {
                matches.push(offsets[start]..offsets[end]);
                start = end;
            }
            None => start += 1,
        }
    }

    matches
}

/// For each position, the exclusive end of the non-whitespace run holding it
fn run_ends(chars: &[char]) -> Vec<usize> {
    let mut ends = vec![0; chars.len()];
    let mut end = chars.len();
    for idx in (0..chars.len()).rev() {
        if is_space(chars[idx]) {
            end = idx;
        }
        ends[idx] = end;
    }
    ends
}

/// End of the match starting at `start`, trying the longest unit first
fn longest_repeat(chars: &[char], start: usize, run_end: usize) -> Option<usize> {
    let available = run_end - start;

    for unit_len in (MIN_UNIT_LEN..=available / MIN_OCCURRENCES).rev() {
        let unit = &chars[start..start + unit_len];
        let mut occurrences = 1;
        while start + (occurrences + 1) * unit_len <= run_end {
            let next = start + occurrences * unit_len;
            if &chars[next..next + unit_len] != unit {
                break;
            }
            occurrences += 1;
        }

        if occurrences >= MIN_OCCURRENCES {
            return Some(start + occurrences * unit_len);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matched<'a>(text: &'a str) -> Vec<&'a str> {
        find_repeated_sequences(text)
            .into_iter()
            .map(|range| &text[range])
            .collect()
    }

    #[test]
    fn test_three_copies_match() {
        assert_eq!(matched("abcabcabc"), vec!["abcabcabc"]);
    }

    #[test]
    fn test_two_copies_do_not_match() {
        assert!(matched("abcabc").is_empty());
    }

    #[test]
    fn test_unit_shorter_than_three_ignored() {
        assert!(matched("abababab").is_empty());
    }

    #[test]
    fn test_greedy_repeat_and_later_start() {
        assert_eq!(matched("xabcabcabcabc"), vec!["abcabcabcabc"]);
    }

    #[test]
    fn test_longest_unit_preferred() {
        // "aaaaaaaaa" can be three copies of "aaa"
        assert_eq!(matched("aaaaaaaaa"), vec!["aaaaaaaaa"]);
        // unit "aaaa" wins over "aaa"; both cover all twelve letters
        assert_eq!(matched("aaaaaaaaaaaa"), vec!["aaaaaaaaaaaa"]);
    }

    #[test]
    fn test_whitespace_breaks_runs() {
        assert!(matched("abc abc abc").is_empty());
        assert_eq!(matched("abc abc abc xyzxyzxyz."), vec!["xyzxyzxyz"]);
        assert!(matched("abc\x1fabc\x1fabc\x1f").is_empty());
        assert!(matched("ab\x1cab\x1cab\x1c").is_empty());
    }

    #[test]
    fn test_multiple_matches_in_order() {
        let text = "foofoofoo then barbarbar";
        assert_eq!(matched(text), vec!["foofoofoo", "barbarbar"]);
    }

    #[test]
    fn test_non_ascii_units() {
        let text = "début ééééééééé fin";
        let ranges = find_repeated_sequences(text);
        assert_eq!(ranges.len(), 1);
        assert_eq!(&text[ranges[0].clone()], "ééééééééé");
    }
}
