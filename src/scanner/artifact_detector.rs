//! Conversion artifact detection over a fixed pattern catalog

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::ops::Range;

use super::{is_space, repeated_sequence};

/// Characters of context kept on each side of a match
pub const CONTEXT_RADIUS: usize = 40;

const WORD: &str = r"[\p{L}\p{N}_]";
const SPACE: &str = r"[\s\x1c-\x1f]";

// Catalog is compiled once and shared by every analysis
lazy_static::lazy_static! {
    static ref CATALOG: Vec<ArtifactPattern> = build_catalog();
}

/// A single match of a catalog pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactFinding {
    /// Source text of the pattern that matched
    #[serde(rename = "motif")]
    pub pattern: String,
    /// Human-readable category
    pub description: String,
    /// Exact matched substring
    pub occurrence: String,
    /// Surrounding text, clipped to the document, on a single line
    #[serde(rename = "contexte")]
    pub context: String,
    /// Character offset of the match start
    pub position: usize,
}

enum Matcher {
    Regex(Regex),
    RepeatedSequence,
}

/// One entry of the artifact catalog
///
/// `source` is the expression reported in findings. The compiled expression
/// may spell `\w` and `\s` out as explicit classes: word characters are
/// letters, numbers and `_` (no combining marks), and whitespace includes
/// the `\x1c`-`\x1f` separators.
pub struct ArtifactPattern {
    pub source: &'static str,
    pub description: &'static str,
    matcher: Matcher,
}

impl ArtifactPattern {
    fn regex(source: &'static str, description: &'static str) -> Self {
        Self::compiled(source, source, description)
    }

    fn compiled(source: &'static str, expression: &str, description: &'static str) -> Self {
        let regex = Regex::new(expression).expect("artifact catalog patterns are valid");
        Self {
            source,
            description,
            matcher: Matcher::Regex(regex),
        }
    }

    /// Non-overlapping byte ranges matched in `text`, left to right
    pub fn find_ranges(&self, text: &str) -> Vec<Range<usize>> {
        match &self.matcher {
            Matcher::Regex(regex) => regex.find_iter(text).map(|m| m.range()).collect(),
            Matcher::RepeatedSequence => repeated_sequence::find_repeated_sequences(text),
        }
    }
}

fn build_catalog() -> Vec<ArtifactPattern> {
    vec![
        ArtifactPattern {
            source: repeated_sequence::SOURCE,
            description: "repeated word or sequence",
            matcher: Matcher::RepeatedSequence,
        },
        ArtifactPattern::compiled(
            r"\w+(?:et/ou|ou/et)\w+",
            &format!("{WORD}+(?:et/ou|ou/et){WORD}+"),
            "words glued together around et/ou",
        ),
        ArtifactPattern::regex(r"\(.*?[^)]{2,}\)", "parenthesis probably unclosed"),
        ArtifactPattern::regex(r"[@$%&\*]{2,}", "suspicious special-character sequence"),
        ArtifactPattern::compiled(
            r"\w+quad\w+",
            &format!("{WORD}+quad{WORD}+"),
            "artifact resembling a stray formatting fragment",
        ),
        ArtifactPattern::compiled(
            r"Page \d+ / 74\s*Page \d+ / 74",
            &format!(r"Page \d+ / 74{SPACE}*Page \d+ / 74"),
            "duplicated pagination",
        ),
        ArtifactPattern::compiled(
            r"\\\(.*?\\\)\s*\\\(.*?\\\)",
            &format!(r"\\\(.*?\\\){SPACE}*\\\(.*?\\\)"),
            "duplicated inline formula",
        ),
    ]
}

/// The ordered pattern catalog
pub fn catalog() -> &'static [ArtifactPattern] {
    &CATALOG
}

/// Maps byte offsets of a text to character offsets
struct CharOffsets {
    starts: Vec<usize>,
}

impl CharOffsets {
    fn new(text: &str) -> Self {
        let mut starts: Vec<usize> = text.char_indices().map(|(idx, _)| idx).collect();
        starts.push(text.len());
        Self { starts }
    }

    fn char_len(&self) -> usize {
        self.starts.len() - 1
    }

    fn char_at(&self, byte: usize) -> usize {
        self.starts.partition_point(|&start| start < byte)
    }

    fn byte_at(&self, char_idx: usize) -> usize {
        self.starts[char_idx.min(self.char_len())]
    }
}

/// Context window around a match, clipped and flattened to one line
fn context_window(text: &str, offsets: &CharOffsets, start_char: usize, end_char: usize) -> String {
    let from = start_char.saturating_sub(CONTEXT_RADIUS);
    let to = (end_char + CONTEXT_RADIUS).min(offsets.char_len());

    text[offsets.byte_at(from)..offsets.byte_at(to)]
        .replace('\n', " ")
        .trim_matches(is_space)
        .to_string()
}

/// Apply every catalog pattern to the text
///
/// # Arguments
/// * `text` - Full document text
///
/// # Returns
/// Findings in catalog order, then in document order within a pattern
pub fn find_artifacts(text: &str) -> Vec<ArtifactFinding> {
    let offsets = CharOffsets::new(text);
    let mut findings = Vec::new();

    for pattern in catalog() {
        let ranges = pattern.find_ranges(text);
        tracing::debug!(pattern = pattern.source, matches = ranges.len(), "artifact pattern applied");

        for range in ranges {
            let start_char = offsets.char_at(range.start);
            let end_char = offsets.char_at(range.end);
            findings.push(ArtifactFinding {
                pattern: pattern.source.to_string(),
                description: pattern.description.to_string(),
                occurrence: text[range].to_string(),
                context: context_window(text, &offsets, start_char, end_char),
                position: start_char,
            });
        }
    }

    findings
}
