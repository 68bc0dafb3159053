//! Report writing functionality

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::core::analyzer::{AnalysisOutcome, AnalysisResult};

/// Artifacts listed in the summary before the remainder is only counted
pub const MAX_LISTED_ARTIFACTS: usize = 15;

const DUPLICATE_TEXT_WIDTH: usize = 120;
const CONTEXT_WIDTH: usize = 140;

/// Keep the first `max` characters, marking the cut with `...`
fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

/// Format an integer with `,` thousands separators
fn group_thousands(value: usize) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Write the human-readable analysis summary
///
/// # Arguments
/// * `out` - Destination
/// * `text` - The analyzed document
/// * `result` - Findings for `text`
/// * `min_length` - Duplicate threshold used, echoed when nothing was found
pub fn write_summary<W: Write>(
    out: &mut W,
    text: &str,
    result: &AnalysisResult,
    min_length: usize,
) -> io::Result<()> {
    writeln!(out, "=== Text analysis ===")?;
    writeln!(out, "Total length: {} characters", group_thousands(result.text_length))?;
    writeln!(out, "Lines: {}", text.matches('\n').count() + 1)?;
    writeln!(out)?;

    writeln!(out, "1. Consecutive duplicates:")?;
    if result.duplicates.is_empty() {
        writeln!(out, "  No clear consecutive duplicate found (min length = {})", min_length)?;
        writeln!(out)?;
    } else {
        for dup in &result.duplicates {
            writeln!(out, "  Line {} -> repeated {} times", dup.line, dup.repetitions)?;
            writeln!(out, "  Text: {}", truncate_chars(&dup.text, DUPLICATE_TEXT_WIDTH))?;
            writeln!(out)?;
        }
    }

    writeln!(out, "2. Suspicious artifacts / patterns:")?;
    if result.artifacts.is_empty() {
        writeln!(out, "  No suspicious pattern detected")?;
        writeln!(out)?;
    } else {
        for artifact in result.artifacts.iter().take(MAX_LISTED_ARTIFACTS) {
            writeln!(out, "  {:<35} | {}", artifact.description, artifact.occurrence)?;
            writeln!(out, "  Context: {}", truncate_chars(&artifact.context, CONTEXT_WIDTH))?;
            writeln!(out)?;
        }
        if result.artifacts.len() > MAX_LISTED_ARTIFACTS {
            writeln!(
                out,
                "... and {} more occurrences",
                result.artifacts.len() - MAX_LISTED_ARTIFACTS
            )?;
        }
    }

    Ok(())
}

/// Write the structured outcome as pretty-printed JSON
///
/// # Arguments
/// * `output_path` - Path to output file
/// * `outcome` - Analysis result or error form
pub fn write_json_report(output_path: &Path, outcome: &AnalysisOutcome) -> Result<()> {
    let file = File::create(output_path)
        .with_context(|| format!("Failed to create report file {}", output_path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, outcome).context("Failed to serialize report")?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::artifact_detector::ArtifactFinding;
    use crate::scanner::duplicate_detector::DuplicateFinding;
    use tempfile::NamedTempFile;

    fn artifact(n: usize) -> ArtifactFinding {
        ArtifactFinding {
            pattern: r"[@$%&\*]{2,}".to_string(),
            description: "suspicious special-character sequence".to_string(),
            occurrence: "@@".to_string(),
            context: format!("context {}", n),
            position: n,
        }
    }

    fn render(text: &str, result: &AnalysisResult, min_length: usize) -> String {
        let mut buf = Vec::new();
        write_summary(&mut buf, text, result, min_length).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("short", 10), "short");
        assert_eq!(truncate_chars("abcdef", 3), "abc...");
        assert_eq!(truncate_chars("ééééé", 2), "éé...");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1234), "1,234");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_summary_without_findings() {
        let result = AnalysisResult {
            duplicates: Vec::new(),
            artifacts: Vec::new(),
            text_length: 11,
        };
        let content = render("hello\nworld", &result, 10);

        assert!(content.contains("Total length: 11 characters"));
        assert!(content.contains("Lines: 2"));
        assert!(content.contains("(min length = 10)"));
        assert!(content.contains("No suspicious pattern detected"));
    }

    #[test]
    fn test_summary_lists_duplicates() {
        let result = AnalysisResult {
            duplicates: vec![DuplicateFinding {
                line: 4,
                text: "x".repeat(130),
                repetitions: 2,
                positions: vec![4, 5],
            }],
            artifacts: Vec::new(),
            text_length: 300,
        };
        let content = render("", &result, 8);

        assert!(content.contains("Line 4 -> repeated 2 times"));
        assert!(content.contains(&format!("Text: {}...", "x".repeat(120))));
    }

    #[test]
    fn test_summary_caps_artifact_list() {
        let result = AnalysisResult {
            duplicates: Vec::new(),
            artifacts: (0..20).map(artifact).collect(),
            text_length: 100,
        };
        let content = render("", &result, 8);

        assert!(content.contains("Context: context 14"));
        assert!(!content.contains("Context: context 15"));
        assert!(content.contains("... and 5 more occurrences"));
    }

    #[test]
    fn test_write_json_report() {
        let temp_file = NamedTempFile::new().unwrap();
        let outcome = AnalysisOutcome::Report(AnalysisResult {
            duplicates: Vec::new(),
            artifacts: vec![artifact(7)],
            text_length: 42,
        });

        write_json_report(temp_file.path(), &outcome).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        let parsed: AnalysisOutcome = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, outcome);
        assert!(content.contains("\"longueur_texte\": 42"));
        assert!(content.contains("\"motif\""));
    }
}
