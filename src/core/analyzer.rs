//! Analysis driver: loads a document and runs both detectors

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::error::InputError;
use crate::reporting::report_writer::write_summary;
use crate::scanner::artifact_detector::{find_artifacts, ArtifactFinding};
use crate::scanner::duplicate_detector::{find_consecutive_duplicates, DuplicateFinding};

/// Inputs longer than this (in characters) and holding a line break are literal text
pub const LITERAL_TEXT_MIN_CHARS: usize = 200;

/// How an input argument is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource<'a> {
    Text(&'a str),
    Path(&'a Path),
}

impl<'a> InputSource<'a> {
    /// Literal text when the input has a line break and more than 200
    /// characters, a file path otherwise.
    pub fn classify(input: &'a str) -> Self {
        if input.contains('\n') && input.chars().count() > LITERAL_TEXT_MIN_CHARS {
            InputSource::Text(input)
        } else {
            InputSource::Path(Path::new(input))
        }
    }
}

/// Everything found in one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(rename = "doublons_consecutifs")]
    pub duplicates: Vec<DuplicateFinding>,
    #[serde(rename = "artefacts")]
    pub artifacts: Vec<ArtifactFinding>,
    /// Document length in characters
    #[serde(rename = "longueur_texte")]
    pub text_length: usize,
}

/// Outcome of [`analyze_file_or_text`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisOutcome {
    Report(AnalysisResult),
    Error {
        #[serde(rename = "erreur")]
        error: String,
    },
}

impl AnalysisOutcome {
    pub fn is_error(&self) -> bool {
        matches!(self, AnalysisOutcome::Error { .. })
    }

    pub fn report(&self) -> Option<&AnalysisResult> {
        match self {
            AnalysisOutcome::Report(result) => Some(result),
            AnalysisOutcome::Error { .. } => None,
        }
    }
}

/// Resolve an input argument to document text
///
/// Literal text is borrowed untouched; a path is read fully as UTF-8 with
/// `\r\n` and lone `\r` line endings translated to `\n`.
pub fn load_document(input: &str) -> Result<Cow<'_, str>, InputError> {
    match InputSource::classify(input) {
        InputSource::Text(text) => Ok(Cow::Borrowed(text)),
        InputSource::Path(path) => {
            debug!(path = %path.display(), "reading document");
            let raw = fs::read_to_string(path).map_err(|source| InputError::Unreadable {
                path: PathBuf::from(path),
                source,
            })?;
            Ok(Cow::Owned(normalize_line_endings(raw)))
        }
    }
}

/// Translate `\r\n` and lone `\r` to `\n`
fn normalize_line_endings(text: String) -> String {
    if !text.contains('\r') {
        return text;
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Run both detectors over an in-memory document
///
/// # Arguments
/// * `text` - Document text
/// * `min_length` - Minimum trimmed length of a duplicated line
pub fn analyze_text(text: &str, min_length: usize) -> AnalysisResult {
    let duplicates = find_consecutive_duplicates(text, min_length);
    let artifacts = find_artifacts(text);
    let text_length = text.chars().count();

    info!(
        text_length,
        duplicates = duplicates.len(),
        artifacts = artifacts.len(),
        "analysis complete"
    );

    AnalysisResult {
        duplicates,
        artifacts,
        text_length,
    }
}

/// Analyze literal text or a file, printing the summary to stdout
///
/// # Arguments
/// * `input` - Literal text or a path, see [`InputSource::classify`]
/// * `min_length` - Minimum trimmed length of a duplicated line
///
/// # Returns
/// The analysis, or the error form when the input cannot be read
pub fn analyze_file_or_text(input: &str, min_length: usize) -> AnalysisOutcome {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    analyze_file_or_text_to(input, min_length, &mut out)
}

/// Same as [`analyze_file_or_text`], writing the summary to `out`
pub fn analyze_file_or_text_to<W: Write>(input: &str, min_length: usize, out: &mut W) -> AnalysisOutcome {
    let text = match load_document(input) {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, "input unreadable, skipping analysis");
            return AnalysisOutcome::Error { error: e.to_string() };
        }
    };

    let result = analyze_text(&text, min_length);
    if let Err(e) = write_summary(out, &text, &result, min_length) {
        warn!(error = %e, "failed to write analysis summary");
    }

    AnalysisOutcome::Report(result)
}
