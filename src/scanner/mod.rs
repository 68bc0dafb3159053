//! Line and pattern scanning

pub mod artifact_detector;
pub mod duplicate_detector;
pub mod repeated_sequence;

pub use artifact_detector::{catalog, find_artifacts, ArtifactFinding, ArtifactPattern};
pub use duplicate_detector::{find_consecutive_duplicates, DuplicateFinding, DEFAULT_MIN_LENGTH};

/// Whitespace as line-oriented text tools see it: Unicode `White_Space`
/// plus the `\x1c`-`\x1f` information separators.
pub(crate) fn is_space(ch: char) -> bool {
    ch.is_whitespace() || ('\x1c'..='\x1f').contains(&ch)
}
