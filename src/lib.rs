//! Text Artifact Scanner Library
//!
//! Finds duplicated consecutive lines and common rendering artifacts in
//! machine-converted documents.

pub mod core;
pub mod scanner;
pub mod reporting;

pub use crate::core::analyzer;
pub use crate::scanner::{artifact_detector, duplicate_detector};
pub use crate::reporting::report_writer;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::core::analyzer::{
        analyze_file_or_text, analyze_file_or_text_to, analyze_text, load_document,
        AnalysisOutcome, AnalysisResult, InputSource,
    };
    pub use crate::core::error::InputError;
    pub use crate::scanner::artifact_detector::{catalog, find_artifacts, ArtifactFinding, ArtifactPattern};
    pub use crate::scanner::duplicate_detector::{
        find_consecutive_duplicates, DuplicateFinding, DEFAULT_MIN_LENGTH,
    };
    pub use crate::reporting::report_writer::{write_json_report, write_summary};
}
