//! Input loading and the analysis driver

pub mod analyzer;
pub mod error;

pub use analyzer::{analyze_file_or_text, analyze_text, AnalysisOutcome, AnalysisResult};
pub use error::InputError;
