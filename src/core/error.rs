//! Error types for document loading

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The document could not be obtained
///
/// Covers missing files, permission failures and invalid UTF-8 content.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("cannot read {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
