//! Error types for running the external linter and loading configuration.
//!
//! Report-level problems (crash text, malformed JSON, config feedback) are
//! not errors here: they go through the failure channel in `translate`.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a lint pass.
#[derive(Debug, Error)]
pub enum Error {
    /// The external tool could not be spawned.
    #[error("failed to launch '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// File system or pipe I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The tool's standard output was not valid UTF-8.
    #[error("linter output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// No line of the document opens a style block and the policy is `fail`.
    #[error("no style block marker '{marker}' found in {}", path.display())]
    MissingStyleBlock { path: PathBuf, marker: String },

    /// A configuration file exists but could not be parsed.
    #[error("invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
