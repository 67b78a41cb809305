//! Stylebridge core library.
//!
//! This crate adapts the external `stylelint` CLI for editor-style lint
//! hosts: it runs the tool with the document on stdin and translates the
//! JSON report into 0-based diagnostics.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `block`: Style-block offset lookup for embedded stylesheets.
//! - `runner`: Child process invocation of the external tool.
//! - `translate`: Crash sniffing, report parsing and coordinate remapping.
//! - `linter`: The `Linter` capability and the `Stylelint` adapter.
//! - `lint`: Multi-file runner used by the binary.
//! - `selector`: File-type selector deciding which documents apply.
//! - `models`: Diagnostic, report and result structs.
//! - `output`: Human/JSON printers.
//! - `logger`: Injected warn-level logging collaborator.
//! - `error`: Error types.
//! - `utils`: Supporting helpers.
pub mod block;
pub mod cli;
pub mod config;
pub mod error;
pub mod lint;
pub mod linter;
pub mod logger;
pub mod models;
pub mod output;
pub mod runner;
pub mod selector;
pub mod translate;
pub mod utils;

pub use error::{Error, Result};
pub use linter::{lint_document, Document, LintPass, Linter, RawOutput, Stylelint};
pub use models::Diagnostic;
pub use translate::{Failure, FailureSink, Outcome, Translator};
