//! The linter capability: run the external tool, then parse its output.
//!
//! `Linter` keeps the two halves separate so each can be exercised without
//! a host. `Stylelint` is the concrete adapter built from an `Effective`
//! configuration and an injected `Logger`.

use crate::block::{self, MissingBlock};
use crate::config::Effective;
use crate::error::Result;
use crate::logger::Logger;
use crate::models::Diagnostic;
use crate::runner::{resolve_executable, Invocation};
use crate::translate::{Failure, FailureSink, Translator};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone)]
/// A document to lint: its current text and, when saved, its path.
pub struct Document {
    pub path: Option<PathBuf>,
    pub text: String,
}

impl Document {
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let text = fs::read_to_string(&path)?;
        Ok(Document {
            path: Some(path),
            text,
        })
    }

    pub fn in_memory(text: impl Into<String>) -> Self {
        Document {
            path: None,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Decoded stdout of one invocation plus the style-block offset it needs.
pub struct RawOutput {
    pub text: String,
    pub block_offset: usize,
}

pub trait Linter {
    fn run(&self, document: &Document) -> Result<RawOutput>;
    fn parse(&self, output: &RawOutput, sink: &mut dyn FailureSink) -> Vec<Diagnostic>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Outcome of a full lint pass.
pub struct LintPass {
    pub diagnostics: Vec<Diagnostic>,
    pub failures: Vec<Failure>,
}

/// Run and parse one document, collecting failure notifications.
pub fn lint_document(linter: &dyn Linter, document: &Document) -> Result<LintPass> {
    let raw = linter.run(document)?;
    let mut failures = Vec::new();
    let diagnostics = linter.parse(&raw, &mut |f: Failure| failures.push(f));
    Ok(LintPass {
        diagnostics,
        failures,
    })
}

/// Stylelint adapter.
pub struct Stylelint {
    executable: String,
    args: Vec<String>,
    env: BTreeMap<String, String>,
    working_dir: Option<PathBuf>,
    marker: String,
    missing_block: MissingBlock,
    logger: Box<dyn Logger>,
}

impl Stylelint {
    pub fn new(eff: &Effective, logger: Box<dyn Logger>) -> Self {
        Stylelint {
            executable: eff.executable.clone(),
            args: eff.args.clone(),
            env: eff.env.clone(),
            working_dir: eff.working_dir.clone(),
            marker: eff.style_marker.clone(),
            missing_block: eff.missing_block,
            logger,
        }
    }

    /// Style-block offset: the saved file is read once when there is one,
    /// otherwise the in-memory text is scanned.
    fn block_offset(&self, document: &Document) -> Result<usize> {
        match &document.path {
            Some(path) => {
                let found = block::locate_in_file(path, &self.marker)?;
                block::resolve_offset(found, self.missing_block, path, &self.marker)
            }
            None => {
                let found = block::first_marker_line(&document.text, &self.marker);
                block::resolve_offset(found, self.missing_block, Path::new("<stdin>"), &self.marker)
            }
        }
    }

    fn working_dir(&self) -> PathBuf {
        self.working_dir
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

impl Linter for Stylelint {
    fn run(&self, document: &Document) -> Result<RawOutput> {
        let block_offset = self.block_offset(document)?;
        let cwd = self.working_dir();
        // The child runs in `cwd`, so the stdin filename must not stay
        // relative to ours.
        let stdin_filename = document
            .path
            .as_deref()
            .map(std::path::absolute)
            .transpose()?;
        let search_from = stdin_filename
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| cwd.clone());
        let program = resolve_executable(&self.executable, &search_from);
        debug!(program = %program, block_offset, "running stylelint");
        let text = Invocation::stylelint(&program, &self.args, stdin_filename.as_deref())
            .current_dir(cwd)
            .envs(&self.env)
            .run(&document.text)?;
        Ok(RawOutput { text, block_offset })
    }

    fn parse(&self, output: &RawOutput, sink: &mut dyn FailureSink) -> Vec<Diagnostic> {
        Translator::new(self.logger.as_ref(), output.block_offset)
            .translate(&output.text, sink)
            .collect()
    }
}
