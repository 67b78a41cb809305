//! Lint runner acting as the host: selects files, lints each one through the
//! adapter and aggregates a `LintResult`.
//!
//! Each file gets its own independent invocation; files are processed in
//! parallel and reported in path order.

use crate::config::Effective;
use crate::linter::{lint_document, Document, Linter, Stylelint};
use crate::logger::{Logger, TracingLogger};
use crate::models::{FileReport, LintResult};
use crate::selector::Selector;
use crate::translate::{Failure, Translator};
use glob::glob;
use rayon::prelude::*;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Run lint across files matched by `patterns` (relative to the repo root).
///
/// Files the selector does not cover are skipped unless `force` is set.
/// Launch and I/O errors are recorded on the file instead of aborting the
/// whole run.
pub fn run_lint(eff: &Effective, patterns: &[String], force: bool) -> LintResult {
    let selector = Selector::parse(&eff.selector);
    let targets: Vec<PathBuf> = expand_patterns(&eff.repo_root, patterns)
        .into_iter()
        .filter(|p| {
            let keep = force || selector.applies_to(p);
            if !keep {
                debug!(file = %p.display(), "skipped by selector");
            }
            keep
        })
        .collect();
    info!(files = targets.len(), "linting");

    let linter = Stylelint::new(eff, Box::new(TracingLogger));
    let files: Vec<FileReport> = targets
        .par_iter()
        .map(|path| lint_file(&linter, &eff.repo_root, path))
        .collect();
    LintResult::from_files(files)
}

/// Lint one file with any `Linter`, never failing: errors land in the report.
pub fn lint_file(linter: &(dyn Linter + Sync), root: &Path, path: &Path) -> FileReport {
    let file = display_path(root, path);
    let pass = Document::from_file(path).and_then(|doc| lint_document(linter, &doc));
    match pass {
        Ok(pass) => FileReport {
            file,
            diagnostics: pass.diagnostics,
            failures: pass.failures.iter().map(Failure::to_string).collect(),
            error: None,
        },
        Err(e) => FileReport {
            file,
            diagnostics: Vec::new(),
            failures: Vec::new(),
            error: Some(e.to_string()),
        },
    }
}

/// Translate previously captured linter output without running the tool.
pub fn parse_output(label: &str, output: &str, block_offset: usize) -> LintResult {
    let logger = TracingLogger;
    let mut failures = Vec::new();
    let diagnostics = Translator::new(&logger as &dyn Logger, block_offset)
        .translate(output, &mut |f: Failure| failures.push(f.to_string()))
        .collect();
    LintResult::from_files(vec![FileReport {
        file: label.to_string(),
        diagnostics,
        failures,
        error: None,
    }])
}

/// Expand glob patterns under `root`; plain paths pass through. Results are
/// de-duplicated and sorted for deterministic output.
fn expand_patterns(root: &Path, patterns: &[String]) -> Vec<PathBuf> {
    let mut out: BTreeSet<PathBuf> = BTreeSet::new();
    for pat in patterns {
        let abs = root.join(pat);
        let pattern = abs.to_string_lossy().to_string();
        match glob(&pattern) {
            Ok(paths) => {
                for entry in paths {
                    match entry {
                        Ok(p) if p.is_file() => {
                            out.insert(p);
                        }
                        Ok(_) => {}
                        Err(e) => warn!(error = %e, "unreadable path skipped"),
                    }
                }
            }
            Err(e) => warn!(pattern = %pattern, error = %e, "invalid glob pattern"),
        }
    }
    out.into_iter().collect()
}

fn display_path(root: &Path, path: &Path) -> String {
    pathdiff::diff_paths(path, root)
        .filter(|p| !p.starts_with(".."))
        .unwrap_or_else(|| path.to_path_buf())
        .to_string_lossy()
        .to_string()
}
