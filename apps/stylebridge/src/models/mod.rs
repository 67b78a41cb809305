//! Shared data models: diagnostics produced by the translator and the
//! per-run containers used by printers.

pub mod report;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A single issue reported by the external linter, in 0-based coordinates.
pub struct Diagnostic {
    pub line: usize,
    pub col: usize,
    /// Severity as reported by the tool ("warning" | "error").
    pub error_type: String,
    /// Rule identifier.
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
/// Diagnostics and failure notes collected for one file.
pub struct FileReport {
    pub file: String,
    pub diagnostics: Vec<Diagnostic>,
    /// Human-readable failure notes (crash, malformed output, config feedback).
    pub failures: Vec<String>,
    /// Set when the pass aborted (launch failure, unreadable file).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Default, Serialize)]
/// Aggregated summary used by printers and exit codes.
pub struct Summary {
    pub errors: usize,
    pub warnings: usize,
    pub failures: usize,
    pub files: usize,
}

#[derive(Debug, Serialize)]
/// Lint results container.
pub struct LintResult {
    pub files: Vec<FileReport>,
    pub summary: Summary,
}

impl LintResult {
    /// Build a result and compute its summary.
    pub fn from_files(files: Vec<FileReport>) -> Self {
        let mut summary = Summary {
            files: files.len(),
            ..Summary::default()
        };
        for f in &files {
            for d in &f.diagnostics {
                match d.error_type.as_str() {
                    "error" => summary.errors += 1,
                    _ => summary.warnings += 1,
                }
            }
            summary.failures += f.failures.len() + usize::from(f.error.is_some());
        }
        LintResult { files, summary }
    }

    /// Whether the run should exit non-zero.
    pub fn has_problems(&self) -> bool {
        self.summary.errors > 0 || self.summary.failures > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diag(sev: &str) -> Diagnostic {
        Diagnostic {
            line: 0,
            col: 0,
            error_type: sev.into(),
            code: "r".into(),
            message: "m".into(),
        }
    }

    #[test]
    fn test_summary_counts_severity_and_failures() {
        let res = LintResult::from_files(vec![
            FileReport {
                file: "a.css".into(),
                diagnostics: vec![diag("error"), diag("warning"), diag("warning")],
                failures: vec![],
                error: None,
            },
            FileReport {
                file: "b.css".into(),
                diagnostics: vec![],
                failures: vec!["crashed".into()],
                error: Some("launch".into()),
            },
        ]);
        assert_eq!(res.summary.errors, 1);
        assert_eq!(res.summary.warnings, 2);
        assert_eq!(res.summary.failures, 2);
        assert_eq!(res.summary.files, 2);
        assert!(res.has_problems());
    }

    #[test]
    fn test_warnings_only_is_not_a_problem() {
        let res = LintResult::from_files(vec![FileReport {
            file: "a.css".into(),
            diagnostics: vec![diag("warning")],
            failures: vec![],
            error: None,
        }]);
        assert!(!res.has_problems());
    }
}
