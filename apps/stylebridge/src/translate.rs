//! Report translation: stylelint output text to 0-based diagnostics.
//!
//! Translation runs in two stages. `classify` sniffs for crash text before
//! attempting JSON, producing an `Outcome`. `Translator::translate` then
//! reports structural problems once through a `FailureSink` and returns a
//! lazy `Diagnostics` iterator over the report's warnings.
//!
//! Coordinates: stylelint reports 1-based lines and columns relative to the
//! linted source. For embedded style blocks the first block line (0-based,
//! in the original document) is subtracted as well. Values that would go
//! negative are clamped to 0 and logged.

use crate::logger::Logger;
use crate::models::report::{Report, Warning};
use crate::models::Diagnostic;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Row base of reported positions.
pub const LINE_BASE_ROW: i64 = 1;
/// Column base of reported positions.
pub const LINE_BASE_COL: i64 = 1;

fn crash_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Anchored at the very start; at most one line break before `...Error: `.
    RE.get_or_init(|| Regex::new(r"\A.*?\r?\n?\w*Error: (.*)").expect("valid crash regex"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Classification of one invocation's raw output.
pub enum Outcome {
    /// Blank output: nothing to report.
    Empty,
    /// Crash text with the captured message.
    Crashed(String),
    Parsed(Report),
    /// Not a usable report; carries the parse error.
    Malformed(String),
}

/// Classify raw output. Crash text wins over JSON.
pub fn classify(output: &str) -> Outcome {
    if let Some(caps) = crash_regex().captures(output) {
        let msg = caps.get(1).map_or("", |m| m.as_str()).trim_end();
        return Outcome::Crashed(msg.to_string());
    }
    if output.trim().is_empty() {
        return Outcome::Empty;
    }
    match parse_report(output) {
        Ok(report) => Outcome::Parsed(report),
        Err(reason) => Outcome::Malformed(reason),
    }
}

fn parse_report(output: &str) -> Result<Report, String> {
    let mut items: Vec<serde_json::Value> =
        serde_json::from_str(output).map_err(|e| format!("invalid linter output: {}", e))?;
    if items.is_empty() {
        return Err("invalid linter output: empty result array".to_string());
    }
    serde_json::from_value(items.swap_remove(0))
        .map_err(|e| format!("unexpected report shape: {}", e))
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Structural problem reported once per invocation.
pub enum Failure {
    Crashed(String),
    Malformed(String),
    InvalidOptions(Vec<String>),
    Deprecations(Vec<String>),
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Crashed(msg) => write!(f, "Stylelint crashed: {}", msg),
            Failure::Malformed(reason) => f.write_str(reason),
            Failure::InvalidOptions(texts) => {
                write!(f, "invalid options: {}", texts.join("; "))
            }
            Failure::Deprecations(texts) => write!(f, "deprecations: {}", texts.join("; ")),
        }
    }
}

/// Host callback marking the current lint pass as failed.
pub trait FailureSink {
    fn notify_failure(&mut self, failure: Failure);
}

impl<F: FnMut(Failure)> FailureSink for F {
    fn notify_failure(&mut self, failure: Failure) {
        self(failure)
    }
}

/// Translates raw output for one invocation.
pub struct Translator<'a> {
    logger: &'a dyn Logger,
    block_offset: usize,
}

impl<'a> Translator<'a> {
    pub fn new(logger: &'a dyn Logger, block_offset: usize) -> Self {
        Translator {
            logger,
            block_offset,
        }
    }

    /// Translate `output`, notifying `sink` of structural problems.
    pub fn translate(&self, output: &str, sink: &mut dyn FailureSink) -> Diagnostics<'a> {
        let report = match classify(output) {
            Outcome::Empty => return self.diagnostics(Vec::new()),
            Outcome::Crashed(msg) => {
                let failure = Failure::Crashed(msg);
                self.logger.warn(&failure.to_string());
                sink.notify_failure(failure);
                return self.diagnostics(Vec::new());
            }
            Outcome::Malformed(reason) => {
                self.logger.warn(&reason);
                sink.notify_failure(Failure::Malformed(reason));
                return self.diagnostics(Vec::new());
            }
            Outcome::Parsed(report) => report,
        };

        if !report.invalid_option_warnings.is_empty() {
            let texts = self.log_texts(report.invalid_option_warnings.iter().map(|o| &o.text));
            sink.notify_failure(Failure::InvalidOptions(texts));
        }
        if !report.deprecations.is_empty() {
            let texts = self.log_texts(report.deprecations.iter().map(|o| &o.text));
            sink.notify_failure(Failure::Deprecations(texts));
        }
        self.diagnostics(report.warnings)
    }

    fn log_texts<'t>(&self, texts: impl Iterator<Item = &'t String>) -> Vec<String> {
        texts
            .map(|t| {
                self.logger.warn(t);
                t.clone()
            })
            .collect()
    }

    fn diagnostics(&self, warnings: Vec<Warning>) -> Diagnostics<'a> {
        Diagnostics {
            warnings: warnings.into_iter(),
            block_offset: self.block_offset,
            logger: self.logger,
        }
    }
}

/// Lazy iterator of diagnostics in report order.
pub struct Diagnostics<'a> {
    warnings: std::vec::IntoIter<Warning>,
    block_offset: usize,
    logger: &'a dyn Logger,
}

impl Iterator for Diagnostics<'_> {
    type Item = Diagnostic;

    fn next(&mut self) -> Option<Diagnostic> {
        let w = self.warnings.next()?;
        Some(to_diagnostic(w, self.block_offset, self.logger))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.warnings.size_hint()
    }
}

impl ExactSizeIterator for Diagnostics<'_> {}

fn to_diagnostic(w: Warning, block_offset: usize, logger: &dyn Logger) -> Diagnostic {
    let offset = i64::try_from(block_offset).unwrap_or(i64::MAX);
    let line = w.line.saturating_sub(offset).saturating_sub(LINE_BASE_ROW);
    let col = w.column.saturating_sub(LINE_BASE_COL);
    let line = non_negative(line, "line", &w, logger);
    let col = non_negative(col, "column", &w, logger);
    let message = w
        .text
        .replace(&format!("({})", w.rule), "")
        .trim_end()
        .to_string();
    Diagnostic {
        line,
        col,
        error_type: w.severity,
        code: w.rule,
        message,
    }
}

fn non_negative(value: i64, what: &str, w: &Warning, logger: &dyn Logger) -> usize {
    usize::try_from(value).unwrap_or_else(|_| {
        logger.warn(&format!(
            "{} {}:{} of rule '{}' lies before the style block; clamped to 0",
            what, w.line, w.column, w.rule
        ));
        0
    })
}
