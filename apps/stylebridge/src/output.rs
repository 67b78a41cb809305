//! Output rendering for lint results.
//!
//! Supports `human` (default) and `json` outputs. The JSON form serializes
//! diagnostics with their raw 0-based coordinates; the human form shows
//! 1-based `line:col` like most terminals expect.

use crate::models::{Diagnostic, LintResult};
use crate::utils::use_colors;
use owo_colors::OwoColorize;
use serde_json::Value as JsonVal;

/// Print lint results in the requested format.
pub fn print_lint(res: &LintResult, output: &str) {
    match output {
        "json" => match serde_json::to_string_pretty(&compose_lint_json(res)) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("{} {}", crate::utils::error_prefix(), e),
        },
        _ => {
            let color = use_colors(output);
            for f in &res.files {
                for d in &f.diagnostics {
                    println!("{}", render_diagnostic(&f.file, d, color));
                }
                for note in &f.failures {
                    println!("{} {} — {}", crate::utils::note_prefix(), f.file, note);
                }
                if let Some(err) = &f.error {
                    println!("{} {} — {}", crate::utils::error_prefix(), f.file, err);
                }
            }
            let summary = format!(
                "— Summary — errors={} warnings={} failures={} files={}",
                res.summary.errors, res.summary.warnings, res.summary.failures, res.summary.files
            );
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
        }
    }
}

fn render_diagnostic(file: &str, d: &Diagnostic, color: bool) -> String {
    let (icon, sev) = match d.error_type.as_str() {
        "error" => ("✖", "⟦error⟧"),
        _ => ("▲", "⟦warn⟧"),
    };
    let loc = format!("{}:{}:{}", file, d.line + 1, d.col + 1);
    if !color {
        return format!("{} {} {} ❲{}❳ — {}", icon, sev, loc, d.code, d.message);
    }
    let (icon, sev) = if d.error_type == "error" {
        (icon.red().to_string(), sev.red().bold().to_string())
    } else {
        (icon.yellow().to_string(), sev.yellow().bold().to_string())
    };
    format!("{} {} {} ❲{}❳ — {}", icon, sev, loc.bold(), d.code, d.message)
}

/// Compose lint JSON object (pure) for testing/snapshot purposes.
pub fn compose_lint_json(res: &LintResult) -> JsonVal {
    serde_json::to_value(res).unwrap_or(JsonVal::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FileReport;

    fn sample() -> LintResult {
        LintResult::from_files(vec![FileReport {
            file: "a.scss".into(),
            diagnostics: vec![Diagnostic {
                line: 7,
                col: 2,
                error_type: "warning".into(),
                code: "foo".into(),
                message: "bar".into(),
            }],
            failures: vec!["deprecations: old".into()],
            error: None,
        }])
    }

    #[test]
    fn test_compose_lint_json_shape() {
        let out = compose_lint_json(&sample());
        assert_eq!(out["summary"]["warnings"], 1);
        assert_eq!(out["summary"]["failures"], 1);
        let d = &out["files"][0]["diagnostics"][0];
        assert_eq!(d["line"], 7);
        assert_eq!(d["col"], 2);
        assert_eq!(d["error_type"], "warning");
        assert_eq!(d["code"], "foo");
        assert_eq!(d["message"], "bar");
        assert!(out["files"][0].get("error").is_none());
    }

    #[test]
    fn test_render_diagnostic_is_one_based() {
        let res = sample();
        let line = render_diagnostic("a.scss", &res.files[0].diagnostics[0], false);
        assert_eq!(line, "▲ ⟦warn⟧ a.scss:8:3 ❲foo❳ — bar");
    }
}
