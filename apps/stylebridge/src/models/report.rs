//! Report schema: the first element of stylelint's `--formatter json` array.

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
/// Parsed report for one linted file. Unknown keys are ignored.
pub struct Report {
    #[serde(default)]
    pub invalid_option_warnings: Vec<Feedback>,
    #[serde(default)]
    pub deprecations: Vec<Feedback>,
    #[serde(default)]
    pub warnings: Vec<Warning>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
/// Config-level feedback entry (invalid option or deprecation).
pub struct Feedback {
    pub text: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
/// One reported problem, 1-based coordinates. Every field is required.
pub struct Warning {
    pub line: i64,
    pub column: i64,
    pub severity: String,
    pub rule: String,
    pub text: String,
}
