//! Configuration discovery and effective settings resolution.
//!
//! Stylebridge reads `stylebridge.toml|yaml|yml` from the repository root
//! (or closest ancestor) and merges it with CLI flags to produce an
//! `Effective` config.
//! Defaults:
//! - `executable`: `stylelint` (project-local `node_modules/.bin` preferred)
//! - `args`: none
//! - `selector`: CSS-family sources, excluding attribute values
//! - `output`: `human`
//! - `workingDir`: the current directory
//! - `styleMarker`: `<style`
//! - `missingStyleBlock`: `zero`
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::block::{MissingBlock, DEFAULT_MARKER};
use crate::error::{Error, Result};
use crate::runner::DEFAULT_EXECUTABLE;
use crate::selector::DEFAULT_SELECTOR;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_TOML: &str = "stylebridge.toml";
const CONFIG_YAML: [&str; 2] = ["stylebridge.yaml", "stylebridge.yml"];

#[derive(Debug, Default, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
/// Root configuration loaded from `stylebridge.toml|yaml`.
pub struct BridgeConfig {
    pub executable: Option<String>,
    #[serde(default)]
    pub args: Option<Vec<String>>,
    pub selector: Option<String>,
    pub output: Option<String>,
    pub working_dir: Option<String>,
    pub style_marker: Option<String>,
    pub missing_style_block: Option<MissingBlock>,
    #[serde(default)]
    pub env: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub config_found: bool,
    pub executable: String,
    pub args: Vec<String>,
    pub selector: String,
    pub output: String,
    /// `None` means the process's current directory.
    pub working_dir: Option<PathBuf>,
    pub style_marker: String,
    pub missing_block: MissingBlock,
    pub env: BTreeMap<String, String>,
}

impl Default for Effective {
    fn default() -> Self {
        Effective {
            repo_root: PathBuf::from("."),
            config_found: false,
            executable: DEFAULT_EXECUTABLE.to_string(),
            args: Vec::new(),
            selector: DEFAULT_SELECTOR.to_string(),
            output: "human".to_string(),
            working_dir: None,
            style_marker: DEFAULT_MARKER.to_string(),
            missing_block: MissingBlock::Zero,
            env: BTreeMap::new(),
        }
    }
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a `stylebridge.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if cur.join(CONFIG_TOML).exists() || CONFIG_YAML.iter().any(|y| cur.join(y).exists()) {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `BridgeConfig` from `stylebridge.toml` or `stylebridge.yaml|yml`.
///
/// Returns `Ok(None)` when no file exists; a file that fails to parse is an
/// error rather than silently falling back to defaults.
pub fn load_config(root: &Path) -> Result<Option<BridgeConfig>> {
    let toml_path = root.join(CONFIG_TOML);
    if toml_path.exists() {
        let s = fs::read_to_string(&toml_path)?;
        let cfg: BridgeConfig = toml::from_str(&s).map_err(|e| Error::Config {
            path: toml_path.clone(),
            message: e.to_string(),
        })?;
        return Ok(Some(cfg));
    }
    for yml in CONFIG_YAML {
        let p = root.join(yml);
        if p.exists() {
            let s = fs::read_to_string(&p)?;
            let cfg: BridgeConfig = serde_yaml::from_str(&s).map_err(|e| Error::Config {
                path: p.clone(),
                message: e.to_string(),
            })?;
            return Ok(Some(cfg));
        }
    }
    Ok(None)
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(
    cli_repo_root: Option<&str>,
    cli_executable: Option<&str>,
    cli_working_dir: Option<&str>,
    cli_output: Option<&str>,
) -> Result<Effective> {
    let start = PathBuf::from(cli_repo_root.unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let loaded = load_config(&repo_root)?;
    let config_found = loaded.is_some();
    let cfg = loaded.unwrap_or_default();
    let defaults = Effective::default();

    let executable = cli_executable
        .map(|s| s.to_string())
        .or(cfg.executable)
        .unwrap_or(defaults.executable);
    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or(defaults.output);
    // Config-relative working dirs are anchored at the repo root; CLI values
    // are taken as given.
    let working_dir = cli_working_dir
        .map(PathBuf::from)
        .or_else(|| cfg.working_dir.map(|w| repo_root.join(w)));

    Ok(Effective {
        repo_root,
        config_found,
        executable,
        args: cfg.args.unwrap_or_default(),
        selector: cfg.selector.unwrap_or(defaults.selector),
        output,
        working_dir,
        style_marker: cfg.style_marker.unwrap_or(defaults.style_marker),
        missing_block: cfg.missing_style_block.unwrap_or_default(),
        env: cfg.env.unwrap_or_default(),
    })
}
