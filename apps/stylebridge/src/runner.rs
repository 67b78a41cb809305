//! Process runner for the external linter.
//!
//! One synchronous child per call: the document text is piped to stdin,
//! stdout and stderr are drained to completion and the child is reaped
//! before returning. Stdout must be valid UTF-8.

use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

/// Bare executable name that triggers local `node_modules` lookup.
pub const DEFAULT_EXECUTABLE: &str = "stylelint";

#[derive(Debug, Clone)]
/// A fully-described child process invocation.
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    pub env: BTreeMap<String, String>,
}

impl Invocation {
    /// `<program> [extra] --formatter json [--stdin-filename <file>]`
    pub fn stylelint(program: &str, extra: &[String], stdin_filename: Option<&Path>) -> Self {
        let mut args: Vec<String> = extra.to_vec();
        args.push("--formatter".into());
        args.push("json".into());
        if let Some(file) = stdin_filename {
            args.push("--stdin-filename".into());
            args.push(file.to_string_lossy().to_string());
        }
        Invocation {
            program: program.to_string(),
            args,
            cwd: PathBuf::from("."),
            env: BTreeMap::new(),
        }
    }

    pub fn current_dir(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = cwd.into();
        self
    }

    pub fn envs(mut self, env: &BTreeMap<String, String>) -> Self {
        self.env.extend(env.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    /// Run the child with `input` on stdin and return its decoded stdout.
    pub fn run(&self, input: &str) -> Result<String> {
        debug!(program = %self.program, args = ?self.args, cwd = %self.cwd.display(), "spawning linter");
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .current_dir(&self.cwd)
            .envs(&self.env)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| Error::Launch {
                program: self.program.clone(),
                source,
            })?;

        // Feed stdin from a helper thread so a child that writes before it
        // finishes reading cannot fill its stdout pipe and stall.
        let stdin = child.stdin.take();
        let bytes = input.as_bytes().to_vec();
        let writer = std::thread::spawn(move || -> io::Result<()> {
            let Some(mut stdin) = stdin else {
                return Ok(());
            };
            match stdin.write_all(&bytes) {
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
                other => other,
            }
        });

        let output = child.wait_with_output()?;
        writer
            .join()
            .map_err(|_| io::Error::other("stdin writer thread panicked"))??;

        debug!(status = %output.status, stderr_bytes = output.stderr.len(), "linter exited");
        if !output.stderr.is_empty() {
            debug!(stderr = %String::from_utf8_lossy(&output.stderr), "linter stderr");
        }
        Ok(String::from_utf8(output.stdout)?)
    }
}

/// Prefer a project-local `node_modules/.bin/<name>` for the bare default
/// name, searching upward from `start`; otherwise return `name` unchanged.
pub fn resolve_executable(name: &str, start: &Path) -> String {
    if name != DEFAULT_EXECUTABLE {
        return name.to_string();
    }
    let bin = if cfg!(windows) {
        format!("{}.cmd", name)
    } else {
        name.to_string()
    };
    let mut cur = Some(start);
    while let Some(dir) = cur {
        let candidate = dir.join("node_modules").join(".bin").join(&bin);
        if candidate.is_file() {
            return candidate.to_string_lossy().to_string();
        }
        cur = dir.parent();
    }
    name.to_string()
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// Invocation of `sh <script>` so the script never needs exec permission.
    fn script(dir: &Path, body: &str) -> Invocation {
        let path = dir.join("fake-stylelint.sh");
        std::fs::write(&path, body).unwrap();
        Invocation::stylelint(
            "sh",
            &[path.to_string_lossy().to_string()],
            Some(Path::new("src/a.css")),
        )
        .current_dir(dir)
    }

    #[test]
    fn test_pipes_document_to_stdin() {
        let dir = tempdir().unwrap();
        let inv = script(dir.path(), "cat\n");
        let doc = "a { color: red; }\n/* ünïcödé */\n";
        assert_eq!(inv.run(doc).unwrap(), doc);
    }

    #[test]
    fn test_passes_formatter_and_stdin_filename() {
        let dir = tempdir().unwrap();
        let inv = script(dir.path(), "printf '%s\\n' \"$@\"\n");
        let out = inv.run("").unwrap();
        let args: Vec<&str> = out.lines().collect();
        assert_eq!(args, ["--formatter", "json", "--stdin-filename", "src/a.css"]);
    }

    #[test]
    fn test_runs_in_working_dir_with_env() {
        let dir = tempdir().unwrap();
        let mut env = BTreeMap::new();
        env.insert("STYLEBRIDGE_TEST".to_string(), "on".to_string());
        let inv = script(dir.path(), "pwd\nprintf '%s' \"$STYLEBRIDGE_TEST\"\n").envs(&env);
        let out = inv.run("").unwrap();
        let mut lines = out.lines();
        let cwd = PathBuf::from(lines.next().unwrap());
        assert_eq!(
            cwd.canonicalize().unwrap(),
            dir.path().canonicalize().unwrap()
        );
        assert_eq!(lines.next(), Some("on"));
    }

    #[test]
    fn test_missing_program_is_launch_error() {
        let inv = Invocation::stylelint("stylebridge-no-such-binary", &[], None);
        match inv.run("a{}") {
            Err(Error::Launch { program, .. }) => assert_eq!(program, "stylebridge-no-such-binary"),
            other => panic!("expected launch error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_utf8_output_propagates() {
        let dir = tempdir().unwrap();
        let inv = script(dir.path(), "printf '\\377\\376'\n");
        assert!(matches!(inv.run(""), Err(Error::Utf8(_))));
    }

    #[test]
    fn test_child_ignoring_large_stdin() {
        let dir = tempdir().unwrap();
        let inv = script(dir.path(), "echo '[]'\n");
        let big = "a { color: red; }\n".repeat(100_000);
        assert_eq!(inv.run(&big).unwrap().trim(), "[]");
    }

    #[test]
    fn test_resolve_executable_prefers_local_bin() {
        let dir = tempdir().unwrap();
        let bin = dir.path().join("node_modules/.bin");
        std::fs::create_dir_all(&bin).unwrap();
        std::fs::write(bin.join("stylelint"), "#!/bin/sh\n").unwrap();
        let nested = dir.path().join("src/styles");
        std::fs::create_dir_all(&nested).unwrap();

        let found = resolve_executable(DEFAULT_EXECUTABLE, &nested);
        assert_eq!(PathBuf::from(found), bin.join("stylelint"));
        assert_eq!(resolve_executable("/opt/lint", &nested), "/opt/lint");
    }
}
