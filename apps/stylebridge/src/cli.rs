//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "stylebridge",
    version,
    about = "Run stylelint and report editor-ready diagnostics",
    long_about = "Stylebridge — runs stylelint over stylesheets and embedded style blocks, and translates its JSON report into 0-based diagnostics.\n\nConfiguration precedence: CLI > stylebridge.toml > defaults.",
    after_help = "Examples:\n  stylebridge lint 'src/**/*.css'\n  stylebridge lint components/App.vue --output json\n  stylelint --formatter json < a.css | stylebridge parse --offset 0",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[arg(long, short, global = true, help = "Enable debug logging")]
    pub verbose: bool,
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(
        about = "Show version",
        long_about = "Print the current stylebridge version."
    )]
    Version,
    /// Lint files through stylelint
    #[command(
        about = "Run stylelint on files",
        long_about = "Lint files matched by the given paths or globs (relative to the repository root). Files outside the configured selector are skipped unless --force.",
        after_help = "Examples:\n  stylebridge lint 'styles/*.scss'\n  stylebridge lint page.html --executable ./node_modules/.bin/stylelint"
    )]
    Lint {
        #[arg(required = true, help = "Files or glob patterns")]
        patterns: Vec<String>,
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, help = "Linter executable (default: stylelint)")]
        executable: Option<String>,
        #[arg(long, help = "Working directory for the linter process")]
        working_dir: Option<String>,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Lint files even if the selector does not cover them")]
        force: bool,
    },
    /// Translate captured stylelint JSON output
    #[command(
        about = "Translate saved output",
        long_about = "Translate stylelint --formatter json output read from a file or stdin, without running the tool."
    )]
    Parse {
        #[arg(long, help = "Read output from this file instead of stdin")]
        input: Option<String>,
        #[arg(long, default_value_t = 0, help = "Style-block line offset to subtract")]
        offset: usize,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
}
