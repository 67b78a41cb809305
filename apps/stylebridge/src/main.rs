//! Stylebridge CLI binary entry point.
//! Delegates to the library for linting and prints results.

use clap::Parser;
use std::io::Read;
use std::process::ExitCode;
use stylebridge::cli::{Cli, Commands};
use stylebridge::utils::{error_prefix, info_prefix, note_prefix};
use stylebridge::{config, lint, output};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Commands::Lint {
            patterns,
            repo_root,
            output,
            executable,
            working_dir,
            force,
        } => {
            let eff = match config::resolve_effective(
                repo_root.as_deref(),
                executable.as_deref(),
                working_dir.as_deref(),
                output.as_deref(),
            ) {
                Ok(eff) => eff,
                Err(e) => {
                    eprintln!("{} {}", error_prefix(), e);
                    return ExitCode::from(2);
                }
            };
            // Friendly note if no config was found
            if !eff.config_found && eff.output != "json" {
                eprintln!("{} No stylebridge.toml found; using defaults.", note_prefix());
            }
            let result = lint::run_lint(&eff, &patterns, force);
            if result.files.is_empty() && eff.output != "json" {
                eprintln!(
                    "{} No files matched {:?} under the selector '{}'.",
                    info_prefix(),
                    patterns,
                    eff.selector
                );
            }
            output::print_lint(&result, &eff.output);
            if result.files.iter().any(|f| f.error.is_some()) {
                ExitCode::from(2)
            } else if result.has_problems() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Commands::Parse {
            input,
            offset,
            output,
        } => {
            let (label, text) = match read_input(input.as_deref()) {
                Ok(v) => v,
                Err(e) => {
                    eprintln!("{} {}", error_prefix(), e);
                    return ExitCode::from(2);
                }
            };
            let mode = output.unwrap_or_else(|| "human".to_string());
            let result = lint::parse_output(&label, &text, offset);
            output::print_lint(&result, &mode);
            if result.has_problems() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
    }
}

fn read_input(path: Option<&str>) -> std::io::Result<(String, String)> {
    match path {
        Some(p) => Ok((p.to_string(), std::fs::read_to_string(p)?)),
        None => {
            let mut s = String::new();
            std::io::stdin().read_to_string(&mut s)?;
            Ok(("<stdin>".to_string(), s))
        }
    }
}
