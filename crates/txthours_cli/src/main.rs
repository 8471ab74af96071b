//! `txthours` command-line entry point.
//!
//! # Responsibility
//! - Read a day log from a file or stdin and print its hours table.
//! - Report the first problem in a rejected document and exit non-zero.

use anyhow::Context;
use clap::Parser;
use log::debug;
use std::io::Read;
use std::path::Path;
use txthours_core::{
    check_document, default_log_level, flush_logging, init_logging, process_document, LogTarget,
};

mod cli;
mod output;

use cli::{Cli, Commands};

const STDIN_MARKER: &str = "-";
const STDERR_LOG_LEVEL: &str = "warn";

fn main() {
    let outcome = run();
    // `exit` skips destructors; buffered file records must go out first.
    flush_logging();
    if let Err(error) = outcome {
        eprintln!("{}", error_line(&error));
        std::process::exit(1);
    }
}

fn error_line(error: &anyhow::Error) -> String {
    format!("txthours error: {error:#}")
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_cli_logging(cli.log_level.as_deref(), cli.log_dir.as_deref())?;

    match cli.command {
        Commands::Summarize(args) => {
            let (label, text) = read_input(args.input.path.as_deref())?;
            debug!(
                "event=cli_summarize module=cli format={:?} bytes={}",
                args.format,
                text.len()
            );
            let result = process_document(&text)
                .with_context(|| format!("failed to summarize {label}"))?;
            println!("{}", output::render_summary(&result, args.format)?);
        }
        Commands::Check(args) => {
            let (label, text) = read_input(args.path.as_deref())?;
            debug!("event=cli_check module=cli bytes={}", text.len());
            let stats =
                check_document(&text).with_context(|| format!("failed to check {label}"))?;
            println!("{}", output::render_stats(&stats));
        }
    }
    Ok(())
}

fn init_cli_logging(level: Option<&str>, log_dir: Option<&str>) -> anyhow::Result<()> {
    let target = LogTarget::from_dir(log_dir).map_err(anyhow::Error::msg)?;
    // stderr shares the terminal with the table; keep it quiet unless asked.
    let level = level.unwrap_or(match target {
        LogTarget::Stderr => STDERR_LOG_LEVEL,
        LogTarget::Directory(_) => default_log_level(),
    });
    init_logging(level, target)
        .map_err(anyhow::Error::msg)
        .context("failed to initialize logging")
}

/// Returns a display label and the full input text.
fn read_input(path: Option<&Path>) -> anyhow::Result<(String, String)> {
    match path {
        Some(path) if path.as_os_str() != STDIN_MARKER => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Ok((path.display().to_string(), text))
        }
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(("stdin".to_string(), text))
        }
    }
}
