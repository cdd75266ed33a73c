use std::io::{self, Write};
use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use log::debug;
use serde_json::json;

use prompted_line::cli::config::{load_config, CAPACITY_ENV};
use prompted_line::{read_prompted_line_with, LineReader, OverflowPolicy, ReaderConfig, UserInput};

#[derive(Parser)]
#[command(author, about, long_about = None)]
#[command(disable_version_flag = true)]
struct Cli {
    /// Text written verbatim before reading
    #[arg(short, long, default_value = "")]
    prompt: String,

    /// Scratch buffer size in bytes, terminator slot included
    #[arg(short, long)]
    capacity: Option<usize>,

    /// What to do with lines that do not fit
    #[arg(long, value_enum)]
    overflow: Option<OverflowPolicy>,

    /// Config file (defaults to ~/.config/prompted-line/config.yaml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the prompt to stderr so stdout carries only the line
    #[arg(long)]
    stderr: bool,

    /// Print the line as a JSON object; `line` is a string when the input is
    /// valid UTF-8 and an array of byte values otherwise
    #[arg(long)]
    json: bool,

    /// Log level
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Show version information
    #[arg(short = 'V', long)]
    version: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.version {
        print_version();
        return Ok(());
    }

    env_logger::Builder::new()
        .parse_filters(&cli.log_level.to_lowercase())
        .init();

    let config = effective_config(&cli)?;
    debug!("using {:?}", config);

    let input = read_line(&cli, config)?;

    if input.eof && atty::is(atty::Stream::Stdin) {
        eprintln!();
    }
    if input.to_exit() {
        std::process::exit(1);
    }

    let mut out = io::stdout().lock();
    if cli.json {
        let line = match std::str::from_utf8(input.as_bytes()) {
            Ok(text) => json!(text),
            Err(_) => json!(input.as_bytes()),
        };
        let value = json!({
            "line": line,
            "truncated": input.truncated,
            "eof": input.eof,
        });
        serde_json::to_writer(&mut out, &value)?;
    } else {
        out.write_all(input.as_bytes())?;
    }
    writeln!(out)?;
    out.flush()?;

    Ok(())
}

/// Flags win over the environment, which wins over the config file.
fn effective_config(cli: &Cli) -> Result<ReaderConfig> {
    let mut config = load_config(cli.config.as_deref()).context("Failed to load config")?;

    if let Ok(value) = std::env::var(CAPACITY_ENV) {
        config.capacity = value
            .trim()
            .parse()
            .with_context(|| format!("Invalid {}: {:?}", CAPACITY_ENV, value))?;
    }
    if let Some(capacity) = cli.capacity {
        config.capacity = capacity;
    }
    if let Some(overflow) = cli.overflow {
        config.overflow = overflow;
    }

    config.validate()?;
    Ok(config)
}

fn read_line(cli: &Cli, config: ReaderConfig) -> Result<UserInput> {
    if !cli.stderr {
        return Ok(read_prompted_line_with(&cli.prompt, &config)?);
    }

    let mut lines = LineReader::with_config(io::stdin().lock(), io::stderr().lock(), config)?;
    Ok(lines.read_prompted_line(&cli.prompt)?)
}

fn print_version() {
    println!(
        "{}: {}",
        "prompted-line".green(),
        env!("CARGO_PKG_VERSION").cyan().bold()
    );
}
