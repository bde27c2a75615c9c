use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;
use wamp_tools::{collect_captures, format_report_pretty, inspect_capture, normalize_capture};

#[derive(Parser)]
#[command(
    name = "wamp-tools",
    version,
    about = "WAMP capture inspection and normalization tools"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode a capture and report every message's fields.
    Inspect {
        /// Capture file, or a directory of captures.
        path: PathBuf,
        /// Fail on the first message that does not match its layout.
        #[arg(long)]
        strict: bool,
        /// Optional glob filter when inspecting a directory.
        #[arg(long)]
        glob: Option<String>,
        /// Output format.
        #[arg(long, value_enum, default_value_t = InspectFormat::Pretty)]
        format: InspectFormat,
    },
    /// Print the minimal re-encoding of every message in a capture.
    Normalize {
        /// Capture file.
        path: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum InspectFormat {
    Json,
    Pretty,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Inspect {
            path,
            strict,
            glob,
            format,
        } => {
            if path.is_dir() {
                for capture in collect_captures(&path, glob.as_deref())? {
                    println!("== {} ==", capture.display());
                    inspect_file(&capture, strict, format)?;
                }
            } else {
                inspect_file(&path, strict, format)?;
            }
        }
        Command::Normalize { path } => {
            let contents = read_capture(&path)?;
            let lines = normalize_capture(&contents)
                .with_context(|| format!("normalize {}", path.display()))?;
            for line in lines {
                println!("{line}");
            }
        }
    }
    Ok(())
}

fn read_capture(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("read capture {}", path.display()))
}

fn inspect_file(path: &Path, strict: bool, format: InspectFormat) -> Result<()> {
    let contents = read_capture(path)?;
    let reports = inspect_capture(&contents, strict)
        .with_context(|| format!("inspect {}", path.display()))?;
    tracing::info!(path = %path.display(), messages = reports.len(), "inspected capture");
    match format {
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&reports).context("serialize json")?;
            println!("{json}");
        }
        InspectFormat::Pretty => {
            for report in &reports {
                print!("{}", format_report_pretty(report));
            }
        }
    }
    Ok(())
}
