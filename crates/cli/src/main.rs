//! BDIO CLI: inspect and verify BDIO protobuf archives.
//!
//! - `bdio header <archive>`: scan header and format version
//! - `bdio summary <archive>`: one line per entry with node counts
//! - `bdio verify <archive>`: decode and validate everything, exit 1 on failure

mod archive;
mod commands;
mod format;

use std::path::Path;
use std::process;

use anyhow::Result;
use bdio_protobuf::{BdioReader, ContainerFormat};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use archive::open_source;
use commands::build_cli;
use format::{
    format_error, format_header, format_summary, format_verified, EntrySummary, OutputMode,
};

fn main() {
    let matches = build_cli().get_matches();

    init_logging(matches.get_one::<String>("log").map(String::as_str));

    let mode = if matches.get_flag("json") {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    match run(&matches, mode) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            eprintln!("{}", format_error(&e, mode));
            process::exit(1);
        }
    }
}

/// Logs go to stderr so `--json` output stays parseable.
fn init_logging(level: Option<&str>) {
    let filter = level
        .and_then(|level| EnvFilter::try_new(level).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(matches: &clap::ArgMatches, mode: OutputMode) -> Result<String> {
    let format = matches
        .get_one::<String>("format")
        .map(|name| name.parse::<ContainerFormat>())
        .transpose()?;

    let (name, sub) = matches
        .subcommand()
        .ok_or_else(|| anyhow::anyhow!("No command given"))?;
    let path = sub
        .get_one::<String>("archive")
        .map(Path::new)
        .ok_or_else(|| anyhow::anyhow!("No archive given"))?;
    let mut reader = BdioReader::new(open_source(path, format)?);

    match name {
        "header" => {
            let header = reader.read_header()?;
            Ok(format_header(&header, mode))
        }
        "summary" => {
            let mut entries = Vec::new();
            while let Some(entry) = reader.next_entry()? {
                entries.push(EntrySummary::from(&entry));
            }
            Ok(format_summary(&entries, mode))
        }
        "verify" => {
            let contents = reader.read_all()?;
            Ok(format_verified(&contents, mode))
        }
        other => Err(anyhow::anyhow!("Unknown command: {}", other)),
    }
}
