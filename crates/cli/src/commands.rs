//! Clap command tree definition.

use clap::{Arg, ArgAction, Command};

/// Build the complete CLI command tree.
pub fn build_cli() -> Command {
    Command::new("bdio")
        .about("Inspect and verify BDIO protobuf archives")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("format")
                .long("format")
                .help("Container format (default: detected from the file)")
                .value_parser(["zip", "tar-zstd"])
                .global(true),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("JSON output mode")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("log")
                .long("log")
                .help("Log filter, e.g. debug or bdio::reader=trace (default: RUST_LOG or warn)")
                .global(true),
        )
        .subcommand(build_header())
        .subcommand(build_summary())
        .subcommand(build_verify())
}

fn archive_arg() -> Arg {
    Arg::new("archive")
        .help("Path to the archive")
        .required(true)
}

fn build_header() -> Command {
    Command::new("header")
        .about("Print the scan header and its format version")
        .arg(archive_arg())
}

fn build_summary() -> Command {
    Command::new("summary")
        .about("List entries with their type, version, size and node counts")
        .arg(archive_arg())
}

fn build_verify() -> Command {
    Command::new("verify")
        .about("Decode and validate every entry")
        .arg(archive_arg())
}
