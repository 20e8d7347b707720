// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Command-line interface for devhelp2qhp.
//!
//! This binary provides the `devhelp2qhp` command for turning a gtk-doc
//! `.devhelp2` index into a `.qhp` Qt Help Project next to it.

use devhelp2qhp::{convert, parser, project};
use lexopt::prelude::*;
use snafu::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Exit status for an unusable input file (`EX_SOFTWARE` in sysexits).
const EXIT_INPUT_UNAVAILABLE: i32 = 70;

struct Cli {
    source: PathBuf,
    namespace: String,
    version: String,
    quiet: bool,
    dry_run: bool,
}

#[derive(Debug, Snafu)]
enum Error {
    #[snafu(display("failed to parse arguments: {source}"))]
    ParseArgs { source: lexopt::Error },

    #[snafu(display("failed to read {}: {source}", path.display()))]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("failed to parse {}: {source}", path.display()))]
    ParseFile {
        path: PathBuf,
        source: parser::ParseError,
    },

    #[snafu(display("failed to serialize {}: {source}", path.display()))]
    Serialize {
        path: PathBuf,
        source: project::WriteError,
    },

    #[snafu(display("failed to write {}: {source}", path.display()))]
    WriteFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn print_help() {
    println!(
        "\
{name} {version}
Convert gtk-doc devhelp2 indexes to Qt Help Project files

Usage: {name} [OPTIONS] <SOURCE> <NAMESPACE> <VERSION>

Arguments:
  <SOURCE>     The .devhelp2 file; the .qhp file is written next to it
  <NAMESPACE>  Namespace identifier prefix (e.g., org.gtk.glib)
  <VERSION>    Version of the documented package (e.g., 2.80)

Options:
  -q, --quiet    Suppress progress messages
  -n, --dry-run  Show what would be written without writing
  -h, --help     Print help
  -V, --version  Print version",
        name = env!("CARGO_PKG_NAME"),
        version = env!("CARGO_PKG_VERSION"),
    );
}

fn parse_args() -> Result<Cli, lexopt::Error> {
    // Show help if no arguments provided
    if std::env::args().len() == 1 {
        print_help();
        std::process::exit(0);
    }

    let mut positional: Vec<String> = Vec::new();
    let mut quiet = false;
    let mut dry_run = false;

    let mut parser = lexopt::Parser::from_env();
    while let Some(arg) = parser.next()? {
        match arg {
            Short('q') | Long("quiet") => quiet = true,
            Short('n') | Long("dry-run") => dry_run = true,
            Short('h') | Long("help") => {
                print_help();
                std::process::exit(0);
            }
            Short('V') | Long("version") => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            Value(val) if positional.len() < 3 => positional.push(val.string()?),
            _ => return Err(arg.unexpected()),
        }
    }

    let mut positional = positional.into_iter();
    let source = positional.next().ok_or("missing required argument: <SOURCE>")?;
    let namespace = positional
        .next()
        .ok_or("missing required argument: <NAMESPACE>")?;
    let version = positional
        .next()
        .ok_or("missing required argument: <VERSION>")?;

    Ok(Cli {
        source: source.into(),
        namespace,
        version,
        quiet,
        dry_run,
    })
}

/// Checks that `path` is a regular file this process can open.
fn is_readable_file(path: &Path) -> bool {
    path.is_file() && File::open(path).is_ok()
}

fn main() -> Result<(), Error> {
    let cli = parse_args().context(ParseArgsSnafu)?;

    if !is_readable_file(&cli.source) {
        eprintln!(
            "{}: {} is not a readable file",
            env!("CARGO_PKG_NAME"),
            cli.source.display()
        );
        std::process::exit(EXIT_INPUT_UNAVAILABLE);
    }

    let out_path = convert::output_path(&cli.source);

    if cli.dry_run {
        eprintln!("Would write {}", out_path.display());
        return Ok(());
    }

    let source = &cli.source;
    let xml = std::fs::read_to_string(source).context(ReadFileSnafu { path: source })?;
    let devhelp = parser::parse_devhelp(&xml).context(ParseFileSnafu { path: source })?;

    let opts = convert::ConvertOptions {
        namespace: cli.namespace,
        version: cli.version,
    };
    let project = convert::convert(&devhelp, convert::asset_dir(source), &opts)
        .context(ParseFileSnafu { path: source })?;

    let output = project
        .to_xml()
        .context(SerializeSnafu { path: &out_path })?;
    std::fs::write(&out_path, output).context(WriteFileSnafu { path: &out_path })?;

    if !cli.quiet {
        eprintln!("Wrote {}", out_path.display());
    }
    Ok(())
}
