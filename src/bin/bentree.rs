//! bentree - validate, query and print bencode files.

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use bentree::bencode::{decode_with, BencodeError, DecodeOptions, Document, Format, NodeRef};
use bentree::constants::{DEFAULT_MAX_DEPTH, LOG_ENV};
use bentree::WidthProfile;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Decode a bencode file, optionally query it and print the result.
#[derive(Parser, Debug)]
#[command(name = "bentree", version, about = "Bencode validator and query tool")]
struct Args {
    /// Input file, or `-` for stdin.
    input: PathBuf,

    /// Path to select, such as `info.files[0].length`.
    query: Option<String>,

    /// Output format: bencode, json or json-pretty.
    #[arg(long, short)]
    format: Option<Format>,

    /// Maximum container nesting depth.
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: u32,

    /// Node width profile: narrow, compact or standard.
    #[arg(long, default_value = "standard")]
    profile: WidthProfile,
}

/// Logs go to stderr, filtered by `BENTREE_LOG` or else `RUST_LOG`.
fn init_tracing() {
    let filter = match std::env::var(LOG_ENV) {
        Ok(val) => EnvFilter::builder().parse_lossy(val),
        Err(_) => EnvFilter::from_default_env(),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_input(path: &Path) -> anyhow::Result<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut data = Vec::new();
        io::stdin()
            .read_to_end(&mut data)
            .context("failed to read stdin")?;
        return Ok(data);
    }
    std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

fn print_node(doc: &Document<'_>, node: NodeRef, format: Format) -> anyhow::Result<()> {
    let mut out = io::stdout().lock();
    doc.write_to(node, format, &mut out)?;
    if format != Format::Bencode {
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

fn report(err: &BencodeError) {
    if err.is_allocation() {
        eprintln!("out of memory: {err}");
    } else {
        eprintln!("invalid bencode: {err}");
    }
}

fn main() -> anyhow::Result<ExitCode> {
    init_tracing();
    let args = Args::parse();

    let data = read_input(&args.input)?;
    let options = DecodeOptions::default()
        .with_max_depth(args.max_depth)
        .with_profile(args.profile);

    let doc = match decode_with(&data, options) {
        Ok(doc) => doc,
        Err(e) => {
            report(&e);
            return Ok(ExitCode::FAILURE);
        }
    };
    eprintln!("valid: {} bytes, {} nodes", data.len(), doc.pool().len());

    let root = doc.root().context("decoded document has no root")?;
    match args.query {
        Some(query) => match doc.query(root, &query) {
            Ok(node) => print_node(&doc, node, args.format.unwrap_or_default())?,
            Err(e) => {
                tracing::debug!("Query failed: {}", e);
                eprintln!("'{query}' not found");
                return Ok(ExitCode::FAILURE);
            }
        },
        None => {
            if let Some(format) = args.format {
                print_node(&doc, root, format)?;
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
