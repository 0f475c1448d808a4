use crate::adapters::fs::reader::open_input;
use crate::app::dto::{RecordFilter, ScanOptions};
use crate::app::engine::MdgEngine;
use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "mdgtool",
    version,
    about = "Inspect co-change dependency files and Java entity descriptors"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging (RUST_LOG takes precedence when set)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a dependency file and print one JSON object per record
    Records {
        /// Dependency file; reads standard input when absent or `-`
        file: Option<PathBuf>,

        /// Pretty-print each record
        #[arg(long)]
        pretty: bool,

        /// Add the normalized query string of every entity
        #[arg(long)]
        normalize: bool,

        /// Skip lines that cannot be parsed instead of failing
        #[arg(long)]
        skip_invalid: bool,

        /// Drop records whose confidence is below this value
        #[arg(long)]
        min_confidence: Option<f64>,

        /// Drop records whose support count is below this value
        #[arg(long)]
        min_support: Option<u64>,
    },
    /// Print every derived view of one or more entity descriptors
    Describe {
        /// Raw entity descriptors
        #[arg(required = true)]
        descriptors: Vec<String>,

        /// Pretty-print each summary
        #[arg(long)]
        pretty: bool,
    },
}

pub fn run(cli: Cli, engine: &MdgEngine) -> Result<()> {
    match cli.command {
        Commands::Records {
            file,
            pretty,
            normalize,
            skip_invalid,
            min_confidence,
            min_support,
        } => {
            let options = ScanOptions {
                filter: RecordFilter {
                    min_confidence,
                    min_support,
                },
                normalize,
                skip_invalid,
            };
            print_records(engine, file.unwrap_or_else(|| PathBuf::from("-")), &options, pretty)
        }
        Commands::Describe {
            descriptors,
            pretty,
        } => describe_descriptors(engine, &descriptors, pretty),
    }
}

pub fn print_records(
    engine: &MdgEngine,
    file: PathBuf,
    options: &ScanOptions,
    pretty: bool,
) -> Result<()> {
    let reader = open_input(&file)?;
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    engine
        .scan_records(reader, options, |view| write_json(&mut out, &view, pretty))
        .with_context(|| format!("Failed to scan {}", file.display()))?;

    out.flush().context("Failed to flush output")?;
    Ok(())
}

pub fn describe_descriptors(engine: &MdgEngine, descriptors: &[String], pretty: bool) -> Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for raw in descriptors {
        write_json(&mut out, &engine.describe(raw), pretty)?;
    }
    out.flush().context("Failed to flush output")?;
    Ok(())
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}
