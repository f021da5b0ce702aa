//! Command-line interface for paleoseq.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **generate**: Synthesize the sequence for a seed or a sample from a CSV
//! - **compare**: Similarity between two samples (or two raw seeds)
//! - **samples**: Parse a metadata CSV and list its records
//! - **serve**: Start the web server
//!
//! ## Usage
//!
//! ```text
//! # Sequence for a raw seed
//! paleoseq generate --seed 101 --length 10
//!
//! # Sequence for a sample from a metadata CSV
//! paleoseq generate --csv samples.csv --sample-id S001
//!
//! # Similarity between two samples
//! paleoseq compare --csv samples.csv S001 S002
//!
//! # JSON output for scripting
//! paleoseq samples samples.csv --format json
//!
//! # Start web UI
//! paleoseq serve --port 8080 --open
//! ```

use clap::{Parser, Subcommand};

pub mod compare;
pub mod generate;
pub mod samples;

#[derive(Parser)]
#[command(name = "paleoseq")]
#[command(version)]
#[command(about = "Deterministic synthetic DNA sequences from ancient-sample metadata")]
#[command(
    long_about = "paleoseq derives a reproducible synthetic DNA sequence for every sample in an \
                  uploaded metadata set.\n\nThe seed-to-sequence mapping is pinned (MD5 seed \
                  derivation + ChaCha8 generation), so the same sample always yields the \
                  byte-identical sequence, and any two samples get a stable position-wise \
                  similarity percentage."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Synthesize the sequence for a seed or sample
    Generate(generate::GenerateArgs),

    /// Compare two samples' sequences
    Compare(compare::CompareArgs),

    /// List samples from a metadata CSV
    Samples(samples::SamplesArgs),

    /// Start the web server
    Serve(ServeArgs),
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
