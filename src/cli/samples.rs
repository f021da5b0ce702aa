use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::core::sample::SampleRecord;
use crate::parsing::csv::parse_csv_file;

#[derive(Args)]
pub struct SamplesArgs {
    /// Sample metadata CSV (columns: id, region, age, seed)
    #[arg(required = true)]
    pub csv: PathBuf,
}

pub fn run(args: SamplesArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let report = parse_csv_file(&args.csv)?;

    if verbose && report.skipped > 0 {
        eprintln!("Skipped {} malformed rows", report.skipped);
    }

    match format {
        OutputFormat::Text => print_text(&report.records, report.skipped),
        OutputFormat::Json => {
            let output = serde_json::json!({
                "count": report.records.len(),
                "skipped": report.skipped,
                "samples": report.records,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => print_tsv(&report.records),
    }

    Ok(())
}

fn print_text(records: &[SampleRecord], skipped: usize) {
    println!("Samples ({} records)", records.len());
    println!("{}", "=".repeat(40));
    for record in records {
        println!(
            "{}  region={}  age={}  seed={}",
            record.id, record.region, record.age, record.seed_tag
        );
    }
    if skipped > 0 {
        println!("\n{skipped} malformed rows skipped");
    }
}

fn print_tsv(records: &[SampleRecord]) {
    println!("id\tregion\tage\tseed");
    for record in records {
        println!(
            "{}\t{}\t{}\t{}",
            record.id, record.region, record.age, record.seed_tag
        );
    }
}
