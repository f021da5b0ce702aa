use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::compare::SimilarityResult;
use crate::core::sequence::DEFAULT_SEQUENCE_LENGTH;
use crate::core::types::SampleId;
use crate::parsing::csv::parse_csv_file;
use crate::query::{QueryFacade, SequenceCache};
use crate::store::SampleStore;
use crate::{compare, synth};

#[derive(Args)]
pub struct CompareArgs {
    /// First sample id (or raw seed with --seeds)
    #[arg(required = true)]
    pub id1: String,

    /// Second sample id (or raw seed with --seeds)
    #[arg(required = true)]
    pub id2: String,

    /// Sample metadata CSV to look the samples up in
    #[arg(long, conflicts_with = "seeds")]
    pub csv: Option<PathBuf>,

    /// Treat the two arguments as raw u64 seeds instead of sample ids
    #[arg(long)]
    pub seeds: bool,

    /// Sequence length
    #[arg(long, default_value_t = DEFAULT_SEQUENCE_LENGTH)]
    pub length: usize,
}

pub fn run(args: CompareArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let result = if args.seeds {
        compare_raw_seeds(&args)?
    } else {
        compare_samples(&args)?
    };

    if verbose {
        eprintln!(
            "Compared {} positions, {} matched",
            result.compared_length, result.matches
        );
    }

    match format {
        OutputFormat::Text => print_text(&result),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Tsv => print_tsv(&result),
    }

    Ok(())
}

fn compare_raw_seeds(args: &CompareArgs) -> anyhow::Result<SimilarityResult> {
    let seed1: u64 = args
        .id1
        .parse()
        .map_err(|_| anyhow::anyhow!("'{}' is not a valid u64 seed", args.id1))?;
    let seed2: u64 = args
        .id2
        .parse()
        .map_err(|_| anyhow::anyhow!("'{}' is not a valid u64 seed", args.id2))?;

    let a = synth::generate(seed1, args.length);
    let b = synth::generate(seed2, args.length);
    Ok(compare::score_identified(
        SampleId::new(&args.id1),
        SampleId::new(&args.id2),
        &a,
        &b,
    ))
}

fn compare_samples(args: &CompareArgs) -> anyhow::Result<SimilarityResult> {
    let Some(csv) = &args.csv else {
        anyhow::bail!("--csv is required unless comparing raw seeds with --seeds");
    };

    let report = parse_csv_file(csv)?;
    let mut store = SampleStore::new();
    for record in report.records {
        store.insert(record);
    }

    let cache = SequenceCache::new();
    let facade = QueryFacade::new(&store, &cache).with_length(args.length);
    let result = facade.compare(&SampleId::new(&args.id1), &SampleId::new(&args.id2))?;
    Ok(result)
}

fn print_text(result: &SimilarityResult) {
    println!("Comparison Results");
    println!("{}", "=".repeat(40));
    println!("Sample 1: {}", result.id1);
    println!("Sample 2: {}", result.id2);
    println!(
        "Positions compared: {} ({} matching)",
        result.compared_length, result.matches
    );
    println!("Similarity: {:.2}%", result.similarity);
}

fn print_tsv(result: &SimilarityResult) {
    println!("id1\tid2\tcompared_length\tmatches\tsimilarity");
    println!(
        "{}\t{}\t{}\t{}\t{:.2}",
        result.id1, result.id2, result.compared_length, result.matches, result.similarity
    );
}
