use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::core::sequence::DEFAULT_SEQUENCE_LENGTH;
use crate::core::types::SampleId;
use crate::parsing::csv::parse_csv_file;
use crate::store::SampleStore;
use crate::synth;

#[derive(Args)]
pub struct GenerateArgs {
    /// Raw synthesis seed (bypasses metadata lookup)
    #[arg(long, conflicts_with_all = ["csv", "sample_id"])]
    pub seed: Option<u64>,

    /// Sample metadata CSV to look the sample up in
    #[arg(long, requires = "sample_id")]
    pub csv: Option<PathBuf>,

    /// Id of the sample to synthesize
    #[arg(long, requires = "csv")]
    pub sample_id: Option<String>,

    /// Sequence length
    #[arg(long, default_value_t = DEFAULT_SEQUENCE_LENGTH)]
    pub length: usize,
}

pub fn run(args: GenerateArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let (seed, sample_id) = resolve_seed(&args)?;

    if verbose {
        eprintln!("Using seed {seed} at length {}", args.length);
    }

    let sequence = synth::generate(seed, args.length);

    match format {
        OutputFormat::Text => println!("{sequence}"),
        OutputFormat::Json => {
            let output = serde_json::json!({
                "seed": seed,
                "sample_id": sample_id,
                "length": sequence.len(),
                "sequence": sequence,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("seed\tlength\tsequence");
            println!("{seed}\t{}\t{sequence}", sequence.len());
        }
    }

    Ok(())
}

fn resolve_seed(args: &GenerateArgs) -> anyhow::Result<(u64, Option<String>)> {
    if let Some(seed) = args.seed {
        return Ok((seed, None));
    }

    let (Some(csv), Some(sample_id)) = (&args.csv, &args.sample_id) else {
        anyhow::bail!("Provide either --seed or both --csv and --sample-id");
    };

    let report = parse_csv_file(csv)?;
    let mut store = SampleStore::new();
    for record in report.records {
        store.insert(record);
    }

    let id = SampleId::new(sample_id.as_str());
    let record = store.lookup(&id)?;
    let seed = synth::derive_seed(record)?;
    Ok((seed, Some(sample_id.clone())))
}
