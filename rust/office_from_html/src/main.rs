use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use office_from_html::{run_batch, ConvertOptions, Format, Job, JOBS};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Directory holding the HTML inputs of the conversion table.
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// Directory for the generated files (defaults to --dir).
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Only run the jobs producing this format.
    #[arg(long, value_enum)]
    format: Option<Format>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let out_dir = args.out_dir.unwrap_or_else(|| args.dir.clone());
    let jobs: Vec<Job> = JOBS
        .iter()
        .filter(|j| args.format.map_or(true, |f| j.format == f))
        .copied()
        .collect();

    // Per-file failures are reported by the batch itself and never change
    // the exit status.
    run_batch(&args.dir, &out_dir, &jobs, &ConvertOptions::default());
    Ok(())
}
