//! sampcopy: copy a random sample of files out of a directory tree.
//!
//! Thin binary entry point. All logic lives in the library crate.

use std::path::PathBuf;

use clap::Parser;
use sampcopy::SampleConfig;

#[derive(Parser)]
#[clap(version, about = "Copies a random sample of files, drawn with replacement, into a directory", long_about = None)]
struct Cli {
    /// Directory tree to sample from
    source_dir: PathBuf,
    /// Existing directory to copy into
    dest_dir: PathBuf,
    /// Number of draws
    count: usize,
    /// Maximum concurrent copies [default: logical CPU count]
    #[clap(short, long)]
    workers: Option<usize>,
    /// Fix the random seed to reproduce a selection
    #[clap(short, long)]
    seed: Option<u64>,
    /// Maximum directory depth to descend
    #[clap(short = 'd', long)]
    max_depth: Option<usize>,
    /// Descend into symlinked directories
    #[clap(short = 'L', long)]
    follow_links: bool,
    /// Only sample files with this extension (repeatable)
    #[clap(short, long = "ext")]
    ext: Vec<String>,
    /// Be verbose
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    let mut config = SampleConfig::new(cli.source_dir, cli.dest_dir, cli.count);
    if let Some(workers) = cli.workers {
        config.workers = workers;
    }
    config.seed = cli.seed;
    config.max_depth = cli.max_depth;
    config.follow_links = cli.follow_links;
    config.extensions = cli.ext;

    let report = config.into_builder()?.run()?;

    println!(
        "{} attempted, {} copied, {} failed, {} bytes from {} files in {:.3}s (seed {})",
        report.attempted,
        report.succeeded,
        report.failed,
        report.bytes_copied,
        report.index_len,
        report.stats.duration.as_secs_f64(),
        report.seed,
    );

    Ok(())
}
