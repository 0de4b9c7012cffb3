//! Evaluate each [`SimplePredictor`] against one or more traces.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use bpsim::*;
use bpsim::predictor::simple;
use bpsim::sim::simulate_simple;

#[derive(Parser)]
#[command(version, about = "Evaluate static baseline predictors")]
struct Cli {
    /// Seed for the random predictor
    #[arg(long)]
    seed: Option<u64>,

    /// Trace files
    #[arg(required = true)]
    traces: Vec<PathBuf>,
}

fn run_test(records: &[BranchRecord], p: impl SimplePredictor) {
    let stat = simulate_simple(&p, records);
    println!("  {:20} Global hit rate: {}/{} ({:.2}% correct) ({} misses)",
        p.name(),
        stat.global_hits(),
        stat.global_brns(),
        stat.hit_rate() * 100.0,
        stat.global_miss()
    );
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    for path in cli.traces.iter() {
        let trace = TextTrace::from_file(path)
            .with_context(|| format!("Failed to load trace {}", path.display()))?;
        println!("[*] {}, {} records", trace.name(), trace.num_entries());

        let records = trace.as_slice();
        let random = match cli.seed {
            Some(seed) => simple::RandomPredictor::with_seed(seed),
            None => simple::RandomPredictor::new(),
        };
        run_test(records, random);
        run_test(records, simple::TakenPredictor);
        run_test(records, simple::NotTakenPredictor);
    }
    Ok(())
}
