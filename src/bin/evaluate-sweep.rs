//! Sweep the table size of a bimodal or gshare predictor over one or more
//! traces.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};

use bpsim::*;
use bpsim::sim::simulate;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Scheme {
    Bimodal,
    Gshare,
}

#[derive(Parser)]
#[command(version, about = "Sweep predictor table sizes")]
struct Cli {
    /// Predictor to evaluate
    #[arg(long, value_enum, default_value_t = Scheme::Bimodal)]
    scheme: Scheme,

    /// Smallest number of index bits
    #[arg(long, default_value_t = 1)]
    min_bits: usize,

    /// Largest number of index bits
    #[arg(long, default_value_t = 15)]
    max_bits: usize,

    /// Global history length for gshare (capped at the index width)
    #[arg(long, default_value_t = 8)]
    history: usize,

    /// Trace files
    #[arg(required = true)]
    traces: Vec<PathBuf>,
}

impl Cli {
    fn config(&self, bits: usize) -> PredictorConfig {
        match self.scheme {
            Scheme::Bimodal => PredictorConfig::Bimodal { m2: bits },
            Scheme::Gshare => PredictorConfig::Gshare {
                m1: bits, n: self.history.min(bits)
            },
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    if cli.min_bits > cli.max_bits {
        bail!("--min-bits ({}) is larger than --max-bits ({})",
            cli.min_bits, cli.max_bits);
    }

    for path in cli.traces.iter() {
        let trace = TextTrace::from_file(path)
            .with_context(|| format!("Failed to load trace {}", path.display()))?;
        println!("[*] {}, {} records", trace.name(), trace.num_entries());

        for bits in cli.min_bits..=cli.max_bits {
            let cfg = cli.config(bits);
            let mut predictor = cfg.build()?;
            let stat = simulate(&mut predictor, trace.as_slice());
            println!("  {:20} {:8} bits  {}/{} mispredicted ({:.2}%)",
                cfg.to_string(),
                cfg.storage_bits(),
                stat.global_miss(),
                stat.global_brns(),
                stat.miss_rate() * 100.0,
            );
        }
    }
    Ok(())
}
