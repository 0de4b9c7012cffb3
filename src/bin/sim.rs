//! Run a bimodal, gshare, or hybrid predictor against a trace and print
//! the final statistics and table contents.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;

use bpsim::*;
use bpsim::report::{self, Report};
use bpsim::sim::simulate;

#[derive(Parser)]
#[command(name = "sim", version, about = "Trace-driven branch predictor simulator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Bimodal predictor: sim bimodal <M2> <tracefile>
    Bimodal {
        /// Number of PC bits used to index the table
        m2: usize,
        trace: PathBuf,
        #[command(flatten)]
        opts: Options,
    },

    /// Gshare predictor: sim gshare <M1> <N> <tracefile>
    Gshare {
        /// Number of PC bits used to index the table
        m1: usize,
        /// Number of global history bits (0 uses a bimodal predictor)
        n: usize,
        trace: PathBuf,
        #[command(flatten)]
        opts: Options,
    },

    /// Hybrid predictor: sim hybrid <K> <M1> <N> <M2> <tracefile>
    Hybrid {
        /// Number of PC bits used to index the chooser table
        k: usize,
        /// Number of PC bits used to index the gshare table
        m1: usize,
        /// Number of global history bits
        n: usize,
        /// Number of PC bits used to index the bimodal table
        m2: usize,
        trace: PathBuf,
        #[command(flatten)]
        opts: Options,
    },
}

#[derive(Args)]
struct Options {
    /// Also list up to this many frequently executed branches with a hit
    /// rate at or below 50%
    #[arg(long, value_name = "COUNT")]
    branch_stats: Option<usize>,
}

impl Command {
    fn split(self) -> (PredictorConfig, PathBuf, Options) {
        match self {
            Self::Bimodal { m2, trace, opts } => {
                (PredictorConfig::Bimodal { m2 }, trace, opts)
            },
            Self::Gshare { m1, n, trace, opts } => {
                (PredictorConfig::Gshare { m1, n }, trace, opts)
            },
            Self::Hybrid { k, m1, n, m2, trace, opts } => {
                (PredictorConfig::Hybrid { k, m1, n, m2 }, trace, opts)
            },
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let (cfg, path, opts) = cli.command.split();

    let mut predictor = cfg.build()
        .with_context(|| format!("Invalid predictor configuration '{}'", cfg))?;

    let trace = TextTrace::from_file(&path)
        .with_context(|| format!("Failed to load trace {}", path.display()))?;
    info!("loaded {} records from {}", trace.num_entries(), trace.name());

    let stat = simulate(&mut predictor, trace.as_slice());

    let program = std::env::args().next().unwrap_or_else(|| "sim".to_string());
    let command = format!("{} {} {}", program, cfg, path.display());
    print!("{}", Report::new(command, &predictor));

    if let Some(n) = opts.branch_stats {
        println!();
        print!("{}", report::low_rate_branches(&stat, n, 0.5));
    }
    Ok(())
}
