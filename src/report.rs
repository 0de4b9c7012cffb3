//! Formatting the results of a simulation.

use std::fmt::{self, Write};

use itertools::Itertools;

use crate::predictor::*;
use crate::stats::*;

/// Width of the labels in the "OUTPUT" section.
const LABEL_WIDTH: usize = 27;

/// Final results for a predictor after running a trace.
#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    /// The command used to configure the run
    pub command: String,

    pub predictions: usize,
    pub mispredictions: usize,

    /// Final contents of each table, in the order they are printed
    pub tables: Vec<TableDump>,
}

impl Report {
    pub fn new(command: impl Into<String>, predictor: &Predictor) -> Self {
        Self {
            command: command.into(),
            predictions: predictor.predictions(),
            mispredictions: predictor.mispredictions(),
            tables: predictor.tables(),
        }
    }

    /// Misprediction rate as a percentage. Zero when nothing was predicted.
    ///
    /// This is computed in single precision so that the rounded output
    /// matches results produced by the reference simulator.
    pub fn misprediction_rate(&self) -> f32 {
        if self.predictions == 0 {
            return 0.0;
        }
        (self.mispredictions as f32 / self.predictions as f32) * 100.0
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "COMMAND")?;
        writeln!(f, "{}", self.command)?;
        writeln!(f, "OUTPUT")?;
        writeln!(f, "{:<w$}{}", "number of predictions:", self.predictions,
            w = LABEL_WIDTH)?;
        writeln!(f, "{:<w$}{}", "number of mispredictions:", self.mispredictions,
            w = LABEL_WIDTH)?;
        writeln!(f, "{:<w$}{:.2}%", "misprediction rate:",
            self.misprediction_rate(), w = LABEL_WIDTH)?;
        for table in self.tables.iter() {
            write!(f, "{}", table)?;
        }
        Ok(())
    }
}

/// Format the most frequently executed branches whose hit rate is at or
/// below 'max_rate', along with their most recent outcomes.
pub fn low_rate_branches(stat: &BranchStats, n: usize, max_rate: f64) -> String {
    let mut res = String::new();
    let branches = stat.get_low_rate_branches(n, 2, max_rate);
    let _ = writeln!(res, "LOW ACCURACY BRANCHES ({} of {} unique)",
        branches.len(), stat.num_unique_branches());
    for (pc, data) in branches {
        let pat = data.recent_outcomes(32).iter()
            .map(|o| format!("{:?}", o))
            .join("");
        let _ = writeln!(res, "  {:08x}: {:6}/{:6} ({:.4}) H={:.2} {}",
            pc, data.hits, data.occ, data.hit_rate(), data.shannon_entropy(),
            pat);
    }
    res
}
