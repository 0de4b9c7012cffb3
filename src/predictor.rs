//! Implementations of different branch predictors.

pub mod table;
pub mod simple;
pub mod counter;
pub mod bimodal;
pub mod gshare;
pub mod hybrid;

pub use table::*;
pub use simple::*;
pub use counter::*;
pub use bimodal::*;
pub use gshare::*;
pub use hybrid::*;

use crate::Outcome;

/// Interface to a "trivial" predictor that guesses an outcome without
/// accepting feedback from the rest of the machine.
pub trait SimplePredictor {
    fn name(&self) -> &'static str;
    fn predict(&self) -> Outcome;
}

/// Output from a single table lookup: the predicted direction and the index
/// of the entry that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Prediction {
    /// A predicted direction
    pub outcome: Outcome,

    /// The index identifying the entry used to make this prediction
    pub idx: usize,
}

/// One of the supported direction predictors, as selected on the
/// command-line.
#[derive(Clone, Debug)]
pub enum Predictor {
    Bimodal(BimodalPredictor),
    Gshare(GsharePredictor),
    Hybrid(HybridPredictor),
}

impl Predictor {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bimodal(_) => "bimodal",
            Self::Gshare(_) => "gshare",
            Self::Hybrid(_) => "hybrid",
        }
    }

    /// Predict the branch at `pc` and train the predictor with the resolved
    /// `outcome`. Returns the predicted direction.
    pub fn access(&mut self, pc: usize, outcome: Outcome) -> Outcome {
        match self {
            Self::Bimodal(p) => p.predict(pc, outcome, true).outcome,
            Self::Gshare(p) => p.predict(pc, outcome, true).outcome,
            Self::Hybrid(p) => p.predict(pc, outcome),
        }
    }

    pub fn predictions(&self) -> usize {
        match self {
            Self::Bimodal(p) => p.predictions(),
            Self::Gshare(p) => p.predictions(),
            Self::Hybrid(p) => p.predictions(),
        }
    }

    pub fn mispredictions(&self) -> usize {
        match self {
            Self::Bimodal(p) => p.mispredictions(),
            Self::Gshare(p) => p.mispredictions(),
            Self::Hybrid(p) => p.mispredictions(),
        }
    }

    /// Snapshot every table owned by this predictor, in reporting order.
    pub fn tables(&self) -> Vec<TableDump> {
        match self {
            Self::Bimodal(p) => vec![p.dump()],
            Self::Gshare(p) => vec![p.dump()],
            Self::Hybrid(p) => p.dump(),
        }
    }
}
