//! A bimodal predictor: one table of counters indexed by the program counter.

use log::trace;

use crate::Outcome;
use crate::predictor::*;

/// A table of [SaturatingCounter] indexed by bits `[2, 2 + m2)` of the
/// program counter.
#[derive(Clone, Debug)]
pub struct BimodalPredictor {
    /// Number of index bits
    m2: usize,

    /// Table of counters
    data: Vec<SaturatingCounter>,

    /// Number of predictions made
    predictions: usize,

    /// Number of incorrect predictions
    mispredictions: usize,
}

impl BimodalPredictor {
    pub fn new(m2: usize) -> Self {
        Self {
            m2,
            data: counter_table(m2, SaturatingCounter::WEAKLY_TAKEN),
            predictions: 0,
            mispredictions: 0,
        }
    }

    pub fn index_bits(&self) -> usize { self.m2 }
    pub fn predictions(&self) -> usize { self.predictions }
    pub fn mispredictions(&self) -> usize { self.mispredictions }

    /// Make a prediction for the branch at `pc` and account for whether it
    /// matches the resolved `outcome`.
    ///
    /// The selected counter is only trained when `update` is set.
    pub fn predict(&mut self, pc: usize, outcome: Outcome, update: bool)
        -> Prediction
    {
        let idx = self.get_index(pc);
        let predicted = self.get_entry(idx).predict();

        self.predictions += 1;
        if predicted != outcome {
            self.mispredictions += 1;
        }
        trace!("bimodal pc={:08x} idx={} pred={:?} actual={:?}",
            pc, idx, predicted, outcome);

        if update {
            self.update_entry(idx, outcome);
        }
        Prediction { outcome: predicted, idx }
    }

    /// Train the counter at `idx` with the resolved outcome.
    pub fn update_entry(&mut self, idx: usize, outcome: Outcome) {
        self.get_entry_mut(idx).update(outcome);
    }

    /// Snapshot the counter table.
    pub fn dump(&self) -> TableDump {
        TableDump::new("BIMODAL", &self.data)
    }
}

impl PredictorTable for BimodalPredictor {
    type Input = usize;
    type Entry = SaturatingCounter;

    fn size(&self) -> usize { self.data.len() }

    fn get_index(&self, pc: usize) -> usize {
        pc_index(pc, self.m2)
    }

    fn get_entry(&self, idx: usize) -> &SaturatingCounter {
        let index = idx & self.index_mask();
        &self.data[index]
    }

    fn get_entry_mut(&mut self, idx: usize) -> &mut SaturatingCounter {
        let index = idx & self.index_mask();
        &mut self.data[index]
    }
}
