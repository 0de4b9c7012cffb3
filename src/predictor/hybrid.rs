//! A hybrid predictor that chooses between a [BimodalPredictor] and a
//! [GsharePredictor] with a table of meta-counters.

use log::trace;

use crate::Outcome;
use crate::predictor::*;

/// Identifies the sub-predictor whose prediction the [HybridPredictor] uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HybridProvider {
    /// The bimodal component
    Bimodal,

    /// The gshare component
    Gshare,
}

/// A bimodal and a gshare predictor, plus a "chooser" table indexed by bits
/// `[2, 2 + k)` of the program counter.
///
/// Chooser counters in the upper two states select gshare. All chooser
/// counters start at 1 (weakly selecting bimodal).
#[derive(Clone, Debug)]
pub struct HybridPredictor {
    /// Number of chooser index bits
    k: usize,

    /// Chooser table
    chooser: Vec<SaturatingCounter>,

    bimodal: BimodalPredictor,
    gshare: GsharePredictor,

    predictions: usize,
    mispredictions: usize,
}

impl HybridPredictor {
    pub fn new(k: usize, m1: usize, m2: usize, n: usize) -> Self {
        Self {
            k,
            chooser: counter_table(k, SaturatingCounter::WEAKLY_NOT_TAKEN),
            bimodal: BimodalPredictor::new(m2),
            gshare: GsharePredictor::new(m1, n),
            predictions: 0,
            mispredictions: 0,
        }
    }

    pub fn chooser_bits(&self) -> usize { self.k }
    pub fn bimodal(&self) -> &BimodalPredictor { &self.bimodal }
    pub fn gshare(&self) -> &GsharePredictor { &self.gshare }
    pub fn predictions(&self) -> usize { self.predictions }
    pub fn mispredictions(&self) -> usize { self.mispredictions }

    /// Return the sub-predictor currently selected for this program counter.
    pub fn provider_at(&self, pc: usize) -> HybridProvider {
        let idx = self.get_index(pc);
        if self.get_entry(idx).is_high() {
            HybridProvider::Gshare
        } else {
            HybridProvider::Bimodal
        }
    }

    /// Make a prediction for the branch at `pc`, then train the predictor
    /// with the resolved `outcome`.
    ///
    /// Both components are consulted without being trained (gshare still
    /// shifts the outcome into its history). Only the selected component has
    /// its counter updated afterwards.
    pub fn predict(&mut self, pc: usize, outcome: Outcome) -> Outcome {
        let bimodal = self.bimodal.predict(pc, outcome, false);
        let gshare = self.gshare.predict(pc, outcome, false);

        let chooser_idx = self.get_index(pc);
        let provider = self.provider_at(pc);
        let predicted = match provider {
            HybridProvider::Gshare => gshare.outcome,
            HybridProvider::Bimodal => bimodal.outcome,
        };

        self.predictions += 1;
        if predicted != outcome {
            self.mispredictions += 1;
        }
        trace!("hybrid pc={:08x} chooser[{}]={} provider={:?} pred={:?} actual={:?}",
            pc, chooser_idx, self.get_entry(chooser_idx).value(), provider,
            predicted, outcome);

        match provider {
            HybridProvider::Gshare => self.gshare.update_entry(gshare.idx, outcome),
            HybridProvider::Bimodal => self.bimodal.update_entry(bimodal.idx, outcome),
        }

        // The chooser only moves when exactly one component was correct.
        let gshare_hit = gshare.outcome == outcome;
        let bimodal_hit = bimodal.outcome == outcome;
        let choice = self.get_entry_mut(chooser_idx);
        match (gshare_hit, bimodal_hit) {
            (true, false) => choice.increment(),
            (false, true) => choice.decrement(),
            _ => {},
        }

        predicted
    }

    /// Snapshot the chooser, gshare, and bimodal tables (in that order).
    pub fn dump(&self) -> Vec<TableDump> {
        vec![
            TableDump::new("CHOOSER", &self.chooser),
            self.gshare.dump(),
            self.bimodal.dump(),
        ]
    }
}

impl PredictorTable for HybridPredictor {
    type Input = usize;
    type Entry = SaturatingCounter;

    fn size(&self) -> usize { self.chooser.len() }

    fn get_index(&self, pc: usize) -> usize {
        pc_index(pc, self.k)
    }

    fn get_entry(&self, idx: usize) -> &SaturatingCounter {
        let index = idx & self.index_mask();
        &self.chooser[index]
    }

    fn get_entry_mut(&mut self, idx: usize) -> &mut SaturatingCounter {
        let index = idx & self.index_mask();
        &mut self.chooser[index]
    }
}
