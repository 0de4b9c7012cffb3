//! A gshare predictor: one table of counters indexed by the program counter
//! XOR'ed with global history.

use log::trace;

use crate::Outcome;
use crate::history::*;
use crate::predictor::*;

/// A table of [SaturatingCounter] indexed by `m1` program counter bits, where
/// the upper `n` bits are XOR'ed with an `n`-bit [HistoryRegister].
#[derive(Clone, Debug)]
pub struct GsharePredictor {
    /// Number of index bits
    m1: usize,

    /// Number of global history bits
    n: usize,

    /// Table of counters
    data: Vec<SaturatingCounter>,

    /// Global branch history
    ghr: HistoryRegister,

    predictions: usize,
    mispredictions: usize,
}

impl GsharePredictor {
    /// Create a new predictor.
    ///
    /// Callers are expected to validate `1 <= n <= m1` first
    /// (see [crate::config::PredictorConfig]).
    pub fn new(m1: usize, n: usize) -> Self {
        assert!(n <= m1, "history length {} exceeds index width {}", n, m1);
        Self {
            m1,
            n,
            data: counter_table(m1, SaturatingCounter::WEAKLY_TAKEN),
            ghr: HistoryRegister::new(n),
            predictions: 0,
            mispredictions: 0,
        }
    }

    pub fn index_bits(&self) -> usize { self.m1 }
    pub fn history_bits(&self) -> usize { self.n }
    pub fn history(&self) -> &HistoryRegister { &self.ghr }
    pub fn predictions(&self) -> usize { self.predictions }
    pub fn mispredictions(&self) -> usize { self.mispredictions }

    /// Make a prediction for the branch at `pc` and account for whether it
    /// matches the resolved `outcome`.
    ///
    /// The selected counter is only trained when `update` is set, but the
    /// outcome is always shifted into global history.
    pub fn predict(&mut self, pc: usize, outcome: Outcome, update: bool)
        -> Prediction
    {
        let idx = self.get_index(pc);
        let predicted = self.get_entry(idx).predict();

        self.predictions += 1;
        if predicted != outcome {
            self.mispredictions += 1;
        }
        trace!("gshare pc={:08x} ghr={} idx={} pred={:?} actual={:?}",
            pc, self.ghr, idx, predicted, outcome);

        if update {
            self.update_entry(idx, outcome);
        }
        self.ghr.push(outcome);

        Prediction { outcome: predicted, idx }
    }

    /// Train the counter at `idx` with the resolved outcome.
    pub fn update_entry(&mut self, idx: usize, outcome: Outcome) {
        self.get_entry_mut(idx).update(outcome);
    }

    /// Snapshot the counter table.
    pub fn dump(&self) -> TableDump {
        TableDump::new("GSHARE", &self.data)
    }
}

impl PredictorTable for GsharePredictor {
    type Input = usize;
    type Entry = SaturatingCounter;

    fn size(&self) -> usize { self.data.len() }

    // The top 'n' bits of the PC index are XOR'ed with history, and the
    // remaining 'm1 - n' low bits pass through unchanged.
    fn get_index(&self, pc: usize) -> usize {
        let low_bits = self.m1 - self.n;
        let m_bits = pc_index(pc, self.m1);
        let n_bits = m_bits >> low_bits;
        let n_bits_xor = n_bits ^ self.ghr.value();
        (n_bits_xor << low_bits) | (m_bits & ((1 << low_bits) - 1))
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

#[cfg(test)]
mod test {
    use super::*;
    use crate::Outcome::{N, T};
    use rstest::rstest;

    #[test]
    fn worked_index_example() {
        // m_bits = 0b10, history = 0b01 -> index 0b11
        let mut gp = GsharePredictor::new(2, 2);
        gp.predict(0x0, T, false);
        gp.predict(0x0, N, false);
        assert_eq!(gp.history().value(), 0b01);

        let pc = 0b10 << 2;
        assert_eq!(gp.get_index(pc), 0b11);
        assert_eq!(gp.predict(pc, T, true).idx, 0b11);
        assert_eq!(gp.dump().value(0b11), Some(3));
    }

    #[rstest]
    // Partial history: only the top bit of a 4-bit index is hashed.
    #[case(4, 1, 0b1011, 0b1, 0b0011)]
    #[case(4, 1, 0b0011, 0b1, 0b1011)]
    #[case(4, 2, 0b0110, 0b11, 0b1010)]
    #[case(3, 3, 0b101, 0b110, 0b011)]
    fn index_formula(
        #[case] m1: usize,
        #[case] n: usize,
        #[case] m_bits: usize,
        #[case] history: usize,
        #[case] expected: usize,
    ) {
        let mut gp = GsharePredictor::new(m1, n);
        // Shift history in oldest-first so that it reads back as 'history'.
        for i in 0..n {
            gp.predict(0, ((history >> i) & 1 == 1).into(), false);
        }
        assert_eq!(gp.history().value(), history);
        assert_eq!(gp.get_index(m_bits << 2), expected);
    }

    #[test]
    fn high_pc_bits_are_ignored() {
        let gp = GsharePredictor::new(3, 2);
        assert_eq!(gp.get_index(0xffff_ff00 | (0b101 << 2)), 0b101);
    }

    #[test]
    fn history_advances_without_update() {
        let mut gp = GsharePredictor::new(3, 3);
        let before = gp.dump();
        gp.predict(0x4, T, false);
        gp.predict(0x4, T, false);
        assert_eq!(gp.history().value(), 0b110);
        assert_eq!(gp.dump(), before);
        assert_eq!(gp.predictions(), 2);
        assert_eq!(gp.mispredictions(), 0);
    }

    #[test]
    fn history_index_is_computed_before_shift() {
        let mut gp = GsharePredictor::new(2, 1);
        // History is empty: index is the plain PC bits.
        let p = gp.predict(0x4, T, true);
        assert_eq!(p.idx, 0b01);
        // History is now 1: the top index bit is flipped.
        let p = gp.predict(0x4, N, true);
        assert_eq!(p.idx, 0b11);
        assert_eq!(gp.dump().entries, vec![(0, 2), (1, 3), (2, 2), (3, 1)]);
        assert_eq!(gp.mispredictions(), 1);
    }
}
