//! Helpers for collecting statistics.

use std::collections::*;
use crate::branch::*;
use bitvec::prelude::*;
use itertools::*;

/// Container for recording simple statistics while evaluating some model.
#[derive(Default)]
pub struct BranchStats {
    /// Per-branch statistics (indexed by program counter value).
    pub data: BTreeMap<usize, BranchData>,

    /// Number of correct predictions
    pub global_hits: usize,

    /// Number of times any branch instruction was executed
    pub global_brns: usize,
}
impl BranchStats {
    pub fn new() -> Self { Self::default() }

    /// Return the global hit rate.
    pub fn hit_rate(&self) -> f64 {
        if self.global_brns == 0 { return 0.0; }
        self.global_hits as f64 / self.global_brns as f64
    }

    /// Return the global miss rate.
    pub fn miss_rate(&self) -> f64 {
        if self.global_brns == 0 { return 0.0; }
        self.global_miss() as f64 / self.global_brns as f64
    }

    /// Return the global hit count.
    pub fn global_hits(&self) -> usize { self.global_hits }

    /// Return the global miss count.
    pub fn global_miss(&self) -> usize { self.global_brns - self.global_hits }

    /// Return the total branch count.
    pub fn global_brns(&self) -> usize { self.global_brns }

    /// Update global and per-branch statistics with a prediction for
    /// some record.
    pub fn update(&mut self, record: &BranchRecord, prediction: Outcome) {
        self.update_global(record, prediction);
        self.update_per_branch(record, prediction);
    }

    /// Update global statistics.
    pub fn update_global(&mut self, record: &BranchRecord, prediction: Outcome) {
        let hit = prediction == record.outcome;
        self.global_brns += 1;
        if hit { self.global_hits += 1; }
    }

    /// Update per-branch statistics.
    pub fn update_per_branch(&mut self,
        record: &BranchRecord, prediction: Outcome)
    {
        let hit = prediction == record.outcome;
        let data = self.get_mut(record.pc);
        data.occ += 1;
        data.pat.push(record.outcome.into());
        if hit { data.hits += 1; }
    }

    /// Returns a reference to data collected for a particular branch.
    pub fn get(&self, pc: usize) -> Option<&BranchData> {
        self.data.get(&pc)
    }

    /// Returns a mutable reference to data collected for a particular branch.
    /// Creates a new entry if one doesn't already exist.
    pub fn get_mut(&mut self, pc: usize) -> &mut BranchData {
        self.data.entry(pc).or_default()
    }

    /// Returns the number of unique observed branch instructions.
    pub fn num_unique_branches(&self) -> usize {
        self.data.len()
    }

    /// Returns the 'n' most frequently executed branches.
    pub fn get_common_branches(&self, n: usize) -> Vec<(usize, &BranchData)> {
        self.data.iter()
            .sorted_by_key(|(pc, s)| (std::cmp::Reverse(s.occ), **pc))
            .take(n)
            .map(|(pc, s)| (*pc, s))
            .collect()
    }

    /// Returns the 'n' most frequently executed branches with a hit rate at
    /// or below 'max_rate', ignoring branches seen fewer than 'min_occ' times.
    pub fn get_low_rate_branches(&self, n: usize, min_occ: usize, max_rate: f64)
        -> Vec<(usize, &BranchData)>
    {
        self.data.iter()
            .filter(|(_, s)| s.occ >= min_occ && s.hit_rate() <= max_rate)
            .sorted_by_key(|(pc, s)| (std::cmp::Reverse(s.occ), **pc))
            .take(n)
            .map(|(pc, s)| (*pc, s))
            .collect()
    }
}

/// Container for per-branch statistics.
#[derive(Default)]
pub struct BranchData {
    /// Number of times this branch was encountered.
    pub occ: usize,

    /// Number of correct predictions for this branch.
    pub hits: usize,

    /// Record of all observed outcomes for this branch.
    pub pat: BitVec,
}
impl BranchData {
    pub fn new() -> Self { Self::default() }

    /// Return the hit rate for this branch.
    pub fn hit_rate(&self) -> f64 {
        if self.occ == 0 { return 0.0; }
        self.hits as f64 / self.occ as f64
    }

    pub fn times_taken(&self) -> usize {
        self.pat.count_ones()
    }

    /// Return the most recent (up to) 'n' outcomes, oldest first.
    pub fn recent_outcomes(&self, n: usize) -> Vec<Outcome> {
        let start = self.pat.len().saturating_sub(n);
        Outcome::vec_from_bitvec(&self.pat[start..].to_bitvec())
    }

    // NOTE: Remember that this isn't too useful apart from telling you
    // whether some sequence of outcomes is mixed or uniform.
    pub fn shannon_entropy(&self) -> f64 {
        let n   = self.pat.len() as f64;
        let n_t = self.pat.count_ones();
        let n_f = self.pat.count_zeros();

        let p_t = (n_t as f64) / n;
        let p_f = (n_f as f64) / n;

        let res = -(p_t * p_t.log2() + p_f * p_f.log2());
        if res.is_nan() { 0.0 } else { res }
    }
}
