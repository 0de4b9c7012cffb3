//! Types for implementing a table of predictors.

use std::fmt;

use crate::predictor::counter::*;

/// Interface to a table of predictors.
pub trait PredictorTable {
    /// The type of input to the table used to form an index.
    type Input;

    /// The type of entry in the table.
    type Entry;

    /// Returns the number of entries in the table.
    fn size(&self) -> usize;

    /// Given some input, return the corresponding index into the table.
    fn get_index(&self, input: Self::Input) -> usize;

    /// Returns a reference to an entry in the table.
    fn get_entry(&self, idx: usize) -> &Self::Entry;

    /// Returns a mutable reference to an entry in the table.
    fn get_entry_mut(&mut self, idx: usize) -> &mut Self::Entry;

    /// Returns a bitmask corresponding to the number of entries in the table.
    fn index_mask(&self) -> usize {
        assert!(self.size().is_power_of_two());
        self.size() - 1
    }
}

/// Allocate a table of `2^bits` counters in the same state.
pub fn counter_table(bits: usize, init: SaturatingCounter)
    -> Vec<SaturatingCounter>
{
    vec![init; 1 << bits]
}

/// Select bits `[2, 2 + bits)` from a program counter value.
///
/// The bottom two bits are dropped since branches are word-aligned.
pub fn pc_index(pc: usize, bits: usize) -> usize {
    (pc >> 2) & ((1 << bits) - 1)
}

/// A snapshot of the contents of a counter table, in index order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableDump {
    /// Name used when reporting the table
    pub name: &'static str,

    /// Pairs of (index, counter value)
    pub entries: Vec<(usize, u8)>,
}
impl TableDump {
    pub fn new(name: &'static str, data: &[SaturatingCounter]) -> Self {
        let entries = data.iter().enumerate()
            .map(|(idx, ctr)| (idx, ctr.value()))
            .collect();
        Self { name, entries }
    }

    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Return the counter value at some index.
    pub fn value(&self, idx: usize) -> Option<u8> {
        self.entries.get(idx).map(|(_, v)| *v)
    }
}

impl fmt::Display for TableDump {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "FINAL {} CONTENTS", self.name)?;
        for (idx, val) in self.entries.iter() {
            writeln!(f, "{}  {}", idx, val)?;
        }
        Ok(())
    }
}
