use bitvec::prelude::*;

use crate::branch::Outcome;

/// A global branch history register.
///
/// Bit 0 is the least-significant bit of [HistoryRegister::value]. The most
/// recent outcome always lands in the top bit (index `len - 1`), and older
/// outcomes move toward bit 0 before falling off the end.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryRegister {
    data: BitVec<usize, Lsb0>,
    len: usize,
}

// NOTE: This *reverses* the all of the bits and presents them in a format
// where the leftmost bit is the most-significant (index n) and the rightmost
// bit is the least-significant (index 0).
impl std::fmt::Display for HistoryRegister {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let x: String = self.data.as_bitslice().iter().by_vals()
            .map(|b| if b { '1' } else { '0' })
            .rev()
            .collect();
        write!(f, "{}", x)
    }
}

impl HistoryRegister {
    /// Create a register with the specified length in bits.
    /// All bits in the register are initialized to zero.
    pub fn new(len: usize) -> Self {
        assert!(len <= usize::BITS as usize);
        Self {
            data: bitvec![usize, Lsb0; 0; len],
            len,
        }
    }

    pub fn len(&self) -> usize { self.len }
    pub fn is_empty(&self) -> bool { self.len == 0 }
    pub fn data(&self) -> &BitSlice<usize, Lsb0> { &self.data }
}

impl HistoryRegister {
    /// Return the register contents as an integer.
    pub fn value(&self) -> usize {
        if self.data.is_empty() { 0 } else { self.data.load_le::<usize>() }
    }

    /// Shift in a new outcome.
    ///
    /// Equivalent to `(value >> 1) | (outcome << (len - 1))`: every bit moves
    /// one position toward bit 0, the oldest bit is discarded, and the new
    /// outcome is written to the top bit.
    pub fn push(&mut self, outcome: Outcome) {
        if self.data.is_empty() {
            return;
        }
        self.data.shift_left(1);
        self.data.set(self.len - 1, outcome.into());
    }

    /// Clear all bits.
    pub fn clear(&mut self) {
        self.data.fill(false);
    }
}
