//! Types for representing branches and branch outcomes.

use bitvec::prelude::*;

/// A branch outcome.
#[repr(u32)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Outcome {
    /// Not taken
    N = 0,
    /// Taken
    T = 1
}

impl Outcome {
    pub fn vec_from_bitvec(bits: &BitVec) -> Vec<Self> {
        bits.iter().map(|b| (*b).into()).collect()
    }

    /// Decode an outcome from the first character of a trace token.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            't' => Some(Self::T),
            'n' => Some(Self::N),
            _ => None,
        }
    }
}

impl std::fmt::Debug for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            Self::T => "t",
            Self::N => "n",
        };
        write!(f, "{}", s)
    }
}

impl std::ops::Not for Outcome {
    type Output = Self;
    fn not(self) -> Self {
        match self {
            Self::N => Self::T,
            Self::T => Self::N,
        }
    }
}

impl From<bool> for Outcome {
    fn from(x: bool) -> Self {
        match x {
            true => Self::T,
            false => Self::N
        }
    }
}
impl From<Outcome> for bool {
    fn from(x: Outcome) -> bool {
        match x {
            Outcome::T => true,
            Outcome::N => false,
        }
    }
}

/// A record of branch execution read from a trace.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct BranchRecord {
    /// The program counter value for this branch
    pub pc: usize,

    /// The actual outcome evaluated for this branch
    pub outcome: Outcome,
}
impl BranchRecord {
    pub fn new(pc: usize, outcome: Outcome) -> Self {
        Self { pc, outcome }
    }
}
