//! Stateless baseline predictors.

use rand::Rng;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;

use crate::Outcome;
use crate::predictor::SimplePredictor;

/// A simple predictor with no state: randomly predict an outcome.
///
/// Seeding the generator makes a run reproducible.
pub struct RandomPredictor {
    rng: RefCell<StdRng>,
}
impl RandomPredictor {
    pub fn new() -> Self {
        Self { rng: RefCell::new(StdRng::from_entropy()) }
    }
    pub fn with_seed(seed: u64) -> Self {
        Self { rng: RefCell::new(StdRng::seed_from_u64(seed)) }
    }
}
impl Default for RandomPredictor {
    fn default() -> Self { Self::new() }
}
impl SimplePredictor for RandomPredictor {
    fn name(&self) -> &'static str { "RandomPredictor" }
    fn predict(&self) -> Outcome { self.rng.borrow_mut().gen::<bool>().into() }
}

/// A simple predictor with no state: always predict 'taken'.
pub struct TakenPredictor;
impl SimplePredictor for TakenPredictor {
    fn name(&self) -> &'static str { "TakenPredictor" }
    fn predict(&self) -> Outcome { Outcome::T }
}

/// A simple predictor with no state: always predict 'not-taken'.
pub struct NotTakenPredictor;
impl SimplePredictor for NotTakenPredictor {
    fn name(&self) -> &'static str { "NotTakenPredictor" }
    fn predict(&self) -> Outcome { Outcome::N }
}
