//! Driving a predictor with a trace.

use log::debug;

use crate::branch::*;
use crate::predictor::*;
use crate::stats::*;

/// Feed every record into `predictor` in trace order, training it as we go.
///
/// The returned [BranchStats] agree with the predictor's own counters.
pub fn simulate(predictor: &mut Predictor, records: &[BranchRecord])
    -> BranchStats
{
    let mut stat = BranchStats::new();
    for record in records {
        let prediction = predictor.access(record.pc, record.outcome);
        stat.update(record, prediction);
    }
    debug!("{}: {}/{} mispredicted", predictor.name(),
        predictor.mispredictions(), predictor.predictions());
    stat
}

/// Evaluate a [SimplePredictor] against a trace.
pub fn simulate_simple(p: &impl SimplePredictor, records: &[BranchRecord])
    -> BranchStats
{
    let mut stat = BranchStats::new();
    for record in records {
        stat.update_global(record, p.predict());
    }
    stat
}
