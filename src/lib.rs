//! A trace-driven simulator for bimodal, gshare, and hybrid branch
//! direction predictors.

pub mod branch;
pub mod config;
pub mod error;
pub mod history;
pub mod predictor;
pub mod report;
pub mod sim;
pub mod stats;
pub mod trace;

pub use branch::*;
pub use config::*;
pub use error::*;
pub use history::*;
pub use predictor::*;
pub use trace::*;
