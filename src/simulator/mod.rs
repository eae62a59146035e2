//! Balance simulator for Monte Carlo analysis.
//!
//! Runs many seeded auto-battles through `CombatSession` to analyze:
//! - Win, defeat and flee rates per class and location
//! - Fight length
//! - XP and gold income

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::SimReport;
pub use runner::{choose_action, run_simulation, simulate_single_run, RunStats};
