//! # sintax-engine
//!
//! Runtime shared by frontends: scenario runs, sweeps, report replay and
//! report export.

pub mod error;
pub mod report;
pub mod runtime;

pub use error::EngineError;
pub use report::{format_for_path, save_report, serialize, RunReport};
pub use runtime::{replay_report, run_simulation_mode, run_sweep_mode, simulate_scenario};
