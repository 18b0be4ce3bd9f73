//! # sintax-core
//!
//! Population transition engine for tobacco excise-tax scenarios.
//!
//! A three-state Markov model (never-smokers, smokers, ex-smokers) whose
//! transition rates are perturbed once by a price-elasticity-driven policy
//! shock. The engine is a pure function from [`Configuration`] to
//! [`SimulationResult`]: no I/O, no global state.
//!
//! ### Key Submodules:
//! - `params`: immutable scenario configuration and its validation
//! - `rates`: natural rates, policy shock, calibrated transition rates
//! - `state`: population stocks and the annual update
//! - `record`: year records, results and scenario summaries
//! - `engine`: stepwise driver and the `run` entry point

pub mod engine;
pub mod error;
pub mod params;
pub mod rates;
pub mod record;
pub mod state;

pub mod prelude {
    pub use crate::engine::*;
    pub use crate::error::*;
    pub use crate::params::*;
    pub use crate::rates::*;
    pub use crate::record::*;
    pub use crate::state::*;
}

pub use engine::{run, TransitionEngine};
pub use error::SimulationError;
pub use params::Configuration;
pub use rates::{BaseRates, PolicyShock, TransitionRates};
pub use record::{ScenarioSummary, SimulationResult, YearRecord};
pub use state::PopulationState;
