//! # Population Transition Engine
//!
//! A discrete-time Markov chain over never-smokers (N), smokers (S) and
//! ex-smokers (E):
//!
//! ```text
//! N[t+1] = (1 - a) N[t]
//! S[t+1] = S[t] + a N[t] - g S[t] + r E[t]
//! E[t+1] = E[t] + g S[t] - r E[t]
//! ```
//!
//! The base-year record is taken before the policy shock. The shock itself
//! moves smokers to ex-smokers once, before the first simulated year, and is
//! not reported as its own record.

use crate::error::SimulationError;
use crate::params::Configuration;
use crate::rates::{BaseRates, PolicyShock, TransitionRates};
use crate::record::{SimulationResult, YearRecord};
use crate::state::PopulationState;

/// Stepwise driver for one scenario.
///
/// # Fields
/// - `config`: validated scenario parameters.
/// - `state`: current stocks (post-shock once constructed).
/// - `rates`: calibrated rates, fixed for the whole horizon.
/// - `year`: calendar year `state` belongs to.
/// - `records`: every snapshot so far, starting with the pre-shock baseline.
#[derive(Debug, Clone)]
pub struct TransitionEngine {
    config: Configuration,
    state: PopulationState,
    rates: TransitionRates,
    year: i32,
    records: Vec<YearRecord>,
}

impl TransitionEngine {
    /// Validates the configuration, records the baseline, applies the
    /// immediate shock and calibrates the rates with the natural defaults.
    pub fn new(config: &Configuration) -> Result<Self, SimulationError> {
        Self::with_base_rates(config, &BaseRates::default())
    }

    pub fn with_base_rates(
        config: &Configuration,
        base: &BaseRates,
    ) -> Result<Self, SimulationError> {
        config.validate()?;

        let mut state = PopulationState::initial(config);
        let mut records = Vec::with_capacity(config.horizon_years as usize + 1);
        records.push(YearRecord::snapshot(config.base_year, &state, config));

        let shock = PolicyShock::from_config(config);
        state.apply_shock(&shock);
        let rates = TransitionRates::calibrate(base, &shock);

        Ok(Self {
            config: *config,
            state,
            rates,
            year: config.base_year,
            records,
        })
    }

    pub fn state(&self) -> &PopulationState {
        &self.state
    }

    pub fn rates(&self) -> &TransitionRates {
        &self.rates
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// The pre-shock base-year record.
    pub fn baseline(&self) -> &YearRecord {
        &self.records[0]
    }

    /// Years left before the horizon is reached.
    pub fn remaining_years(&self) -> u32 {
        let elapsed = (self.year - self.config.base_year) as u32;
        self.config.horizon_years.saturating_sub(elapsed)
    }

    /// Advances one year and returns the snapshot for the new year, or `None`
    /// once the horizon has been reached.
    pub fn step(&mut self) -> Option<YearRecord> {
        if self.remaining_years() == 0 {
            return None;
        }
        self.state.advance(&self.rates);
        self.year += 1;
        let record = YearRecord::snapshot(self.year, &self.state, &self.config);
        self.records.push(record.clone());
        Some(record)
    }

    /// Steps through whatever is left of the horizon and returns the full
    /// series.
    pub fn run(mut self) -> SimulationResult {
        while self.step().is_some() {}
        SimulationResult {
            records: self.records,
            rates: self.rates,
        }
    }
}

/// Runs a complete scenario. Either a full result or an
/// [`SimulationError::InvalidConfiguration`]; never a partial series.
pub fn run(config: &Configuration) -> Result<SimulationResult, SimulationError> {
    Ok(TransitionEngine::new(config)?.run())
}
