//! Three-compartment population stock: never-smokers, smokers, ex-smokers.

use serde::{Deserialize, Serialize};

use crate::params::Configuration;
use crate::rates::{PolicyShock, TransitionRates};

/// Population stocks in millions of people.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PopulationState {
    pub never_smokers: f64,
    pub smokers: f64,
    pub ex_smokers: f64,
}

/// Flows moved between compartments during one annual step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnualFlows {
    pub new_smokers: f64,
    pub quitters: f64,
    pub relapsers: f64,
}

impl PopulationState {
    /// State at t=0: nobody has quit yet.
    pub fn initial(config: &Configuration) -> Self {
        let total = config.total_population_millions;
        Self {
            never_smokers: total * (1.0 - config.initial_prevalence),
            smokers: total * config.initial_prevalence,
            ex_smokers: 0.0,
        }
    }

    pub fn total(&self) -> f64 {
        self.never_smokers + self.smokers + self.ex_smokers
    }

    /// Moves the immediate price responders from smokers to ex-smokers.
    /// Returns the number of shock quitters.
    pub fn apply_shock(&mut self, shock: &PolicyShock) -> f64 {
        let quitters = self.smokers * shock.immediate_quit_fraction();
        self.smokers -= quitters;
        self.ex_smokers += quitters;
        quitters
    }

    pub fn flows(&self, rates: &TransitionRates) -> AnnualFlows {
        AnnualFlows {
            new_smokers: self.never_smokers * rates.initiation,
            quitters: self.smokers * rates.cessation,
            relapsers: self.ex_smokers * rates.relapse,
        }
    }

    /// Advances the chain by one year. All flows are computed from the
    /// pre-step stocks.
    pub fn advance(&mut self, rates: &TransitionRates) -> AnnualFlows {
        let flows = self.flows(rates);
        *self = Self {
            never_smokers: self.never_smokers - flows.new_smokers,
            smokers: self.smokers + flows.new_smokers - flows.quitters + flows.relapsers,
            ex_smokers: self.ex_smokers + flows.quitters - flows.relapsers,
        };
        flows
    }

    /// Smokers as a percentage of the total population.
    pub fn prevalence_percent(&self, total_population: f64) -> f64 {
        self.smokers / total_population * 100.0
    }

    /// Annual health cost in billions. Stocks are in millions and costs are
    /// per person per year.
    pub fn annual_cost_billions(&self, cost_per_smoker: f64, cost_per_ex_smoker: f64) -> f64 {
        let cost = self.smokers * cost_per_smoker * 1_000_000.0
            + self.ex_smokers * cost_per_ex_smoker * 1_000_000.0;
        cost / 1_000_000_000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::BaseRates;

    const EPS: f64 = 1e-9;

    #[test]
    fn initial_state_splits_population() {
        let state = PopulationState::initial(&Configuration::default());
        assert!((state.smokers - 30.0).abs() < EPS);
        assert!((state.never_smokers - 170.0).abs() < EPS);
        assert_eq!(state.ex_smokers, 0.0);
    }

    #[test]
    fn shock_moves_smokers_to_ex_smokers() {
        let config = Configuration::default().with_tax_hike(50.0);
        let mut state = PopulationState::initial(&config);
        let quitters = state.apply_shock(&PolicyShock::from_config(&config));
        assert!((quitters - 6.0).abs() < EPS);
        assert!((state.smokers - 24.0).abs() < EPS);
        assert!((state.ex_smokers - 6.0).abs() < EPS);
        assert!((state.never_smokers - 170.0).abs() < EPS);
    }

    #[test]
    fn advance_uses_pre_step_stocks() {
        let config = Configuration::default();
        let rates = TransitionRates::calibrate(&BaseRates::default(), &PolicyShock::from_config(&config));
        let mut state = PopulationState::initial(&config);
        let flows = state.advance(&rates);

        assert!((flows.new_smokers - 1.7).abs() < EPS);
        assert!((flows.quitters - 1.2).abs() < EPS);
        assert_eq!(flows.relapsers, 0.0);
        assert!((state.never_smokers - 168.3).abs() < EPS);
        assert!((state.smokers - 30.5).abs() < EPS);
        assert!((state.ex_smokers - 1.2).abs() < EPS);
        assert!((state.total() - 200.0).abs() < EPS);
    }

    #[test]
    fn cost_is_reported_in_billions() {
        let state = PopulationState {
            never_smokers: 170.0,
            smokers: 30.0,
            ex_smokers: 2.0,
        };
        // 30M * 3500 + 2M * 1500 = 105e9 + 3e9
        assert!((state.annual_cost_billions(3500.0, 1500.0) - 108.0).abs() < EPS);
    }
}
