//! Output records produced by a simulation run.

use blake3::Hasher;
use serde::{Deserialize, Serialize};

use crate::params::Configuration;
use crate::rates::TransitionRates;
use crate::state::PopulationState;

/// One row of the output table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearRecord {
    pub year: String,
    pub prevalence_percent: f64,
    pub smokers_millions: f64,
    pub ex_smokers_millions: f64,
    pub cost_billions: f64,
}

impl YearRecord {
    pub fn snapshot(year: i32, state: &PopulationState, config: &Configuration) -> Self {
        Self {
            year: year.to_string(),
            prevalence_percent: state.prevalence_percent(config.total_population_millions),
            smokers_millions: state.smokers,
            ex_smokers_millions: state.ex_smokers,
            cost_billions: state
                .annual_cost_billions(config.cost_per_smoker, config.cost_per_ex_smoker),
        }
    }

    /// Never-smokers, reconstructed from the conserved total.
    pub fn never_smokers_millions(&self, total_population: f64) -> f64 {
        total_population - self.smokers_millions - self.ex_smokers_millions
    }
}

/// Complete output of one run: the base-year record followed by one record
/// per simulated year, plus the rates that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub records: Vec<YearRecord>,
    pub rates: TransitionRates,
}

/// Headline figures of a scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSummary {
    pub scenario_label: String,
    pub final_year: String,
    pub final_prevalence_percent: f64,
    /// Final prevalence minus initial prevalence, in percentage points.
    pub delta_prevalence_points: f64,
    /// Sum of annual costs over every record, base year included.
    pub cumulative_cost_billions: f64,
}

impl SimulationResult {
    pub fn base_record(&self) -> Option<&YearRecord> {
        self.records.first()
    }

    pub fn final_record(&self) -> Option<&YearRecord> {
        self.records.last()
    }

    pub fn cumulative_cost_billions(&self) -> f64 {
        self.records.iter().map(|r| r.cost_billions).sum()
    }

    pub fn transition_matrix(&self) -> [[f64; 3]; 3] {
        self.rates.matrix()
    }

    pub fn summary(&self, config: &Configuration) -> ScenarioSummary {
        let (final_year, final_prevalence) = self
            .final_record()
            .map(|r| (r.year.clone(), r.prevalence_percent))
            .unwrap_or_else(|| (config.base_year.to_string(), config.initial_prevalence * 100.0));

        ScenarioSummary {
            scenario_label: scenario_label(config.tax_hike_percent),
            final_year,
            final_prevalence_percent: final_prevalence,
            delta_prevalence_points: final_prevalence - config.initial_prevalence * 100.0,
            cumulative_cost_billions: self.cumulative_cost_billions(),
        }
    }

    /// BLAKE3 digest over the exact bit patterns of every record and rate.
    /// Two runs of the same configuration always produce the same value.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Hasher::new();
        for record in &self.records {
            hasher.update(record.year.as_bytes());
            for value in [
                record.prevalence_percent,
                record.smokers_millions,
                record.ex_smokers_millions,
                record.cost_billions,
            ] {
                hasher.update(&value.to_le_bytes());
            }
        }
        for rate in [self.rates.initiation, self.rates.cessation, self.rates.relapse] {
            hasher.update(&rate.to_le_bytes());
        }
        hex::encode(hasher.finalize().as_bytes())
    }
}

/// Label for a tax scenario, e.g. `+50%`.
pub fn scenario_label(tax_hike_percent: f64) -> String {
    format!("+{}%", tax_hike_percent)
}
