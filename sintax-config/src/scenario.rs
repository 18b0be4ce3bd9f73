//! Scenario parameters for the population transition engine.
//!
//! Mirrors [`sintax_core::Configuration`] with file/env friendly defaults and
//! declarative validation. Engine-level checks still run when the scenario is
//! simulated.

use serde::{Deserialize, Serialize};
use sintax_core::params::{
    DEFAULT_BASE_YEAR, DEFAULT_COST_PER_EX_SMOKER, DEFAULT_COST_PER_SMOKER,
    DEFAULT_HORIZON_YEARS, DEFAULT_INITIAL_PREVALENCE, DEFAULT_PRICE_ELASTICITY,
    DEFAULT_TAX_HIKE_PERCENT, DEFAULT_TOTAL_POPULATION_MILLIONS, MAX_HORIZON_YEARS,
};
use sintax_core::Configuration;
use validator::{self, Validate};

use crate::validation;

/// Scenario configuration.
#[derive(Debug, Serialize, Deserialize, Validate, Clone, PartialEq)]
pub struct ScenarioConfig {
    /// Total population (millions).
    #[validate(range(exclusive_min = 0.0, message = "must be greater than 0"))]
    #[validate(custom(function = validation::validate_finite))]
    #[serde(default = "default_total_population")]
    pub total_population_millions: f64,

    /// Initial smoker prevalence as a fraction.
    #[validate(custom(function = validation::validate_open_unit_interval))]
    #[serde(default = "default_initial_prevalence")]
    pub initial_prevalence: f64,

    /// Tax increase in percent.
    #[validate(range(min = 0.0, message = "must be greater than or equal to 0"))]
    #[validate(custom(function = validation::validate_finite))]
    #[serde(default = "default_tax_hike")]
    pub tax_hike_percent: f64,

    /// Price elasticity of demand (non-positive).
    #[validate(range(max = 0.0, message = "must be less than or equal to 0"))]
    #[validate(custom(function = validation::validate_finite))]
    #[serde(default = "default_price_elasticity")]
    pub price_elasticity: f64,

    /// Annual health cost per smoker.
    #[validate(range(min = 0.0, message = "must be greater than or equal to 0"))]
    #[validate(custom(function = validation::validate_finite))]
    #[serde(default = "default_cost_per_smoker")]
    pub cost_per_smoker: f64,

    /// Annual health cost per ex-smoker.
    #[validate(range(min = 0.0, message = "must be greater than or equal to 0"))]
    #[validate(custom(function = validation::validate_finite))]
    #[serde(default = "default_cost_per_ex_smoker")]
    pub cost_per_ex_smoker: f64,

    /// Years simulated after the base year.
    #[validate(range(min = 1, max = MAX_HORIZON_YEARS, message = "must be between 1 and 200"))]
    #[serde(default = "default_horizon_years")]
    pub horizon_years: u32,

    #[serde(default = "default_base_year")]
    pub base_year: i32,
}

fn default_total_population() -> f64 {
    DEFAULT_TOTAL_POPULATION_MILLIONS
}
fn default_initial_prevalence() -> f64 {
    DEFAULT_INITIAL_PREVALENCE
}
fn default_tax_hike() -> f64 {
    DEFAULT_TAX_HIKE_PERCENT
}
fn default_price_elasticity() -> f64 {
    DEFAULT_PRICE_ELASTICITY
}
fn default_cost_per_smoker() -> f64 {
    DEFAULT_COST_PER_SMOKER
}
fn default_cost_per_ex_smoker() -> f64 {
    DEFAULT_COST_PER_EX_SMOKER
}
fn default_horizon_years() -> u32 {
    DEFAULT_HORIZON_YEARS
}
fn default_base_year() -> i32 {
    DEFAULT_BASE_YEAR
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self::from(&Configuration::default())
    }
}

impl ScenarioConfig {
    /// Engine configuration for this scenario.
    pub fn to_engine(&self) -> Configuration {
        Configuration {
            total_population_millions: self.total_population_millions,
            initial_prevalence: self.initial_prevalence,
            tax_hike_percent: self.tax_hike_percent,
            price_elasticity: self.price_elasticity,
            cost_per_smoker: self.cost_per_smoker,
            cost_per_ex_smoker: self.cost_per_ex_smoker,
            horizon_years: self.horizon_years,
            base_year: self.base_year,
        }
    }
}

impl From<&Configuration> for ScenarioConfig {
    fn from(config: &Configuration) -> Self {
        Self {
            total_population_millions: config.total_population_millions,
            initial_prevalence: config.initial_prevalence,
            tax_hike_percent: config.tax_hike_percent,
            price_elasticity: config.price_elasticity,
            cost_per_smoker: config.cost_per_smoker,
            cost_per_ex_smoker: config.cost_per_ex_smoker,
            horizon_years: config.horizon_years,
            base_year: config.base_year,
        }
    }
}
