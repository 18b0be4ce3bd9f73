//! Scenario parameters for a single engine run.
//!
//! A [`Configuration`] is an immutable value: build it once, validate it, and
//! hand it to the engine. Nothing in the engine reads ambient state.

use serde::{Deserialize, Serialize};

use crate::error::SimulationError;

/// Input bundle for one simulation run.
///
/// Population figures are in millions of people; costs are currency units per
/// person per year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    pub total_population_millions: f64,
    /// Initial smoker prevalence as a fraction in (0, 1).
    pub initial_prevalence: f64,
    /// Excise-tax increase in percent. 50.0 means +50%.
    pub tax_hike_percent: f64,
    /// Price elasticity of demand. Must be non-positive.
    pub price_elasticity: f64,
    pub cost_per_smoker: f64,
    pub cost_per_ex_smoker: f64,
    pub horizon_years: u32,
    pub base_year: i32,
}

pub const DEFAULT_TOTAL_POPULATION_MILLIONS: f64 = 200.0;
pub const DEFAULT_INITIAL_PREVALENCE: f64 = 0.15;
pub const DEFAULT_TAX_HIKE_PERCENT: f64 = 0.0;
pub const DEFAULT_PRICE_ELASTICITY: f64 = -0.40;
pub const DEFAULT_COST_PER_SMOKER: f64 = 3500.0;
pub const DEFAULT_COST_PER_EX_SMOKER: f64 = 1500.0;
pub const DEFAULT_HORIZON_YEARS: u32 = 15;
pub const DEFAULT_BASE_YEAR: i32 = 2025;

/// Longest horizon the engine will simulate.
pub const MAX_HORIZON_YEARS: u32 = 200;

impl Default for Configuration {
    fn default() -> Self {
        Self {
            total_population_millions: DEFAULT_TOTAL_POPULATION_MILLIONS,
            initial_prevalence: DEFAULT_INITIAL_PREVALENCE,
            tax_hike_percent: DEFAULT_TAX_HIKE_PERCENT,
            price_elasticity: DEFAULT_PRICE_ELASTICITY,
            cost_per_smoker: DEFAULT_COST_PER_SMOKER,
            cost_per_ex_smoker: DEFAULT_COST_PER_EX_SMOKER,
            horizon_years: DEFAULT_HORIZON_YEARS,
            base_year: DEFAULT_BASE_YEAR,
        }
    }
}

impl Configuration {
    pub fn with_tax_hike(mut self, tax_hike_percent: f64) -> Self {
        self.tax_hike_percent = tax_hike_percent;
        self
    }

    pub fn with_price_elasticity(mut self, price_elasticity: f64) -> Self {
        self.price_elasticity = price_elasticity;
        self
    }

    pub fn with_horizon(mut self, horizon_years: u32) -> Self {
        self.horizon_years = horizon_years;
        self
    }

    pub fn with_population(mut self, total_population_millions: f64, initial_prevalence: f64) -> Self {
        self.total_population_millions = total_population_millions;
        self.initial_prevalence = initial_prevalence;
        self
    }

    pub fn with_costs(mut self, cost_per_smoker: f64, cost_per_ex_smoker: f64) -> Self {
        self.cost_per_smoker = cost_per_smoker;
        self.cost_per_ex_smoker = cost_per_ex_smoker;
        self
    }

    /// Tax hike as a fraction (50% -> 0.5).
    pub fn tax_decimal(&self) -> f64 {
        self.tax_hike_percent / 100.0
    }

    /// Checks every field constraint, reporting the first violation.
    pub fn validate(&self) -> Result<(), SimulationError> {
        let finite = [
            ("total_population_millions", self.total_population_millions),
            ("initial_prevalence", self.initial_prevalence),
            ("tax_hike_percent", self.tax_hike_percent),
            ("price_elasticity", self.price_elasticity),
            ("cost_per_smoker", self.cost_per_smoker),
            ("cost_per_ex_smoker", self.cost_per_ex_smoker),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(SimulationError::invalid(field, "must be a finite number"));
            }
        }

        if self.total_population_millions <= 0.0 {
            return Err(SimulationError::invalid(
                "total_population_millions",
                "must be greater than 0",
            ));
        }
        if self.initial_prevalence <= 0.0 || self.initial_prevalence >= 1.0 {
            return Err(SimulationError::invalid(
                "initial_prevalence",
                "must be in (0,1)",
            ));
        }
        if self.tax_hike_percent < 0.0 {
            return Err(SimulationError::invalid(
                "tax_hike_percent",
                "must be greater than or equal to 0",
            ));
        }
        if self.price_elasticity > 0.0 {
            return Err(SimulationError::invalid(
                "price_elasticity",
                "must be less than or equal to 0",
            ));
        }
        if self.horizon_years < 1 || self.horizon_years > MAX_HORIZON_YEARS {
            return Err(SimulationError::invalid(
                "horizon_years",
                format!("must be between 1 and {MAX_HORIZON_YEARS}"),
            ));
        }
        if self.base_year.checked_add_unsigned(self.horizon_years).is_none() {
            return Err(SimulationError::invalid(
                "base_year",
                "base_year + horizon_years overflows the calendar",
            ));
        }
        Ok(())
    }
}
