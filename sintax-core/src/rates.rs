//! Transition-rate calibration.
//!
//! The natural rates are perturbed once per run by the policy shock and held
//! constant for the whole horizon.

use serde::{Deserialize, Serialize};

use crate::params::Configuration;

/// Extra weight the price response carries on the cessation rate.
pub const CESSATION_RESPONSE_WEIGHT: f64 = 1.5;

/// Natural (pre-policy) annual transition probabilities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseRates {
    pub initiation: f64,
    pub cessation: f64,
    pub relapse: f64,
}

impl Default for BaseRates {
    fn default() -> Self {
        Self {
            initiation: 0.010,
            cessation: 0.040,
            relapse: 0.010,
        }
    }
}

/// The one-time price shock derived from a configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolicyShock {
    pub tax_decimal: f64,
    /// `tax_decimal * elasticity` when a tax hike is applied, otherwise 0.
    /// Non-positive for valid configurations.
    pub shock_factor: f64,
    price_elasticity: f64,
}

impl PolicyShock {
    pub fn from_config(config: &Configuration) -> Self {
        let tax_decimal = config.tax_decimal();
        let shock_factor = if tax_decimal > 0.0 {
            tax_decimal * config.price_elasticity
        } else {
            0.0
        };
        Self {
            tax_decimal,
            shock_factor,
            price_elasticity: config.price_elasticity,
        }
    }

    /// Fraction of current smokers who quit immediately when the price moves.
    pub fn immediate_quit_fraction(&self) -> f64 {
        self.shock_factor.abs()
    }

    pub fn impact_initiation(&self) -> f64 {
        1.0 + self.tax_decimal * self.price_elasticity
    }

    pub fn impact_cessation(&self) -> f64 {
        1.0 - self.tax_decimal * self.price_elasticity * CESSATION_RESPONSE_WEIGHT
    }

    pub fn impact_relapse(&self) -> f64 {
        1.0 + self.tax_decimal * self.price_elasticity
    }
}

/// Realized annual transition probabilities (alpha, gamma, rho).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionRates {
    /// alpha: never-smoker -> smoker.
    pub initiation: f64,
    /// gamma: smoker -> ex-smoker.
    pub cessation: f64,
    /// rho: ex-smoker -> smoker.
    pub relapse: f64,
}

impl TransitionRates {
    /// Applies the policy shock to the natural rates.
    ///
    /// Initiation and relapse are floored at zero. Cessation is not: an
    /// extreme shock can drive it negative, in which case the "quitters" flow
    /// runs backwards and adds smokers.
    pub fn calibrate(base: &BaseRates, shock: &PolicyShock) -> Self {
        Self {
            initiation: base.initiation * shock.impact_initiation().max(0.0),
            cessation: base.cessation * shock.impact_cessation(),
            relapse: base.relapse * shock.impact_relapse().max(0.0),
        }
    }

    /// Column-stochastic transition matrix over (N, S, E):
    ///
    /// ```text
    /// | 1-a   0    0  |
    /// |  a   1-g   r  |
    /// |  0    g   1-r |
    /// ```
    pub fn matrix(&self) -> [[f64; 3]; 3] {
        let (a, g, r) = (self.initiation, self.cessation, self.relapse);
        [
            [1.0 - a, 0.0, 0.0],
            [a, 1.0 - g, r],
            [0.0, g, 1.0 - r],
        ]
    }
}
