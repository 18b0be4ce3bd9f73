//! # Sintax Configuration System
//!
//! Hierarchical configuration for tax-scenario runs.
//!
//! ## Features
//! - **Unified Configuration**: one file drives the scenario, telemetry and output
//! - **Validation**: declarative field rules checked on every load
//! - **Environment Awareness**: `SINTAX_ENV` overlays and `SINTAX_*` overrides

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

mod error;
mod output;
mod scenario;
mod telemetry;
mod validation;

pub use error::ConfigError;
pub use output::{OutputConfig, OutputFormat};
pub use scenario::ScenarioConfig;
pub use telemetry::TelemetryConfig;

/// Default configuration file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/sintax.yaml";

/// Prefix for environment overrides. Nested keys are split on `__`, e.g.
/// `SINTAX_SCENARIO__TAX_HIKE_PERCENT=50`.
pub const ENV_PREFIX: &str = "SINTAX_";

/// Top‑level configuration container.
#[derive(Debug, Serialize, Deserialize, Validate, Default, Clone, PartialEq)]
pub struct SintaxConfig {
    /// Scenario parameters passed to the engine.
    #[validate(nested)]
    #[serde(default)]
    pub scenario: ScenarioConfig,

    /// Logging and metrics.
    #[validate(nested)]
    #[serde(default)]
    pub telemetry: TelemetryConfig,

    /// Report rendering and export.
    #[validate(nested)]
    #[serde(default)]
    pub output: OutputConfig,
}

impl SintaxConfig {
    /// Load configuration from default files and environment.
    ///
    /// Hierarchy:
    /// 1. Default Values
    /// 2. `config/sintax.yaml` - Base settings. If missing, defaults are used.
    /// 3. `config/<environment>.yaml` - Overrides for `SINTAX_ENV` (if set).
    /// 4. `SINTAX_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(SintaxConfig::default()));

        if Path::new(DEFAULT_CONFIG_PATH).exists() {
            figment = figment.merge(Yaml::file(DEFAULT_CONFIG_PATH));
        }

        if let Ok(env) = std::env::var("SINTAX_ENV") {
            let env_file = format!("config/{}.yaml", env);
            if Path::new(&env_file).exists() {
                figment = figment.merge(Yaml::file(env_file));
            }
        }

        Self::extract(figment)
    }

    /// Load configuration from a specific path, still honoring `SINTAX_*`
    /// overrides.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(PathBuf::from(
                path.to_string_lossy().to_string(),
            )));
        }

        let figment =
            Figment::from(Serialized::defaults(SintaxConfig::default())).merge(Yaml::file(path));
        Self::extract(figment)
    }

    /// Explicit path when given, the default hierarchy otherwise.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Self::load(),
        }
    }

    fn extract(figment: Figment) -> Result<Self, ConfigError> {
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    fn jailed(result: Result<SintaxConfig, ConfigError>) -> figment::error::Result<SintaxConfig> {
        result.map_err(|e| e.to_string().into())
    }

    #[test]
    fn full_config_validation() {
        let config = SintaxConfig::default();
        config.validate().expect("Default config should validate");
    }

    #[test]
    fn defaults_without_files() {
        Jail::expect_with(|_jail| {
            let config = jailed(SintaxConfig::load())?;
            assert_eq!(config, SintaxConfig::default());
            Ok(())
        });
    }

    #[test]
    fn environment_override() {
        Jail::expect_with(|jail| {
            jail.set_env("SINTAX_SCENARIO__TAX_HIKE_PERCENT", "50");
            jail.set_env("SINTAX_TELEMETRY__LOG_LEVEL", "debug");
            let config = jailed(SintaxConfig::load())?;
            assert_eq!(config.scenario.tax_hike_percent, 50.0);
            assert_eq!(config.telemetry.log_level, "debug");
            Ok(())
        });
    }

    #[test]
    fn file_then_environment_layering() {
        Jail::expect_with(|jail| {
            std::fs::create_dir_all("config").map_err(|e| e.to_string())?;
            jail.create_file(
                "config/sintax.yaml",
                r#"
scenario:
  tax_hike_percent: 30
  price_elasticity: -0.5
  horizon_years: 10
output:
  format: json
"#,
            )?;
            jail.create_file("config/stress.yaml", "scenario:\n  horizon_years: 40\n")?;
            jail.set_env("SINTAX_ENV", "stress");
            jail.set_env("SINTAX_SCENARIO__PRICE_ELASTICITY", "-0.7");

            let config = jailed(SintaxConfig::load())?;
            assert_eq!(config.scenario.tax_hike_percent, 30.0);
            assert_eq!(config.scenario.horizon_years, 40);
            assert_eq!(config.scenario.price_elasticity, -0.7);
            assert_eq!(config.scenario.total_population_millions, 200.0);
            assert_eq!(config.output.format, OutputFormat::Json);
            Ok(())
        });
    }

    #[test]
    fn load_from_missing_path() {
        let err = SintaxConfig::load_from_path("does/not/exist.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn load_from_path_reports_nested_field() {
        Jail::expect_with(|jail| {
            jail.create_file("bad.yaml", "scenario:\n  initial_prevalence: 1.5\n")?;
            let err = SintaxConfig::load_from_path("bad.yaml").unwrap_err();
            assert!(matches!(err, ConfigError::Validation(_)));
            let message = err.to_string();
            assert!(message.contains("Field 'scenario.initial_prevalence':"));
            assert!(message.contains("must be in (0,1)"));
            Ok(())
        });
    }

    #[test]
    fn malformed_value_is_a_parsing_error() {
        Jail::expect_with(|jail| {
            jail.create_file("bad.yaml", "scenario:\n  horizon_years: soon\n")?;
            let err = SintaxConfig::load_from_path("bad.yaml").unwrap_err();
            assert!(matches!(err, ConfigError::Parsing(_)));
            Ok(())
        });
    }

    #[test]
    fn resolve_prefers_explicit_path() {
        Jail::expect_with(|jail| {
            jail.create_file("custom.yaml", "scenario:\n  tax_hike_percent: 75\n")?;
            let config = jailed(SintaxConfig::resolve(Some(Path::new("custom.yaml"))))?;
            assert_eq!(config.scenario.tax_hike_percent, 75.0);
            Ok(())
        });
    }
}
