//! Serializable run reports and their file formats.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sintax_config::OutputFormat;
use sintax_core::{Configuration, ScenarioSummary, SimulationResult, TransitionRates, YearRecord};

use crate::error::EngineError;

/// Everything a frontend needs to render or archive one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub generated_at: DateTime<Utc>,
    pub configuration: Configuration,
    pub summary: ScenarioSummary,
    pub rates: TransitionRates,
    pub records: Vec<YearRecord>,
    /// Hex BLAKE3 digest of records and rates.
    pub fingerprint: String,
}

impl RunReport {
    pub fn new(configuration: Configuration, result: SimulationResult) -> Self {
        let summary = result.summary(&configuration);
        let fingerprint = result.fingerprint();
        Self {
            generated_at: Utc::now(),
            configuration,
            summary,
            rates: result.rates,
            records: result.records,
            fingerprint,
        }
    }

    pub fn transition_matrix(&self) -> [[f64; 3]; 3] {
        self.rates.matrix()
    }

    /// Reads a report written by [`save_report`].
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        match format_for_path(path) {
            OutputFormat::Json => Ok(serde_json::from_str(&content)?),
            _ => Ok(serde_yaml::from_str(&content)?),
        }
    }
}

/// File format implied by the extension: `.json` is JSON, anything else YAML.
pub fn format_for_path(path: &Path) -> OutputFormat {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => OutputFormat::Json,
        _ => OutputFormat::Yaml,
    }
}

/// Serializes `value` as YAML or JSON. `Table` is a terminal rendering and
/// falls back to YAML here.
pub fn serialize<T: Serialize + ?Sized>(
    value: &T,
    format: OutputFormat,
) -> Result<String, EngineError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Yaml | OutputFormat::Table => Ok(serde_yaml::to_string(value)?),
    }
}

/// Writes one report or a slice of reports, picking the format from the
/// file extension.
pub fn save_report<T: Serialize + ?Sized, P: AsRef<Path>>(
    value: &T,
    path: P,
) -> Result<(), EngineError> {
    let path = path.as_ref();
    let content = serialize(value, format_for_path(path))?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}
