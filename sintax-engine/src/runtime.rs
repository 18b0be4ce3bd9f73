/*!
# Runtime Engine

Shared entry points for frontends (CLI, services, notebooks): single scenario
runs, tax-hike sweeps and report replays. The population engine itself is
pure; this layer adds timing, metrics, logging and fingerprint checks.
*/

use std::path::Path;
use std::time::Instant;

use opentelemetry::KeyValue;
use tracing::{error, info, instrument, warn};

use sintax_core::Configuration;
use sintax_telemetry::{logging::EventLogger, metrics::MetricsRecorder};

use crate::error::EngineError;
use crate::report::RunReport;

/// Runs one scenario.
///
/// * `expected_fingerprint` - when given, the run fails with
///   [`EngineError::FingerprintMismatch`] unless the result digest matches.
#[instrument(
    level = "info",
    name = "run_simulation_mode",
    skip(config, metrics),
    fields(tax_hike_percent = config.tax_hike_percent)
)]
pub async fn run_simulation_mode(
    config: &Configuration,
    expected_fingerprint: Option<&str>,
    metrics: &MetricsRecorder,
) -> Result<RunReport, EngineError> {
    let report = simulate_scenario(config, metrics)?;
    info!(
        final_prevalence = report.summary.final_prevalence_percent,
        fingerprint = %report.fingerprint,
        "Simulation complete"
    );

    if let Some(expected) = expected_fingerprint {
        verify_fingerprint(expected, &report.fingerprint)?;
    }

    EventLogger::log_event(
        "simulation_complete",
        vec![
            KeyValue::new("scenario", report.summary.scenario_label.clone()),
            KeyValue::new("horizon_years", config.horizon_years as i64),
            KeyValue::new("final_prevalence_percent", report.summary.final_prevalence_percent),
            KeyValue::new("fingerprint", report.fingerprint.clone()),
        ],
    )
    .await;

    Ok(report)
}

/// Runs the same scenario once per tax hike. Reports come back in the order
/// of `tax_hikes`.
#[instrument(level = "info", name = "run_sweep_mode", skip(config, metrics))]
pub async fn run_sweep_mode(
    config: &Configuration,
    tax_hikes: &[f64],
    metrics: &MetricsRecorder,
) -> Result<Vec<RunReport>, EngineError> {
    if tax_hikes.is_empty() {
        return Err(EngineError::EmptySweep);
    }

    let handles: Vec<_> = tax_hikes
        .iter()
        .map(|&tax_hike| {
            let scenario = (*config).with_tax_hike(tax_hike);
            let metrics = metrics.clone();
            tokio::task::spawn_blocking(move || simulate_scenario(&scenario, &metrics))
        })
        .collect();

    let mut reports = Vec::with_capacity(handles.len());
    for handle in handles {
        reports.push(handle.await??);
    }

    EventLogger::log_event(
        "sweep_complete",
        vec![
            KeyValue::new("scenarios", reports.len() as i64),
            KeyValue::new("horizon_years", config.horizon_years as i64),
        ],
    )
    .await;

    Ok(reports)
}

/// Re-runs the configuration stored in a saved report and checks that the
/// new result reproduces the stored fingerprint.
#[instrument(level = "info", name = "replay_report", skip(metrics))]
pub async fn replay_report<P: AsRef<Path> + std::fmt::Debug>(
    path: P,
    metrics: &MetricsRecorder,
) -> Result<RunReport, EngineError> {
    info!("Replaying report from file: {:?}", path.as_ref());
    let stored = RunReport::load_from_path(path)?;
    run_simulation_mode(&stored.configuration, Some(stored.fingerprint.as_str()), metrics).await
}

/// Runs the engine synchronously and records metrics.
pub fn simulate_scenario(
    config: &Configuration,
    metrics: &MetricsRecorder,
) -> Result<RunReport, EngineError> {
    let started = Instant::now();
    match sintax_core::run(config) {
        Ok(result) => {
            metrics.record_run(started.elapsed().as_nanos());
            Ok(RunReport::new(*config, result))
        }
        Err(err) => {
            metrics.record_invalid_configuration();
            error!(field = err.field(), "{}", err);
            Err(err.into())
        }
    }
}

fn verify_fingerprint(expected: &str, actual: &str) -> Result<(), EngineError> {
    if expected.eq_ignore_ascii_case(actual) {
        return Ok(());
    }
    warn!(expected, actual, "Result fingerprint mismatch");
    Err(EngineError::FingerprintMismatch {
        expected: expected.to_string(),
        actual: actual.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::save_report;
    use sintax_core::SimulationError;
    use tracing_test::traced_test;

    #[tokio::test]
    async fn simulation_records_metrics() {
        let metrics = MetricsRecorder::new().unwrap();
        let report = run_simulation_mode(&Configuration::default(), None, &metrics)
            .await
            .unwrap();
        assert_eq!(report.records.len(), 16);
        assert_eq!(metrics.runs.get(), 1.0);
        assert_eq!(metrics.run_duration.get_sample_count(), 1);
    }

    #[tokio::test]
    async fn matching_fingerprint_passes() {
        let metrics = MetricsRecorder::new().unwrap();
        let config = Configuration::default().with_tax_hike(25.0);
        let first = run_simulation_mode(&config, None, &metrics).await.unwrap();
        let upper = first.fingerprint.to_uppercase();
        let second = run_simulation_mode(&config, Some(upper.as_str()), &metrics)
            .await
            .unwrap();
        assert_eq!(first.fingerprint, second.fingerprint);
    }

    #[tokio::test]
    async fn fingerprint_mismatch_is_an_error() {
        let metrics = MetricsRecorder::new().unwrap();
        let err = run_simulation_mode(&Configuration::default(), Some("deadbeef"), &metrics)
            .await
            .unwrap_err();
        match err {
            EngineError::FingerprintMismatch { expected, actual } => {
                assert_eq!(expected, "deadbeef");
                assert_eq!(actual.len(), 64);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    #[traced_test]
    async fn invalid_configuration_is_counted_and_logged() {
        let metrics = MetricsRecorder::new().unwrap();
        let config = Configuration::default().with_horizon(0);
        let err = run_simulation_mode(&config, None, &metrics)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::Simulation(SimulationError::InvalidConfiguration {
                field: "horizon_years",
                ..
            })
        ));
        assert_eq!(metrics.invalid_configurations.get(), 1.0);
        assert_eq!(metrics.runs.get(), 0.0);
        assert!(logs_contain("horizon_years"));
    }

    #[tokio::test]
    async fn sweep_keeps_input_order() {
        let metrics = MetricsRecorder::new().unwrap();
        let hikes = [100.0, 0.0, 50.0];
        let reports = run_sweep_mode(&Configuration::default(), &hikes, &metrics)
            .await
            .unwrap();

        let labels: Vec<_> = reports
            .iter()
            .map(|r| r.summary.scenario_label.as_str())
            .collect();
        assert_eq!(labels, vec!["+100%", "+0%", "+50%"]);
        assert_eq!(metrics.runs.get(), 3.0);

        // Higher taxes end lower.
        let finals: Vec<_> = reports
            .iter()
            .map(|r| r.summary.final_prevalence_percent)
            .collect();
        assert!(finals[0] < finals[2]);
        assert!(finals[2] < finals[1]);
    }

    #[tokio::test]
    async fn empty_sweep_is_rejected() {
        let metrics = MetricsRecorder::new().unwrap();
        let err = run_sweep_mode(&Configuration::default(), &[], &metrics)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::EmptySweep));
    }

    #[tokio::test]
    async fn sweep_fails_on_invalid_hike() {
        let metrics = MetricsRecorder::new().unwrap();
        let err = run_sweep_mode(&Configuration::default(), &[10.0, -1.0], &metrics)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Simulation(_)));
    }

    #[tokio::test]
    async fn replay_reproduces_saved_report() {
        let metrics = MetricsRecorder::new().unwrap();
        let config = Configuration::default().with_tax_hike(60.0).with_horizon(8);
        let report = run_simulation_mode(&config, None, &metrics).await.unwrap();

        let path = std::env::temp_dir()
            .join(format!("sintax-replay-{}", std::process::id()))
            .join("scenario.yaml");
        save_report(&report, &path).unwrap();

        let replayed = replay_report(&path, &metrics).await.unwrap();
        assert_eq!(replayed.fingerprint, report.fingerprint);
        assert_eq!(replayed.configuration, config);
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn replay_of_json_report_with_seventeen_digit_prevalence() {
        let metrics = MetricsRecorder::new().unwrap();
        let config = Configuration::default()
            .with_population(200.0, 0.9428929655497493)
            .with_tax_hike(35.0);
        let report = run_simulation_mode(&config, None, &metrics).await.unwrap();

        let path = std::env::temp_dir()
            .join(format!("sintax-replay-json-{}", std::process::id()))
            .join("scenario.json");
        save_report(&report, &path).unwrap();

        let replayed = replay_report(&path, &metrics).await.unwrap();
        assert_eq!(replayed.configuration, config);
        assert_eq!(replayed.fingerprint, report.fingerprint);
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn replay_detects_tampered_report() {
        let metrics = MetricsRecorder::new().unwrap();
        let mut report = run_simulation_mode(&Configuration::default(), None, &metrics)
            .await
            .unwrap();
        report.configuration.tax_hike_percent = 10.0;

        let path = std::env::temp_dir()
            .join(format!("sintax-tamper-{}", std::process::id()))
            .join("scenario.json");
        save_report(&report, &path).unwrap();

        let err = replay_report(&path, &metrics).await.unwrap_err();
        assert!(matches!(err, EngineError::FingerprintMismatch { .. }));
        let _ = std::fs::remove_file(path);
    }
}
