//! ## sintax-telemetry::metrics
//! **Prometheus counters and histograms for engine runs**

use prometheus::{Counter, Histogram, HistogramOpts, Registry};

#[derive(Debug, Clone)]
pub struct MetricsRecorder {
    pub registry: prometheus::Registry,
    pub runs: prometheus::Counter,
    pub invalid_configurations: prometheus::Counter,
    pub run_duration: prometheus::Histogram,
}

impl MetricsRecorder {
    /// Registers the engine metrics on a fresh registry.
    pub fn new() -> Result<Self, prometheus::Error> {
        Self::with_registry(Registry::new())
    }

    pub fn with_registry(registry: Registry) -> Result<Self, prometheus::Error> {
        let runs = Counter::new("sintax_runs_total", "Completed simulation runs")?;
        let invalid_configurations = Counter::new(
            "sintax_invalid_configurations_total",
            "Runs rejected before simulation",
        )?;
        let run_duration = Histogram::with_opts(
            HistogramOpts::new("sintax_run_duration_ns", "Engine run time in nanoseconds")
                .buckets(vec![1_000.0, 10_000.0, 100_000.0, 1_000_000.0]),
        )?;

        registry.register(Box::new(runs.clone()))?;
        registry.register(Box::new(invalid_configurations.clone()))?;
        registry.register(Box::new(run_duration.clone()))?;

        Ok(Self {
            registry,
            runs,
            invalid_configurations,
            run_duration,
        })
    }

    pub fn gather_metrics(&self) -> Result<String, prometheus::Error> {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let mut buffer = Vec::<u8>::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }

    pub fn record_run(&self, elapsed_ns: u128) {
        self.runs.inc();
        self.run_duration.observe(elapsed_ns as f64);
    }

    pub fn record_invalid_configuration(&self) {
        self.invalid_configurations.inc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_runs_and_rejections() {
        let metrics = MetricsRecorder::new().unwrap();
        metrics.record_run(5_000);
        metrics.record_run(50_000);
        metrics.record_invalid_configuration();

        assert_eq!(metrics.runs.get(), 2.0);
        assert_eq!(metrics.invalid_configurations.get(), 1.0);
        assert_eq!(metrics.run_duration.get_sample_count(), 2);
    }

    #[test]
    fn exposition_contains_metric_names() {
        let metrics = MetricsRecorder::new().unwrap();
        metrics.record_run(1_000);
        let text = metrics.gather_metrics().unwrap();
        assert!(text.contains("sintax_runs_total 1"));
        assert!(text.contains("sintax_run_duration_ns_bucket"));
        assert!(text.contains("sintax_invalid_configurations_total 0"));
    }

    #[test]
    fn each_recorder_owns_its_registry() {
        let first = MetricsRecorder::new().unwrap();
        let second = MetricsRecorder::new().unwrap();
        first.record_run(1_000);
        assert_eq!(first.runs.get(), 1.0);
        assert_eq!(second.runs.get(), 0.0);
    }

    #[test]
    fn duplicate_registration_is_an_error() {
        let registry = Registry::new();
        MetricsRecorder::with_registry(registry.clone()).unwrap();
        assert!(MetricsRecorder::with_registry(registry).is_err());
    }
}
