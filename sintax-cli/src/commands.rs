use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;
use validator::Validate;

use sintax_config::{OutputFormat, ScenarioConfig, SintaxConfig};
use sintax_engine::{replay_report, run_simulation_mode, run_sweep_mode, save_report, serialize};
use sintax_telemetry::logging::EventLogger;
use sintax_telemetry::metrics::MetricsRecorder;

use crate::printing;

#[derive(Parser)]
#[command(name = "sintax", version, about = "Tobacco excise-tax scenario simulator")]
pub struct Cli {
    /// Configuration file (defaults to config/sintax.yaml plus SINTAX_* overrides)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Print prometheus metrics to stderr when done
    #[arg(long, global = true)]
    pub print_metrics: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one scenario and print the year-by-year table
    Simulate(SimulateArgs),
    /// Compare final prevalence and cost across several tax hikes
    Sweep(SweepArgs),
    /// Re-run a saved report and verify its fingerprint
    Replay(ReplayArgs),
    /// Load, validate and print the effective configuration
    CheckConfig,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ScenarioOverrides {
    /// Total population in millions
    #[arg(long)]
    pub population: Option<f64>,
    /// Initial smoker prevalence as a fraction, e.g. 0.15
    #[arg(long)]
    pub prevalence: Option<f64>,
    /// Price elasticity of demand (non-positive)
    #[arg(long, allow_hyphen_values = true)]
    pub elasticity: Option<f64>,
    /// Annual cost per smoker
    #[arg(long)]
    pub cost_smoker: Option<f64>,
    /// Annual cost per ex-smoker
    #[arg(long)]
    pub cost_ex_smoker: Option<f64>,
    /// Years to simulate after the base year
    #[arg(long)]
    pub horizon: Option<u32>,
    #[arg(long)]
    pub base_year: Option<i32>,
}

impl ScenarioOverrides {
    pub fn apply(&self, scenario: &mut ScenarioConfig) {
        if let Some(v) = self.population {
            scenario.total_population_millions = v;
        }
        if let Some(v) = self.prevalence {
            scenario.initial_prevalence = v;
        }
        if let Some(v) = self.elasticity {
            scenario.price_elasticity = v;
        }
        if let Some(v) = self.cost_smoker {
            scenario.cost_per_smoker = v;
        }
        if let Some(v) = self.cost_ex_smoker {
            scenario.cost_per_ex_smoker = v;
        }
        if let Some(v) = self.horizon {
            scenario.horizon_years = v;
        }
        if let Some(v) = self.base_year {
            scenario.base_year = v;
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    Table,
    Yaml,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Table => OutputFormat::Table,
            FormatArg::Yaml => OutputFormat::Yaml,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    /// Tax increase in percent
    #[arg(short, long)]
    pub tax_hike: Option<f64>,
    #[command(flatten)]
    pub scenario: ScenarioOverrides,
    /// Stdout format (overrides output.format)
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,
    /// Write the report to this file (.json or .yaml)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Fail unless the result fingerprint equals this hex digest
    #[arg(long)]
    pub validate_hash: Option<String>,
    /// Also print the transition matrix
    #[arg(long, default_value_t = false)]
    pub show_matrix: bool,
}

#[derive(Args, Debug, Clone)]
pub struct SweepArgs {
    /// Comma-separated tax hikes in percent
    #[arg(long, value_delimiter = ',', default_value = "0,25,50,75,100")]
    pub tax_hikes: Vec<f64>,
    #[command(flatten)]
    pub scenario: ScenarioOverrides,
    /// Write all reports to this file (.json or .yaml)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ReplayArgs {
    /// Report previously written with `simulate --output`
    pub report: PathBuf,
}

/// Applies command-line overrides and re-validates the merged scenario.
pub fn merge_scenario(
    config: &SintaxConfig,
    tax_hike: Option<f64>,
    overrides: &ScenarioOverrides,
) -> anyhow::Result<ScenarioConfig> {
    let mut scenario = config.scenario.clone();
    overrides.apply(&mut scenario);
    if let Some(tax_hike) = tax_hike {
        scenario.tax_hike_percent = tax_hike;
    }
    scenario
        .validate()
        .map_err(sintax_config::ConfigError::from)
        .context("invalid scenario")?;
    Ok(scenario)
}

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = SintaxConfig::resolve(cli.config.as_deref()).context("loading configuration")?;
    EventLogger::init(&config.telemetry.log_level);
    let metrics = MetricsRecorder::new().context("registering metrics")?;

    match cli.command {
        Commands::Simulate(args) => simulate(&config, args, &metrics).await?,
        Commands::Sweep(args) => sweep(&config, args, &metrics).await?,
        Commands::Replay(args) => {
            let report = replay_report(&args.report, &metrics).await?;
            println!("{}", printing::render_summary(&report));
            println!("Fingerprint verified: {}", report.fingerprint);
        }
        Commands::CheckConfig => {
            print!("{}", serialize(&config, OutputFormat::Yaml)?);
        }
    }

    if cli.print_metrics || config.telemetry.print_metrics {
        eprint!("{}", metrics.gather_metrics()?);
    }
    Ok(())
}

async fn simulate(
    config: &SintaxConfig,
    args: SimulateArgs,
    metrics: &MetricsRecorder,
) -> anyhow::Result<()> {
    let scenario = merge_scenario(config, args.tax_hike, &args.scenario)?;
    let report =
        run_simulation_mode(&scenario.to_engine(), args.validate_hash.as_deref(), metrics).await?;

    let format = args
        .format
        .map(OutputFormat::from)
        .unwrap_or(config.output.format);
    match format {
        OutputFormat::Table => {
            println!("{}", printing::render_summary(&report));
            println!();
            println!("{}", printing::render_table(&report.records));
            println!();
            println!("{}", printing::render_rates(&report.rates, args.show_matrix));
            println!("Fingerprint: {}", report.fingerprint);
        }
        other => print!("{}", serialize(&report, other)?),
    }

    if let Some(path) = args.output.as_ref().or(config.output.path.as_ref()) {
        save_report(&report, path).with_context(|| format!("writing {}", path.display()))?;
        info!("Report written to {}", path.display());
    }
    Ok(())
}

async fn sweep(
    config: &SintaxConfig,
    args: SweepArgs,
    metrics: &MetricsRecorder,
) -> anyhow::Result<()> {
    let scenario = merge_scenario(config, None, &args.scenario)?;
    let reports = run_sweep_mode(&scenario.to_engine(), &args.tax_hikes, metrics).await?;
    println!("{}", printing::render_sweep(&reports));

    if let Some(path) = args.output.as_ref().or(config.output.path.as_ref()) {
        save_report(reports.as_slice(), path)
            .with_context(|| format!("writing {}", path.display()))?;
        info!("Sweep written to {}", path.display());
    }
    Ok(())
}
