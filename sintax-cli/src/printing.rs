//! Plain-text rendering of run reports.

use std::fmt::Write;

use sintax_core::{TransitionRates, YearRecord};
use sintax_engine::RunReport;

pub fn render_summary(report: &RunReport) -> String {
    let summary = &report.summary;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Final prevalence ({}): {:.2}% ({:+.2} p.p.)",
        summary.final_year, summary.final_prevalence_percent, summary.delta_prevalence_points
    );
    let _ = writeln!(
        out,
        "Cumulative health cost: {:.1} bn",
        summary.cumulative_cost_billions
    );
    let _ = write!(out, "Tax scenario: {}", summary.scenario_label);
    out
}

pub fn render_table(records: &[YearRecord]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<6} {:>14} {:>12} {:>15} {:>14}",
        "Year", "Prevalence (%)", "Smokers (M)", "Ex-smokers (M)", "Cost (bn)"
    );
    for record in records {
        let _ = writeln!(
            out,
            "{:<6} {:>14.2} {:>12.3} {:>15.3} {:>14.2}",
            record.year,
            record.prevalence_percent,
            record.smokers_millions,
            record.ex_smokers_millions,
            record.cost_billions
        );
    }
    out.trim_end().to_string()
}

pub fn render_rates(rates: &TransitionRates, show_matrix: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Calibrated rates:");
    let _ = writeln!(out, "  initiation (alpha): {:.4}", rates.initiation);
    let _ = writeln!(out, "  cessation  (gamma): {:.4}", rates.cessation);
    let _ = write!(out, "  relapse    (rho):   {:.4}", rates.relapse);

    if show_matrix {
        let _ = write!(out, "\nTransition matrix [N S E]:");
        for row in rates.matrix() {
            let _ = write!(out, "\n  [{:>7.4} {:>7.4} {:>7.4}]", row[0], row[1], row[2]);
        }
    }
    out
}

pub fn render_sweep(reports: &[RunReport]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<10} {:>16} {:>12} {:>18} {:>8}",
        "Scenario", "Final prev. (%)", "Delta (p.p.)", "Cumulative (bn)", "Gamma"
    );
    for report in reports {
        let s = &report.summary;
        let _ = writeln!(
            out,
            "{:<10} {:>16.2} {:>12.2} {:>18.1} {:>8.4}",
            s.scenario_label,
            s.final_prevalence_percent,
            s.delta_prevalence_points,
            s.cumulative_cost_billions,
            report.rates.cessation
        );
    }
    out.trim_end().to_string()
}
