//! Coverage audit command
//!
//! Runs the coverage auditor over the cable database, writes the findings
//! report (always, header included even when empty) and prints the
//! summary statistics.

use anyhow::{Context, Result};
use catalog_model::audit::AuditReport;
use catalog_store::CatalogLoader;
use colored::Colorize;
use std::path::Path;
use tracing::info;

/// Run the audit and write the report CSV
pub fn handle_audit(data_dir: &Path, report_file: &Path, detailed: bool) -> Result<()> {
    let loader = CatalogLoader::new(data_dir);
    let cables = loader
        .load_cables()
        .with_context(|| format!("loading cable database from {}", data_dir.display()))?;
    let terminations = loader
        .load_terminations()
        .with_context(|| format!("loading termination table from {}", data_dir.display()))?;

    if cables.is_empty() {
        eprintln!(
            "{} cable database is empty; report will contain headers only",
            "WARN".yellow()
        );
    }

    let report = catalog_model::audit(&cables, &terminations);
    write_report(&report, report_file)
        .with_context(|| format!("writing report to {}", report_file.display()))?;
    info!(findings = report.findings.len(), "audit report written");

    print_summary(&report);

    if detailed && !report.findings.is_empty() {
        println!();
        for finding in &report.findings {
            println!(
                "  {} {} / {} mm2 / {} / {}",
                finding.reason.to_string().red(),
                finding.voltage_class,
                finding.cross_section_mm2,
                finding.brand,
                finding.cable_name
            );
        }
    }

    if report.findings.is_empty() {
        println!(
            "{} No uncovered cables. Report written to {}",
            "OK".green().bold(),
            report_file.display()
        );
    } else {
        println!(
            "{} {} uncovered cables listed in {}",
            "WARN".yellow().bold(),
            report.findings.len(),
            report_file.display()
        );
    }

    Ok(())
}

/// Write the findings CSV. An empty report still produces the file with
/// its header row, so downstream consumers never see a missing file.
fn write_report(report: &AuditReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "voltage_class",
        "cross_section_mm2",
        "brand",
        "cable_name",
        "reason",
    ])?;
    for finding in &report.findings {
        writer.write_record([
            finding.voltage_class.as_str(),
            &finding.cross_section_mm2.to_string(),
            finding.brand.as_str(),
            finding.cable_name.as_str(),
            &finding.reason.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn print_summary(report: &AuditReport) {
    let line = "-".repeat(60);
    println!("{}", line);
    println!("{}", "COVERAGE AUDIT".bold());
    println!("  Cables in database:   {}", report.total);
    println!(
        "  Covered by the model: {}",
        report.covered.to_string().green()
    );
    println!(
        "  Out of range (risks): {}",
        report.uncovered().to_string().red()
    );
    println!(
        "  Coverage rate:        {}",
        format!("{:.2}%", report.coverage_rate()).bold()
    );
    println!("{}", line);
}
