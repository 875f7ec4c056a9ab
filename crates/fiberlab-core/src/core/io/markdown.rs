use super::traits::{DocumentExporter, ExportError};
use crate::core::models::report::{ChemicalReport, GarmentReport, ManualReport, Report};
use crate::core::models::results::{ChemicalFiberResult, GarmentFiberResult, ManualFiberResult};
use std::io::Write;

/// Renders reports as GitHub-flavored Markdown with four-decimal tables.
pub struct MarkdownExporter;

fn cell_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        "N/A".to_string()
    } else {
        trimmed.replace('|', "\\|")
    }
}

fn fixed(value: f64) -> String {
    format!("{:.4}", value)
}

fn write_table(
    writer: &mut impl Write,
    headers: &[&str],
    rows: impl IntoIterator<Item = Vec<String>>,
) -> Result<(), ExportError> {
    writeln!(writer, "| {} |", headers.join(" | "))?;
    writeln!(writer, "|{}", " --- |".repeat(headers.len()))?;
    for row in rows {
        writeln!(writer, "| {} |", row.join(" | "))?;
    }
    writeln!(writer)?;
    Ok(())
}

fn write_samples<R>(
    writer: &mut impl Write,
    samples: &[Vec<R>],
    headers: &[&str],
    row: impl Fn(&R) -> Vec<String>,
) -> Result<(), ExportError> {
    writeln!(writer, "## Sample-by-Sample Results")?;
    writeln!(writer)?;
    for (i, sample) in samples.iter().enumerate() {
        writeln!(writer, "### Sample {}", i + 1)?;
        writeln!(writer)?;
        write_table(writer, headers, sample.iter().map(&row))?;
    }
    Ok(())
}

fn write_manual(report: &ManualReport, writer: &mut impl Write) -> Result<(), ExportError> {
    writeln!(writer, "# Manual Separation Analysis Report")?;
    writeln!(writer)?;
    writeln!(
        writer,
        "Average Total Dry Weight: {} g",
        fixed(report.total_dry_weight)
    )?;
    writeln!(writer)?;

    write_samples(
        writer,
        &report.samples,
        &[
            "Fiber Name",
            "Wet Weight (g)",
            "Moisture (%)",
            "Dry Weight (g)",
            "Percentage (%)",
        ],
        |r: &ManualFiberResult| {
            vec![
                cell_name(&r.name),
                fixed(r.wet_weight),
                fixed(r.moisture_content),
                fixed(r.dry_weight),
                fixed(r.percentage),
            ]
        },
    )?;

    writeln!(writer, "## Average Results (Without Moisture)")?;
    writeln!(writer)?;
    write_table(
        writer,
        &[
            "Fiber Name",
            "Avg. Dry Weight (g)",
            "Avg. Moisture (%)",
            "Avg. Percentage (%)",
        ],
        report.without_moisture.iter().map(|r| {
            vec![
                cell_name(&r.name),
                fixed(r.dry_weight),
                fixed(r.moisture_content),
                fixed(r.percentage),
            ]
        }),
    )?;

    writeln!(writer, "## Average Results (With Moisture)")?;
    writeln!(writer)?;
    write_table(
        writer,
        &[
            "Fiber Name",
            "Avg. Dry Weight (g)",
            "Avg. Moisture (%)",
            "Avg. Wet Weight (g)",
            "Avg. Percentage (%)",
        ],
        report.with_moisture.iter().map(|r| {
            vec![
                cell_name(&r.name),
                fixed(r.dry_weight),
                fixed(r.moisture_content),
                fixed(r.wet_weight),
                fixed(r.percentage),
            ]
        }),
    )
}

fn write_chemical(report: &ChemicalReport, writer: &mut impl Write) -> Result<(), ExportError> {
    writeln!(writer, "# Chemical Separation Analysis Report")?;
    writeln!(writer)?;
    writeln!(writer, "Method: {}", report.method)?;
    writeln!(writer)?;
    writeln!(
        writer,
        "Average Initial Dry Sample Weight: {} g",
        fixed(report.average_initial_weight)
    )?;
    writeln!(writer)?;

    write_samples(
        writer,
        &report.samples,
        &["Fiber Name", "Dry Weight (g)", "Dry %", "Conditioned %"],
        |r: &ChemicalFiberResult| {
            vec![
                cell_name(&r.name),
                fixed(r.dry_weight),
                fixed(r.dry_percentage),
                fixed(r.conditioned_percentage),
            ]
        },
    )?;

    writeln!(writer, "## Average Results (Without Moisture)")?;
    writeln!(writer)?;
    write_table(
        writer,
        &["Fiber Name", "Avg. Dry Weight (g)", "Avg. Dry %"],
        report.without_moisture.iter().map(|r| {
            vec![
                cell_name(&r.name),
                fixed(r.dry_weight),
                fixed(r.dry_percentage),
            ]
        }),
    )?;

    writeln!(writer, "## Average Results (With Moisture)")?;
    writeln!(writer)?;
    write_table(
        writer,
        &["Fiber Name", "Avg. Dry Weight (g)", "Avg. Conditioned %"],
        report.with_moisture.iter().map(|r| {
            vec![
                cell_name(&r.name),
                fixed(r.dry_weight),
                fixed(r.conditioned_percentage),
            ]
        }),
    )
}

// Both averaged views are identical for garments, so only one table is written.
fn write_garments(report: &GarmentReport, writer: &mut impl Write) -> Result<(), ExportError> {
    writeln!(writer, "# Garments Analysis Report")?;
    writeln!(writer)?;

    write_samples(
        writer,
        &report.samples,
        &["Fiber Name", "Total Weight (g)", "Overall Percentage (%)"],
        |r: &GarmentFiberResult| {
            vec![
                cell_name(&r.fiber_name),
                fixed(r.total_weight),
                fixed(r.overall_percentage),
            ]
        },
    )?;

    writeln!(writer, "## Average Overall Garment Composition")?;
    writeln!(writer)?;
    write_table(
        writer,
        &[
            "Fiber Name",
            "Avg. Total Weight (g)",
            "Avg. Overall Percentage (%)",
        ],
        report.with_moisture.iter().map(|r| {
            vec![
                cell_name(&r.fiber_name),
                fixed(r.total_weight),
                fixed(r.overall_percentage),
            ]
        }),
    )
}

impl DocumentExporter for MarkdownExporter {
    fn write_to(report: &Report, writer: &mut impl Write) -> Result<(), ExportError> {
        match report {
            Report::Manual(report) => write_manual(report, writer),
            Report::Chemical(report) => write_chemical(report, writer),
            Report::Garments(report) => write_garments(report, writer),
        }
    }
}
