use super::analyze::{AnalysisOutcome, AnalysisRun};
use crate::core::models::report::{ChemicalReport, GarmentReport, ManualReport, Report};
use crate::core::models::results::{ChemicalFiberResult, GarmentFiberResult, ManualFiberResult};
use crate::core::models::sample::AnalysisMode;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ReportError {
    #[error("There are no results to report")]
    EmptyRun,

    #[error(
        "The average initial sample weight is {average}; a report needs a positive initial weight"
    )]
    UndefinedInitialWeight { average: f64 },
}

pub fn manual_report(run: &AnalysisRun<ManualFiberResult>) -> Result<ManualReport, ReportError> {
    if run.samples.is_empty() {
        return Err(ReportError::EmptyRun);
    }
    Ok(ManualReport {
        samples: run.samples.clone(),
        without_moisture: run.aggregation.without_moisture.clone(),
        with_moisture: run.aggregation.with_moisture.clone(),
        total_dry_weight: run
            .aggregation
            .with_moisture
            .iter()
            .map(|r| r.dry_weight)
            .sum(),
    })
}

/// Builds a chemical report.
///
/// The average initial weight divides the sum of the entered initial weights by the number of
/// samples; a sample with no entered weight counts as zero.
pub fn chemical_report(
    method: AnalysisMode,
    run: &AnalysisRun<ChemicalFiberResult>,
    initial_weights: &[Option<f64>],
) -> Result<ChemicalReport, ReportError> {
    if run.samples.is_empty() {
        return Err(ReportError::EmptyRun);
    }
    let entered: f64 = initial_weights.iter().map(|w| w.unwrap_or(0.0)).sum();
    let average_initial_weight = entered / run.samples.len() as f64;
    if !average_initial_weight.is_finite() || average_initial_weight <= 0.0 {
        return Err(ReportError::UndefinedInitialWeight {
            average: average_initial_weight,
        });
    }

    Ok(ChemicalReport {
        method,
        samples: run.samples.clone(),
        without_moisture: run.aggregation.without_moisture.clone(),
        with_moisture: run.aggregation.with_moisture.clone(),
        average_initial_weight,
    })
}

pub fn garment_report(run: &AnalysisRun<GarmentFiberResult>) -> Result<GarmentReport, ReportError> {
    if run.samples.is_empty() {
        return Err(ReportError::EmptyRun);
    }
    Ok(GarmentReport {
        samples: run.samples.clone(),
        without_moisture: run.aggregation.without_moisture.clone(),
        with_moisture: run.aggregation.with_moisture.clone(),
    })
}

/// Turns a successful analysis into a report ready for export.
pub fn assemble(outcome: &AnalysisOutcome) -> Result<Report, ReportError> {
    match outcome {
        AnalysisOutcome::Manual(run) => manual_report(run).map(Report::Manual),
        AnalysisOutcome::Chemical {
            method,
            run,
            initial_weights,
        } => chemical_report(*method, run, initial_weights).map(Report::Chemical),
        AnalysisOutcome::Garments(run) => garment_report(run).map(Report::Garments),
    }
}
