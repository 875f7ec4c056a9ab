use super::results::{ChemicalFiberResult, GarmentFiberResult, ManualFiberResult};
use super::sample::AnalysisMode;
use serde::Serialize;

/// Everything a manual-separation report shows: every sample's rows and both averaged views.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManualReport {
    pub samples: Vec<Vec<ManualFiberResult>>,
    pub without_moisture: Vec<ManualFiberResult>,
    pub with_moisture: Vec<ManualFiberResult>,
    pub total_dry_weight: f64, // Sum of the averaged dry weights
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChemicalReport {
    /// Either [`AnalysisMode::ChemicalResidue`] or [`AnalysisMode::ChemicalComponent`].
    pub method: AnalysisMode,
    pub samples: Vec<Vec<ChemicalFiberResult>>,
    pub without_moisture: Vec<ChemicalFiberResult>,
    pub with_moisture: Vec<ChemicalFiberResult>,
    pub average_initial_weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GarmentReport {
    pub samples: Vec<Vec<GarmentFiberResult>>,
    pub without_moisture: Vec<GarmentFiberResult>,
    pub with_moisture: Vec<GarmentFiberResult>,
}

/// A finished analysis, ready to be rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Report {
    Manual(ManualReport),
    Chemical(ChemicalReport),
    Garments(GarmentReport),
}

impl Report {
    pub fn mode(&self) -> AnalysisMode {
        match self {
            Report::Manual(_) => AnalysisMode::Manual,
            Report::Chemical(report) => report.method,
            Report::Garments(_) => AnalysisMode::Garments,
        }
    }

    pub fn sample_count(&self) -> usize {
        match self {
            Report::Manual(report) => report.samples.len(),
            Report::Chemical(report) => report.samples.len(),
            Report::Garments(report) => report.samples.len(),
        }
    }
}
