use super::garment::GarmentComponent;
use super::observation::FiberObservation;
use super::residue::ResidueStep;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnalysisMode {
    Manual,
    ChemicalResidue,
    ChemicalComponent,
    Garments,
}

impl AnalysisMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisMode::Manual => "manual",
            AnalysisMode::ChemicalResidue => "chemical-residue",
            AnalysisMode::ChemicalComponent => "chemical-component",
            AnalysisMode::Garments => "garments",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error(
    "Unknown analysis mode '{0}'. Expected 'manual', 'chemical-residue', 'chemical-component' or 'garments'."
)]
pub struct ParseAnalysisModeError(pub String);

impl FromStr for AnalysisMode {
    type Err = ParseAnalysisModeError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "manual" => Ok(AnalysisMode::Manual),
            "chemical-residue" | "residue" => Ok(AnalysisMode::ChemicalResidue),
            "chemical-component" | "component" => Ok(AnalysisMode::ChemicalComponent),
            "garments" | "garment" => Ok(AnalysisMode::Garments),
            _ => Err(ParseAnalysisModeError(s.to_string())),
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Manual separation: every fiber was physically separated and weighed dry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ManualSample {
    pub fibers: Vec<FiberObservation>,
}

/// Chemical separation by successive dissolution of a sample of known dry weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResidueSample {
    pub initial_weight: f64,
    pub steps: Vec<ResidueStep>,
}

/// Chemical separation where each recovered fiber was weighed directly.
///
/// Without an explicit initial weight the recovered total is the percentage basis.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ComponentSample {
    pub initial_weight: Option<f64>,
    pub fibers: Vec<FiberObservation>,
}

/// One garment broken down into its components.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GarmentSample {
    pub components: Vec<GarmentComponent>,
}
