use serde::{Deserialize, Serialize};

/// A manual-separation row.
///
/// `percentage` is the fiber's share of the sample's summed dry weight. Fibers excluded from the
/// sum (non-positive dry weight, negative moisture) are reported with every numeric field zeroed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ManualFiberResult {
    pub name: String,
    pub dry_weight: f64,
    pub moisture_content: f64,
    pub wet_weight: f64,
    pub percentage: f64,
}

impl ManualFiberResult {
    pub fn excluded(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A chemical-separation row, shared by residue and component modes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChemicalFiberResult {
    pub name: String,
    pub dry_weight: f64,
    pub dry_percentage: f64,         // Against the sample's basis weight
    pub conditioned_percentage: f64, // Against the summed conditioned weights
}

/// A garment-analysis row: one distinct fiber across all components of a garment.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GarmentFiberResult {
    pub fiber_name: String,
    pub total_weight: f64,
    pub overall_percentage: f64,
}
