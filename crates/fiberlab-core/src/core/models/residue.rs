use serde::{Deserialize, Serialize};

/// One dissolution step of a chemical separation chain.
///
/// `residue_weight` is the undissolved mass left after dissolving `dissolved_fiber`. The last
/// step of a chain never carries a measured weight: its fiber is whatever residue remains, so it
/// is built with [`ResidueStep::final_residue`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResidueStep {
    pub dissolved_fiber: String,
    pub residue_weight: Option<f64>,
    pub moisture_regain: f64,
}

impl ResidueStep {
    pub fn weighed(
        dissolved_fiber: impl Into<String>,
        residue_weight: f64,
        moisture_regain: f64,
    ) -> Self {
        Self {
            dissolved_fiber: dissolved_fiber.into(),
            residue_weight: Some(residue_weight),
            moisture_regain,
        }
    }

    pub fn final_residue(fiber: impl Into<String>, moisture_regain: f64) -> Self {
        Self {
            dissolved_fiber: fiber.into(),
            residue_weight: None,
            moisture_regain,
        }
    }

    pub fn is_final(&self) -> bool {
        self.residue_weight.is_none()
    }
}
