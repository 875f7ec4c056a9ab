use serde::{Deserialize, Serialize};

/// Scales a dry weight to its conditioned weight under the given moisture regain.
#[inline]
pub fn conditioned_weight(dry_weight: f64, moisture_regain: f64) -> f64 {
    dry_weight * (1.0 + moisture_regain / 100.0)
}

/// A measured fiber within one sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiberObservation {
    pub name: String,
    pub dry_weight: f64,      // Grams, moisture removed
    pub moisture_regain: f64, // Percent of dry weight
}

impl FiberObservation {
    pub fn new(name: impl Into<String>, dry_weight: f64, moisture_regain: f64) -> Self {
        Self {
            name: name.into(),
            dry_weight,
            moisture_regain,
        }
    }

    #[inline]
    pub fn conditioned_weight(&self) -> f64 {
        conditioned_weight(self.dry_weight, self.moisture_regain)
    }
}
