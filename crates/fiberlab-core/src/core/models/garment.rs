use serde::{Deserialize, Serialize};

/// The share of one fiber inside a garment component, in percent of the component weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiberShare {
    pub fiber_name: String,
    pub percent: f64,
}

impl FiberShare {
    pub fn new(fiber_name: impl Into<String>, percent: f64) -> Self {
        Self {
            fiber_name: fiber_name.into(),
            percent,
        }
    }
}

/// A physically separable part of a garment (body, lining, trim, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GarmentComponent {
    pub name: String,
    pub weight: f64,
    pub fibers: Vec<FiberShare>,
}

impl GarmentComponent {
    pub fn new(name: impl Into<String>, weight: f64, fibers: Vec<FiberShare>) -> Self {
        Self {
            name: name.into(),
            weight,
            fibers,
        }
    }

    /// Sum of the declared fiber percentages. Should be 100 for a well-formed component.
    pub fn percent_sum(&self) -> f64 {
        self.fibers.iter().map(|f| f.percent).sum()
    }
}
