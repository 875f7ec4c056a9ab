//! Cross-sample averaging.
//!
//! Rows from several samples of the same material are grouped by exact fiber name and averaged
//! over the number of samples in which the fiber occurs. Every mode produces two views of the
//! averages, one that ignores moisture and one that accounts for it; how each view is rebuilt
//! from the averaged measures is up to the row type through [`CompositionRecord`].
//!
//! A fiber listed twice in the same sample is merged into one entry before averaging, so a fiber
//! is never counted more than once per sample.

use crate::core::models::results::{ChemicalFiberResult, GarmentFiberResult, ManualFiberResult};
use crate::core::utils::tally::FiberTally;
use serde::Serialize;
use std::ops::{Add, AddAssign, Div};

/// The numeric side of a result row, in a form that can be summed and averaged.
///
/// Not every mode uses every field.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FiberMeasures {
    pub dry_weight: f64,
    pub dry_percentage: f64,
    pub conditioned_percentage: f64,
    pub moisture_content: f64,
    pub wet_weight: f64,
}

impl FiberMeasures {
    /// Folds a second entry for the same fiber within one sample into this one.
    ///
    /// Weights and percentages add up. Moisture content is averaged, weighted by dry weight.
    fn absorb_duplicate(&mut self, other: Self) {
        let combined_dry = self.dry_weight + other.dry_weight;
        let moisture_content = if combined_dry > 0.0 {
            (self.moisture_content * self.dry_weight + other.moisture_content * other.dry_weight)
                / combined_dry
        } else {
            (self.moisture_content + other.moisture_content) / 2.0
        };
        *self += other;
        self.moisture_content = moisture_content;
    }
}

impl Add for FiberMeasures {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            dry_weight: self.dry_weight + rhs.dry_weight,
            dry_percentage: self.dry_percentage + rhs.dry_percentage,
            conditioned_percentage: self.conditioned_percentage + rhs.conditioned_percentage,
            moisture_content: self.moisture_content + rhs.moisture_content,
            wet_weight: self.wet_weight + rhs.wet_weight,
        }
    }
}

impl AddAssign for FiberMeasures {
    fn add_assign(&mut self, rhs: Self) {
        self.dry_weight += rhs.dry_weight;
        self.dry_percentage += rhs.dry_percentage;
        self.conditioned_percentage += rhs.conditioned_percentage;
        self.moisture_content += rhs.moisture_content;
        self.wet_weight += rhs.wet_weight;
    }
}

impl Div<f64> for FiberMeasures {
    type Output = Self;

    fn div(self, rhs: f64) -> Self::Output {
        Self {
            dry_weight: self.dry_weight / rhs,
            dry_percentage: self.dry_percentage / rhs,
            conditioned_percentage: self.conditioned_percentage / rhs,
            moisture_content: self.moisture_content / rhs,
            wet_weight: self.wet_weight / rhs,
        }
    }
}

/// A per-sample result row that can be averaged across samples.
pub trait CompositionRecord: Sized {
    fn fiber_name(&self) -> &str;

    fn measures(&self) -> FiberMeasures;

    /// Builds the moisture-free view of one fiber from its averaged measures.
    fn without_moisture(name: String, mean: &FiberMeasures) -> Self;

    /// Builds the moisture-aware view of one fiber. `total_wet_weight` is the sum of the averaged
    /// wet weights of every fiber in the aggregation.
    fn with_moisture(name: String, mean: &FiberMeasures, total_wet_weight: f64) -> Self;
}

impl CompositionRecord for ManualFiberResult {
    fn fiber_name(&self) -> &str {
        &self.name
    }

    fn measures(&self) -> FiberMeasures {
        FiberMeasures {
            dry_weight: self.dry_weight,
            dry_percentage: self.percentage,
            conditioned_percentage: 0.0,
            moisture_content: self.moisture_content,
            wet_weight: self.wet_weight,
        }
    }

    fn without_moisture(name: String, mean: &FiberMeasures) -> Self {
        Self {
            name,
            dry_weight: mean.dry_weight,
            moisture_content: mean.moisture_content,
            wet_weight: 0.0,
            percentage: mean.dry_percentage,
        }
    }

    // Ratio of the averaged wet weights, not an average of per-sample ratios.
    fn with_moisture(name: String, mean: &FiberMeasures, total_wet_weight: f64) -> Self {
        Self {
            name,
            dry_weight: mean.dry_weight,
            moisture_content: mean.moisture_content,
            wet_weight: mean.wet_weight,
            percentage: if total_wet_weight > 0.0 {
                mean.wet_weight / total_wet_weight * 100.0
            } else {
                0.0
            },
        }
    }
}

impl CompositionRecord for ChemicalFiberResult {
    fn fiber_name(&self) -> &str {
        &self.name
    }

    fn measures(&self) -> FiberMeasures {
        FiberMeasures {
            dry_weight: self.dry_weight,
            dry_percentage: self.dry_percentage,
            conditioned_percentage: self.conditioned_percentage,
            ..FiberMeasures::default()
        }
    }

    fn without_moisture(name: String, mean: &FiberMeasures) -> Self {
        Self {
            name,
            dry_weight: mean.dry_weight,
            dry_percentage: mean.dry_percentage,
            conditioned_percentage: 0.0,
        }
    }

    fn with_moisture(name: String, mean: &FiberMeasures, _total_wet_weight: f64) -> Self {
        Self {
            name,
            dry_weight: mean.dry_weight,
            dry_percentage: 0.0,
            conditioned_percentage: mean.conditioned_percentage,
        }
    }
}

impl CompositionRecord for GarmentFiberResult {
    fn fiber_name(&self) -> &str {
        &self.fiber_name
    }

    fn measures(&self) -> FiberMeasures {
        FiberMeasures {
            dry_weight: self.total_weight,
            dry_percentage: self.overall_percentage,
            ..FiberMeasures::default()
        }
    }

    fn without_moisture(name: String, mean: &FiberMeasures) -> Self {
        Self {
            fiber_name: name,
            total_weight: mean.dry_weight,
            overall_percentage: mean.dry_percentage,
        }
    }

    // Garment percentages carry no moisture correction; both views coincide.
    fn with_moisture(name: String, mean: &FiberMeasures, _total_wet_weight: f64) -> Self {
        Self::without_moisture(name, mean)
    }
}

/// Averaged composition over a set of samples, in first-seen fiber order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregation<R> {
    pub without_moisture: Vec<R>,
    pub with_moisture: Vec<R>,
}

fn sample_measures<R: CompositionRecord>(rows: &[R]) -> FiberTally<FiberMeasures> {
    let mut merged: FiberTally<Option<FiberMeasures>> = FiberTally::new();
    for row in rows {
        let slot = merged.entry_or_insert_with(row.fiber_name(), || None);
        match slot {
            Some(existing) => existing.absorb_duplicate(row.measures()),
            None => *slot = Some(row.measures()),
        }
    }

    let mut measures = FiberTally::new();
    for (name, entry) in merged {
        if let Some(m) = entry {
            measures.add(&name, m);
        }
    }
    measures
}

/// Averages per-sample results by fiber name.
///
/// A fiber's mean is taken over the samples that contain it, not over all samples.
pub fn aggregate<R: CompositionRecord>(samples: &[Vec<R>]) -> Aggregation<R> {
    let mut groups: FiberTally<(FiberMeasures, usize)> = FiberTally::new();
    for rows in samples {
        for (name, measures) in sample_measures(rows) {
            let (sum, count) = groups.entry_or_insert_with(&name, Default::default);
            *sum += measures;
            *count += 1;
        }
    }

    let means: Vec<(String, FiberMeasures)> = groups
        .into_iter()
        .map(|(name, (sum, count))| (name, sum / count as f64))
        .collect();
    let total_wet_weight: f64 = means.iter().map(|(_, m)| m.wet_weight).sum();

    Aggregation {
        without_moisture: means
            .iter()
            .map(|(name, mean)| R::without_moisture(name.clone(), mean))
            .collect(),
        with_moisture: means
            .into_iter()
            .map(|(name, mean)| R::with_moisture(name, &mean, total_wet_weight))
            .collect(),
    }
}
