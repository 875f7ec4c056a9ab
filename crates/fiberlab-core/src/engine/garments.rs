use super::config::CalculationConfig;
use super::error::CompositionError;
use crate::core::models::garment::GarmentComponent;
use crate::core::models::results::GarmentFiberResult;
use crate::core::models::sample::GarmentSample;
use crate::core::utils::tally::FiberTally;
use tracing::debug;

const UNSPECIFIED_FIBER: &str = "Unspecified";

fn check_component(
    position: usize,
    component: &GarmentComponent,
    config: &CalculationConfig,
) -> Result<(), CompositionError> {
    let invalid = |reason: String| CompositionError::InvalidComponent {
        component: position,
        reason,
    };

    if component.name.trim().is_empty() {
        return Err(invalid("a component name is required".to_string()));
    }
    if !component.weight.is_finite() || component.weight <= 0.0 {
        return Err(invalid(format!(
            "weight of '{}' must be positive (got {})",
            component.name, component.weight
        )));
    }
    if let Some(share) = component
        .fibers
        .iter()
        .find(|s| !s.percent.is_finite() || s.percent < 0.0)
    {
        return Err(invalid(format!(
            "fiber '{}' in '{}' has an invalid percentage ({})",
            share.fiber_name, component.name, share.percent
        )));
    }

    let sum = component.percent_sum();
    if (sum - 100.0).abs() > config.percentage_tolerance {
        return Err(CompositionError::PercentageMismatch {
            component: component.name.clone(),
            sum,
        });
    }
    Ok(())
}

/// Computes the overall fiber composition of one garment.
///
/// Each component contributes `weight * percent / 100` grams of each of its fibers. Contributions
/// are merged by exact fiber name, in the order fibers are first seen.
pub fn compute(
    sample: &GarmentSample,
    config: &CalculationConfig,
) -> Result<Vec<GarmentFiberResult>, CompositionError> {
    if sample.components.is_empty() {
        return Err(CompositionError::EmptyComponentList);
    }
    for (i, component) in sample.components.iter().enumerate() {
        check_component(i + 1, component, config)?;
    }

    let total_weight: f64 = sample.components.iter().map(|c| c.weight).sum();
    if total_weight <= 0.0 {
        return Err(CompositionError::ZeroTotalWeight {
            total: total_weight,
        });
    }

    let mut tally: FiberTally<f64> = FiberTally::new();
    for component in &sample.components {
        for share in &component.fibers {
            let name = if share.fiber_name.trim().is_empty() {
                UNSPECIFIED_FIBER
            } else {
                share.fiber_name.as_str()
            };
            tally.add(name, component.weight * share.percent / 100.0);
        }
    }

    debug!(
        components = sample.components.len(),
        fibers = tally.len(),
        total_weight,
        "Garment computed."
    );

    Ok(tally
        .into_iter()
        .map(|(fiber_name, weight)| GarmentFiberResult {
            fiber_name,
            total_weight: weight,
            overall_percentage: weight / total_weight * 100.0,
        })
        .collect())
}
