use super::error::CompositionError;
use crate::core::models::observation::FiberObservation;
use crate::core::models::results::ManualFiberResult;
use crate::core::models::sample::ManualSample;
use tracing::debug;

fn contributes(fiber: &FiberObservation) -> bool {
    fiber.dry_weight.is_finite()
        && fiber.dry_weight > 0.0
        && fiber.moisture_regain.is_finite()
        && fiber.moisture_regain >= 0.0
}

/// Computes the composition of one manually separated sample.
///
/// Fibers with a non-positive dry weight or a negative moisture regain do not contribute to the
/// dry-weight total and are reported as zero rows, keeping their position and name.
pub fn compute(sample: &ManualSample) -> Result<Vec<ManualFiberResult>, CompositionError> {
    if sample.fibers.is_empty() {
        return Err(CompositionError::EmptyComponentList);
    }

    let total_dry_weight: f64 = sample
        .fibers
        .iter()
        .filter(|f| contributes(f))
        .map(|f| f.dry_weight)
        .sum();

    let results = sample
        .fibers
        .iter()
        .map(|fiber| {
            if !contributes(fiber) {
                return ManualFiberResult::excluded(fiber.name.clone());
            }
            let percentage = if total_dry_weight > 0.0 {
                fiber.dry_weight / total_dry_weight * 100.0
            } else {
                0.0
            };
            ManualFiberResult {
                name: fiber.name.clone(),
                dry_weight: fiber.dry_weight,
                moisture_content: fiber.moisture_regain,
                wet_weight: fiber.conditioned_weight(),
                percentage,
            }
        })
        .collect::<Vec<_>>();

    debug!(
        fibers = results.len(),
        total_dry_weight, "Manual sample computed."
    );
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(fibers: &[(&str, f64, f64)]) -> ManualSample {
        ManualSample {
            fibers: fibers
                .iter()
                .map(|&(name, dry, moisture)| FiberObservation::new(name, dry, moisture))
                .collect(),
        }
    }

    fn percentage_sum(results: &[ManualFiberResult]) -> f64 {
        results.iter().map(|r| r.percentage).sum()
    }

    #[test]
    fn cotton_polyester_blend_matches_hand_calculation() {
        let results = compute(&sample(&[("Cotton", 60.0, 8.5), ("Polyester", 40.0, 0.4)])).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name, "Cotton");
        assert!((results[0].percentage - 60.0).abs() < 1e-9);
        assert!((results[1].percentage - 40.0).abs() < 1e-9);
        assert!((results[0].wet_weight - 65.1).abs() < 1e-9);
        assert!((results[1].wet_weight - 40.16).abs() < 1e-9);
        assert_eq!(results[0].moisture_content, 8.5);
    }

    #[test]
    fn percentages_sum_to_one_hundred() {
        let results = compute(&sample(&[
            ("Wool", 3.217, 17.0),
            ("Nylon", 1.093, 4.5),
            ("Elastane", 0.311, 1.3),
        ]))
        .unwrap();
        assert!((percentage_sum(&results) - 100.0).abs() < 1e-6);
    }

    #[test]
    fn invalid_fibers_are_reported_as_zero_rows() {
        let results = compute(&sample(&[
            ("Cotton", 50.0, 8.5),
            ("Ghost", 0.0, 8.5),
            ("Negative", -4.0, 1.0),
            ("Damp", 10.0, -1.0),
            ("Polyester", 50.0, 0.4),
        ]))
        .unwrap();

        assert_eq!(results.len(), 5);
        for excluded in &results[1..4] {
            assert_eq!(excluded.dry_weight, 0.0);
            assert_eq!(excluded.moisture_content, 0.0);
            assert_eq!(excluded.wet_weight, 0.0);
            assert_eq!(excluded.percentage, 0.0);
        }
        assert_eq!(results[3].name, "Damp");
        assert!((results[0].percentage - 50.0).abs() < 1e-9);
        assert!((percentage_sum(&results) - 100.0).abs() < 1e-6);
    }

    #[test]
    fn sample_without_valid_fibers_yields_zero_percentages() {
        let results = compute(&sample(&[("A", 0.0, 1.0), ("B", f64::NAN, 1.0)])).unwrap();
        assert!(results.iter().all(|r| r.percentage == 0.0));
        assert!(results.iter().all(|r| !r.percentage.is_nan()));
    }

    #[test]
    fn empty_sample_is_rejected() {
        let result = compute(&ManualSample::default());
        assert_eq!(result, Err(CompositionError::EmptyComponentList));
    }

    #[test]
    fn output_preserves_input_order() {
        let results = compute(&sample(&[("Z", 1.0, 0.0), ("A", 1.0, 0.0), ("M", 1.0, 0.0)])).unwrap();
        let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Z", "A", "M"]);
    }
}
