//! Chemical separation.
//!
//! Two ways of arriving at per-fiber dry weights share one normalization step:
//!
//! - **Residue mode** dissolves one fiber at a time out of a sample of known dry weight and
//!   weighs what is left. Each dissolved fiber's weight is the drop between consecutive residues;
//!   the last fiber is whatever never dissolved.
//! - **Component mode** weighs every recovered fiber directly.
//!
//! Dry percentages are taken against the sample's basis weight, conditioned percentages against
//! the sum of all conditioned weights in the sample.

use super::error::CompositionError;
use crate::core::models::observation::conditioned_weight;
use crate::core::models::results::ChemicalFiberResult;
use crate::core::models::sample::{ComponentSample, ResidueSample};
use tracing::{debug, warn};

const FINAL_RESIDUE_NAME: &str = "Final Residue";

struct RecoveredFiber {
    name: String,
    dry_weight: f64,
    moisture_regain: f64,
}

fn check_regain(fiber: &str, value: f64) -> Result<f64, CompositionError> {
    if !value.is_finite() || value < 0.0 {
        return Err(CompositionError::InvalidMoistureRegain {
            fiber: fiber.to_string(),
            value,
        });
    }
    Ok(value)
}

fn normalize(fibers: Vec<RecoveredFiber>, basis_weight: f64) -> Vec<ChemicalFiberResult> {
    let conditioned: Vec<f64> = fibers
        .iter()
        .map(|f| conditioned_weight(f.dry_weight, f.moisture_regain))
        .collect();
    let total_conditioned: f64 = conditioned.iter().sum();

    fibers
        .into_iter()
        .zip(conditioned)
        .map(|(fiber, conditioned)| ChemicalFiberResult {
            dry_percentage: fiber.dry_weight / basis_weight * 100.0,
            conditioned_percentage: if total_conditioned > 0.0 {
                conditioned / total_conditioned * 100.0
            } else {
                0.0
            },
            name: fiber.name,
            dry_weight: fiber.dry_weight,
        })
        .collect()
}

/// Computes one sample separated by successive dissolution.
///
/// Validation runs in chain order and stops at the first problem: a non-positive initial weight,
/// then for each intermediate step a missing, negative or non-numeric residue, then a residue
/// heavier than the one before it.
pub fn compute_residue(sample: &ResidueSample) -> Result<Vec<ChemicalFiberResult>, CompositionError> {
    let Some((last, intermediate)) = sample.steps.split_last() else {
        return Err(CompositionError::EmptyStepList);
    };

    let initial_weight = sample.initial_weight;
    if !initial_weight.is_finite() || initial_weight <= 0.0 {
        return Err(CompositionError::InvalidBasisWeight {
            value: Some(initial_weight),
        });
    }

    let mut fibers = Vec::with_capacity(sample.steps.len());
    let mut previous = initial_weight;

    for (i, step) in intermediate.iter().enumerate() {
        let step_number = i + 1;
        let residue = match step.residue_weight {
            Some(w) if w.is_finite() && w >= 0.0 => w,
            other => {
                return Err(CompositionError::InvalidStepWeight {
                    step: step_number,
                    value: other,
                });
            }
        };
        if residue > previous {
            return Err(CompositionError::NonMonotonicResidue {
                step: step_number,
                residue,
                previous,
            });
        }

        let name = if step.dissolved_fiber.trim().is_empty() {
            let placeholder = format!("Fiber from Step {}", step_number);
            warn!("Step {} has no fiber name; using '{}'.", step_number, placeholder);
            placeholder
        } else {
            step.dissolved_fiber.clone()
        };
        let moisture_regain = check_regain(&name, step.moisture_regain)?;

        fibers.push(RecoveredFiber {
            name,
            dry_weight: previous - residue,
            moisture_regain,
        });
        previous = residue;
    }

    if let Some(ignored) = last.residue_weight {
        warn!(
            "The final step carries a residue weight ({}g) which is ignored; its fiber is the remaining residue.",
            ignored
        );
    }
    let name = if last.dissolved_fiber.trim().is_empty() {
        FINAL_RESIDUE_NAME.to_string()
    } else {
        last.dissolved_fiber.clone()
    };
    let moisture_regain = check_regain(&name, last.moisture_regain)?;
    fibers.push(RecoveredFiber {
        name,
        dry_weight: previous,
        moisture_regain,
    });

    debug!(
        steps = sample.steps.len(),
        initial_weight,
        final_residue = previous,
        "Residue chain computed."
    );
    Ok(normalize(fibers, initial_weight))
}

/// Computes one sample whose fibers were weighed individually.
///
/// The basis is the recorded initial weight when it is positive. An absent or zero initial
/// weight falls back to the recovered total.
pub fn compute_component(
    sample: &ComponentSample,
) -> Result<Vec<ChemicalFiberResult>, CompositionError> {
    if sample.fibers.is_empty() {
        return Err(CompositionError::EmptyComponentList);
    }

    let mut fibers = Vec::with_capacity(sample.fibers.len());
    for (i, fiber) in sample.fibers.iter().enumerate() {
        if !fiber.dry_weight.is_finite() || fiber.dry_weight < 0.0 {
            return Err(CompositionError::InvalidStepWeight {
                step: i + 1,
                value: Some(fiber.dry_weight),
            });
        }
        fibers.push(RecoveredFiber {
            name: fiber.name.clone(),
            dry_weight: fiber.dry_weight,
            moisture_regain: check_regain(&fiber.name, fiber.moisture_regain)?,
        });
    }

    let total_dry_weight: f64 = fibers.iter().map(|f| f.dry_weight).sum();
    if total_dry_weight <= 0.0 {
        return Err(CompositionError::ZeroTotalWeight {
            total: total_dry_weight,
        });
    }

    let basis_weight = match sample.initial_weight {
        Some(w) if w.is_finite() && w > 0.0 => w,
        None => total_dry_weight,
        Some(w) if w == 0.0 => total_dry_weight,
        Some(w) => {
            return Err(CompositionError::InvalidBasisWeight { value: Some(w) });
        }
    };

    debug!(
        fibers = fibers.len(),
        total_dry_weight, basis_weight, "Component sample computed."
    );
    Ok(normalize(fibers, basis_weight))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::observation::FiberObservation;
    use crate::core::models::residue::ResidueStep;

    fn residue_sample(initial_weight: f64, steps: Vec<ResidueStep>) -> ResidueSample {
        ResidueSample {
            initial_weight,
            steps,
        }
    }

    #[test]
    fn two_step_chain_splits_initial_weight() {
        let sample = residue_sample(
            10.0,
            vec![
                ResidueStep::weighed("A", 7.0, 0.0),
                ResidueStep::final_residue("B", 0.0),
            ],
        );
        let results = compute_residue(&sample).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name, "A");
        assert!((results[0].dry_weight - 3.0).abs() < 1e-9);
        assert!((results[1].dry_weight - 7.0).abs() < 1e-9);
        assert!((results[0].dry_percentage - 30.0).abs() < 1e-9);
        assert!((results[1].dry_percentage - 70.0).abs() < 1e-9);
    }

    #[test]
    fn residue_heavier_than_initial_weight_is_rejected() {
        let sample = residue_sample(
            10.0,
            vec![
                ResidueStep::weighed("A", 12.0, 0.0),
                ResidueStep::final_residue("B", 0.0),
            ],
        );
        assert_eq!(
            compute_residue(&sample),
            Err(CompositionError::NonMonotonicResidue {
                step: 1,
                residue: 12.0,
                previous: 10.0
            })
        );
    }

    #[test]
    fn residue_heavier_than_previous_residue_is_rejected() {
        let sample = residue_sample(
            10.0,
            vec![
                ResidueStep::weighed("A", 6.0, 0.0),
                ResidueStep::weighed("B", 6.5, 0.0),
                ResidueStep::final_residue("C", 0.0),
            ],
        );
        assert!(matches!(
            compute_residue(&sample),
            Err(CompositionError::NonMonotonicResidue { step: 2, .. })
        ));
    }

    #[test]
    fn equal_consecutive_residues_are_allowed() {
        let sample = residue_sample(
            5.0,
            vec![
                ResidueStep::weighed("Absent", 5.0, 0.0),
                ResidueStep::final_residue("Everything", 0.0),
            ],
        );
        let results = compute_residue(&sample).unwrap();
        assert_eq!(results[0].dry_weight, 0.0);
        assert_eq!(results[1].dry_weight, 5.0);
    }

    #[test]
    fn final_fiber_is_initial_weight_minus_dissolved_weights() {
        let sample = residue_sample(
            12.3456,
            vec![
                ResidueStep::weighed("Acetate", 10.1111, 6.0),
                ResidueStep::weighed("Nylon", 7.0202, 4.5),
                ResidueStep::weighed("Viscose", 2.5, 13.0),
                ResidueStep::final_residue("Polyester", 0.4),
            ],
        );
        let results = compute_residue(&sample).unwrap();
        let dissolved: f64 = results[..3].iter().map(|r| r.dry_weight).sum();

        assert!(results.iter().all(|r| r.dry_weight >= 0.0));
        assert!((results[3].dry_weight - (12.3456 - dissolved)).abs() < 1e-9);
        let dry_sum: f64 = results.iter().map(|r| r.dry_percentage).sum();
        assert!((dry_sum - 100.0).abs() < 1e-6);
        let conditioned_sum: f64 = results.iter().map(|r| r.conditioned_percentage).sum();
        assert!((conditioned_sum - 100.0).abs() < 1e-6);
    }

    #[test]
    fn single_step_chain_assigns_everything_to_final_fiber() {
        let sample = residue_sample(4.0, vec![ResidueStep::final_residue("Cotton", 8.5)]);
        let results = compute_residue(&sample).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].dry_weight, 4.0);
        assert!((results[0].dry_percentage - 100.0).abs() < 1e-9);
        assert!((results[0].conditioned_percentage - 100.0).abs() < 1e-9);
    }

    #[test]
    fn conditioned_percentages_use_moisture_regain() {
        let sample = residue_sample(
            100.0,
            vec![
                ResidueStep::weighed("Cotton", 40.0, 8.5),
                ResidueStep::final_residue("Polyester", 0.4),
            ],
        );
        let results = compute_residue(&sample).unwrap();
        let total = 65.1 + 40.16;
        assert!((results[0].conditioned_percentage - 65.1 / total * 100.0).abs() < 1e-9);
        assert!((results[1].conditioned_percentage - 40.16 / total * 100.0).abs() < 1e-9);
    }

    #[test]
    fn invalid_initial_weight_is_checked_before_steps() {
        for w in [0.0, -1.0, f64::NAN] {
            let sample = residue_sample(
                w,
                vec![
                    ResidueStep::weighed("A", -3.0, 0.0),
                    ResidueStep::final_residue("B", 0.0),
                ],
            );
            assert!(matches!(
                compute_residue(&sample),
                Err(CompositionError::InvalidBasisWeight { .. })
            ));
        }
    }

    #[test]
    fn missing_or_negative_intermediate_residue_is_rejected() {
        let missing = residue_sample(
            10.0,
            vec![
                ResidueStep::final_residue("A", 0.0),
                ResidueStep::final_residue("B", 0.0),
            ],
        );
        assert_eq!(
            compute_residue(&missing),
            Err(CompositionError::InvalidStepWeight {
                step: 1,
                value: None
            })
        );

        let negative = residue_sample(
            10.0,
            vec![
                ResidueStep::weighed("A", 5.0, 0.0),
                ResidueStep::weighed("B", -0.1, 0.0),
                ResidueStep::final_residue("C", 0.0),
            ],
        );
        assert_eq!(
            compute_residue(&negative),
            Err(CompositionError::InvalidStepWeight {
                step: 2,
                value: Some(-0.1)
            })
        );
    }

    #[test]
    fn empty_chain_is_rejected() {
        let sample = residue_sample(10.0, Vec::new());
        assert_eq!(compute_residue(&sample), Err(CompositionError::EmptyStepList));
    }

    #[test]
    fn blank_fiber_names_get_placeholders() {
        let sample = residue_sample(
            10.0,
            vec![
                ResidueStep::weighed("", 8.0, 0.0),
                ResidueStep::weighed("  ", 5.0, 0.0),
                ResidueStep::final_residue("", 0.0),
            ],
        );
        let names: Vec<String> = compute_residue(&sample)
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(
            names,
            vec!["Fiber from Step 1", "Fiber from Step 2", "Final Residue"]
        );
    }

    #[test]
    fn weight_on_final_step_is_ignored() {
        let sample = residue_sample(
            10.0,
            vec![
                ResidueStep::weighed("A", 7.0, 0.0),
                ResidueStep::weighed("B", 1.0, 0.0),
            ],
        );
        let results = compute_residue(&sample).unwrap();
        assert_eq!(results[1].dry_weight, 7.0);
    }

    #[test]
    fn negative_moisture_regain_is_rejected() {
        let sample = residue_sample(
            10.0,
            vec![
                ResidueStep::weighed("A", 7.0, -2.0),
                ResidueStep::final_residue("B", 0.0),
            ],
        );
        assert!(matches!(
            compute_residue(&sample),
            Err(CompositionError::InvalidMoistureRegain { fiber, value }) if fiber == "A" && value == -2.0
        ));
    }

    fn component_sample(initial_weight: Option<f64>, fibers: &[(&str, f64, f64)]) -> ComponentSample {
        ComponentSample {
            initial_weight,
            fibers: fibers
                .iter()
                .map(|&(name, dry, moisture)| FiberObservation::new(name, dry, moisture))
                .collect(),
        }
    }

    #[test]
    fn component_mode_uses_explicit_initial_weight_as_basis() {
        let sample = component_sample(Some(10.0), &[("Cotton", 5.5, 8.5), ("Polyester", 4.0, 0.4)]);
        let results = compute_component(&sample).unwrap();
        assert!((results[0].dry_percentage - 55.0).abs() < 1e-9);
        assert!((results[1].dry_percentage - 40.0).abs() < 1e-9);
        let conditioned_sum: f64 = results.iter().map(|r| r.conditioned_percentage).sum();
        assert!((conditioned_sum - 100.0).abs() < 1e-6);
    }

    #[test]
    fn component_mode_falls_back_to_recovered_total() {
        for initial_weight in [None, Some(0.0)] {
            let sample = component_sample(initial_weight, &[("Cotton", 3.0, 8.5), ("Wool", 1.0, 17.0)]);
            let results = compute_component(&sample).unwrap();
            assert!((results[0].dry_percentage - 75.0).abs() < 1e-9);
            assert!((results[1].dry_percentage - 25.0).abs() < 1e-9);
        }
    }

    #[test]
    fn component_mode_rejects_negative_initial_weight() {
        let sample = component_sample(Some(-1.0), &[("Cotton", 3.0, 8.5)]);
        assert_eq!(
            compute_component(&sample),
            Err(CompositionError::InvalidBasisWeight { value: Some(-1.0) })
        );
    }

    #[test]
    fn component_mode_rejects_zero_total() {
        let sample = component_sample(Some(10.0), &[("Cotton", 0.0, 8.5), ("Wool", 0.0, 17.0)]);
        assert_eq!(
            compute_component(&sample),
            Err(CompositionError::ZeroTotalWeight { total: 0.0 })
        );
    }

    #[test]
    fn component_mode_rejects_negative_dry_weight() {
        let sample = component_sample(None, &[("Cotton", 3.0, 8.5), ("Wool", -1.0, 17.0)]);
        assert_eq!(
            compute_component(&sample),
            Err(CompositionError::InvalidStepWeight {
                step: 2,
                value: Some(-1.0)
            })
        );
    }

    #[test]
    fn component_mode_rejects_empty_sample() {
        let sample = component_sample(Some(1.0), &[]);
        assert_eq!(
            compute_component(&sample),
            Err(CompositionError::EmptyComponentList)
        );
    }
}
