use crate::core::models::results::{ChemicalFiberResult, GarmentFiberResult, ManualFiberResult};
use crate::core::models::sample::{
    AnalysisMode, ComponentSample, GarmentSample, ManualSample, ResidueSample,
};
use crate::engine::aggregate::{Aggregation, CompositionRecord, aggregate};
use crate::engine::config::CalculationConfig;
use crate::engine::error::{CompositionError, EngineError};
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::{chemical, garments, manual};
use tracing::{info, instrument};

/// Per-sample results of one run together with their cross-sample averages.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRun<R> {
    pub samples: Vec<Vec<R>>,
    pub aggregation: Aggregation<R>,
}

/// The samples of one run, all measured with the same method.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisInput {
    Manual(Vec<ManualSample>),
    ChemicalResidue(Vec<ResidueSample>),
    ChemicalComponent(Vec<ComponentSample>),
    Garments(Vec<GarmentSample>),
}

impl AnalysisInput {
    pub fn mode(&self) -> AnalysisMode {
        match self {
            AnalysisInput::Manual(_) => AnalysisMode::Manual,
            AnalysisInput::ChemicalResidue(_) => AnalysisMode::ChemicalResidue,
            AnalysisInput::ChemicalComponent(_) => AnalysisMode::ChemicalComponent,
            AnalysisInput::Garments(_) => AnalysisMode::Garments,
        }
    }

    pub fn sample_count(&self) -> usize {
        match self {
            AnalysisInput::Manual(samples) => samples.len(),
            AnalysisInput::ChemicalResidue(samples) => samples.len(),
            AnalysisInput::ChemicalComponent(samples) => samples.len(),
            AnalysisInput::Garments(samples) => samples.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    Manual(AnalysisRun<ManualFiberResult>),
    Chemical {
        method: AnalysisMode,
        run: AnalysisRun<ChemicalFiberResult>,
        /// The initial weight entered for each sample, if any.
        initial_weights: Vec<Option<f64>>,
    },
    Garments(AnalysisRun<GarmentFiberResult>),
}

impl AnalysisOutcome {
    pub fn mode(&self) -> AnalysisMode {
        match self {
            AnalysisOutcome::Manual(_) => AnalysisMode::Manual,
            AnalysisOutcome::Chemical { method, .. } => *method,
            AnalysisOutcome::Garments(_) => AnalysisMode::Garments,
        }
    }
}

fn run_samples<S, R>(
    mode: AnalysisMode,
    samples: &[S],
    reporter: &ProgressReporter,
    compute: impl Fn(&S) -> Result<Vec<R>, CompositionError>,
) -> Result<AnalysisRun<R>, EngineError>
where
    R: CompositionRecord,
{
    if samples.is_empty() {
        return Err(EngineError::NoSamples);
    }

    reporter.report(Progress::RunStart {
        mode,
        samples: samples.len() as u64,
    });
    info!("Analyzing {} sample(s) in {} mode.", samples.len(), mode);

    let mut results = Vec::with_capacity(samples.len());
    for (i, sample) in samples.iter().enumerate() {
        let rows = compute(sample).map_err(|e| EngineError::in_sample(i + 1, e))?;
        results.push(rows);
        reporter.report(Progress::SampleFinished { index: i + 1 });
    }

    reporter.report(Progress::AggregationStart);
    let aggregation = aggregate(&results);
    let summary = format!(
        "{} distinct fiber(s) across {} sample(s)",
        aggregation.without_moisture.len(),
        results.len()
    );
    reporter.report(Progress::Message(summary.clone()));
    reporter.report(Progress::RunFinish);

    info!("Analysis complete: {}.", summary);
    Ok(AnalysisRun {
        samples: results,
        aggregation,
    })
}

#[instrument(skip_all, name = "manual_workflow")]
pub fn run_manual(
    samples: &[ManualSample],
    reporter: &ProgressReporter,
) -> Result<AnalysisRun<ManualFiberResult>, EngineError> {
    run_samples(AnalysisMode::Manual, samples, reporter, manual::compute)
}

#[instrument(skip_all, name = "chemical_residue_workflow")]
pub fn run_chemical_residue(
    samples: &[ResidueSample],
    reporter: &ProgressReporter,
) -> Result<AnalysisRun<ChemicalFiberResult>, EngineError> {
    run_samples(
        AnalysisMode::ChemicalResidue,
        samples,
        reporter,
        chemical::compute_residue,
    )
}

#[instrument(skip_all, name = "chemical_component_workflow")]
pub fn run_chemical_component(
    samples: &[ComponentSample],
    reporter: &ProgressReporter,
) -> Result<AnalysisRun<ChemicalFiberResult>, EngineError> {
    run_samples(
        AnalysisMode::ChemicalComponent,
        samples,
        reporter,
        chemical::compute_component,
    )
}

#[instrument(skip_all, name = "garments_workflow")]
pub fn run_garments(
    samples: &[GarmentSample],
    config: &CalculationConfig,
    reporter: &ProgressReporter,
) -> Result<AnalysisRun<GarmentFiberResult>, EngineError> {
    run_samples(AnalysisMode::Garments, samples, reporter, |sample| {
        garments::compute(sample, config)
    })
}

/// Runs whichever mode the input was recorded in.
///
/// Any invalid sample fails the whole run; no partial results are returned.
pub fn run(
    input: &AnalysisInput,
    config: &CalculationConfig,
    reporter: &ProgressReporter,
) -> Result<AnalysisOutcome, EngineError> {
    Ok(match input {
        AnalysisInput::Manual(samples) => AnalysisOutcome::Manual(run_manual(samples, reporter)?),
        AnalysisInput::ChemicalResidue(samples) => AnalysisOutcome::Chemical {
            method: AnalysisMode::ChemicalResidue,
            run: run_chemical_residue(samples, reporter)?,
            initial_weights: samples.iter().map(|s| Some(s.initial_weight)).collect(),
        },
        AnalysisInput::ChemicalComponent(samples) => AnalysisOutcome::Chemical {
            method: AnalysisMode::ChemicalComponent,
            run: run_chemical_component(samples, reporter)?,
            initial_weights: samples.iter().map(|s| s.initial_weight).collect(),
        },
        AnalysisInput::Garments(samples) => {
            AnalysisOutcome::Garments(run_garments(samples, config, reporter)?)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::garment::{FiberShare, GarmentComponent};
    use crate::core::models::observation::FiberObservation;
    use crate::core::models::residue::ResidueStep;
    use std::sync::Mutex;

    fn config() -> CalculationConfig {
        CalculationConfig {
            percentage_tolerance: 0.1,
        }
    }

    fn manual_sample(fibers: &[(&str, f64, f64)]) -> ManualSample {
        ManualSample {
            fibers: fibers
                .iter()
                .map(|&(name, dry, moisture)| FiberObservation::new(name, dry, moisture))
                .collect(),
        }
    }

    fn residue_sample(initial_weight: f64, first_residue: f64) -> ResidueSample {
        ResidueSample {
            initial_weight,
            steps: vec![
                ResidueStep::weighed("A", first_residue, 0.0),
                ResidueStep::final_residue("B", 0.0),
            ],
        }
    }

    #[test]
    fn manual_run_computes_samples_and_averages() {
        let samples = vec![
            manual_sample(&[("Cotton", 60.0, 8.5), ("Polyester", 40.0, 0.4)]),
            manual_sample(&[("Cotton", 40.0, 8.5), ("Polyester", 60.0, 0.4)]),
        ];
        let run = run_manual(&samples, &ProgressReporter::new()).unwrap();

        assert_eq!(run.samples.len(), 2);
        assert!((run.samples[0][0].wet_weight - 65.1).abs() < 1e-9);
        assert!((run.aggregation.without_moisture[0].percentage - 50.0).abs() < 1e-9);
    }

    #[test]
    fn one_invalid_sample_fails_the_whole_run() {
        let samples = vec![residue_sample(10.0, 7.0), residue_sample(10.0, 12.0)];
        let err = run_chemical_residue(&samples, &ProgressReporter::new()).unwrap_err();

        match err {
            EngineError::Sample { sample, source } => {
                assert_eq!(sample, 2);
                assert!(matches!(
                    source,
                    CompositionError::NonMonotonicResidue { step: 1, .. }
                ));
            }
            other => panic!("expected a sample error, got {:?}", other),
        }
    }

    #[test]
    fn empty_run_is_rejected() {
        let input = AnalysisInput::Garments(Vec::new());
        assert!(matches!(
            run(&input, &config(), &ProgressReporter::new()),
            Err(EngineError::NoSamples)
        ));
    }

    #[test]
    fn run_dispatches_by_mode_and_keeps_initial_weights() {
        let input = AnalysisInput::ChemicalComponent(vec![ComponentSample {
            initial_weight: None,
            fibers: vec![FiberObservation::new("Wool", 2.0, 17.0)],
        }]);
        let outcome = run(&input, &config(), &ProgressReporter::new()).unwrap();

        assert_eq!(outcome.mode(), AnalysisMode::ChemicalComponent);
        match outcome {
            AnalysisOutcome::Chemical {
                initial_weights, run, ..
            } => {
                assert_eq!(initial_weights, vec![None]);
                assert!((run.samples[0][0].dry_percentage - 100.0).abs() < 1e-9);
            }
            other => panic!("expected a chemical outcome, got {:?}", other),
        }
    }

    #[test]
    fn garment_run_uses_configured_tolerance() {
        let samples = vec![GarmentSample {
            components: vec![GarmentComponent::new(
                "Body",
                100.0,
                vec![FiberShare::new("Cotton", 60.0), FiberShare::new("Polyester", 39.5)],
            )],
        }];
        let strict = run_garments(&samples, &config(), &ProgressReporter::new());
        assert!(matches!(
            strict,
            Err(EngineError::Sample {
                sample: 1,
                source: CompositionError::PercentageMismatch { .. }
            })
        ));

        let lenient = CalculationConfig {
            percentage_tolerance: 1.0,
        };
        assert!(run_garments(&samples, &lenient, &ProgressReporter::new()).is_ok());
    }

    #[test]
    fn progress_events_follow_the_run() {
        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            events.lock().unwrap().push(event);
        }));
        let samples = vec![residue_sample(10.0, 7.0), residue_sample(10.0, 6.0)];
        run_chemical_residue(&samples, &reporter).unwrap();
        drop(reporter);

        assert_eq!(
            events.into_inner().unwrap(),
            vec![
                Progress::RunStart {
                    mode: AnalysisMode::ChemicalResidue,
                    samples: 2
                },
                Progress::SampleFinished { index: 1 },
                Progress::SampleFinished { index: 2 },
                Progress::AggregationStart,
                Progress::Message("2 distinct fiber(s) across 2 sample(s)".to_string()),
                Progress::RunFinish,
            ]
        );
    }
}
