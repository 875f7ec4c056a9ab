use super::defaults::DefaultsConfig;
use super::file::{FileSample, RunFile};
use super::models::AppConfig;
use crate::cli::AnalyzeArgs;
use crate::error::{CliError, Result};
use fiberlab::core::models::garment::{FiberShare, GarmentComponent};
use fiberlab::core::models::observation::FiberObservation;
use fiberlab::core::models::residue::ResidueStep;
use fiberlab::core::models::sample::{
    AnalysisMode, ComponentSample, GarmentSample, ManualSample, ResidueSample,
};
use fiberlab::core::reference::table::{FiberReferenceTable, Standard};
use fiberlab::engine::config::CalculationConfigBuilder;
use fiberlab::workflows::analyze::AnalysisInput;
use tracing::{debug, warn};

pub fn build_config(args: &AnalyzeArgs, table: &FiberReferenceTable) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let run_file = RunFile::from_file(&args.run_file)?;
    let mut run_file = apply_set_values(run_file, &args.set_values)?;
    let settings = std::mem::take(&mut run_file.settings);

    let standard = args
        .standard
        .or(settings.standard)
        .unwrap_or(defaults.standard);
    let percentage_tolerance = args
        .tolerance
        .or(settings.percentage_tolerance)
        .unwrap_or(defaults.percentage_tolerance);
    let format = args.format.unwrap_or(defaults.format);

    let calculation = CalculationConfigBuilder::new()
        .percentage_tolerance(percentage_tolerance)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let moisture = MoistureResolver { table, standard };
    let input = build_input(run_file.mode, run_file.samples, &moisture)?;

    Ok(AppConfig {
        input,
        calculation,
        standard,
        format,
        output: args.output.clone(),
    })
}

/// Fills in moisture regains the run file leaves out, from the reference table.
struct MoistureResolver<'a> {
    table: &'a FiberReferenceTable,
    standard: Standard,
}

impl MoistureResolver<'_> {
    fn resolve(&self, fiber: &str, given: Option<f64>) -> f64 {
        if let Some(value) = given {
            return value;
        }
        match self.table.lookup(fiber, self.standard) {
            Some(value) => {
                debug!(
                    "Using {} moisture regain {}% for '{}'.",
                    self.standard, value, fiber
                );
                value
            }
            None => {
                warn!(
                    "No {} moisture regain on record for '{}'; using 0%.",
                    self.standard, fiber
                );
                0.0
            }
        }
    }
}

fn reject_unused(sample: usize, mode: AnalysisMode, field: &str, present: bool) -> Result<()> {
    if present {
        return Err(CliError::Config(format!(
            "Sample {}: '{}' is not used in {} mode.",
            sample, field, mode
        )));
    }
    Ok(())
}

fn observations(sample: &FileSample, moisture: &MoistureResolver) -> Vec<FiberObservation> {
    sample
        .fibers
        .iter()
        .map(|f| FiberObservation::new(f.name.clone(), f.dry_weight, moisture.resolve(&f.name, f.moisture)))
        .collect()
}

fn build_input(
    mode: AnalysisMode,
    samples: Vec<FileSample>,
    moisture: &MoistureResolver,
) -> Result<AnalysisInput> {
    for (i, sample) in samples.iter().enumerate() {
        let n = i + 1;
        match mode {
            AnalysisMode::Manual => {
                reject_unused(n, mode, "initial-weight", sample.initial_weight.is_some())?;
                reject_unused(n, mode, "steps", !sample.steps.is_empty())?;
                reject_unused(n, mode, "components", !sample.components.is_empty())?;
            }
            AnalysisMode::ChemicalResidue => {
                reject_unused(n, mode, "fibers", !sample.fibers.is_empty())?;
                reject_unused(n, mode, "components", !sample.components.is_empty())?;
            }
            AnalysisMode::ChemicalComponent => {
                reject_unused(n, mode, "steps", !sample.steps.is_empty())?;
                reject_unused(n, mode, "components", !sample.components.is_empty())?;
            }
            AnalysisMode::Garments => {
                reject_unused(n, mode, "initial-weight", sample.initial_weight.is_some())?;
                reject_unused(n, mode, "steps", !sample.steps.is_empty())?;
                reject_unused(n, mode, "fibers", !sample.fibers.is_empty())?;
            }
        }
    }

    let input = match mode {
        AnalysisMode::Manual => AnalysisInput::Manual(
            samples
                .iter()
                .map(|s| ManualSample {
                    fibers: observations(s, moisture),
                })
                .collect(),
        ),
        AnalysisMode::ChemicalComponent => AnalysisInput::ChemicalComponent(
            samples
                .iter()
                .map(|s| ComponentSample {
                    initial_weight: s.initial_weight,
                    fibers: observations(s, moisture),
                })
                .collect(),
        ),
        AnalysisMode::ChemicalResidue => {
            let mut residue_samples = Vec::with_capacity(samples.len());
            for (i, sample) in samples.iter().enumerate() {
                let initial_weight = sample.initial_weight.ok_or_else(|| {
                    CliError::Config(format!(
                        "Sample {}: 'initial-weight' is required in {} mode.",
                        i + 1,
                        mode
                    ))
                })?;
                let steps = sample
                    .steps
                    .iter()
                    .map(|step| ResidueStep {
                        dissolved_fiber: step.fiber.clone(),
                        residue_weight: step.residue_weight,
                        moisture_regain: moisture.resolve(&step.fiber, step.moisture),
                    })
                    .collect();
                residue_samples.push(ResidueSample {
                    initial_weight,
                    steps,
                });
            }
            AnalysisInput::ChemicalResidue(residue_samples)
        }
        AnalysisMode::Garments => AnalysisInput::Garments(
            samples
                .into_iter()
                .map(|s| GarmentSample {
                    components: s
                        .components
                        .into_iter()
                        .map(|c| {
                            GarmentComponent::new(
                                c.name,
                                c.weight,
                                c.fibers
                                    .into_iter()
                                    .map(|f| FiberShare::new(f.name, f.percent))
                                    .collect(),
                            )
                        })
                        .collect(),
                })
                .collect(),
        ),
    };

    debug!(
        "Built {} input with {} sample(s).",
        input.mode(),
        input.sample_count()
    );
    Ok(input)
}

fn apply_set_values(mut config: RunFile, set_values: &[String]) -> Result<RunFile> {
    for kv_pair in set_values {
        let parts: Vec<_> = kv_pair.splitn(2, '=').collect();
        if parts.len() != 2 {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        }
        let key = parts[0];
        let value_str = parts[1];

        match key {
            "settings.standard" => {
                config.settings.standard = Some(
                    value_str
                        .parse()
                        .map_err(|e| CliError::Config(format!("{}", e)))?,
                );
            }
            "settings.percentage-tolerance" => {
                config.settings.percentage_tolerance = Some(value_str.parse().map_err(|_| {
                    CliError::Config(format!("Invalid float value for {}: {}", key, value_str))
                })?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
