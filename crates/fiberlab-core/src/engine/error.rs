use super::config::ConfigError;
use thiserror::Error;

fn describe_weight(value: &Option<f64>) -> String {
    match value {
        Some(v) => format!("got {}", v),
        None => "no value was given".to_string(),
    }
}

/// Why a single sample could not be computed.
///
/// Step and component indices are 1-based, matching how samples are presented to users.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CompositionError {
    #[error("Basis weight must be a positive number ({})", describe_weight(.value))]
    InvalidBasisWeight { value: Option<f64> },

    #[error("Step {step}: weight must be a non-negative number ({})", describe_weight(.value))]
    InvalidStepWeight { step: usize, value: Option<f64> },

    #[error(
        "Step {step}: residue weight ({residue}g) cannot be greater than the previous residue weight ({previous:.4}g)"
    )]
    NonMonotonicResidue {
        step: usize,
        residue: f64,
        previous: f64,
    },

    #[error("The fiber percentages for component '{component}' add up to {sum:.4}, not 100")]
    PercentageMismatch { component: String, sum: f64 },

    #[error("No separation steps were given")]
    EmptyStepList,

    #[error("No components were given")]
    EmptyComponentList,

    #[error("Total weight is {total}; nothing to normalize against")]
    ZeroTotalWeight { total: f64 },

    #[error("Moisture regain for '{fiber}' must be a non-negative number (got {value})")]
    InvalidMoistureRegain { fiber: String, value: f64 },

    #[error("Component {component}: {reason}")]
    InvalidComponent { component: usize, reason: String },
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Sample {sample}: {source}")]
    Sample {
        sample: usize,
        #[source]
        source: CompositionError,
    },

    #[error("A run needs at least one sample")]
    NoSamples,

    #[error("Invalid calculation settings: {0}")]
    Config(#[from] ConfigError),
}

impl EngineError {
    pub fn in_sample(sample: usize, source: CompositionError) -> Self {
        EngineError::Sample { sample, source }
    }
}
