use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for '{name}': {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}

/// Settings shared by every analysis mode.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationConfig {
    /// Absolute tolerance, in percentage points, when checking that a garment component's fiber
    /// breakdown sums to 100.
    pub percentage_tolerance: f64,
}

#[derive(Default)]
pub struct CalculationConfigBuilder {
    percentage_tolerance: Option<f64>,
}

impl CalculationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn percentage_tolerance(mut self, tolerance: f64) -> Self {
        self.percentage_tolerance = Some(tolerance);
        self
    }

    pub fn build(self) -> Result<CalculationConfig, ConfigError> {
        let percentage_tolerance = self
            .percentage_tolerance
            .ok_or(ConfigError::MissingParameter("percentage_tolerance"))?;
        if !percentage_tolerance.is_finite() || percentage_tolerance < 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "percentage_tolerance",
                value: percentage_tolerance,
            });
        }
        Ok(CalculationConfig {
            percentage_tolerance,
        })
    }
}
