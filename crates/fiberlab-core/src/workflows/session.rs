use super::analyze::{self, AnalysisInput, AnalysisOutcome};
use super::report::{self, ReportError};
use crate::core::models::report::Report;
use crate::engine::config::CalculationConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::ProgressReporter;
use tracing::{debug, warn};

/// Holds the most recent successful analysis.
///
/// A failed run leaves the previous outcome in place, so a report can still be produced from the
/// last good data after a typo in a new batch.
#[derive(Debug, Clone)]
pub struct Session {
    config: CalculationConfig,
    latest: Option<AnalysisOutcome>,
}

impl Session {
    pub fn new(config: CalculationConfig) -> Self {
        Self {
            config,
            latest: None,
        }
    }

    pub fn config(&self) -> &CalculationConfig {
        &self.config
    }

    pub fn latest(&self) -> Option<&AnalysisOutcome> {
        self.latest.as_ref()
    }

    pub fn analyze(
        &mut self,
        input: &AnalysisInput,
        reporter: &ProgressReporter,
    ) -> Result<&AnalysisOutcome, EngineError> {
        match analyze::run(input, &self.config, reporter) {
            Ok(outcome) => {
                debug!("Storing {} outcome in session.", outcome.mode());
                Ok(self.latest.insert(outcome))
            }
            Err(e) => {
                warn!("Analysis failed; keeping the previous results. {}", e);
                Err(e)
            }
        }
    }

    /// Builds a report from the latest outcome. Fails with [`ReportError::EmptyRun`] when nothing
    /// has been analyzed yet.
    pub fn report(&self) -> Result<Report, ReportError> {
        match &self.latest {
            Some(outcome) => report::assemble(outcome),
            None => Err(ReportError::EmptyRun),
        }
    }

    pub fn clear(&mut self) {
        self.latest = None;
    }
}
