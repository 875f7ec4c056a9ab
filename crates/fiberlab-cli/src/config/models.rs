use crate::cli::ReportFormat;
use fiberlab::core::reference::table::Standard;
use fiberlab::engine::config::CalculationConfig;
use fiberlab::workflows::analyze::AnalysisInput;
use std::path::PathBuf;

pub struct AppConfig {
    pub input: AnalysisInput,
    pub calculation: CalculationConfig,
    pub standard: Standard,
    pub format: ReportFormat,
    pub output: Option<PathBuf>,
}
