use crate::cli::ReportFormat;
use fiberlab::core::reference::table::Standard;

pub struct DefaultsConfig {
    pub percentage_tolerance: f64,
    pub standard: Standard,
    pub format: ReportFormat,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            percentage_tolerance: 0.1,
            standard: Standard::Iso,
            format: ReportFormat::Markdown,
        }
    }
}
