use crate::core::models::report::Report;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Defines the interface for rendering a finished [`Report`] into a document format.
///
/// Implementors handle the format-specific layout; opening and buffering files is shared.
pub trait DocumentExporter {
    /// Renders a report to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the writer reports an I/O error.
    fn write_to(report: &Report, writer: &mut impl Write) -> Result<(), ExportError>;

    /// Renders a report into a file, creating or truncating it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(report: &Report, path: P) -> Result<(), ExportError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(report, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Renders a report into an in-memory string.
    fn render(report: &Report) -> Result<String, ExportError> {
        let mut buffer = Vec::new();
        Self::write_to(report, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
