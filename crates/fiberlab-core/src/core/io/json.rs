use super::traits::{DocumentExporter, ExportError};
use crate::core::models::report::Report;
use std::io::Write;

/// Serializes reports as pretty-printed JSON, tagged by report kind.
pub struct JsonExporter;

impl DocumentExporter for JsonExporter {
    fn write_to(report: &Report, writer: &mut impl Write) -> Result<(), ExportError> {
        serde_json::to_writer_pretty(&mut *writer, report)?;
        writeln!(writer)?;
        Ok(())
    }
}
