use crate::cli::{AnalyzeArgs, ReportFormat};
use crate::config::{self, AppConfig};
use crate::data::DataManager;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use fiberlab::core::io::json::JsonExporter;
use fiberlab::core::io::markdown::MarkdownExporter;
use fiberlab::core::io::traits::{DocumentExporter, ExportError};
use fiberlab::core::models::report::Report;
use fiberlab::engine::progress::ProgressReporter;
use fiberlab::workflows::session::Session;
use std::io::{self, Write};
use std::path::Path;
use tracing::{debug, info};

pub fn run(args: AnalyzeArgs) -> Result<()> {
    let data_manager = DataManager::new()?;
    let table = data_manager.load_table()?;
    let app_config = config::build_config(&args, &table)?;
    debug!(
        "Resolved settings: standard={}, tolerance={}, format={:?}",
        app_config.standard, app_config.calculation.percentage_tolerance, app_config.format
    );

    let report = analyze(&app_config)?;

    match &app_config.output {
        Some(path) => {
            write_report_to_path(&report, app_config.format, path)?;
            info!("Report written to {:?}", path);
            eprintln!("Report written to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_report(&report, app_config.format, &mut handle)?;
            handle.flush()?;
        }
    }
    Ok(())
}

fn analyze(app_config: &AppConfig) -> Result<Report> {
    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let mut session = Session::new(app_config.calculation.clone());
    session.analyze(&app_config.input, &reporter)?;
    Ok(session.report()?)
}

fn write_report(
    report: &Report,
    format: ReportFormat,
    writer: &mut impl Write,
) -> std::result::Result<(), ExportError> {
    match format {
        ReportFormat::Markdown => MarkdownExporter::write_to(report, writer),
        ReportFormat::Json => JsonExporter::write_to(report, writer),
    }
}

fn write_report_to_path(
    report: &Report,
    format: ReportFormat,
    path: &Path,
) -> std::result::Result<(), ExportError> {
    match format {
        ReportFormat::Markdown => MarkdownExporter::write_to_path(report, path),
        ReportFormat::Json => JsonExporter::write_to_path(report, path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fiberlab::core::models::garment::{FiberShare, GarmentComponent};
    use fiberlab::core::models::sample::GarmentSample;
    use fiberlab::core::reference::table::Standard;
    use fiberlab::engine::config::CalculationConfig;
    use fiberlab::workflows::analyze::AnalysisInput;
    use tempfile::tempdir;

    fn garment_config() -> AppConfig {
        AppConfig {
            input: AnalysisInput::Garments(vec![GarmentSample {
                components: vec![GarmentComponent::new(
                    "Body",
                    100.0,
                    vec![FiberShare::new("Cotton", 60.0), FiberShare::new("Polyester", 40.0)],
                )],
            }]),
            calculation: CalculationConfig {
                percentage_tolerance: 0.1,
            },
            standard: Standard::Iso,
            format: ReportFormat::Markdown,
            output: None,
        }
    }

    #[test]
    fn analyze_produces_a_report_for_valid_input() {
        let report = analyze(&garment_config()).unwrap();
        assert_eq!(report.sample_count(), 1);
    }

    #[test]
    fn markdown_and_json_reports_are_written_to_files() {
        let report = analyze(&garment_config()).unwrap();
        let dir = tempdir().unwrap();

        let md_path = dir.path().join("report.md");
        write_report_to_path(&report, ReportFormat::Markdown, &md_path).unwrap();
        let markdown = std::fs::read_to_string(&md_path).unwrap();
        assert!(markdown.contains("| Cotton | 60.0000 | 60.0000 |"));

        let json_path = dir.path().join("report.json");
        write_report_to_path(&report, ReportFormat::Json, &json_path).unwrap();
        let json = std::fs::read_to_string(&json_path).unwrap();
        assert!(json.contains("\"kind\": \"garments\""));
    }

    #[test]
    fn invalid_input_fails_without_a_report() {
        let mut config = garment_config();
        config.input = AnalysisInput::Garments(Vec::new());
        assert!(analyze(&config).is_err());
    }
}
