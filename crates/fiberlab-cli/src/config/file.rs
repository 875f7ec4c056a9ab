use crate::error::{CliError, Result};
use fiberlab::core::models::sample::AnalysisMode;
use fiberlab::core::reference::table::Standard;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileSettings {
    pub standard: Option<Standard>,
    pub percentage_tolerance: Option<f64>,
}

/// One separation step. `residue-weight` is omitted on the final step.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileStep {
    #[serde(default)]
    pub fiber: String,
    pub residue_weight: Option<f64>,
    pub moisture: Option<f64>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileFiber {
    #[serde(default)]
    pub name: String,
    pub dry_weight: f64,
    pub moisture: Option<f64>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileShare {
    #[serde(default)]
    pub name: String,
    pub percent: f64,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileComponent {
    #[serde(default)]
    pub name: String,
    pub weight: f64,
    #[serde(default)]
    pub fibers: Vec<FileShare>,
}

/// A sample as written in the run file. Which fields apply depends on the run's mode.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileSample {
    pub initial_weight: Option<f64>,
    #[serde(default)]
    pub steps: Vec<FileStep>,
    #[serde(default)]
    pub fibers: Vec<FileFiber>,
    #[serde(default)]
    pub components: Vec<FileComponent>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RunFile {
    pub mode: AnalysisMode,
    #[serde(default)]
    pub settings: FileSettings,
    #[serde(default)]
    pub samples: Vec<FileSample>,
}

impl RunFile {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading run file from: {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}
