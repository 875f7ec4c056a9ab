use crate::error::{CliError, Result};
use directories::ProjectDirs;
use fiberlab::core::reference::table::FiberReferenceTable;
use std::fs::{self};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const TABLE_FILE_NAME: &str = "fibers.csv";

#[derive(Debug)]
pub struct DataManager {
    base_path: PathBuf,
}

impl DataManager {
    pub fn new() -> Result<Self> {
        let path = Self::determine_data_path()?;
        debug!("DataManager initialized with path: {:?}", &path);
        Ok(Self { base_path: path })
    }

    pub fn get_data_path(&self) -> &Path {
        &self.base_path
    }

    pub fn table_path(&self) -> PathBuf {
        self.base_path.join(TABLE_FILE_NAME)
    }

    /// Loads the persisted reference table, or the built-in defaults when none was saved yet.
    pub fn load_table(&self) -> Result<FiberReferenceTable> {
        let path = self.table_path();
        if !path.exists() {
            info!(
                "No reference table at {:?}; using the built-in defaults.",
                &path
            );
            return Ok(FiberReferenceTable::with_defaults());
        }
        debug!("Loading reference table from {:?}", &path);
        Ok(FiberReferenceTable::load(&path)?)
    }

    pub fn save_table(&self, table: &FiberReferenceTable) -> Result<()> {
        fs::create_dir_all(&self.base_path)?;
        let path = self.table_path();
        table.save(&path)?;
        info!(
            "Saved {} fiber(s) to {:?}",
            table.records().len(),
            &path
        );
        Ok(())
    }

    pub fn set_custom_path(path: &Path) -> Result<()> {
        let path_str = path.to_str().ok_or_else(|| {
            CliError::Argument(format!("Path {:?} is not valid UTF-8.", path))
        })?;
        let config_path = Self::get_path_config_file()?;
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(config_path, path_str).map_err(CliError::from)
    }

    pub fn reset_path() -> Result<()> {
        if let Ok(config_path) = Self::get_path_config_file() {
            if config_path.exists() {
                fs::remove_file(config_path)?;
            }
        }
        Ok(())
    }

    fn determine_data_path() -> Result<PathBuf> {
        match Self::get_path_config_file() {
            Ok(config_path) if config_path.exists() => {
                let custom_path_str = fs::read_to_string(&config_path)?.trim().to_string();
                if custom_path_str.is_empty() {
                    warn!("Custom path config file is empty, falling back to default path.");
                    Self::get_default_data_path()
                } else {
                    Ok(PathBuf::from(custom_path_str))
                }
            }
            _ => Self::get_default_data_path(),
        }
    }

    fn get_path_config_file() -> Result<PathBuf> {
        ProjectDirs::from("org", "fiberlab", "fiberlab")
            .map(|dirs| dirs.config_dir().join("path.conf"))
            .ok_or_else(|| CliError::Data("Could not determine config directory path.".to_string()))
    }

    fn get_default_data_path() -> Result<PathBuf> {
        ProjectDirs::from("org", "fiberlab", "fiberlab")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| {
                CliError::Data("Could not determine default data directory path.".to_string())
            })
    }
}
