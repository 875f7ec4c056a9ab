use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Standard {
    Iso,
    Aatcc,
    Eu,
    Canada,
}

impl Standard {
    pub const ALL: [Standard; 4] = [
        Standard::Iso,
        Standard::Aatcc,
        Standard::Eu,
        Standard::Canada,
    ];
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown moisture standard '{0}'. Expected 'iso', 'aatcc', 'eu' or 'canada'.")]
pub struct ParseStandardError(pub String);

impl FromStr for Standard {
    type Err = ParseStandardError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "iso" => Ok(Standard::Iso),
            "aatcc" => Ok(Standard::Aatcc),
            "eu" => Ok(Standard::Eu),
            "canada" => Ok(Standard::Canada),
            _ => Err(ParseStandardError(s.to_string())),
        }
    }
}

impl fmt::Display for Standard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Standard::Iso => "ISO",
                Standard::Aatcc => "AATCC",
                Standard::Eu => "EU",
                Standard::Canada => "CANADA",
            }
        )
    }
}

/// One row of the reference table. A `None` regain is a blank cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiberRecord {
    pub id: u32,
    pub name: String,
    pub iso: Option<f64>,
    pub aatcc: Option<f64>,
    pub eu: Option<f64>,
    pub canada: Option<f64>,
}

impl FiberRecord {
    fn uniform(id: u32, name: &str, regain: f64) -> Self {
        Self {
            id,
            name: name.to_string(),
            iso: Some(regain),
            aatcc: Some(regain),
            eu: Some(regain),
            canada: Some(regain),
        }
    }

    pub fn regain(&self, standard: Standard) -> Option<f64> {
        match standard {
            Standard::Iso => self.iso,
            Standard::Aatcc => self.aatcc,
            Standard::Eu => self.eu,
            Standard::Canada => self.canada,
        }
    }

    fn regain_mut(&mut self, standard: Standard) -> &mut Option<f64> {
        match standard {
            Standard::Iso => &mut self.iso,
            Standard::Aatcc => &mut self.aatcc,
            Standard::Eu => &mut self.eu,
            Standard::Canada => &mut self.canada,
        }
    }
}

#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("A fiber named '{0}' already exists in the reference table")]
    DuplicateName(String),
    #[error("No fiber with id {0} in the reference table")]
    UnknownId(u32),
    #[error("Moisture regain must be a finite, non-negative percentage (got {0})")]
    InvalidRegain(f64),
}

/// Fiber name to moisture regain, per standard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FiberReferenceTable {
    records: Vec<FiberRecord>,
}

impl FiberReferenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The table a fresh installation starts from.
    pub fn with_defaults() -> Self {
        Self {
            records: vec![
                FiberRecord::uniform(1, "Cotton", 8.5),
                FiberRecord::uniform(2, "Polyester", 0.4),
                FiberRecord::uniform(3, "Nylon", 4.5),
                FiberRecord::uniform(4, "Viscose", 13.0),
                FiberRecord::uniform(5, "Wool", 17.0),
            ],
        }
    }

    pub fn from_records(records: Vec<FiberRecord>) -> Result<Self, ReferenceError> {
        let mut table = Self::new();
        for record in records {
            table.ensure_unique_name(&record.name, None)?;
            table.records.push(record);
        }
        Ok(table)
    }

    pub fn load(path: &Path) -> Result<Self, ReferenceError> {
        let file = File::open(path).map_err(|e| ReferenceError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let mut reader = csv::Reader::from_reader(file);

        let mut records = Vec::new();
        for result in reader.deserialize::<FiberRecord>() {
            let record = result.map_err(|e| ReferenceError::Csv {
                path: path.to_string_lossy().to_string(),
                source: e,
            })?;
            records.push(record);
        }
        Self::from_records(records)
    }

    pub fn save(&self, path: &Path) -> Result<(), ReferenceError> {
        let csv_err = |e: csv::Error| ReferenceError::Csv {
            path: path.to_string_lossy().to_string(),
            source: e,
        };
        let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;
        for record in &self.records {
            writer.serialize(record).map_err(csv_err)?;
        }
        writer.flush().map_err(|e| ReferenceError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }

    pub fn records(&self) -> &[FiberRecord] {
        &self.records
    }

    pub fn get(&self, id: u32) -> Option<&FiberRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Case-insensitive lookup of a fiber's regain under `standard`.
    ///
    /// Returns `None` for unknown fibers and for blank cells.
    pub fn lookup(&self, name: &str, standard: Standard) -> Option<f64> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        self.records
            .iter()
            .find(|r| r.name.eq_ignore_ascii_case(name))
            .and_then(|r| r.regain(standard))
    }

    /// Appends a record with blank regains and returns its id.
    pub fn add(&mut self, name: &str) -> Result<u32, ReferenceError> {
        let name = name.trim();
        self.ensure_unique_name(name, None)?;
        let id = self.records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        self.records.push(FiberRecord {
            id,
            name: name.to_string(),
            iso: None,
            aatcc: None,
            eu: None,
            canada: None,
        });
        Ok(id)
    }

    pub fn rename(&mut self, id: u32, name: &str) -> Result<(), ReferenceError> {
        let name = name.trim();
        self.ensure_unique_name(name, Some(id))?;
        self.record_mut(id)?.name = name.to_string();
        Ok(())
    }

    pub fn set_regain(
        &mut self,
        id: u32,
        standard: Standard,
        regain: Option<f64>,
    ) -> Result<(), ReferenceError> {
        if let Some(value) = regain {
            if !value.is_finite() || value < 0.0 {
                return Err(ReferenceError::InvalidRegain(value));
            }
        }
        *self.record_mut(id)?.regain_mut(standard) = regain;
        Ok(())
    }

    pub fn remove(&mut self, id: u32) -> Result<FiberRecord, ReferenceError> {
        let position = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or(ReferenceError::UnknownId(id))?;
        Ok(self.records.remove(position))
    }

    fn record_mut(&mut self, id: u32) -> Result<&mut FiberRecord, ReferenceError> {
        self.records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(ReferenceError::UnknownId(id))
    }

    // Blank names are placeholders for rows still being filled in and may repeat.
    fn ensure_unique_name(&self, name: &str, except: Option<u32>) -> Result<(), ReferenceError> {
        if name.trim().is_empty() {
            return Ok(());
        }
        let clash = self
            .records
            .iter()
            .any(|r| Some(r.id) != except && r.name.trim().eq_ignore_ascii_case(name.trim()));
        if clash {
            return Err(ReferenceError::DuplicateName(name.trim().to_string()));
        }
        Ok(())
    }
}
