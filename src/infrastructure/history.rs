//! Append-only CSV history of observations

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::domain::observation::{Observation, CSV_HEADER};
use crate::shared::errors::HistoryError;

/// The sole durable state: one CSV file, header first, one row per
/// observation, appended in chronological order. A single invocation at a
/// time is assumed, so no locking.
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every observation in file order. A missing or header-only file
    /// yields an empty vec.
    pub fn load(&self) -> Result<Vec<Observation>, HistoryError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut observations = Vec::new();
        for (idx, row) in contents.lines().enumerate() {
            if idx == 0 || row.trim().is_empty() {
                continue; // header
            }
            observations.push(Observation::from_csv_row(row, idx + 1)?);
        }
        Ok(observations)
    }

    /// Most recent stored observation, skipping a corrupt tail rather than
    /// failing the whole run
    pub fn last(&self) -> Result<Option<Observation>, HistoryError> {
        match self.load() {
            Ok(observations) => Ok(observations.into_iter().last()),
            Err(HistoryError::Malformed { line, reason }) => {
                warn!("Ignoring malformed history row at line {}: {}", line, reason);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Append one observation, creating the file with its header first if
    /// needed
    pub fn append(&self, obs: &Observation) -> Result<(), HistoryError> {
        let new_file = !self.path.exists();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        if new_file {
            writeln!(file, "{}", CSV_HEADER)?;
        }
        writeln!(file, "{}", obs.to_csv_row())?;
        Ok(())
    }
}
