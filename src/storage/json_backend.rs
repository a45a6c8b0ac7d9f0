use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::info;

use crate::{
    config::{Config, ConfigManager},
    errors::StorageError,
    expense::Expense,
    utils::fs::write_atomic,
};

use super::{Result, StorageBackend};

pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

/// Stores the expense list as a pretty-printed JSON snapshot in a single file.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Storage at the configured data file, resolved against the manager's
    /// base directory like every other file it owns.
    pub fn from_config(manager: &ConfigManager, config: &Config) -> Self {
        Self::new(manager.data_file(config))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageBackend for JsonStorage {
    fn save(&self, expenses: &[Expense]) -> Result<()> {
        let snapshot = SnapshotRef {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            saved_at: Utc::now(),
            expenses,
        };
        let json = serde_json::to_string_pretty(&snapshot)?;
        write_atomic(&self.path, &json)?;
        info!(path = %self.path.display(), count = expenses.len(), "expenses saved");
        Ok(())
    }

    fn load(&self) -> Result<Vec<Expense>> {
        if !self.path.exists() {
            return Err(StorageError::NotFound(self.path.clone()));
        }
        let data = fs::read_to_string(&self.path)?;
        let snapshot: Snapshot = serde_json::from_str(&data)?;
        if snapshot.schema_version > SNAPSHOT_SCHEMA_VERSION {
            return Err(StorageError::UnsupportedSchema {
                found: snapshot.schema_version,
                supported: SNAPSHOT_SCHEMA_VERSION,
            });
        }
        info!(
            path = %self.path.display(),
            count = snapshot.expenses.len(),
            saved_at = %snapshot.saved_at,
            "expenses loaded"
        );
        Ok(snapshot.expenses)
    }
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    schema_version: u32,
    saved_at: DateTime<Utc>,
    expenses: &'a [Expense],
}

#[derive(Deserialize)]
struct Snapshot {
    schema_version: u32,
    saved_at: DateTime<Utc>,
    expenses: Vec<Expense>,
}
