//! Persistence backends
//!
//! The store treats persistence as an opaque boundary: a backend loads a
//! whole snapshot and saves a whole snapshot. Swapping backends never
//! changes aggregation or insight results.

use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::{Bill, Budget, Expense};

use super::file_io::{read_json, write_json_atomic};

/// All entity collections at one point in time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
    #[serde(default)]
    pub bills: Vec<Bill>,
}

/// Loads and saves snapshots
pub trait Persistence: Send + Sync {
    fn load(&self) -> SpendwiseResult<Snapshot>;
    fn save(&self, snapshot: &Snapshot) -> SpendwiseResult<()>;
}

/// Keeps the last saved snapshot in memory
#[derive(Debug, Default)]
pub struct MemoryPersistence {
    snapshot: Mutex<Snapshot>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing snapshot
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            snapshot: Mutex::new(snapshot),
        }
    }
}

impl Persistence for MemoryPersistence {
    fn load(&self) -> SpendwiseResult<Snapshot> {
        let snapshot = self
            .snapshot
            .lock()
            .map_err(|e| SpendwiseError::Storage(format!("Failed to acquire lock: {}", e)))?;
        Ok(snapshot.clone())
    }

    fn save(&self, snapshot: &Snapshot) -> SpendwiseResult<()> {
        let mut stored = self
            .snapshot
            .lock()
            .map_err(|e| SpendwiseError::Storage(format!("Failed to acquire lock: {}", e)))?;
        *stored = snapshot.clone();
        Ok(())
    }
}

/// Stores the snapshot as a single pretty-printed JSON file
#[derive(Debug, Clone)]
pub struct JsonFilePersistence {
    path: PathBuf,
}

impl JsonFilePersistence {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl Persistence for JsonFilePersistence {
    fn load(&self) -> SpendwiseResult<Snapshot> {
        read_json(&self.path)
    }

    fn save(&self, snapshot: &Snapshot) -> SpendwiseResult<()> {
        write_json_atomic(&self.path, snapshot)
    }
}
