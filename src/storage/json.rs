//! JSON-file status store
//!
//! Persists category-month status records to a single JSON file with
//! write-temp-then-rename atomicity, so a crash mid-save leaves either the
//! old file or the new one, never a torn mix.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{BudgetError, BudgetResult};
use crate::models::{CategoryId, CategoryMonthlyStatus, StatusKey, YearMonth};

use super::StatusStore;

/// One JSON document on disk, read leniently and written atomically
struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Missing file reads as the default value
    fn read<T: DeserializeOwned + Default>(&self) -> BudgetResult<T> {
        if !self.path.exists() {
            return Ok(T::default());
        }

        let file = File::open(&self.path).map_err(|e| {
            BudgetError::Storage(format!("Failed to open {}: {}", self.path.display(), e))
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            BudgetError::Storage(format!("Failed to parse {}: {}", self.path.display(), e))
        })
    }

    /// Write to a sibling temp file, fsync, then rename over the target
    fn write<T: Serialize>(&self, data: &T) -> BudgetResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                BudgetError::Storage(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        let file = File::create(&temp_path)
            .map_err(|e| BudgetError::Storage(format!("Failed to create temp file: {}", e)))?;

        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, data)
            .map_err(|e| BudgetError::Storage(format!("Failed to serialize data: {}", e)))?;
        writer
            .flush()
            .map_err(|e| BudgetError::Storage(format!("Failed to flush data: {}", e)))?;
        writer
            .get_ref()
            .sync_all()
            .map_err(|e| BudgetError::Storage(format!("Failed to sync data: {}", e)))?;

        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            BudgetError::Storage(format!("Failed to rename temp file: {}", e))
        })
    }
}

/// On-disk document shape
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StatusData {
    #[serde(default)]
    statuses: Vec<CategoryMonthlyStatus>,
}

/// A [`StatusStore`] backed by one JSON file
pub struct JsonStatusStore {
    file: JsonFile,
    statuses: RwLock<HashMap<StatusKey, CategoryMonthlyStatus>>,
}

impl JsonStatusStore {
    /// Create a store over the given file path; call [`load`](Self::load)
    /// before first use
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            file: JsonFile::new(path.as_ref().to_path_buf()),
            statuses: RwLock::new(HashMap::new()),
        }
    }

    /// Load statuses from disk; a missing file yields an empty store
    pub fn load(&self) -> BudgetResult<()> {
        let data: StatusData = self.file.read()?;

        let mut statuses = self
            .statuses
            .write()
            .map_err(|_| BudgetError::Storage("Lock poisoned".into()))?;
        statuses.clear();
        for status in data.statuses {
            statuses.insert(status.key(), status);
        }

        Ok(())
    }

    /// Write the current state to disk, sorted for stable diffs
    pub fn save(&self) -> BudgetResult<()> {
        let statuses = self
            .statuses
            .read()
            .map_err(|_| BudgetError::Storage("Lock poisoned".into()))?;

        let mut list: Vec<_> = statuses.values().cloned().collect();
        list.sort_by_key(|s| (s.month, s.category_id.as_uuid().as_u128()));

        self.file.write(&StatusData { statuses: list })
    }

    fn read_map(
        &self,
    ) -> BudgetResult<std::sync::RwLockReadGuard<'_, HashMap<StatusKey, CategoryMonthlyStatus>>>
    {
        self.statuses
            .read()
            .map_err(|_| BudgetError::Storage("Lock poisoned".into()))
    }
}

impl StatusStore for JsonStatusStore {
    fn get(
        &self,
        category_id: CategoryId,
        month: YearMonth,
    ) -> BudgetResult<Option<CategoryMonthlyStatus>> {
        Ok(self
            .read_map()?
            .get(&StatusKey::new(category_id, month))
            .cloned())
    }

    fn upsert(&self, status: CategoryMonthlyStatus) -> BudgetResult<()> {
        self.statuses
            .write()
            .map_err(|_| BudgetError::Storage("Lock poisoned".into()))?
            .insert(status.key(), status);
        Ok(())
    }

    fn delete(&self, category_id: CategoryId, month: YearMonth) -> BudgetResult<bool> {
        Ok(self
            .statuses
            .write()
            .map_err(|_| BudgetError::Storage("Lock poisoned".into()))?
            .remove(&StatusKey::new(category_id, month))
            .is_some())
    }

    fn for_month(&self, month: YearMonth) -> BudgetResult<Vec<CategoryMonthlyStatus>> {
        Ok(self
            .read_map()?
            .values()
            .filter(|s| s.month == month)
            .cloned()
            .collect())
    }

    fn all(&self) -> BudgetResult<Vec<CategoryMonthlyStatus>> {
        let map = self.read_map()?;
        let mut list: Vec<_> = map.values().cloned().collect();
        list.sort_by_key(|s| (s.month, s.category_id.as_uuid().as_u128()));
        Ok(list)
    }
}
