use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

/// Handle to the data directory backing the JSON document store.
///
/// Each collection is one JSON document file (`offers.json`, `users.json`,
/// ...). Repositories read the whole collection, mutate it in memory, and
/// write it back atomically.
pub struct JsonConnection {
    base_dir: PathBuf,
}

impl JsonConnection {
    /// Open (creating if needed) the data directory.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir)
            .with_context(|| format!("failed to create data directory {}", base_dir.display()))?;
        Ok(Self { base_dir })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_dir
    }

    fn collection_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(format!("{name}.json"))
    }

    /// Load a whole collection; a collection that has never been written
    /// is empty.
    pub fn read_collection<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>> {
        let path = self.collection_path(name);
        if !path.exists() {
            debug!("Collection {} not present yet, returning empty", name);
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read collection {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("collection {} holds invalid JSON", path.display()))
    }

    /// Replace a whole collection. Atomic: written to a temp file first,
    /// then renamed over the document.
    pub fn write_collection<T: Serialize>(&self, name: &str, items: &[T]) -> Result<()> {
        let path = self.collection_path(name);
        let content = serde_json::to_string_pretty(items)
            .with_context(|| format!("failed to serialize collection {name}"))?;

        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, content)
            .with_context(|| format!("failed to write {}", temp_path.display()))?;
        fs::rename(&temp_path, &path)
            .with_context(|| format!("failed to replace {}", path.display()))?;

        debug!("Wrote {} documents to collection {}", items.len(), name);
        Ok(())
    }
}
