use std::{ffi::OsString, marker::PhantomData, path::{Path, PathBuf}};
use serde::{de::DeserializeOwned, Serialize};
use tokio::fs;
use tracing::debug;

use crate::errors::ServiceError;
use crate::storage::ordered_map::OrderedMap;

/// Generic JSON file-backed map store.
///
/// Holds no data in memory: every `load` reads the whole file and every
/// `save` rewrites it. The file is a single JSON object keyed by string.
pub struct JsonMapStore<V> {
    file_path: PathBuf,
    _value: PhantomData<fn() -> V>,
}

impl<V> Clone for JsonMapStore<V> {
    fn clone(&self) -> Self {
        Self { file_path: self.file_path.clone(), _value: PhantomData }
    }
}

impl<V> JsonMapStore<V>
where
    V: Serialize + DeserializeOwned,
{
    /// Point the store at `path` without touching the filesystem.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { file_path: path.into(), _value: PhantomData }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Read the whole map.
    pub async fn load(&self) -> Result<OrderedMap<V>, ServiceError> {
        let bytes = fs::read(&self.file_path).await.map_err(|e| self.unavailable(e))?;
        let map: OrderedMap<V> = serde_json::from_slice(&bytes)
            .map_err(|e| ServiceError::CorruptData(format!("{}: {e}", self.file_path.display())))?;
        debug!(path = %self.file_path.display(), entries = map.len(), "json map loaded");
        Ok(map)
    }

    /// Overwrite the whole map. Writes a sibling temp file, then renames it
    /// over the target.
    pub async fn save(&self, map: &OrderedMap<V>) -> Result<(), ServiceError> {
        let data = serde_json::to_vec(map)
            .map_err(|e| ServiceError::CorruptData(format!("serialize {}: {e}", self.file_path.display())))?;
        let tmp = self.tmp_path();
        fs::write(&tmp, data).await.map_err(|e| self.unavailable(e))?;
        if let Err(e) = fs::rename(&tmp, &self.file_path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(self.unavailable(e));
        }
        debug!(path = %self.file_path.display(), entries = map.len(), "json map saved");
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.file_path.file_name().map(OsString::from).unwrap_or_default();
        name.push(".tmp");
        self.file_path.with_file_name(name)
    }

    fn unavailable(&self, e: std::io::Error) -> ServiceError {
        ServiceError::StorageUnavailable(format!("{}: {e}", self.file_path.display()))
    }
}
