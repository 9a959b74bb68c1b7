//! Atomic JSON file operations.
//!
//! Writes go to a hidden temporary file in the same directory, are flushed to
//! disk and then renamed over the target, so readers only ever observe a
//! complete document. A failed write removes the temporary file. There is no
//! cross-process locking.

use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use parlor_core::{ParlorError, Result};
use serde::{Serialize, de::DeserializeOwned};
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;

/// A handle to a JSON document replaced atomically on every save.
#[derive(Debug, Clone)]
pub struct AtomicJsonFile<T> {
    path: PathBuf,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> AtomicJsonFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and deserializes the file.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: Successfully loaded and deserialized
    /// - `Ok(None)`: File doesn't exist or is empty
    /// - `Err`: Failed to read or parse the file
    pub async fn load(&self) -> Result<Option<T>> {
        if !fs::try_exists(&self.path).await? {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path).await?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let data: T = serde_json::from_str(&content)?;
        Ok(Some(data))
    }

    /// Serializes `data` as pretty JSON and atomically replaces the file.
    pub async fn save(&self, data: &T) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_string_pretty(data)?;

        let tmp_path = self.temp_path()?;
        if let Err(e) = write_synced(&tmp_path, json.as_bytes()).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }

        if let Err(e) = fs::rename(&tmp_path, &self.path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }
        Ok(())
    }

    fn temp_path(&self) -> Result<PathBuf> {
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| ParlorError::io(format!("Path has no file name: {:?}", self.path)))?;
        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(self.path.with_file_name(tmp_name))
    }
}

async fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await
}
