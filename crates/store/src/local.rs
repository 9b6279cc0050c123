//! Whole-file JSON access on the local filesystem.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;

/// Read a JSON array from `path`. A missing file is an empty collection.
pub async fn read_array<T: DeserializeOwned>(path: &Path) -> Result<Option<Vec<T>>, StoreError> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Pretty-print `items` as the whole new content of a collection file.
pub fn to_pretty<T: Serialize>(items: &[T]) -> Result<Vec<u8>, StoreError> {
    Ok(serde_json::to_vec_pretty(items)?)
}

/// Replace `path` with `bytes` via a sibling temp file and a rename, so a
/// reader never sees a half-written file.
pub async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let tmp = temp_path(path);
    tokio::fs::write(&tmp, bytes).await?;
    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(e.into());
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
