use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::StorageError;

fn resolve(root: &Path, key: &str) -> PathBuf {
    root.join(key)
}

/// Read a record file.
pub async fn get_object(root: &Path, key: &str) -> Result<Vec<u8>, StorageError> {
    let path = resolve(root, key);
    tokio::fs::read(&path).await.map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            StorageError::NotFound {
                key: key.to_string(),
            }
        } else {
            StorageError::io(path.display().to_string(), e)
        }
    })
}

/// Write a record file atomically: temp file in the same directory, then
/// rename over the target.
pub async fn put_object(root: &Path, key: &str, body: &[u8]) -> Result<(), StorageError> {
    let path = resolve(root, key);
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| StorageError::io(parent.display().to_string(), e))?;
    }
    let tmp_path = path.with_extension("json.tmp");
    tokio::fs::write(&tmp_path, body)
        .await
        .map_err(|e| StorageError::io(tmp_path.display().to_string(), e))?;
    tokio::fs::rename(&tmp_path, &path)
        .await
        .map_err(|e| StorageError::io(path.display().to_string(), e))?;
    Ok(())
}

/// List the keys of all `.json` records under `prefix`, sorted.
/// A missing prefix directory lists as empty.
pub async fn list_objects(root: &Path, prefix: &str) -> Result<Vec<String>, StorageError> {
    let dir = resolve(root, prefix);
    let mut entries = match tokio::fs::read_dir(&dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(StorageError::io(dir.display().to_string(), e)),
    };

    let mut keys = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| StorageError::io(dir.display().to_string(), e))?
    {
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if name.ends_with(".json") {
            keys.push(format!("{prefix}{name}"));
        }
    }
    keys.sort();
    Ok(keys)
}
