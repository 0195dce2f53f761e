use std::path::Path;

use serde::{Serialize, de::DeserializeOwned};

use crate::error::StorageError;
use crate::files;

/// Load a JSON record.
pub async fn load_record<T: DeserializeOwned>(root: &Path, key: &str) -> Result<T, StorageError> {
    let body = files::get_object(root, key).await?;
    Ok(serde_json::from_slice(&body)?)
}

/// Save a JSON record, replacing any previous version.
pub async fn save_record<T: Serialize>(
    root: &Path,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let body = serde_json::to_vec_pretty(value)?;
    files::put_object(root, key, &body).await
}

/// Load every JSON record under `prefix`.
pub async fn load_all<T: DeserializeOwned>(
    root: &Path,
    prefix: &str,
) -> Result<Vec<T>, StorageError> {
    let mut records = Vec::new();
    for key in files::list_objects(root, prefix).await? {
        records.push(load_record(root, &key).await?);
    }
    Ok(records)
}
