//! JSON file helpers shared by the settings store and history log.

use std::io;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use leasehub_core::error::{AppError, ErrorKind};

/// Read and parse a JSON file. A missing file is `Ok(None)`.
pub(crate) async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, AppError> {
    match tokio::fs::read(path).await {
        Ok(bytes) => serde_json::from_slice(&bytes).map(Some).map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Corrupt JSON in {}: {e}", path.display()),
                e,
            )
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(AppError::with_source(
            ErrorKind::Storage,
            format!("Failed to read {}: {e}", path.display()),
            e,
        )),
    }
}

/// Write pretty JSON via a sibling temp file and rename, creating parent dirs.
pub(crate) async fn write_json<T: Serialize + ?Sized>(
    path: &Path,
    value: &T,
) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let bytes = serde_json::to_vec_pretty(value)?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");

    tokio::fs::write(&tmp, bytes).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}
