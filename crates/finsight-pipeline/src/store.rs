//! File-backed persistence for snapshot documents

use crate::error::Result;
use serde_json::{Value, json};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::warn;

/// Storage abstraction the pipeline persists through
///
/// Kept deliberately small so tests can count writes and HTTP handlers can
/// read snapshots without caring where they live.
pub trait FileStore: Send + Sync {
    /// Read the full contents of `path`; `None` when the file does not exist
    fn read(&self, path: &Path) -> Result<Option<Vec<u8>>>;

    /// Replace the contents of `path`
    fn write(&self, path: &Path, bytes: &[u8]) -> Result<()>;
}

/// Local filesystem store with atomic replacement
///
/// Writes land in a temporary sibling first and are renamed over the target,
/// so a concurrent reader observes either the previous document or the new
/// one, never a truncated mix.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileStore;

impl FileStore for LocalFileStore {
    fn read(&self, path: &Path) -> Result<Option<Vec<u8>>> {
        match fs::read(path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp = path.with_extension("tmp");
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

/// Build the response body for a snapshot read
///
/// The parsed snapshot is returned verbatim; a missing, unreadable, or
/// malformed file maps to an `{"error", "status": "error"}` body that HTTP
/// handlers can relay unchanged.
pub fn snapshot_body(store: &dyn FileStore, path: &Path) -> Value {
    match store.read(path) {
        Ok(Some(bytes)) => match serde_json::from_slice(&bytes) {
            Ok(body) => body,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "snapshot file is malformed");
                json!({
                    "error": format!("snapshot {} holds invalid JSON", path.display()),
                    "status": "error",
                })
            }
        },
        Ok(None) => json!({
            "error": format!("snapshot {} not found", path.display()),
            "status": "error",
        }),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "snapshot read failed");
            json!({ "error": err.to_string(), "status": "error" })
        }
    }
}
