//! Reading and writing JSON plan documents.

use serde::Serialize;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::error::{AttrPlanError, Result, StateError};

use super::types::PlanDocument;

/// Loads a tentative plan document.
///
/// # Errors
///
/// Returns an error if the file is missing or cannot be parsed.
pub async fn load_plan_document(path: &Path) -> Result<PlanDocument> {
    if !path.exists() {
        return Err(AttrPlanError::State(StateError::NotFound {
            path: path.to_path_buf(),
        }));
    }

    info!("Loading tentative plan from: {}", path.display());

    let content = fs::read_to_string(path).await.map_err(|e| {
        AttrPlanError::State(StateError::corrupted(format!(
            "Failed to read plan file: {e}"
        )))
    })?;

    serde_json::from_str(&content).map_err(|e| {
        AttrPlanError::State(StateError::corrupted(format!(
            "Failed to parse plan file: {e}"
        )))
    })
}

/// Writes a document as pretty JSON through a temporary file and a rename.
///
/// # Errors
///
/// Returns an error if serialization or any filesystem step fails.
pub async fn write_json_atomic<T: Serialize + Sync>(path: &Path, document: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            debug!("Creating directory: {}", parent.display());
            fs::create_dir_all(parent).await?;
        }
    }

    let content = serde_json::to_string_pretty(document).map_err(|e| {
        AttrPlanError::State(StateError::serialization(format!(
            "Failed to serialize document: {e}"
        )))
    })?;

    let temp_path = temp_path_for(path);

    let written = match write_synced(&temp_path, content.as_bytes()).await {
        Ok(()) => fs::rename(&temp_path, path).await,
        Err(e) => Err(e),
    };

    if let Err(e) = written {
        if let Err(cleanup) = fs::remove_file(&temp_path).await {
            debug!("Could not remove {}: {cleanup}", temp_path.display());
        }
        return Err(e.into());
    }

    debug!("Wrote {}", path.display());
    Ok(())
}

/// Sibling path used while writing, always distinct from `path`.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsStr::to_os_string)
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

async fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await
}
