//! Local file-based state storage backend.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

use crate::error::{AttrPlanError, Result, StateError};

use super::store::StateStore;
use super::types::{StateDocument, STATE_VERSION};

/// Default state file name, read by `plan` unless `--state` is given.
pub const STATE_FILE: &str = "attrplan.state.json";

/// Local file-based state store.
#[derive(Debug)]
pub struct LocalStateStore {
    /// Path to the state file.
    state_path: PathBuf,
}

impl LocalStateStore {
    /// Creates a store from a state file path.
    #[must_use]
    pub fn with_state_path(state_path: impl Into<PathBuf>) -> Self {
        Self {
            state_path: state_path.into(),
        }
    }

    /// Returns the state file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.state_path
    }
}

#[async_trait]
impl StateStore for LocalStateStore {
    async fn load(&self) -> Result<Option<StateDocument>> {
        if !self.state_path.exists() {
            debug!("State file does not exist: {}", self.state_path.display());
            return Ok(None);
        }

        info!("Loading state from: {}", self.state_path.display());

        let content = fs::read_to_string(&self.state_path).await.map_err(|e| {
            AttrPlanError::State(StateError::corrupted(format!(
                "Failed to read state file: {e}"
            )))
        })?;

        let state: StateDocument = serde_json::from_str(&content).map_err(|e| {
            AttrPlanError::State(StateError::corrupted(format!(
                "Failed to parse state file: {e}"
            )))
        })?;

        if state.version != STATE_VERSION {
            return Err(AttrPlanError::State(StateError::VersionMismatch {
                expected: STATE_VERSION.to_string(),
                found: state.version,
            }));
        }

        debug!(
            "Loaded state serial {} with {} resources",
            state.serial,
            state.resources.len()
        );
        Ok(Some(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn create_test_store() -> (LocalStateStore, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = LocalStateStore::with_state_path(temp_dir.path().join(STATE_FILE));
        (store, temp_dir)
    }

    #[tokio::test]
    async fn test_load_recorded_state() {
        let (store, _temp) = create_test_store();
        let content = json!({
            "version": "1",
            "serial": 4,
            "last_updated": "2026-10-01T12:00:00Z",
            "resources": {
                "signoz_alert.cpu": {"state": "inactive", "evaluation": null}
            }
        });
        std::fs::write(store.path(), content.to_string()).expect("Failed to write file");

        let loaded = store
            .load()
            .await
            .expect("Failed to load state")
            .expect("State should exist");

        assert_eq!(loaded.serial, 4);
        assert!(loaded.last_updated.is_some());
        assert_eq!(
            loaded.resource("signoz_alert.cpu").and_then(|r| r.get("evaluation")),
            Some(&json!(null))
        );
    }

    #[tokio::test]
    async fn test_load_nonexistent() {
        let (store, _temp) = create_test_store();

        let result = store.load().await.expect("Load should not fail");
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_load_corrupted() {
        let (store, _temp) = create_test_store();
        std::fs::write(store.path(), "{not json").expect("Failed to write file");

        let result = store.load().await;
        assert!(matches!(
            result,
            Err(AttrPlanError::State(StateError::Corrupted { .. }))
        ));
    }

    #[tokio::test]
    async fn test_version_mismatch() {
        let (store, _temp) = create_test_store();
        std::fs::write(store.path(), r#"{"version": "0", "resources": {}}"#)
            .expect("Failed to write file");

        let result = store.load().await;
        assert!(matches!(
            result,
            Err(AttrPlanError::State(StateError::VersionMismatch { .. }))
        ));
    }

    #[tokio::test]
    async fn test_load_through_trait_object() {
        let (store, _temp) = create_test_store();
        std::fs::write(store.path(), r#"{"version": "1", "resources": {}}"#)
            .expect("Failed to write file");

        let dyn_store: &dyn StateStore = &store;
        let loaded = dyn_store.load().await.expect("Failed to load state");
        assert_eq!(loaded, Some(StateDocument::new()));
    }
}
