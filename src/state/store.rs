//! State store trait definition.
//!
//! This module defines the common interface for recorded state backends.

use async_trait::async_trait;

use super::types::StateDocument;
use crate::error::Result;

/// Trait for recorded state backends.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Loads the recorded state.
    ///
    /// Returns `None` if no state exists yet.
    async fn load(&self) -> Result<Option<StateDocument>>;
}
