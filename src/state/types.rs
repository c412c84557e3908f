//! Document types for recorded state and tentative plans.
//!
//! Recorded state holds plain JSON values, since nothing in it can still be
//! undetermined. Tentative plans hold tagged values so that `null` and
//! unknown stay distinguishable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::value::AttributeValue;

/// Current version of the state format.
pub const STATE_VERSION: &str = "1";

/// Recorded attribute values for one resource instance.
pub type RecordedResource = BTreeMap<String, Value>;

/// The complete recorded state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StateDocument {
    /// State format version.
    pub version: String,
    /// Incremented by the writer every time the state is written.
    #[serde(default)]
    pub serial: u64,
    /// When the state was last written.
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
    /// Recorded resources by address.
    #[serde(default)]
    pub resources: BTreeMap<String, RecordedResource>,
}

/// The tentative plan proposed by the host engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PlanDocument {
    /// Planned resources by address.
    #[serde(default)]
    pub resources: BTreeMap<String, PlannedResource>,
}

/// One resource in a tentative plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlannedResource {
    /// Resource type, as declared in the schema.
    #[serde(rename = "type")]
    pub resource_type: String,
    /// Tentative attribute values.
    #[serde(default)]
    pub attributes: BTreeMap<String, AttributeValue<Value>>,
}

impl StateDocument {
    /// Creates an empty state document.
    #[must_use]
    pub fn new() -> Self {
        Self {
            version: STATE_VERSION.to_string(),
            serial: 0,
            last_updated: None,
            resources: BTreeMap::new(),
        }
    }

    /// Gets the recorded values for a resource address.
    ///
    /// `None` means the resource has never been applied.
    #[must_use]
    pub fn resource(&self, address: &str) -> Option<&RecordedResource> {
        self.resources.get(address)
    }
}

impl Default for StateDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanDocument {
    /// Adds a resource to the plan and returns the document.
    #[must_use]
    pub fn with_resource(mut self, address: impl Into<String>, resource: PlannedResource) -> Self {
        self.resources.insert(address.into(), resource);
        self
    }
}

impl PlannedResource {
    /// Creates an empty planned resource of the given type.
    #[must_use]
    pub fn new(resource_type: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Sets a tentative attribute value and returns the resource.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: AttributeValue<Value>) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }
}
