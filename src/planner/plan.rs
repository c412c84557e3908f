//! Final plan types.
//!
//! This module defines what the engine hands back after every plan modifier
//! has run: the final attribute values per resource and what changed.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::value::AttributeValue;

use super::diff::{AttributeChange, ChangeKind, PlanAction};

/// The final plan for one resource instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourcePlan {
    /// Resource address.
    pub address: String,
    /// Resource type.
    pub resource_type: String,
    /// What will happen to the resource.
    pub action: PlanAction,
    /// Final attribute values after all plan modifiers ran.
    pub attributes: BTreeMap<String, AttributeValue<Value>>,
    /// Per-attribute changes, in schema order.
    pub changes: Vec<AttributeChange>,
}

/// The final plan for a whole run.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderPlan {
    /// Unique plan identifier.
    pub id: Uuid,
    /// When the plan was created.
    pub created_at: DateTime<Utc>,
    /// Provider the schema belongs to.
    pub provider: String,
    /// Resource plans, sorted by address.
    pub resources: Vec<ResourcePlan>,
}

impl ResourcePlan {
    /// Gets a final attribute value.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&AttributeValue<Value>> {
        self.attributes.get(name)
    }

    /// Returns the attributes that will only be known after apply.
    #[must_use]
    pub fn known_after_apply(&self) -> Vec<&str> {
        self.changes
            .iter()
            .filter(|c| c.kind == ChangeKind::KnownAfterApply)
            .map(|c| c.name.as_str())
            .collect()
    }
}

impl ProviderPlan {
    /// Creates a plan from resource plans.
    #[must_use]
    pub fn new(provider: impl Into<String>, mut resources: Vec<ResourcePlan>) -> Self {
        resources.sort_by(|a, b| a.address.cmp(&b.address));
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            provider: provider.into(),
            resources,
        }
    }

    /// Gets the plan for a resource address.
    #[must_use]
    pub fn resource(&self, address: &str) -> Option<&ResourcePlan> {
        self.resources.iter().find(|r| r.address == address)
    }

    /// Returns true if no resource will be created or updated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.iter().all(|r| r.action == PlanAction::NoOp)
    }

    /// Returns the number of resources with the given action.
    #[must_use]
    pub fn count(&self, action: PlanAction) -> usize {
        self.resources.iter().filter(|r| r.action == action).count()
    }
}
