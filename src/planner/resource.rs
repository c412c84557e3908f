//! Resource instances for one plan cycle.

use serde_json::Value;
use std::collections::BTreeMap;

use crate::state::{PlanDocument, RecordedResource, StateDocument};
use crate::value::AttributeValue;

/// One resource instance as seen by the engine during a single plan cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceInstance {
    /// Address in configuration (e.g. `signoz_alert.cpu`).
    pub address: String,
    /// Resource type, as declared in the schema.
    pub resource_type: String,
    /// Recorded values. `None` when the instance has never been applied.
    pub prior_state: Option<RecordedResource>,
    /// Tentative values proposed by the host engine.
    pub tentative_plan: BTreeMap<String, AttributeValue<Value>>,
}

impl ResourceInstance {
    /// Creates an instance that has never been applied.
    #[must_use]
    pub fn new(address: impl Into<String>, resource_type: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            resource_type: resource_type.into(),
            prior_state: None,
            tentative_plan: BTreeMap::new(),
        }
    }

    /// Sets the recorded state and returns the instance.
    #[must_use]
    pub fn with_prior_state(mut self, prior_state: RecordedResource) -> Self {
        self.prior_state = Some(prior_state);
        self
    }

    /// Sets a tentative value and returns the instance.
    #[must_use]
    pub fn with_tentative(mut self, name: impl Into<String>, value: AttributeValue<Value>) -> Self {
        self.tentative_plan.insert(name.into(), value);
        self
    }

    /// Returns true exactly when there is no recorded state for this address.
    #[must_use]
    pub const fn is_new(&self) -> bool {
        self.prior_state.is_none()
    }

    /// Returns the recorded value of an attribute.
    ///
    /// `None` for a new instance. An attribute missing from recorded state
    /// reads as null.
    #[must_use]
    pub fn prior_value(&self, name: &str) -> Option<AttributeValue<Value>> {
        self.prior_state.as_ref().map(|recorded| {
            recorded
                .get(name)
                .cloned()
                .map_or(AttributeValue::Null, AttributeValue::from_recorded)
        })
    }

    /// Builds one instance per planned resource, pairing each with its recorded state.
    #[must_use]
    pub fn from_documents(plan: &PlanDocument, state: Option<&StateDocument>) -> Vec<Self> {
        plan.resources
            .iter()
            .map(|(address, planned)| Self {
                address: address.clone(),
                resource_type: planned.resource_type.clone(),
                prior_state: state.and_then(|s| s.resource(address)).cloned(),
                tentative_plan: planned.attributes.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::PlannedResource;
    use serde_json::json;

    #[test]
    fn test_is_new_tracks_prior_state() {
        let instance = ResourceInstance::new("signoz_alert.cpu", "signoz_alert");
        assert!(instance.is_new());
        assert_eq!(instance.prior_value("state"), None);

        let instance = instance.with_prior_state(RecordedResource::new());
        assert!(!instance.is_new());
        assert_eq!(instance.prior_value("state"), Some(AttributeValue::Null));
    }

    #[test]
    fn test_from_documents() {
        let plan = PlanDocument::default()
            .with_resource(
                "signoz_alert.cpu",
                PlannedResource::new("signoz_alert").with("state", AttributeValue::Unknown),
            )
            .with_resource(
                "signoz_alert.disk",
                PlannedResource::new("signoz_alert").with("state", AttributeValue::Unknown),
            );

        let mut state = StateDocument::new();
        let mut cpu = RecordedResource::new();
        cpu.insert(String::from("state"), json!("firing"));
        state.resources.insert(String::from("signoz_alert.cpu"), cpu);

        let instances = ResourceInstance::from_documents(&plan, Some(&state));
        assert_eq!(instances.len(), 2);

        let cpu = instances.iter().find(|i| i.address == "signoz_alert.cpu").unwrap();
        assert!(!cpu.is_new());
        assert_eq!(cpu.prior_value("state"), Some(AttributeValue::Known(json!("firing"))));

        let disk = instances.iter().find(|i| i.address == "signoz_alert.disk").unwrap();
        assert!(disk.is_new());

        let without_state = ResourceInstance::from_documents(&plan, None);
        assert!(without_state.iter().all(ResourceInstance::is_new));
    }
}
