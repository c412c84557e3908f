//! Schema definition types.
//!
//! These structs map one-to-one to `attrplan.schema.yaml`.

use serde::{Deserialize, Serialize};

use crate::modifier::{ModifierChain, RuleKind};
use crate::value::{AttributeShape, ShapeKind};

/// The root schema: every resource type a provider manages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProviderSchema {
    /// Provider name, used as a prefix for resource types.
    pub provider: String,
    /// Managed resource types.
    #[serde(default)]
    pub resources: Vec<ResourceSchema>,
}

/// One managed resource type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResourceSchema {
    /// Resource type name (e.g. `signoz_alert`).
    #[serde(rename = "type")]
    pub resource_type: String,
    /// Declared attributes.
    #[serde(default)]
    pub attributes: Vec<AttributeSchema>,
}

/// One attribute of a resource type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttributeSchema {
    /// Attribute name.
    pub name: String,
    /// Value shape.
    pub shape: ShapeKind,
    /// Whether configuration may omit the attribute.
    #[serde(default)]
    pub optional: bool,
    /// Whether the remote system may supply the value.
    #[serde(default)]
    pub computed: bool,
    /// Plan modifiers, in execution order.
    #[serde(default)]
    pub plan_modifiers: Vec<RuleKind>,
    /// Human-readable description.
    #[serde(default)]
    pub description: Option<String>,
}

impl ProviderSchema {
    /// Looks up a resource type.
    #[must_use]
    pub fn resource(&self, resource_type: &str) -> Option<&ResourceSchema> {
        self.resources
            .iter()
            .find(|r| r.resource_type == resource_type)
    }

    /// Returns the total number of declared attributes.
    #[must_use]
    pub fn attribute_count(&self) -> usize {
        self.resources.iter().map(|r| r.attributes.len()).sum()
    }

    /// Returns the total number of registered plan modifiers.
    #[must_use]
    pub fn modifier_count(&self) -> usize {
        self.resources
            .iter()
            .flat_map(|r| &r.attributes)
            .map(|a| a.plan_modifiers.len())
            .sum()
    }
}

impl ResourceSchema {
    /// Looks up an attribute.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&AttributeSchema> {
        self.attributes.iter().find(|a| a.name == name)
    }
}

impl AttributeSchema {
    /// Builds the ordered modifier chain for this attribute.
    #[must_use]
    pub fn chain<T: AttributeShape>(&self) -> ModifierChain<T> {
        let mut chain = ModifierChain::new();
        for kind in &self.plan_modifiers {
            chain.push(kind.build());
        }
        chain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alert_schema() -> ProviderSchema {
        ProviderSchema {
            provider: String::from("signoz"),
            resources: vec![ResourceSchema {
                resource_type: String::from("signoz_alert"),
                attributes: vec![
                    AttributeSchema {
                        name: String::from("state"),
                        shape: ShapeKind::Scalar,
                        optional: false,
                        computed: true,
                        plan_modifiers: vec![RuleKind::UseUnknownOnUpdate],
                        description: None,
                    },
                    AttributeSchema {
                        name: String::from("evaluation"),
                        shape: ShapeKind::Structured,
                        optional: true,
                        computed: true,
                        plan_modifiers: vec![RuleKind::UseStateForUnknownIncludingNull],
                        description: None,
                    },
                ],
            }],
        }
    }

    #[test]
    fn test_lookups() {
        let schema = alert_schema();
        let alert = schema.resource("signoz_alert").unwrap();

        assert!(schema.resource("signoz_dashboard").is_none());
        assert_eq!(alert.attribute("evaluation").unwrap().shape, ShapeKind::Structured);
        assert_eq!(schema.attribute_count(), 2);
        assert_eq!(schema.modifier_count(), 2);
    }

    #[test]
    fn test_chain_follows_declared_order() {
        let mut attribute = alert_schema().resources[0].attributes[1].clone();
        attribute.plan_modifiers.push(RuleKind::UseUnknownOnUpdate);

        let chain = attribute.chain::<crate::value::ObjectValue>();
        assert_eq!(
            chain.names(),
            vec!["use_state_for_unknown_including_null", "use_unknown_on_update"]
        );
    }
}
