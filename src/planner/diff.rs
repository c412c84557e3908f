//! Change detection between recorded state and the final plan.
//!
//! Unknown values are excluded from comparison: an attribute that will only
//! be known after apply is reported as such but never marks a resource as
//! changed on its own.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::state::RecordedResource;
use crate::value::AttributeValue;

/// Classification of a single attribute in the final plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// Same value as recorded.
    Unchanged,
    /// First value for a new resource.
    Set,
    /// Differs from the recorded value.
    Updated,
    /// Decided at apply time.
    KnownAfterApply,
}

/// Change detail for one attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeChange {
    /// Attribute name.
    pub name: String,
    /// Type of change.
    pub kind: ChangeKind,
    /// Recorded value, if the resource has been applied before.
    pub before: Option<AttributeValue<Value>>,
    /// Final planned value.
    pub after: AttributeValue<Value>,
}

/// What the plan will do to a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanAction {
    /// Resource will be created.
    Create,
    /// Resource will be updated in place.
    Update,
    /// Nothing to do.
    NoOp,
}

/// Computes per-attribute changes for one resource.
///
/// `prior` is `None` for a resource that has never been applied. Changes are
/// returned in the order of `names`.
#[must_use]
pub fn detect_changes(
    prior: Option<&RecordedResource>,
    names: &[&str],
    planned: &BTreeMap<String, AttributeValue<Value>>,
) -> (PlanAction, Vec<AttributeChange>) {
    let mut changes = Vec::with_capacity(names.len());

    for name in names {
        let Some(after) = planned.get(*name) else {
            continue;
        };
        let before = prior.map(|recorded| {
            recorded
                .get(*name)
                .cloned()
                .map_or(AttributeValue::Null, AttributeValue::from_recorded)
        });

        let kind = match (&before, after) {
            (_, AttributeValue::Unknown) => ChangeKind::KnownAfterApply,
            (None, _) => ChangeKind::Set,
            (Some(b), a) if b == a => ChangeKind::Unchanged,
            (Some(_), _) => ChangeKind::Updated,
        };

        changes.push(AttributeChange {
            name: (*name).to_string(),
            kind,
            before,
            after: after.clone(),
        });
    }

    let action = if prior.is_none() {
        PlanAction::Create
    } else if changes.iter().any(|c| c.kind == ChangeKind::Updated) {
        PlanAction::Update
    } else {
        PlanAction::NoOp
    };

    (action, changes)
}

impl std::fmt::Display for PlanAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::NoOp => "no-op",
        };
        write!(f, "{s}")
    }
}

impl std::fmt::Display for AttributeChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.kind, &self.before) {
            (ChangeKind::Updated, Some(before)) => {
                write!(f, "~ {} = {} -> {}", self.name, before, self.after)
            }
            (ChangeKind::Set, _) => write!(f, "+ {} = {}", self.name, self.after),
            _ => write!(f, "  {} = {}", self.name, self.after),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn recorded(pairs: &[(&str, Value)]) -> RecordedResource {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    fn planned(pairs: &[(&str, AttributeValue<Value>)]) -> BTreeMap<String, AttributeValue<Value>> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_new_resource_is_create() {
        let plan = planned(&[
            ("alert", AttributeValue::Known(json!("High CPU"))),
            ("state", AttributeValue::Unknown),
        ]);

        let (action, changes) = detect_changes(None, &["alert", "state"], &plan);
        assert_eq!(action, PlanAction::Create);
        assert_eq!(changes[0].kind, ChangeKind::Set);
        assert_eq!(changes[1].kind, ChangeKind::KnownAfterApply);
        assert!(changes[0].before.is_none());
    }

    #[test]
    fn test_unknown_does_not_trigger_update() {
        let prior = recorded(&[("state", json!("inactive")), ("evaluation", Value::Null)]);
        let plan = planned(&[
            ("state", AttributeValue::Unknown),
            ("evaluation", AttributeValue::Null),
        ]);

        let (action, changes) = detect_changes(Some(&prior), &["state", "evaluation"], &plan);
        assert_eq!(action, PlanAction::NoOp);
        assert_eq!(changes[0].kind, ChangeKind::KnownAfterApply);
        assert_eq!(changes[1].kind, ChangeKind::Unchanged);
    }

    #[test]
    fn test_edited_value_is_update() {
        let prior = recorded(&[("evaluation", json!({"window": "5m"}))]);
        let plan = planned(&[("evaluation", AttributeValue::Known(json!({"window": "10m"})))]);

        let (action, changes) = detect_changes(Some(&prior), &["evaluation"], &plan);
        assert_eq!(action, PlanAction::Update);
        assert_eq!(changes[0].kind, ChangeKind::Updated);
        assert_eq!(
            changes[0].to_string(),
            r#"~ evaluation = {"window":"5m"} -> {"window":"10m"}"#
        );
    }

    #[test]
    fn test_null_to_known_is_update() {
        let prior = recorded(&[("description", Value::Null)]);
        let plan = planned(&[("description", AttributeValue::Known(json!("cpu above 90%")))]);

        let (action, _) = detect_changes(Some(&prior), &["description"], &plan);
        assert_eq!(action, PlanAction::Update);
    }
}
