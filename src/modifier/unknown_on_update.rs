//! Volatility rule.

use super::{ModifyRequest, ModifyResponse, PlanModifier};
use crate::value::{AttributeShape, AttributeValue};

/// Forces the planned value to unknown whenever an existing resource is updated.
///
/// Use this for computed fields that change independently of configuration,
/// like an alert's firing state or its last-modified marker. Asserting any
/// concrete value for them would make the applied result disagree with the
/// plan; unknown accepts whatever the remote system returns.
///
/// On create the planned value is left as the host proposed it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UseUnknownOnUpdate;

impl UseUnknownOnUpdate {
    /// Registry name.
    pub const NAME: &'static str = "use_unknown_on_update";

    /// Plain-text description.
    pub const DESCRIPTION: &'static str = "Sets the value to unknown during updates to prevent inconsistency errors for volatile computed fields.";
}

impl<T: AttributeShape> PlanModifier<T> for UseUnknownOnUpdate {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        Self::DESCRIPTION
    }

    fn modify(&self, req: &ModifyRequest<'_, T>, resp: &mut ModifyResponse<T>) {
        if req.prior_state_is_null {
            return;
        }

        resp.plan_value = AttributeValue::Unknown;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ObjectValue;
    use serde_json::json;

    fn object(value: serde_json::Value) -> ObjectValue {
        ObjectValue::from_json(value).unwrap()
    }

    #[test]
    fn test_create_leaves_plan_untouched() {
        let rule = UseUnknownOnUpdate;
        for tentative in [
            AttributeValue::Known(String::from("firing")),
            AttributeValue::Null,
            AttributeValue::Unknown,
        ] {
            assert_eq!(rule.apply(None, tentative.clone()), tentative);
        }

        let structured = AttributeValue::Known(object(json!({"window": "5m"})));
        assert_eq!(rule.apply(None, structured.clone()), structured);
    }

    #[test]
    fn test_new_status_stays_unknown() {
        let revised = UseUnknownOnUpdate.apply(None, AttributeValue::<String>::Unknown);
        assert_eq!(revised, AttributeValue::Unknown);
    }

    #[test]
    fn test_update_overrides_firing_status() {
        let prior = AttributeValue::Known(String::from("inactive"));
        let revised =
            UseUnknownOnUpdate.apply(Some(&prior), AttributeValue::Known(String::from("firing")));
        assert_eq!(revised, AttributeValue::Unknown);
    }

    #[test]
    fn test_update_always_unknown() {
        let priors = [
            AttributeValue::Known(String::from("inactive")),
            AttributeValue::Null,
        ];
        let tentatives = [
            AttributeValue::Known(String::from("firing")),
            AttributeValue::Null,
            AttributeValue::Unknown,
        ];

        for prior in &priors {
            for tentative in &tentatives {
                let revised = UseUnknownOnUpdate.apply(Some(prior), tentative.clone());
                assert!(revised.is_unknown(), "prior {prior:?}, tentative {tentative:?}");
            }
        }
    }

    #[test]
    fn test_description() {
        let rule: &dyn PlanModifier<String> = &UseUnknownOnUpdate;
        assert_eq!(rule.name(), "use_unknown_on_update");
        assert_eq!(rule.markdown_description(), rule.description());
    }
}
