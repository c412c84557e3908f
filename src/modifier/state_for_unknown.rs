//! Presence-preserving rules.
//!
//! Both rules copy the recorded value into an unknown plan slot on update.
//! They differ only in how a recorded null is treated.

use super::{ModifyRequest, ModifyResponse, PlanModifier};
use crate::value::AttributeShape;

/// Uses the recorded value, including an explicit null, when the plan is unknown.
///
/// Optional computed attributes that are legitimately absent would otherwise
/// be re-planned as unknown on every run and show up as
/// "(known after apply)" even though nothing changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UseStateForUnknownIncludingNull;

impl UseStateForUnknownIncludingNull {
    /// Registry name.
    pub const NAME: &'static str = "use_state_for_unknown_including_null";

    /// Plain-text description.
    pub const DESCRIPTION: &'static str =
        "Uses the prior state value (including null) when the planned value is unknown.";
}

impl<T: AttributeShape> PlanModifier<T> for UseStateForUnknownIncludingNull {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        Self::DESCRIPTION
    }

    fn modify(&self, req: &ModifyRequest<'_, T>, resp: &mut ModifyResponse<T>) {
        if req.prior_state_is_null || !req.plan_value.is_unknown() {
            return;
        }

        resp.plan_value = req.state_value.clone();
    }
}

/// Uses the recorded value when the plan is unknown, unless it is null.
///
/// This is the stock host behaviour. A recorded null leaves the slot unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UseStateForUnknown;

impl UseStateForUnknown {
    /// Registry name.
    pub const NAME: &'static str = "use_state_for_unknown";

    /// Plain-text description.
    pub const DESCRIPTION: &'static str =
        "Uses the prior state value when the planned value is unknown and the prior value is not null.";
}

impl<T: AttributeShape> PlanModifier<T> for UseStateForUnknown {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        Self::DESCRIPTION
    }

    fn modify(&self, req: &ModifyRequest<'_, T>, resp: &mut ModifyResponse<T>) {
        if req.prior_state_is_null || req.state_value.is_null() || !req.plan_value.is_unknown() {
            return;
        }

        resp.plan_value = req.state_value.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{AttributeValue, ObjectValue};
    use serde_json::json;

    fn evaluation(window: &str) -> AttributeValue<ObjectValue> {
        AttributeValue::Known(ObjectValue::from_json(json!({"window": window})).unwrap())
    }

    #[test]
    fn test_create_is_noop() {
        let rule = UseStateForUnknownIncludingNull;
        assert_eq!(rule.apply(None, evaluation("5m")), evaluation("5m"));
        assert_eq!(
            rule.apply(None, AttributeValue::<ObjectValue>::Unknown),
            AttributeValue::Unknown
        );
        assert_eq!(
            rule.apply(None, AttributeValue::<String>::Null),
            AttributeValue::Null
        );
    }

    #[test]
    fn test_only_unknown_slots_are_filled() {
        let rule = UseStateForUnknownIncludingNull;
        let prior = evaluation("5m");

        assert_eq!(rule.apply(Some(&prior), evaluation("10m")), evaluation("10m"));
        assert_eq!(
            rule.apply(Some(&prior), AttributeValue::Null),
            AttributeValue::Null
        );

        let prior = AttributeValue::<String>::Null;
        let tentative = AttributeValue::Known(String::from("ops@example.com"));
        assert_eq!(rule.apply(Some(&prior), tentative.clone()), tentative);
    }

    #[test]
    fn test_null_is_forwarded() {
        let rule = UseStateForUnknownIncludingNull;
        let prior = AttributeValue::<ObjectValue>::Null;

        let revised = rule.apply(Some(&prior), AttributeValue::Unknown);
        assert_eq!(revised, AttributeValue::Null);

        let prior = AttributeValue::<String>::Null;
        let revised = rule.apply(Some(&prior), AttributeValue::Unknown);
        assert_eq!(revised, AttributeValue::Null);
    }

    #[test]
    fn test_known_is_forwarded() {
        let rule = UseStateForUnknownIncludingNull;

        let prior = evaluation("5m");
        assert_eq!(rule.apply(Some(&prior), AttributeValue::Unknown), evaluation("5m"));

        let prior = AttributeValue::Known(String::from("admin"));
        assert_eq!(
            rule.apply(Some(&prior), AttributeValue::Unknown),
            AttributeValue::Known(String::from("admin"))
        );
    }

    #[test]
    fn test_stock_rule_drops_null() {
        let rule = UseStateForUnknown;
        let prior = AttributeValue::<ObjectValue>::Null;
        assert_eq!(
            rule.apply(Some(&prior), AttributeValue::Unknown),
            AttributeValue::Unknown
        );

        let prior = evaluation("5m");
        assert_eq!(rule.apply(Some(&prior), AttributeValue::Unknown), evaluation("5m"));
        assert_eq!(rule.apply(None, AttributeValue::<ObjectValue>::Unknown), AttributeValue::Unknown);
    }

    #[test]
    fn test_descriptions_differ() {
        let including_null: &dyn PlanModifier<ObjectValue> = &UseStateForUnknownIncludingNull;
        let stock: &dyn PlanModifier<ObjectValue> = &UseStateForUnknown;
        assert_ne!(including_null.description(), stock.description());
        assert!(including_null.description().contains("including null"));
    }
}
