//! Plan modifiers for computed attributes.
//!
//! A plan modifier inspects one attribute of one resource instance during the
//! plan phase and may replace the value the host engine proposed. This module
//! provides:
//! - The [`PlanModifier`] contract, generic over the attribute's value shape
//! - [`UseUnknownOnUpdate`] for volatile, remotely controlled fields
//! - [`UseStateForUnknownIncludingNull`] for optional computed fields whose
//!   absence must survive across plans
//! - [`UseStateForUnknown`], the stock behaviour that drops recorded nulls
//! - [`ModifierChain`], the ordered list of modifiers for one attribute

mod chain;
mod registry;
mod state_for_unknown;
mod unknown_on_update;

pub use chain::ModifierChain;
pub use registry::RuleKind;
pub use state_for_unknown::{UseStateForUnknown, UseStateForUnknownIncludingNull};
pub use unknown_on_update::UseUnknownOnUpdate;

use crate::value::{AttributeShape, AttributeValue};

/// Everything a modifier may look at for a single attribute.
#[derive(Debug)]
pub struct ModifyRequest<'a, T> {
    /// Attribute path within the resource.
    pub path: &'a str,
    /// True when the resource has no recorded state (it is being created).
    pub prior_state_is_null: bool,
    /// The recorded value. `Null` whenever `prior_state_is_null` is set.
    pub state_value: &'a AttributeValue<T>,
    /// The value planned so far, by the host engine or an earlier modifier.
    pub plan_value: &'a AttributeValue<T>,
}

/// The value a modifier hands back to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifyResponse<T> {
    /// The planned value after this modifier ran.
    pub plan_value: AttributeValue<T>,
}

impl<T: Clone> ModifyResponse<T> {
    /// Creates a response that leaves the planned value unchanged.
    #[must_use]
    pub fn unchanged(req: &ModifyRequest<'_, T>) -> Self {
        Self {
            plan_value: req.plan_value.clone(),
        }
    }
}

/// A reconciliation rule for attributes of shape `T`.
///
/// Implementations must be pure: the outcome may depend only on the request.
pub trait PlanModifier<T: AttributeShape>: Send + Sync {
    /// Registry name, as written in schema files.
    fn name(&self) -> &'static str;

    /// Plain-text description for documentation and tooling.
    fn description(&self) -> &'static str;

    /// Markdown description. Defaults to the plain description.
    fn markdown_description(&self) -> String {
        self.description().to_string()
    }

    /// Revises `resp.plan_value` in place.
    fn modify(&self, req: &ModifyRequest<'_, T>, resp: &mut ModifyResponse<T>);

    /// Runs the modifier on a bare prior value and tentative plan value.
    ///
    /// `prior` is `None` when the resource is new.
    fn apply(&self, prior: Option<&AttributeValue<T>>, tentative: AttributeValue<T>) -> AttributeValue<T> {
        let null = AttributeValue::Null;
        let req = ModifyRequest {
            path: "",
            prior_state_is_null: prior.is_none(),
            state_value: prior.unwrap_or(&null),
            plan_value: &tentative,
        };
        let mut resp = ModifyResponse::unchanged(&req);
        self.modify(&req, &mut resp);
        resp.plan_value
    }
}
