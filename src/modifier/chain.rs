//! Ordered modifier lists.

use tracing::debug;

use super::{ModifyRequest, ModifyResponse, PlanModifier};
use crate::value::{AttributeShape, AttributeValue};

/// The modifiers registered for one attribute, in execution order.
///
/// Each modifier sees the value produced by the one before it, so a later
/// modifier can override an earlier one.
pub struct ModifierChain<T: AttributeShape> {
    /// Modifiers in execution order.
    modifiers: Vec<Box<dyn PlanModifier<T>>>,
}

impl<T: AttributeShape> ModifierChain<T> {
    /// Creates an empty chain.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            modifiers: Vec::new(),
        }
    }

    /// Appends a modifier and returns the chain.
    #[must_use]
    pub fn with(mut self, modifier: impl PlanModifier<T> + 'static) -> Self {
        self.modifiers.push(Box::new(modifier));
        self
    }

    /// Appends a boxed modifier.
    pub fn push(&mut self, modifier: Box<dyn PlanModifier<T>>) {
        self.modifiers.push(modifier);
    }

    /// Returns the modifier names in execution order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.modifiers.iter().map(|m| m.name()).collect()
    }

    /// Runs every modifier in order and returns the final planned value.
    ///
    /// `prior` is `None` when the resource is being created.
    pub fn run(
        &self,
        path: &str,
        prior: Option<&AttributeValue<T>>,
        tentative: AttributeValue<T>,
    ) -> AttributeValue<T> {
        let null = AttributeValue::Null;
        let state_value = prior.unwrap_or(&null);
        let mut planned = tentative;

        for modifier in &self.modifiers {
            let req = ModifyRequest {
                path,
                prior_state_is_null: prior.is_none(),
                state_value,
                plan_value: &planned,
            };
            let mut resp = ModifyResponse::unchanged(&req);
            modifier.modify(&req, &mut resp);

            if resp.plan_value != planned {
                debug!(
                    "{} revised {path}: {} -> {}",
                    modifier.name(),
                    planned.state_name(),
                    resp.plan_value.state_name()
                );
            }
            planned = resp.plan_value;
        }

        planned
    }
}

impl<T: AttributeShape> Default for ModifierChain<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: AttributeShape> std::fmt::Debug for ModifierChain<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
