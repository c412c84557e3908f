//! Planning module for attribute reconciliation.
//!
//! This module runs the registered plan modifiers against each resource's
//! tentative plan and classifies the result against recorded state.

mod diff;
mod engine;
mod plan;
mod resource;

pub use diff::{detect_changes, AttributeChange, ChangeKind, PlanAction};
pub use engine::PlanEngine;
pub use plan::{ProviderPlan, ResourcePlan};
pub use resource::ResourceInstance;
