// ============================================================================
// Strict linting - Dangerous or non-idiomatic practices are forbidden
// ============================================================================

#![deny(unsafe_code)]                 // Unsafe code is forbidden
#![deny(missing_docs)]                // All public items must be documented
#![deny(dead_code)]                   // Unused code is forbidden
#![deny(non_camel_case_types)]        // Types must follow CamelCase convention

// Additional strictness - Leave nothing unchecked
#![deny(unused_imports)]              // Unused imports are forbidden
#![deny(unused_variables)]            // Unused variables are forbidden
#![deny(unused_must_use)]             // Must handle Result and Option explicitly
#![deny(non_snake_case)]              // Variables and functions must be snake_case
#![deny(non_upper_case_globals)]      // Constants must be UPPER_CASE
#![deny(nonstandard_style)]           // Non-standard code style is forbidden
#![forbid(unsafe_op_in_unsafe_fn)]    // Unsafe ops in unsafe fns are forbidden

// Clippy lints (warnings only)
#![warn(clippy::all)]                 // All standard Clippy lints
#![warn(clippy::pedantic)]            // Very strict Clippy lints
#![warn(clippy::nursery)]             // Experimental lints
#![warn(clippy::unwrap_used)]         // unwrap() warning
#![warn(clippy::expect_used)]         // expect() warning
#![warn(clippy::panic)]               // panic!() warning
#![warn(clippy::print_stdout)]        // println!() warning
#![warn(clippy::todo)]                // TODO warning
#![warn(clippy::unimplemented)]       // unimplemented!() warning
#![warn(clippy::missing_const_for_fn)] // Force const when possible
#![warn(clippy::unwrap_in_result)]    // unwrap() in Result warning
#![warn(clippy::module_inception)]    // Module with same name as crate warning
#![warn(clippy::redundant_clone)]     // Useless clones warning
#![warn(clippy::shadow_unrelated)]    // Shadowing unrelated variables warning
#![warn(clippy::too_many_arguments)]  // Limit function arguments
#![warn(clippy::cognitive_complexity)] // Limit cognitive complexity

// Safety and robustness lints
#![deny(overflowing_literals)]        // Overflowing literals are forbidden
#![deny(arithmetic_overflow)]         // Arithmetic overflow is forbidden

// ============================================================================
// Crate Documentation
// ============================================================================

//! # attrplan
//!
//! Plan-time reconciliation rules for computed attributes of declarative
//! infrastructure resources.
//!
//! ## Overview
//!
//! A host engine proposes a tentative plan for each resource instance. Some
//! attributes are computed by the remote system and need help before that
//! plan can be trusted:
//!
//! - Volatile fields (timestamps, server-managed status) change on every
//!   write, so they must read as unknown whenever the resource is updated
//! - Optional computed blocks that the server left unset must stay null
//!   across plans instead of turning into a perpetual diff
//!
//! ## Architecture
//!
//! 1. **Schema**: `attrplan.schema.yaml` declares resource types, their
//!    attributes and the ordered plan modifiers for each attribute
//! 2. **Recorded state**: the last applied values, read from a state store
//! 3. **Planner**: runs every modifier chain over the tentative plan and
//!    classifies what changed
//!
//! ## Modules
//!
//! - [`value`]: Tri-state attribute values and their shapes
//! - [`modifier`]: Plan modifiers and modifier chains
//! - [`schema`]: Schema parsing and validation
//! - [`state`]: Recorded state and plan documents
//! - [`planner`]: Plan engine and change detection
//! - [`cli`]: Command-line interface
//!
//! ## Example
//!
//! ```yaml
//! provider: signoz
//! resources:
//!   - type: signoz_alert
//!     attributes:
//!       - name: state
//!         shape: scalar
//!         computed: true
//!         plan_modifiers:
//!           - use_unknown_on_update
//!       - name: evaluation
//!         shape: structured
//!         optional: true
//!         computed: true
//!         plan_modifiers:
//!           - use_state_for_unknown_including_null
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod cli;
pub mod error;
pub mod modifier;
pub mod planner;
pub mod schema;
pub mod state;
pub mod value;

// ============================================================================
// Re-exports
// ============================================================================

pub use cli::{Cli, Commands, OutputFormatter};
pub use error::{AttrPlanError, Result};
pub use modifier::{
    ModifierChain, ModifyRequest, ModifyResponse, PlanModifier, RuleKind, UseStateForUnknown,
    UseStateForUnknownIncludingNull, UseUnknownOnUpdate,
};
pub use planner::{PlanAction, PlanEngine, ProviderPlan, ResourceInstance, ResourcePlan};
pub use schema::{ProviderSchema, SchemaParser, SchemaValidator};
pub use state::{LocalStateStore, PlanDocument, StateDocument, StateStore};
pub use value::{AttributeShape, AttributeValue, ObjectValue, ShapeKind};
