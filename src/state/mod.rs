//! State module for attrplan.
//!
//! This module reads and writes the documents around a plan cycle: the
//! recorded state of previously applied resources, the tentative plan
//! proposed by the host engine, and the final plan.

mod document;
mod local;
mod store;
mod types;

pub use document::{load_plan_document, write_json_atomic};
pub use local::{LocalStateStore, STATE_FILE};
pub use store::StateStore;
pub use types::{PlanDocument, PlannedResource, RecordedResource, StateDocument, STATE_VERSION};
