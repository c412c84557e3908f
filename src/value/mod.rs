//! Attribute value model.
//!
//! This module provides the tri-state value carried by every attribute in a
//! plan and the value shapes the reconciliation rules operate on:
//! - [`AttributeValue`]: known, explicitly null, or not yet determined
//! - [`AttributeShape`]: the scalar and structured bindings and their JSON bridge

mod attribute;
mod shape;

pub use attribute::AttributeValue;
pub use shape::{json_kind, AttributeShape, ObjectValue, ShapeKind};
