//! The tri-state attribute value.
//!
//! `Unknown` and `Null` are separate variants. Collapsing them into an
//! `Option` would make a recorded absence indistinguishable from a value that
//! is still to be decided at apply time.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::shape::AttributeShape;

/// A single attribute value within a plan or a recorded state.
///
/// Serialized in plan documents as `{"state": "known", "value": ...}`,
/// `{"state": "null"}` or `{"state": "unknown"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum AttributeValue<T> {
    /// A concrete value of the attribute's declared shape.
    Known(T),
    /// The attribute is explicitly absent.
    Null,
    /// The value will be determined at apply time.
    Unknown,
}

impl<T> AttributeValue<T> {
    /// Returns true if the value is explicitly null.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns true if the value is not yet determined.
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// Returns the state tag used in plan documents.
    #[must_use]
    pub const fn state_name(&self) -> &'static str {
        match self {
            Self::Known(_) => "known",
            Self::Null => "null",
            Self::Unknown => "unknown",
        }
    }
}

impl AttributeValue<Value> {
    /// Builds a value from a recorded state entry.
    ///
    /// Recorded state is always fully known, so a JSON `null` is the only way
    /// an attribute can be absent there.
    #[must_use]
    pub fn from_recorded(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            other => Self::Known(other),
        }
    }

    /// Narrows an untyped value to a specific shape.
    ///
    /// # Errors
    ///
    /// Returns the offending JSON value if it does not match the shape.
    pub fn into_shape<T: AttributeShape>(self) -> std::result::Result<AttributeValue<T>, Value> {
        match self {
            Self::Known(value) => T::from_json(value).map(AttributeValue::Known),
            Self::Null => Ok(AttributeValue::Null),
            Self::Unknown => Ok(AttributeValue::Unknown),
        }
    }
}

impl<T: AttributeShape> AttributeValue<T> {
    /// Widens a shaped value back to untyped JSON.
    #[must_use]
    pub fn to_untyped(&self) -> AttributeValue<Value> {
        match self {
            Self::Known(value) => AttributeValue::Known(value.to_json()),
            Self::Null => AttributeValue::Null,
            Self::Unknown => AttributeValue::Unknown,
        }
    }
}

impl<T: Serialize> std::fmt::Display for AttributeValue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Known(value) => {
                let rendered = serde_json::to_string(value).map_err(|_| std::fmt::Error)?;
                write!(f, "{rendered}")
            }
            Self::Null => write!(f, "null"),
            Self::Unknown => write!(f, "(known after apply)"),
        }
    }
}
