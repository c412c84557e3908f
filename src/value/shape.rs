//! Value shapes.
//!
//! Rules are written once against [`AttributeShape`] and bound to the scalar
//! (`String`) and structured ([`ObjectValue`]) shapes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A structured, object-like attribute value.
pub type ObjectValue = Map<String, Value>;

/// The declared shape of an attribute.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// String-like scalar value.
    Scalar,
    /// Nested object value.
    Structured,
}

/// A value shape that rules can be parametrized over.
pub trait AttributeShape: Clone + PartialEq + std::fmt::Debug + Send + Sync + 'static {
    /// The declared shape this type binds to.
    const KIND: ShapeKind;

    /// Converts from JSON, returning the input unchanged if it has the wrong shape.
    ///
    /// # Errors
    ///
    /// Returns the original value when it is not of this shape.
    fn from_json(value: Value) -> std::result::Result<Self, Value>;

    /// Converts to JSON.
    fn to_json(&self) -> Value;
}

impl AttributeShape for String {
    const KIND: ShapeKind = ShapeKind::Scalar;

    fn from_json(value: Value) -> std::result::Result<Self, Value> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(other),
        }
    }

    fn to_json(&self) -> Value {
        Value::String(self.clone())
    }
}

impl AttributeShape for ObjectValue {
    const KIND: ShapeKind = ShapeKind::Structured;

    fn from_json(value: Value) -> std::result::Result<Self, Value> {
        match value {
            Value::Object(map) => Ok(map),
            other => Err(other),
        }
    }

    fn to_json(&self) -> Value {
        Value::Object(self.clone())
    }
}

/// Names the JSON kind of a value, for error messages.
#[must_use]
pub const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl ShapeKind {
    /// The JSON kind this shape expects.
    #[must_use]
    pub const fn json_kind(self) -> &'static str {
        match self {
            Self::Scalar => "string",
            Self::Structured => "object",
        }
    }
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Scalar => "scalar",
            Self::Structured => "structured",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_shape_kinds() {
        assert_eq!(<String as AttributeShape>::KIND, ShapeKind::Scalar);
        assert_eq!(<ObjectValue as AttributeShape>::KIND, ShapeKind::Structured);
    }

    #[test]
    fn test_object_rejects_scalar() {
        assert_eq!(ObjectValue::from_json(json!("5m")), Err(json!("5m")));
        assert_eq!(json_kind(&json!("5m")), "string");
    }

    #[test]
    fn test_shape_kind_yaml_names() {
        let kind: ShapeKind = serde_yaml::from_str("structured").unwrap();
        assert_eq!(kind, ShapeKind::Structured);
        assert_eq!(kind.json_kind(), "object");
    }
}
