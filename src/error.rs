//! Error types for the attrplan reconciliation system.
//!
//! The reconciliation rules themselves are total and never fail. Everything
//! around them can: loading the schema, reading prior state and tentative
//! plans, and matching plan values against the declared attribute shapes.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for attrplan.
#[derive(Debug, Error)]
pub enum AttrPlanError {
    /// Schema configuration errors.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Prior state and plan document errors.
    #[error("State error: {0}")]
    State(#[from] StateError),

    /// Planning errors.
    #[error("Planning error: {0}")]
    Plan(#[from] PlanError),

    /// IO errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Schema configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The schema file was not found.
    #[error("Schema file not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// The schema file could not be parsed.
    #[error("Failed to parse schema: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
        /// Optional source location.
        location: Option<String>,
    },

    /// Validation failed.
    #[error("Schema validation failed: {message}")]
    ValidationError {
        /// Description of the validation error.
        message: String,
        /// Field that failed validation.
        field: Option<String>,
    },

    /// Duplicate definition.
    #[error("Duplicate {kind} name: {name}")]
    DuplicateName {
        /// What was duplicated (resource, attribute).
        kind: String,
        /// The duplicated name.
        name: String,
    },

    /// A plan modifier name that no rule answers to.
    #[error("Unknown plan modifier: {name}")]
    UnknownRule {
        /// The unrecognised rule name.
        name: String,
    },
}

/// Prior state and plan document errors.
#[derive(Debug, Error)]
pub enum StateError {
    /// Document not found.
    #[error("State file not found: {path}")]
    NotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// Document is corrupted.
    #[error("State is corrupted: {message}")]
    Corrupted {
        /// Description of the corruption.
        message: String,
    },

    /// Serialization error.
    #[error("State serialization error: {message}")]
    SerializationError {
        /// Description of the serialization error.
        message: String,
    },

    /// Document version mismatch.
    #[error("State version mismatch: expected {expected}, found {found}")]
    VersionMismatch {
        /// Expected version.
        expected: String,
        /// Found version.
        found: String,
    },
}

/// Planning errors.
#[derive(Debug, Error)]
pub enum PlanError {
    /// The tentative plan names a resource type the schema does not declare.
    #[error("Unknown resource type '{resource_type}' for {address}")]
    UnknownResourceType {
        /// Resource address.
        address: String,
        /// The undeclared type.
        resource_type: String,
    },

    /// The tentative plan carries an attribute the schema does not declare.
    #[error("Unknown attribute '{attribute}' on {address}")]
    UnknownAttribute {
        /// Resource address.
        address: String,
        /// The undeclared attribute.
        attribute: String,
    },

    /// A declared attribute is missing from the tentative plan.
    #[error("Attribute '{attribute}' is missing from the plan for {address}")]
    MissingAttribute {
        /// Resource address.
        address: String,
        /// The missing attribute.
        attribute: String,
    },

    /// A value does not match the declared attribute shape.
    #[error("Attribute '{attribute}' on {address} expects {expected}, found {found}")]
    ShapeMismatch {
        /// Resource address.
        address: String,
        /// Attribute name.
        attribute: String,
        /// Declared shape.
        expected: String,
        /// What was found instead.
        found: String,
    },

    /// A planning task panicked or was cancelled.
    #[error("Planning task failed: {message}")]
    TaskFailed {
        /// Description of the failure.
        message: String,
    },
}

/// Result type alias for attrplan operations.
pub type Result<T> = std::result::Result<T, AttrPlanError>;

impl ConfigError {
    /// Creates a validation error for a specific field.
    #[must_use]
    pub fn validation(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
            field: Some(field.into()),
        }
    }
}

impl StateError {
    /// Creates a corruption error with the given message.
    #[must_use]
    pub fn corrupted(message: impl Into<String>) -> Self {
        Self::Corrupted {
            message: message.into(),
        }
    }

    /// Creates a serialization error with the given message.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }
}

impl PlanError {
    /// Creates a shape mismatch error.
    #[must_use]
    pub fn shape_mismatch(
        address: impl Into<String>,
        attribute: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::ShapeMismatch {
            address: address.into(),
            attribute: attribute.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }
}
