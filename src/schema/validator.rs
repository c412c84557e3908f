//! Schema validation.
//!
//! This module checks a parsed schema before any plan is computed: names,
//! duplicates, and whether each attribute's plan modifier list makes sense.

use crate::error::{AttrPlanError, ConfigError, Result};
use crate::modifier::RuleKind;
use std::collections::HashSet;
use tracing::debug;

use super::spec::{AttributeSchema, ProviderSchema, ResourceSchema};

/// Validator for provider schemas.
#[derive(Debug, Default)]
pub struct SchemaValidator;

/// Validation result containing all errors found.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// List of validation errors.
    pub errors: Vec<ValidationError>,
    /// List of warnings (non-fatal issues).
    pub warnings: Vec<String>,
}

/// A single validation error.
#[derive(Debug)]
pub struct ValidationError {
    /// The field path that failed validation.
    pub field: String,
    /// The error message.
    pub message: String,
}

impl SchemaValidator {
    /// Creates a new validator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validates a provider schema.
    ///
    /// # Errors
    ///
    /// Returns the first error found if validation fails.
    pub fn validate(&self, schema: &ProviderSchema) -> Result<ValidationResult> {
        let result = self.check(schema);

        if let Some(first_error) = result.errors.first() {
            return Err(AttrPlanError::Config(ConfigError::validation(
                first_error.message.clone(),
                first_error.field.clone(),
            )));
        }

        debug!("Schema validation passed");
        Ok(result)
    }

    /// Collects every error and warning without failing.
    #[must_use]
    pub fn check(&self, schema: &ProviderSchema) -> ValidationResult {
        let mut result = ValidationResult::default();

        if !is_valid_name(&schema.provider) {
            result.errors.push(ValidationError {
                field: String::from("provider"),
                message: format!(
                    "Provider name '{}' is invalid. Must be lowercase alphanumeric with underscores.",
                    schema.provider
                ),
            });
        }

        if schema.resources.is_empty() {
            result
                .warnings
                .push(String::from("Schema declares no resource types"));
        }

        let mut seen = HashSet::new();
        for (i, resource) in schema.resources.iter().enumerate() {
            if !seen.insert(resource.resource_type.as_str()) {
                result.errors.push(ValidationError {
                    field: format!("resources[{i}].type"),
                    message: ConfigError::DuplicateName {
                        kind: String::from("resource"),
                        name: resource.resource_type.clone(),
                    }
                    .to_string(),
                });
            }
            Self::validate_resource(i, resource, &mut result);
        }

        result
    }

    /// Validates one resource type.
    fn validate_resource(index: usize, resource: &ResourceSchema, result: &mut ValidationResult) {
        let prefix = format!("resources[{index}]");

        if !is_valid_name(&resource.resource_type) {
            result.errors.push(ValidationError {
                field: format!("{prefix}.type"),
                message: format!(
                    "Resource type '{}' is invalid. Must be lowercase alphanumeric with underscores.",
                    resource.resource_type
                ),
            });
        }

        let mut seen = HashSet::new();
        for (j, attribute) in resource.attributes.iter().enumerate() {
            let field = format!("{prefix}.attributes[{j}]");
            if !seen.insert(attribute.name.as_str()) {
                result.errors.push(ValidationError {
                    field: format!("{field}.name"),
                    message: ConfigError::DuplicateName {
                        kind: String::from("attribute"),
                        name: format!("{}.{}", resource.resource_type, attribute.name),
                    }
                    .to_string(),
                });
            }
            Self::validate_attribute(&field, attribute, result);
        }
    }

    /// Validates one attribute and its modifier list.
    fn validate_attribute(field: &str, attribute: &AttributeSchema, result: &mut ValidationResult) {
        if !is_valid_name(&attribute.name) {
            result.errors.push(ValidationError {
                field: format!("{field}.name"),
                message: format!(
                    "Attribute name '{}' is invalid. Must be lowercase alphanumeric with underscores.",
                    attribute.name
                ),
            });
        }

        if attribute.plan_modifiers.is_empty() {
            return;
        }

        // Configuration pins non-computed values, so modifiers cannot change them.
        if !attribute.computed {
            result.errors.push(ValidationError {
                field: format!("{field}.plan_modifiers"),
                message: format!(
                    "Attribute '{}' has plan modifiers but is not computed",
                    attribute.name
                ),
            });
        }

        let mut seen = HashSet::new();
        for kind in &attribute.plan_modifiers {
            if !seen.insert(*kind) {
                result.errors.push(ValidationError {
                    field: format!("{field}.plan_modifiers"),
                    message: format!(
                        "Plan modifier '{kind}' is listed more than once on '{}'",
                        attribute.name
                    ),
                });
            }
        }

        let has_volatile = seen.contains(&RuleKind::UseUnknownOnUpdate);
        let has_presence = seen.iter().any(|k| k.preserves_state());
        if has_volatile && has_presence {
            let last = attribute.plan_modifiers.last().map_or("", |k| k.name());
            result.warnings.push(format!(
                "{field}: '{}' combines volatility and presence rules; '{last}' runs last and wins on update",
                attribute.name
            ));
        }

        if seen.contains(&RuleKind::UseStateForUnknownIncludingNull) && !attribute.optional {
            result.warnings.push(format!(
                "{field}: '{}' preserves null but is not optional; absence can only come from recorded state",
                attribute.name
            ));
        }
    }
}

/// Validates that a name follows the naming convention.
/// Names must be lowercase alphanumeric with underscores, starting with a letter.
fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();

    match chars.next() {
        Some(first) if first.is_ascii_lowercase() => {}
        _ => return false,
    }

    if !chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_') {
        return false;
    }

    !name.ends_with('_') && !name.contains("__")
}

impl ValidationResult {
    /// Returns true if validation passed (no errors).
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of errors.
    #[must_use]
    pub const fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Returns the number of warnings.
    #[must_use]
    pub const fn warning_count(&self) -> usize {
        self.warnings.len()
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ShapeKind;

    fn attribute(name: &str, computed: bool, plan_modifiers: Vec<RuleKind>) -> AttributeSchema {
        AttributeSchema {
            name: name.to_string(),
            shape: ShapeKind::Scalar,
            optional: true,
            computed,
            plan_modifiers,
            description: None,
        }
    }

    fn schema_with(attributes: Vec<AttributeSchema>) -> ProviderSchema {
        ProviderSchema {
            provider: String::from("signoz"),
            resources: vec![ResourceSchema {
                resource_type: String::from("signoz_alert"),
                attributes,
            }],
        }
    }

    #[test]
    fn test_valid_name() {
        assert!(is_valid_name("signoz_alert"));
        assert!(is_valid_name("update_at"));
        assert!(is_valid_name("a1"));
    }

    #[test]
    fn test_invalid_name() {
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("Signoz")); // uppercase
        assert!(!is_valid_name("1alert")); // starts with number
        assert!(!is_valid_name("update-at")); // hyphen
        assert!(!is_valid_name("state_")); // trailing underscore
        assert!(!is_valid_name("update__at")); // consecutive underscores
    }

    #[test]
    fn test_valid_schema() {
        let schema = schema_with(vec![
            attribute("alert", false, vec![]),
            attribute("state", true, vec![RuleKind::UseUnknownOnUpdate]),
            attribute(
                "evaluation",
                true,
                vec![RuleKind::UseStateForUnknownIncludingNull],
            ),
        ]);

        let result = SchemaValidator::new().validate(&schema).unwrap();
        assert!(result.is_valid());
        assert_eq!(result.warning_count(), 0);
    }

    #[test]
    fn test_modifier_on_non_computed_attribute() {
        let schema = schema_with(vec![attribute(
            "alert",
            false,
            vec![RuleKind::UseUnknownOnUpdate],
        )]);

        let result = SchemaValidator::new().check(&schema);
        assert_eq!(result.error_count(), 1);
        assert_eq!(result.errors[0].field, "resources[0].attributes[0].plan_modifiers");
        assert!(SchemaValidator::new().validate(&schema).is_err());
    }

    #[test]
    fn test_duplicates() {
        let schema = schema_with(vec![
            attribute("state", true, vec![RuleKind::UseUnknownOnUpdate, RuleKind::UseUnknownOnUpdate]),
            attribute("state", true, vec![]),
        ]);

        let result = SchemaValidator::new().check(&schema);
        assert_eq!(result.error_count(), 2);
        assert!(result.errors.iter().any(|e| e.message.contains("Duplicate attribute")));
    }

    #[test]
    fn test_mixed_rules_warn() {
        let schema = schema_with(vec![attribute(
            "update_at",
            true,
            vec![RuleKind::UseStateForUnknown, RuleKind::UseUnknownOnUpdate],
        )]);

        let result = SchemaValidator::new().validate(&schema).unwrap();
        assert_eq!(result.warning_count(), 1);
        assert!(result.warnings[0].contains("'use_unknown_on_update' runs last"));
    }

    #[test]
    fn test_null_preservation_on_required_attribute_warns() {
        let mut evaluation = attribute(
            "evaluation",
            true,
            vec![RuleKind::UseStateForUnknownIncludingNull],
        );
        evaluation.optional = false;

        let result = SchemaValidator::new().validate(&schema_with(vec![evaluation])).unwrap();
        assert_eq!(result.warning_count(), 1);
    }
}
