//! Schema parser for loading schema files.
//!
//! This module handles loading the schema from YAML and locating the schema
//! file when none is given explicitly.

use crate::error::{AttrPlanError, ConfigError, Result};
use std::path::Path;
use tracing::{debug, info};

use super::spec::ProviderSchema;
use crate::modifier::RuleKind;

/// Parser for loading provider schemas.
#[derive(Debug, Default)]
pub struct SchemaParser;

impl SchemaParser {
    /// Creates a new schema parser.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Loads a schema from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<ProviderSchema> {
        let path = path.as_ref();
        info!("Loading schema from: {}", path.display());

        if !path.exists() {
            return Err(AttrPlanError::Config(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            }));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            AttrPlanError::Config(ConfigError::ParseError {
                message: format!("Failed to read file: {e}"),
                location: Some(path.display().to_string()),
            })
        })?;

        self.parse_yaml(&content, Some(path))
    }

    /// Parses a schema from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid.
    pub fn parse_yaml(&self, content: &str, source: Option<&Path>) -> Result<ProviderSchema> {
        debug!("Parsing YAML schema");

        let parse_error = |e: serde_yaml::Error| {
            AttrPlanError::Config(ConfigError::ParseError {
                message: format!("YAML parse error: {e}"),
                location: source.map(|p| p.display().to_string()),
            })
        };

        let raw: serde_yaml::Value = serde_yaml::from_str(content).map_err(parse_error)?;
        check_rule_names(&raw)?;
        let schema: ProviderSchema = serde_yaml::from_value(raw).map_err(parse_error)?;

        debug!(
            "Parsed schema for provider {} ({} resource types)",
            schema.provider,
            schema.resources.len()
        );
        Ok(schema)
    }
}

/// Rejects plan modifier names that no rule answers to.
///
/// Entries that are not strings are left to typed deserialization.
fn check_rule_names(raw: &serde_yaml::Value) -> Result<()> {
    let attributes = raw
        .get("resources")
        .and_then(serde_yaml::Value::as_sequence)
        .into_iter()
        .flatten()
        .filter_map(|resource| resource.get("attributes"))
        .filter_map(serde_yaml::Value::as_sequence)
        .flatten();

    for attribute in attributes {
        let names = attribute
            .get("plan_modifiers")
            .and_then(serde_yaml::Value::as_sequence)
            .into_iter()
            .flatten()
            .filter_map(serde_yaml::Value::as_str);
        for name in names {
            name.parse::<RuleKind>()?;
        }
    }

    Ok(())
}

/// Default schema file names to search for.
pub const DEFAULT_SCHEMA_FILES: &[&str] = &["attrplan.schema.yaml", "attrplan.schema.yml"];

/// Finds the schema file in the given directory or its parents.
///
/// # Errors
///
/// Returns an error if no schema file is found.
pub fn find_schema_file(start_dir: impl AsRef<Path>) -> Result<std::path::PathBuf> {
    let start = start_dir.as_ref();
    let mut current = start.to_path_buf();

    loop {
        for filename in DEFAULT_SCHEMA_FILES {
            let schema_path = current.join(filename);
            if schema_path.exists() {
                info!("Found schema file: {}", schema_path.display());
                return Ok(schema_path);
            }
        }

        if !current.pop() {
            break;
        }
    }

    Err(AttrPlanError::Config(ConfigError::FileNotFound {
        path: start.join(DEFAULT_SCHEMA_FILES[0]),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ShapeKind;
    use tempfile::TempDir;

    const ALERT_SCHEMA: &str = r"
provider: signoz
resources:
  - type: signoz_alert
    attributes:
      - name: alert
        shape: scalar
      - name: state
        shape: scalar
        computed: true
        plan_modifiers:
          - use_unknown_on_update
      - name: evaluation
        shape: structured
        optional: true
        computed: true
        plan_modifiers:
          - use_state_for_unknown_including_null
";

    #[test]
    fn test_parse_alert_schema() {
        let schema = SchemaParser::new().parse_yaml(ALERT_SCHEMA, None).unwrap();

        assert_eq!(schema.provider, "signoz");
        let alert = schema.resource("signoz_alert").unwrap();
        assert_eq!(alert.attributes.len(), 3);

        let alert_attr = alert.attribute("alert").unwrap();
        assert!(!alert_attr.optional);
        assert!(!alert_attr.computed);
        assert!(alert_attr.plan_modifiers.is_empty());

        let evaluation = alert.attribute("evaluation").unwrap();
        assert_eq!(evaluation.shape, ShapeKind::Structured);
        assert_eq!(
            evaluation.plan_modifiers,
            vec![RuleKind::UseStateForUnknownIncludingNull]
        );
    }

    #[test]
    fn test_unknown_rule_name() {
        let yaml = r"
provider: signoz
resources:
  - type: signoz_alert
    attributes:
      - name: state
        shape: scalar
        computed: true
        plan_modifiers: [use_state]
";
        let result = SchemaParser::new().parse_yaml(yaml, None);
        assert!(matches!(
            result,
            Err(AttrPlanError::Config(ConfigError::UnknownRule { ref name })) if name == "use_state"
        ));
    }

    #[test]
    fn test_malformed_yaml_is_parse_error() {
        let result = SchemaParser::new().parse_yaml("provider: [signoz", None);
        assert!(matches!(
            result,
            Err(AttrPlanError::Config(ConfigError::ParseError { .. }))
        ));

        let missing_shape = r"
provider: signoz
resources:
  - type: signoz_alert
    attributes:
      - name: state
";
        let result = SchemaParser::new().parse_yaml(missing_shape, None);
        assert!(matches!(
            result,
            Err(AttrPlanError::Config(ConfigError::ParseError { .. }))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let result = SchemaParser::new().load_file(temp.path().join("missing.yaml"));
        assert!(matches!(
            result,
            Err(AttrPlanError::Config(ConfigError::FileNotFound { .. }))
        ));
    }

    #[test]
    fn test_find_schema_in_parent() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("modules").join("alerts");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(temp.path().join("attrplan.schema.yaml"), ALERT_SCHEMA).unwrap();

        let found = find_schema_file(&nested).unwrap();
        assert_eq!(found, temp.path().join("attrplan.schema.yaml"));

        let schema = SchemaParser::new().load_file(found).unwrap();
        assert_eq!(schema.resources.len(), 1);
    }
}
