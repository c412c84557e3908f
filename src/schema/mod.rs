//! Schema module for attrplan.
//!
//! This module handles everything the engine needs to know about attributes:
//! - Parsing and deserializing `attrplan.schema.yaml`
//! - Validation of names, flags and plan modifier lists
//! - Building the ordered modifier chain for each attribute

mod parser;
mod spec;
mod validator;

pub use parser::{find_schema_file, SchemaParser, DEFAULT_SCHEMA_FILES};
pub use spec::{AttributeSchema, ProviderSchema, ResourceSchema};
pub use validator::{SchemaValidator, ValidationError, ValidationResult};
