//! JSON Schema validation
//!
//! Validates configuration subtrees against module schemas. Validation never
//! mutates the data; a schema that does not compile is reported as
//! [`Error::InvalidSchema`].

use serde::Serialize;
use serde_json::Value;
use wirekit_domain::error::{Error, Result};

/// Outcome of validating one document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Whether the document satisfies the schema
    pub valid: bool,
    /// One diagnostic per violated constraint
    pub errors: Vec<String>,
}

impl ValidationReport {
    /// A report without violations
    pub fn passed() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    /// Convert into a result, naming the validated namespace on failure
    pub fn into_result(self, namespace: &str) -> Result<()> {
        if self.valid {
            Ok(())
        } else {
            Err(Error::schema_validation(namespace, self.errors))
        }
    }
}

/// A compiled schema, reusable across documents
pub struct SchemaValidator {
    validator: jsonschema::Validator,
}

impl SchemaValidator {
    /// Compile a schema
    pub fn compile(schema: &Value) -> Result<Self> {
        let validator = jsonschema::validator_for(schema)
            .map_err(|e| Error::invalid_schema(e.to_string()))?;
        Ok(Self { validator })
    }

    /// Validate a document against the compiled schema
    pub fn validate(&self, data: &Value) -> ValidationReport {
        let errors: Vec<String> = self
            .validator
            .iter_errors(data)
            .map(|e| e.to_string())
            .collect();
        ValidationReport {
            valid: errors.is_empty(),
            errors,
        }
    }
}

impl std::fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaValidator").finish_non_exhaustive()
    }
}

/// Validate `data` against `schema` in one step
pub fn validate(data: &Value, schema: &Value) -> Result<ValidationReport> {
    Ok(SchemaValidator::compile(schema)?.validate(data))
}
