//! # mnx-schema — Structural Schema Validation
//!
//! Validates raw parsed JSON against the MNX JSON Schema (Draft 2020-12)
//! before any semantic pass runs. The schema ships embedded in the binary
//! so the tool works with no external files; an alternative schema document
//! can be substituted from disk.
//!
//! Violations are collected exhaustively (not first-error-only) with the
//! JSON Pointer of the offending instance node and of the schema keyword
//! that rejected it, so a failing document can be fixed in one round.

use std::fmt;
use std::path::Path;

use jsonschema::Validator;
use serde_json::Value;
use thiserror::Error;

/// The MNX JSON Schema compiled into the binary.
const EMBEDDED_SCHEMA: &str = include_str!("../schema/mnx.schema.json");

/// Error during schema loading or validation.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The document did not conform to the schema.
    #[error("validation failed against the MNX schema:\n{violations}")]
    ValidationFailed {
        /// Structured list of individual violations.
        violations: Violations,
    },

    /// The schema document could not be read or parsed.
    #[error("schema load error for '{path}': {reason}")]
    SchemaLoad {
        /// Schema file path, or `<embedded>` for the built-in schema.
        path: String,
        /// Reason the schema could not be loaded.
        reason: String,
    },

    /// The compiled validator could not be built (e.g., invalid schema).
    #[error("validator build error: {reason}")]
    ValidatorBuild {
        /// Reason the validator could not be compiled.
        reason: String,
    },

    /// IO error reading the schema document.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A single schema violation with structured context.
#[derive(Debug, Clone)]
pub struct Violation {
    /// JSON Pointer path to the violating field in the instance.
    pub instance_path: String,
    /// JSON Pointer path within the schema that triggered the error.
    pub schema_path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.instance_path, self.message)
        }
    }
}

/// Collection of schema violations, in instance order.
#[derive(Debug, Clone, Default)]
pub struct Violations {
    violations: Vec<Violation>,
}

impl Violations {
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

/// A compiled MNX schema validator.
///
/// Compilation happens once at construction; the validator can then check
/// any number of documents.
#[derive(Debug)]
pub struct MnxSchema {
    validator: Validator,
}

impl MnxSchema {
    /// Compile the embedded MNX schema.
    pub fn embedded() -> Result<Self, SchemaError> {
        let schema: Value =
            serde_json::from_str(EMBEDDED_SCHEMA).map_err(|e| SchemaError::SchemaLoad {
                path: "<embedded>".to_string(),
                reason: format!("invalid JSON: {e}"),
            })?;
        Self::from_value(&schema)
    }

    /// Compile an alternative schema loaded from disk.
    pub fn from_path(path: &Path) -> Result<Self, SchemaError> {
        let content = std::fs::read_to_string(path)?;
        let schema: Value =
            serde_json::from_str(&content).map_err(|e| SchemaError::SchemaLoad {
                path: path.display().to_string(),
                reason: format!("invalid JSON: {e}"),
            })?;
        Self::from_value(&schema)
    }

    /// Compile a schema from an already-parsed JSON value.
    pub fn from_value(schema: &Value) -> Result<Self, SchemaError> {
        let validator = jsonschema::options()
            .with_draft(jsonschema::Draft::Draft202012)
            .build(schema)
            .map_err(|e| SchemaError::ValidatorBuild {
                reason: e.to_string(),
            })?;
        Ok(Self { validator })
    }

    /// Validate a parsed document against the schema.
    ///
    /// Collects every violation rather than stopping at the first.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::ValidationFailed`] with the full violation
    /// list when the document does not conform.
    pub fn validate(&self, instance: &Value) -> Result<(), SchemaError> {
        let violations: Vec<Violation> = self
            .validator
            .iter_errors(instance)
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed {
                violations: Violations { violations },
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn minimal_document() -> Value {
        json!({
            "mnx": { "version": 1 },
            "global": { "measures": [{}, {}] },
            "parts": [{ "id": "P1", "measures": [{}, {}] }]
        })
    }

    #[test]
    fn embedded_schema_compiles() {
        MnxSchema::embedded().unwrap();
    }

    #[test]
    fn minimal_document_is_valid() {
        let schema = MnxSchema::embedded().unwrap();
        schema.validate(&minimal_document()).unwrap();
    }

    #[test]
    fn full_document_is_valid() {
        let schema = MnxSchema::embedded().unwrap();
        let doc = json!({
            "mnx": { "version": 1 },
            "global": { "measures": [{ "index": 1, "time": { "count": 4, "unit": 4 } }, {}] },
            "parts": [{ "id": "P1", "staves": 2, "measures": [{}, {}] }],
            "layouts": [{
                "id": "L1",
                "content": [{
                    "type": "group",
                    "symbol": "brace",
                    "content": [
                        { "type": "staff", "sources": [{ "part": "P1", "staff": 1 }] },
                        { "type": "staff", "sources": [{ "part": "P1", "staff": 2 }] }
                    ]
                }]
            }],
            "scores": [{
                "name": "Score",
                "layout": "L1",
                "multimeasureRests": [{ "start": 1, "duration": 1 }],
                "pages": [{
                    "layout": "L1",
                    "systems": [{
                        "measure": 1,
                        "layoutChanges": [{
                            "layout": "L1",
                            "location": { "measure": 2, "position": { "fraction": [1, 2] } }
                        }]
                    }]
                }]
            }]
        });
        schema.validate(&doc).unwrap();
    }

    #[test]
    fn missing_global_is_rejected() {
        let schema = MnxSchema::embedded().unwrap();
        let doc = json!({ "mnx": { "version": 1 }, "parts": [] });
        let err = schema.validate(&doc).unwrap_err();
        match err {
            SchemaError::ValidationFailed { violations } => {
                assert!(!violations.is_empty());
                assert!(
                    violations
                        .violations()
                        .iter()
                        .any(|v| v.message.contains("global")),
                    "expected a violation naming 'global': {violations}"
                );
            }
            other => panic!("expected ValidationFailed, got: {other}"),
        }
    }

    #[test]
    fn unknown_top_level_property_is_rejected() {
        let schema = MnxSchema::embedded().unwrap();
        let mut doc = minimal_document();
        doc["unexpected"] = json!(true);
        assert!(schema.validate(&doc).is_err());
    }

    #[test]
    fn layout_without_content_is_rejected() {
        let schema = MnxSchema::embedded().unwrap();
        let mut doc = minimal_document();
        doc["layouts"] = json!([{ "id": "L1" }]);
        assert!(schema.validate(&doc).is_err());
    }

    #[test]
    fn all_violations_are_collected() {
        let schema = MnxSchema::embedded().unwrap();
        // Two independent problems: bad version type, layouts not an array.
        let doc = json!({
            "mnx": { "version": "one" },
            "global": { "measures": [] },
            "parts": [],
            "layouts": {}
        });
        let err = schema.validate(&doc).unwrap_err();
        match err {
            SchemaError::ValidationFailed { violations } => {
                assert!(
                    violations.len() >= 2,
                    "expected both violations, got: {violations}"
                );
            }
            other => panic!("expected ValidationFailed, got: {other}"),
        }
    }

    #[test]
    fn alternative_schema_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("anything.schema.json");
        std::fs::write(&path, r#"{ "type": "object" }"#).unwrap();
        let schema = MnxSchema::from_path(&path).unwrap();
        schema.validate(&json!({ "free": "form" })).unwrap();
        assert!(schema.validate(&json!([1, 2, 3])).is_err());
    }

    #[test]
    fn unparseable_schema_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.schema.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = MnxSchema::from_path(&path).unwrap_err();
        match err {
            SchemaError::SchemaLoad { path: p, .. } => {
                assert!(p.contains("broken.schema.json"));
            }
            other => panic!("expected SchemaLoad, got: {other}"),
        }
    }

    #[test]
    fn violation_display_includes_instance_path() {
        let violation = Violation {
            instance_path: "/parts/0/staves".to_string(),
            schema_path: "/$defs/part/properties/staves/minimum".to_string(),
            message: "0 is less than the minimum of 1".to_string(),
        };
        let display = violation.to_string();
        assert!(display.contains("/parts/0/staves"));
        assert!(display.contains("minimum of 1"));
    }
}
