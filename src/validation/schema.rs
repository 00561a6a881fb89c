//! Schema module for validating SBML documents.
//!
//! This module validates raw JSON against the JSON schema derived from the
//! SBML object model, before the JSON is deserialized into a document.

use std::{error::Error, fmt};

use colored::Colorize;
use jsonschema::validator_for;
use schemars::schema_for;
use serde_json::Value;

use crate::prelude::SBMLDocument;

/// Report containing validation results
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ValidationReport {
    /// Whether the document is valid
    pub valid: bool,
    /// List of validation errors if any
    pub errors: Vec<ValidationError>,
}

/// Individual validation error details
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ValidationError {
    /// JSON path where the error occurred
    pub location: String,
    /// Description of the validation error
    pub message: String,
}

impl fmt::Display for ValidationError {
    /// Formats the validation error for display
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\n\t└── {}",
            self.location.bold(),
            self.message.bold().red()
        )
    }
}

/// Validates an SBML document against its JSON schema
///
/// # Arguments
/// * `content` - JSON string containing the SBML document
///
/// # Returns
/// * `Result<ValidationReport, Box<dyn Error>>` - Validation report or error if the
///   content is not JSON or the schema cannot be compiled
pub fn validate_json(content: &str) -> Result<ValidationReport, Box<dyn Error>> {
    let json: Value = serde_json::from_str(content)?;
    let schema = serde_json::to_value(schema_for!(SBMLDocument))?;
    let validator = validator_for(&schema).map_err(|e| e.to_string())?;

    let errors = validator
        .iter_errors(&json)
        .map(|error| ValidationError {
            location: error.instance_path.to_string(),
            message: error.to_string().replace('"', "'"),
        })
        .collect::<Vec<_>>();

    Ok(ValidationReport {
        valid: errors.is_empty(),
        errors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_json() {
        let content = r#"{
            "level": 3,
            "version": 2,
            "model": {
                "id": "m",
                "rules": [{"rule_type": "assignment", "variable": "A", "math": "B + 1"}]
            }
        }"#;

        let report = validate_json(content).expect("Failed to validate");
        assert!(report.valid, "{:?}", report.errors);
    }

    #[test]
    fn test_invalid_rule_type() {
        let content = r#"{
            "model": {
                "id": "m",
                "rules": [{"rule_type": "event", "variable": "A"}]
            }
        }"#;

        let report = validate_json(content).expect("Failed to validate");
        assert!(!report.valid);
        assert!(!report.errors.is_empty());
    }

    #[test]
    fn test_not_json() {
        assert!(validate_json("not json").is_err());
    }
}
