//! Consistency module for checking consistency of SBML documents.
//!
//! This module provides functionality to validate SBML documents by checking:
//! - Identifier syntax and uniqueness
//! - Species compartment references
//! - Parameter definitions
//! - Rule variables, math and assignment cycles
//!
//! The main entry point is the `check_consistency` function which runs all validation
//! checks and returns a `Report` with the results.

use std::fmt;

use colored::Colorize;

use crate::extract_all;
use crate::prelude::{Model, SBMLDocument};
use crate::validation::identifiers::check_identifiers;
use crate::validation::parameters::check_parameters;
use crate::validation::rules::check_rules;
use crate::validation::species::check_species;

/// The `check_consistency` function is used to check the consistency of an `SBMLDocument`.
/// It returns a `Report` containing the results of the checks.
///
/// # Arguments
///
/// * `sbmldoc` - A reference to the `SBMLDocument` to be checked.
///
/// # Returns
///
/// Returns a `Report` containing the results of the consistency checks.
pub fn check_consistency(sbmldoc: &SBMLDocument) -> Report {
    let mut report = Report::new();

    let Some(model) = &sbmldoc.model else {
        report.add_result(ValidationResult::new(
            "/model".to_string(),
            "The document does not contain a model.".to_string(),
            Severity::Error,
            None,
        ));
        return report;
    };

    check_identifiers(model, &mut report);
    check_species(model, &mut report);
    check_parameters(model, &mut report);
    check_rules(model, &mut report);

    report
}

impl SBMLDocument {
    /// Runs the consistency check and stores its report in the error log.
    ///
    /// The log is cleared first, so results of earlier checks never leak into
    /// the new report.
    ///
    /// # Returns
    ///
    /// Returns the number of errors found.
    pub fn check_consistency(&mut self) -> usize {
        self.error_log.clear();
        self.error_log = check_consistency(self);
        self.error_log.num_with_severity(Severity::Error)
    }

    pub fn error_log(&self) -> &Report {
        &self.error_log
    }
}

/// The `Report` struct is used to store the results of the validation checks.
///
/// Contains a boolean indicating overall validity and a vector of individual validation results.
/// The document is considered invalid if any validation results have Error severity.
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct Report {
    /// Whether the document is valid overall. False if any errors were found.
    pub is_valid: bool,
    /// Vector of individual validation results found during checks.
    pub errors: Vec<ValidationResult>,
}

impl Default for Report {
    fn default() -> Self {
        Self::new()
    }
}

impl Report {
    /// Creates a new, empty and valid `Report`.
    pub fn new() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    /// Adds a validation result to the report.
    ///
    /// # Arguments
    ///
    /// * `result` - The `ValidationResult` to be added.
    ///
    /// If the result has Error severity, marks the overall report as invalid.
    pub fn add_result(&mut self, result: ValidationResult) {
        if result.severity == Severity::Error {
            self.is_valid = false;
        }
        self.errors.push(result);
    }

    /// Removes all results and marks the report as valid again.
    pub fn clear(&mut self) {
        self.errors.clear();
        self.is_valid = true;
    }

    /// Number of results with the given severity.
    pub fn num_with_severity(&self, severity: Severity) -> usize {
        self.errors
            .iter()
            .filter(|result| result.severity == severity)
            .count()
    }

    /// Results with Error severity.
    pub fn errors_only(&self) -> Vec<ValidationResult> {
        self.errors
            .iter()
            .filter(|result| result.severity == Severity::Error)
            .cloned()
            .collect()
    }

    /// Filters the results by the identifier.
    ///
    /// # Arguments
    ///
    /// * `identifier` - The identifier of the object.
    ///
    /// # Returns
    ///
    /// Returns a vector of `ValidationResult`s with the given identifier.
    pub fn filter_results(&self, identifier: &str) -> Vec<ValidationResult> {
        self.errors
            .iter()
            .filter(|result| result.identifier.as_deref() == Some(identifier))
            .cloned()
            .collect()
    }
}

/// The `ValidationResult` struct represents a single validation issue found during checking.
///
/// Contains the location where the issue was found, a descriptive message, and the severity level.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ValidationResult {
    /// JSON pointer path to the location of the validation issue
    location: String,
    /// Human readable description of the validation issue
    message: String,
    /// Severity level of the validation issue
    severity: Severity,
    /// The identifier of the object, if any
    identifier: Option<String>,
}

impl ValidationResult {
    /// Creates a new `ValidationResult`.
    ///
    /// # Arguments
    ///
    /// * `location` - The location of the validation issue as a JSON pointer path.
    /// * `message` - A message describing the validation issue.
    /// * `severity` - The severity of the validation issue.
    /// * `identifier` - The identifier of the affected object, if any.
    pub fn new(
        location: String,
        message: String,
        severity: Severity,
        identifier: Option<String>,
    ) -> Self {
        Self {
            location,
            message,
            severity,
            identifier,
        }
    }

    /// JSON pointer path to the location of the issue.
    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> &Severity {
        &self.severity
    }

    /// Identifier of the object the issue relates to, if any.
    pub fn identifier(&self) -> &Option<String> {
        &self.identifier
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self.severity {
            Severity::Error => self.message.bold().red(),
            Severity::Warning => self.message.bold().yellow(),
            Severity::Info => self.message.bold().green(),
        };

        let severity = match self.severity {
            Severity::Error => "Error".bold().red(),
            Severity::Warning => "Warning".bold().yellow(),
            Severity::Info => "Info".bold().green(),
        };

        write!(
            f,
            "[{}] {}:\n\t└── {}",
            self.location.bold(),
            severity,
            message
        )
    }
}

/// Severity levels for validation issues.
///
/// Used to indicate how serious a validation issue is:
/// - Error: The document is invalid and must not be converted
/// - Warning: The document may have issues but is still valid
/// - Info: Informational message about potential improvements
#[derive(Debug, Clone, PartialEq, Eq, Copy, serde::Serialize, serde::Deserialize)]
pub enum Severity {
    /// Critical issue that makes the document invalid
    Error,
    /// Non-critical issue that should be reviewed
    Warning,
    /// Informational message about potential improvements
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "Error"),
            Severity::Warning => write!(f, "Warning"),
            Severity::Info => write!(f, "Info"),
        }
    }
}

/// Retrieves the identifiers of all quantities of a model.
///
/// # Returns
///
/// Returns the ids of:
/// - Compartments
/// - Species
/// - Parameters
pub fn get_quantity_ids(model: &Model) -> Vec<String> {
    let compartments = extract_all!(model, compartments[*].id);
    let species = extract_all!(model, species[*].id);
    let parameters = extract_all!(model, parameters[*].id);

    compartments
        .chain(species)
        .chain(parameters)
        .map(|id| id.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;

    fn valid_document() -> SBMLDocument {
        let model = ModelBuilder::default()
            .id("m")
            .to_compartments(CompartmentBuilder::default().id("cell").build().unwrap())
            .to_species(
                SpeciesBuilder::default()
                    .id("S")
                    .compartment("cell")
                    .build()
                    .unwrap(),
            )
            .to_parameters(
                ParameterBuilder::default()
                    .id("k")
                    .unit("per_second")
                    .build()
                    .unwrap(),
            )
            .to_parameters(
                ParameterBuilder::default()
                    .id("rate")
                    .unit("mole_per_second")
                    .constant(false)
                    .build()
                    .unwrap(),
            )
            .to_rules(Rule::assignment("rate", "k * S"))
            .build()
            .expect("Failed to build model");

        SBMLDocumentBuilder::default()
            .model(model)
            .build()
            .expect("Failed to build document")
    }

    #[test]
    fn test_valid_document() {
        let report = check_consistency(&valid_document());
        assert!(report.is_valid, "{:?}", report.errors);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_missing_model() {
        let report = check_consistency(&SBMLDocument::default());
        assert!(!report.is_valid);
        assert_eq!(report.errors[0].location(), "/model");
    }

    #[test]
    fn test_error_log_is_cleared() {
        let mut doc = valid_document();
        doc.error_log.add_result(ValidationResult::new(
            "/stale".to_string(),
            "Stale".to_string(),
            Severity::Error,
            None,
        ));

        assert_eq!(doc.check_consistency(), 0);
        assert!(doc.error_log().is_valid);
        assert!(doc.error_log().errors.is_empty());
    }

    #[test]
    fn test_get_quantity_ids() {
        let doc = valid_document();
        let ids = get_quantity_ids(doc.model.as_ref().unwrap());
        assert_eq!(ids, vec!["cell", "S", "k", "rate"]);
    }

    #[test]
    fn test_filter_results() {
        let mut report = Report::new();
        report.add_result(ValidationResult::new(
            "/model/parameters/0".to_string(),
            "Warn".to_string(),
            Severity::Warning,
            Some("k".to_string()),
        ));

        assert!(report.is_valid);
        assert_eq!(report.filter_results("k").len(), 1);
        assert!(report.filter_results("x").is_empty());
        assert_eq!(report.num_with_severity(Severity::Warning), 1);
        assert!(report.errors_only().is_empty());
    }
}
