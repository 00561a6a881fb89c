use std::collections::HashMap;

use regex::Regex;

use crate::prelude::Model;
use crate::validation::consistency::{Report, Severity, ValidationResult};

lazy_static::lazy_static! {
    /// Syntax of SBML identifiers (SId)
    pub static ref SID_PATTERN: Regex =
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("SId pattern is a valid regex");
}

/// Whether `id` is a syntactically valid SBML identifier.
pub fn is_valid_sid(id: &str) -> bool {
    SID_PATTERN.is_match(id)
}

/// Validates identifier syntax and uniqueness.
///
/// Compartments, species and parameters share one namespace. A duplicate is
/// reported at every occurrence after the first.
pub(super) fn check_identifiers(model: &Model, report: &mut Report) {
    if !is_valid_sid(&model.id) {
        report.add_result(invalid_sid("/model".to_string(), &model.id));
    }

    let compartments = model
        .compartments
        .iter()
        .enumerate()
        .map(|(idx, c)| (format!("/model/compartments/{idx}"), c.id.as_str()));
    let species = model
        .species
        .iter()
        .enumerate()
        .map(|(idx, s)| (format!("/model/species/{idx}"), s.id.as_str()));
    let parameters = model
        .parameters
        .iter()
        .enumerate()
        .map(|(idx, p)| (format!("/model/parameters/{idx}"), p.id.as_str()));

    let mut first_seen: HashMap<&str, String> = HashMap::new();
    for (location, id) in compartments.chain(species).chain(parameters) {
        if !is_valid_sid(id) {
            report.add_result(invalid_sid(location.clone(), id));
        }

        if let Some(first) = first_seen.get(id) {
            report.add_result(ValidationResult::new(
                location,
                format!("Identifier '{id}' is already used at '{first}'."),
                Severity::Error,
                Some(id.to_string()),
            ));
        } else {
            first_seen.insert(id, location);
        }
    }
}

fn invalid_sid(location: String, id: &str) -> ValidationResult {
    ValidationResult::new(
        location,
        format!("Identifier '{id}' is not a valid SId."),
        Severity::Error,
        Some(id.to_string()),
    )
}
