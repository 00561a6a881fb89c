use crate::prelude::{Model, Species};
use crate::validation::consistency::{Report, Severity, ValidationResult};

/// Validates that every species is located in a declared compartment.
pub(super) fn check_species(model: &Model, report: &mut Report) {
    let compartments = model
        .compartments
        .iter()
        .map(|c| c.id.as_str())
        .collect::<Vec<_>>();

    for (species_idx, species) in model.species.iter().enumerate() {
        check_species_compartment(report, species, &compartments, species_idx);
    }
}

fn check_species_compartment(
    report: &mut Report,
    species: &Species,
    compartments: &[&str],
    species_idx: usize,
) {
    if !compartments.contains(&species.compartment.as_str()) {
        let result = ValidationResult::new(
            format!("/model/species/{species_idx}"),
            format!(
                "Compartment '{}' of species '{}' is not defined in the model.",
                species.compartment, species.id
            ),
            Severity::Error,
            Some(species.id.clone()),
        );

        report.add_result(result);
    }
}
