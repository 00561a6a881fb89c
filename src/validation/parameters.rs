use crate::prelude::{Model, Parameter};
use crate::validation::consistency::{Report, Severity, ValidationResult};

/// Validates parameters in an SBML model by checking units
///
/// # Arguments
/// * `model` - The model containing parameters to validate
/// * `report` - Validation report to add any validation warnings to
///
/// # Details
/// For each parameter in the model, checks if it has a unit defined.
/// Adds a warning to the report for any parameters missing units.
pub(super) fn check_parameters(model: &Model, report: &mut Report) {
    for (param_idx, parameter) in model.parameters.iter().enumerate() {
        check_parameter_units(report, parameter, param_idx);
    }
}

/// Validates that a parameter has units defined
///
/// # Arguments
/// * `report` - Validation report to add any warnings to
/// * `parameter` - The parameter to validate
/// * `param_idx` - Index of this parameter in the model's parameters list
fn check_parameter_units(report: &mut Report, parameter: &Parameter, param_idx: usize) {
    if parameter.unit.is_none() {
        let result = ValidationResult::new(
            format!("/model/parameters/{param_idx}"),
            format!(
                "Parameter '{}' has no unit. It is advisable to equip parameters with a unit.",
                parameter.id
            ),
            Severity::Warning,
            Some(parameter.id.clone()),
        );

        report.add_result(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;

    /// A parameter without unit only yields a warning
    #[test]
    fn test_parameter_no_unit() {
        let mut report = Report::new();
        let model = ModelBuilder::default()
            .id("m")
            .to_parameters(
                ParameterBuilder::default()
                    .id("P1")
                    .name("P1")
                    .build()
                    .expect("Failed to build parameter"),
            )
            .build()
            .expect("Failed to build model");

        check_parameters(&model, &mut report);
        assert!(report.is_valid);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.filter_results("P1").len(), 1);
    }
}
