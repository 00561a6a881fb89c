//! Rule converter
//!
//! Sorts the assignment rules of a model so that every rule comes after the
//! rules whose variables it reads. The conversion runs in these steps:
//!
//! 1. Documents without rules are left alone
//! 2. The document has to pass the consistency check
//! 3. The evaluation order is computed from the borrowed rules
//! 4. Assignment rules are taken out of the rule list, reordered and put back
//!    in front of the remaining rules
//!
//! Steps 1 to 3 never touch the rule list, so a failed conversion leaves the
//! document as it was.

use log::{debug, info};

use super::{error::ConversionError, properties::ConversionProperties, registry::Converter};
use crate::{
    ordering::{
        graph::DependencyGraph,
        order::{apply_permutation, order, report_cycles, validate_permutation},
    },
    prelude::{Model, SBMLDocument},
};

/// Option key that enables rule sorting.
pub const SORT_RULES: &str = "sortRules";

/// Converter that sorts assignment rules by their dependencies.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleConverter;

impl RuleConverter {
    pub fn new() -> Self {
        Self
    }
}

impl Converter for RuleConverter {
    fn name(&self) -> &str {
        "SBML Rule Converter"
    }

    fn default_properties(&self) -> ConversionProperties {
        ConversionProperties::new().with_option(SORT_RULES, true, "sort rules")
    }

    fn matches_properties(&self, props: &ConversionProperties) -> bool {
        props.has_option(SORT_RULES)
    }

    fn convert(
        &self,
        sbmldoc: &mut SBMLDocument,
        props: &ConversionProperties,
    ) -> Result<(), ConversionError> {
        let Some(model) = &sbmldoc.model else {
            return Err(ConversionError::InvalidDocument(
                "the document does not contain a model".to_string(),
            ));
        };

        let mut options = self.default_properties();
        options.merge(props);
        if options.get_bool_value(SORT_RULES) == Some(false) {
            debug!("Rule sorting is disabled, leaving rules of '{}' untouched", model.id);
            return Ok(());
        }

        if model.num_rules() == 0 {
            return Ok(());
        }

        let num_errors = sbmldoc.check_consistency();
        if num_errors > 0 {
            info!("Refusing to sort rules: document has {num_errors} consistency errors");
            return Err(ConversionError::SourceValidationFailed(
                sbmldoc.error_log().errors_only(),
            ));
        }

        let model = sbmldoc.model.as_mut().ok_or_else(|| {
            ConversionError::InvalidDocument("the document does not contain a model".to_string())
        })?;

        sort_assignment_rules(model)
    }
}

/// Moves the assignment rules of `model` to the front of its rule list, in
/// dependency order.
///
/// Rules of other kinds keep their relative order behind the assignment
/// rules. If there is an error, the rule list is unchanged.
pub fn sort_assignment_rules(model: &mut Model) -> Result<(), ConversionError> {
    let positions = model.assignment_rule_positions();
    if positions.is_empty() {
        return Ok(());
    }

    let graph = DependencyGraph::from_rules(positions.iter().map(|&pos| &model.rules[pos]))
        .map_err(|e| ConversionError::OperationFailed(e.to_string()))?;
    report_cycles(&graph);

    let permutation = order(&graph);
    validate_permutation(&permutation, positions.len())
        .map_err(|e| ConversionError::OperationFailed(e.to_string()))?;

    // Remove back to front so that the remaining positions stay valid
    let mut batch = Vec::with_capacity(positions.len());
    for &position in positions.iter().rev() {
        if let Some(rule) = model.remove_rule(position) {
            batch.push(rule);
        }
    }
    batch.reverse();

    let batch = apply_permutation(batch, &permutation)
        .map_err(|e| ConversionError::OperationFailed(e.to_string()))?;

    info!(
        "Sorted {} assignment rules of model '{}'",
        batch.len(),
        model.id
    );
    for (position, rule) in batch.into_iter().enumerate() {
        model.insert_rule(position, rule);
    }

    Ok(())
}
