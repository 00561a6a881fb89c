//! Rule validation
//!
//! Checks the variable and math of every rule and reports assignment rules
//! that depend on each other. Dependency cycles are reported as warnings: the
//! rule converter still places mutually dependent rules in their original
//! relative order.

use std::collections::HashMap;

use itertools::Itertools;

use crate::equation::extract_read_variables;
use crate::ordering::{graph::DependencyGraph, order::cycles};
use crate::prelude::{Model, Rule, RuleType};
use crate::validation::consistency::{get_quantity_ids, Report, Severity, ValidationResult};

/// Symbols with a predefined meaning in rule math.
pub const BUILTIN_SYMBOLS: [&str; 9] = [
    "time",
    "pi",
    "e",
    "avogadro",
    "exponentiale",
    "infinity",
    "notanumber",
    "true",
    "false",
];

pub(super) fn check_rules(model: &Model, report: &mut Report) {
    let quantity_ids = get_quantity_ids(model);
    let mut determined_by: HashMap<&str, usize> = HashMap::new();

    for (rule_idx, rule) in model.rules.iter().enumerate() {
        let location = format!("/model/rules/{rule_idx}");

        check_rule_variable(report, model, rule, &location, &quantity_ids);
        check_rule_math(report, rule, &location, &quantity_ids);

        if rule.rule_type == RuleType::ALGEBRAIC || rule.variable().is_empty() {
            continue;
        }

        if let Some(first) = determined_by.get(rule.variable()) {
            report.add_result(ValidationResult::new(
                location,
                format!(
                    "Variable '{}' is already determined by the rule at '/model/rules/{first}'.",
                    rule.variable()
                ),
                Severity::Error,
                Some(rule.variable().to_string()),
            ));
        } else {
            determined_by.insert(rule.variable(), rule_idx);
        }
    }

    check_assignment_cycles(report, model);
}

fn check_rule_variable(
    report: &mut Report,
    model: &Model,
    rule: &Rule,
    location: &str,
    quantity_ids: &[String],
) {
    if rule.rule_type == RuleType::ALGEBRAIC {
        return;
    }

    let variable = rule.variable();
    if variable.is_empty() {
        report.add_result(ValidationResult::new(
            location.to_string(),
            format!("Rule of type '{:?}' has no variable.", rule.rule_type),
            Severity::Error,
            None,
        ));
        return;
    }

    if !quantity_ids.iter().any(|id| id == variable) {
        report.add_result(ValidationResult::new(
            location.to_string(),
            format!("Rule variable '{variable}' is not defined in the model."),
            Severity::Error,
            Some(variable.to_string()),
        ));
    } else if model.is_constant(variable) == Some(true) {
        report.add_result(ValidationResult::new(
            location.to_string(),
            format!("Rule variable '{variable}' is declared constant and cannot be changed by a rule."),
            Severity::Error,
            Some(variable.to_string()),
        ));
    }
}

fn check_rule_math(report: &mut Report, rule: &Rule, location: &str, quantity_ids: &[String]) {
    let identifier = rule.variable.clone();

    let ast = match rule.math_ast() {
        Ok(Some(ast)) => ast,
        Ok(None) => {
            report.add_result(ValidationResult::new(
                location.to_string(),
                "Rule has no math.".to_string(),
                Severity::Warning,
                identifier,
            ));
            return;
        }
        Err(e) => {
            report.add_result(ValidationResult::new(
                location.to_string(),
                e.to_string(),
                Severity::Error,
                identifier,
            ));
            return;
        }
    };

    for symbol in extract_read_variables(Some(&ast)) {
        let known = quantity_ids.iter().any(|id| *id == symbol)
            || BUILTIN_SYMBOLS.contains(&symbol.as_str());

        if !known {
            report.add_result(ValidationResult::new(
                location.to_string(),
                format!("Symbol '{symbol}' in rule math is not defined in the model."),
                Severity::Error,
                identifier.clone(),
            ));
        }
    }

    if rule.is_assignment() && !rule.variable().is_empty() {
        let reads_itself = extract_read_variables(Some(&ast))
            .iter()
            .any(|symbol| symbol == rule.variable());

        if reads_itself {
            report.add_result(ValidationResult::new(
                location.to_string(),
                format!(
                    "Assignment rule for '{}' reads its own variable.",
                    rule.variable()
                ),
                Severity::Warning,
                identifier,
            ));
        }
    }
}

/// Reports groups of assignment rules that depend on each other.
///
/// Skipped if any assignment rule math fails to parse; those rules are
/// already reported by the math check.
fn check_assignment_cycles(report: &mut Report, model: &Model) {
    let positions = model.assignment_rule_positions();
    let Ok(graph) = DependencyGraph::from_rules(positions.iter().map(|&pos| &model.rules[pos]))
    else {
        return;
    };

    for cycle in cycles(&graph) {
        let variables = cycle
            .iter()
            .filter_map(|&index| graph.variable(index))
            .map(|variable| format!("'{variable}'"))
            .join(", ");

        report.add_result(ValidationResult::new(
            format!("/model/rules/{}", positions[cycle[0]]),
            format!("Assignment rules for {variables} depend on each other in a cycle."),
            Severity::Warning,
            graph.variable(cycle[0]).map(str::to_string),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;

    fn model(rules: Vec<Rule>) -> Model {
        let parameter = |id: &str| {
            ParameterBuilder::default()
                .id(id)
                .unit("dimensionless")
                .constant(false)
                .build()
                .unwrap()
        };

        ModelBuilder::default()
            .id("m")
            .parameters(vec![
                parameter("A"),
                parameter("B"),
                parameter("C"),
                ParameterBuilder::default()
                    .id("k")
                    .unit("dimensionless")
                    .build()
                    .unwrap(),
            ])
            .rules(rules)
            .build()
            .unwrap()
    }

    fn check(rules: Vec<Rule>) -> Report {
        let mut report = Report::new();
        check_rules(&model(rules), &mut report);
        report
    }

    #[test]
    fn test_valid_rules() {
        let report = check(vec![
            Rule::assignment("A", "B + k"),
            Rule::rate("B", "-k * B * time"),
            Rule::algebraic("A + B - C"),
        ]);
        assert!(report.is_valid, "{:?}", report.errors);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_missing_and_unknown_variable() {
        let mut no_variable = Rule::assignment("A", "1");
        no_variable.variable = None;

        let report = check(vec![no_variable, Rule::assignment("Z", "1")]);
        assert!(!report.is_valid);
        assert_eq!(report.errors.len(), 2);
        assert_eq!(report.errors[1].location(), "/model/rules/1");
    }

    #[test]
    fn test_constant_target() {
        let report = check(vec![Rule::assignment("k", "2")]);
        assert!(!report.is_valid);
        assert_eq!(report.filter_results("k").len(), 1);
    }

    #[test]
    fn test_duplicate_targets() {
        let report = check(vec![Rule::assignment("A", "1"), Rule::rate("A", "2")]);
        assert!(!report.is_valid);
        assert_eq!(report.errors[0].location(), "/model/rules/1");
    }

    #[test]
    fn test_math_problems() {
        let mut unset = Rule::assignment("A", "1");
        unset.math = None;

        let report = check(vec![
            unset,
            Rule::assignment("B", "k +* 2"),
            Rule::assignment("C", "undefined_symbol * 2"),
        ]);
        assert!(!report.is_valid);
        assert_eq!(report.num_with_severity(Severity::Warning), 1);
        assert_eq!(report.num_with_severity(Severity::Error), 2);
    }

    #[test]
    fn test_cycles_are_warnings() {
        let report = check(vec![
            Rule::assignment("A", "B"),
            Rule::assignment("B", "A"),
            Rule::assignment("C", "C + 1"),
        ]);
        assert!(report.is_valid);
        assert_eq!(report.num_with_severity(Severity::Warning), 2);
        assert_eq!(report.filter_results("A").len(), 1);
        assert_eq!(report.filter_results("C").len(), 1);
    }
}
