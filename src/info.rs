//! Information display module for SBML documents
//!
//! This module provides functionality for displaying SBML documents and their components
//! in a human-readable format. It implements the `Display` trait for `SBMLDocument` and
//! provides helper functions to format various components as tables.

use std::fmt::{self, Display};

use itertools::Itertools;
use tabled::{builder::Builder, settings::Style};

use crate::{
    ordering::graph::DependencyGraph,
    prelude::{Compartment, Parameter, Rule, RuleType, SBMLDocument, Species},
};

/// Trait for converting model components to table records
///
/// Implementors provide column headers and a way to convert their data to
/// string values for each column.
trait TableRecord {
    /// Get the column headers for the table
    fn columns() -> Vec<String>;

    /// Convert the instance to a record for display in a table
    fn to_record(&self) -> Vec<String>;
}

impl Display for SBMLDocument {
    /// Formats an SBML document for display
    ///
    /// Creates a formatted table representation of the document, including all
    /// components of its model (compartments, species, parameters and rules) if
    /// they are present.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = Builder::default();
        builder.push_record(vec![format!(
            "SBML Document (Level {} Version {})",
            self.level, self.version
        )]);

        match &self.model {
            None => builder.push_record(vec!["No model"]),
            Some(model) => {
                builder.push_record(vec![format!("Model '{}'", model.id)]);

                if !model.compartments.is_empty() {
                    builder.push_record(vec!["Compartments"]);
                    builder.push_record(vec![to_table(&model.compartments)]);
                }

                if !model.species.is_empty() {
                    builder.push_record(vec!["Species"]);
                    builder.push_record(vec![to_table(&model.species)]);
                }

                if !model.parameters.is_empty() {
                    builder.push_record(vec!["Parameters"]);
                    builder.push_record(vec![to_table(&model.parameters)]);
                }

                if !model.rules.is_empty() {
                    builder.push_record(vec!["Rules"]);
                    builder.push_record(vec![rule_table(&model.rules)]);
                }
            }
        }

        let mut table = builder.build();
        table.with(Style::sharp());
        write!(f, "{table}")
    }
}

/// Converts a collection of TableRecord implementors to a formatted table string
fn to_table<T: TableRecord>(records: &[T]) -> String {
    let mut builder = Builder::default();
    builder.push_record(T::columns());

    for record in records {
        builder.push_record(record.to_record());
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

/// Rules with their position in the rule list.
pub fn rule_table(rules: &[Rule]) -> String {
    let mut builder = Builder::default();
    let mut columns = vec!["#".to_string()];
    columns.extend(Rule::columns());
    builder.push_record(columns);

    for (position, rule) in rules.iter().enumerate() {
        let mut record = vec![position.to_string()];
        record.extend(rule.to_record());
        builder.push_record(record);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

/// Variables and the variables they depend on.
pub fn dependency_table(graph: &DependencyGraph) -> String {
    let mut builder = Builder::default();
    builder.push_record(vec!["Variable", "Depends on"]);

    for (variable, deps) in graph.to_map() {
        builder.push_record(vec![variable, deps.iter().join(", ")]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

fn optional<T: ToString>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map(|v| v.to_string())
        .unwrap_or("None".to_string())
}

impl TableRecord for Compartment {
    fn columns() -> Vec<String> {
        vec!["ID".to_string(), "Size".to_string(), "Constant".to_string()]
    }

    fn to_record(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            optional(&self.size),
            self.constant.to_string(),
        ]
    }
}

impl TableRecord for Species {
    fn columns() -> Vec<String> {
        vec![
            "ID".to_string(),
            "Compartment".to_string(),
            "Initial Concentration".to_string(),
            "Constant".to_string(),
        ]
    }

    fn to_record(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.compartment.to_string(),
            optional(&self.initial_concentration),
            self.constant.to_string(),
        ]
    }
}

impl TableRecord for Parameter {
    /// Returns column headers for parameter tables
    ///
    /// # Returns
    /// * Vector of column names: ID, Value, Unit, Constant
    fn columns() -> Vec<String> {
        vec![
            "ID".to_string(),
            "Value".to_string(),
            "Unit".to_string(),
            "Constant".to_string(),
        ]
    }

    fn to_record(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            optional(&self.value),
            optional(&self.unit),
            self.constant.to_string(),
        ]
    }
}

impl TableRecord for Rule {
    /// Returns column headers for rule tables
    ///
    /// # Returns
    /// * Vector of column names: Type, Variable, Math, Meta ID
    fn columns() -> Vec<String> {
        vec![
            "Type".to_string(),
            "Variable".to_string(),
            "Math".to_string(),
            "Meta ID".to_string(),
        ]
    }

    fn to_record(&self) -> Vec<String> {
        vec![
            match self.rule_type {
                RuleType::ASSIGNMENT => "Assignment".to_string(),
                RuleType::RATE => "Rate".to_string(),
                RuleType::ALGEBRAIC => "Algebraic".to_string(),
            },
            self.variable().to_string(),
            optional(&self.math),
            optional(&self.meta_id),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;

    #[test]
    fn test_display_document() {
        let doc = SBMLDocumentBuilder::default()
            .model(
                ModelBuilder::default()
                    .id("demo_model")
                    .to_rules(Rule::assignment("A", "B + 1").with_meta_id("rule_a"))
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();

        let output = doc.to_string();
        assert!(output.contains("demo_model"));
        assert!(output.contains("rule_a"));
        assert!(output.contains("Assignment"));
    }

    #[test]
    fn test_display_empty_document() {
        let output = SBMLDocument::default().to_string();
        assert!(output.contains("Level 3 Version 2"));
        assert!(output.contains("No model"));
    }

    #[test]
    fn test_dependency_table() {
        let rules = vec![Rule::assignment("A", "B"), Rule::assignment("B", "1")];
        let graph = DependencyGraph::from_rules(&rules).unwrap();
        let output = dependency_table(&graph);

        assert!(output.contains("Depends on"));
        assert!(output.contains('A'));
    }
}
