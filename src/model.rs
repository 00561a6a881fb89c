//! Rule list access on SBML models
//!
//! Indexed access, removal and insertion on a model's rule list, together with
//! the per-rule accessors used by the rule converter and the consistency
//! checks.

use crate::{
    math::{ast::AstNode, error::MathError},
    prelude::{Model, Rule, RuleType},
};

impl Model {
    /// Number of rules of any kind.
    pub fn num_rules(&self) -> usize {
        self.rules.len()
    }

    pub fn rule(&self, index: usize) -> Option<&Rule> {
        self.rules.get(index)
    }

    /// Removes the rule at `index` and hands ownership to the caller.
    pub fn remove_rule(&mut self, index: usize) -> Option<Rule> {
        if index < self.rules.len() {
            Some(self.rules.remove(index))
        } else {
            None
        }
    }

    /// Inserts a rule at `position`, shifting later rules back.
    ///
    /// Positions past the end append.
    pub fn insert_rule(&mut self, position: usize, rule: Rule) {
        let position = position.min(self.rules.len());
        self.rules.insert(position, rule);
    }

    /// Positions of all assignment rules in list order.
    pub fn assignment_rule_positions(&self) -> Vec<usize> {
        self.rules
            .iter()
            .enumerate()
            .filter(|(_, rule)| rule.is_assignment())
            .map(|(index, _)| index)
            .collect()
    }

    /// Whether the quantity with the given identifier is declared constant.
    ///
    /// Returns `None` if no compartment, species or parameter has this id.
    pub fn is_constant(&self, id: &str) -> Option<bool> {
        if let Some(c) = self.compartments.iter().find(|c| c.id == id) {
            return Some(c.constant);
        }
        if let Some(s) = self.species.iter().find(|s| s.id == id) {
            return Some(s.constant);
        }
        self.parameters
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.constant)
    }
}

impl Rule {
    /// Creates an assignment rule `variable := math`.
    pub fn assignment(variable: impl Into<String>, math: impl Into<String>) -> Self {
        Rule {
            rule_type: RuleType::ASSIGNMENT,
            variable: Some(variable.into()),
            math: Some(math.into()),
            meta_id: None,
        }
    }

    /// Creates a rate rule `d(variable)/dt = math`.
    pub fn rate(variable: impl Into<String>, math: impl Into<String>) -> Self {
        Rule {
            rule_type: RuleType::RATE,
            variable: Some(variable.into()),
            math: Some(math.into()),
            meta_id: None,
        }
    }

    /// Creates an algebraic rule `0 = math`.
    pub fn algebraic(math: impl Into<String>) -> Self {
        Rule {
            rule_type: RuleType::ALGEBRAIC,
            variable: None,
            math: Some(math.into()),
            meta_id: None,
        }
    }

    pub fn with_meta_id(mut self, meta_id: impl Into<String>) -> Self {
        self.meta_id = Some(meta_id.into());
        self
    }

    pub fn is_assignment(&self) -> bool {
        self.rule_type == RuleType::ASSIGNMENT
    }

    /// Target variable, empty if unset.
    pub fn variable(&self) -> &str {
        self.variable.as_deref().unwrap_or_default()
    }

    /// Whether the rule carries a non-blank math string.
    pub fn is_set_math(&self) -> bool {
        self.math.as_deref().is_some_and(|m| !m.trim().is_empty())
    }

    /// Parses the math string into an expression tree.
    ///
    /// Unset math yields `Ok(None)`.
    pub fn math_ast(&self) -> Result<Option<AstNode>, MathError> {
        match self.math.as_deref() {
            Some(math) if self.is_set_math() => AstNode::parse(math).map(Some),
            _ => Ok(None),
        }
    }
}
