//! Dependency graph between the assignment rules of one batch
//!
//! Nodes are rule positions within the batch. An edge `i -> j` states that the
//! math of rule `i` reads the variable assigned by rule `j`, so `j` has to be
//! evaluated first. References to quantities that no rule of the batch assigns
//! never become edges, and a rule reading its own variable has no self-edge.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::{
    equation::extract_read_variables, math::error::MathError, prelude::Rule,
};

/// Directed dependency graph over a batch of assignment rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    variables: Vec<String>,
    edges: Vec<BTreeSet<usize>>,
}

impl DependencyGraph {
    /// Builds the graph from target variables and the symbols each rule reads.
    ///
    /// `reads[i]` holds the symbols of rule `i`. Duplicate symbols are
    /// harmless; edges are kept in sets. Rules without an entry in `reads`
    /// read nothing.
    pub fn build<S: AsRef<str>>(targets: &[S], reads: &[Vec<String>]) -> Self {
        let mut assigned_by: HashMap<&str, Vec<usize>> = HashMap::with_capacity(targets.len());
        for (index, target) in targets.iter().enumerate() {
            assigned_by.entry(target.as_ref()).or_default().push(index);
        }

        let mut edges = vec![BTreeSet::new(); targets.len()];
        for (index, deps) in edges.iter_mut().enumerate() {
            let Some(symbols) = reads.get(index) else {
                continue;
            };

            for symbol in symbols {
                let Some(writers) = assigned_by.get(symbol.as_str()) else {
                    continue;
                };

                deps.extend(writers.iter().copied().filter(|&writer| writer != index));
            }
        }

        Self {
            variables: targets.iter().map(|t| t.as_ref().to_string()).collect(),
            edges,
        }
    }

    /// Builds the graph from rules, parsing their math.
    ///
    /// # Errors
    ///
    /// Returns a `MathError` if the math of any rule cannot be parsed.
    pub fn from_rules<'a, I>(rules: I) -> Result<Self, MathError>
    where
        I: IntoIterator<Item = &'a Rule>,
    {
        let mut targets = Vec::new();
        let mut reads = Vec::new();

        for rule in rules {
            let ast = rule.math_ast()?;
            targets.push(rule.variable().to_string());
            reads.push(extract_read_variables(ast.as_ref()));
        }

        Ok(Self::build(&targets, &reads))
    }

    /// Number of rules in the graph.
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Target variable of the rule at `index`.
    pub fn variable(&self, index: usize) -> Option<&str> {
        self.variables.get(index).map(String::as_str)
    }

    /// Positions of the rules that the rule at `index` depends on, ascending.
    pub fn dependencies_of(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.edges.get(index).into_iter().flatten().copied()
    }

    /// Whether the rule at `from` reads the variable of the rule at `to`.
    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        self.edges.get(from).is_some_and(|deps| deps.contains(&to))
    }

    pub fn edge_count(&self) -> usize {
        self.edges.iter().map(BTreeSet::len).sum()
    }

    /// Variables the given variable depends on.
    ///
    /// Merges all rules targeting `variable`; the variable itself is never
    /// part of the result.
    pub fn dependencies(&self, variable: &str) -> BTreeSet<&str> {
        self.variables
            .iter()
            .enumerate()
            .filter(|(_, target)| target.as_str() == variable)
            .flat_map(|(index, _)| self.dependencies_of(index))
            .map(|dep| self.variables[dep].as_str())
            .filter(|dep| *dep != variable)
            .collect()
    }

    /// Variable-level view of the graph.
    pub fn to_map(&self) -> BTreeMap<String, BTreeSet<String>> {
        let mut map: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

        for (index, variable) in self.variables.iter().enumerate() {
            let deps = map.entry(variable.clone()).or_default();
            deps.extend(
                self.dependencies_of(index)
                    .map(|dep| &self.variables[dep])
                    .filter(|dep| *dep != variable)
                    .cloned(),
            );
        }

        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(rules: &[(&str, &str)]) -> DependencyGraph {
        let rules = rules
            .iter()
            .map(|(variable, math)| Rule::assignment(*variable, *math))
            .collect::<Vec<_>>();
        DependencyGraph::from_rules(&rules).expect("Failed to build graph")
    }

    #[test]
    fn test_edges_follow_reads() {
        let graph = graph(&[("A", "B + 1"), ("B", "2"), ("C", "A * B")]);

        assert_eq!(graph.len(), 3);
        assert!(graph.has_edge(0, 1));
        assert!(graph.has_edge(2, 0));
        assert!(graph.has_edge(2, 1));
        assert!(!graph.has_edge(1, 0));
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.dependencies("C"), BTreeSet::from(["A", "B"]));
    }

    #[test]
    fn test_external_symbols_are_ignored() {
        let graph = graph(&[("A", "k * S + compartment"), ("B", "A / V")]);

        assert_eq!(graph.edge_count(), 1);
        assert!(graph.has_edge(1, 0));
        assert!(graph.dependencies("A").is_empty());
    }

    #[test]
    fn test_self_reference_has_no_edge() {
        let graph = graph(&[("A", "A + B"), ("B", "1")]);

        assert!(!graph.has_edge(0, 0));
        assert!(graph.has_edge(0, 1));
        assert_eq!(graph.dependencies("A"), BTreeSet::from(["B"]));
    }

    #[test]
    fn test_duplicate_symbols_add_single_edge() {
        let reads = vec![
            vec!["B".to_string(), "B".to_string(), "B".to_string()],
            vec![],
        ];
        let graph = DependencyGraph::build(&["A", "B"], &reads);

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.dependencies_of(0).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_duplicate_targets_are_all_dependencies() {
        let graph = graph(&[("X", "1"), ("Y", "X"), ("X", "2")]);

        assert_eq!(graph.dependencies_of(1).collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(graph.to_map()["X"], BTreeSet::new());
    }

    #[test]
    fn test_unset_math_reads_nothing() {
        let mut rule = Rule::assignment("A", "B");
        rule.math = None;
        let rules = vec![rule, Rule::assignment("B", "A")];
        let graph = DependencyGraph::from_rules(&rules).expect("Failed to build graph");

        assert!(graph.dependencies("A").is_empty());
        assert_eq!(graph.dependencies("B"), BTreeSet::from(["A"]));
    }

    #[test]
    fn test_unparsable_math_fails() {
        let rules = vec![Rule::assignment("A", "B +* 1")];
        assert!(DependencyGraph::from_rules(&rules).is_err());
    }
}
