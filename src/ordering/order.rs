//! Stable dependency ordering of assignment rules
//!
//! Rules are grouped into strongly connected components, so that mutually
//! dependent rules form a single unit. The condensed graph is acyclic and is
//! sorted with Kahn's algorithm; among the components that are ready, the one
//! whose first rule came earliest in the input is emitted first. Members of a
//! component keep their input order.
//!
//! Consequently every dependency between rules that are not part of a common
//! cycle is honored, and rules without dependencies keep their input order.

use std::collections::BTreeSet;

use log::{debug, warn};

use super::{error::OrderingError, graph::DependencyGraph};
use crate::prelude::Rule;

/// Computes the evaluation order of the rules in `graph`.
///
/// # Returns
///
/// A permutation of `0..graph.len()`; position `k` holds the input index of
/// the rule that goes to output position `k`.
pub fn order(graph: &DependencyGraph) -> Vec<usize> {
    let components = strongly_connected_components(graph);

    let mut component_of = vec![0; graph.len()];
    for (component, members) in components.iter().enumerate() {
        for &member in members {
            component_of[member] = component;
        }
    }

    // Distinct components each component waits for, and the reverse relation
    let mut waits_for: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); components.len()];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); components.len()];
    for rule in 0..graph.len() {
        let from = component_of[rule];
        for dep in graph.dependencies_of(rule) {
            let to = component_of[dep];
            if from != to && waits_for[from].insert(to) {
                dependents[to].push(from);
            }
        }
    }

    let mut remaining: Vec<usize> = waits_for.iter().map(BTreeSet::len).collect();
    let mut ready: BTreeSet<(usize, usize)> = remaining
        .iter()
        .enumerate()
        .filter(|(_, count)| **count == 0)
        .map(|(component, _)| (components[component][0], component))
        .collect();

    let mut result = Vec::with_capacity(graph.len());
    while let Some((_, component)) = ready.pop_first() {
        result.extend_from_slice(&components[component]);

        for &dependent in &dependents[component] {
            remaining[dependent] -= 1;
            if remaining[dependent] == 0 {
                ready.insert((components[dependent][0], dependent));
            }
        }
    }

    debug!(
        "Ordered {} rules with {} dependencies in {} components",
        graph.len(),
        graph.edge_count(),
        components.len()
    );

    result
}

/// Strongly connected components of the graph, each sorted ascending.
///
/// Uses an iterative Tarjan traversal so that long dependency chains do not
/// exhaust the call stack.
pub fn strongly_connected_components(graph: &DependencyGraph) -> Vec<Vec<usize>> {
    let n = graph.len();
    let successors: Vec<Vec<usize>> = (0..n).map(|v| graph.dependencies_of(v).collect()).collect();

    let mut index_of: Vec<Option<usize>> = vec![None; n];
    let mut lowlink = vec![0; n];
    let mut on_stack = vec![false; n];
    let mut stack = Vec::new();
    let mut next_index = 0;
    let mut components = Vec::new();

    for root in 0..n {
        if index_of[root].is_some() {
            continue;
        }

        index_of[root] = Some(next_index);
        lowlink[root] = next_index;
        next_index += 1;
        stack.push(root);
        on_stack[root] = true;

        // (node, next successor to visit)
        let mut call_stack: Vec<(usize, usize)> = vec![(root, 0)];

        while let Some(frame) = call_stack.last_mut() {
            let v = frame.0;

            if let Some(&w) = successors[v].get(frame.1) {
                frame.1 += 1;

                match index_of[w] {
                    None => {
                        index_of[w] = Some(next_index);
                        lowlink[w] = next_index;
                        next_index += 1;
                        stack.push(w);
                        on_stack[w] = true;
                        call_stack.push((w, 0));
                    }
                    Some(w_index) if on_stack[w] => {
                        lowlink[v] = lowlink[v].min(w_index);
                    }
                    Some(_) => {}
                }
                continue;
            }

            call_stack.pop();
            if let Some(&(parent, _)) = call_stack.last() {
                lowlink[parent] = lowlink[parent].min(lowlink[v]);
            }

            if index_of[v] == Some(lowlink[v]) {
                let mut component = Vec::new();
                while let Some(w) = stack.pop() {
                    on_stack[w] = false;
                    component.push(w);
                    if w == v {
                        break;
                    }
                }
                component.sort_unstable();
                components.push(component);
            }
        }
    }

    components
}

/// Groups of mutually dependent rules, in order of their first member.
pub fn cycles(graph: &DependencyGraph) -> Vec<Vec<usize>> {
    let mut cycles: Vec<Vec<usize>> = strongly_connected_components(graph)
        .into_iter()
        .filter(|component| component.len() > 1)
        .collect();
    cycles.sort_unstable_by_key(|component| component[0]);
    cycles
}

/// Checks that `permutation` holds every index of `0..len` exactly once.
pub fn validate_permutation(permutation: &[usize], len: usize) -> Result<(), OrderingError> {
    if permutation.len() != len {
        return Err(OrderingError::InvalidPermutation {
            len,
            message: format!("expected {len} positions, got {}", permutation.len()),
        });
    }

    let mut seen = vec![false; len];
    for &index in permutation {
        match seen.get_mut(index) {
            Some(slot) if !*slot => *slot = true,
            Some(_) => {
                return Err(OrderingError::InvalidPermutation {
                    len,
                    message: format!("position {index} appears twice"),
                })
            }
            None => {
                return Err(OrderingError::InvalidPermutation {
                    len,
                    message: format!("position {index} is out of range"),
                })
            }
        }
    }

    Ok(())
}

/// Moves `items` into the order given by `permutation`.
///
/// Items are moved, never cloned. The permutation is validated before any
/// item is moved.
pub fn apply_permutation<T>(items: Vec<T>, permutation: &[usize]) -> Result<Vec<T>, OrderingError> {
    validate_permutation(permutation, items.len())?;

    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
    Ok(permutation
        .iter()
        .filter_map(|&index| slots[index].take())
        .collect())
}

/// Reorders a batch of assignment rules so that dependencies come first.
///
/// # Errors
///
/// Returns an `OrderingError` if the math of a rule cannot be parsed. The
/// rules are dropped in that case; use [`order`] on a graph built from
/// borrowed rules to keep them.
pub fn reorder_rules(rules: Vec<Rule>) -> Result<Vec<Rule>, OrderingError> {
    if rules.len() < 2 {
        return Ok(rules);
    }

    let graph = DependencyGraph::from_rules(&rules)?;
    report_cycles(&graph);

    let permutation = order(&graph);
    apply_permutation(rules, &permutation)
}

/// Logs every group of mutually dependent rules.
pub(crate) fn report_cycles(graph: &DependencyGraph) {
    for cycle in cycles(graph) {
        let variables = cycle
            .iter()
            .filter_map(|&index| graph.variable(index))
            .collect::<Vec<_>>();
        warn!(
            "Assignment rules for {} depend on each other; keeping their original relative order",
            variables.join(", ")
        );
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn rules(definitions: &[(&str, &str)]) -> Vec<Rule> {
        definitions
            .iter()
            .map(|(variable, math)| Rule::assignment(*variable, *math))
            .collect()
    }

    fn variables(rules: &[Rule]) -> Vec<&str> {
        rules.iter().map(|r| r.variable()).collect()
    }

    fn order_of(definitions: &[(&str, &str)]) -> Vec<usize> {
        let graph = DependencyGraph::from_rules(&rules(definitions)).expect("Failed to build");
        order(&graph)
    }

    #[test]
    fn test_scenario_chain() {
        let result = reorder_rules(rules(&[("A", "B + 1"), ("B", "2"), ("C", "A * B")]))
            .expect("Failed to reorder");
        assert_eq!(variables(&result), vec!["B", "A", "C"]);
    }

    #[test]
    fn test_scenario_two_cycle_keeps_input_order() {
        let result = reorder_rules(rules(&[("X", "Y"), ("Y", "X")])).expect("Failed to reorder");
        assert_eq!(variables(&result), vec!["X", "Y"]);
    }

    #[test]
    fn test_no_dependencies_is_stable() {
        assert_eq!(
            order_of(&[("D", "1"), ("A", "k"), ("C", "S * 2"), ("B", "V")]),
            vec![0, 1, 2, 3]
        );
    }

    #[test]
    fn test_empty_and_single() {
        assert!(reorder_rules(Vec::new()).expect("Failed").is_empty());

        let single = reorder_rules(rules(&[("A", "A + 1")])).expect("Failed");
        assert_eq!(variables(&single), vec!["A"]);
        assert!(order(&DependencyGraph::default()).is_empty());
    }

    #[test]
    fn test_self_reference_does_not_block() {
        let order = order_of(&[("A", "A + B"), ("B", "1"), ("C", "C")]);
        assert_eq!(order, vec![1, 0, 2]);
    }

    #[test]
    fn test_unrelated_rules_keep_relative_order() {
        // Only E depends on something; everything else stays put
        let order = order_of(&[("E", "D"), ("A", "1"), ("B", "2"), ("D", "3")]);
        assert_eq!(order, vec![1, 2, 3, 0]);
    }

    #[test]
    fn test_downstream_of_cycle_follows_cycle() {
        let order = order_of(&[("Z", "X + 1"), ("X", "Y"), ("Y", "X")]);
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn test_long_cycle_terminates() {
        let definitions = [("A", "B"), ("B", "C"), ("C", "D"), ("D", "A"), ("E", "A")];
        let order = order_of(&definitions);
        assert_eq!(order, vec![0, 1, 2, 3, 4]);

        let graph = DependencyGraph::from_rules(&rules(&definitions)).unwrap();
        assert_eq!(cycles(&graph), vec![vec![0, 1, 2, 3]]);
    }

    #[test]
    fn test_acyclic_edges_are_satisfied() {
        let definitions = [
            ("F", "E + D"),
            ("E", "C * B"),
            ("D", "A"),
            ("C", "A + B"),
            ("B", "A ^ 2"),
            ("A", "k"),
            ("G", "1"),
        ];
        let graph = DependencyGraph::from_rules(&rules(&definitions)).unwrap();
        let order = order(&graph);

        let position = |rule: usize| order.iter().position(|&r| r == rule).unwrap();
        for rule in 0..graph.len() {
            for dep in graph.dependencies_of(rule) {
                assert!(
                    position(dep) < position(rule),
                    "{} must precede {}",
                    definitions[dep].0,
                    definitions[rule].0
                );
            }
        }
    }

    #[test]
    fn test_permutation_invariant() {
        let input = rules(&[("C", "A * B"), ("A", "B"), ("B", "C"), ("D", "B"), ("E", "1")]);
        let expected = input.clone();
        let result = reorder_rules(input).expect("Failed to reorder");

        assert_eq!(result.len(), expected.len());
        for rule in &expected {
            assert_eq!(result.iter().filter(|r| *r == rule).count(), 1);
        }
    }

    #[test]
    fn test_long_chain_does_not_overflow() {
        let n = 5_000;
        let definitions = (0..n)
            .map(|i| Rule::assignment(format!("x{i}"), format!("x{} + 1", i + 1)))
            .collect::<Vec<_>>();
        let graph = DependencyGraph::from_rules(&definitions).unwrap();
        let order = order(&graph);

        assert_eq!(order, (0..n).rev().collect::<Vec<_>>());
    }

    #[test]
    fn test_apply_permutation_rejects_invalid() {
        assert!(apply_permutation(vec!['a', 'b'], &[0]).is_err());
        assert!(apply_permutation(vec!['a', 'b'], &[1, 1]).is_err());
        assert!(apply_permutation(vec!['a', 'b'], &[0, 2]).is_err());
        assert_eq!(
            apply_permutation(vec!['a', 'b', 'c'], &[2, 0, 1]).unwrap(),
            vec!['c', 'a', 'b']
        );
    }
}
