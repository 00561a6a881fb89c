use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use sbml_rules::ordering::order::order;
use sbml_rules::prelude::*;

/// Rules `x_i := x_{i+1} + 1`, listed so that every rule has to move.
fn chain_rules(n: usize) -> Vec<Rule> {
    (0..n)
        .map(|i| {
            if i + 1 == n {
                Rule::assignment(format!("x{i}"), "1")
            } else {
                Rule::assignment(format!("x{i}"), format!("x{} + 1", i + 1))
            }
        })
        .collect()
}

/// Rules reading a handful of other rules, including some cycles.
fn mesh_rules(n: usize) -> Vec<Rule> {
    (0..n)
        .map(|i| {
            let math = [7, 13, 31]
                .iter()
                .map(|step| format!("x{}", (i * step + 3) % n))
                .collect::<Vec<_>>()
                .join(" + ");
            Rule::assignment(format!("x{i}"), math)
        })
        .collect()
}

fn benchmark_ordering(c: &mut Criterion) {
    let chain = chain_rules(1000);
    let mesh = mesh_rules(1000);

    c.bench_function("build_graph_chain", |b| {
        b.iter(|| DependencyGraph::from_rules(black_box(&chain)))
    });

    let chain_graph = DependencyGraph::from_rules(&chain).expect("Failed to build graph");
    c.bench_function("order_chain", |b| b.iter(|| order(black_box(&chain_graph))));

    let mesh_graph = DependencyGraph::from_rules(&mesh).expect("Failed to build graph");
    c.bench_function("order_mesh", |b| b.iter(|| order(black_box(&mesh_graph))));

    c.bench_function("reorder_rules_chain", |b| {
        b.iter(|| reorder_rules(black_box(chain.clone())))
    });
}

criterion_group!(benches, benchmark_ordering);
criterion_main!(benches);
