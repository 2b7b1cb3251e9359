//! Benchmark: Plan Construction
//!
//! Measures table-list parsing and TransferGraph construction performance.
//! Run: cargo bench --bench plan_build

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use bqshift::plan::{build_plan, validate_plan, PlanParams, TransferGraph};
use bqshift::table_list::{parse_table_list, TablePair};

fn generate_table_list_text(rows: usize) -> String {
    let mut text = String::from("source,dest\n");
    for i in 0..rows {
        text.push_str(&format!("proj:ds.src{i},proj:ds.dst{i}\n"));
    }
    text
}

fn generate_pairs(rows: usize) -> Vec<TablePair> {
    (0..rows)
        .map(|i| TablePair {
            source_table: format!("proj:ds.src{i}"),
            dest_table: format!("proj:ds.dst{i}"),
        })
        .collect()
}

fn params() -> PlanParams {
    PlanParams {
        name: "bench".to_string(),
        source_bucket: "us-staging".to_string(),
        dest_bucket: "eu-staging".to_string(),
    }
}

fn bench_parse_table_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_table_list");

    for rows in [10, 100, 1000].iter() {
        let text = generate_table_list_text(*rows);

        group.bench_with_input(BenchmarkId::from_parameter(rows), &text, |b, text| {
            b.iter(|| {
                let pairs = parse_table_list(black_box(text)).unwrap();
                black_box(pairs)
            });
        });
    }

    group.finish();
}

fn bench_build_plan(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_plan");

    for rows in [10, 100, 1000].iter() {
        let pairs = generate_pairs(*rows);
        let params = params();

        group.bench_with_input(BenchmarkId::from_parameter(rows), &pairs, |b, pairs| {
            b.iter(|| {
                let plan = build_plan(black_box(pairs), &params);
                black_box(plan)
            });
        });
    }

    group.finish();
}

fn bench_graph_and_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan_validation");

    for rows in [10, 100, 1000].iter() {
        let plan = build_plan(&generate_pairs(*rows), &params());

        group.bench_with_input(BenchmarkId::new("from_plan", rows), &plan, |b, plan| {
            b.iter(|| {
                let graph = TransferGraph::from_plan(black_box(plan));
                black_box(graph)
            });
        });

        group.bench_with_input(BenchmarkId::new("validate", rows), &plan, |b, plan| {
            b.iter(|| {
                let report = validate_plan(black_box(plan)).unwrap();
                black_box(report)
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_parse_table_list,
    bench_build_plan,
    bench_graph_and_validation,
);
criterion_main!(benches);
