//! CLICK synthetic graph generation benchmarks.
//!
//! Isolates the cost of building a [`ClickGraphSource`] from the cost of
//! running the solver against it, so regressions in graph generation don't
//! get conflated with orchestrator regressions.
#![allow(missing_docs, reason = "Criterion macros generate undocumented items")]
#![allow(
    clippy::expect_used,
    reason = "benchmark setup is infallible for valid constants"
)]
#![allow(
    clippy::shadow_reuse,
    reason = "Criterion bench_with_input closures rebind parameter names"
)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use mincut_benches::params::ClickBenchParams;
use mincut_providers_click::ClickGraphSource;

/// Seed used for all synthetic graph generation in this benchmark.
const SEED: u64 = 42;

/// Number of clusters in every generated graph.
const CLUSTERS: u64 = 10;

/// Vertex counts to benchmark.
const VERTEX_COUNTS: &[u64] = &[100, 500, 2_000];

fn click_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("click_generation");

    for &vertex_count in VERTEX_COUNTS {
        let bench_params = ClickBenchParams {
            vertex_count,
            clusters: CLUSTERS,
        };

        group.bench_with_input(
            BenchmarkId::from_parameter(&bench_params),
            &vertex_count,
            |b, &vertex_count| {
                b.iter(|| ClickGraphSource::new(vertex_count, CLUSTERS, SEED));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, click_generation);
criterion_main!(benches);
