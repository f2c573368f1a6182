//! Peak-memory validation benchmark.
//!
//! Measures the peak resident-set size of an `Orchestrator::run` call and
//! compares it against `mincut_core::estimate_rc_peak_bytes`'s analytic
//! prediction for the same graph shape, writing the comparison to a CSV
//! report rather than a Criterion timing group — the signal of interest is
//! the measured/estimated ratio, not wall time.
#![allow(missing_docs, reason = "Criterion macros generate undocumented items")]
#![allow(
    clippy::expect_used,
    reason = "benchmark setup is infallible for valid constants"
)]

use std::time::Duration;

use criterion::{Criterion, criterion_group, criterion_main};

use mincut_benches::profiling::{RcMemoryRecord, measure_peak_resident_set_size, write_rc_memory_report};
use mincut_core::{Orchestrator, TrialConfigBuilder, estimate_rc_peak_bytes};
use mincut_providers_click::ClickGraphSource;

/// Seed used for all synthetic graph generation in this benchmark.
const SEED: u64 = 42;

/// Number of clusters in every generated graph.
const CLUSTERS: u64 = 10;

/// Vertex counts sampled for the memory report.
const VERTEX_COUNTS: &[u64] = &[200, 1_000];

/// Interval between `/proc/self/status` reads while the orchestrator runs.
const SAMPLE_INTERVAL: Duration = Duration::from_millis(5);

fn memory_profile(c: &mut Criterion) {
    let config = TrialConfigBuilder::new()
        .with_base_seed(SEED)
        .build()
        .expect("trial config must be valid");

    let mut records = Vec::with_capacity(VERTEX_COUNTS.len());
    for &vertex_count in VERTEX_COUNTS {
        let source = ClickGraphSource::new(vertex_count, CLUSTERS, SEED);
        let processors = 4;
        // The orchestrator's internal HC group size is a private power-of-two
        // derived from processors and the trial count; `processors` itself is
        // a close enough upper bound for this report's purposes.
        let group_size = processors;
        let estimated_bytes = estimate_rc_peak_bytes(vertex_count as usize, group_size);

        let (_, measurement) = measure_peak_resident_set_size(SAMPLE_INTERVAL, || {
            Orchestrator::run(&source, processors, &config).expect("orchestrator run must succeed")
        })
        .expect("peak RSS sampling must succeed on Linux");

        records.push(
            RcMemoryRecord::new(vertex_count, group_size, measurement, estimated_bytes)
                .expect("estimate must be non-zero for a non-trivial graph"),
        );
    }

    let report_path = std::env::temp_dir().join("mincut_rc_memory_profile.csv");
    write_rc_memory_report(&report_path, &records).expect("memory report must persist");

    // Registered as a single-iteration Criterion benchmark so the report
    // generation above participates in the standard `cargo bench` flow
    // without Criterion re-running (and re-measuring) it per sample.
    let mut group = c.benchmark_group("memory_profile");
    group.sample_size(10);
    group.bench_function("report_is_generated", |b| {
        b.iter(|| std::hint::black_box(&report_path));
    });
    group.finish();
}

criterion_group!(benches, memory_profile);
criterion_main!(benches);
