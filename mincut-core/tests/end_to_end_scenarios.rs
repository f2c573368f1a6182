//! End-to-end minimum-cut scenarios against the fixture graphs.
//!
//! Each fixture has a hand-verified minimum cut; running the full
//! orchestrator against it exercises ISS shrinking, recursive contraction,
//! and the sequential base case together rather than in isolation.

use mincut_core::{Orchestrator, TrialConfigBuilder};
use mincut_test_support::fixtures;

fn run(source: &dyn mincut_core::GraphSource, processors: usize) -> mincut_core::CutReport {
    let config = TrialConfigBuilder::new()
        .with_success_probability(0.99)
        .with_base_seed(7)
        .build()
        .expect("valid config");
    Orchestrator::run(source, processors, &config).expect("orchestrator run must succeed")
}

#[test]
fn triangle_min_cut_is_two() {
    let source = fixtures::triangle();
    let report = run(&source, 2);
    assert_eq!(report.cut_weight(), 2);
}

#[test]
fn two_triangles_bridged_min_cut_is_five() {
    let source = fixtures::two_triangles_bridged();
    let report = run(&source, 2);
    assert_eq!(report.cut_weight(), 5);
}

#[test]
fn bipartite_k33_min_cut_is_three() {
    let source = fixtures::bipartite_k33();
    let report = run(&source, 3);
    assert_eq!(report.cut_weight(), 3);
}

#[test]
fn disconnected_two_k4_min_cut_is_zero() {
    let source = fixtures::disconnected_two_k4();
    let report = run(&source, 2);
    assert_eq!(report.cut_weight(), 0);
}

#[test]
fn cycle_of_length_100_min_cut_is_two() {
    let source = fixtures::cycle(100);
    let report = run(&source, 4);
    assert_eq!(report.cut_weight(), 2);
}

#[test]
fn every_worker_group_size_agrees_on_the_same_cut() {
    let source = fixtures::two_triangles_bridged();
    for processors in [1, 2, 3, 5] {
        let report = run(&source, processors);
        assert_eq!(
            report.cut_weight(),
            5,
            "processors={processors} must still recover the true minimum cut"
        );
    }
}
