//! Verifies that the orchestrator's `#[instrument]` spans actually fire,
//! using the shared `RecordingLayer` test utility.

use mincut_core::{GraphSource, GraphSourceError, Orchestrator, TrialConfigBuilder, WeightedEdge, edge_slice_bounds};
use mincut_test_support::tracing::RecordingLayer;
use tracing_subscriber::layer::SubscriberExt;

struct TriangleSource;

impl GraphSource for TriangleSource {
    fn name(&self) -> &str {
        "triangle"
    }
    fn vertex_count(&self) -> u64 {
        3
    }
    fn edge_count(&self) -> u64 {
        3
    }
    fn slice(&self, rank: usize, group_size: usize) -> Result<Vec<WeightedEdge>, GraphSourceError> {
        let edges = vec![
            WeightedEdge::new(0, 1, 1),
            WeightedEdge::new(1, 2, 1),
            WeightedEdge::new(0, 2, 1),
        ];
        let (start, end) = edge_slice_bounds(3, rank, group_size)?;
        Ok(edges[start as usize..end as usize].to_vec())
    }
}

#[test]
fn orchestrator_run_emits_a_span() {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    let config = TrialConfigBuilder::new().build().expect("valid config");
    let report = tracing::subscriber::with_default(subscriber, || {
        Orchestrator::run(&TriangleSource, 2, &config).expect("orchestrator run must succeed")
    });

    assert_eq!(report.cut_weight(), 2);
    let spans = layer.spans();
    assert!(spans.iter().any(|span| span.name == "run"));
}
