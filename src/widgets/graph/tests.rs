//! Integration tests for the layout → session → engine pipeline.

use rstest::rstest;

use super::engine::Viewport;
use super::layout::GraphSnapshot;
use super::renderer::TuiEngineFactory;
use super::session::{GraphSession, SnapshotOutcome};
use crate::domain::{DependencyEdge, TransactionRecord};

fn records(n: i64) -> Vec<TransactionRecord> {
    (0..n).map(TransactionRecord::bare).collect()
}

#[test]
fn full_pipeline_populates_terminal_engine() {
    let txns = records(5);
    let deps = vec![DependencyEdge::bare(0, 2), DependencyEdge::bare(1, 4)];
    let snapshot = GraphSnapshot::from_records(&txns, Some(&deps));

    let mut session = GraphSession::new(TuiEngineFactory);
    session.mount(Viewport::new(80, 24));
    assert_eq!(
        session.on_snapshot_change(&snapshot).unwrap(),
        SnapshotOutcome::Applied
    );

    let engine = session.engine().unwrap();
    assert_eq!(engine.node_count(), 5);
    assert_eq!(engine.edge_count(), 2);

    // The concrete spiral scenario: five nodes, no two consecutive colinear.
    let expected = [(0.0, 0.0), (5.0, 0.0), (5.0, -5.0), (-5.0, -5.0), (-5.0, 5.0)];
    for (i, &(x, y)) in expected.iter().enumerate() {
        let node = engine.node(&i.to_string()).unwrap();
        assert_eq!((node.x, node.y), (x, y), "node {i}");
    }
}

#[test]
fn replacement_snapshot_fully_supersedes_previous() {
    let mut session = GraphSession::new(TuiEngineFactory);
    session.mount(Viewport::new(80, 24));

    session
        .on_snapshot_change(&GraphSnapshot::from_records(&records(8), None))
        .unwrap();
    session
        .on_snapshot_change(&GraphSnapshot::from_records(&records(3), None))
        .unwrap();

    let engine = session.engine().unwrap();
    assert_eq!(engine.node_count(), 3);
    // No merging: node "7" belonged to the superseded snapshot only.
    assert!(engine.node("7").is_none());
}

#[test]
fn resize_refresh_preserves_snapshot_identity() {
    let snapshot = GraphSnapshot::from_records(&records(6), None);
    let mut session = GraphSession::new(TuiEngineFactory);
    session.mount(Viewport::new(80, 24));
    session.on_snapshot_change(&snapshot).unwrap();

    let before: Vec<_> = session
        .engine()
        .unwrap()
        .nodes_in_order()
        .cloned()
        .collect();

    session.on_container_resize(Viewport::new(31, 9));
    session.on_container_resize(Viewport::new(200, 60));

    let engine = session.engine().unwrap();
    let after: Vec<_> = engine.nodes_in_order().cloned().collect();
    assert_eq!(before, after);
    assert_eq!(engine.viewport(), Viewport::new(200, 60));
}

#[test]
fn empty_response_renders_as_empty_graph() {
    let snapshot = GraphSnapshot::from_records(&[], None);
    let mut session = GraphSession::new(TuiEngineFactory);
    session.mount(Viewport::new(80, 24));
    session.on_snapshot_change(&snapshot).unwrap();
    assert!(session.engine().unwrap().is_empty());
}

#[rstest]
#[case::tiny(1)]
#[case::one_band(4)]
#[case::several_bands(23)]
#[case::large(257)]
fn node_count_matches_input_length(#[case] n: i64) {
    let snapshot = GraphSnapshot::from_records(&records(n), None);
    assert_eq!(snapshot.nodes.len(), n as usize);

    let mut session = GraphSession::new(TuiEngineFactory);
    session.mount(Viewport::new(80, 24));
    session.on_snapshot_change(&snapshot).unwrap();
    assert_eq!(session.engine().unwrap().node_count(), n as usize);
}

#[test]
fn killed_engine_is_unreachable_after_unmount() {
    let mut session = GraphSession::new(TuiEngineFactory);
    session.mount(Viewport::new(80, 24));
    session
        .on_snapshot_change(&GraphSnapshot::from_records(&records(2), None))
        .unwrap();
    session.unmount();
    assert!(session.engine().is_none());
    assert!(!session.is_mounted());
}
