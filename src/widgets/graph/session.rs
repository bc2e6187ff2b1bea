//! Render session lifecycle management.
//!
//! A [`GraphSession`] owns at most one live rendering-engine instance bound
//! to one viewport and keeps it synchronized with the latest
//! [`GraphSnapshot`] and the viewport's physical size. The lifecycle is an
//! explicit state machine:
//!
//! - **Unbound**: no viewport, no engine.
//! - **Bound**: viewport present, no snapshot loaded yet.
//! - **Active**: engine constructed and populated with the current snapshot.
//!
//! Snapshot replacement always tears the old engine down first, then builds
//! a fresh one over a fresh graph structure (nodes before edges). Resizes
//! only refresh the existing engine. A snapshot arriving while Unbound —
//! a retrieval that completed after teardown — is silently discarded.

use super::engine::{EngineFactory, GraphConstructionError, RenderEngine, Viewport};
use super::layout::GraphSnapshot;

// ============================================================================
// SnapshotOutcome
// ============================================================================

/// Result of delivering a snapshot to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotOutcome {
    /// The snapshot was loaded into a fresh engine.
    Applied,
    /// The session was unbound; the snapshot was dropped without touching
    /// any engine.
    Discarded,
}

// ============================================================================
// GraphSession
// ============================================================================

enum SessionState<E> {
    Unbound,
    Bound { viewport: Viewport },
    Active { viewport: Viewport, engine: E },
}

/// Owner of the live binding between a snapshot and a rendering engine.
///
/// The engine is held exclusively and is destroyed and recreated — never
/// mutated — whenever the bound snapshot changes. Exactly one engine
/// instance exists at any instant while Active, and none otherwise.
pub struct GraphSession<F: EngineFactory> {
    factory: F,
    state: SessionState<F::Engine>,
}

impl<F: EngineFactory> GraphSession<F> {
    /// Create an unbound session around an engine factory.
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            state: SessionState::Unbound,
        }
    }

    /// Bind the session to a viewport (Unbound → Bound).
    ///
    /// Mounting an already-mounted session only updates the stored viewport.
    pub fn mount(&mut self, viewport: Viewport) {
        match &mut self.state {
            SessionState::Unbound => self.state = SessionState::Bound { viewport },
            SessionState::Bound { viewport: v } | SessionState::Active { viewport: v, .. } => {
                *v = viewport;
            }
        }
    }

    /// Release the engine, if any, and return to Unbound.
    ///
    /// After this call no further engine operations occur, even if a
    /// pending snapshot later resolves.
    pub fn unmount(&mut self) {
        if let SessionState::Active { mut engine, .. } =
            std::mem::replace(&mut self.state, SessionState::Unbound)
        {
            engine.kill();
        }
    }

    /// Replace the rendered graph with a new snapshot.
    ///
    /// Any existing engine is torn down first, then a fresh engine is
    /// constructed and populated: all nodes, then all edges. On an
    /// insertion failure the fresh engine is released, the session drops
    /// back to Bound, and the error propagates — the previous engine is
    /// not resurrected.
    ///
    /// # Errors
    ///
    /// Returns [`GraphConstructionError`] on duplicate node ids or edges
    /// with missing endpoints.
    pub fn on_snapshot_change(
        &mut self,
        snapshot: &GraphSnapshot,
    ) -> Result<SnapshotOutcome, GraphConstructionError> {
        let viewport = match std::mem::replace(&mut self.state, SessionState::Unbound) {
            SessionState::Unbound => return Ok(SnapshotOutcome::Discarded),
            SessionState::Bound { viewport } => viewport,
            SessionState::Active {
                viewport,
                mut engine,
            } => {
                // Old engine goes away before the new one can exist.
                engine.kill();
                drop(engine);
                viewport
            }
        };
        self.state = SessionState::Bound { viewport };

        let mut engine = self.factory.create(viewport);
        if let Err(err) = populate(&mut engine, snapshot) {
            engine.kill();
            return Err(err);
        }

        self.state = SessionState::Active { viewport, engine };
        Ok(SnapshotOutcome::Applied)
    }

    /// Record a viewport size change and refresh the presentation.
    ///
    /// This never rebuilds the graph structure or the engine instance.
    pub fn on_container_resize(&mut self, viewport: Viewport) {
        match &mut self.state {
            SessionState::Unbound => {}
            SessionState::Bound { viewport: v } => *v = viewport,
            SessionState::Active {
                viewport: v,
                engine,
            } => {
                *v = viewport;
                engine.refresh(viewport);
            }
        }
    }

    /// Whether the session is bound to a viewport (Bound or Active).
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        !matches!(self.state, SessionState::Unbound)
    }

    /// Whether a populated engine is currently live.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.state, SessionState::Active { .. })
    }

    /// The live engine, if the session is Active.
    #[must_use]
    pub fn engine(&self) -> Option<&F::Engine> {
        match &self.state {
            SessionState::Active { engine, .. } => Some(engine),
            _ => None,
        }
    }
}

impl<F: EngineFactory> Drop for GraphSession<F> {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn populate<E: RenderEngine>(
    engine: &mut E,
    snapshot: &GraphSnapshot,
) -> Result<(), GraphConstructionError> {
    // Nodes strictly before edges; the engine rejects dangling endpoints.
    for node in &snapshot.nodes {
        engine.insert_node(node)?;
    }
    for edge in &snapshot.edges {
        engine.insert_edge(edge)?;
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::rc::Rc;

    use super::super::layout::{PositionedNode, TypedEdge};
    use super::*;
    use crate::domain::{DependencyEdge, TransactionRecord};

    #[derive(Default)]
    struct EngineLog {
        events: Vec<String>,
        live: usize,
        max_live: usize,
        next_id: usize,
    }

    type SharedLog = Rc<RefCell<EngineLog>>;

    struct MockEngine {
        id: usize,
        log: SharedLog,
        node_ids: HashSet<String>,
    }

    impl RenderEngine for MockEngine {
        fn insert_node(&mut self, node: &PositionedNode) -> Result<(), GraphConstructionError> {
            if !self.node_ids.insert(node.id.clone()) {
                return Err(GraphConstructionError::DuplicateNode {
                    id: node.id.clone(),
                });
            }
            self.log
                .borrow_mut()
                .events
                .push(format!("node#{}:{}", self.id, node.id));
            Ok(())
        }

        fn insert_edge(&mut self, edge: &TypedEdge) -> Result<(), GraphConstructionError> {
            for endpoint in [&edge.source, &edge.target] {
                if !self.node_ids.contains(endpoint) {
                    return Err(GraphConstructionError::DanglingEdge {
                        edge_id: edge.id.clone(),
                        node_id: endpoint.clone(),
                    });
                }
            }
            self.log
                .borrow_mut()
                .events
                .push(format!("edge#{}:{}", self.id, edge.id));
            Ok(())
        }

        fn refresh(&mut self, viewport: Viewport) {
            self.log.borrow_mut().events.push(format!(
                "refresh#{}:{}x{}",
                self.id, viewport.width, viewport.height
            ));
        }

        fn kill(&mut self) {
            let mut log = self.log.borrow_mut();
            log.live -= 1;
            let id = self.id;
            log.events.push(format!("kill#{id}"));
        }
    }

    struct MockFactory {
        log: SharedLog,
    }

    impl EngineFactory for MockFactory {
        type Engine = MockEngine;

        fn create(&self, _viewport: Viewport) -> MockEngine {
            let mut log = self.log.borrow_mut();
            let id = log.next_id;
            log.next_id += 1;
            log.live += 1;
            log.max_live = log.max_live.max(log.live);
            log.events.push(format!("create#{id}"));
            MockEngine {
                id,
                log: Rc::clone(&self.log),
                node_ids: HashSet::new(),
            }
        }
    }

    fn session_with_log() -> (GraphSession<MockFactory>, SharedLog) {
        let log = SharedLog::default();
        let session = GraphSession::new(MockFactory {
            log: Rc::clone(&log),
        });
        (session, log)
    }

    fn snapshot(n: i64, deps: &[(i64, i64)]) -> GraphSnapshot {
        let txns: Vec<TransactionRecord> = (0..n).map(TransactionRecord::bare).collect();
        let deps: Vec<DependencyEdge> = deps
            .iter()
            .map(|&(s, t)| DependencyEdge::bare(s, t))
            .collect();
        GraphSnapshot::from_records(&txns, Some(&deps))
    }

    #[test]
    fn test_snapshot_while_unbound_is_discarded() {
        let (mut session, log) = session_with_log();
        let outcome = session.on_snapshot_change(&snapshot(3, &[])).unwrap();
        assert_eq!(outcome, SnapshotOutcome::Discarded);
        assert!(log.borrow().events.is_empty());
        assert!(!session.is_active());
    }

    #[test]
    fn test_mount_then_snapshot_becomes_active() {
        let (mut session, log) = session_with_log();
        session.mount(Viewport::new(80, 24));
        assert!(session.is_mounted());
        assert!(!session.is_active());

        let outcome = session
            .on_snapshot_change(&snapshot(2, &[(0, 1)]))
            .unwrap();
        assert_eq!(outcome, SnapshotOutcome::Applied);
        assert!(session.is_active());
        assert_eq!(
            log.borrow().events,
            ["create#0", "node#0:0", "node#0:1", "edge#0:e0"]
        );
    }

    #[test]
    fn test_nodes_inserted_before_edges() {
        let (mut session, log) = session_with_log();
        session.mount(Viewport::new(80, 24));
        session
            .on_snapshot_change(&snapshot(3, &[(0, 2), (1, 2)]))
            .unwrap();
        let events = log.borrow().events.clone();
        let last_node = events.iter().rposition(|e| e.starts_with("node")).unwrap();
        let first_edge = events.iter().position(|e| e.starts_with("edge")).unwrap();
        assert!(last_node < first_edge);
    }

    #[test]
    fn test_snapshot_replacement_tears_down_old_engine_first() {
        let (mut session, log) = session_with_log();
        session.mount(Viewport::new(80, 24));
        session.on_snapshot_change(&snapshot(1, &[])).unwrap();
        session.on_snapshot_change(&snapshot(2, &[])).unwrap();

        let events = log.borrow().events.clone();
        let kill_old = events.iter().position(|e| e == "kill#0").unwrap();
        let create_new = events.iter().position(|e| e == "create#1").unwrap();
        assert!(kill_old < create_new);
        assert_eq!(log.borrow().max_live, 1);
        assert_eq!(log.borrow().live, 1);
    }

    #[test]
    fn test_duplicate_node_aborts_without_resurrection() {
        let (mut session, log) = session_with_log();
        session.mount(Viewport::new(80, 24));
        session.on_snapshot_change(&snapshot(2, &[])).unwrap();

        // Two records with the same index produce colliding node ids.
        let txns = vec![TransactionRecord::bare(7), TransactionRecord::bare(7)];
        let bad = GraphSnapshot::from_records(&txns, None);
        let err = session.on_snapshot_change(&bad).unwrap_err();
        assert_eq!(err, GraphConstructionError::DuplicateNode { id: "7".into() });

        // No engine survives the failed attempt; the session stays Bound.
        assert!(session.is_mounted());
        assert!(!session.is_active());
        assert!(session.engine().is_none());
        assert_eq!(log.borrow().live, 0);
    }

    #[test]
    fn test_dangling_edge_is_an_insertion_failure() {
        let (mut session, _log) = session_with_log();
        session.mount(Viewport::new(80, 24));
        let err = session
            .on_snapshot_change(&snapshot(2, &[(0, 9)]))
            .unwrap_err();
        assert_eq!(
            err,
            GraphConstructionError::DanglingEdge {
                edge_id: "e0".into(),
                node_id: "9".into(),
            }
        );
    }

    #[test]
    fn test_resize_only_refreshes_existing_engine() {
        let (mut session, log) = session_with_log();
        session.mount(Viewport::new(80, 24));
        session.on_snapshot_change(&snapshot(2, &[(0, 1)])).unwrap();
        let before = log.borrow().events.len();

        session.on_container_resize(Viewport::new(120, 40));
        let events = log.borrow().events.clone();
        assert_eq!(events.len(), before + 1);
        assert_eq!(events.last().unwrap(), "refresh#0:120x40");
        assert_eq!(log.borrow().max_live, 1);
    }

    #[test]
    fn test_resize_while_bound_is_a_no_op() {
        let (mut session, log) = session_with_log();
        session.mount(Viewport::new(80, 24));
        session.on_container_resize(Viewport::new(10, 10));
        assert!(log.borrow().events.is_empty());
    }

    #[test]
    fn test_unmount_releases_engine_and_blocks_late_snapshots() {
        let (mut session, log) = session_with_log();
        session.mount(Viewport::new(80, 24));
        session.on_snapshot_change(&snapshot(2, &[])).unwrap();
        session.unmount();

        assert!(!session.is_mounted());
        assert_eq!(log.borrow().live, 0);
        assert_eq!(log.borrow().events.last().unwrap(), "kill#0");

        // A retrieval resolving after teardown must not touch any engine.
        let before = log.borrow().events.len();
        let outcome = session.on_snapshot_change(&snapshot(5, &[])).unwrap();
        assert_eq!(outcome, SnapshotOutcome::Discarded);
        assert_eq!(log.borrow().events.len(), before);
    }

    #[test]
    fn test_drop_releases_engine() {
        let (mut session, log) = session_with_log();
        session.mount(Viewport::new(80, 24));
        session.on_snapshot_change(&snapshot(1, &[])).unwrap();
        drop(session);
        assert_eq!(log.borrow().live, 0);
    }
}
