//! Terminal rendering engine for DAG snapshots.
//!
//! This module provides [`TuiEngine`], the shipped [`RenderEngine`]
//! implementation holding the populated graph store, and
//! [`DagGraphWidget`], which projects the pre-positioned nodes onto a
//! Ratatui buffer. Because every node arrives with layout coordinates, the
//! widget does no physics: it only maps world coordinates into terminal
//! cells.

use std::collections::HashMap;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

use super::engine::{EngineFactory, GraphConstructionError, RenderEngine, Viewport};
use super::layout::{PositionedNode, TypedEdge};

// ============================================================================
// TuiEngine
// ============================================================================

/// World-coordinate bounding box of the populated nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
struct WorldBounds {
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
}

impl WorldBounds {
    fn expand(&mut self, x: f64, y: f64) {
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
    }
}

/// Rendering engine over one immutable snapshot's worth of graph data.
///
/// Nodes and edges are inserted exactly once, at construction time, by the
/// session manager. `refresh` only re-targets the viewport; the stored
/// graph is never touched after population.
#[derive(Debug, Default)]
pub struct TuiEngine {
    nodes: HashMap<String, PositionedNode>,
    order: Vec<String>,
    edges: Vec<TypedEdge>,
    bounds: Option<WorldBounds>,
    viewport: Viewport,
}

impl TuiEngine {
    /// Create an empty engine targeting the given viewport.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    /// Number of stored nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of stored edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether the engine holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The viewport the engine currently targets.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Stored nodes in insertion order.
    pub fn nodes_in_order(&self) -> impl Iterator<Item = &PositionedNode> {
        self.order.iter().filter_map(|id| self.nodes.get(id))
    }

    /// Stored edges in insertion order.
    #[must_use]
    pub fn edges(&self) -> &[TypedEdge] {
        &self.edges
    }

    /// Look up a node by id.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&PositionedNode> {
        self.nodes.get(id)
    }
}

impl RenderEngine for TuiEngine {
    fn insert_node(&mut self, node: &PositionedNode) -> Result<(), GraphConstructionError> {
        if self.nodes.contains_key(&node.id) {
            return Err(GraphConstructionError::DuplicateNode {
                id: node.id.clone(),
            });
        }
        match &mut self.bounds {
            Some(bounds) => bounds.expand(node.x, node.y),
            None => {
                self.bounds = Some(WorldBounds {
                    min_x: node.x,
                    max_x: node.x,
                    min_y: node.y,
                    max_y: node.y,
                });
            }
        }
        self.order.push(node.id.clone());
        self.nodes.insert(node.id.clone(), node.clone());
        Ok(())
    }

    fn insert_edge(&mut self, edge: &TypedEdge) -> Result<(), GraphConstructionError> {
        for endpoint in [&edge.source, &edge.target] {
            if !self.nodes.contains_key(endpoint) {
                return Err(GraphConstructionError::DanglingEdge {
                    edge_id: edge.id.clone(),
                    node_id: endpoint.clone(),
                });
            }
        }
        self.edges.push(edge.clone());
        Ok(())
    }

    fn refresh(&mut self, viewport: Viewport) {
        // Presentation-only: projection happens at draw time against the
        // current viewport, so a resize is a single field store.
        self.viewport = viewport;
    }

    fn kill(&mut self) {
        self.nodes.clear();
        self.order.clear();
        self.edges.clear();
        self.bounds = None;
    }
}

/// Factory producing [`TuiEngine`] instances for the session manager.
#[derive(Debug, Clone, Copy, Default)]
pub struct TuiEngineFactory;

impl EngineFactory for TuiEngineFactory {
    type Engine = TuiEngine;

    fn create(&self, viewport: Viewport) -> TuiEngine {
        TuiEngine::new(viewport)
    }
}

// ============================================================================
// DagGraphWidget
// ============================================================================

/// Widget projecting a populated [`TuiEngine`] into a terminal area.
#[derive(Debug, Clone)]
pub struct DagGraphWidget<'a> {
    engine: &'a TuiEngine,
    show_labels: bool,
}

impl<'a> DagGraphWidget<'a> {
    /// Horizontal cells kept free at each side of the drawing area.
    const MARGIN_X: u16 = 2;
    /// Vertical cells kept free at top and bottom.
    const MARGIN_Y: u16 = 1;

    /// Create a new widget over a populated engine.
    #[must_use]
    pub const fn new(engine: &'a TuiEngine) -> Self {
        Self {
            engine,
            show_labels: true,
        }
    }

    /// Hide node labels.
    #[must_use]
    pub const fn without_labels(mut self) -> Self {
        self.show_labels = false;
        self
    }

    /// Map world coordinates into a cell of `inner`.
    fn project(bounds: WorldBounds, x: f64, y: f64, inner: Rect) -> (u16, u16) {
        let span_x = bounds.max_x - bounds.min_x;
        let span_y = bounds.max_y - bounds.min_y;
        let col = if span_x == 0.0 {
            inner.x + inner.width / 2
        } else {
            let t = (x - bounds.min_x) / span_x;
            inner.x + (t * f64::from(inner.width.saturating_sub(1))).round() as u16
        };
        let row = if span_y == 0.0 {
            inner.y + inner.height / 2
        } else {
            let t = (y - bounds.min_y) / span_y;
            inner.y + (t * f64::from(inner.height.saturating_sub(1))).round() as u16
        };
        (col, row)
    }

    /// Arrow glyph for the dominant direction of a cell-space step.
    fn arrow_glyph(dx: i32, dy: i32) -> char {
        if dx.abs() >= dy.abs() {
            if dx >= 0 { '▶' } else { '◀' }
        } else if dy >= 0 {
            '▼'
        } else {
            '▲'
        }
    }

    /// Cells of the straight line between two cells (Bresenham), endpoints
    /// included.
    fn line_cells(from: (u16, u16), to: (u16, u16)) -> Vec<(u16, u16)> {
        let (mut x0, mut y0) = (i32::from(from.0), i32::from(from.1));
        let (x1, y1) = (i32::from(to.0), i32::from(to.1));
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let mut cells = Vec::new();
        loop {
            cells.push((x0 as u16, y0 as u16));
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
        cells
    }

    fn draw_empty_message(area: Rect, buf: &mut Buffer) {
        let msg = "No graph data";
        let x = area.x + area.width.saturating_sub(msg.len() as u16) / 2;
        let y = area.y + area.height / 2;
        for (i, ch) in msg.chars().enumerate() {
            if let Some(cell) = buf.cell_mut((x + i as u16, y)) {
                cell.set_char(ch).set_style(Style::default().fg(Color::Gray));
            }
        }
    }
}

impl Widget for DagGraphWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(bounds) = self.engine.bounds else {
            Self::draw_empty_message(area, buf);
            return;
        };
        let inner = Rect {
            x: area.x + Self::MARGIN_X,
            y: area.y + Self::MARGIN_Y,
            width: area.width.saturating_sub(Self::MARGIN_X * 2),
            height: area.height.saturating_sub(Self::MARGIN_Y * 2),
        };
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        // Edges first, nodes drawn over them.
        let edge_style = Style::default().fg(Color::DarkGray);
        for edge in self.engine.edges() {
            let (Some(src), Some(dst)) = (self.engine.node(&edge.source), self.engine.node(&edge.target))
            else {
                continue; // population guarantees both exist
            };
            let from = Self::project(bounds, src.x, src.y, inner);
            let to = Self::project(bounds, dst.x, dst.y, inner);
            let cells = Self::line_cells(from, to);
            let dx = i32::from(to.0) - i32::from(from.0);
            let dy = i32::from(to.1) - i32::from(from.1);
            let last = cells.len().saturating_sub(1);
            for (i, &(cx, cy)) in cells.iter().enumerate() {
                let ch = if i == last && last > 0 {
                    Self::arrow_glyph(dx, dy)
                } else {
                    '·'
                };
                if let Some(cell) = buf.cell_mut((cx, cy)) {
                    cell.set_char(ch).set_style(edge_style);
                }
            }
        }

        let node_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
        let label_style = Style::default().fg(Color::Yellow);
        for node in self.engine.nodes_in_order() {
            let (cx, cy) = Self::project(bounds, node.x, node.y, inner);
            if let Some(cell) = buf.cell_mut((cx, cy)) {
                cell.set_char('●').set_style(node_style);
            }
            if self.show_labels {
                for (i, ch) in node.label.chars().enumerate() {
                    let lx = cx + 1 + i as u16;
                    if lx >= area.x + area.width {
                        break;
                    }
                    if let Some(cell) = buf.cell_mut((lx, cy)) {
                        cell.set_char(ch).set_style(label_style);
                    }
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DependencyEdge, TransactionRecord};
    use crate::widgets::graph::layout::GraphSnapshot;

    fn populated_engine(n: i64, deps: &[(i64, i64)]) -> TuiEngine {
        let txns: Vec<TransactionRecord> = (0..n).map(TransactionRecord::bare).collect();
        let deps: Vec<DependencyEdge> = deps
            .iter()
            .map(|&(s, t)| DependencyEdge::bare(s, t))
            .collect();
        let snapshot = GraphSnapshot::from_records(&txns, Some(&deps));
        let mut engine = TuiEngine::new(Viewport::new(80, 24));
        for node in &snapshot.nodes {
            engine.insert_node(node).unwrap();
        }
        for edge in &snapshot.edges {
            engine.insert_edge(edge).unwrap();
        }
        engine
    }

    fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut out = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                out.push_str(buf.cell((x, y)).unwrap().symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_duplicate_node_insertion_fails() {
        let mut engine = TuiEngine::new(Viewport::new(80, 24));
        let snapshot = GraphSnapshot::from_records(&[TransactionRecord::bare(1)], None);
        engine.insert_node(&snapshot.nodes[0]).unwrap();
        let err = engine.insert_node(&snapshot.nodes[0]).unwrap_err();
        assert_eq!(err, GraphConstructionError::DuplicateNode { id: "1".into() });
    }

    #[test]
    fn test_edge_requires_existing_endpoints() {
        let mut engine = TuiEngine::new(Viewport::new(80, 24));
        let txns = vec![TransactionRecord::bare(0), TransactionRecord::bare(1)];
        let deps = vec![DependencyEdge::bare(0, 1)];
        let snapshot = GraphSnapshot::from_records(&txns, Some(&deps));

        // Edge before its nodes is a contract error.
        let err = engine.insert_edge(&snapshot.edges[0]).unwrap_err();
        assert!(matches!(err, GraphConstructionError::DanglingEdge { .. }));

        engine.insert_node(&snapshot.nodes[0]).unwrap();
        engine.insert_node(&snapshot.nodes[1]).unwrap();
        engine.insert_edge(&snapshot.edges[0]).unwrap();
        assert_eq!(engine.edge_count(), 1);
    }

    #[test]
    fn test_refresh_keeps_graph_contents() {
        let mut engine = populated_engine(5, &[(0, 1)]);
        let nodes_before: Vec<_> = engine.nodes_in_order().cloned().collect();
        let edges_before = engine.edges().to_vec();

        engine.refresh(Viewport::new(200, 50));

        assert_eq!(engine.viewport(), Viewport::new(200, 50));
        let nodes_after: Vec<_> = engine.nodes_in_order().cloned().collect();
        assert_eq!(nodes_before, nodes_after);
        assert_eq!(edges_before, engine.edges());
    }

    #[test]
    fn test_kill_clears_store() {
        let mut engine = populated_engine(3, &[(0, 2)]);
        engine.kill();
        assert!(engine.is_empty());
        assert_eq!(engine.edge_count(), 0);
    }

    #[test]
    fn test_widget_renders_empty_message() {
        let engine = TuiEngine::new(Viewport::new(30, 5));
        let mut buf = Buffer::empty(Rect::new(0, 0, 30, 5));
        DagGraphWidget::new(&engine).render(Rect::new(0, 0, 30, 5), &mut buf);
        assert!(buffer_text(&buf).contains("No graph data"));
    }

    #[test]
    fn test_widget_draws_nodes_and_labels() {
        let engine = populated_engine(5, &[]);
        let mut buf = Buffer::empty(Rect::new(0, 0, 40, 12));
        DagGraphWidget::new(&engine).render(Rect::new(0, 0, 40, 12), &mut buf);
        let text = buffer_text(&buf);
        assert_eq!(text.matches('●').count(), 5);
        assert!(text.contains('0'));
        assert!(text.contains('4'));
    }

    #[test]
    fn test_widget_draws_edge_trail() {
        let engine = populated_engine(5, &[(0, 3)]);
        let mut buf = Buffer::empty(Rect::new(0, 0, 40, 12));
        DagGraphWidget::new(&engine)
            .without_labels()
            .render(Rect::new(0, 0, 40, 12), &mut buf);
        let text = buffer_text(&buf);
        assert!(text.contains('·'));
    }

    #[test]
    fn test_single_node_centered() {
        let engine = populated_engine(1, &[]);
        let mut buf = Buffer::empty(Rect::new(0, 0, 21, 7));
        DagGraphWidget::new(&engine)
            .without_labels()
            .render(Rect::new(0, 0, 21, 7), &mut buf);
        // Span is zero in both axes, so the node lands mid-viewport.
        assert_eq!(buf.cell((10, 3)).unwrap().symbol(), "●");
    }
}
