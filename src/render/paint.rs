// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nereid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Rasterizes a [`Frame`] into a [`Canvas`] through the viewport transform.
//!
//! Screen space is measured in device-independent pixels; each terminal cell covers
//! `cell_width` x `cell_height` of them. A node's layout position is the middle of its box's
//! left edge, so trees read left to right with connectors entering each box from the left.

use super::canvas::{Canvas, CanvasError};
use super::color::Rgb;
use super::reconcile::{Frame, FrameNode, Phase};
use super::scene::NodeView;
use crate::model::{NodeId, Point};
use crate::viewport::Transform;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaintOptions {
    pub cell_width: f64,
    pub cell_height: f64,
    /// Longest label (markers included) before it is truncated with `…`.
    pub max_label_width: usize,
}

impl Default for PaintOptions {
    fn default() -> Self {
        Self { cell_width: 8.0, cell_height: 16.0, max_label_width: 18 }
    }
}

impl PaintOptions {
    pub fn cell_of(&self, screen: Point) -> (i64, i64) {
        ((screen.x / self.cell_width).floor() as i64, (screen.y / self.cell_height).floor() as i64)
    }

    /// Screen point at the center of a cell.
    pub fn screen_of(&self, col: u16, row: u16) -> Point {
        Point::new((f64::from(col) + 0.5) * self.cell_width, (f64::from(row) + 0.5) * self.cell_height)
    }
}

/// Inclusive cell rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x0: i64,
    pub y0: i64,
    pub x1: i64,
    pub y1: i64,
}

impl CellRect {
    pub fn contains(&self, x: i64, y: i64) -> bool {
        (self.x0..=self.x1).contains(&x) && (self.y0..=self.y1).contains(&y)
    }

    fn mid_row(&self) -> i64 {
        (self.y0 + self.y1) / 2
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeBox {
    pub id: NodeId,
    pub rect: CellRect,
    pub phase: Phase,
    pub color: Option<Rgb>,
    pub opacity: f64,
}

/// Painted node boxes, bottom-most first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HitIndex {
    boxes: Vec<NodeBox>,
}

impl HitIndex {
    pub fn boxes(&self) -> &[NodeBox] {
        &self.boxes
    }

    pub fn get(&self, id: NodeId) -> Option<&NodeBox> {
        self.boxes.iter().find(|b| b.id == id)
    }

    /// Top-most live node under a cell. Exiting nodes are never hit.
    pub fn node_at(&self, x: i64, y: i64) -> Option<NodeId> {
        self.boxes
            .iter()
            .rev()
            .find(|b| b.phase != Phase::Exiting && b.rect.contains(x, y))
            .map(|b| b.id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Painted {
    pub canvas: Canvas,
    pub hits: HitIndex,
}

pub(crate) fn text_len(text: &str) -> usize {
    text.chars().count()
}

pub(crate) fn truncate_with_ellipsis(text: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }
    if text_len(text) <= max_len {
        return text.to_owned();
    }
    if max_len == 1 {
        return "…".to_owned();
    }
    let mut out: String = text.chars().take(max_len - 1).collect();
    out.push('…');
    out
}

/// Box text for a node: the label plus markers for image (`▣`), link (`↗`) and the number of
/// collapsed children (`+N`). Markers are kept; the label is truncated to make room.
pub fn node_label(view: &NodeView, max_width: usize) -> String {
    let mut suffix = String::new();
    if view.image.is_some() {
        suffix.push_str(" ▣");
    }
    if view.link.is_some() {
        suffix.push_str(" ↗");
    }
    if view.hidden_count > 0 {
        suffix.push_str(&format!(" +{}", view.hidden_count));
    }
    let budget = max_width.saturating_sub(text_len(&suffix)).max(1);
    format!("{}{suffix}", truncate_with_ellipsis(&view.label, budget))
}

fn node_rect(node: &FrameNode, transform: Transform, options: &PaintOptions) -> (CellRect, String) {
    let label = node_label(&node.view, options.max_label_width);
    let (col, row) = options.cell_of(transform.apply(node.position));
    let width = text_len(&label) as i64 + 4;
    (CellRect { x0: col, y0: row - 1, x1: col + width - 1, y1: row + 1 }, label)
}

/// Draws connectors first, then boxes with fading nodes underneath fully shown ones.
pub fn paint(
    frame: &Frame,
    transform: Transform,
    cols: usize,
    rows: usize,
    options: &PaintOptions,
) -> Result<Painted, CanvasError> {
    let mut canvas = Canvas::new(cols, rows)?;

    let mut placed = frame
        .nodes
        .iter()
        .map(|node| {
            let (rect, label) = node_rect(node, transform, options);
            (node, rect, label)
        })
        .collect::<Vec<_>>();

    for edge in &frame.edges {
        let rect_of = |id: NodeId| placed.iter().find(|(node, ..)| node.view.id == id).map(|(_, rect, _)| *rect);
        let (Some(parent), Some(child)) = (rect_of(edge.parent), rect_of(edge.child)) else {
            continue;
        };
        // Overlapping boxes (a node entering from its parent, or a far zoom-out) get no connector.
        if child.x0 <= parent.x1 + 1 {
            continue;
        }
        let (from_row, to_row) = (parent.mid_row(), child.mid_row());
        let mid = (parent.x1 + child.x0) / 2;
        canvas.draw_hline(parent.x1, mid, from_row);
        canvas.draw_vline(mid, from_row, to_row);
        canvas.draw_hline(mid, child.x0, to_row);
    }

    placed.sort_by(|a, b| a.0.opacity.total_cmp(&b.0.opacity));

    let mut hits = HitIndex::default();
    for (node, rect, label) in placed {
        canvas.draw_box(rect.x0, rect.y0, rect.x1, rect.y1);
        canvas.fill_rect(rect.x0 + 1, rect.y0 + 1, rect.x1 - 1, rect.y1 - 1, ' ');
        canvas.write_str(rect.x0 + 2, rect.mid_row(), &label);
        hits.boxes.push(NodeBox {
            id: node.view.id,
            rect,
            phase: node.phase,
            color: node.color.as_deref().and_then(Rgb::parse),
            opacity: node.opacity,
        });
    }

    Ok(Painted { canvas, hits })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{node_label, paint, truncate_with_ellipsis, PaintOptions};
    use crate::layout::{layout_mind_map, LayoutConfig};
    use crate::model::{MindMapNode, MindMapTree, NodeId, Point};
    use crate::render::{Scene, SceneAnimator};
    use crate::viewport::Transform;

    fn frame_of(raw: &MindMapNode) -> crate::render::Frame {
        let mut tree = MindMapTree::build(raw);
        layout_mind_map(&mut tree, &LayoutConfig::default());
        let mut animator = SceneAnimator::new(Duration::from_millis(100));
        animator.reset(Scene::from_tree(&tree));
        animator.frame()
    }

    #[test]
    fn paints_boxes_and_an_elbow_connector() {
        let frame = frame_of(&MindMapNode::new("A").with_children([MindMapNode::new("B")]));
        let painted = paint(&frame, Transform::new(8.0, 16.0, 1.0), 32, 3, &PaintOptions::default())
            .expect("paint");

        let gap = " ".repeat(20);
        let line = "─".repeat(20);
        assert_eq!(
            painted.canvas.lines(),
            vec![
                format!(" ┌───┐{gap}┌───┐"),
                format!(" │ A ├{line}┤ B │"),
                format!(" └───┘{gap}└───┘"),
            ]
        );
    }

    #[test]
    fn hit_index_finds_the_box_under_a_cell() {
        let frame = frame_of(&MindMapNode::new("A").with_children([MindMapNode::new("B")]));
        let painted = paint(&frame, Transform::new(8.0, 16.0, 1.0), 32, 3, &PaintOptions::default())
            .expect("paint");

        assert_eq!(painted.hits.node_at(3, 1), Some(NodeId::new(0)));
        assert_eq!(painted.hits.node_at(28, 0), Some(NodeId::new(1)));
        assert_eq!(painted.hits.node_at(15, 1), None);
    }

    #[test]
    fn nodes_off_screen_are_clipped_not_errors() {
        let frame = frame_of(&MindMapNode::new("A").with_children([MindMapNode::new("B")]));
        let painted = paint(&frame, Transform::new(-5000.0, -5000.0, 1.0), 10, 4, &PaintOptions::default())
            .expect("paint");
        assert_eq!(painted.canvas.to_string_trimmed(), "");
    }

    #[test]
    fn labels_carry_markers_and_truncate_the_name_first() {
        let frame = frame_of(
            &MindMapNode::new("Root").with_children([MindMapNode::new("A very long topic name")
                .with_link("https://example.com")
                .with_children([MindMapNode::new("x"), MindMapNode::new("y")])]),
        );
        let view = &frame.node(NodeId::new(1)).expect("child").view;
        assert_eq!(node_label(view, 12), "A very… ↗ +2");
        assert_eq!(node_label(view, 40), "A very long topic name ↗ +2");
    }

    #[test]
    fn truncate_counts_chars_not_bytes() {
        assert_eq!(truncate_with_ellipsis("hello", 0), "");
        assert_eq!(truncate_with_ellipsis("hello", 1), "…");
        assert_eq!(truncate_with_ellipsis("αβγ", 2), "α…");
    }

    #[test]
    fn cell_mapping_round_trips_through_cell_centers() {
        let options = PaintOptions::default();
        assert_eq!(options.cell_of(options.screen_of(7, 3)), (7, 3));
        assert_eq!(options.cell_of(Point::new(-1.0, -1.0)), (-1, -1));
    }
}
