// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nereid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The imperative command surface a host UI drives.
//!
//! [`MindMapEditor`] owns the mind map, the viewport, selection and pointer state, and the
//! scene animator. Every structural command is an [`Op`] batch: it is applied copy-on-write,
//! the new tree is laid out, and the resulting scene is handed to the animator. The viewport
//! transform is never touched by an edit; only explicit fits, zooms and pans move it.

mod config;

pub use config::EditorConfig;

use std::time::Duration;

use tracing::{debug, info};

use crate::interaction::{neighbor, Direction, InlineEdit, PointerTracker, Selection};
use crate::layout::layout_mind_map;
use crate::model::{MindMap, MindMapNode, MindMapTree, NodeId, Point};
use crate::ops::{apply_ops, ApplyResult, NodePatch, Op};
use crate::render::{paint, CanvasError, Frame, PaintOptions, Painted, Scene, SceneAnimator};
use crate::viewport::{FitMode, Transform, Viewport};

#[derive(Debug, Clone)]
pub struct MindMapEditor {
    config: EditorConfig,
    map: MindMap,
    viewport: Viewport,
    selection: Selection,
    pointer: PointerTracker,
    editing: Option<InlineEdit>,
    animator: SceneAnimator,
    needs_initial_fit: bool,
}

impl MindMapEditor {
    pub fn new(raw: &MindMapNode, config: EditorConfig) -> Self {
        let mut editor = Self {
            config,
            map: MindMap::load(raw),
            viewport: Viewport::new(config.viewport),
            selection: Selection::new(),
            pointer: PointerTracker::new(config.drag_threshold),
            editing: None,
            animator: SceneAnimator::with_easing(config.reconcile_duration, config.viewport.easing),
            needs_initial_fit: true,
        };
        editor.show_loaded();
        editor
    }

    /// Replaces the diagram. Ids restart from zero; selection and any inline edit are dropped.
    pub fn load(&mut self, raw: &MindMapNode) {
        self.map = MindMap::load(raw);
        self.selection.clear();
        self.editing = None;
        self.needs_initial_fit = true;
        self.show_loaded();
    }

    fn show_loaded(&mut self) {
        let bounds = layout_mind_map(self.map.tree_mut(), &self.config.layout);
        self.animator.reset(Scene::from_tree(self.map.tree()));
        info!(
            nodes = self.map.tree().len(),
            visible = self.animator.scene().len(),
            width = bounds.width(),
            height = bounds.height(),
            "mind map loaded"
        );
        self.try_initial_fit();
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn map(&self) -> &MindMap {
        &self.map
    }

    pub fn tree(&self) -> &MindMapTree {
        self.map.tree()
    }

    /// The persisted form of the current tree.
    pub fn to_node(&self) -> MindMapNode {
        self.map.to_node()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn transform(&self) -> Transform {
        self.viewport.transform()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn editing(&self) -> Option<&InlineEdit> {
        self.editing.as_ref()
    }

    pub fn editing_mut(&mut self) -> Option<&mut InlineEdit> {
        self.editing.as_mut()
    }

    pub fn is_animating(&self) -> bool {
        self.viewport.is_animating() || self.animator.is_animating()
    }

    // Viewport commands.

    /// The host reports the container size; the first known size fits the freshly loaded tree.
    pub fn set_container_size(&mut self, width: f64, height: f64) {
        self.viewport.set_size(width, height);
        self.try_initial_fit();
    }

    fn try_initial_fit(&mut self) {
        let (width, height) = self.viewport.size();
        if !self.needs_initial_fit || width <= 0.0 || height <= 0.0 {
            return;
        }
        self.needs_initial_fit = false;
        self.fit_visible(FitMode::Immediate);
    }

    fn fit_visible(&mut self, mode: FitMode) -> bool {
        let tree = self.map.tree();
        let points = tree
            .visible_ids()
            .into_iter()
            .filter_map(|id| tree.node(id).map(|node| node.position()))
            .collect::<Vec<_>>();
        self.viewport.fit(points, mode)
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    /// Animated fit over every visible node.
    pub fn reset_view(&mut self) {
        self.fit_visible(FitMode::Animated);
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.viewport.pan_by(dx, dy);
    }

    /// Wheel/pinch zoom anchored at `anchor`. Positive steps zoom in.
    pub fn wheel(&mut self, steps: i32, anchor: Point) {
        let viewport = self.viewport.config();
        let factor = if steps >= 0 { viewport.zoom_in_factor } else { viewport.zoom_out_factor };
        self.viewport.zoom_by(factor.powf(f64::from(steps.unsigned_abs())), anchor);
    }

    // Structural commands.

    /// Applies an op batch, re-lays out and animates the change. The viewport is left alone.
    pub fn apply(&mut self, ops: &[Op]) -> ApplyResult {
        let result = apply_ops(&mut self.map, ops);
        if result.applied == 0 {
            return result;
        }

        layout_mind_map(self.map.tree_mut(), &self.config.layout);
        self.selection.retain_existing(self.map.tree());
        let tree = self.map.tree();
        if self.editing.as_ref().is_some_and(|edit| !tree.contains(edit.node_id())) {
            debug!("inline edit dropped: node deleted");
            self.editing = None;
        }
        self.animator.install(Scene::from_tree(self.map.tree()));
        result
    }

    pub fn add_child(&mut self, parent_id: NodeId) -> ApplyResult {
        self.apply(&[Op::AddChild { parent_id }])
    }

    pub fn add_sibling(&mut self, node_id: NodeId) -> ApplyResult {
        self.apply(&[Op::AddSibling { node_id }])
    }

    pub fn detach_node(&mut self, node_id: NodeId) -> ApplyResult {
        self.apply(&[Op::Detach { node_id }])
    }

    pub fn delete_nodes(&mut self, node_ids: &[NodeId]) -> ApplyResult {
        self.apply(&[Op::DeleteNodes { node_ids: node_ids.to_vec() }])
    }

    /// Recolors each listed subtree; `None` clears. Applied in iteration order as one batch.
    pub fn change_colors(
        &mut self,
        colors: impl IntoIterator<Item = (NodeId, Option<String>)>,
    ) -> ApplyResult {
        let ops = colors
            .into_iter()
            .map(|(node_id, color)| Op::Recolor { node_id, color })
            .collect::<Vec<_>>();
        self.apply(&ops)
    }

    pub fn update_node_data(&mut self, node_id: NodeId, patch: NodePatch) -> ApplyResult {
        self.apply(&[Op::UpdateNodeData { node_id, patch }])
    }

    /// Expands or collapses one node. Opening a branch eases the view onto it and its visible
    /// children; collapsing leaves the view alone.
    pub fn toggle_collapse(&mut self, node_id: NodeId) -> ApplyResult {
        let result = self.apply(&[Op::ToggleCollapse { node_id }]);
        if result.applied == 0 {
            return result;
        }

        let tree = self.map.tree();
        let points = tree
            .node(node_id)
            .filter(|node| node.branch().is_expanded())
            .map(|node| {
                std::iter::once(node.position())
                    .chain(node.visible_children().iter().filter_map(|id| tree.node(*id)).map(|c| c.position()))
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();
        if !points.is_empty() {
            self.viewport.fit(points, FitMode::Animated);
        }
        result
    }

    // Selection and inline edit.

    /// Selecting finishes any inline edit first; editing and selection never overlap.
    pub fn select_node(&mut self, node_id: NodeId, additive: bool) {
        if !self.map.tree().contains(node_id) {
            debug!(%node_id, "select: unknown node");
            return;
        }
        self.commit_edit();
        self.selection.select_node(node_id, additive);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Moves the primary selection to a visible neighbour, starting from the root.
    pub fn navigate(&mut self, direction: Direction) -> bool {
        let target = match self.selection.primary() {
            Some(from) => neighbor(self.map.tree(), from, direction),
            None => Some(self.map.tree().root_id()),
        };
        match target {
            Some(node_id) => {
                self.select_node(node_id, false);
                true
            }
            None => false,
        }
    }

    /// Starts an inline rename of `node_id`. Clears the selection.
    pub fn edit_node(&mut self, node_id: NodeId) -> bool {
        if !self.map.tree().contains(node_id) {
            debug!(%node_id, "edit: unknown node");
            return false;
        }
        self.commit_edit();
        let Some(node) = self.map.tree().node(node_id) else {
            return false;
        };
        self.editing = Some(InlineEdit::begin(node_id, node.name()));
        self.selection.clear();
        true
    }

    /// Commits the current draft. A blank or unchanged draft leaves the label as it was.
    pub fn commit_edit(&mut self) -> bool {
        let Some(edit) = self.editing.take() else {
            return false;
        };
        match edit.finish() {
            Some(op) => self.apply(&[op]).applied > 0,
            None => false,
        }
    }

    /// Replaces the draft of an edit on `node_id` with `text` and commits it.
    pub fn commit_inline_edit(&mut self, node_id: NodeId, text: &str) -> bool {
        if self.editing.as_ref().map(InlineEdit::node_id) != Some(node_id) && !self.edit_node(node_id) {
            return false;
        }
        if let Some(edit) = self.editing.as_mut() {
            edit.set_draft(text);
        }
        self.commit_edit()
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    // Pointer input, in screen coordinates.

    pub fn pointer_down(&mut self, at: Point) {
        self.pointer.press(at);
    }

    pub fn pointer_move(&mut self, at: Point) {
        if let Some((dx, dy)) = self.pointer.move_to(at) {
            self.viewport.pan_by(dx, dy);
        }
    }

    pub fn pointer_up(&mut self) {
        self.pointer.release();
    }

    /// A click that followed `pointer_up`. `target` is the node under the pointer, if any.
    /// The tail click of a drag is swallowed so a pan never clears the selection.
    pub fn click(&mut self, target: Option<NodeId>, additive: bool) {
        if !self.pointer.take_click() {
            debug!("click after drag suppressed");
            return;
        }
        match target {
            Some(node_id) => self.select_node(node_id, additive),
            None => {
                self.commit_edit();
                self.clear_selection();
            }
        }
    }

    // Frames.

    /// Advances every running animation. Returns `true` if anything on screen changed.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let view = self.viewport.tick(dt);
        let scene = self.animator.tick(dt);
        view || scene
    }

    /// The current frame, with the draft shown in place of the label being edited.
    pub fn frame(&self) -> Frame {
        let mut frame = self.animator.frame();
        if let Some(edit) = &self.editing {
            if let Some(node) = frame.nodes.iter_mut().find(|node| node.view.id == edit.node_id()) {
                node.view.label = format!("{}▏", edit.draft());
            }
        }
        frame
    }

    /// Paint options for the current zoom: labels shrink so boxes stay within one level.
    pub fn paint_options(&self) -> PaintOptions {
        let base = self.config.paint;
        let level_cells = self.config.layout.level_spacing * self.transform().scale / base.cell_width;
        let fits = (level_cells.max(0.0) as usize).saturating_sub(7);
        PaintOptions { max_label_width: fits.clamp(3, base.max_label_width.max(3)), ..base }
    }

    pub fn paint(&self, cols: usize, rows: usize) -> Result<Painted, CanvasError> {
        paint(&self.frame(), self.transform(), cols, rows, &self.paint_options())
    }

    /// The node under a screen point according to the last `paint` of `painted`.
    pub fn hit_test(&self, painted: &Painted, at: Point) -> Option<NodeId> {
        let (col, row) = self.config.paint.cell_of(at);
        painted.hits.node_at(col, row)
    }
}
