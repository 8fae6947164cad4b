// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nereid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{MindMapTree, NodeId, Point};

use super::Bounds;

/// Spacing constants for the tidy-tree layout.
///
/// The tree grows left to right: depth maps to `x`, sibling order maps to `y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Distance between adjacent siblings along `y`.
    pub sibling_spacing: f64,
    /// Distance between depth levels along `x`.
    pub level_spacing: f64,
    /// Gap between neighbouring subtrees below the sibling level, in sibling units.
    pub cousin_separation: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self { sibling_spacing: 56.0, level_spacing: 200.0, cousin_separation: 1.5 }
    }
}

/// Occupied extent of one depth level of a subtree, relative to the subtree root.
#[derive(Debug, Clone, Copy)]
struct Extent {
    min: f64,
    max: f64,
}

impl Extent {
    fn shifted(self, by: f64) -> Self {
        Self { min: self.min + by, max: self.max + by }
    }

    fn union(self, other: Self) -> Self {
        Self { min: self.min.min(other.min), max: self.max.max(other.max) }
    }
}

/// A laid-out subtree in sibling units: the root sits at offset `0.0`.
#[derive(Debug, Default)]
struct SubtreeShape {
    offsets: Vec<(NodeId, f64)>,
    contour: Vec<Extent>,
}

impl SubtreeShape {
    fn leaf(id: NodeId) -> Self {
        Self { offsets: vec![(id, 0.0)], contour: vec![Extent { min: 0.0, max: 0.0 }] }
    }
}

/// Smallest shift that keeps `right` clear of `left` on every shared level.
fn required_shift(left: &[Extent], right: &[Extent], config: &LayoutConfig) -> f64 {
    left.iter()
        .zip(right)
        .enumerate()
        .map(|(level, (l, r))| {
            let gap = if level == 0 { 1.0 } else { config.cousin_separation };
            l.max - r.min + gap
        })
        .fold(f64::NEG_INFINITY, f64::max)
}

fn merge_contour(acc: &mut Vec<Extent>, next: &[Extent], shift: f64) {
    for (level, extent) in next.iter().enumerate() {
        let extent = extent.shifted(shift);
        match acc.get_mut(level) {
            Some(existing) => *existing = existing.union(extent),
            None => acc.push(extent),
        }
    }
}

fn shape_subtree(tree: &MindMapTree, id: NodeId, config: &LayoutConfig) -> SubtreeShape {
    let Some(node) = tree.node(id) else {
        return SubtreeShape::default();
    };
    let children = node.visible_children();
    if children.is_empty() {
        return SubtreeShape::leaf(id);
    }

    let shapes = children
        .iter()
        .map(|child| shape_subtree(tree, *child, config))
        .filter(|shape| !shape.offsets.is_empty())
        .collect::<Vec<_>>();
    if shapes.is_empty() {
        return SubtreeShape::leaf(id);
    }

    let mut child_offsets = Vec::with_capacity(shapes.len());
    let mut forest = Vec::<Extent>::new();
    for shape in &shapes {
        let shift = if forest.is_empty() {
            0.0
        } else {
            required_shift(&forest, &shape.contour, config)
        };
        merge_contour(&mut forest, &shape.contour, shift);
        child_offsets.push(shift);
    }

    // Parent is centered between its first and last child.
    let first = child_offsets.first().copied().unwrap_or(0.0);
    let last = child_offsets.last().copied().unwrap_or(0.0);
    let center = (first + last) / 2.0;

    let mut out = SubtreeShape::leaf(id);
    for (shape, offset) in shapes.into_iter().zip(child_offsets) {
        let shift = offset - center;
        out.offsets.extend(shape.offsets.into_iter().map(|(id, y)| (id, y + shift)));
    }
    out.contour.extend(forest.into_iter().map(|extent| extent.shifted(-center)));
    out
}

/// Assigns positions to every node reachable through expanded branches.
///
/// The root is pinned at the origin so that edits elsewhere in the tree never move it. Nodes in
/// collapsed branches keep whatever position they had. Returns the bounds of the laid-out
/// nodes.
pub fn layout_mind_map(tree: &mut MindMapTree, config: &LayoutConfig) -> Bounds {
    let shape = shape_subtree(tree, tree.root_id(), config);

    let mut bounds = Bounds::EMPTY;
    for (id, offset) in shape.offsets {
        let Some(node) = tree.node_mut(id) else {
            continue;
        };
        let position = Point::new(
            node.depth() as f64 * config.level_spacing,
            offset * config.sibling_spacing,
        );
        node.set_position(position);
        bounds = bounds.include(position);
    }
    bounds
}
