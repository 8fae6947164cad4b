// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nereid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use crate::layout::Bounds;
use crate::model::{MindMapTree, NodeId, Point};

/// Everything a renderer needs to draw one node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeView {
    pub id: NodeId,
    pub label: String,
    pub image: Option<String>,
    pub link: Option<String>,
    pub color: Option<String>,
    pub depth: usize,
    pub position: Point,
    pub has_children: bool,
    /// Number of children parked in a collapsed branch; zero when expanded or a leaf.
    pub hidden_count: usize,
}

impl NodeView {
    pub fn is_collapsed(&self) -> bool {
        self.hidden_count > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct EdgeView {
    pub parent: NodeId,
    pub child: NodeId,
}

/// View models for every visible node of a laid-out tree, plus parent→child edges.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    nodes: BTreeMap<NodeId, NodeView>,
    parents: BTreeMap<NodeId, NodeId>,
    /// Pre-order, so parents always precede their children.
    order: Vec<NodeId>,
}

impl Scene {
    /// Snapshots the visible part of `tree`. Positions are taken as-is, so lay the tree out first.
    pub fn from_tree(tree: &MindMapTree) -> Self {
        let mut scene = Self::default();
        let mut stack = vec![(tree.root_id(), None::<NodeId>)];
        while let Some((id, parent)) = stack.pop() {
            let Some(node) = tree.node(id) else {
                continue;
            };
            scene.order.push(id);
            if let Some(parent) = parent {
                scene.parents.insert(id, parent);
            }
            scene.nodes.insert(
                id,
                NodeView {
                    id,
                    label: node.name().to_owned(),
                    image: node.image().map(ToOwned::to_owned),
                    link: node.link().map(ToOwned::to_owned),
                    color: node.color().map(ToOwned::to_owned),
                    depth: node.depth(),
                    position: node.position(),
                    has_children: node.has_children(),
                    hidden_count: node.hidden_children().len(),
                },
            );
            stack.extend(node.visible_children().iter().rev().map(|child| (*child, Some(id))));
        }
        scene
    }

    pub fn node(&self, id: NodeId) -> Option<&NodeView> {
        self.nodes.get(&id)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut NodeView> {
        self.nodes.get_mut(&id)
    }

    /// Nodes in pre-order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeView> {
        self.order.iter().filter_map(|id| self.nodes.get(id))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.parents.get(&id).copied()
    }

    pub fn edges(&self) -> impl Iterator<Item = EdgeView> + '_ {
        self.order
            .iter()
            .filter_map(|child| self.parents.get(child).map(|parent| EdgeView { parent: *parent, child: *child }))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_points(self.nodes.values().map(|node| node.position))
    }
}
