// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nereid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use tracing::debug;

use super::ids::{IdAllocator, NodeId};
use super::node::MindMapNode;

/// A point in layout space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Linear interpolation from `self` (t = 0) to `other` (t = 1).
    pub fn lerp(self, other: Point, t: f64) -> Point {
        Point::new(self.x + (other.x - self.x) * t, self.y + (other.y - self.y) * t)
    }
}

/// Child slot of a node.
///
/// A node with children keeps them either expanded (visible, laid out, rendered) or collapsed
/// (parked, ignored by layout). Never both.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Branch {
    #[default]
    Leaf,
    Expanded(Vec<NodeId>),
    Collapsed(Vec<NodeId>),
}

impl Branch {
    fn from_children(children: Vec<NodeId>, expanded: bool) -> Self {
        match (children.is_empty(), expanded) {
            (true, _) => Self::Leaf,
            (false, true) => Self::Expanded(children),
            (false, false) => Self::Collapsed(children),
        }
    }

    /// All children regardless of collapse state, in order.
    pub fn children(&self) -> &[NodeId] {
        match self {
            Self::Leaf => &[],
            Self::Expanded(children) | Self::Collapsed(children) => children,
        }
    }

    pub fn visible(&self) -> &[NodeId] {
        match self {
            Self::Expanded(children) => children,
            _ => &[],
        }
    }

    pub fn hidden(&self) -> &[NodeId] {
        match self {
            Self::Collapsed(children) => children,
            _ => &[],
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf)
    }

    pub fn is_collapsed(&self) -> bool {
        matches!(self, Self::Collapsed(_))
    }

    pub fn is_expanded(&self) -> bool {
        matches!(self, Self::Expanded(_))
    }

    /// Swaps expanded/collapsed. Leaves stay leaves.
    fn toggle(&mut self) {
        *self = match std::mem::take(self) {
            Self::Leaf => Self::Leaf,
            Self::Expanded(children) => Self::Collapsed(children),
            Self::Collapsed(children) => Self::Expanded(children),
        };
    }

    /// Expands the branch and hands out its child list for editing.
    ///
    /// The caller must call [`Branch::normalize`] afterwards if it may have emptied the list.
    fn expanded_children_mut(&mut self) -> &mut Vec<NodeId> {
        *self = match std::mem::take(self) {
            Self::Leaf => Self::Expanded(Vec::new()),
            Self::Expanded(children) | Self::Collapsed(children) => Self::Expanded(children),
        };
        match self {
            Self::Expanded(children) => children,
            _ => unreachable!("branch was just expanded"),
        }
    }

    /// Child list for editing without touching the collapse state.
    fn children_mut(&mut self) -> Option<&mut Vec<NodeId>> {
        match self {
            Self::Leaf => None,
            Self::Expanded(children) | Self::Collapsed(children) => Some(children),
        }
    }

    fn normalize(&mut self) {
        if !self.is_leaf() && self.children().is_empty() {
            *self = Self::Leaf;
        }
    }
}

/// Runtime form of a node: the persisted fields plus identity, depth, collapse state and the
/// most recent layout position.
///
/// There is deliberately no parent field; parents are resolved by walking from the root.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedNode {
    id: NodeId,
    name: String,
    color: Option<String>,
    image: Option<String>,
    link: Option<String>,
    depth: usize,
    branch: Branch,
    position: Point,
}

impl AnnotatedNode {
    fn new(id: NodeId, name: String, depth: usize) -> Self {
        Self {
            id,
            name,
            color: None,
            image: None,
            link: None,
            depth,
            branch: Branch::Leaf,
            position: Point::default(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn branch(&self) -> &Branch {
        &self.branch
    }

    pub fn visible_children(&self) -> &[NodeId] {
        self.branch.visible()
    }

    pub fn hidden_children(&self) -> &[NodeId] {
        self.branch.hidden()
    }

    pub fn children(&self) -> &[NodeId] {
        self.branch.children()
    }

    pub fn has_children(&self) -> bool {
        !self.branch.is_leaf()
    }

    /// Layout position. Only meaningful for visible nodes after a layout pass.
    pub fn position(&self) -> Point {
        self.position
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub(crate) fn set_color(&mut self, color: Option<String>) {
        self.color = color;
    }

    pub(crate) fn set_image(&mut self, image: Option<String>) {
        self.image = image;
    }

    pub(crate) fn set_link(&mut self, link: Option<String>) {
        self.link = link;
    }

    pub(crate) fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub(crate) fn toggle_branch(&mut self) {
        self.branch.toggle();
    }

    pub(crate) fn expanded_children_mut(&mut self) -> &mut Vec<NodeId> {
        self.branch.expanded_children_mut()
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut Vec<NodeId>> {
        self.branch.children_mut()
    }

    pub(crate) fn normalize_branch(&mut self) {
        self.branch.normalize();
    }
}

/// A node together with its (computed) parent.
#[derive(Debug, Clone, Copy)]
pub struct NodeLookup<'a> {
    pub node: &'a AnnotatedNode,
    pub parent: Option<&'a AnnotatedNode>,
}

/// Id-indexed arena holding one loaded mind map.
///
/// `Clone` is a full deep copy (ids, depth, positions, collapse state, color/image/link and the
/// id counter), which is what the copy-on-write edit path relies on.
#[derive(Debug, Clone, PartialEq)]
pub struct MindMapTree {
    root: NodeId,
    nodes: BTreeMap<NodeId, AnnotatedNode>,
    ids: IdAllocator,
}

impl MindMapTree {
    /// Builds the annotated tree for a freshly loaded diagram.
    ///
    /// Ids restart at zero and are assigned depth-first. The root's children start expanded;
    /// every deeper branch starts collapsed.
    pub fn build(raw: &MindMapNode) -> Self {
        let mut tree = Self {
            root: NodeId::new(0),
            nodes: BTreeMap::new(),
            ids: IdAllocator::new(),
        };
        tree.root = tree.insert_raw(raw, 0);
        debug!(nodes = tree.nodes.len(), "built mind map tree");
        tree
    }

    fn insert_raw(&mut self, raw: &MindMapNode, depth: usize) -> NodeId {
        let id = self.ids.next_id();
        let mut node = AnnotatedNode::new(id, raw.name.clone(), depth);
        node.color = raw.color.clone();
        node.image = raw.image.clone();
        node.link = raw.link.clone();
        self.nodes.insert(id, node);

        let children = raw
            .children
            .iter()
            .map(|child| self.insert_raw(child, depth + 1))
            .collect::<Vec<_>>();
        if let Some(node) = self.nodes.get_mut(&id) {
            node.branch = Branch::from_children(children, depth == 0);
        }
        id
    }

    /// Converts back into the persisted form, including collapsed branches.
    pub fn flatten(&self) -> MindMapNode {
        self.flatten_from(self.root)
    }

    fn flatten_from(&self, id: NodeId) -> MindMapNode {
        let Some(node) = self.nodes.get(&id) else {
            return MindMapNode::default();
        };
        MindMapNode {
            name: node.name.clone(),
            children: node.children().iter().map(|child| self.flatten_from(*child)).collect(),
            color: node.color.clone(),
            image: node.image.clone(),
            link: node.link.clone(),
        }
    }

    pub fn root_id(&self) -> NodeId {
        self.root
    }

    pub fn root(&self) -> &AnnotatedNode {
        // The root is inserted by `build` and is never removable.
        &self.nodes[&self.root]
    }

    pub fn node(&self, id: NodeId) -> Option<&AnnotatedNode> {
        self.nodes.get(&id)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut AnnotatedNode> {
        self.nodes.get_mut(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes ordered by id.
    pub fn nodes(&self) -> impl Iterator<Item = &AnnotatedNode> {
        self.nodes.values()
    }

    /// Depth-first search from the root; `parent` is `None` only for the root.
    pub fn find_node_and_parent(&self, id: NodeId) -> Option<NodeLookup<'_>> {
        let mut stack = vec![(self.root, None::<NodeId>)];
        while let Some((current, parent)) = stack.pop() {
            let node = self.nodes.get(&current)?;
            if current == id {
                let parent = parent.and_then(|parent| self.nodes.get(&parent));
                return Some(NodeLookup { node, parent });
            }
            for child in node.children().iter().rev() {
                stack.push((*child, Some(current)));
            }
        }
        None
    }

    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.find_node_and_parent(id)
            .and_then(|lookup| lookup.parent)
            .map(AnnotatedNode::id)
    }

    /// Ids of the subtree rooted at `id` (pre-order, `id` first), across collapsed branches.
    pub fn subtree_ids(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.get(&current) else {
                continue;
            };
            out.push(current);
            stack.extend(node.children().iter().rev().copied());
        }
        out
    }

    /// Ids reachable through expanded branches only (pre-order from the root).
    pub fn visible_ids(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![self.root];
        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.get(&current) else {
                continue;
            };
            out.push(current);
            stack.extend(node.visible_children().iter().rev().copied());
        }
        out
    }

    pub fn is_visible(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            let Some(lookup) = self.find_node_and_parent(current) else {
                return false;
            };
            let Some(parent) = lookup.parent else {
                return true;
            };
            if !parent.branch.is_expanded() {
                return false;
            }
            current = parent.id;
        }
    }

    /// Inserts a detached leaf with a fresh id. The caller links it into a child list.
    pub(crate) fn allocate_leaf(&mut self, name: impl Into<String>, depth: usize) -> NodeId {
        let id = self.ids.next_id();
        self.nodes.insert(id, AnnotatedNode::new(id, name.into(), depth));
        id
    }

    /// Drops the arena entries of a subtree. The caller unlinks it from its parent first.
    pub(crate) fn remove_subtree(&mut self, id: NodeId) -> Vec<NodeId> {
        let removed = self.subtree_ids(id);
        for removed_id in &removed {
            self.nodes.remove(removed_id);
        }
        removed
    }

    /// Re-stamps depth for a subtree whose root now sits at `depth`.
    pub(crate) fn restamp_depth(&mut self, id: NodeId, depth: usize) {
        let mut stack = vec![(id, depth)];
        while let Some((current, depth)) = stack.pop() {
            let Some(node) = self.nodes.get_mut(&current) else {
                continue;
            };
            node.depth = depth;
            stack.extend(node.children().iter().map(|child| (*child, depth + 1)));
        }
    }

    /// Checks the structural invariants: every node reachable exactly once, consistent depth,
    /// no empty expanded/collapsed branches.
    pub fn validate(&self) -> Result<(), TreeInvariantError> {
        let mut seen = BTreeSet::new();
        let mut stack = vec![(self.root, 0usize)];
        while let Some((current, depth)) = stack.pop() {
            let Some(node) = self.nodes.get(&current) else {
                return Err(TreeInvariantError::DanglingChild { node_id: current });
            };
            if !seen.insert(current) {
                return Err(TreeInvariantError::SharedNode { node_id: current });
            }
            if node.depth != depth {
                return Err(TreeInvariantError::DepthMismatch {
                    node_id: current,
                    expected: depth,
                    found: node.depth,
                });
            }
            if !node.branch.is_leaf() && node.children().is_empty() {
                return Err(TreeInvariantError::EmptyBranch { node_id: current });
            }
            stack.extend(node.children().iter().map(|child| (*child, depth + 1)));
        }
        if let Some(orphan) = self.nodes.keys().find(|id| !seen.contains(id)) {
            return Err(TreeInvariantError::Unreachable { node_id: *orphan });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeInvariantError {
    DanglingChild { node_id: NodeId },
    SharedNode { node_id: NodeId },
    DepthMismatch { node_id: NodeId, expected: usize, found: usize },
    EmptyBranch { node_id: NodeId },
    Unreachable { node_id: NodeId },
}

impl fmt::Display for TreeInvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DanglingChild { node_id } => write!(f, "child {node_id} is not in the arena"),
            Self::SharedNode { node_id } => write!(f, "node {node_id} has more than one parent"),
            Self::DepthMismatch { node_id, expected, found } => {
                write!(f, "node {node_id} has depth {found}, expected {expected}")
            }
            Self::EmptyBranch { node_id } => {
                write!(f, "node {node_id} has an empty expanded/collapsed branch")
            }
            Self::Unreachable { node_id } => write!(f, "node {node_id} is unreachable from root"),
        }
    }
}

impl std::error::Error for TreeInvariantError {}
