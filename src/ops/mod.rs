// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nereid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Structural mutation operations for mind maps.
//!
//! Operations are applied copy-on-write: the live tree is cloned, every op is applied to the
//! clone, and the clone replaces the live tree only if something actually changed. Unknown ids
//! and structurally impossible requests (deleting the root, detaching a top-level node, adding
//! a sibling to the root) are no-ops rather than errors, because ids may come from UI elements
//! that raced with an unrelated edit.

use std::collections::BTreeSet;

use tracing::debug;

use crate::model::{MindMap, MindMapTree, NodeId};

/// Label given to nodes created by [`Op::AddChild`] and [`Op::AddSibling`].
pub const DEFAULT_NODE_LABEL: &str = "New node";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    /// Appends a placeholder child; a collapsed parent is expanded so the child shows up.
    AddChild { parent_id: NodeId },
    /// Inserts a placeholder node right after `node_id` under the same parent.
    AddSibling { node_id: NodeId },
    /// Moves a subtree one level up, right after its former parent.
    Detach { node_id: NodeId },
    /// Removes nodes together with their subtrees. The root is always skipped.
    DeleteNodes { node_ids: Vec<NodeId> },
    /// Sets (or clears) the color of a node and overwrites it on every descendant.
    Recolor { node_id: NodeId, color: Option<String> },
    UpdateNodeData { node_id: NodeId, patch: NodePatch },
    Rename { node_id: NodeId, name: String },
    /// Swaps a node's children between expanded and collapsed. Not recursive.
    ToggleCollapse { node_id: NodeId },
}

/// Shallow patch for [`Op::UpdateNodeData`].
///
/// For `image`/`link`, `None` leaves the field alone and `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodePatch {
    pub name: Option<String>,
    pub image: Option<Option<String>>,
    pub link: Option<Option<String>>,
}

impl NodePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.image.is_none() && self.link.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyResult {
    pub new_rev: u64,
    pub applied: usize,
    pub delta: Delta,
}

/// What a batch of ops did to a tree, without the revision bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OpsOutcome {
    pub applied: usize,
    pub delta: Delta,
}

/// Minimal delta describing which nodes changed as the result of applying ops.
///
/// Nodes whose position may have moved because of an edit elsewhere are not listed; the render
/// adapter diffs positions itself.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Delta {
    pub added: Vec<NodeId>,
    pub removed: Vec<NodeId>,
    pub updated: Vec<NodeId>,
}

impl Delta {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.updated.is_empty()
    }
}

#[derive(Debug, Default)]
struct DeltaBuilder {
    added: BTreeSet<NodeId>,
    removed: BTreeSet<NodeId>,
    updated: BTreeSet<NodeId>,
}

impl DeltaBuilder {
    fn record_added(&mut self, node_id: NodeId) {
        self.removed.remove(&node_id);
        self.updated.remove(&node_id);
        self.added.insert(node_id);
    }

    fn record_removed(&mut self, node_id: NodeId) {
        self.updated.remove(&node_id);
        // Created and deleted within the same batch: nothing to report.
        if self.added.remove(&node_id) {
            return;
        }
        self.removed.insert(node_id);
    }

    fn record_updated(&mut self, node_id: NodeId) {
        if self.added.contains(&node_id) || self.removed.contains(&node_id) {
            return;
        }
        self.updated.insert(node_id);
    }

    fn finish(self) -> Delta {
        Delta {
            added: self.added.into_iter().collect(),
            removed: self.removed.into_iter().collect(),
            updated: self.updated.into_iter().collect(),
        }
    }
}

/// Applies `ops` to a clone of `tree` and returns the clone.
///
/// `tree` itself is never touched, so a caller holding it (an in-flight render, say) keeps a
/// consistent snapshot.
pub fn apply_ops_to_tree(tree: &MindMapTree, ops: &[Op]) -> (MindMapTree, OpsOutcome) {
    let mut next = tree.clone();
    let mut delta = DeltaBuilder::default();
    let mut applied = 0;

    for op in ops {
        if apply_op(&mut next, op, &mut delta) {
            applied += 1;
        } else {
            debug!(?op, "op had no effect");
        }
    }

    (next, OpsOutcome { applied, delta: delta.finish() })
}

/// Applies `ops` to the live tree of `map` (copy-on-write) and bumps its revision if anything
/// changed.
///
/// Positions in the new tree are stale until the next layout pass.
pub fn apply_ops(map: &mut MindMap, ops: &[Op]) -> ApplyResult {
    if ops.is_empty() {
        return ApplyResult { new_rev: map.rev(), applied: 0, delta: Delta::default() };
    }

    let (next, outcome) = apply_ops_to_tree(map.tree(), ops);
    if outcome.applied == 0 {
        return ApplyResult { new_rev: map.rev(), applied: 0, delta: outcome.delta };
    }

    map.replace_tree(next);
    map.bump_rev();
    debug!(
        rev = map.rev(),
        applied = outcome.applied,
        added = outcome.delta.added.len(),
        removed = outcome.delta.removed.len(),
        updated = outcome.delta.updated.len(),
        "applied mind map ops"
    );

    ApplyResult { new_rev: map.rev(), applied: outcome.applied, delta: outcome.delta }
}

fn apply_op(tree: &mut MindMapTree, op: &Op, delta: &mut DeltaBuilder) -> bool {
    match op {
        Op::AddChild { parent_id } => add_child(tree, *parent_id, delta),
        Op::AddSibling { node_id } => add_sibling(tree, *node_id, delta),
        Op::Detach { node_id } => detach_node(tree, *node_id, delta),
        Op::DeleteNodes { node_ids } => delete_nodes(tree, node_ids, delta),
        Op::Recolor { node_id, color } => recolor_subtree(tree, *node_id, color.as_deref(), delta),
        Op::UpdateNodeData { node_id, patch } => update_node_data(tree, *node_id, patch, delta),
        Op::Rename { node_id, name } => rename_node(tree, *node_id, name, delta),
        Op::ToggleCollapse { node_id } => toggle_collapse(tree, *node_id, delta),
    }
}

// Per-op implementations for structural edits.
include!("ops_impl.rs");

#[cfg(test)]
mod tests;
