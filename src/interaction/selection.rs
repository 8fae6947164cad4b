// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nereid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{MindMapTree, NodeId};

/// Selected node ids in the order they were selected.
///
/// The most recently selected id is the *primary* selection, used as the anchor for keyboard
/// navigation and single-target commands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<NodeId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the selection with `{node_id}`, or toggles membership when `additive`.
    pub fn select_node(&mut self, node_id: NodeId, additive: bool) {
        if !additive {
            self.ids.clear();
            self.ids.push(node_id);
            return;
        }
        if let Some(idx) = self.ids.iter().position(|id| *id == node_id) {
            self.ids.remove(idx);
        } else {
            self.ids.push(node_id);
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, node_id: NodeId) -> bool {
        self.ids.contains(&node_id)
    }

    pub fn ids(&self) -> &[NodeId] {
        &self.ids
    }

    pub fn primary(&self) -> Option<NodeId> {
        self.ids.last().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Drops ids that are no longer in `tree` (deleted by an edit).
    pub fn retain_existing(&mut self, tree: &MindMapTree) {
        self.ids.retain(|id| tree.contains(*id));
    }
}
