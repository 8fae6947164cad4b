// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nereid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::node::MindMapNode;
use super::tree::MindMapTree;

/// A loaded mind map: the live annotated tree plus a revision counter.
///
/// The tree is only ever replaced wholesale (see [`MindMap::replace_tree`]), so anything holding
/// a reference to the previous tree keeps observing one consistent snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct MindMap {
    tree: MindMapTree,
    rev: u64,
}

impl MindMap {
    pub fn load(raw: &MindMapNode) -> Self {
        Self { tree: MindMapTree::build(raw), rev: 0 }
    }

    pub fn tree(&self) -> &MindMapTree {
        &self.tree
    }

    /// Swaps in a new tree and returns the previous one.
    pub fn replace_tree(&mut self, tree: MindMapTree) -> MindMapTree {
        std::mem::replace(&mut self.tree, tree)
    }

    pub(crate) fn tree_mut(&mut self) -> &mut MindMapTree {
        &mut self.tree
    }

    pub fn to_node(&self) -> MindMapNode {
        self.tree.flatten()
    }

    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn bump_rev(&mut self) {
        self.rev = self.rev.saturating_add(1);
    }
}
