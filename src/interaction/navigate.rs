// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nereid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{MindMapTree, NodeId};

/// Keyboard movement between visible nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Parent,
    FirstChild,
    PrevSibling,
    NextSibling,
}

/// The visible node one step from `from`, if any. Collapsed children are never entered.
pub fn neighbor(tree: &MindMapTree, from: NodeId, direction: Direction) -> Option<NodeId> {
    let lookup = tree.find_node_and_parent(from)?;
    match direction {
        Direction::Parent => lookup.parent.map(|parent| parent.id()),
        Direction::FirstChild => lookup.node.visible_children().first().copied(),
        Direction::PrevSibling | Direction::NextSibling => {
            let siblings = lookup.parent?.visible_children();
            let idx = siblings.iter().position(|id| *id == from)?;
            let next = match direction {
                Direction::PrevSibling => idx.checked_sub(1)?,
                _ => idx + 1,
            };
            siblings.get(next).copied()
        }
    }
}
