// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nereid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! The persisted [`MindMapNode`] tree is turned into an id-indexed [`MindMapTree`] arena that
//! carries identity, depth, collapse state and layout positions.

#[cfg(test)]
pub(crate) mod fixtures;
pub mod ids;
pub mod mind_map;
pub mod node;
pub mod tree;

pub use ids::{IdAllocator, NodeId};
pub use mind_map::MindMap;
pub use node::MindMapNode;
pub use tree::{AnnotatedNode, Branch, MindMapTree, NodeLookup, Point, TreeInvariantError};
