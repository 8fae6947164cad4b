// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nereid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

/// Identity of a node within one loaded mind map.
///
/// Ids are handed out by [`IdAllocator`] in depth-first order when a tree is built and keep
/// counting upwards for nodes created by later edits. They are only meaningful for the tree
/// they were allocated for; loading a new diagram starts over at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Monotonic id counter owned by a tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next = self.next.saturating_add(1);
        id
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> u64 {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::{IdAllocator, NodeId};

    #[test]
    fn node_id_displays_with_a_prefix() {
        assert_eq!(NodeId::new(3).to_string(), "n3");
        assert_eq!(format!("{}", NodeId::new(0)), "n0");
    }

    #[test]
    fn allocator_counts_up_from_zero() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.next_id(), NodeId::new(0));
        assert_eq!(ids.next_id(), NodeId::new(1));
        assert_eq!(ids.issued(), 2);
    }
}
