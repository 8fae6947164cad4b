// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nereid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::node::MindMapNode;

fn leaf(name: &str) -> MindMapNode {
    MindMapNode::new(name)
}

/// `Math` with two top-level topics and no grandchildren.
pub(crate) fn math_small() -> MindMapNode {
    MindMapNode::new("Math").with_children([leaf("Algebra"), leaf("Geometry")])
}

/// Three levels deep with a mix of leaves, branches and optional fields.
pub(crate) fn math_deep() -> MindMapNode {
    MindMapNode::new("Math").with_children([
        MindMapNode::new("Algebra").with_color("#336699").with_children([
            leaf("Linear equations"),
            MindMapNode::new("Polynomials").with_children([leaf("Roots"), leaf("Factoring")]),
        ]),
        MindMapNode::new("Geometry")
            .with_image("https://example.com/triangle.png")
            .with_children([leaf("Triangles"), leaf("Circles")]),
        MindMapNode::new("Calculus").with_link("https://example.com/calculus"),
    ])
}

/// A wide-and-deep tree for layout overlap tests.
pub(crate) fn generated(fanout: usize, depth: usize) -> MindMapNode {
    fn build(prefix: &str, fanout: usize, depth: usize) -> MindMapNode {
        let mut node = MindMapNode::new(prefix);
        if depth > 0 {
            node.children = (0..fanout)
                .map(|idx| build(&format!("{prefix}.{idx}"), fanout, depth - 1))
                .collect();
        }
        node
    }
    build("root", fanout, depth)
}
