// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nereid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Per-op helpers used by `apply_ops_to_tree`.
/// Each returns `true` if it changed the tree and `false` for a documented no-op.
fn add_child(tree: &mut MindMapTree, parent_id: NodeId, delta: &mut DeltaBuilder) -> bool {
    let Some(parent) = tree.node(parent_id) else {
        debug!(%parent_id, "add child: unknown parent");
        return false;
    };
    let depth = parent.depth() + 1;

    let child_id = tree.allocate_leaf(DEFAULT_NODE_LABEL, depth);
    if let Some(parent) = tree.node_mut(parent_id) {
        parent.expanded_children_mut().push(child_id);
    }
    delta.record_added(child_id);
    delta.record_updated(parent_id);
    true
}

fn add_sibling(tree: &mut MindMapTree, node_id: NodeId, delta: &mut DeltaBuilder) -> bool {
    let Some(lookup) = tree.find_node_and_parent(node_id) else {
        debug!(%node_id, "add sibling: unknown node");
        return false;
    };
    let Some(parent) = lookup.parent else {
        debug!(%node_id, "add sibling: root has no siblings");
        return false;
    };
    let parent_id = parent.id();
    let depth = lookup.node.depth();

    let sibling_id = tree.allocate_leaf(DEFAULT_NODE_LABEL, depth);
    if let Some(parent) = tree.node_mut(parent_id) {
        let children = parent.expanded_children_mut();
        let index = children.iter().position(|id| *id == node_id).map_or(children.len(), |i| i + 1);
        children.insert(index, sibling_id);
    }
    delta.record_added(sibling_id);
    delta.record_updated(parent_id);
    true
}

fn detach_node(tree: &mut MindMapTree, node_id: NodeId, delta: &mut DeltaBuilder) -> bool {
    let Some(lookup) = tree.find_node_and_parent(node_id) else {
        debug!(%node_id, "detach: unknown node");
        return false;
    };
    let Some(parent) = lookup.parent else {
        debug!(%node_id, "detach: root cannot be detached");
        return false;
    };
    let parent_id = parent.id();
    let new_depth = parent.depth();
    let Some(grandparent_id) = tree.parent_of(parent_id) else {
        debug!(%node_id, "detach: node has no grandparent");
        return false;
    };

    if let Some(parent) = tree.node_mut(parent_id) {
        if let Some(children) = parent.children_mut() {
            children.retain(|id| *id != node_id);
        }
        parent.normalize_branch();
    }
    if let Some(grandparent) = tree.node_mut(grandparent_id) {
        let children = grandparent.expanded_children_mut();
        let index = children.iter().position(|id| *id == parent_id).map_or(children.len(), |i| i + 1);
        children.insert(index, node_id);
    }
    tree.restamp_depth(node_id, new_depth);

    for moved in tree.subtree_ids(node_id) {
        delta.record_updated(moved);
    }
    delta.record_updated(parent_id);
    delta.record_updated(grandparent_id);
    true
}

fn delete_nodes(tree: &mut MindMapTree, node_ids: &[NodeId], delta: &mut DeltaBuilder) -> bool {
    let root_id = tree.root_id();
    let mut targets = node_ids
        .iter()
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .filter(|id| {
            if *id == root_id {
                debug!(node_id = %id, "delete: root is never deletable");
                return false;
            }
            true
        })
        .filter_map(|id| tree.node(id).map(|node| (node.depth(), id)))
        .collect::<Vec<_>>();
    // Deepest first: a descendant goes before the ancestor that would subsume it.
    targets.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

    let mut changed = false;
    for (_, node_id) in targets {
        // Already gone as part of an ancestor removed earlier in this batch.
        let Some(parent_id) = tree.parent_of(node_id) else {
            continue;
        };
        if let Some(parent) = tree.node_mut(parent_id) {
            if let Some(children) = parent.children_mut() {
                children.retain(|id| *id != node_id);
            }
            parent.normalize_branch();
        }
        for removed in tree.remove_subtree(node_id) {
            delta.record_removed(removed);
        }
        delta.record_updated(parent_id);
        changed = true;
    }
    changed
}

fn recolor_subtree(
    tree: &mut MindMapTree,
    node_id: NodeId,
    color: Option<&str>,
    delta: &mut DeltaBuilder,
) -> bool {
    if !tree.contains(node_id) {
        debug!(%node_id, "recolor: unknown node");
        return false;
    }

    let mut changed = false;
    for id in tree.subtree_ids(node_id) {
        let Some(node) = tree.node_mut(id) else {
            continue;
        };
        if node.color() == color {
            continue;
        }
        node.set_color(color.map(ToOwned::to_owned));
        delta.record_updated(id);
        changed = true;
    }
    changed
}

fn update_node_data(
    tree: &mut MindMapTree,
    node_id: NodeId,
    patch: &NodePatch,
    delta: &mut DeltaBuilder,
) -> bool {
    let Some(node) = tree.node_mut(node_id) else {
        debug!(%node_id, "update node data: unknown node");
        return false;
    };

    let mut changed = false;
    if let Some(name) = patch.name.as_deref() {
        if name.trim().is_empty() {
            debug!(%node_id, "update node data: ignoring blank name");
        } else if node.name() != name {
            node.set_name(name);
            changed = true;
        }
    }
    if let Some(image) = &patch.image {
        if node.image() != image.as_deref() {
            node.set_image(image.clone());
            changed = true;
        }
    }
    if let Some(link) = &patch.link {
        if node.link() != link.as_deref() {
            node.set_link(link.clone());
            changed = true;
        }
    }

    if changed {
        delta.record_updated(node_id);
    }
    changed
}

fn rename_node(tree: &mut MindMapTree, node_id: NodeId, name: &str, delta: &mut DeltaBuilder) -> bool {
    let Some(node) = tree.node_mut(node_id) else {
        debug!(%node_id, "rename: unknown node");
        return false;
    };
    if name.trim().is_empty() {
        debug!(%node_id, "rename: blank label rejected");
        return false;
    }
    if node.name() == name {
        return false;
    }
    node.set_name(name);
    delta.record_updated(node_id);
    true
}

fn toggle_collapse(tree: &mut MindMapTree, node_id: NodeId, delta: &mut DeltaBuilder) -> bool {
    let Some(node) = tree.node_mut(node_id) else {
        debug!(%node_id, "toggle collapse: unknown node");
        return false;
    };
    if !node.has_children() {
        return false;
    }
    node.toggle_branch();
    delta.record_updated(node_id);
    true
}
