// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nereid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::{fixture, rstest};

use crate::model::fixtures::{math_deep, math_small};
use crate::model::{MindMap, MindMapTree, NodeId};

use super::{apply_ops, apply_ops_to_tree, NodePatch, Op, DEFAULT_NODE_LABEL};

fn id_named(tree: &MindMapTree, name: &str) -> NodeId {
    tree.nodes().find(|node| node.name() == name).map(|node| node.id()).expect("node by name")
}

fn names(tree: &MindMapTree, ids: &[NodeId]) -> Vec<String> {
    ids.iter().map(|id| tree.node(*id).expect("node").name().to_owned()).collect()
}

#[fixture]
fn small() -> MindMap {
    MindMap::load(&math_small())
}

#[fixture]
fn deep() -> MindMap {
    MindMap::load(&math_deep())
}

#[rstest]
fn math_scenario_add_delete_recolor(mut small: MindMap) {
    let algebra = id_named(small.tree(), "Algebra");
    let geometry = id_named(small.tree(), "Geometry");

    let result = apply_ops(&mut small, &[Op::AddChild { parent_id: algebra }]);
    assert_eq!(result.applied, 1);
    assert_eq!(result.new_rev, 1);
    let algebra_node = small.tree().node(algebra).expect("algebra");
    assert_eq!(algebra_node.children().len(), 1);
    let new_child = algebra_node.children()[0];
    assert_eq!(small.tree().node(new_child).expect("child").name(), DEFAULT_NODE_LABEL);
    assert_eq!(result.delta.added, vec![new_child]);

    apply_ops(&mut small, &[Op::DeleteNodes { node_ids: vec![geometry] }]);
    let root = small.tree().root();
    assert_eq!(names(small.tree(), root.visible_children()), vec!["Algebra"]);

    apply_ops(
        &mut small,
        &[Op::Recolor { node_id: algebra, color: Some("#ff0000".to_owned()) }],
    );
    assert_eq!(small.tree().node(algebra).expect("algebra").color(), Some("#ff0000"));
    assert_eq!(small.tree().node(new_child).expect("child").color(), Some("#ff0000"));
    small.tree().validate().expect("valid");
}

#[rstest]
fn add_child_expands_collapsed_parent(mut deep: MindMap) {
    let algebra = id_named(deep.tree(), "Algebra");
    assert!(deep.tree().node(algebra).expect("algebra").branch().is_collapsed());

    apply_ops(&mut deep, &[Op::AddChild { parent_id: algebra }]);

    let algebra_node = deep.tree().node(algebra).expect("algebra");
    assert!(algebra_node.branch().is_expanded());
    assert_eq!(
        names(deep.tree(), algebra_node.visible_children()),
        vec!["Linear equations", "Polynomials", DEFAULT_NODE_LABEL]
    );
    let added = *algebra_node.visible_children().last().expect("added");
    assert_eq!(deep.tree().node(added).expect("added").depth(), 2);
}

#[rstest]
fn added_nodes_get_fresh_ids(mut small: MindMap) {
    let root = small.tree().root_id();
    let result = apply_ops(
        &mut small,
        &[Op::AddChild { parent_id: root }, Op::AddChild { parent_id: root }],
    );
    assert_eq!(result.delta.added, vec![NodeId::new(3), NodeId::new(4)]);
    let ids = small.tree().nodes().map(|node| node.id()).collect::<std::collections::BTreeSet<_>>();
    assert_eq!(ids.len(), small.tree().len());
}

#[rstest]
fn add_sibling_inserts_right_after_target(mut small: MindMap) {
    let algebra = id_named(small.tree(), "Algebra");
    let result = apply_ops(&mut small, &[Op::AddSibling { node_id: algebra }]);
    assert_eq!(result.applied, 1);

    let root = small.tree().root();
    assert_eq!(
        names(small.tree(), root.visible_children()),
        vec!["Algebra", DEFAULT_NODE_LABEL, "Geometry"]
    );
    assert_eq!(small.tree().node(result.delta.added[0]).expect("sibling").depth(), 1);
}

#[rstest]
fn add_sibling_to_root_is_a_no_op(mut small: MindMap) {
    let before = small.tree().clone();
    let root = small.tree().root_id();
    let result = apply_ops(&mut small, &[Op::AddSibling { node_id: root }]);
    assert_eq!(result.applied, 0);
    assert_eq!(result.new_rev, 0);
    assert_eq!(small.tree(), &before);
}

#[rstest]
fn detach_promotes_grandchild_after_former_parent(mut deep: MindMap) {
    let algebra = id_named(deep.tree(), "Algebra");
    let polynomials = id_named(deep.tree(), "Polynomials");
    let roots = id_named(deep.tree(), "Roots");
    assert_eq!(deep.tree().node(polynomials).expect("node").depth(), 2);

    let result = apply_ops(&mut deep, &[Op::Detach { node_id: polynomials }]);
    assert_eq!(result.applied, 1);

    let tree = deep.tree();
    assert_eq!(
        names(tree, tree.root().visible_children()),
        vec!["Algebra", "Polynomials", "Geometry", "Calculus"]
    );
    assert_eq!(tree.node(polynomials).expect("node").depth(), 1);
    assert_eq!(tree.node(roots).expect("node").depth(), 2);
    assert_eq!(tree.parent_of(polynomials), Some(tree.root_id()));
    assert_eq!(names(tree, tree.node(algebra).expect("algebra").children()), vec!["Linear equations"]);
    tree.validate().expect("valid");
}

#[rstest]
fn detach_of_last_child_turns_parent_into_leaf(mut deep: MindMap) {
    let algebra = id_named(deep.tree(), "Algebra");
    let linear = id_named(deep.tree(), "Linear equations");
    let polynomials = id_named(deep.tree(), "Polynomials");

    apply_ops(&mut deep, &[Op::Detach { node_id: linear }, Op::Detach { node_id: polynomials }]);

    assert!(deep.tree().node(algebra).expect("algebra").branch().is_leaf());
    deep.tree().validate().expect("valid");
}

#[rstest]
fn detach_of_top_level_node_is_a_no_op(mut small: MindMap) {
    let before = small.tree().clone();
    let algebra = id_named(small.tree(), "Algebra");
    let result = apply_ops(&mut small, &[Op::Detach { node_id: algebra }]);
    assert_eq!(result.applied, 0);
    assert_eq!(small.tree(), &before);
}

#[rstest]
fn delete_root_is_a_no_op(mut deep: MindMap) {
    let before = deep.tree().clone();
    let root = deep.tree().root_id();
    let result = apply_ops(&mut deep, &[Op::DeleteNodes { node_ids: vec![root] }]);
    assert_eq!(result.applied, 0);
    assert_eq!(deep.tree(), &before);
}

#[rstest]
fn delete_skips_root_but_removes_the_rest_of_the_batch(mut small: MindMap) {
    let root = small.tree().root_id();
    let geometry = id_named(small.tree(), "Geometry");
    let result = apply_ops(&mut small, &[Op::DeleteNodes { node_ids: vec![root, geometry] }]);
    assert_eq!(result.applied, 1);
    assert_eq!(result.delta.removed, vec![geometry]);
    assert!(small.tree().contains(root));
}

#[rstest]
fn delete_ancestor_and_descendant_together(mut deep: MindMap) {
    let algebra = id_named(deep.tree(), "Algebra");
    let roots = id_named(deep.tree(), "Roots");
    let before_len = deep.tree().len();

    let result = apply_ops(&mut deep, &[Op::DeleteNodes { node_ids: vec![algebra, roots] }]);

    assert_eq!(result.applied, 1);
    assert_eq!(deep.tree().len(), before_len - 5);
    assert_eq!(result.delta.removed.len(), 5);
    assert_eq!(
        names(deep.tree(), deep.tree().root().visible_children()),
        vec!["Geometry", "Calculus"]
    );
    deep.tree().validate().expect("valid");
}

#[rstest]
fn deleting_every_child_leaves_a_leaf_parent(mut small: MindMap) {
    let algebra = id_named(small.tree(), "Algebra");
    let geometry = id_named(small.tree(), "Geometry");
    apply_ops(&mut small, &[Op::DeleteNodes { node_ids: vec![algebra, geometry] }]);
    assert!(small.tree().root().branch().is_leaf());
    small.tree().validate().expect("valid");
}

#[rstest]
fn recolor_reaches_hidden_descendants_and_overwrites(mut deep: MindMap) {
    let algebra = id_named(deep.tree(), "Algebra");
    apply_ops(&mut deep, &[Op::Recolor { node_id: algebra, color: Some("#00ff00".to_owned()) }]);

    for id in deep.tree().subtree_ids(algebra) {
        assert_eq!(deep.tree().node(id).expect("node").color(), Some("#00ff00"));
    }
    let geometry = id_named(deep.tree(), "Geometry");
    assert_eq!(deep.tree().node(geometry).expect("geometry").color(), None);
}

#[rstest]
fn recolor_with_none_clears_the_subtree(mut deep: MindMap) {
    let root = deep.tree().root_id();
    apply_ops(&mut deep, &[Op::Recolor { node_id: root, color: Some("red".to_owned()) }]);
    apply_ops(&mut deep, &[Op::Recolor { node_id: root, color: None }]);
    assert!(deep.tree().nodes().all(|node| node.color().is_none()));
}

#[rstest]
fn update_node_data_merges_only_given_fields(mut deep: MindMap) {
    let geometry = id_named(deep.tree(), "Geometry");
    let children_before = deep.tree().node(geometry).expect("geometry").children().to_vec();

    apply_ops(
        &mut deep,
        &[Op::UpdateNodeData {
            node_id: geometry,
            patch: NodePatch {
                link: Some(Some("https://example.com/geo".to_owned())),
                ..NodePatch::default()
            },
        }],
    );

    let node = deep.tree().node(geometry).expect("geometry");
    assert_eq!(node.name(), "Geometry");
    assert_eq!(node.image(), Some("https://example.com/triangle.png"));
    assert_eq!(node.link(), Some("https://example.com/geo"));
    assert_eq!(node.children(), children_before.as_slice());

    apply_ops(
        &mut deep,
        &[Op::UpdateNodeData {
            node_id: geometry,
            patch: NodePatch { image: Some(None), ..NodePatch::default() },
        }],
    );
    assert_eq!(deep.tree().node(geometry).expect("geometry").image(), None);
}

#[rstest]
fn rename_rejects_blank_labels(mut small: MindMap) {
    let algebra = id_named(small.tree(), "Algebra");
    let result = apply_ops(&mut small, &[Op::Rename { node_id: algebra, name: "   ".to_owned() }]);
    assert_eq!(result.applied, 0);
    assert_eq!(small.tree().node(algebra).expect("algebra").name(), "Algebra");

    apply_ops(&mut small, &[Op::Rename { node_id: algebra, name: "Linear algebra".to_owned() }]);
    assert_eq!(small.tree().node(algebra).expect("algebra").name(), "Linear algebra");
}

#[rstest]
fn toggle_collapse_twice_restores_partition(deep: MindMap) {
    let algebra = id_named(deep.tree(), "Algebra");
    let original = deep.tree().clone();

    let (once, outcome) = apply_ops_to_tree(&original, &[Op::ToggleCollapse { node_id: algebra }]);
    assert_eq!(outcome.applied, 1);
    let node = once.node(algebra).expect("algebra");
    assert_eq!(node.visible_children().len(), 2);
    assert!(node.hidden_children().is_empty());
    // Only the target flips; its children keep their own (collapsed) state.
    let polynomials = id_named(&once, "Polynomials");
    assert!(once.node(polynomials).expect("polynomials").branch().is_collapsed());

    let (twice, _) = apply_ops_to_tree(&once, &[Op::ToggleCollapse { node_id: algebra }]);
    assert_eq!(twice, original);
    assert_eq!(twice.len(), original.len());
}

#[rstest]
fn toggle_collapse_on_leaf_is_a_no_op(deep: MindMap) {
    let calculus = id_named(deep.tree(), "Calculus");
    let (_, outcome) = apply_ops_to_tree(deep.tree(), &[Op::ToggleCollapse { node_id: calculus }]);
    assert_eq!(outcome.applied, 0);
}

#[rstest]
#[case::add_child(Op::AddChild { parent_id: NodeId::new(404) })]
#[case::add_sibling(Op::AddSibling { node_id: NodeId::new(404) })]
#[case::detach(Op::Detach { node_id: NodeId::new(404) })]
#[case::delete(Op::DeleteNodes { node_ids: vec![NodeId::new(404)] })]
#[case::recolor(Op::Recolor { node_id: NodeId::new(404), color: Some("red".to_owned()) })]
#[case::update(Op::UpdateNodeData {
    node_id: NodeId::new(404),
    patch: NodePatch { name: Some("x".to_owned()), ..NodePatch::default() },
})]
#[case::rename(Op::Rename { node_id: NodeId::new(404), name: "x".to_owned() })]
#[case::toggle(Op::ToggleCollapse { node_id: NodeId::new(404) })]
fn unknown_ids_are_no_ops(mut deep: MindMap, #[case] op: Op) {
    let before = deep.clone();
    let result = apply_ops(&mut deep, &[op]);
    assert_eq!(result.applied, 0);
    assert!(result.delta.is_empty());
    assert_eq!(deep, before);
}

#[rstest]
fn source_tree_is_untouched_by_apply(deep: MindMap) {
    let snapshot = deep.tree().clone();
    let algebra = id_named(&snapshot, "Algebra");
    let (next, _) = apply_ops_to_tree(
        deep.tree(),
        &[Op::AddChild { parent_id: algebra }, Op::DeleteNodes { node_ids: vec![algebra] }],
    );
    assert_eq!(deep.tree(), &snapshot);
    assert!(!next.contains(algebra));
}

#[rstest]
fn added_then_deleted_in_one_batch_leaves_no_trace_in_delta(mut small: MindMap) {
    let algebra = id_named(small.tree(), "Algebra");
    let (_, outcome) = apply_ops_to_tree(small.tree(), &[Op::AddChild { parent_id: algebra }]);
    let added = outcome.delta.added[0];

    let result = apply_ops(
        &mut small,
        &[Op::AddChild { parent_id: algebra }, Op::DeleteNodes { node_ids: vec![added] }],
    );
    assert_eq!(result.applied, 2);
    assert!(result.delta.added.is_empty());
    assert!(result.delta.removed.is_empty());
    assert_eq!(result.delta.updated, vec![algebra]);
}

#[rstest]
fn depth_invariant_holds_after_mixed_edits(mut deep: MindMap) {
    let polynomials = id_named(deep.tree(), "Polynomials");
    let roots = id_named(deep.tree(), "Roots");
    let geometry = id_named(deep.tree(), "Geometry");
    apply_ops(
        &mut deep,
        &[
            Op::AddChild { parent_id: roots },
            Op::Detach { node_id: roots },
            Op::Detach { node_id: roots },
            Op::AddSibling { node_id: polynomials },
            Op::DeleteNodes { node_ids: vec![geometry] },
        ],
    );
    let tree = deep.tree();
    tree.validate().expect("valid");
    for node in tree.nodes() {
        if let Some(parent) = tree.parent_of(node.id()) {
            assert_eq!(node.depth(), tree.node(parent).expect("parent").depth() + 1);
        }
    }
    assert_eq!(tree.parent_of(roots), Some(tree.root_id()));
}
