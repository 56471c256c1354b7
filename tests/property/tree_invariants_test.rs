//! Property-based tests for the tree mutation engine.
//!
//! These tests drive a `BookmarkTree` through arbitrary sequences of add,
//! update, move and remove calls and check after every step that:
//! - each sibling sequence is numbered 0..n and its `parent_id`s match the nesting,
//! - no node sits deeper than the configured limit,
//! - ids stay unique and no node is its own ancestor,
//! - a rejected call leaves the tree exactly as it was.

use proptest::prelude::*;

use treemark::managers::tree_manager::{BookmarkTree, TreeManagerTrait};
use treemark::managers::tree_query;
use treemark::types::drag::DropPosition;
use treemark::types::node::{BookmarkNode, FolderNode, NodeUpdate, TreeNode};

#[derive(Debug, Clone)]
enum Op {
    Add { folder: bool, parent: Option<usize> },
    Rename { pick: usize },
    Move { source: usize, target: Option<usize>, position: DropPosition },
    Remove { pick: usize },
}

fn arb_position() -> impl Strategy<Value = DropPosition> {
    prop_oneof![
        Just(DropPosition::Before),
        Just(DropPosition::After),
        Just(DropPosition::Inside),
    ]
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (any::<bool>(), proptest::option::of(0usize..64))
            .prop_map(|(folder, parent)| Op::Add { folder, parent }),
        1 => (0usize..64).prop_map(|pick| Op::Rename { pick }),
        4 => (0usize..64, proptest::option::of(0usize..64), arb_position())
            .prop_map(|(source, target, position)| Op::Move { source, target, position }),
        1 => (0usize..64).prop_map(|pick| Op::Remove { pick }),
    ]
}

fn all_ids(tree: &BookmarkTree) -> Vec<String> {
    let mut ids = Vec::new();
    tree_query::walk(tree.items(), &mut |n, _| ids.push(n.id().to_string()));
    ids
}

fn pick(ids: &[String], index: usize) -> Option<String> {
    if ids.is_empty() {
        None
    } else {
        Some(ids[index % ids.len()].clone())
    }
}

fn check_sequence(nodes: &[TreeNode], parent: Option<&str>, depth: usize, max: usize) {
    for (index, node) in nodes.iter().enumerate() {
        assert_eq!(node.position(), index, "position of {}", node.id());
        assert_eq!(node.parent_id(), parent, "parent of {}", node.id());
        assert!(depth < max, "{} at depth {} breaks limit {}", node.id(), depth, max);
        if let Some(children) = node.children() {
            check_sequence(children, Some(node.id()), depth + 1, max);
        }
    }
}

fn check_invariants(tree: &BookmarkTree) {
    check_sequence(tree.items(), None, 0, tree.max_depth());
    assert!(tree_query::first_duplicate_id(tree.items()).is_none());
    for id in all_ids(tree) {
        assert!(!tree.is_ancestor(&id, &id).unwrap());
        // depth_of must agree with the nesting-based depth and never fail.
        tree.depth_of(&id).unwrap();
    }
}

fn apply(tree: &mut BookmarkTree, op: &Op, counter: &mut usize) -> Result<(), String> {
    let ids = all_ids(tree);
    match op {
        Op::Add { folder, parent } => {
            *counter += 1;
            let id = format!("n{}", counter);
            let parent_id = parent.and_then(|p| pick(&ids, p));
            let node = if *folder {
                TreeNode::Folder(FolderNode {
                    id: id.clone(),
                    name: id,
                    position: 0,
                    parent_id,
                    is_expanded: true,
                    children: vec![],
                })
            } else {
                TreeNode::Bookmark(BookmarkNode {
                    id: id.clone(),
                    name: id.clone(),
                    position: 0,
                    parent_id,
                    url: format!("https://{}.example", id),
                    icon: None,
                    description: None,
                    tags: None,
                })
            };
            tree.add_item(node).map_err(|e| e.to_string())
        }
        Op::Rename { pick: p } => match pick(&ids, *p) {
            Some(id) => tree
                .update_item(&id, NodeUpdate::common().name("renamed"))
                .map_err(|e| e.to_string()),
            None => Ok(()),
        },
        Op::Move { source, target, position } => {
            let source_id = match pick(&ids, *source) {
                Some(id) => id,
                None => return Ok(()),
            };
            let target_id = target.and_then(|t| pick(&ids, t));
            tree.move_item(&source_id, target_id.as_deref(), *position)
                .map_err(|e| e.to_string())
        }
        Op::Remove { pick: p } => match pick(&ids, *p) {
            Some(id) => tree.remove_item(&id).map(|_| ()).map_err(|e| e.to_string()),
            None => Ok(()),
        },
    }
}

// *For any* sequence of operations, the tree stays well-formed and every
// rejected operation is free of side effects.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn tree_stays_consistent_under_random_operations(
        ops in proptest::collection::vec(arb_op(), 1..60),
    ) {
        let mut tree = BookmarkTree::new();
        let mut counter = 0;

        for op in &ops {
            let before = tree.clone();
            if apply(&mut tree, op, &mut counter).is_err() {
                prop_assert_eq!(&tree, &before, "rejected {:?} mutated the tree", op);
            }
            check_invariants(&tree);
        }
    }

    #[test]
    fn move_keeps_node_count(
        ops in proptest::collection::vec(arb_op(), 1..40),
        source in 0usize..64,
        target in proptest::option::of(0usize..64),
        position in arb_position(),
    ) {
        let mut tree = BookmarkTree::new();
        let mut counter = 0;
        for op in &ops {
            let _ = apply(&mut tree, op, &mut counter);
        }
        let count = tree.len();
        let _ = apply(&mut tree, &Op::Move { source, target, position }, &mut counter);
        prop_assert_eq!(tree.len(), count);
    }
}
