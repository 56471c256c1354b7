//! Read-only traversal over a nested bookmark tree, plus the low-level
//! splice helpers the mutation engine builds on.
//!
//! Every function takes the root sibling sequence explicitly; nothing here
//! holds state.

use std::collections::HashSet;

use crate::types::errors::TreeError;
use crate::types::node::TreeNode;

/// Depth-first search for a node by id.
pub fn find_by_id<'a>(nodes: &'a [TreeNode], id: &str) -> Option<&'a TreeNode> {
    for node in nodes {
        if node.id() == id {
            return Some(node);
        }
        if let Some(children) = node.children() {
            if let Some(found) = find_by_id(children, id) {
                return Some(found);
            }
        }
    }
    None
}

/// Mutable variant of [`find_by_id`].
pub fn find_by_id_mut<'a>(nodes: &'a mut [TreeNode], id: &str) -> Option<&'a mut TreeNode> {
    for node in nodes.iter_mut() {
        if node.id() == id {
            return Some(node);
        }
        if let Some(children) = node.children_mut() {
            if let Some(found) = find_by_id_mut(children, id) {
                return Some(found);
            }
        }
    }
    None
}

/// Ids on the `parent_id` chain above `id`, nearest parent first.
///
/// Stops with `CorruptTree` after `bound` hops or on a dangling parent.
pub fn ancestor_chain<'a>(
    nodes: &'a [TreeNode],
    id: &str,
    bound: usize,
) -> Result<Vec<&'a str>, TreeError> {
    let mut current = find_by_id(nodes, id).ok_or_else(|| TreeError::NotFound(id.to_string()))?;
    let mut chain = Vec::new();

    while let Some(parent_id) = current.parent_id() {
        if chain.len() >= bound {
            log::error!("ancestor walk from {} exceeded {} hops", id, bound);
            return Err(TreeError::CorruptTree(format!(
                "ancestor chain of {} exceeds {} hops",
                id, bound
            )));
        }
        current = find_by_id(nodes, parent_id).ok_or_else(|| {
            log::error!("node {} references missing parent {}", current.id(), parent_id);
            TreeError::CorruptTree(format!(
                "node {} references missing parent {}",
                current.id(),
                parent_id
            ))
        })?;
        chain.push(current.id());
    }
    Ok(chain)
}

/// Number of folder ancestors of `id`. Top-level nodes have depth 0.
///
/// `bound` is the hop limit; trees allowing `n` levels pass `n + 1`.
pub fn depth_of(nodes: &[TreeNode], id: &str, bound: usize) -> Result<usize, TreeError> {
    ancestor_chain(nodes, id, bound).map(|chain| chain.len())
}

/// Whether `ancestor_id` appears on the parent chain of `node_id`.
///
/// A node is never its own ancestor. Unknown `node_id` yields `false`.
pub fn is_ancestor(
    nodes: &[TreeNode],
    ancestor_id: &str,
    node_id: &str,
    bound: usize,
) -> Result<bool, TreeError> {
    match ancestor_chain(nodes, node_id, bound) {
        Ok(chain) => Ok(chain.contains(&ancestor_id)),
        Err(TreeError::NotFound(_)) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Levels below `node`: 0 for leaves and empty folders.
pub fn subtree_height(node: &TreeNode) -> usize {
    node.children()
        .and_then(|children| children.iter().map(|c| 1 + subtree_height(c)).max())
        .unwrap_or(0)
}

/// Visits every node depth-first, pre-order, with its depth.
pub fn walk<'a, F>(nodes: &'a [TreeNode], visit: &mut F)
where
    F: FnMut(&'a TreeNode, usize),
{
    walk_at(nodes, 0, visit);
}

fn walk_at<'a, F>(nodes: &'a [TreeNode], depth: usize, visit: &mut F)
where
    F: FnMut(&'a TreeNode, usize),
{
    for node in nodes {
        visit(node, depth);
        if let Some(children) = node.children() {
            walk_at(children, depth + 1, visit);
        }
    }
}

/// Collects the ids of `node` and all its descendants.
pub fn subtree_ids(node: &TreeNode) -> Vec<&str> {
    let mut ids = vec![node.id()];
    if let Some(children) = node.children() {
        walk(children, &mut |n, _| ids.push(n.id()));
    }
    ids
}

/// Returns the first id that occurs more than once in the tree, if any.
pub fn first_duplicate_id(nodes: &[TreeNode]) -> Option<String> {
    let mut seen = HashSet::new();
    let mut duplicate = None;
    walk(nodes, &mut |n, _| {
        if duplicate.is_none() && !seen.insert(n.id()) {
            duplicate = Some(n.id().to_string());
        }
    });
    duplicate
}

/// Deepest depth present in the tree, or `None` for an empty tree.
pub fn max_depth_present(nodes: &[TreeNode]) -> Option<usize> {
    let mut deepest = None;
    walk(nodes, &mut |_, depth| {
        deepest = Some(deepest.map_or(depth, |d: usize| d.max(depth)));
    });
    deepest
}

/// Sibling sequence owned by `parent_id` (`None` = root).
pub fn siblings_mut<'a>(
    root: &'a mut Vec<TreeNode>,
    parent_id: Option<&str>,
) -> Option<&'a mut Vec<TreeNode>> {
    match parent_id {
        None => Some(root),
        Some(pid) => find_by_id_mut(root, pid).and_then(|node| node.children_mut()),
    }
}

/// Removes the node with `id` from wherever it lives and returns it.
pub fn detach(nodes: &mut Vec<TreeNode>, id: &str) -> Option<TreeNode> {
    if let Some(index) = nodes.iter().position(|n| n.id() == id) {
        return Some(nodes.remove(index));
    }
    for node in nodes.iter_mut() {
        if let Some(children) = node.children_mut() {
            if let Some(found) = detach(children, id) {
                return Some(found);
            }
        }
    }
    None
}

/// Rewrites `position` and `parent_id` of one sibling sequence.
pub fn renumber_siblings(siblings: &mut [TreeNode], parent_id: Option<&str>) {
    for (index, node) in siblings.iter_mut().enumerate() {
        node.set_position(index);
        node.set_parent_id(parent_id.map(str::to_string));
    }
}

/// Rewrites `position` and `parent_id` of a sequence and everything below it.
pub fn normalize(siblings: &mut [TreeNode], parent_id: Option<&str>) {
    renumber_siblings(siblings, parent_id);
    for node in siblings.iter_mut() {
        let id = node.id().to_string();
        if let Some(children) = node.children_mut() {
            normalize(children, Some(&id));
        }
    }
}
