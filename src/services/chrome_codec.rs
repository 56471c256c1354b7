//! Chrome bookmark interchange.
//!
//! Pure conversion between the internal tree and Chrome's export records.
//! The only discriminator Chrome offers is the presence of `children`, so
//! folders are always exported with a `children` array, even an empty one.

use crate::managers::tree_manager::{BookmarkTree, TreeManagerTrait};
use crate::managers::tree_query;
use crate::types::chrome::ChromeBookmark;
use crate::types::errors::ChromeCodecError;
use crate::types::node::{BookmarkNode, FolderNode, TreeNode};

/// Maps the tree to Chrome records, recursively.
pub fn export_to_chrome(nodes: &[TreeNode]) -> Vec<ChromeBookmark> {
    nodes.iter().map(export_node).collect()
}

fn export_node(node: &TreeNode) -> ChromeBookmark {
    match node {
        TreeNode::Folder(folder) => ChromeBookmark {
            id: folder.id.clone(),
            parent_id: folder.parent_id.clone(),
            index: Some(folder.position),
            title: folder.name.clone(),
            date_added: None,
            url: None,
            icon: None,
            description: None,
            tags: None,
            children: Some(export_to_chrome(&folder.children)),
        },
        TreeNode::Bookmark(bookmark) => ChromeBookmark {
            id: bookmark.id.clone(),
            parent_id: bookmark.parent_id.clone(),
            index: Some(bookmark.position),
            title: bookmark.name.clone(),
            date_added: None,
            url: Some(bookmark.url.clone()),
            icon: bookmark.icon.clone(),
            description: bookmark.description.clone(),
            tags: bookmark.tags.clone(),
            children: None,
        },
    }
}

/// Maps Chrome records back to tree nodes.
///
/// Siblings are ordered by `index` (records without one keep their file
/// order) and renumbered; `parent_id` follows the nesting, not the record.
/// Imported folders start expanded.
pub fn import_from_chrome(records: &[ChromeBookmark]) -> Vec<TreeNode> {
    let mut nodes = import_level(records);
    tree_query::normalize(&mut nodes, None);
    nodes
}

fn import_level(records: &[ChromeBookmark]) -> Vec<TreeNode> {
    let mut ordered: Vec<(usize, &ChromeBookmark)> = records
        .iter()
        .enumerate()
        .map(|(i, record)| (record.index.unwrap_or(i), record))
        .collect();
    ordered.sort_by_key(|(key, _)| *key);
    ordered
        .into_iter()
        .map(|(_, record)| import_node(record))
        .collect()
}

fn import_node(record: &ChromeBookmark) -> TreeNode {
    match &record.children {
        Some(children) => TreeNode::Folder(FolderNode {
            id: record.id.clone(),
            name: record.title.clone(),
            position: 0,
            parent_id: None,
            is_expanded: true,
            children: import_level(children),
        }),
        None => TreeNode::Bookmark(BookmarkNode {
            id: record.id.clone(),
            name: record.title.clone(),
            position: 0,
            parent_id: None,
            // Chrome folder-like entries without children carry no URL.
            url: record.url.clone().unwrap_or_default(),
            icon: record.icon.clone(),
            description: record.description.clone(),
            tags: record.tags.clone(),
        }),
    }
}

/// Parses a Chrome export document (a JSON array of records).
pub fn parse_records(input: &str) -> Result<Vec<ChromeBookmark>, ChromeCodecError> {
    serde_json::from_str(input)
        .map_err(|e| ChromeCodecError::ParseError(format!("Invalid bookmark file format: {}", e)))
}

/// Parses and converts a Chrome export document into tree nodes.
pub fn import_json(input: &str) -> Result<Vec<TreeNode>, ChromeCodecError> {
    parse_records(input).map(|records| import_from_chrome(&records))
}

/// Serializes the tree as a Chrome export document.
pub fn export_json(nodes: &[TreeNode], pretty: bool) -> Result<String, ChromeCodecError> {
    let records = export_to_chrome(nodes);
    let result = if pretty {
        serde_json::to_string_pretty(&records)
    } else {
        serde_json::to_string(&records)
    };
    result.map_err(|e| ChromeCodecError::SerializationError(e.to_string()))
}

/// Replaces the contents of `tree` with an imported document.
///
/// All-or-nothing: on any parse or validation error the tree is unchanged.
pub fn import_into(tree: &mut BookmarkTree, input: &str) -> Result<usize, ChromeCodecError> {
    let nodes = import_json(input)?;
    tree.set_tree(nodes)?;
    let count = tree.len();
    log::info!("imported {} bookmark nodes", count);
    Ok(count)
}
