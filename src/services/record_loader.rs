//! Builds a bookmark tree from flat storage rows.
//!
//! Storage keeps one row per node with a nullable parent reference. Rows
//! without a parent are top-level folders; rows with a parent are bookmarks
//! placed in that folder, or at the root when the folder row is missing.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::managers::tree_query;
use crate::types::node::{BookmarkNode, FolderNode, TreeNode};

/// One stored row.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FlatBookmarkRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub index: Option<usize>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// JSON-encoded array of strings.
    #[serde(default)]
    pub tags: Option<String>,
}

/// Parses the stored tag column. Anything but a JSON array of strings is empty.
pub fn parse_tags(raw: Option<&str>) -> Vec<String> {
    raw.and_then(|s| serde_json::from_str::<Vec<String>>(s).ok())
        .unwrap_or_default()
}

/// Assembles rows into a normalized tree ordered by each row's `index`.
pub fn build_tree(records: &[FlatBookmarkRecord]) -> Vec<TreeNode> {
    let mut roots: Vec<(usize, TreeNode)> = Vec::new();
    let mut folder_slots: HashMap<&str, usize> = HashMap::new();

    for record in records.iter().filter(|r| r.parent_id.is_none()) {
        folder_slots.insert(&record.id, roots.len());
        roots.push((
            record.index.unwrap_or(0),
            TreeNode::Folder(FolderNode {
                id: record.id.clone(),
                name: record.title.clone(),
                position: 0,
                parent_id: None,
                is_expanded: true,
                children: Vec::new(),
            }),
        ));
    }

    let mut children: HashMap<usize, Vec<(usize, TreeNode)>> = HashMap::new();
    let mut orphans: Vec<(usize, TreeNode)> = Vec::new();
    for record in records.iter() {
        let Some(parent_id) = record.parent_id.as_deref() else {
            continue;
        };
        let entry = (record.index.unwrap_or(0), bookmark_from(record));
        match folder_slots.get(parent_id) {
            Some(slot) => children.entry(*slot).or_default().push(entry),
            None => {
                log::warn!("row {} references missing folder {}; placing at root", record.id, parent_id);
                orphans.push(entry);
            }
        }
    }

    for (slot, mut entries) in children {
        entries.sort_by_key(|(index, _)| *index);
        if let Some(folder) = roots[slot].1.children_mut() {
            folder.extend(entries.into_iter().map(|(_, node)| node));
        }
    }

    roots.extend(orphans);
    roots.sort_by_key(|(index, _)| *index);
    let mut nodes: Vec<TreeNode> = roots.into_iter().map(|(_, node)| node).collect();
    tree_query::normalize(&mut nodes, None);
    nodes
}

fn bookmark_from(record: &FlatBookmarkRecord) -> TreeNode {
    let tags = parse_tags(record.tags.as_deref());
    TreeNode::Bookmark(BookmarkNode {
        id: record.id.clone(),
        name: record.title.clone(),
        position: 0,
        parent_id: None,
        url: record.url.clone(),
        icon: record.icon.clone(),
        description: record.description.clone(),
        tags: Some(tags),
    })
}
