//! Bookmark tree mutation engine.
//!
//! Implements `TreeManagerTrait` over a caller-owned `BookmarkTree`. Every
//! mutation validates first and splices second, so a rejected call leaves the
//! tree untouched; every splice rewrites `position` and `parent_id` of the
//! sibling sequences it touched.

use uuid::Uuid;

use crate::managers::tree_query;
use crate::types::drag::DropPosition;
use crate::types::errors::TreeError;
use crate::types::node::{
    BookmarkData, BookmarkFilter, BookmarkNode, FolderNode, NodeKind, NodeUpdate, TreeNode,
    MAX_TREE_DEPTH,
};

/// Trait defining bookmark tree operations.
pub trait TreeManagerTrait {
    fn items(&self) -> &[TreeNode];
    fn set_tree(&mut self, nodes: Vec<TreeNode>) -> Result<(), TreeError>;
    fn find(&self, id: &str) -> Option<&TreeNode>;
    fn depth_of(&self, id: &str) -> Result<usize, TreeError>;
    fn is_ancestor(&self, ancestor_id: &str, node_id: &str) -> Result<bool, TreeError>;
    fn add_item(&mut self, node: TreeNode) -> Result<(), TreeError>;
    fn update_item(&mut self, id: &str, update: NodeUpdate) -> Result<(), TreeError>;
    fn remove_item(&mut self, id: &str) -> Result<TreeNode, TreeError>;
    fn validate_move(&self, source_id: &str, target_id: Option<&str>, position: DropPosition) -> Result<(), TreeError>;
    fn move_item(&mut self, source_id: &str, target_id: Option<&str>, position: DropPosition) -> Result<(), TreeError>;
    fn create_bookmark(&mut self, data: BookmarkData, parent_id: Option<&str>) -> Result<String, TreeError>;
    fn create_folder(&mut self, name: &str, parent_id: Option<&str>) -> Result<String, TreeError>;
    fn folder_contents(&self, parent_id: Option<&str>) -> Result<&[TreeNode], TreeError>;
    fn ensure_root_folder(&mut self, name: &str) -> Result<String, TreeError>;
    fn search(&self, filter: &BookmarkFilter) -> Vec<&BookmarkNode>;
}

/// In-memory bookmark tree.
#[derive(Debug, Clone, PartialEq)]
pub struct BookmarkTree {
    items: Vec<TreeNode>,
    max_depth: usize,
}

impl BookmarkTree {
    pub fn new() -> Self {
        Self::with_max_depth(MAX_TREE_DEPTH)
    }

    /// Creates an empty tree allowing `max_depth` nesting levels.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            items: Vec::new(),
            max_depth: max_depth.max(1),
        }
    }

    /// Builds a validated tree from an existing node list.
    pub fn from_nodes(nodes: Vec<TreeNode>) -> Result<Self, TreeError> {
        let mut tree = Self::new();
        tree.set_tree(nodes)?;
        Ok(tree)
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Consumes the tree and hands back the root sequence.
    pub fn into_items(self) -> Vec<TreeNode> {
        self.items
    }

    /// Total number of nodes.
    pub fn len(&self) -> usize {
        let mut count = 0;
        tree_query::walk(&self.items, &mut |_, _| count += 1);
        count
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Hop limit for parent-chain walks; anything longer is a corrupt tree.
    fn sanity_bound(&self) -> usize {
        self.max_depth + 1
    }

    fn check_depth(&self, depth: usize) -> Result<(), TreeError> {
        if depth >= self.max_depth {
            return Err(TreeError::MaxDepthExceeded {
                depth,
                max: self.max_depth,
            });
        }
        Ok(())
    }

    /// Depth a node would have as a child of `parent_id` (`None` = root).
    fn child_depth(&self, parent_id: Option<&str>) -> Result<usize, TreeError> {
        match parent_id {
            None => Ok(0),
            Some(pid) => Ok(self.depth_of(pid)? + 1),
        }
    }

    fn ensure_unique_ids(&self, node: &TreeNode) -> Result<(), TreeError> {
        let ids = tree_query::subtree_ids(node);
        for (i, id) in ids.iter().enumerate() {
            if ids[..i].contains(id) || tree_query::find_by_id(&self.items, id).is_some() {
                return Err(TreeError::DuplicateId(id.to_string()));
            }
        }
        Ok(())
    }

    fn renumber(&mut self, parent_id: Option<&str>) {
        if let Some(siblings) = tree_query::siblings_mut(&mut self.items, parent_id) {
            tree_query::renumber_siblings(siblings, parent_id);
        }
    }
}

impl Default for BookmarkTree {
    fn default() -> Self {
        Self::new()
    }
}

fn matches_filter(bookmark: &BookmarkNode, filter: &BookmarkFilter) -> bool {
    if let Some(text) = filter.text.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        let needle = text.to_lowercase();
        let in_name = bookmark.name.to_lowercase().contains(&needle);
        let in_url = bookmark.url.to_lowercase().contains(&needle);
        let in_description = bookmark
            .description
            .as_deref()
            .map(|d| d.to_lowercase().contains(&needle))
            .unwrap_or(false);
        if !(in_name || in_url || in_description) {
            return false;
        }
    }

    if filter.tags.is_empty() {
        return true;
    }
    let tags: Vec<String> = bookmark
        .tags
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|t| t.to_lowercase())
        .collect();
    filter
        .tags
        .iter()
        .all(|wanted| tags.contains(&wanted.to_lowercase()))
}

impl TreeManagerTrait for BookmarkTree {
    fn items(&self) -> &[TreeNode] {
        &self.items
    }

    /// Replaces the whole tree after checking id uniqueness and depth.
    ///
    /// Positions and parent references are recomputed from the nesting.
    fn set_tree(&mut self, mut nodes: Vec<TreeNode>) -> Result<(), TreeError> {
        if let Some(id) = tree_query::first_duplicate_id(&nodes) {
            return Err(TreeError::DuplicateId(id));
        }
        if let Some(deepest) = tree_query::max_depth_present(&nodes) {
            self.check_depth(deepest)?;
        }

        tree_query::normalize(&mut nodes, None);
        self.items = nodes;
        log::debug!("tree replaced: {} nodes", self.len());
        Ok(())
    }

    fn find(&self, id: &str) -> Option<&TreeNode> {
        tree_query::find_by_id(&self.items, id)
    }

    fn depth_of(&self, id: &str) -> Result<usize, TreeError> {
        tree_query::depth_of(&self.items, id, self.sanity_bound())
    }

    fn is_ancestor(&self, ancestor_id: &str, node_id: &str) -> Result<bool, TreeError> {
        tree_query::is_ancestor(&self.items, ancestor_id, node_id, self.sanity_bound())
    }

    /// Appends `node` (with any children) to the end of its parent's sequence.
    fn add_item(&mut self, mut node: TreeNode) -> Result<(), TreeError> {
        let parent_id = node.parent_id().map(str::to_string);

        if let Some(pid) = parent_id.as_deref() {
            match self.find(pid) {
                Some(parent) if parent.is_folder() => {}
                _ => return Err(TreeError::InvalidParent(pid.to_string())),
            }
        }
        self.ensure_unique_ids(&node)?;
        let depth = self.child_depth(parent_id.as_deref())?;
        self.check_depth(depth + tree_query::subtree_height(&node))?;

        let id = node.id().to_string();
        if let Some(children) = node.children_mut() {
            tree_query::normalize(children, Some(&id));
        }

        let siblings = tree_query::siblings_mut(&mut self.items, parent_id.as_deref())
            .ok_or_else(|| TreeError::InvalidParent(parent_id.clone().unwrap_or_default()))?;
        siblings.push(node);
        tree_query::renumber_siblings(siblings, parent_id.as_deref());

        log::debug!("added {} under {:?}", id, parent_id);
        Ok(())
    }

    /// Shallow-merges `update` into the node; structure is never touched.
    fn update_item(&mut self, id: &str, update: NodeUpdate) -> Result<(), TreeError> {
        let node = tree_query::find_by_id_mut(&mut self.items, id)
            .ok_or_else(|| TreeError::NotFound(id.to_string()))?;

        let actual = node.kind();
        let mismatch = |expected: NodeKind| TreeError::TypeMismatch {
            id: id.to_string(),
            expected,
            actual,
        };
        if let Some(kind) = update.kind {
            if kind != actual {
                return Err(mismatch(kind));
            }
        }
        if update.has_folder_fields() && actual != NodeKind::Folder {
            return Err(mismatch(NodeKind::Folder));
        }
        if update.has_bookmark_fields() && actual != NodeKind::Bookmark {
            return Err(mismatch(NodeKind::Bookmark));
        }

        match node {
            TreeNode::Folder(folder) => {
                if let Some(name) = update.name {
                    folder.name = name;
                }
                if let Some(is_expanded) = update.is_expanded {
                    folder.is_expanded = is_expanded;
                }
            }
            TreeNode::Bookmark(bookmark) => {
                if let Some(name) = update.name {
                    bookmark.name = name;
                }
                if let Some(url) = update.url {
                    bookmark.url = url;
                }
                if update.icon.is_some() {
                    bookmark.icon = update.icon;
                }
                if update.description.is_some() {
                    bookmark.description = update.description;
                }
                if update.tags.is_some() {
                    bookmark.tags = update.tags;
                }
            }
        }

        log::debug!("updated {}", id);
        Ok(())
    }

    /// Detaches the node together with its subtree and returns it.
    fn remove_item(&mut self, id: &str) -> Result<TreeNode, TreeError> {
        let parent_id = self
            .find(id)
            .ok_or_else(|| TreeError::NotFound(id.to_string()))?
            .parent_id()
            .map(str::to_string);

        let removed = tree_query::detach(&mut self.items, id)
            .ok_or_else(|| TreeError::NotFound(id.to_string()))?;
        self.renumber(parent_id.as_deref());

        log::debug!("removed {} from {:?}", id, parent_id);
        Ok(removed)
    }

    /// Runs every move check without touching the tree.
    fn validate_move(
        &self,
        source_id: &str,
        target_id: Option<&str>,
        position: DropPosition,
    ) -> Result<(), TreeError> {
        let source = self
            .find(source_id)
            .ok_or_else(|| TreeError::NotFound(source_id.to_string()))?;
        let height = tree_query::subtree_height(source);

        let target_id = match target_id {
            None => return self.check_depth(height),
            Some(t) => t,
        };
        let target = self
            .find(target_id)
            .ok_or_else(|| TreeError::NotFound(target_id.to_string()))?;

        if source_id == target_id || self.is_ancestor(source_id, target_id)? {
            return Err(TreeError::CircularReference(source_id.to_string()));
        }

        // A sibling drop keeps the target's level; an inside drop goes one below it.
        let target_depth = self.depth_of(target_id)?;
        let new_depth = if position == DropPosition::Inside && target.is_folder() {
            target_depth + 1
        } else {
            target_depth
        };
        self.check_depth(new_depth + height)?;

        if position == DropPosition::Inside && !target.is_folder() {
            return Err(TreeError::InvalidTarget(format!(
                "cannot drop inside bookmark {}",
                target_id
            )));
        }
        Ok(())
    }

    fn move_item(
        &mut self,
        source_id: &str,
        target_id: Option<&str>,
        position: DropPosition,
    ) -> Result<(), TreeError> {
        if let Err(e) = self.validate_move(source_id, target_id, position) {
            log::warn!("move of {} onto {:?} rejected: {}", source_id, target_id, e);
            return Err(e);
        }

        let old_parent = self
            .find(source_id)
            .and_then(|n| n.parent_id())
            .map(str::to_string);
        let mut source = tree_query::detach(&mut self.items, source_id)
            .ok_or_else(|| TreeError::NotFound(source_id.to_string()))?;
        self.renumber(old_parent.as_deref());

        // After validation the target cannot live inside the detached subtree.
        let new_parent = match target_id {
            None => None,
            Some(tid) => {
                let target = tree_query::find_by_id(&self.items, tid).ok_or_else(|| {
                    TreeError::CorruptTree(format!("target {} vanished during move", tid))
                })?;
                if position == DropPosition::Inside {
                    Some(tid.to_string())
                } else {
                    target.parent_id().map(str::to_string)
                }
            }
        };

        source.set_parent_id(new_parent.clone());
        let siblings = tree_query::siblings_mut(&mut self.items, new_parent.as_deref())
            .ok_or_else(|| {
                TreeError::CorruptTree(format!("destination {:?} is not a folder", new_parent))
            })?;
        let index = match (target_id, position) {
            (None, _) | (Some(_), DropPosition::Inside) => siblings.len(),
            (Some(tid), pos) => {
                let target_index = siblings
                    .iter()
                    .position(|n| n.id() == tid)
                    .unwrap_or(siblings.len());
                if pos == DropPosition::Before {
                    target_index
                } else {
                    (target_index + 1).min(siblings.len())
                }
            }
        };
        siblings.insert(index, source);
        tree_query::renumber_siblings(siblings, new_parent.as_deref());

        log::debug!(
            "moved {} from {:?} to {:?} at index {}",
            source_id,
            old_parent,
            new_parent,
            index
        );
        Ok(())
    }

    /// Creates a bookmark leaf with a fresh id and returns that id.
    fn create_bookmark(
        &mut self,
        data: BookmarkData,
        parent_id: Option<&str>,
    ) -> Result<String, TreeError> {
        let id = Uuid::new_v4().to_string();
        let node = TreeNode::Bookmark(BookmarkNode {
            id: id.clone(),
            name: data.name,
            position: 0,
            parent_id: parent_id.map(str::to_string),
            url: data.url,
            icon: data.icon,
            description: data.description,
            tags: data.tags,
        });
        self.add_item(node)?;
        Ok(id)
    }

    /// Creates an empty, expanded folder with a fresh id and returns that id.
    fn create_folder(&mut self, name: &str, parent_id: Option<&str>) -> Result<String, TreeError> {
        let id = Uuid::new_v4().to_string();
        let node = TreeNode::Folder(FolderNode {
            id: id.clone(),
            name: name.to_string(),
            position: 0,
            parent_id: parent_id.map(str::to_string),
            is_expanded: true,
            children: Vec::new(),
        });
        self.add_item(node)?;
        Ok(id)
    }

    /// Returns one sibling sequence: the root (`None`) or a folder's children.
    fn folder_contents(&self, parent_id: Option<&str>) -> Result<&[TreeNode], TreeError> {
        match parent_id {
            None => Ok(&self.items),
            Some(pid) => self
                .find(pid)
                .ok_or_else(|| TreeError::NotFound(pid.to_string()))?
                .children()
                .ok_or_else(|| TreeError::InvalidParent(pid.to_string())),
        }
    }

    /// Returns the first top-level folder, creating one named `name` if none exists.
    fn ensure_root_folder(&mut self, name: &str) -> Result<String, TreeError> {
        if let Some(existing) = self.items.iter().find(|n| n.is_folder()) {
            return Ok(existing.id().to_string());
        }
        self.create_folder(name, None)
    }

    fn search(&self, filter: &BookmarkFilter) -> Vec<&BookmarkNode> {
        let mut results = Vec::new();
        tree_query::walk(&self.items, &mut |node, _| {
            if let TreeNode::Bookmark(bookmark) = node {
                if matches_filter(bookmark, filter) {
                    results.push(bookmark);
                }
            }
        });
        results
    }
}
