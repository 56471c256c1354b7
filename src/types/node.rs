use serde::{Deserialize, Serialize};

/// Default nesting limit: number of levels a tree may have.
pub const MAX_TREE_DEPTH: usize = 5;

/// Discriminant shared by tree nodes, drag sources and update payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Folder,
    Bookmark,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Folder => "folder",
            NodeKind::Bookmark => "bookmark",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A folder owning an ordered list of children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderNode {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub position: usize,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default = "default_expanded")]
    pub is_expanded: bool,
    #[serde(default)]
    pub children: Vec<TreeNode>,
}

/// A leaf bookmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookmarkNode {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub position: usize,
    #[serde(default)]
    pub parent_id: Option<String>,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

fn default_expanded() -> bool {
    true
}

/// A node of the bookmark tree, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TreeNode {
    Folder(FolderNode),
    Bookmark(BookmarkNode),
}

impl TreeNode {
    pub fn id(&self) -> &str {
        match self {
            TreeNode::Folder(f) => &f.id,
            TreeNode::Bookmark(b) => &b.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            TreeNode::Folder(f) => &f.name,
            TreeNode::Bookmark(b) => &b.name,
        }
    }

    pub fn position(&self) -> usize {
        match self {
            TreeNode::Folder(f) => f.position,
            TreeNode::Bookmark(b) => b.position,
        }
    }

    pub fn parent_id(&self) -> Option<&str> {
        match self {
            TreeNode::Folder(f) => f.parent_id.as_deref(),
            TreeNode::Bookmark(b) => b.parent_id.as_deref(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            TreeNode::Folder(_) => NodeKind::Folder,
            TreeNode::Bookmark(_) => NodeKind::Bookmark,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, TreeNode::Folder(_))
    }

    /// Children of a folder; `None` for bookmarks.
    pub fn children(&self) -> Option<&[TreeNode]> {
        match self {
            TreeNode::Folder(f) => Some(&f.children),
            TreeNode::Bookmark(_) => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<TreeNode>> {
        match self {
            TreeNode::Folder(f) => Some(&mut f.children),
            TreeNode::Bookmark(_) => None,
        }
    }

    pub(crate) fn set_position(&mut self, position: usize) {
        match self {
            TreeNode::Folder(f) => f.position = position,
            TreeNode::Bookmark(b) => b.position = position,
        }
    }

    pub(crate) fn set_parent_id(&mut self, parent_id: Option<String>) {
        match self {
            TreeNode::Folder(f) => f.parent_id = parent_id,
            TreeNode::Bookmark(b) => b.parent_id = parent_id,
        }
    }
}

/// Bookmark payload carried by a list-panel drag or a create call.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BookmarkData {
    #[serde(alias = "title")]
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// Partial update for a single node.
///
/// `kind` is the optional variant tag; when absent the tag is inferred from
/// the variant-only fields that are set (if any).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NodeUpdate {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<NodeKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_expanded: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl NodeUpdate {
    /// Untagged update touching only shared fields.
    pub fn common() -> Self {
        Self::default()
    }

    pub fn folder() -> Self {
        Self {
            kind: Some(NodeKind::Folder),
            ..Self::default()
        }
    }

    pub fn bookmark() -> Self {
        Self {
            kind: Some(NodeKind::Bookmark),
            ..Self::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn expanded(mut self, is_expanded: bool) -> Self {
        self.is_expanded = Some(is_expanded);
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    pub(crate) fn has_folder_fields(&self) -> bool {
        self.is_expanded.is_some()
    }

    pub(crate) fn has_bookmark_fields(&self) -> bool {
        self.url.is_some() || self.icon.is_some() || self.description.is_some() || self.tags.is_some()
    }
}

/// Search criteria over bookmark leaves.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BookmarkFilter {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}
