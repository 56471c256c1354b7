use serde::{Deserialize, Serialize};

use super::node::{BookmarkData, NodeKind};

/// Panel a drag gesture originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelType {
    /// Flat, unstructured bookmark list. Items here are not part of the tree yet.
    List,
    /// Hierarchical tree view.
    Tree,
}

/// Proposed relation of a dragged node to its drop target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropPosition {
    Before,
    After,
    Inside,
}

impl DropPosition {
    /// Default position for hovering over a node of the given kind.
    pub fn for_target(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Folder => DropPosition::Inside,
            NodeKind::Bookmark => DropPosition::After,
        }
    }
}

/// Transient state of the drag gesture in progress.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DragState {
    pub is_dragging: bool,
    pub source_id: Option<String>,
    pub source_type: Option<NodeKind>,
    pub target_id: Option<String>,
    pub position: Option<DropPosition>,
    /// Original parent of the source, kept for display on cancel.
    pub parent_id: Option<String>,
}

/// What the UI hands over when a drag starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraggedItem {
    pub source_id: String,
    pub source_type: NodeKind,
    pub source_panel: PanelType,
    #[serde(default)]
    pub bookmark_data: Option<BookmarkData>,
}

/// Result of a committed drop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "lowercase")]
pub enum DropOutcome {
    /// An existing tree node was moved.
    Moved {
        id: String,
        parent_id: Option<String>,
        position: DropPosition,
    },
    /// A list item was turned into a new bookmark node.
    Created { id: String, parent_id: String },
}
