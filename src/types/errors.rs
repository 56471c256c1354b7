use std::fmt;

use super::node::NodeKind;

// === TreeError ===

/// Errors related to bookmark tree queries and mutations.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeError {
    /// Node with the given ID was not found.
    NotFound(String),
    /// The parent for an add is missing or is not a folder.
    InvalidParent(String),
    /// An update payload's variant disagrees with the node it targets.
    TypeMismatch {
        id: String,
        expected: NodeKind,
        actual: NodeKind,
    },
    /// The move would place a node inside its own subtree (or itself).
    CircularReference(String),
    /// The operation would nest a node deeper than allowed.
    MaxDepthExceeded { depth: usize, max: usize },
    /// The drop target cannot receive the node.
    InvalidTarget(String),
    /// A node with the same ID already exists in the tree.
    DuplicateId(String),
    /// A traversal ran past the sanity bound; the tree is malformed.
    CorruptTree(String),
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::NotFound(id) => write!(f, "Node not found: {}", id),
            TreeError::InvalidParent(id) => write!(f, "Invalid parent folder: {}", id),
            TreeError::TypeMismatch {
                id,
                expected,
                actual,
            } => write!(
                f,
                "Type mismatch for node {}: update targets {} but node is {}",
                id, expected, actual
            ),
            TreeError::CircularReference(id) => {
                write!(f, "Circular reference: cannot move {} into its own subtree", id)
            }
            TreeError::MaxDepthExceeded { depth, max } => write!(
                f,
                "Maximum depth exceeded: depth {} is beyond the {}-level limit",
                depth, max
            ),
            TreeError::InvalidTarget(msg) => write!(f, "Invalid drop target: {}", msg),
            TreeError::DuplicateId(id) => write!(f, "Duplicate node id: {}", id),
            TreeError::CorruptTree(msg) => write!(f, "Corrupt tree: {}", msg),
        }
    }
}

impl std::error::Error for TreeError {}

// === DragDropError ===

/// Errors related to drag-and-drop sessions.
#[derive(Debug, Clone, PartialEq)]
pub enum DragDropError {
    /// No drag session is open.
    NoActiveSession,
    /// A list-panel drag carried no bookmark data to create a node from.
    MissingBookmarkData(String),
    /// Validation or commit in the tree failed.
    Tree(TreeError),
}

impl fmt::Display for DragDropError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DragDropError::NoActiveSession => write!(f, "No active drag session"),
            DragDropError::MissingBookmarkData(id) => {
                write!(f, "Dragged list item has no bookmark data: {}", id)
            }
            DragDropError::Tree(e) => write!(f, "Drop rejected: {}", e),
        }
    }
}

impl std::error::Error for DragDropError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DragDropError::Tree(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TreeError> for DragDropError {
    fn from(err: TreeError) -> Self {
        DragDropError::Tree(err)
    }
}

// === ChromeCodecError ===

/// Errors related to Chrome bookmark import/export.
#[derive(Debug, Clone, PartialEq)]
pub enum ChromeCodecError {
    /// The payload is not valid JSON or not an array of bookmark records.
    ParseError(String),
    /// Failed to serialize the export.
    SerializationError(String),
    /// The imported tree violates a structural invariant.
    Tree(TreeError),
}

impl fmt::Display for ChromeCodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChromeCodecError::ParseError(msg) => write!(f, "Bookmark parse error: {}", msg),
            ChromeCodecError::SerializationError(msg) => {
                write!(f, "Bookmark serialization error: {}", msg)
            }
            ChromeCodecError::Tree(e) => write!(f, "Imported tree rejected: {}", e),
        }
    }
}

impl std::error::Error for ChromeCodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ChromeCodecError::Tree(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TreeError> for ChromeCodecError {
    fn from(err: TreeError) -> Self {
        ChromeCodecError::Tree(err)
    }
}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
    /// The provided settings key is invalid.
    InvalidKey(String),
    /// The provided settings value is invalid.
    InvalidValue(String),
    /// The current tree does not fit the new settings.
    Tree(TreeError),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => {
                write!(f, "Invalid settings value: {}", msg)
            }
            SettingsError::Tree(e) => write!(f, "Settings rejected by current tree: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Tree(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TreeError> for SettingsError {
    fn from(err: TreeError) -> Self {
        SettingsError::Tree(err)
    }
}
