use serde::{Deserialize, Serialize};

use super::chrome::EXPORT_FILE_NAME;
use super::errors::SettingsError;
use super::node::MAX_TREE_DEPTH;

/// Top-level engine settings container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TreeSettings {
    #[serde(default)]
    pub tree: TreeLimits,
    #[serde(default)]
    pub drag: DragSettings,
    #[serde(default)]
    pub interchange: InterchangeSettings,
}

impl TreeSettings {
    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.tree.max_depth == 0 {
            return Err(SettingsError::InvalidValue(
                "tree.max_depth must be at least 1".to_string(),
            ));
        }
        if self.interchange.export_file_name.trim().is_empty() {
            return Err(SettingsError::InvalidValue(
                "interchange.export_file_name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Structural limits of the tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TreeLimits {
    pub max_depth: usize,
    pub default_root_name: String,
}

impl Default for TreeLimits {
    fn default() -> Self {
        Self {
            max_depth: MAX_TREE_DEPTH,
            default_root_name: "My Bookmarks".to_string(),
        }
    }
}

/// Drag-and-drop timing and behaviour.
///
/// The timings are consumed by the UI layer; the engine only stores them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DragSettings {
    pub hover_expand_ms: u64,
    pub drag_delay_ms: u64,
    pub auto_expand_on_drop: bool,
}

impl Default for DragSettings {
    fn default() -> Self {
        Self {
            hover_expand_ms: 500,
            drag_delay_ms: 150,
            auto_expand_on_drop: true,
        }
    }
}

/// Chrome import/export options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InterchangeSettings {
    pub export_file_name: String,
    pub pretty: bool,
}

impl Default for InterchangeSettings {
    fn default() -> Self {
        Self {
            export_file_name: EXPORT_FILE_NAME.to_string(),
            pretty: true,
        }
    }
}
