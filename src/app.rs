//! App Core for Treemark.
//!
//! Holds the bookmark tree, the drag session mediating gestures over it, and
//! the settings they were configured from.

use crate::managers::drag_drop_manager::DragDropManager;
use crate::managers::tree_manager::{BookmarkTree, TreeManagerTrait};
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::types::errors::{SettingsError, TreeError};
use crate::types::settings::TreeSettings;

/// Central application struct.
///
/// Not synchronized itself; hosts with several threads wrap it in a `Mutex`
/// so that each call runs to completion before the next one starts.
pub struct App {
    pub tree: BookmarkTree,
    pub drag: DragDropManager,
    pub settings_engine: SettingsEngine,
}

impl App {
    /// Creates an App, loading settings from `config_path` (or the platform default).
    pub fn new(config_path: Option<String>) -> Result<Self, SettingsError> {
        let mut settings_engine = SettingsEngine::new(config_path);
        let settings = settings_engine.load()?;
        Ok(Self::from_parts(settings, settings_engine))
    }

    /// Creates an App with default settings that are never read from disk.
    pub fn in_memory(config_path: String) -> Self {
        let settings_engine = SettingsEngine::new(Some(config_path));
        Self::from_parts(TreeSettings::default(), settings_engine)
    }

    fn from_parts(settings: TreeSettings, settings_engine: SettingsEngine) -> Self {
        log::info!(
            "treemark ready (max depth {}, settings at {})",
            settings.tree.max_depth,
            settings_engine.get_config_path()
        );
        Self {
            tree: BookmarkTree::with_max_depth(settings.tree.max_depth),
            drag: DragDropManager::with_auto_expand(settings.drag.auto_expand_on_drop),
            settings_engine,
        }
    }

    pub fn settings(&self) -> &TreeSettings {
        self.settings_engine.get_settings()
    }

    /// Changes one setting and applies it to the tree and drag session.
    ///
    /// The change is checked against the current tree before it is stored:
    /// a `tree.max_depth` the tree already exceeds is rejected and neither the
    /// settings in memory nor the file on disk change.
    pub fn update_setting(&mut self, key: &str, value: serde_json::Value) -> Result<(), SettingsError> {
        let staged = self.settings_engine.preview_value(key, value)?;

        let rebuilt = if staged.tree.max_depth != self.tree.max_depth() {
            let mut tree = BookmarkTree::with_max_depth(staged.tree.max_depth);
            if let Err(e) = tree.set_tree(self.tree.items().to_vec()) {
                log::warn!(
                    "rejecting {}: current tree does not fit depth limit {}: {}",
                    key,
                    staged.tree.max_depth,
                    e
                );
                return Err(e.into());
            }
            Some(tree)
        } else {
            None
        };

        let auto_expand = staged.drag.auto_expand_on_drop;
        self.settings_engine.commit(staged)?;
        if let Some(tree) = rebuilt {
            self.tree = tree;
        }
        self.drag.set_auto_expand(auto_expand);
        log::debug!("setting {} applied", key);
        Ok(())
    }

    /// First top-level folder, created with the configured root name if missing.
    pub fn ensure_root_folder(&mut self) -> Result<String, TreeError> {
        let name = self.settings().tree.default_root_name.clone();
        self.tree.ensure_root_folder(&name)
    }
}
