// Treemark Settings Engine
// JSON settings file at the platform config path. Changes are staged with
// `preview_value` and only reach memory and disk through `commit`.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde_json::Value;

use crate::types::errors::SettingsError;
use crate::types::settings::TreeSettings;

/// Trait defining the settings engine interface.
pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<TreeSettings, SettingsError>;
    fn save(&self) -> Result<(), SettingsError>;
    fn get_settings(&self) -> &TreeSettings;
    /// The settings that would result from setting `key`; nothing is stored.
    fn preview_value(&self, key: &str, value: Value) -> Result<TreeSettings, SettingsError>;
    /// Validates, writes and adopts `settings`. On error nothing changes.
    fn commit(&mut self, settings: TreeSettings) -> Result<(), SettingsError>;
    fn reset(&mut self) -> Result<(), SettingsError>;
    fn get_config_path(&self) -> &str;

    /// Sets one dot-separated key (`"tree.max_depth"`) and saves.
    fn set_value(&mut self, key: &str, value: Value) -> Result<(), SettingsError> {
        let staged = self.preview_value(key, value)?;
        self.commit(staged)?;
        log::debug!("setting {} updated", key);
        Ok(())
    }
}

/// Settings engine that persists settings as JSON on disk.
pub struct SettingsEngine {
    config_path: String,
    settings: TreeSettings,
}

/// Platform config directory for treemark, or `./treemark` when none can be determined.
pub fn default_config_dir() -> PathBuf {
    ProjectDirs::from("", "", "treemark")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".").join("treemark"))
}

fn write_settings(path: &Path, settings: &TreeSettings) -> Result<(), SettingsError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .map_err(|e| SettingsError::IoError(format!("{}: {}", dir.display(), e)))?;
    }
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| SettingsError::SerializationError(e.to_string()))?;
    fs::write(path, json).map_err(|e| SettingsError::IoError(format!("{}: {}", path.display(), e)))
}

/// `"drag.hover_expand_ms"` -> `"/drag/hover_expand_ms"`.
fn key_to_pointer(key: &str) -> Result<String, SettingsError> {
    if key.is_empty() || key.split('.').any(str::is_empty) {
        return Err(SettingsError::InvalidKey(format!("malformed key '{}'", key)));
    }
    Ok(format!("/{}", key.replace('.', "/")))
}

impl SettingsEngine {
    /// `path_override` replaces `<config dir>/settings.json`.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = path_override.unwrap_or_else(|| {
            default_config_dir()
                .join("settings.json")
                .to_string_lossy()
                .to_string()
        });

        Self {
            config_path,
            settings: TreeSettings::default(),
        }
    }
}

impl SettingsEngineTrait for SettingsEngine {
    /// A missing file yields defaults; a malformed or out-of-range file is an error.
    fn load(&mut self) -> Result<TreeSettings, SettingsError> {
        let path = Path::new(&self.config_path);
        if !path.exists() {
            log::debug!("no settings file at {}, using defaults", self.config_path);
            self.settings = TreeSettings::default();
            return Ok(self.settings.clone());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| SettingsError::IoError(format!("{}: {}", self.config_path, e)))?;
        let settings: TreeSettings = serde_json::from_str(&content)
            .map_err(|e| SettingsError::SerializationError(format!("{}: {}", self.config_path, e)))?;
        settings.validate()?;

        self.settings = settings;
        Ok(self.settings.clone())
    }

    fn save(&self) -> Result<(), SettingsError> {
        write_settings(Path::new(&self.config_path), &self.settings)
    }

    fn get_settings(&self) -> &TreeSettings {
        &self.settings
    }

    fn preview_value(&self, key: &str, value: Value) -> Result<TreeSettings, SettingsError> {
        let pointer = key_to_pointer(key)?;
        let mut doc = serde_json::to_value(&self.settings)
            .map_err(|e| SettingsError::SerializationError(e.to_string()))?;

        let slot = doc
            .pointer_mut(&pointer)
            .ok_or_else(|| SettingsError::InvalidKey(format!("unknown key '{}'", key)))?;
        *slot = value;

        let staged: TreeSettings = serde_json::from_value(doc)
            .map_err(|e| SettingsError::InvalidValue(format!("{}: {}", key, e)))?;
        staged.validate()?;
        Ok(staged)
    }

    fn commit(&mut self, settings: TreeSettings) -> Result<(), SettingsError> {
        settings.validate()?;
        write_settings(Path::new(&self.config_path), &settings)?;
        self.settings = settings;
        Ok(())
    }

    fn reset(&mut self) -> Result<(), SettingsError> {
        self.commit(TreeSettings::default())
    }

    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}
