use serde::{Deserialize, Serialize};

/// File name offered for downloads of an exported tree.
pub const EXPORT_FILE_NAME: &str = "bookmarks.json";

/// One record of a Chrome bookmarks export.
///
/// Presence of `children` (even empty) marks a folder; absence marks a leaf.
/// `icon`, `description` and `tags` are not part of Chrome's format; they are
/// emitted only when set so that exports stay readable by Chrome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChromeBookmark {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_added: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ChromeBookmark>>,
}
