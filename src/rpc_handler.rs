//! RPC method handler for the Treemark JSON protocol.
//!
//! Kept apart from `rpc_server.rs` so it can be unit-tested directly.
//! `handle_method` maps a method name and JSON params onto the tree, the drag
//! session, the Chrome codec and the settings engine of an `App`.

use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use crate::app::App;
use crate::managers::drag_drop_manager::DragDropManagerTrait;
use crate::managers::tree_manager::TreeManagerTrait;
use crate::services::chrome_codec;
use crate::services::record_loader::{self, FlatBookmarkRecord};
use crate::types::drag::{DraggedItem, DropPosition};
use crate::types::node::{BookmarkData, BookmarkFilter, NodeKind, NodeUpdate, TreeNode};

fn str_param<'a>(params: &'a Value, key: &str) -> Result<&'a str, String> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("missing {}", key))
}

fn opt_str_param<'a>(params: &'a Value, key: &str) -> Option<&'a str> {
    params.get(key).and_then(|v| v.as_str())
}

fn parse_param<T: DeserializeOwned>(params: &Value, key: &str) -> Result<T, String> {
    let raw = params.get(key).ok_or_else(|| format!("missing {}", key))?;
    serde_json::from_value(raw.clone()).map_err(|e| format!("invalid {}: {}", key, e))
}

fn to_json<T: Serialize>(value: &T) -> Result<Value, String> {
    serde_json::to_value(value).map_err(|e| format!("serialization error: {}", e))
}

/// Dispatch a method call to the appropriate handler.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
/// Each call holds the lock for its whole duration.
pub fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Tree ───
        "tree.get" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            Ok(json!({"items": to_json(&a.tree.items())?}))
        }
        "tree.set" => {
            let items: Vec<TreeNode> = parse_param(params, "items")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.tree.set_tree(items).map_err(|e| e.to_string())?;
            Ok(json!({"count": a.tree.len()}))
        }
        "tree.load_records" => {
            let rows: Vec<FlatBookmarkRecord> = parse_param(params, "rows")?;
            let nodes = record_loader::build_tree(&rows);
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.tree.set_tree(nodes).map_err(|e| e.to_string())?;
            Ok(json!({"count": a.tree.len()}))
        }
        "tree.ensure_root" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let id = a.ensure_root_folder().map_err(|e| e.to_string())?;
            Ok(json!({"id": id}))
        }
        "tree.add" => {
            let node: TreeNode = parse_param(params, "node")?;
            let id = node.id().to_string();
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.tree.add_item(node).map_err(|e| e.to_string())?;
            Ok(json!({"id": id}))
        }
        "tree.add_folder" => {
            let name = str_param(params, "name")?;
            let parent_id = opt_str_param(params, "parent_id");
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let id = a.tree.create_folder(name, parent_id).map_err(|e| e.to_string())?;
            Ok(json!({"id": id, "name": name}))
        }
        "tree.add_bookmark" => {
            let data: BookmarkData =
                serde_json::from_value(params.clone()).map_err(|e| format!("invalid bookmark: {}", e))?;
            let parent_id = opt_str_param(params, "parent_id");
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let url = data.url.clone();
            let id = a.tree.create_bookmark(data, parent_id).map_err(|e| e.to_string())?;
            Ok(json!({"id": id, "url": url}))
        }
        "tree.update" => {
            let id = str_param(params, "id")?;
            let update: NodeUpdate = parse_param(params, "update")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.tree.update_item(id, update).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "tree.remove" => {
            let id = str_param(params, "id")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let removed = a.tree.remove_item(id).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true, "type": removed.kind()}))
        }
        "tree.move" => {
            let source_id = str_param(params, "source_id")?;
            let target_id = opt_str_param(params, "target_id");
            let position: DropPosition = parse_param(params, "position")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.tree
                .move_item(source_id, target_id, position)
                .map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "tree.search" => {
            let filter: BookmarkFilter =
                serde_json::from_value(params.clone()).map_err(|e| format!("invalid filter: {}", e))?;
            let a = app.lock().map_err(|e| e.to_string())?;
            let results = a.tree.search(&filter);
            Ok(json!({"items": to_json(&results)?}))
        }
        "tree.depth" => {
            let id = str_param(params, "id")?;
            let a = app.lock().map_err(|e| e.to_string())?;
            let depth = a.tree.depth_of(id).map_err(|e| e.to_string())?;
            Ok(json!({"depth": depth}))
        }

        // ─── Drag & drop ───
        "drag.start" => {
            let item: DraggedItem =
                serde_json::from_value(params.clone()).map_err(|e| format!("invalid drag item: {}", e))?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let App { tree, drag, .. } = &mut *a;
            drag.on_drag_start(tree, item);
            Ok(to_json(drag.state())?)
        }
        "drag.over" => {
            let target_id = str_param(params, "target_id")?;
            let target_type: NodeKind = parse_param(params, "target_type")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let position = a
                .drag
                .on_drag_over(target_id, target_type)
                .map_err(|e| e.to_string())?;
            Ok(json!({"position": position}))
        }
        "drag.end" => {
            let target_id = opt_str_param(params, "target_id");
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let App { tree, drag, .. } = &mut *a;
            let outcome = drag.on_drag_end(tree, target_id).map_err(|e| e.to_string())?;
            Ok(to_json(&outcome)?)
        }
        "drag.cancel" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let cancelled = a.drag.on_drag_cancel();
            Ok(json!({"cancelled": cancelled}))
        }
        "drag.state" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            Ok(to_json(a.drag.state())?)
        }

        // ─── Chrome interchange ───
        "chrome.import" => {
            let data = str_param(params, "data")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let count = chrome_codec::import_into(&mut a.tree, data).map_err(|e| e.to_string())?;
            Ok(json!({"count": count}))
        }
        "chrome.export" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let interchange = &a.settings().interchange;
            let data = chrome_codec::export_json(a.tree.items(), interchange.pretty)
                .map_err(|e| e.to_string())?;
            Ok(json!({"file_name": interchange.export_file_name, "data": data}))
        }

        // ─── Settings ───
        "settings.get" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            Ok(to_json(a.settings())?)
        }
        "settings.set" => {
            let key = str_param(params, "key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.update_setting(key, value).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
