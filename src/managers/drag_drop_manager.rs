//! Drag-and-drop session manager.
//!
//! Tracks one gesture at a time across the list and tree panels. Hover
//! updates are pure bookkeeping; all validation happens once, at drop time,
//! before anything is committed to the `BookmarkTree`.

use crate::managers::tree_manager::{BookmarkTree, TreeManagerTrait};
use crate::types::drag::{DragState, DraggedItem, DropOutcome, DropPosition, PanelType};
use crate::types::errors::{DragDropError, TreeError};
use crate::types::node::{NodeKind, NodeUpdate, TreeNode};

/// Trait defining the drag gesture lifecycle.
pub trait DragDropManagerTrait {
    fn on_drag_start(&mut self, tree: &BookmarkTree, item: DraggedItem);
    fn on_drag_over(&mut self, target_id: &str, target_type: NodeKind) -> Result<DropPosition, DragDropError>;
    fn on_drag_end(&mut self, tree: &mut BookmarkTree, final_target_id: Option<&str>) -> Result<DropOutcome, DragDropError>;
    fn on_drag_cancel(&mut self) -> bool;
    fn state(&self) -> &DragState;
    fn is_dragging(&self) -> bool;
}

/// Owner of the transient drag session. Never part of the persisted tree.
#[derive(Debug, Clone)]
pub struct DragDropManager {
    state: DragState,
    session: Option<DraggedItem>,
    auto_expand_on_drop: bool,
}

impl DragDropManager {
    pub fn new() -> Self {
        Self::with_auto_expand(true)
    }

    /// `auto_expand` opens a collapsed folder after something is dropped into it.
    pub fn with_auto_expand(auto_expand: bool) -> Self {
        Self {
            state: DragState::default(),
            session: None,
            auto_expand_on_drop: auto_expand,
        }
    }

    pub fn set_auto_expand(&mut self, auto_expand: bool) {
        self.auto_expand_on_drop = auto_expand;
    }

    /// The dragged item of the open session, if any.
    pub fn session(&self) -> Option<&DraggedItem> {
        self.session.as_ref()
    }

    fn reset(&mut self) {
        self.state = DragState::default();
        self.session = None;
    }

    /// Position for the drop: the live hover value if it was for this target,
    /// otherwise the default for the target's kind.
    fn resolve_position(
        state: &DragState,
        tree: &BookmarkTree,
        target_id: Option<&str>,
    ) -> DropPosition {
        if state.target_id.as_deref() == target_id {
            if let Some(position) = state.position {
                return position;
            }
        }
        target_id
            .and_then(|id| tree.find(id))
            .map(|node| DropPosition::for_target(node.kind()))
            .unwrap_or(DropPosition::After)
    }

    fn expand_after_drop(&self, tree: &mut BookmarkTree, folder_id: &str) {
        if !self.auto_expand_on_drop {
            return;
        }
        let collapsed = matches!(tree.find(folder_id), Some(TreeNode::Folder(f)) if !f.is_expanded);
        if collapsed {
            if let Err(e) = tree.update_item(folder_id, NodeUpdate::folder().expanded(true)) {
                log::warn!("could not expand {} after drop: {}", folder_id, e);
            }
        }
    }

    fn drop_from_tree(
        &self,
        tree: &mut BookmarkTree,
        item: &DraggedItem,
        target_id: Option<&str>,
        position: DropPosition,
    ) -> Result<DropOutcome, DragDropError> {
        if let Some(node) = tree.find(&item.source_id) {
            if node.kind() != item.source_type {
                return Err(TreeError::TypeMismatch {
                    id: item.source_id.clone(),
                    expected: item.source_type,
                    actual: node.kind(),
                }
                .into());
            }
        }
        tree.move_item(&item.source_id, target_id, position)?;
        if let (Some(tid), DropPosition::Inside) = (target_id, position) {
            self.expand_after_drop(tree, tid);
        }

        let parent_id = tree
            .find(&item.source_id)
            .and_then(|n| n.parent_id())
            .map(str::to_string);
        Ok(DropOutcome::Moved {
            id: item.source_id.clone(),
            parent_id,
            position,
        })
    }

    /// List items are not in the tree yet: they can only land inside a folder,
    /// where they become a new bookmark.
    fn drop_from_list(
        &self,
        tree: &mut BookmarkTree,
        item: &DraggedItem,
        target_id: Option<&str>,
    ) -> Result<DropOutcome, DragDropError> {
        let target_id = target_id.ok_or_else(|| {
            TreeError::InvalidTarget("list items must be dropped into a folder".to_string())
        })?;
        let target = tree
            .find(target_id)
            .ok_or_else(|| TreeError::NotFound(target_id.to_string()))?;
        if !target.is_folder() {
            return Err(TreeError::InvalidTarget(format!(
                "list items must be dropped into a folder, {} is a bookmark",
                target_id
            ))
            .into());
        }

        let data = item
            .bookmark_data
            .clone()
            .ok_or_else(|| DragDropError::MissingBookmarkData(item.source_id.clone()))?;
        let id = tree.create_bookmark(data, Some(target_id))?;
        self.expand_after_drop(tree, target_id);

        Ok(DropOutcome::Created {
            id,
            parent_id: target_id.to_string(),
        })
    }
}

impl Default for DragDropManager {
    fn default() -> Self {
        Self::new()
    }
}

impl DragDropManagerTrait for DragDropManager {
    /// Opens a session. A session that is still open is discarded first.
    fn on_drag_start(&mut self, tree: &BookmarkTree, item: DraggedItem) {
        if let Some(stale) = &self.session {
            log::warn!(
                "drag of {} started while drag of {} was open; discarding the stale session",
                item.source_id,
                stale.source_id
            );
        }

        let parent_id = match item.source_panel {
            PanelType::Tree => tree
                .find(&item.source_id)
                .and_then(|n| n.parent_id())
                .map(str::to_string),
            PanelType::List => None,
        };
        self.state = DragState {
            is_dragging: true,
            source_id: Some(item.source_id.clone()),
            source_type: Some(item.source_type),
            target_id: None,
            position: None,
            parent_id,
        };
        log::debug!("drag started: {} from {:?}", item.source_id, item.source_panel);
        self.session = Some(item);
    }

    /// Records the hovered target. Folders default to `Inside`, bookmarks to `After`.
    fn on_drag_over(
        &mut self,
        target_id: &str,
        target_type: NodeKind,
    ) -> Result<DropPosition, DragDropError> {
        if self.session.is_none() {
            return Err(DragDropError::NoActiveSession);
        }
        let position = DropPosition::for_target(target_type);
        self.state.target_id = Some(target_id.to_string());
        self.state.position = Some(position);
        Ok(position)
    }

    /// Validates and commits the drop. The session is closed either way.
    fn on_drag_end(
        &mut self,
        tree: &mut BookmarkTree,
        final_target_id: Option<&str>,
    ) -> Result<DropOutcome, DragDropError> {
        let item = self.session.take().ok_or(DragDropError::NoActiveSession)?;
        let position = Self::resolve_position(&self.state, tree, final_target_id);
        self.reset();

        let result = match item.source_panel {
            PanelType::Tree => self.drop_from_tree(tree, &item, final_target_id, position),
            PanelType::List => self.drop_from_list(tree, &item, final_target_id),
        };
        match &result {
            Ok(outcome) => log::debug!("drop committed: {:?}", outcome),
            Err(e) => log::warn!("drop of {} rejected: {}", item.source_id, e),
        }
        result
    }

    /// Discards the session without touching the tree. Returns whether one was open.
    fn on_drag_cancel(&mut self) -> bool {
        let was_open = self.session.is_some();
        if was_open {
            log::debug!("drag cancelled");
        }
        self.reset();
        was_open
    }

    fn state(&self) -> &DragState {
        &self.state
    }

    fn is_dragging(&self) -> bool {
        self.state.is_dragging
    }
}
