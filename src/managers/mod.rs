// Treemark state managers
// Managers own mutable state: the bookmark tree and the drag session over it.

pub mod drag_drop_manager;
pub mod tree_manager;
pub mod tree_query;
