//! Treemark: an in-memory bookmark tree engine.
//!
//! Folders and bookmarks live in a nested tree that is mutated only through
//! `managers::tree_manager`, validated during drag gestures by
//! `managers::drag_drop_manager`, and converted to and from Chrome's bookmark
//! export format by `services::chrome_codec`.

pub mod app;
pub mod managers;
pub mod rpc_handler;
pub mod services;
pub mod types;
