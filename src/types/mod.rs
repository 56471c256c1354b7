// Treemark shared type definitions
// Each submodule defines plain data contracts used across the engine.

pub mod chrome;
pub mod drag;
pub mod errors;
pub mod node;
pub mod settings;
