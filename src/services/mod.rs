// Treemark services
// Stateless conversions and IO edges: Chrome interchange, storage rows, settings.

pub mod chrome_codec;
pub mod record_loader;
pub mod settings_engine;
