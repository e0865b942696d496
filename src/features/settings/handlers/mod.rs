pub mod settings_handler;

pub use settings_handler::{get_settings, update_settings};
