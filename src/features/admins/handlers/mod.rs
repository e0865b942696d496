pub mod admin_handler;

pub use admin_handler::{create_admin, deactivate_admin, list_admins, update_admin};
