pub mod auth_handler;

pub use auth_handler::{change_password, get_me, login};
