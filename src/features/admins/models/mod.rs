mod admin;

pub use admin::{Admin, AdminRole};
