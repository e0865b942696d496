pub mod admins;
pub mod auth;
pub mod exports;
pub mod rankings;
pub mod results;
pub mod settings;
pub mod standards;
pub mod villages;
