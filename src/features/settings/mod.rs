//! Single-row application settings (public submission deadline).

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::SettingsService;
