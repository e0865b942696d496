//! Admin account management (super admin only) and startup bootstrap.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::AdminService;
