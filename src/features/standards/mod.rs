//! Standard (grade level / degree program) reference data.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::StandardService;
