//! Publicly submitted exam results: multipart submission with image
//! proof, plus the admin review workflow (list/edit/approve/verify/delete).

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ResultService;
