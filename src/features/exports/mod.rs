//! Downloadable toppers reports: the ranking view rendered to PDF,
//! DOCX or XLSX with one table per standard group.

pub mod dtos;
pub mod handlers;
pub mod renderers;
pub mod routes;
pub mod services;

pub use services::ExportService;
