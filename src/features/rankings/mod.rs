//! Derived ranking views over approved results: top-N per standard,
//! summary statistics and grouped counts. The computations are pure
//! functions of the fetched rows.

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use services::RankingService;
