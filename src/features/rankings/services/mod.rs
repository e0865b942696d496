pub mod aggregation;
mod ranking_service;

pub use ranking_service::RankingService;
