mod standard_service;

pub use standard_service::StandardService;
