mod result_service;

pub use result_service::{ResultService, UploadedImage};
