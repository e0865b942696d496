//! Modules layer - Infrastructure components shared across features

pub mod storage;
