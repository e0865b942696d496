//! Storage module for uploaded result proofs
//!
//! Provides a local-disk store; files are served back as static assets
//! under the configured public path.

mod local_store;

pub use local_store::{LocalStore, StoredFile};
