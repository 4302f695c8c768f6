//! Storage module for uploaded files
//!
//! Provides the local disk store backing the upload endpoint.

mod local_storage;

pub use local_storage::LocalStorage;
