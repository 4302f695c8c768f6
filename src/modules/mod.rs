//! Modules layer - Infrastructure components for external integrations
//!
//! Contains the prompt collection store and the local upload storage.

pub mod prompt_store;
pub mod storage;
