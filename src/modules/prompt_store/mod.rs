//! Prompt collection storage
//!
//! [`PromptStore`] is the collection-level interface the prompt service talks
//! to. [`PgPromptStore`] backs it with PostgreSQL; tests use the in-memory
//! `MemoryPromptStore`.

#[cfg(test)]
mod memory;
mod postgres;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::prompts::models::{NewPrompt, Prompt, PromptChanges, PromptFilter, PromptId};

#[cfg(test)]
pub use memory::MemoryPromptStore;
pub use postgres::PgPromptStore;

#[async_trait]
pub trait PromptStore: Send + Sync {
    /// Records matching `filter`, newest first, at most `limit` when given
    async fn find(&self, filter: &PromptFilter, limit: Option<i64>) -> Result<Vec<Prompt>>;

    async fn find_one(&self, id: PromptId) -> Result<Option<Prompt>>;

    async fn insert(&self, prompt: NewPrompt) -> Result<Prompt>;

    /// Apply the set fields of `changes`; returns the number of records whose
    /// stored values actually changed
    async fn update(&self, id: PromptId, changes: &PromptChanges) -> Result<u64>;

    /// Returns the number of records removed
    async fn delete(&self, id: PromptId) -> Result<u64>;

    /// Unique tags across every record, in no particular order
    async fn distinct_tags(&self) -> Result<Vec<String>>;

    /// Unique tags grouped over matching records and sorted ascending
    async fn aggregate_tags(&self, approved_only: bool) -> Result<Vec<String>>;
}
