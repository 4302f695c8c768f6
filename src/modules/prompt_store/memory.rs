use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::PromptStore;
use crate::core::error::Result;
use crate::features::prompts::models::{NewPrompt, Prompt, PromptChanges, PromptFilter, PromptId};

/// In-memory prompt collection with the same query semantics as
/// [`super::PgPromptStore`]. Counts every call so tests can assert that a
/// request never reached storage.
#[derive(Default)]
pub struct MemoryPromptStore {
    prompts: RwLock<Vec<Prompt>>,
    calls: AtomicUsize,
}

impl MemoryPromptStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl PromptStore for MemoryPromptStore {
    async fn find(&self, filter: &PromptFilter, limit: Option<i64>) -> Result<Vec<Prompt>> {
        self.touch();
        let prompts = self.prompts.read().await;
        // Insertion order breaks created_at ties, newest first
        let mut found: Vec<Prompt> = prompts
            .iter()
            .rev()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        if let Some(limit) = limit {
            found.truncate(usize::try_from(limit).unwrap_or(0));
        }
        Ok(found)
    }

    async fn find_one(&self, id: PromptId) -> Result<Option<Prompt>> {
        self.touch();
        let prompts = self.prompts.read().await;
        Ok(prompts.iter().find(|p| p.id == id).cloned())
    }

    async fn insert(&self, prompt: NewPrompt) -> Result<Prompt> {
        self.touch();
        let stored = Prompt {
            id: PromptId::from(Uuid::new_v4()),
            title: prompt.title,
            prompt_text: prompt.prompt_text,
            category: prompt.category,
            tags: prompt.tags,
            author: prompt.author,
            image_url: prompt.image_url,
            is_approved: prompt.is_approved,
            created_at: Utc::now(),
        };
        self.prompts.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: PromptId, changes: &PromptChanges) -> Result<u64> {
        self.touch();
        let mut prompts = self.prompts.write().await;
        Ok(match prompts.iter_mut().find(|p| p.id == id) {
            Some(prompt) => u64::from(changes.apply(prompt)),
            None => 0,
        })
    }

    async fn delete(&self, id: PromptId) -> Result<u64> {
        self.touch();
        let mut prompts = self.prompts.write().await;
        let before = prompts.len();
        prompts.retain(|p| p.id != id);
        Ok((before - prompts.len()) as u64)
    }

    async fn distinct_tags(&self) -> Result<Vec<String>> {
        self.touch();
        let prompts = self.prompts.read().await;
        let mut seen = Vec::new();
        for tag in prompts.iter().flat_map(|p| p.tags.iter()) {
            if !seen.contains(tag) {
                seen.push(tag.clone());
            }
        }
        Ok(seen)
    }

    async fn aggregate_tags(&self, approved_only: bool) -> Result<Vec<String>> {
        self.touch();
        let prompts = self.prompts.read().await;
        let tags: BTreeSet<String> = prompts
            .iter()
            .filter(|p| !approved_only || p.is_approved)
            .flat_map(|p| p.tags.iter().cloned())
            .collect();
        Ok(tags.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::prompts::models::Category;

    fn new_prompt(title: &str) -> NewPrompt {
        NewPrompt {
            title: title.to_string(),
            prompt_text: "A lighthouse in a storm, oil painting".to_string(),
            category: Category::Other,
            tags: vec!["sea".to_string()],
            author: "Rin".to_string(),
            image_url: None,
            is_approved: false,
        }
    }

    #[tokio::test]
    async fn test_update_counts_only_real_changes() {
        let store = MemoryPromptStore::new();
        let stored = store.insert(new_prompt("Lighthouse")).await.unwrap();

        let same = PromptChanges {
            title: Some("Lighthouse".to_string()),
            ..Default::default()
        };
        assert_eq!(store.update(stored.id, &same).await.unwrap(), 0);

        let image = PromptChanges {
            image_url: Some("http://localhost:8000/uploads/a.png".to_string()),
            ..Default::default()
        };
        assert_eq!(store.update(stored.id, &image).await.unwrap(), 1);
        assert_eq!(store.update(stored.id, &image).await.unwrap(), 0);

        let found = store.find_one(stored.id).await.unwrap().unwrap();
        assert_eq!(
            found.image_url.as_deref(),
            Some("http://localhost:8000/uploads/a.png")
        );
    }

    #[tokio::test]
    async fn test_update_missing_record_is_zero() {
        let store = MemoryPromptStore::new();
        let changes = PromptChanges {
            is_approved: Some(true),
            ..Default::default()
        };
        let missing = PromptId::from(Uuid::new_v4());
        assert_eq!(store.update(missing, &changes).await.unwrap(), 0);
        assert_eq!(store.calls(), 1);
    }
}
