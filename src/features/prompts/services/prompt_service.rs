use std::sync::Arc;
use tracing::{debug, info};

use crate::core::error::{AppError, Result};
use crate::features::prompts::dtos::{CreatePromptDto, PromptListQuery, UpdatePromptDto};
use crate::features::prompts::models::{
    NewPrompt, Prompt, PromptChanges, PromptFilter, PromptId, TagFilter,
};
use crate::modules::prompt_store::PromptStore;
use crate::shared::constants::{ADMIN_LIST_LIMIT, DEFAULT_AUTHOR};

/// Which path a prompt was submitted through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// Anonymous submission: author required, starts unapproved
    Public,
    /// Admin creation: author defaulted, starts approved
    Admin,
}

impl Submission {
    fn approved_by_default(self) -> bool {
        matches!(self, Submission::Admin)
    }
}

fn not_found() -> AppError {
    AppError::NotFound("Prompt not found".to_string())
}

/// Prompt lifecycle and query rules on top of a [`PromptStore`]
pub struct PromptService {
    store: Arc<dyn PromptStore>,
}

impl std::fmt::Debug for PromptService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptService")
            .field("store", &"<PromptStore>")
            .finish()
    }
}

impl PromptService {
    pub fn new(store: Arc<dyn PromptStore>) -> Self {
        Self { store }
    }

    /// List prompts matching `filter`, newest first
    pub async fn list(&self, filter: &PromptFilter, limit: Option<i64>) -> Result<Vec<Prompt>> {
        self.store.find(filter, limit).await
    }

    /// Public listing: approved only, every requested tag must match
    pub async fn list_public(&self, query: PromptListQuery) -> Result<Vec<Prompt>> {
        let filter = PromptFilter {
            category: query.category,
            tags: Some(TagFilter::MatchAll(query.tags)),
            approved_only: true,
        };
        self.list(&filter, Some(query.limit)).await
    }

    /// Admin dashboard: every record regardless of approval
    pub async fn list_admin(&self) -> Result<Vec<Prompt>> {
        self.list(&PromptFilter::default(), Some(ADMIN_LIST_LIMIT))
            .await
    }

    /// Internal search: any requested tag may match, no approval filter, no cap
    pub async fn search_any(&self, query: PromptListQuery) -> Result<Vec<Prompt>> {
        let filter = PromptFilter {
            category: query.category,
            tags: Some(TagFilter::MatchAny(query.tags)),
            approved_only: false,
        };
        self.list(&filter, None).await
    }

    /// Persist a new prompt. Approval is decided by the submission path only.
    pub async fn create(&self, dto: CreatePromptDto, submission: Submission) -> Result<Prompt> {
        let author = match (dto.given_author(), submission) {
            (Some(author), _) => author.to_string(),
            (None, Submission::Admin) => DEFAULT_AUTHOR.to_string(),
            (None, Submission::Public) => {
                return Err(AppError::Validation("Author name is required".to_string()))
            }
        };

        let prompt = self
            .store
            .insert(NewPrompt {
                title: dto.title,
                prompt_text: dto.prompt_text,
                category: dto.category,
                tags: dto.tags,
                author,
                image_url: dto.image_url,
                is_approved: submission.approved_by_default(),
            })
            .await?;

        info!(
            "Prompt {} created via {:?} submission (approved: {})",
            prompt.id, submission, prompt.is_approved
        );
        Ok(prompt)
    }

    /// Unique tags of approved prompts, sorted ascending
    pub async fn approved_tags(&self) -> Result<Vec<String>> {
        self.store.aggregate_tags(true).await
    }

    /// Unique tags across all prompts, unsorted
    pub async fn all_tags(&self) -> Result<Vec<String>> {
        self.store.distinct_tags().await
    }

    /// Apply a partial update.
    ///
    /// A non-empty update that changes nothing reports `NotFound`, whether the
    /// record is missing or already holds the given values.
    pub async fn update(&self, id: &str, dto: UpdatePromptDto) -> Result<Prompt> {
        let id = PromptId::parse(id)?;
        let changes = PromptChanges::from(dto);

        if !changes.is_empty() {
            let modified = self.store.update(id, &changes).await?;
            if modified == 0 {
                return Err(not_found());
            }
            debug!("Prompt {} updated", id);
        }

        self.store.find_one(id).await?.ok_or_else(not_found)
    }

    /// Hard delete
    pub async fn delete(&self, id: &str) -> Result<()> {
        let id = PromptId::parse(id)?;

        if self.store.delete(id).await? == 0 {
            return Err(not_found());
        }

        debug!("Prompt {} deleted", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::prompts::models::{Category, CategoryFilter};
    use crate::modules::prompt_store::MemoryPromptStore;
    use crate::shared::test_helpers::create_prompt_dto;

    fn service() -> (PromptService, Arc<MemoryPromptStore>) {
        let store = Arc::new(MemoryPromptStore::new());
        (PromptService::new(store.clone()), store)
    }

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn query(category: CategoryFilter, tag_values: &[&str]) -> PromptListQuery {
        PromptListQuery {
            category,
            tags: tags(tag_values),
            ..PromptListQuery::default()
        }
    }

    #[tokio::test]
    async fn test_public_submission_is_unapproved_and_hidden() {
        let (service, _) = service();
        let mut dto = create_prompt_dto();
        dto.tags = tags(&["hidden"]);

        let prompt = service.create(dto, Submission::Public).await.unwrap();
        assert!(!prompt.is_approved);

        assert!(service
            .list_public(PromptListQuery::default())
            .await
            .unwrap()
            .is_empty());
        assert!(service.approved_tags().await.unwrap().is_empty());
        assert_eq!(service.list_admin().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_public_submission_requires_author() {
        let (service, store) = service();
        let mut dto = create_prompt_dto();
        dto.author = Some("   ".to_string());

        let err = service.create(dto, Submission::Public).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_admin_creation_defaults_author_and_approves() {
        let (service, _) = service();
        let mut dto = create_prompt_dto();
        dto.author = None;

        let prompt = service.create(dto, Submission::Admin).await.unwrap();
        assert_eq!(prompt.author, "Prompt Center");
        assert!(prompt.is_approved);

        let mut dto = create_prompt_dto();
        dto.author = Some(String::new());
        let prompt = service.create(dto, Submission::Admin).await.unwrap();
        assert_eq!(prompt.author, DEFAULT_AUTHOR);
    }

    #[tokio::test]
    async fn test_admin_creation_keeps_given_author() {
        let (service, _) = service();
        let mut dto = create_prompt_dto();
        dto.author = Some("  Mina ".to_string());

        let prompt = service.create(dto, Submission::Admin).await.unwrap();
        assert_eq!(prompt.author, "  Mina ");
    }

    #[tokio::test]
    async fn test_public_submission_stores_author_as_given() {
        let (service, _) = service();
        let mut dto = create_prompt_dto();
        dto.author = Some("  Rin  ".to_string());

        let prompt = service.create(dto, Submission::Public).await.unwrap();
        assert_eq!(prompt.author, "  Rin  ");
    }

    #[tokio::test]
    async fn test_category_filter() {
        let (service, _) = service();
        for category in [Category::Story, Category::Post] {
            let mut dto = create_prompt_dto();
            dto.category = category;
            service.create(dto, Submission::Admin).await.unwrap();
        }

        let stories = service
            .list_public(query(CategoryFilter::Only(Category::Story), &[]))
            .await
            .unwrap();
        assert_eq!(stories.len(), 1);
        assert_eq!(stories[0].category, Category::Story);

        let all = service
            .list_public(query(CategoryFilter::All, &[]))
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_public_tag_filter_requires_all_tags() {
        let (service, _) = service();
        let mut dto = create_prompt_dto();
        dto.tags = tags(&["a", "b"]);
        service.create(dto, Submission::Admin).await.unwrap();

        let cases: [(&[&str], usize); 3] = [(&["a", "b"], 1), (&["a"], 1), (&["a", "c"], 0)];
        for (wanted, expected) in cases {
            let found = service
                .list_public(query(CategoryFilter::All, wanted))
                .await
                .unwrap();
            assert_eq!(found.len(), expected, "tags {:?}", wanted);
        }
    }

    #[tokio::test]
    async fn test_search_any_matches_any_tag_including_unapproved() {
        let (service, _) = service();
        let mut dto = create_prompt_dto();
        dto.tags = tags(&["a", "b"]);
        service.create(dto, Submission::Public).await.unwrap();

        let found = service
            .search_any(query(CategoryFilter::All, &["a", "c"]))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);

        let found = service
            .search_any(query(CategoryFilter::All, &["x"]))
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_listing_is_newest_first_and_capped() {
        let (service, _) = service();
        for i in 0..3 {
            let mut dto = create_prompt_dto();
            dto.title = format!("Title {}", i);
            service.create(dto, Submission::Admin).await.unwrap();
        }

        let listed = service
            .list_public(PromptListQuery {
                limit: 2,
                ..PromptListQuery::default()
            })
            .await
            .unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].title, "Title 2");
        assert_eq!(listed[1].title, "Title 1");
    }

    #[tokio::test]
    async fn test_tags_variants() {
        let (service, _) = service();
        let mut dto = create_prompt_dto();
        dto.tags = tags(&["zeta", "alpha", "zeta"]);
        service.create(dto, Submission::Admin).await.unwrap();
        let mut dto = create_prompt_dto();
        dto.tags = tags(&["pending"]);
        service.create(dto, Submission::Public).await.unwrap();

        assert_eq!(
            service.approved_tags().await.unwrap(),
            tags(&["alpha", "zeta"])
        );

        let mut all = service.all_tags().await.unwrap();
        all.sort();
        assert_eq!(all, tags(&["alpha", "pending", "zeta"]));
    }

    #[tokio::test]
    async fn test_update_applies_only_present_fields() {
        let (service, _) = service();
        let created = service
            .create(create_prompt_dto(), Submission::Public)
            .await
            .unwrap();

        let updated = service
            .update(
                &created.id.to_string(),
                UpdatePromptDto {
                    title: Some("Renamed prompt".to_string()),
                    is_approved: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "Renamed prompt");
        assert!(updated.is_approved);
        assert_eq!(updated.prompt_text, created.prompt_text);
        assert_eq!(updated.author, created.author);
        assert_eq!(updated.category, created.category);
        assert_eq!(updated.created_at, created.created_at);

        let public = service
            .list_public(PromptListQuery::default())
            .await
            .unwrap();
        assert_eq!(public.len(), 1);
    }

    #[tokio::test]
    async fn test_update_with_identical_values_is_not_found() {
        let (service, _) = service();
        let created = service
            .create(create_prompt_dto(), Submission::Admin)
            .await
            .unwrap();

        let err = service
            .update(
                &created.id.to_string(),
                UpdatePromptDto {
                    title: Some(created.title.clone()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_empty_update_returns_existing_record() {
        let (service, _) = service();
        let created = service
            .create(create_prompt_dto(), Submission::Admin)
            .await
            .unwrap();

        let same = service
            .update(&created.id.to_string(), UpdatePromptDto::default())
            .await
            .unwrap();
        assert_eq!(same, created);

        let missing = PromptId::from(uuid::Uuid::new_v4()).to_string();
        let err = service
            .update(&missing, UpdatePromptDto::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_invalid_id_never_reaches_store() {
        let (service, store) = service();

        let err = service
            .update("nope", UpdatePromptDto::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidId(_)));

        let err = service.delete("12345").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidId(_)));

        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_delete() {
        let (service, _) = service();
        let created = service
            .create(create_prompt_dto(), Submission::Admin)
            .await
            .unwrap();
        let id = created.id.to_string();

        service.delete(&id).await.unwrap();
        assert!(service.list_admin().await.unwrap().is_empty());

        let err = service.delete(&id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
