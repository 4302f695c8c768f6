use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::core::error::AppError;

/// Storage-assigned prompt identifier.
///
/// Only obtainable from storage or through [`PromptId::parse`], so a value of
/// this type is always syntactically valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct PromptId(Uuid);

impl PromptId {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        Uuid::parse_str(raw.trim())
            .map(Self)
            .map_err(|_| AppError::InvalidId("Invalid ID".to_string()))
    }
}

impl From<Uuid> for PromptId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl FromStr for PromptId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PromptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Storable prompt category, matching the `prompt_category` database enum
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema,
)]
#[sqlx(type_name = "prompt_category")]
pub enum Category {
    Story,
    Post,
    Reels,
    Logo,
    Banner,
    #[default]
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Story,
        Category::Post,
        Category::Reels,
        Category::Logo,
        Category::Banner,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Story => "Story",
            Category::Post => "Post",
            Category::Reels => "Reels",
            Category::Logo => "Logo",
            Category::Banner => "Banner",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| AppError::Validation(format!("Unknown category '{}'", s)))
    }
}

/// Category restriction of a listing. `All` is a query-only wildcard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    #[cfg(test)]
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => *wanted == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "All" {
            Ok(CategoryFilter::All)
        } else {
            s.parse().map(CategoryFilter::Only)
        }
    }
}

/// Tag restriction of a listing.
///
/// The public listing requires every requested tag; the internal listing
/// accepts any of them. An empty tag list restricts nothing in either mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagFilter {
    MatchAll(Vec<String>),
    MatchAny(Vec<String>),
}

impl TagFilter {
    pub fn tags(&self) -> &[String] {
        match self {
            TagFilter::MatchAll(tags) | TagFilter::MatchAny(tags) => tags,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tags().is_empty()
    }

    #[cfg(test)]
    pub fn matches(&self, record_tags: &[String]) -> bool {
        match self {
            TagFilter::MatchAll(wanted) => wanted.iter().all(|t| record_tags.contains(t)),
            TagFilter::MatchAny(wanted) => {
                wanted.is_empty() || wanted.iter().any(|t| record_tags.contains(t))
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptFilter {
    pub category: CategoryFilter,
    pub tags: Option<TagFilter>,
    pub approved_only: bool,
}

impl PromptFilter {
    pub fn approved() -> Self {
        Self {
            approved_only: true,
            ..Self::default()
        }
    }

    /// In-process evaluation of the predicate the SQL store builds
    #[cfg(test)]
    pub fn matches(&self, prompt: &Prompt) -> bool {
        (!self.approved_only || prompt.is_approved)
            && self.category.matches(prompt.category)
            && self.tags.as_ref().is_none_or(|f| f.matches(&prompt.tags))
    }
}

/// A stored prompt
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize, ToSchema)]
pub struct Prompt {
    #[serde(rename = "_id")]
    #[schema(value_type = String, format = Uuid)]
    pub id: PromptId,
    pub title: String,
    pub prompt_text: String,
    pub category: Category,
    pub tags: Vec<String>,
    pub author: String,
    pub image_url: Option<String>,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
}

/// A prompt ready for insertion; id and timestamp are assigned by storage
#[derive(Debug, Clone, PartialEq)]
pub struct NewPrompt {
    pub title: String,
    pub prompt_text: String,
    pub category: Category,
    pub tags: Vec<String>,
    pub author: String,
    pub image_url: Option<String>,
    pub is_approved: bool,
}

/// Partial update: `None` leaves the stored value untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PromptChanges {
    pub title: Option<String>,
    pub prompt_text: Option<String>,
    pub category: Option<Category>,
    pub tags: Option<Vec<String>>,
    pub author: Option<String>,
    pub image_url: Option<String>,
    pub is_approved: Option<bool>,
}

impl PromptChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.prompt_text.is_none()
            && self.category.is_none()
            && self.tags.is_none()
            && self.author.is_none()
            && self.image_url.is_none()
            && self.is_approved.is_none()
    }

    /// Merge into `prompt`, returning whether any stored value changed
    #[cfg(test)]
    pub fn apply(&self, prompt: &mut Prompt) -> bool {
        fn set<T: PartialEq + Clone>(slot: &mut T, value: &Option<T>) -> bool {
            match value {
                Some(v) if slot != v => {
                    *slot = v.clone();
                    true
                }
                _ => false,
            }
        }

        let mut modified = false;
        modified |= set(&mut prompt.title, &self.title);
        modified |= set(&mut prompt.prompt_text, &self.prompt_text);
        modified |= set(&mut prompt.category, &self.category);
        modified |= set(&mut prompt.tags, &self.tags);
        modified |= set(&mut prompt.author, &self.author);
        if let Some(url) = &self.image_url {
            if prompt.image_url.as_ref() != Some(url) {
                prompt.image_url = Some(url.clone());
                modified = true;
            }
        }
        modified |= set(&mut prompt.is_approved, &self.is_approved);
        modified
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn sample_prompt() -> Prompt {
        Prompt {
            id: PromptId::from(Uuid::new_v4()),
            title: "Sunset story".to_string(),
            prompt_text: "Write a story about a sunset".to_string(),
            category: Category::Story,
            tags: tags(&["a", "b"]),
            author: "Sara".to_string(),
            image_url: None,
            is_approved: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_prompt_id_parse() {
        let id = Uuid::new_v4();
        assert_eq!(
            PromptId::parse(&id.to_string()).unwrap(),
            PromptId::from(id)
        );
        assert!(matches!(
            PromptId::parse("not-an-id"),
            Err(AppError::InvalidId(_))
        ));
        assert!(matches!(PromptId::parse(""), Err(AppError::InvalidId(_))));
        // 24-hex document ids are not valid here
        assert!(PromptId::parse("507f1f77bcf86cd799439011").is_err());
    }

    #[test]
    fn test_category_filter_parse() {
        assert_eq!("All".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "Story".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::Story)
        );
        assert!("story".parse::<CategoryFilter>().is_err());
        assert!("All".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_rejects_all_in_json() {
        let parsed: Result<Category, _> = serde_json::from_str("\"All\"");
        assert!(parsed.is_err());
        let parsed: Category = serde_json::from_str("\"Banner\"").unwrap();
        assert_eq!(parsed, Category::Banner);
    }

    #[test]
    fn test_match_all_tags() {
        let record = tags(&["a", "b"]);
        assert!(TagFilter::MatchAll(tags(&["a", "b"])).matches(&record));
        assert!(TagFilter::MatchAll(tags(&["a"])).matches(&record));
        assert!(!TagFilter::MatchAll(tags(&["a", "c"])).matches(&record));
        assert!(TagFilter::MatchAll(vec![]).matches(&record));
    }

    #[test]
    fn test_match_any_tags() {
        let record = tags(&["a", "b"]);
        assert!(TagFilter::MatchAny(tags(&["a", "c"])).matches(&record));
        assert!(!TagFilter::MatchAny(tags(&["c", "d"])).matches(&record));
        assert!(TagFilter::MatchAny(vec![]).matches(&record));
    }

    #[test]
    fn test_filter_hides_unapproved() {
        let mut prompt = sample_prompt();
        prompt.is_approved = false;
        assert!(!PromptFilter::approved().matches(&prompt));
        assert!(PromptFilter::default().matches(&prompt));
    }

    #[test]
    fn test_filter_category() {
        let prompt = sample_prompt();
        let mut filter = PromptFilter::approved();
        filter.category = CategoryFilter::Only(Category::Post);
        assert!(!filter.matches(&prompt));
        filter.category = CategoryFilter::Only(Category::Story);
        assert!(filter.matches(&prompt));
    }

    #[test]
    fn test_changes_apply_only_set_fields() {
        let mut prompt = sample_prompt();
        let original = prompt.clone();
        let changes = PromptChanges {
            title: Some("New title".to_string()),
            is_approved: Some(false),
            ..Default::default()
        };

        assert!(changes.apply(&mut prompt));
        assert_eq!(prompt.title, "New title");
        assert!(!prompt.is_approved);
        assert_eq!(prompt.prompt_text, original.prompt_text);
        assert_eq!(prompt.tags, original.tags);
        assert_eq!(prompt.author, original.author);
    }

    #[test]
    fn test_changes_with_identical_values_modify_nothing() {
        let mut prompt = sample_prompt();
        let changes = PromptChanges {
            title: Some(prompt.title.clone()),
            ..Default::default()
        };
        assert!(!changes.is_empty());
        assert!(!changes.apply(&mut prompt));
    }

    #[test]
    fn test_prompt_serializes_id_as_underscore_id() {
        let prompt = sample_prompt();
        let json = serde_json::to_value(&prompt).unwrap();
        assert_eq!(json["_id"], prompt.id.to_string());
        assert_eq!(json["category"], "Story");
        assert!(json.get("id").is_none());
    }
}
