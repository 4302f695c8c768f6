use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::prompts::models::{Category, CategoryFilter, PromptChanges};
use crate::shared::constants::{DEFAULT_PUBLIC_LIMIT, MAX_PUBLIC_LIMIT};

// Create request (public submission and admin creation share the body)
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreatePromptDto {
    #[validate(length(min = 3, max = 100))]
    pub title: String,

    #[validate(length(min = 10))]
    pub prompt_text: String,

    pub image_url: Option<String>,

    #[serde(default)]
    pub category: Category,

    #[serde(default)]
    pub tags: Vec<String>,

    /// Name of the creator; required on public submission
    #[serde(default)]
    pub author: Option<String>,
}

impl CreatePromptDto {
    /// Author as submitted, `None` when missing or blank
    pub fn given_author(&self) -> Option<&str> {
        self.author.as_deref().filter(|a| !a.trim().is_empty())
    }
}

// Update request; absent and null fields are both left untouched
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdatePromptDto {
    #[validate(length(min = 3, max = 100))]
    pub title: Option<String>,

    #[validate(length(min = 10))]
    pub prompt_text: Option<String>,

    pub image_url: Option<String>,

    pub category: Option<Category>,

    pub tags: Option<Vec<String>>,

    pub author: Option<String>,

    pub is_approved: Option<bool>,
}

impl From<UpdatePromptDto> for PromptChanges {
    fn from(dto: UpdatePromptDto) -> Self {
        Self {
            title: dto.title,
            prompt_text: dto.prompt_text,
            category: dto.category,
            tags: dto.tags,
            author: dto.author,
            image_url: dto.image_url,
            is_approved: dto.is_approved,
        }
    }
}

/// Query params of the public listing.
///
/// Documentation only: `tags` is repeatable, so handlers parse the raw query
/// string with [`PromptListQuery::from_query`].
#[derive(Debug, Deserialize, IntoParams)]
#[allow(dead_code)]
pub struct PromptQueryParams {
    /// Category, or `All` for every category
    pub category: Option<String>,
    /// Repeatable; every listed tag must be present
    pub tags: Option<Vec<String>>,
    /// Maximum number of prompts (default: 50)
    #[param(minimum = 1, maximum = 500)]
    pub limit: Option<i64>,
}

/// Query params of the internal any-tag search
#[derive(Debug, Deserialize, IntoParams)]
#[allow(dead_code)]
pub struct PromptSearchParams {
    /// Category, or `All` for every category
    pub category: Option<String>,
    /// Repeatable; any listed tag may match
    pub tags: Option<Vec<String>>,
}

/// Parsed listing query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptListQuery {
    pub category: CategoryFilter,
    pub tags: Vec<String>,
    pub limit: i64,
}

impl Default for PromptListQuery {
    fn default() -> Self {
        Self {
            category: CategoryFilter::All,
            tags: Vec::new(),
            limit: DEFAULT_PUBLIC_LIMIT,
        }
    }
}

impl PromptListQuery {
    /// Parse a raw query string such as `category=Story&tags=a&tags=b&limit=10`.
    /// Unknown keys are ignored; empty values are treated as absent.
    pub fn from_query(raw: Option<&str>) -> Result<Self> {
        let query = Self::parse(raw, true)?;

        if !(1..=MAX_PUBLIC_LIMIT).contains(&query.limit) {
            return Err(AppError::Validation(format!(
                "limit must be between 1 and {}",
                MAX_PUBLIC_LIMIT
            )));
        }

        Ok(query)
    }

    /// Like [`Self::from_query`] for the unbounded search: `limit` is ignored
    pub fn from_search_query(raw: Option<&str>) -> Result<Self> {
        Self::parse(raw, false)
    }

    fn parse(raw: Option<&str>, with_limit: bool) -> Result<Self> {
        let mut query = Self::default();

        for (key, value) in url::form_urlencoded::parse(raw.unwrap_or_default().as_bytes()) {
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                "category" => query.category = value.parse()?,
                "tags" => query.tags.push(value.into_owned()),
                "limit" if with_limit => {
                    query.limit = value.parse::<i64>().map_err(|_| {
                        AppError::Validation("limit must be a valid number".to_string())
                    })?;
                }
                _ => {}
            }
        }

        Ok(query)
    }
}
