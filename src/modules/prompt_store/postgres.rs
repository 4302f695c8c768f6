use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::PromptStore;
use crate::core::error::{AppError, Result};
use crate::features::prompts::models::{
    CategoryFilter, NewPrompt, Prompt, PromptChanges, PromptFilter, PromptId, TagFilter,
};

const PROMPT_COLUMNS: &str =
    "id, title, prompt_text, category, tags, author, image_url, is_approved, created_at";

/// PostgreSQL-backed prompt collection
pub struct PgPromptStore {
    pool: PgPool,
}

impl std::fmt::Debug for PgPromptStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgPromptStore")
            .field("pool", &"<PgPool>")
            .finish()
    }
}

impl PgPromptStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &PromptFilter) {
        builder.push(" WHERE TRUE");

        if filter.approved_only {
            builder.push(" AND is_approved = TRUE");
        }

        if let CategoryFilter::Only(category) = filter.category {
            builder.push(" AND category = ").push_bind(category);
        }

        match &filter.tags {
            Some(tags) if !tags.is_empty() => {
                let operator = match tags {
                    TagFilter::MatchAll(_) => " AND tags @> ",
                    TagFilter::MatchAny(_) => " AND tags && ",
                };
                builder
                    .push(operator)
                    .push_bind(tags.tags().to_vec())
                    .push("::text[]");
            }
            _ => {}
        }
    }
}

#[async_trait]
impl PromptStore for PgPromptStore {
    async fn find(&self, filter: &PromptFilter, limit: Option<i64>) -> Result<Vec<Prompt>> {
        let mut builder =
            QueryBuilder::<Postgres>::new(format!("SELECT {PROMPT_COLUMNS} FROM prompts"));
        Self::push_filter(&mut builder, filter);
        builder.push(" ORDER BY created_at DESC");
        if let Some(limit) = limit {
            builder.push(" LIMIT ").push_bind(limit);
        }

        builder
            .build_query_as::<Prompt>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list prompts: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn find_one(&self, id: PromptId) -> Result<Option<Prompt>> {
        sqlx::query_as::<_, Prompt>(&format!(
            "SELECT {PROMPT_COLUMNS} FROM prompts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn insert(&self, prompt: NewPrompt) -> Result<Prompt> {
        sqlx::query_as::<_, Prompt>(&format!(
            r#"
            INSERT INTO prompts (title, prompt_text, category, tags, author, image_url, is_approved)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {PROMPT_COLUMNS}
            "#
        ))
        .bind(prompt.title)
        .bind(prompt.prompt_text)
        .bind(prompt.category)
        .bind(prompt.tags)
        .bind(prompt.author)
        .bind(prompt.image_url)
        .bind(prompt.is_approved)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert prompt: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn update(&self, id: PromptId, changes: &PromptChanges) -> Result<u64> {
        // The row comparison keeps untouched records out of the affected count
        let result = sqlx::query(
            r#"
            UPDATE prompts
            SET title = COALESCE($1, title),
                prompt_text = COALESCE($2, prompt_text),
                category = COALESCE($3, category),
                tags = COALESCE($4, tags),
                author = COALESCE($5, author),
                image_url = COALESCE($6, image_url),
                is_approved = COALESCE($7, is_approved)
            WHERE id = $8
              AND (title, prompt_text, category, tags, author, image_url, is_approved)
                  IS DISTINCT FROM
                  (COALESCE($1, title), COALESCE($2, prompt_text), COALESCE($3, category),
                   COALESCE($4, tags), COALESCE($5, author), COALESCE($6, image_url),
                   COALESCE($7, is_approved))
            "#,
        )
        .bind(changes.title.as_deref())
        .bind(changes.prompt_text.as_deref())
        .bind(changes.category)
        .bind(changes.tags.clone())
        .bind(changes.author.as_deref())
        .bind(changes.image_url.as_deref())
        .bind(changes.is_approved)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update prompt {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: PromptId) -> Result<u64> {
        let result = sqlx::query("DELETE FROM prompts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(result.rows_affected())
    }

    async fn distinct_tags(&self) -> Result<Vec<String>> {
        sqlx::query_scalar::<_, String>("SELECT DISTINCT unnest(tags) FROM prompts")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn aggregate_tags(&self, approved_only: bool) -> Result<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            r#"
            SELECT tag
            FROM prompts, unnest(tags) AS tag
            WHERE ($1 = FALSE OR is_approved = TRUE)
            GROUP BY tag
            ORDER BY tag COLLATE "C" ASC
            "#,
        )
        .bind(approved_only)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }
}
