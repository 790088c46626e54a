/**
 * Snippet Model and Database Operations
 *
 * Snippets expire a fixed number of days after creation. Expired snippets
 * are never returned by `get` or `latest`.
 */

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use sqlx::PgPool;
use tokio::sync::RwLock;

use crate::backend::error::ModelError;

/// How many snippets the home page lists
pub const LATEST_LIMIT: usize = 10;

/// A single snippet
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Snippet {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
    pub expires: DateTime<Utc>,
}

/// Storage collaborator for snippets
#[async_trait]
pub trait SnippetRepository: Send + Sync + 'static {
    /// Store a snippet expiring `expires_days` from now and return its id
    async fn insert(&self, title: &str, content: &str, expires_days: i32) -> Result<i64, ModelError>;

    /// Fetch an unexpired snippet, `ModelError::NoRecord` otherwise
    async fn get(&self, id: i64) -> Result<Snippet, ModelError>;

    /// The newest unexpired snippets, newest first
    async fn latest(&self) -> Result<Vec<Snippet>, ModelError>;
}

/// PostgreSQL-backed snippets
#[derive(Clone)]
pub struct PgSnippets {
    pool: PgPool,
}

impl PgSnippets {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SnippetRepository for PgSnippets {
    async fn insert(&self, title: &str, content: &str, expires_days: i32) -> Result<i64, ModelError> {
        let (id,) = sqlx::query_as::<_, (i64,)>(
            r#"
            INSERT INTO snippets (title, content, created, expires)
            VALUES ($1, $2, NOW(), NOW() + make_interval(days => $3))
            RETURNING id
            "#,
        )
        .bind(title)
        .bind(content)
        .bind(expires_days)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn get(&self, id: i64) -> Result<Snippet, ModelError> {
        sqlx::query_as::<_, Snippet>(
            r#"
            SELECT id, title, content, created, expires
            FROM snippets
            WHERE expires > NOW() AND id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(ModelError::NoRecord)
    }

    async fn latest(&self) -> Result<Vec<Snippet>, ModelError> {
        let snippets = sqlx::query_as::<_, Snippet>(
            r#"
            SELECT id, title, content, created, expires
            FROM snippets
            WHERE expires > NOW()
            ORDER BY id DESC
            LIMIT $1
            "#,
        )
        .bind(LATEST_LIMIT as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(snippets)
    }
}

/// In-memory snippets
#[derive(Default)]
pub struct MemorySnippets {
    snippets: RwLock<Vec<Snippet>>,
}

impl MemorySnippets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a snippet as-is (tests use this to plant expired rows)
    pub async fn seed(&self, snippet: Snippet) {
        self.snippets.write().await.push(snippet);
    }

    pub async fn count(&self) -> usize {
        self.snippets.read().await.len()
    }
}

#[async_trait]
impl SnippetRepository for MemorySnippets {
    async fn insert(&self, title: &str, content: &str, expires_days: i32) -> Result<i64, ModelError> {
        let mut snippets = self.snippets.write().await;
        let id = snippets.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        let now = Utc::now();
        snippets.push(Snippet {
            id,
            title: title.to_string(),
            content: content.to_string(),
            created: now,
            expires: now + Duration::days(i64::from(expires_days)),
        });
        Ok(id)
    }

    async fn get(&self, id: i64) -> Result<Snippet, ModelError> {
        let now = Utc::now();
        self.snippets
            .read()
            .await
            .iter()
            .find(|s| s.id == id && s.expires > now)
            .cloned()
            .ok_or(ModelError::NoRecord)
    }

    async fn latest(&self) -> Result<Vec<Snippet>, ModelError> {
        let now = Utc::now();
        let mut live: Vec<Snippet> = self
            .snippets
            .read()
            .await
            .iter()
            .filter(|s| s.expires > now)
            .cloned()
            .collect();
        live.sort_by(|a, b| b.id.cmp(&a.id));
        live.truncate(LATEST_LIMIT);
        Ok(live)
    }
}
