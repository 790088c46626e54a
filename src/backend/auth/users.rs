/**
 * User Model and Database Operations
 *
 * This module handles user data and database operations. Handlers only see
 * the [`UserRepository`] trait; the PostgreSQL implementation is used in
 * production and the in-memory one in development and tests.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tokio::sync::RwLock;

use crate::backend::error::ModelError;

/// User struct representing a user in the database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID
    pub id: i64,
    /// Display name
    pub name: String,
    /// User email address (unique)
    pub email: String,
    /// Hashed password (bcrypt)
    pub hashed_password: String,
    /// Created at timestamp
    pub created: DateTime<Utc>,
}

/// Storage collaborator for user accounts
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Create a user, hashing the password
    ///
    /// Returns `ModelError::DuplicateEmail` when the email is taken.
    async fn insert(&self, name: &str, email: &str, password: &str) -> Result<(), ModelError>;

    /// Check credentials and return the user id
    ///
    /// Unknown email and wrong password both return
    /// `ModelError::InvalidCredentials`.
    async fn authenticate(&self, email: &str, password: &str) -> Result<i64, ModelError>;

    /// Whether a user with this id still exists
    async fn exists(&self, id: i64) -> Result<bool, ModelError>;
}

/// PostgreSQL-backed users
#[derive(Clone)]
pub struct PgUsers {
    pool: PgPool,
    cost: u32,
}

impl PgUsers {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            cost: bcrypt::DEFAULT_COST,
        }
    }
}

#[async_trait]
impl UserRepository for PgUsers {
    async fn insert(&self, name: &str, email: &str, password: &str) -> Result<(), ModelError> {
        let hashed_password = bcrypt::hash(password, self.cost)?;

        let result = sqlx::query(
            r#"
            INSERT INTO users (name, email, hashed_password, created)
            VALUES ($1, $2, $3, NOW())
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(&hashed_password)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(ModelError::DuplicateEmail)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<i64, ModelError> {
        let row = sqlx::query_as::<_, (i64, String)>(
            r#"
            SELECT id, hashed_password
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        let (id, hashed_password) = row.ok_or(ModelError::InvalidCredentials)?;

        if !bcrypt::verify(password, &hashed_password)? {
            return Err(ModelError::InvalidCredentials);
        }

        Ok(id)
    }

    async fn exists(&self, id: i64) -> Result<bool, ModelError> {
        let (exists,) = sqlx::query_as::<_, (bool,)>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }
}

/// In-memory users
///
/// Emails are compared exactly, like the unique index in the database.
#[derive(Default)]
pub struct MemoryUsers {
    users: RwLock<Vec<User>>,
    cost: Option<u32>,
}

impl MemoryUsers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom bcrypt cost (tests use the minimum of 4)
    pub fn with_cost(cost: u32) -> Self {
        Self {
            users: RwLock::default(),
            cost: Some(cost),
        }
    }

    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn remove(&self, id: i64) {
        self.users.write().await.retain(|user| user.id != id);
    }
}

#[async_trait]
impl UserRepository for MemoryUsers {
    async fn insert(&self, name: &str, email: &str, password: &str) -> Result<(), ModelError> {
        let hashed_password = bcrypt::hash(password, self.cost.unwrap_or(bcrypt::DEFAULT_COST))?;

        let mut users = self.users.write().await;
        if users.iter().any(|user| user.email == email) {
            return Err(ModelError::DuplicateEmail);
        }

        let id = users.iter().map(|user| user.id).max().unwrap_or(0) + 1;
        users.push(User {
            id,
            name: name.to_string(),
            email: email.to_string(),
            hashed_password,
            created: Utc::now(),
        });
        Ok(())
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<i64, ModelError> {
        let users = self.users.read().await;
        let user = users
            .iter()
            .find(|user| user.email == email)
            .ok_or(ModelError::InvalidCredentials)?;

        if !bcrypt::verify(password, &user.hashed_password)? {
            return Err(ModelError::InvalidCredentials);
        }

        Ok(user.id)
    }

    async fn exists(&self, id: i64) -> Result<bool, ModelError> {
        Ok(self.users.read().await.iter().any(|user| user.id == id))
    }
}
