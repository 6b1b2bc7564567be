use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;

use crate::auth::repo_types::User;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("username already taken")]
    UsernameTaken,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Storage for user records, shared by every handler through `AppState`.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Exact-match lookup; at most one row.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    /// Inserts a user and returns the generated id. A duplicate username
    /// yields [`RepoError::UsernameTaken`].
    async fn insert_user(&self, username: &str, password_hash: &str) -> Result<i64, RepoError>;
}

#[derive(Clone)]
pub struct PgUserRepository {
    db: PgPool,
}

impl PgUserRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password
            FROM users
            WHERE username = $1
            LIMIT 1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn insert_user(&self, username: &str, password_hash: &str) -> Result<i64, RepoError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO users (username, password)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                RepoError::UsernameTaken
            } else {
                RepoError::Database(e)
            }
        })?;
        Ok(id)
    }
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| code.as_ref() == "23505"),
        _ => false,
    }
}
