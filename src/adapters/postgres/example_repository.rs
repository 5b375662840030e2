//! PostgreSQL implementation of ExampleRepository.
//!
//! Persists examples to PostgreSQL. Email uniqueness is enforced by the
//! schema's unique index, so a conflicting insert or update surfaces as a
//! unique violation rather than a lost race.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::example::Example;
use crate::domain::foundation::{ExampleId, Timestamp};
use crate::ports::{ExampleRepository, RepositoryError};

/// PostgreSQL implementation of ExampleRepository.
#[derive(Clone)]
pub struct PostgresExampleRepository {
    pool: PgPool,
}

impl PostgresExampleRepository {
    /// Creates a new PostgresExampleRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ExampleRepository for PostgresExampleRepository {
    async fn create(&self, example: &Example) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO examples (id, name, email, age, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(example.id().as_uuid())
        .bind(example.name())
        .bind(example.email())
        .bind(example.age())
        .bind(example.created_at().as_datetime())
        .bind(example.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(example.email(), e))?;

        Ok(())
    }

    async fn get_by_id(&self, id: ExampleId) -> Result<Example, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, age, created_at, updated_at
            FROM examples
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(&id.to_string(), e))?;

        match row {
            Some(row) => row_to_example(row),
            None => Err(RepositoryError::NotFound(id.to_string())),
        }
    }

    async fn get_by_email(&self, email: &str) -> Result<Example, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, age, created_at, updated_at
            FROM examples
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(email, e))?;

        match row {
            Some(row) => row_to_example(row),
            None => Err(RepositoryError::NotFound(email.to_string())),
        }
    }

    async fn update(&self, example: &Example) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE examples SET
                name = $2,
                email = $3,
                age = $4,
                updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(example.id().as_uuid())
        .bind(example.name())
        .bind(example.email())
        .bind(example.age())
        .bind(example.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(example.email(), e))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(example.id().to_string()));
        }

        Ok(())
    }

    async fn delete(&self, id: ExampleId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM examples WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(&id.to_string(), e))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Example>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, email, age, created_at, updated_at
            FROM examples
            ORDER BY created_at DESC, id ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("examples page", e))?;

        rows.into_iter().map(row_to_example).collect()
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM examples")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("examples count", e))?;

        Ok(result.0 as u64)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

/// Translate a sqlx failure into the repository's error vocabulary.
///
/// `key` identifies the record involved (id or email) and ends up in the
/// error message, never in a query.
fn map_sqlx_error(key: &str, err: sqlx::Error) -> RepositoryError {
    match err {
        sqlx::Error::RowNotFound => RepositoryError::NotFound(key.to_string()),
        sqlx::Error::PoolTimedOut => {
            RepositoryError::Timeout(format!("connection pool exhausted accessing {}", key))
        }
        sqlx::Error::Io(e) => RepositoryError::Connection(e.to_string()),
        sqlx::Error::Tls(e) => RepositoryError::Connection(e.to_string()),
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepositoryError::AlreadyExists(key.to_string())
        }
        other => RepositoryError::Backend(other.to_string()),
    }
}

fn column_error(column: &'static str) -> impl FnOnce(sqlx::Error) -> RepositoryError {
    move |e| RepositoryError::Backend(format!("Failed to read column '{}': {}", column, e))
}

fn row_to_example(row: sqlx::postgres::PgRow) -> Result<Example, RepositoryError> {
    let id: uuid::Uuid = row.try_get("id").map_err(column_error("id"))?;
    let name: String = row.try_get("name").map_err(column_error("name"))?;
    let email: String = row.try_get("email").map_err(column_error("email"))?;
    let age: i32 = row.try_get("age").map_err(column_error("age"))?;
    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(column_error("created_at"))?;
    let updated_at: chrono::DateTime<chrono::Utc> = row
        .try_get("updated_at")
        .map_err(column_error("updated_at"))?;

    Ok(Example::reconstitute(
        ExampleId::from_uuid(id),
        name,
        email,
        age,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}
