//! Example repository port.
//!
//! Defines the contract for persisting and retrieving Example aggregates.
//! Two adapters implement it (in-memory and Postgres); callers must not be
//! able to tell them apart from error behavior alone.
//!
//! # Design
//!
//! - **Uniqueness**: `create` and `update` enforce id/email uniqueness
//!   atomically with the write, never as a separate check
//! - **Defensive copies**: returned entities are independent of stored
//!   state; mutating them never affects the repository
//! - **Typed errors**: the four kinds below are the only signals the
//!   application layer distinguishes

use crate::domain::example::Example;
use crate::domain::foundation::ExampleId;
use async_trait::async_trait;
use thiserror::Error;

/// Errors returned by repository operations.
///
/// Adapters translate backend-specific failures into these variants so the
/// application layer never inspects error strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// No record matched the lookup key (id or email).
    #[error("record not found: {0}")]
    NotFound(String),

    /// A record with the same id or email already exists.
    #[error("record already exists: {0}")]
    AlreadyExists(String),

    /// The backend could not be reached.
    #[error("storage connection failed: {0}")]
    Connection(String),

    /// The operation exceeded the backend's deadline.
    #[error("storage operation timed out: {0}")]
    Timeout(String),

    /// Any other backend failure, carried opaquely.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Repository port for Example aggregate persistence.
#[async_trait]
pub trait ExampleRepository: Send + Sync {
    /// Insert a new example.
    ///
    /// The uniqueness check and the insert are one atomic step: of any set
    /// of concurrent `create` calls sharing an email, at most one succeeds.
    ///
    /// # Errors
    ///
    /// - `AlreadyExists` if the id or email collides with a live record
    async fn create(&self, example: &Example) -> Result<(), RepositoryError>;

    /// Fetch an example by ID.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no record has this id
    async fn get_by_id(&self, id: ExampleId) -> Result<Example, RepositoryError>;

    /// Fetch an example by email.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no record has this email
    async fn get_by_email(&self, email: &str) -> Result<Example, RepositoryError>;

    /// Replace the stored state of an existing example.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the id does not exist
    /// - `AlreadyExists` if the email belongs to a different record
    async fn update(&self, example: &Example) -> Result<(), RepositoryError>;

    /// Permanently remove an example.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the id does not exist
    async fn delete(&self, id: ExampleId) -> Result<(), RepositoryError>;

    /// Return one page of examples.
    ///
    /// Ordered by creation time descending with id as tiebreaker, so the
    /// order is total and pagination never duplicates or drops records.
    /// An offset past the end yields an empty page, not an error.
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Example>, RepositoryError>;

    /// Total number of live records.
    async fn count(&self) -> Result<u64, RepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time check that trait is object-safe
    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn ExampleRepository) {}

    #[test]
    fn repository_error_messages_name_the_key() {
        let err = RepositoryError::NotFound("ex-123".to_string());
        assert!(err.to_string().contains("ex-123"));

        let err = RepositoryError::AlreadyExists("a@b.com".to_string());
        assert!(err.to_string().contains("a@b.com"));
    }

    #[test]
    fn repository_error_variants_are_distinguishable() {
        let not_found = RepositoryError::NotFound("x".to_string());
        let conflict = RepositoryError::AlreadyExists("x".to_string());
        assert_ne!(not_found, conflict);
    }
}
