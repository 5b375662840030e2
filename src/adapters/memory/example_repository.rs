//! In-Memory Example Repository Adapter
//!
//! Stores examples in a process-local map. Useful for testing, development,
//! and running the service with zero external infrastructure.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::example::Example;
use crate::domain::foundation::ExampleId;
use crate::ports::{ExampleRepository, RepositoryError};

/// In-memory storage for examples.
///
/// Uniqueness checks and the corresponding write happen under a single
/// write lock, so concurrent creates racing on one email cannot both
/// succeed. All reads hand out clones of the stored state.
#[derive(Debug, Clone)]
pub struct InMemoryExampleRepository {
    examples: Arc<RwLock<HashMap<ExampleId, Example>>>,
}

impl InMemoryExampleRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            examples: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        self.examples.write().await.clear();
    }

    /// Get the number of stored examples
    pub async fn len(&self) -> usize {
        self.examples.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.examples.read().await.is_empty()
    }
}

impl Default for InMemoryExampleRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExampleRepository for InMemoryExampleRepository {
    async fn create(&self, example: &Example) -> Result<(), RepositoryError> {
        let mut examples = self.examples.write().await;

        if examples.contains_key(&example.id()) {
            return Err(RepositoryError::AlreadyExists(example.id().to_string()));
        }
        if examples.values().any(|e| e.email() == example.email()) {
            return Err(RepositoryError::AlreadyExists(example.email().to_string()));
        }

        examples.insert(example.id(), example.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: ExampleId) -> Result<Example, RepositoryError> {
        let examples = self.examples.read().await;
        examples
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }

    async fn get_by_email(&self, email: &str) -> Result<Example, RepositoryError> {
        let examples = self.examples.read().await;
        examples
            .values()
            .find(|e| e.email() == email)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(email.to_string()))
    }

    async fn update(&self, example: &Example) -> Result<(), RepositoryError> {
        let mut examples = self.examples.write().await;

        if !examples.contains_key(&example.id()) {
            return Err(RepositoryError::NotFound(example.id().to_string()));
        }
        if examples
            .values()
            .any(|e| e.email() == example.email() && e.id() != example.id())
        {
            return Err(RepositoryError::AlreadyExists(example.email().to_string()));
        }

        examples.insert(example.id(), example.clone());
        Ok(())
    }

    async fn delete(&self, id: ExampleId) -> Result<(), RepositoryError> {
        let mut examples = self.examples.write().await;
        examples
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Example>, RepositoryError> {
        let examples = self.examples.read().await;

        let mut all: Vec<Example> = examples.values().cloned().collect();
        all.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| a.id().cmp(&b.id()))
        });

        Ok(all
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        Ok(self.examples.read().await.len() as u64)
    }
}
