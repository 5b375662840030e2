//! ExampleService - Core CRUD operations and business rules for examples.
//!
//! This is the inner application layer: it owns input validation, the
//! configured business rules, and all repository access. It knows nothing
//! about the partner API; orchestration with external calls lives in
//! [`crate::application::ExampleUseCase`].

use std::sync::Arc;

use crate::config::LimitsConfig;
use crate::domain::example::{Example, ExampleError};
use crate::domain::foundation::{ExampleId, ValidationError};
use crate::ports::{ExampleRepository, RepositoryError};

/// One page of examples with pagination metadata.
///
/// `limit` and `offset` are the effective values after clamping, not the
/// raw values the caller passed in.
#[derive(Debug, Clone)]
pub struct ExamplePage {
    pub examples: Vec<Example>,
    pub total: u64,
    pub limit: i64,
    pub offset: i64,
}

/// Core service for example lifecycle operations.
pub struct ExampleService {
    repository: Arc<dyn ExampleRepository>,
    limits: LimitsConfig,
}

impl ExampleService {
    pub fn new(repository: Arc<dyn ExampleRepository>, limits: LimitsConfig) -> Self {
        Self { repository, limits }
    }

    /// Create a new example.
    ///
    /// Runs input validation and business rules, then persists. The
    /// duplicate-email pre-check here is best effort: the repository
    /// enforces email uniqueness atomically on the write itself, so a
    /// failed lookup is logged and the write proceeds.
    ///
    /// # Errors
    ///
    /// - `Validation` if a field violates the configured bounds
    /// - `BusinessRule` if a configured rule rejects the combination
    /// - `AlreadyExists` if the email is already taken
    /// - `Infrastructure` if storage fails
    pub async fn create_example(
        &self,
        name: String,
        email: String,
        age: i32,
    ) -> Result<Example, ExampleError> {
        self.validate_input(&name, &email, age)?;
        self.validate_business_rules(&name, &email, age)?;

        match self.repository.get_by_email(&email).await {
            Ok(_) => return Err(ExampleError::already_exists(&email)),
            Err(RepositoryError::NotFound(_)) => {}
            Err(err) => {
                tracing::warn!(
                    email = %email,
                    error = %err,
                    "Duplicate email pre-check failed, deferring to storage constraint"
                );
            }
        }

        let example = Example::new(ExampleId::new(), name, email, age)?;
        self.repository.create(&example).await?;

        tracing::info!(example_id = %example.id(), "Example created");
        Ok(example)
    }

    /// Fetch an example by ID.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no example has this id
    pub async fn get_example_by_id(&self, id: ExampleId) -> Result<Example, ExampleError> {
        Ok(self.repository.get_by_id(id).await?)
    }

    /// Fetch an example by email.
    ///
    /// # Errors
    ///
    /// - `Validation` if the email is empty
    /// - `NotFound` if no example has this email
    pub async fn get_example_by_email(&self, email: &str) -> Result<Example, ExampleError> {
        if email.is_empty() {
            return Err(ValidationError::empty_field("email").into());
        }
        Ok(self.repository.get_by_email(email).await?)
    }

    /// Update an existing example with a full replacement of its fields.
    ///
    /// The email-conflict check only fires when the email actually changes,
    /// and a conflict means some other example owns the new address.
    ///
    /// # Errors
    ///
    /// - `Validation` / `BusinessRule` as for create
    /// - `NotFound` if the id does not exist
    /// - `AlreadyExists` if another example owns the new email
    pub async fn update_example(
        &self,
        id: ExampleId,
        name: String,
        email: String,
        age: i32,
    ) -> Result<Example, ExampleError> {
        self.validate_input(&name, &email, age)?;
        self.validate_business_rules(&name, &email, age)?;

        let mut example = self.repository.get_by_id(id).await?;

        if example.email() != email {
            match self.repository.get_by_email(&email).await {
                Ok(other) if other.id() != id => {
                    return Err(ExampleError::already_exists(&email));
                }
                Ok(_) => {}
                Err(RepositoryError::NotFound(_)) => {}
                Err(err) => {
                    tracing::warn!(
                        email = %email,
                        error = %err,
                        "Email conflict pre-check failed, deferring to storage constraint"
                    );
                }
            }
        }

        example.update(name, email, age)?;
        self.repository.update(&example).await?;

        tracing::info!(example_id = %example.id(), "Example updated");
        Ok(example)
    }

    /// Delete an example by ID.
    ///
    /// Returns the deleted record so callers can build audit or event
    /// payloads from its final state.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the id does not exist
    pub async fn delete_example(&self, id: ExampleId) -> Result<Example, ExampleError> {
        let example = self.repository.get_by_id(id).await?;
        self.repository.delete(id).await?;

        tracing::info!(example_id = %id, "Example deleted");
        Ok(example)
    }

    /// List examples newest-first with clamped pagination.
    ///
    /// A non-positive limit falls back to the configured default page size,
    /// a limit above the maximum is capped, and a negative offset becomes
    /// zero. An offset past the end yields an empty page.
    pub async fn list_examples(&self, limit: i64, offset: i64) -> Result<ExamplePage, ExampleError> {
        let limit = if limit <= 0 {
            self.limits.default_page_size
        } else {
            limit.min(self.limits.max_page_size)
        };
        let offset = offset.max(0);

        let examples = self.repository.list(limit, offset).await?;
        let total = self.repository.count().await?;

        Ok(ExamplePage {
            examples,
            total,
            limit,
            offset,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Validation
    // ─────────────────────────────────────────────────────────────────────────

    /// Field-level validation against the configured bounds.
    ///
    /// The entity applies its own authoritative field rules on construction;
    /// this pass runs first so obviously malformed input never reaches the
    /// repository.
    fn validate_input(&self, name: &str, email: &str, age: i32) -> Result<(), ExampleError> {
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name").into());
        }

        let name_len = name.chars().count();
        if name_len < self.limits.min_name_length || name_len > self.limits.max_name_length {
            return Err(ValidationError::out_of_range(
                "name",
                self.limits.min_name_length as i32,
                self.limits.max_name_length as i32,
                name_len as i32,
            )
            .into());
        }

        if !has_plausible_email_shape(email) {
            return Err(
                ValidationError::invalid_format("email", "expected local@domain.tld").into(),
            );
        }

        if age < self.limits.min_age || age > self.limits.max_age {
            return Err(ValidationError::out_of_range(
                "age",
                self.limits.min_age,
                self.limits.max_age,
                age,
            )
            .into());
        }

        Ok(())
    }

    /// Business rules beyond per-field validation.
    ///
    /// Checked in a fixed order with the first violation winning:
    /// blocked names, then the corporate-domain age floor, then the
    /// VIP-domain age floor.
    fn validate_business_rules(&self, name: &str, email: &str, age: i32) -> Result<(), ExampleError> {
        if self.limits.blocked_names.iter().any(|blocked| blocked == name) {
            return Err(ExampleError::business_rule(format!(
                "name '{}' is not allowed",
                name
            )));
        }

        if self
            .limits
            .corporate_domains
            .iter()
            .any(|domain| email.ends_with(domain.as_str()))
            && age < self.limits.corporate_min_age
        {
            return Err(ExampleError::business_rule(format!(
                "corporate email accounts require a minimum age of {}",
                self.limits.corporate_min_age
            )));
        }

        if self
            .limits
            .vip_domains
            .iter()
            .any(|domain| email.ends_with(domain.as_str()))
            && age < self.limits.vip_min_age
        {
            return Err(ExampleError::business_rule(format!(
                "VIP email accounts require a minimum age of {}",
                self.limits.vip_min_age
            )));
        }

        Ok(())
    }
}

/// Positional shape check for email addresses.
///
/// Accepts any string of at least five bytes with a single `@` that is not
/// the first character, and a final `.` that sits at least two characters
/// past the `@` without being the last character. The entity's format rules
/// are stricter; this filter only screens out obvious garbage.
fn has_plausible_email_shape(email: &str) -> bool {
    if email.len() < 5 {
        return false;
    }
    let Some(at) = email.find('@') else {
        return false;
    };
    if at == 0 || email[at + 1..].contains('@') {
        return false;
    }
    let Some(dot) = email.rfind('.') else {
        return false;
    };
    dot > at + 1 && dot < email.len() - 1
}
