//! Example-specific error types.

use crate::domain::foundation::{ErrorCode, ValidationError};
use crate::ports::{PartnerError, RepositoryError};

/// Errors surfaced by example operations.
///
/// Each variant carries the context a caller needs to react; `code()` maps
/// variants to stable machine-readable codes for the transport layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExampleError {
    /// A field failed shape validation.
    Validation(ValidationError),
    /// A business rule rejected otherwise well-formed input.
    BusinessRule(String),
    /// No example matched the lookup key (id or email).
    NotFound(String),
    /// An example with this id or email already exists.
    AlreadyExists(String),
    /// The partner service explicitly refused the input.
    Rejected { name: String, email: String },
    /// A partner call required for the operation failed.
    External {
        name: String,
        email: String,
        source: PartnerError,
    },
    /// Storage or other infrastructure failure.
    Infrastructure(String),
}

impl ExampleError {
    pub fn business_rule(message: impl Into<String>) -> Self {
        ExampleError::BusinessRule(message.into())
    }
    pub fn not_found(key: impl Into<String>) -> Self {
        ExampleError::NotFound(key.into())
    }
    pub fn already_exists(key: impl Into<String>) -> Self {
        ExampleError::AlreadyExists(key.into())
    }
    pub fn rejected(name: impl Into<String>, email: impl Into<String>) -> Self {
        ExampleError::Rejected {
            name: name.into(),
            email: email.into(),
        }
    }
    pub fn external(
        name: impl Into<String>,
        email: impl Into<String>,
        source: PartnerError,
    ) -> Self {
        ExampleError::External {
            name: name.into(),
            email: email.into(),
            source,
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        ExampleError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            ExampleError::Validation(_) => ErrorCode::ValidationFailed,
            ExampleError::BusinessRule(_) => ErrorCode::BusinessRuleViolation,
            ExampleError::NotFound(_) => ErrorCode::ExampleNotFound,
            ExampleError::AlreadyExists(_) => ErrorCode::AlreadyExists,
            ExampleError::Rejected { .. } => ErrorCode::ExternalValidationRejected,
            ExampleError::External { .. } => ErrorCode::ExternalApiError,
            ExampleError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            ExampleError::Validation(err) => err.to_string(),
            ExampleError::BusinessRule(msg) => msg.clone(),
            ExampleError::NotFound(key) => format!("Example not found: {}", key),
            ExampleError::AlreadyExists(key) => format!("Example already exists: {}", key),
            ExampleError::Rejected { name, email } => {
                format!("External validation rejected '{}' <{}>", name, email)
            }
            ExampleError::External {
                name,
                email,
                source,
            } => format!(
                "External validation failed for '{}' <{}>: {}",
                name, email, source
            ),
            ExampleError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for ExampleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ExampleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExampleError::External { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ValidationError> for ExampleError {
    fn from(err: ValidationError) -> Self {
        ExampleError::Validation(err)
    }
}

impl From<RepositoryError> for ExampleError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(key) => ExampleError::NotFound(key),
            RepositoryError::AlreadyExists(key) => ExampleError::AlreadyExists(key),
            RepositoryError::Connection(msg)
            | RepositoryError::Timeout(msg)
            | RepositoryError::Backend(msg) => ExampleError::Infrastructure(msg),
        }
    }
}
