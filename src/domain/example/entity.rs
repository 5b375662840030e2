//! Example aggregate entity.
//!
//! Examples are the single aggregate root of this service: a named,
//! email-addressable record with an age. Email uniqueness across live
//! records is enforced by the repository, not here.
//!
//! # Validation
//!
//! The constructor and `update` apply the same rule set, so an invalid
//! `Example` can never exist. Business rules that depend on runtime
//! configuration (blocked names, domain-based age floors) live in the
//! application service, not in this entity.

use crate::domain::foundation::{ExampleId, Timestamp, ValidationError};
use serde::{Deserialize, Serialize};

/// Maximum length for the name, in characters.
pub const MAX_NAME_LENGTH: usize = 100;

/// Minimum accepted age.
pub const MIN_AGE: i32 = 0;

/// Maximum accepted age.
pub const MAX_AGE: i32 = 150;

/// Example aggregate - the record this service manages.
///
/// # Invariants
///
/// - `id` is globally unique and never changes
/// - `name` is 1-100 characters of letters, spaces, hyphens, apostrophes
/// - `email` matches a basic `local@domain.tld` shape
/// - `age` is within [0, 150]
/// - `created_at <= updated_at`; `created_at` never changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    /// Unique identifier for this example.
    id: ExampleId,

    /// Display name.
    name: String,

    /// Email address (unique across live records).
    email: String,

    /// Age in years.
    age: i32,

    /// When the example was created.
    created_at: Timestamp,

    /// When the example was last updated.
    updated_at: Timestamp,
}

impl Example {
    /// Create a new example.
    ///
    /// Both timestamps are set to the same instant, so a freshly created
    /// example always has `created_at == updated_at`.
    ///
    /// # Errors
    ///
    /// - `ValidationError` if name, email, or age violate the field rules
    pub fn new(
        id: ExampleId,
        name: String,
        email: String,
        age: i32,
    ) -> Result<Self, ValidationError> {
        Self::validate_name(&name)?;
        Self::validate_email(&email)?;
        Self::validate_age(age)?;

        let now = Timestamp::now();
        Ok(Self {
            id,
            name,
            email,
            age,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute an example from persistence (no validation, no events).
    pub fn reconstitute(
        id: ExampleId,
        name: String,
        email: String,
        age: i32,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            name,
            email,
            age,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the example ID.
    pub fn id(&self) -> ExampleId {
        self.id
    }

    /// Returns the name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the age.
    pub fn age(&self) -> i32 {
        self.age
    }

    /// Returns when the example was created.
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Returns when the example was last updated.
    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace name, email, and age in one validated step.
    ///
    /// All three candidate values are validated before anything is written,
    /// so a rejected update leaves the example exactly as it was.
    /// `created_at` is preserved; `updated_at` is bumped on success.
    ///
    /// # Errors
    ///
    /// - `ValidationError` if any candidate value violates the field rules
    pub fn update(&mut self, name: String, email: String, age: i32) -> Result<(), ValidationError> {
        Self::validate_name(&name)?;
        Self::validate_email(&email)?;
        Self::validate_age(age)?;

        self.name = name;
        self.email = email;
        self.age = age;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Validators
    // ─────────────────────────────────────────────────────────────────────────

    /// Validates the name field.
    ///
    /// Allowed: letters, single spaces between words, hyphens, apostrophes.
    fn validate_name(name: &str) -> Result<(), ValidationError> {
        if name.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }

        let length = name.chars().count();
        if length > MAX_NAME_LENGTH {
            return Err(ValidationError::out_of_range(
                "name",
                1,
                MAX_NAME_LENGTH as i32,
                length as i32,
            ));
        }

        if name
            .chars()
            .any(|c| !(c.is_alphabetic() || matches!(c, ' ' | '-' | '\'')))
        {
            return Err(ValidationError::invalid_format(
                "name",
                "only letters, spaces, hyphens, and apostrophes are allowed",
            ));
        }

        if name.starts_with(' ') || name.ends_with(' ') {
            return Err(ValidationError::invalid_format(
                "name",
                "must not start or end with a space",
            ));
        }

        if name.contains("  ") {
            return Err(ValidationError::invalid_format(
                "name",
                "must not contain consecutive spaces",
            ));
        }

        Ok(())
    }

    /// Validates the email field against a basic `local@domain.tld` shape.
    ///
    /// Deliberately not a full RFC 5322 parser: one `@`, a non-empty local
    /// part, a dotted domain, and an alphabetic TLD of at least two
    /// characters.
    fn validate_email(email: &str) -> Result<(), ValidationError> {
        if email.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }

        let invalid = || ValidationError::invalid_format("email", "expected local@domain.tld");

        let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
        if domain.contains('@') {
            return Err(invalid());
        }

        let local_ok = !local.is_empty()
            && local
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '%' | '+' | '-'));
        if !local_ok {
            return Err(invalid());
        }

        let (host, tld) = domain.rsplit_once('.').ok_or_else(invalid)?;
        let host_ok = !host.is_empty()
            && host
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-'));
        let tld_ok = tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic());
        if !host_ok || !tld_ok {
            return Err(invalid());
        }

        Ok(())
    }

    /// Validates the age field.
    fn validate_age(age: i32) -> Result<(), ValidationError> {
        if !(MIN_AGE..=MAX_AGE).contains(&age) {
            return Err(ValidationError::out_of_range("age", MIN_AGE, MAX_AGE, age));
        }
        Ok(())
    }
}
