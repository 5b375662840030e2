//! Business rule limits and pagination bounds
//!
//! These values parameterize the application service. They are plain data:
//! the service never reads the process environment itself.

use serde::Deserialize;

use super::error::ValidationError;

/// Business rule limits and pagination bounds
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Page size used when the caller passes zero or a negative limit
    #[serde(default = "default_page_size")]
    pub default_page_size: i64,

    /// Largest page size a caller can request
    #[serde(default = "default_max_page_size")]
    pub max_page_size: i64,

    /// Minimum accepted age
    #[serde(default)]
    pub min_age: i32,

    /// Maximum accepted age
    #[serde(default = "default_max_age")]
    pub max_age: i32,

    /// Minimum name length in characters
    #[serde(default = "default_min_name_length")]
    pub min_name_length: usize,

    /// Maximum name length in characters
    #[serde(default = "default_max_name_length")]
    pub max_name_length: usize,

    /// Minimum age for accounts on corporate email domains
    #[serde(default = "default_corporate_min_age")]
    pub corporate_min_age: i32,

    /// Minimum age for accounts on VIP email domains
    #[serde(default = "default_vip_min_age")]
    pub vip_min_age: i32,

    /// Names rejected outright (case-sensitive exact match)
    #[serde(default = "default_blocked_names")]
    pub blocked_names: Vec<String>,

    /// Email domain suffixes treated as corporate accounts
    #[serde(default = "default_corporate_domains")]
    pub corporate_domains: Vec<String>,

    /// Email domain suffixes treated as VIP accounts
    #[serde(default = "default_vip_domains")]
    pub vip_domains: Vec<String>,
}

impl LimitsConfig {
    /// Validate limit configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.default_page_size < 1 || self.default_page_size > self.max_page_size {
            return Err(ValidationError::InvalidPageSizes);
        }
        if self.min_age > self.max_age {
            return Err(ValidationError::InvalidAgeBounds);
        }
        if self.min_name_length < 1 || self.min_name_length > self.max_name_length {
            return Err(ValidationError::InvalidNameBounds);
        }
        Ok(())
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            min_age: 0,
            max_age: default_max_age(),
            min_name_length: default_min_name_length(),
            max_name_length: default_max_name_length(),
            corporate_min_age: default_corporate_min_age(),
            vip_min_age: default_vip_min_age(),
            blocked_names: default_blocked_names(),
            corporate_domains: default_corporate_domains(),
            vip_domains: default_vip_domains(),
        }
    }
}

fn default_page_size() -> i64 {
    10
}

fn default_max_page_size() -> i64 {
    100
}

fn default_max_age() -> i32 {
    150
}

fn default_min_name_length() -> usize {
    1
}

fn default_max_name_length() -> usize {
    100
}

fn default_corporate_min_age() -> i32 {
    18
}

fn default_vip_min_age() -> i32 {
    21
}

fn default_blocked_names() -> Vec<String> {
    vec!["badword1".to_string(), "badword2".to_string()]
}

fn default_corporate_domains() -> Vec<String> {
    vec!["@corp.com".to_string(), "@enterprise.com".to_string()]
}

fn default_vip_domains() -> Vec<String> {
    vec!["@vip.com".to_string(), "@premium.com".to_string()]
}
