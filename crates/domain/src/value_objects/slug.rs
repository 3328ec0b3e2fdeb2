//! URL-safe tenant slug value object
//!
//! # Examples
//!
//! ```
//! use domain::Slug;
//!
//! let slug = Slug::new("acme-consulting").unwrap();
//! assert_eq!(slug.as_str(), "acme-consulting");
//!
//! // Uppercase input is normalized
//! assert_eq!(Slug::new("Acme-42").unwrap().as_str(), "acme-42");
//!
//! // Illegal characters are rejected
//! assert!(Slug::new("acme consulting").is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Minimum slug length
const MIN_LEN: usize = 2;
/// Maximum slug length, matching the schema column width
const MAX_LEN: usize = 100;

/// A validated, URL-safe tenant slug
///
/// Slugs identify tenants in URLs and subdomains. The legal alphabet is
/// lowercase ASCII letters, digits and single interior hyphens; uniqueness
/// across tenants is enforced at the schema level.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Create a new slug, normalizing to lowercase and validating the format
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidSlug`] when the candidate is too short,
    /// too long, contains characters outside `[a-z0-9-]`, or has a leading,
    /// trailing or doubled hyphen.
    pub fn new(candidate: impl Into<String>) -> Result<Self, DomainError> {
        let value = candidate.into().trim().to_lowercase();

        if value.len() < MIN_LEN || value.len() > MAX_LEN {
            return Err(DomainError::InvalidSlug(format!(
                "length must be between {MIN_LEN} and {MAX_LEN} characters"
            )));
        }
        if !value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(DomainError::InvalidSlug(
                "only lowercase letters, digits and hyphens are allowed".to_string(),
            ));
        }
        if value.starts_with('-') || value.ends_with('-') || value.contains("--") {
            return Err(DomainError::InvalidSlug(
                "hyphens must be single and interior".to_string(),
            ));
        }

        Ok(Self(value))
    }

    /// Get the slug as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for Slug {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_simple_slug() {
        assert!(Slug::new("acme").is_ok());
        assert!(Slug::new("acme-consulting-42").is_ok());
    }

    #[test]
    fn normalizes_case_and_whitespace() {
        let slug = Slug::new("  Acme-Corp  ").unwrap();
        assert_eq!(slug.as_str(), "acme-corp");
    }

    #[test]
    fn rejects_illegal_characters() {
        assert!(Slug::new("acme corp").is_err());
        assert!(Slug::new("acme_corp").is_err());
        assert!(Slug::new("acmé").is_err());
    }

    #[test]
    fn rejects_bad_hyphenation() {
        assert!(Slug::new("-acme").is_err());
        assert!(Slug::new("acme-").is_err());
        assert!(Slug::new("ac--me").is_err());
    }

    #[test]
    fn rejects_out_of_range_length() {
        assert!(Slug::new("a").is_err());
        assert!(Slug::new("x".repeat(101)).is_err());
        assert!(Slug::new("x".repeat(100)).is_ok());
    }
}
