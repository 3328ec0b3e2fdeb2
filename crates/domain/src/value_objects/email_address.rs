//! Email address value object with validation
//!
//! # Examples
//!
//! ```
//! use domain::EmailAddress;
//!
//! let email = EmailAddress::new("billing@example.com").unwrap();
//! assert_eq!(email.as_str(), "billing@example.com");
//!
//! // Addresses are normalized to lowercase
//! let email = EmailAddress::new("Billing@Example.COM").unwrap();
//! assert_eq!(email.as_str(), "billing@example.com");
//!
//! assert!(EmailAddress::new("invalid").is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::DomainError;

/// A validated email address
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Validate)]
#[serde(transparent)]
pub struct EmailAddress {
    #[validate(email)]
    value: String,
}

impl EmailAddress {
    /// Create a new email address, validating the format
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidEmailAddress`] if the format is invalid.
    pub fn new(email: impl Into<String>) -> Result<Self, DomainError> {
        let value = email.into().trim().to_lowercase();

        let candidate = Self { value };
        candidate
            .validate()
            .map_err(|e| DomainError::InvalidEmailAddress(e.to_string()))?;

        Ok(candidate)
    }

    /// Get the email address as a string slice
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}
