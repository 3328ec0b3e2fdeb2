//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Invalid tenant slug format
    #[error("Invalid slug: {0}")]
    InvalidSlug(String),

    /// Invalid email address format
    #[error("Invalid email address: {0}")]
    InvalidEmailAddress(String),

    /// Billing anchor day outside 1..=28
    #[error("Invalid billing anchor day: {0} (must be 1..=28)")]
    InvalidBillingAnchorDay(u8),

    /// Unknown currency code
    #[error("Invalid currency code: {0}")]
    InvalidCurrency(String),

    /// A date range whose end precedes its start
    #[error("Invalid period: {start} is after {end}")]
    InvalidPeriod { start: String, end: String },

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_error_message() {
        let err = DomainError::InvalidSlug("too short".to_string());
        assert_eq!(err.to_string(), "Invalid slug: too short");
    }

    #[test]
    fn billing_day_error_message() {
        let err = DomainError::InvalidBillingAnchorDay(31);
        assert_eq!(
            err.to_string(),
            "Invalid billing anchor day: 31 (must be 1..=28)"
        );
    }

    #[test]
    fn period_error_message() {
        let err = DomainError::InvalidPeriod {
            start: "2026-02-01".to_string(),
            end: "2026-01-01".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid period: 2026-02-01 is after 2026-01-01"
        );
    }
}
