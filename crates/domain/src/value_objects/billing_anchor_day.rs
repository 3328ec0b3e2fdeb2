//! Billing cycle anchor day value object

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// The day of month a tenant's billing cycle is anchored to
///
/// Restricted to 1..=28 so every anchor exists in every month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BillingAnchorDay(u8);

impl BillingAnchorDay {
    /// Create a new anchor day
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidBillingAnchorDay`] when the day is
    /// outside 1..=28.
    pub fn new(day: u8) -> Result<Self, DomainError> {
        if (1..=28).contains(&day) {
            Ok(Self(day))
        } else {
            Err(DomainError::InvalidBillingAnchorDay(day))
        }
    }

    /// Get the day of month
    pub const fn as_u8(&self) -> u8 {
        self.0
    }
}

impl Default for BillingAnchorDay {
    /// First of the month
    fn default() -> Self {
        Self(1)
    }
}

impl fmt::Display for BillingAnchorDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_days_in_range() {
        assert!(BillingAnchorDay::new(1).is_ok());
        assert!(BillingAnchorDay::new(28).is_ok());
    }

    #[test]
    fn rejects_days_out_of_range() {
        assert!(BillingAnchorDay::new(0).is_err());
        assert!(BillingAnchorDay::new(29).is_err());
        assert!(BillingAnchorDay::new(31).is_err());
    }

    #[test]
    fn default_is_first_of_month() {
        assert_eq!(BillingAnchorDay::default().as_u8(), 1);
    }
}
