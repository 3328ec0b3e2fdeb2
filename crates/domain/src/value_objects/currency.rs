//! Billing currency value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// The currency a tenant bills in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Euro
    Eur,
    /// US dollar
    Usd,
    /// Pound sterling
    Gbp,
    /// Swiss franc
    Chf,
}

impl Currency {
    /// ISO-4217 code
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Eur => "EUR",
            Self::Usd => "USD",
            Self::Gbp => "GBP",
            Self::Chf => "CHF",
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self::Eur
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "EUR" => Ok(Self::Eur),
            "USD" => Ok(Self::Usd),
            "GBP" => Ok(Self::Gbp),
            "CHF" => Ok(Self::Chf),
            other => Err(DomainError::InvalidCurrency(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_round_trips_through_from_str() {
        for currency in [Currency::Eur, Currency::Usd, Currency::Gbp, Currency::Chf] {
            assert_eq!(currency.code().parse::<Currency>().unwrap(), currency);
        }
    }

    #[test]
    fn from_str_is_case_insensitive() {
        assert_eq!("eur".parse::<Currency>().unwrap(), Currency::Eur);
    }

    #[test]
    fn from_str_rejects_unknown_codes() {
        assert!("BTC".parse::<Currency>().is_err());
    }
}
