//! Type-safe monetary value with embedded currency.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Currencies supported by the payment service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    USD,
    EUR,
    GBP,
    INR,
}

impl Currency {
    /// Returns the number of decimal digits in this currency's minor unit.
    pub fn exponent(&self) -> u32 {
        match self {
            Currency::USD | Currency::EUR | Currency::GBP | Currency::INR => 2,
        }
    }

    /// Returns the lowercase ISO code the gateway expects.
    pub fn gateway_code(&self) -> &'static str {
        match self {
            Currency::USD => "usd",
            Currency::EUR => "eur",
            Currency::GBP => "gbp",
            Currency::INR => "inr",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::str::FromStr for Currency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::USD),
            "EUR" => Ok(Currency::EUR),
            "GBP" => Ok(Currency::GBP),
            "INR" => Ok(Currency::INR),
            other => Err(DomainError::UnknownCurrency(other.to_string())),
        }
    }
}

/// Type-safe money representation with embedded currency.
///
/// The amount is stored as an integer count of the currency's minor unit
/// (cents, pence, paise) so no floating-point value ever enters the system.
/// Decimal input is converted exactly once, at the API boundary, and is
/// rejected if it cannot be represented without loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Money {
    minor_units: i64,
    currency: Currency,
}

impl Money {
    /// Creates a Money value from an integer minor-unit amount.
    pub fn from_minor_units(minor_units: i64, currency: Currency) -> Result<Self, DomainError> {
        if minor_units <= 0 {
            return Err(DomainError::NonPositiveAmount);
        }
        Ok(Self {
            minor_units,
            currency,
        })
    }

    /// Parses a decimal string like `"49.99"` into minor units.
    ///
    /// Fails if the value is not strictly positive or carries more decimal
    /// digits than the currency's exponent allows.
    pub fn from_decimal_str(s: &str, currency: Currency) -> Result<Self, DomainError> {
        let s = s.trim();
        if s.is_empty() || s.starts_with('-') || s.starts_with('+') {
            return Err(DomainError::InvalidAmount(s.to_string()));
        }

        let (major, frac) = match s.split_once('.') {
            Some((major, frac)) => (major, frac),
            None => (s, ""),
        };

        if major.is_empty() && frac.is_empty() {
            return Err(DomainError::InvalidAmount(s.to_string()));
        }
        if !major.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
            return Err(DomainError::InvalidAmount(s.to_string()));
        }

        let exponent = currency.exponent() as usize;
        if frac.len() > exponent {
            // Digits beyond the exponent would be silently truncated.
            if frac[exponent..].chars().any(|c| c != '0') {
                return Err(DomainError::PrecisionLoss {
                    amount: s.to_string(),
                    currency,
                });
            }
        }

        let major: i64 = if major.is_empty() {
            0
        } else {
            major
                .parse()
                .map_err(|_| DomainError::InvalidAmount(s.to_string()))?
        };

        let mut minor: i64 = 0;
        for i in 0..exponent {
            let digit = frac.as_bytes().get(i).map(|b| (b - b'0') as i64).unwrap_or(0);
            minor = minor * 10 + digit;
        }

        let scale = 10_i64.pow(currency.exponent());
        let minor_units = major
            .checked_mul(scale)
            .and_then(|m| m.checked_add(minor))
            .ok_or_else(|| DomainError::InvalidAmount(s.to_string()))?;

        Self::from_minor_units(minor_units, currency)
    }

    /// Returns the amount in the smallest currency unit.
    pub fn minor_units(&self) -> i64 {
        self.minor_units
    }

    /// Returns the currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Renders the amount as a decimal string, e.g. `"49.99"`.
    pub fn to_decimal_string(&self) -> String {
        let scale = 10_i64.pow(self.currency.exponent());
        format!(
            "{}.{:0width$}",
            self.minor_units / scale,
            self.minor_units % scale,
            width = self.currency.exponent() as usize
        )
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.to_decimal_string(), self.currency)
    }
}
