//! # Money Types
//!
//! Price and currency types shared by orders, payments and the
//! processor session payload.

use serde::{Deserialize, Serialize};

/// Supported currencies (ISO 4217)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    DKK,
    EUR,
    SEK,
    NOK,
    USD,
    GBP,
}

impl Currency {
    /// Returns the ISO 4217 currency code
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::DKK => "DKK",
            Currency::EUR => "EUR",
            Currency::SEK => "SEK",
            Currency::NOK => "NOK",
            Currency::USD => "USD",
            Currency::GBP => "GBP",
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::DKK
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A decimal amount with its currency.
///
/// The platform hands amounts over as decimal numbers; the processor
/// wants integer minor units. The conversion truncates the fractional
/// part of the decimal number before multiplying, so `19.99` becomes
/// `1900`, not `1999`. That is the behavior the processor has been
/// receiving all along and existing invoices depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Price {
    /// Decimal amount (e.g. 199.95)
    pub number: f64,
    /// Currency
    pub currency: Currency,
}

impl Price {
    pub fn new(number: f64, currency: Currency) -> Self {
        Self { number, currency }
    }

    pub fn zero(currency: Currency) -> Self {
        Self {
            number: 0.0,
            currency,
        }
    }

    /// Integer minor units: truncate the decimal amount, then x100.
    pub fn minor_units(&self) -> i64 {
        (self.number as i64) * 100
    }

    /// Integer hundredths of the decimal amount, rounded. Comparisons
    /// between amounts go through this so that float noise from
    /// summing and subtracting (0.3 - 0.1 = 0.19999...) cannot flip a
    /// bookkeeping decision. Distinct from `minor_units`, which keeps
    /// the truncation the processor wire format depends on.
    pub fn hundredths(&self) -> i64 {
        (self.number * 100.0).round() as i64
    }

    /// Sum of two prices. Caller guarantees matching currencies; a
    /// mismatch keeps the left-hand currency.
    pub fn add(&self, other: &Price) -> Price {
        Price {
            number: self.number + other.number,
            currency: self.currency,
        }
    }

    /// Human-readable form, e.g. "199.95 DKK"
    pub fn display(&self) -> String {
        format!("{:.2} {}", self.number, self.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minor_units_truncates() {
        // 19.99 truncates to 19 before the x100
        assert_eq!(Price::new(19.99, Currency::DKK).minor_units(), 1900);
        assert_eq!(Price::new(200.0, Currency::DKK).minor_units(), 20000);
        assert_eq!(Price::new(0.99, Currency::EUR).minor_units(), 0);
    }

    #[test]
    fn test_hundredths_is_exact_under_float_noise() {
        // 0.3 - 0.1 in f64 is 0.19999999999999998
        let remainder = Price::new(0.3 - 0.1, Currency::DKK);
        assert_eq!(remainder.hundredths(), 20);
        assert_eq!(Price::new(0.2, Currency::DKK).hundredths(), 20);

        // 0.1 + 0.2 in f64 is 0.30000000000000004
        let sum = Price::new(0.1, Currency::DKK).add(&Price::new(0.2, Currency::DKK));
        assert_eq!(sum.hundredths(), 30);
        assert_eq!(Price::new(19.99, Currency::DKK).hundredths(), 1999);
    }

    #[test]
    fn test_add() {
        let a = Price::new(10.50, Currency::DKK);
        let b = Price::new(4.25, Currency::DKK);

        let sum = a.add(&b);
        assert_eq!(sum.number, 14.75);
        assert_eq!(sum.hundredths(), 1475);
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::new(199.95, Currency::DKK).display(), "199.95 DKK");
    }
}
