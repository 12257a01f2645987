//! Type-safe price representation using decimal arithmetic.
//!
//! Amounts are held as [`Decimal`] in the currency's standard unit so that
//! cart totals are exact. Formatting follows the currency's minor units: yen
//! prices have none (`¥1,200`), dollar prices have two (`$12.00`).

use core::fmt;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., yen, dollars).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Format for display (e.g., "¥1,200" or "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        let places = self.currency_code.minor_units();
        let rounded = self
            .amount
            .abs()
            .round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);

        let text = format!("{rounded:.prec$}", prec = places as usize);
        let (whole, fraction) = text.split_once('.').map_or((text.as_str(), None), |(w, f)| (w, Some(f)));

        let mut out = String::new();
        if self.amount.is_sign_negative() && !rounded.is_zero() {
            out.push('-');
        }
        out.push_str(self.currency_code.symbol());
        out.push_str(&group_thousands(whole));
        if let Some(fraction) = fraction {
            out.push('.');
            out.push_str(fraction);
        }
        out
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Insert `,` separators every three digits of an unsigned integer string.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Error returned when parsing an unsupported currency code.
#[derive(Debug, Clone, Error)]
#[error("unsupported currency code: {0}")]
pub struct UnknownCurrency(pub String);

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    JPY,
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::JPY => "¥",
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// ISO 4217 code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::JPY => "JPY",
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }

    /// Number of digits after the decimal point.
    #[must_use]
    pub const fn minor_units(&self) -> u32 {
        match self {
            Self::JPY => 0,
            _ => 2,
        }
    }
}

impl FromStr for CurrencyCode {
    type Err = UnknownCurrency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "JPY" => Ok(Self::JPY),
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            "CAD" => Ok(Self::CAD),
            "AUD" => Ok(Self::AUD),
            _ => Err(UnknownCurrency(s.to_owned())),
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
