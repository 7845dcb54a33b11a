//! Money type for monetary values.
//!
//! Amounts are stored in the smallest unit of the currency (cents for USD)
//! so pricing math stays exact and reproducible across runs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Currencies the storefront sells in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
    JPY,
    CHF,
}

impl Currency {
    /// ISO 4217 code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
            Currency::CHF => "CHF",
        }
    }

    /// Display symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
            Currency::JPY => "\u{00a5}",
            Currency::CHF => "CHF ",
        }
    }

    /// Number of minor-unit digits.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Parse an ISO code, case-insensitive.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            "JPY" => Some(Currency::JPY),
            "CHF" => Some(Currency::CHF),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value in a specific currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in the smallest currency unit.
    pub cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create from minor units.
    pub fn new(cents: i64, currency: Currency) -> Self {
        Self { cents, currency }
    }

    /// Create from a major-unit amount, rounding to the nearest minor unit.
    pub fn from_major(amount: f64, currency: Currency) -> Self {
        let scale = 10_i64.pow(currency.decimal_places());
        Self::new((amount * scale as f64).round() as i64, currency)
    }

    /// Zero in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    pub fn is_zero(&self) -> bool {
        self.cents == 0
    }

    pub fn is_positive(&self) -> bool {
        self.cents > 0
    }

    pub fn is_negative(&self) -> bool {
        self.cents < 0
    }

    /// The smaller of two amounts. Currencies must already agree.
    pub fn min(self, other: Money) -> Money {
        if other.cents < self.cents {
            other
        } else {
            self
        }
    }

    /// Checked addition; `None` on currency mismatch or overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        Some(Money::new(self.cents.checked_add(other.cents)?, self.currency))
    }

    /// Checked subtraction; `None` on currency mismatch or overflow.
    pub fn try_sub(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        Some(Money::new(self.cents.checked_sub(other.cents)?, self.currency))
    }

    /// Checked scalar multiplication.
    pub fn try_mul(&self, factor: i64) -> Option<Money> {
        Some(Money::new(self.cents.checked_mul(factor)?, self.currency))
    }

    /// Checked sum of an iterator of amounts in the given currency.
    pub fn try_sum<'a>(
        iter: impl Iterator<Item = &'a Money>,
        currency: Currency,
    ) -> Option<Money> {
        let mut total = Money::zero(currency);
        for m in iter {
            total = total.try_add(m)?;
        }
        Some(total)
    }

    /// A percentage of this amount, rounded to the nearest minor unit.
    pub fn percentage(&self, percent: f64) -> Money {
        let cents = (self.cents as f64 * percent / 100.0).round() as i64;
        Money::new(cents, self.currency)
    }

    /// Convert to a major-unit value for display.
    pub fn to_major(&self) -> f64 {
        let scale = 10_i64.pow(self.currency.decimal_places());
        self.cents as f64 / scale as f64
    }

    /// Format with the currency symbol, e.g. `$49.99`.
    pub fn display(&self) -> String {
        let places = self.currency.decimal_places() as usize;
        format!("{}{:.places$}", self.currency.symbol(), self.to_major())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
