//! Money amounts in cents
//!
//! Amounts are whole cents in an `i64`. Arithmetic saturates at the `i64`
//! bounds instead of wrapping, and parsing rejects amounts that do not fit.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// A monetary amount in cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// ```
    /// use couple_planner::models::Money;
    /// assert_eq!(Money::from_cents(1050).to_string(), "10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Whole currency units
    ///
    /// ```
    /// use couple_planner::models::Money;
    /// assert_eq!(Money::from_units(8000).cents(), 800_000);
    /// ```
    pub const fn from_units(units: i64) -> Self {
        Self(units.saturating_mul(100))
    }

    /// Round a floating point value to the cent; NaN and infinities become zero
    pub fn from_f64(value: f64) -> Self {
        if value.is_finite() {
            // `as` saturates at the i64 bounds
            Self((value * 100.0).round() as i64)
        } else {
            Self::zero()
        }
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    pub fn to_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Clamp negative amounts to zero
    pub fn max_zero(self) -> Self {
        Self(self.0.max(0))
    }

    /// This amount as a percentage of `whole`, or 0 when `whole` is zero
    pub fn percent_of(&self, whole: Money) -> f64 {
        if whole.is_zero() {
            0.0
        } else {
            self.0 as f64 / whole.0 as f64 * 100.0
        }
    }

    /// Parse a user-typed amount
    ///
    /// Accepts "1500", "1500.5", "-10.50", ".75", "R$ 1500.00" and "$10".
    /// Digits past the second decimal place are dropped.
    pub fn parse(input: &str) -> Result<Self, MoneyParseError> {
        let invalid = || MoneyParseError::InvalidFormat(input.trim().to_string());

        let s = input.trim();
        let (negative, s) = match s.strip_prefix('-') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, s),
        };
        let s = s
            .strip_prefix("R$")
            .or_else(|| s.strip_prefix('$'))
            .unwrap_or(s)
            .trim_start();

        let (whole, fraction) = match s.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (s, ""),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if !all_digits(whole) || !all_digits(fraction) {
            return Err(invalid());
        }

        let units: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| MoneyParseError::Overflow(input.trim().to_string()))?
        };
        let cents = fraction
            .chars()
            .chain(std::iter::repeat('0'))
            .take(2)
            .fold(0i64, |acc, c| acc * 10 + i64::from(c as u8 - b'0'));

        let total = units
            .checked_mul(100)
            .and_then(|u| u.checked_add(cents))
            .ok_or_else(|| MoneyParseError::Overflow(input.trim().to_string()))?;

        Ok(Self(if negative { -total } else { total }))
    }

    /// Format with a currency symbol, e.g. "R$ 8000.00" or "-R$ 0.05"
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{} {}", sign, symbol, Self::unsigned(self.0))
    }

    fn unsigned(cents: i64) -> String {
        let abs = cents.unsigned_abs();
        format!("{}.{:02}", abs / 100, abs % 100)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-")?;
        }
        write!(f, "{}", Self::unsigned(self.0))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    fn mul(self, factor: i64) -> Self {
        Self(self.0.saturating_mul(factor))
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    /// The amount does not fit in the supported range
    Overflow(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
            MoneyParseError::Overflow(s) => write!(f, "Amount is too large: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
