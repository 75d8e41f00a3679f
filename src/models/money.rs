//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) to avoid floating-point precision
//! issues. On disk, amounts are plain JSON numbers in currency units so that
//! stored documents stay readable by hand and by older versions of the tool.

use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use budget_planner::models::Money;
    /// let amount = Money::from_cents(1050); // $10.50
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from dollars and cents
    pub const fn from_dollars_cents(dollars: i64, cents: i64) -> Self {
        Self(dollars * 100 + cents)
    }

    /// Create a Money amount from a floating-point currency value
    ///
    /// Rounds to the nearest cent. NaN and infinities become zero.
    pub fn from_f64(value: f64) -> Self {
        if !value.is_finite() {
            return Self::zero();
        }
        Self((value * 100.0).round() as i64)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole dollars portion (truncated toward zero)
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Get the amount as a floating-point currency value
    pub fn to_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "$10.50", "1,200.50", "10"
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
        let s = cleaned.as_str();

        let (negative, s) = if let Some(stripped) = s.strip_prefix('-') {
            (true, stripped)
        } else {
            (false, s)
        };

        let s = s.strip_prefix('$').unwrap_or(s);
        let invalid = || MoneyParseError::InvalidFormat(s.to_string());

        let cents = if let Some((dollars_str, cents_str)) = s.split_once('.') {
            if !cents_str.chars().all(|c| c.is_ascii_digit()) {
                return Err(invalid());
            }

            let dollars: i64 = dollars_str.parse().map_err(|_| invalid())?;

            // Pad or truncate cents to 2 digits
            let cents: i64 = match cents_str.len() {
                0 => 0,
                1 => cents_str.parse::<i64>().map_err(|_| invalid())? * 10,
                _ => cents_str[..2].parse().map_err(|_| invalid())?,
            };

            dollars
                .checked_mul(100)
                .and_then(|d| d.checked_add(cents))
                .ok_or_else(invalid)?
        } else {
            s.parse::<i64>()
                .map_err(|_| invalid())?
                .checked_mul(100)
                .ok_or_else(invalid)?
        };

        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Parse user input, treating anything that is not a finite number as zero
    ///
    /// Tries the exact decimal parser first and falls back to a float parse
    /// for inputs such as ".5" or "1e3".
    pub fn parse_lenient(s: &str) -> Self {
        if let Ok(money) = Self::parse(s) {
            return money;
        }

        let cleaned: String = s
            .trim()
            .chars()
            .filter(|c| *c != ',' && *c != '$')
            .collect();

        cleaned
            .parse::<f64>()
            .map(Self::from_f64)
            .unwrap_or_default()
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!(
                "-{}{}.{:02}",
                symbol,
                self.dollars().abs(),
                self.cents_part()
            )
        } else {
            format!("{}{}.{:02}", symbol, self.dollars(), self.cents_part())
        }
    }

    /// Format with a currency symbol and thousands separators ("$1,411.28")
    pub fn format_grouped(&self, symbol: &str) -> String {
        let digits = self.dollars().abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{}{}.{:02}", sign, symbol, grouped, self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-${}.{:02}", self.dollars().abs(), self.cents_part())
        } else {
            write!(f, "${}.{:02}", self.dollars(), self.cents_part())
        }
    }
}

// Arithmetic saturates at the i64 bounds.
impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
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

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % 100 == 0 {
            serializer.serialize_i64(self.0 / 100)
        } else {
            serializer.serialize_f64(self.to_f64())
        }
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(LenientMoneyVisitor)
    }
}

/// Accepts any JSON value; non-numeric input becomes zero
struct LenientMoneyVisitor;

impl<'de> Visitor<'de> for LenientMoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a currency amount")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        Ok(v.checked_mul(100)
            .map(Money)
            .unwrap_or_else(|| Money::from_f64(v as f64)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        Ok(i64::try_from(v)
            .ok()
            .and_then(|v| v.checked_mul(100))
            .map(Money)
            .unwrap_or_else(|| Money::from_f64(v as f64)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        Ok(Money::from_f64(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
        Ok(Money::parse_lenient(v))
    }

    fn visit_bool<E: de::Error>(self, _v: bool) -> Result<Money, E> {
        Ok(Money::zero())
    }

    fn visit_unit<E: de::Error>(self) -> Result<Money, E> {
        Ok(Money::zero())
    }

    fn visit_none<E: de::Error>(self) -> Result<Money, E> {
        Ok(Money::zero())
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Money, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(Money::zero())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Money, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(Money::zero())
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(1050);
        assert_eq!(m.cents(), 1050);
        assert_eq!(m.dollars(), 10);
        assert_eq!(m.cents_part(), 50);
    }

    #[test]
    fn test_from_f64_rounds_to_cents() {
        assert_eq!(Money::from_f64(1411.28).cents(), 141128);
        assert_eq!(Money::from_f64(0.005).cents(), 1);
        assert_eq!(Money::from_f64(f64::NAN), Money::zero());
        assert_eq!(Money::from_f64(f64::INFINITY), Money::zero());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1050)), "$10.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
        assert_eq!(format!("{}", Money::from_cents(-1050)), "-$10.50");
        assert_eq!(format!("{}", Money::from_cents(5)), "$0.05");
    }

    #[test]
    fn test_format_grouped() {
        assert_eq!(Money::from_cents(141128).format_grouped("$"), "$1,411.28");
        assert_eq!(Money::from_cents(1800000).format_grouped("$"), "$18,000.00");
        assert_eq!(Money::from_cents(-123456789).format_grouped("$"), "-$1,234,567.89");
        assert_eq!(Money::from_cents(99).format_grouped("$"), "$0.99");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((-a).cents(), -1000);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("$10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("-10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse("10").unwrap().cents(), 1000);
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse("1,200.50").unwrap().cents(), 120050);
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("1.é").is_err());
    }

    #[test]
    fn test_parse_lenient() {
        assert_eq!(Money::parse_lenient("1,411.28").cents(), 141128);
        assert_eq!(Money::parse_lenient(".5").cents(), 50);
        assert_eq!(Money::parse_lenient("1e3").cents(), 100000);
        assert_eq!(Money::parse_lenient("abc"), Money::zero());
        assert_eq!(Money::parse_lenient(""), Money::zero());
        assert_eq!(Money::parse_lenient("NaN"), Money::zero());
        assert_eq!(Money::parse_lenient("inf"), Money::zero());
    }

    #[test]
    fn test_sum() {
        let amounts = vec![
            Money::from_cents(100),
            Money::from_cents(200),
            Money::from_cents(300),
        ];
        let total: Money = amounts.iter().sum();
        assert_eq!(total.cents(), 600);
    }

    #[test]
    fn test_huge_amounts_saturate() {
        let huge = Money::parse_lenient("1e17");
        assert_eq!(huge.cents(), i64::MAX);

        assert_eq!((huge + huge).cents(), i64::MAX);
        assert_eq!((-huge - huge).cents(), -i64::MAX - 1);
        assert_eq!(-Money::from_cents(i64::MIN), Money::from_cents(i64::MAX));

        let total: Money = [huge, huge, Money::from_cents(1)].iter().sum();
        assert_eq!(total.cents(), i64::MAX);
    }

    #[test]
    fn test_serialization_uses_currency_units() {
        assert_eq!(serde_json::to_string(&Money::from_cents(375000)).unwrap(), "3750");
        assert_eq!(serde_json::to_string(&Money::from_cents(141128)).unwrap(), "1411.28");
        assert_eq!(serde_json::to_string(&Money::from_cents(-50)).unwrap(), "-0.5");
    }

    #[test]
    fn test_lenient_deserialization() {
        let m: Money = serde_json::from_str("1411.28").unwrap();
        assert_eq!(m.cents(), 141128);

        let m: Money = serde_json::from_str("3750").unwrap();
        assert_eq!(m.cents(), 375000);

        let m: Money = serde_json::from_str("\"1,200.50\"").unwrap();
        assert_eq!(m.cents(), 120050);

        let m: Money = serde_json::from_str("\"oops\"").unwrap();
        assert!(m.is_zero());

        let m: Money = serde_json::from_str("null").unwrap();
        assert!(m.is_zero());

        let m: Money = serde_json::from_str("[1, 2]").unwrap();
        assert!(m.is_zero());
    }
}
