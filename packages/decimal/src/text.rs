use core::{fmt, str::FromStr};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::{Decimal, DecimalError};

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const FRACTIONAL: u128 = Decimal::DECIMAL_FRACTIONAL as u128;

        let magnitude = self.0.unsigned_abs();
        let whole = magnitude / FRACTIONAL;
        let fractional = magnitude % FRACTIONAL;

        if self.is_negative() {
            f.write_str("-")?;
        }
        if fractional == 0 {
            write!(f, "{whole}")
        } else {
            let fractional_string = format!("{:0>width$}", fractional, width = 18);
            write!(f, "{whole}.{}", fractional_string.trim_end_matches('0'))
        }
    }
}

impl FromStr for Decimal {
    type Err = DecimalError;

    /// Parses `[-+]digits[.digits]`. Fractional digits past the 18th are truncated.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let parse_error = || DecimalError::Parse(input.to_owned());

        let trimmed = input.trim();
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };

        let (whole_part, fractional_part) = match unsigned.split_once('.') {
            Some((whole, fractional)) => (whole, fractional),
            None => (unsigned, ""),
        };
        if whole_part.is_empty() && fractional_part.is_empty() {
            return Err(parse_error());
        }
        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(whole_part) || !all_digits(fractional_part) {
            return Err(parse_error());
        }

        let whole: i128 = if whole_part.is_empty() {
            0
        } else {
            whole_part.parse().map_err(|_| DecimalError::Overflow)?
        };
        let mut atomics = whole
            .checked_mul(Decimal::DECIMAL_FRACTIONAL)
            .ok_or(DecimalError::Overflow)?;

        let places = Decimal::DECIMAL_PLACES as usize;
        let fractional_part = &fractional_part[..fractional_part.len().min(places)];
        if !fractional_part.is_empty() {
            let fractional: i128 = fractional_part.parse().map_err(|_| parse_error())?;
            let scale = 10i128.pow((places - fractional_part.len()) as u32);
            atomics = atomics
                .checked_add(fractional * scale)
                .ok_or(DecimalError::Overflow)?;
        }

        Ok(Decimal(if negative { -atomics } else { atomics }))
    }
}

impl Serialize for Decimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Decimal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(DecimalVisitor)
    }
}

/// Accepts decimal strings as well as JSON integers and floats.
struct DecimalVisitor;

impl<'de> de::Visitor<'de> for DecimalVisitor {
    type Value = Decimal;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a decimal number or string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Decimal::from_int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        i128::from(v)
            .checked_mul(Decimal::DECIMAL_FRACTIONAL)
            .map(Decimal)
            .ok_or_else(|| E::custom(DecimalError::Overflow))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        if !v.is_finite() {
            return Err(E::custom(DecimalError::Parse(v.to_string())));
        }
        // f64's Display never uses exponent notation
        self.visit_str(&v.to_string())
    }
}
