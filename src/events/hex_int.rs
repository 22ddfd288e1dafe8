//! Serde helpers for integer fields in decoder field maps.
//!
//! The event decoder's JSON form renders every schema integer as a base-16
//! string (`"a"` is 10). These helpers turn such strings into native integers
//! at deserialization time. Plain JSON numbers are accepted as well.

use std::fmt;

use serde::Deserialize;
use serde::de::{self, Deserializer, Visitor};

struct RawInt(i128);

impl<'de> Deserialize<'de> for RawInt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RawIntVisitor)
    }
}

struct RawIntVisitor;

impl Visitor<'_> for RawIntVisitor {
    type Value = RawInt;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a base-16 integer string or an integer")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<RawInt, E> {
        Ok(RawInt(i128::from(v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<RawInt, E> {
        Ok(RawInt(i128::from(v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<RawInt, E> {
        parse_hex(v).map(RawInt).map_err(E::custom)
    }
}

/// Parse a base-16 integer as emitted by the decoder (`"ff"`, `"-a"`, `"0x1f"`).
pub fn parse_hex(s: &str) -> Result<i128, String> {
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let digits = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
        .unwrap_or(digits);
    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return Err(format!("invalid hex integer: {s:?}"));
    }
    let magnitude =
        i128::from_str_radix(digits, 16).map_err(|e| format!("invalid hex integer {s:?}: {e}"))?;
    Ok(if negative { -magnitude } else { magnitude })
}

fn narrow<T, E>(value: i128) -> Result<T, E>
where
    T: TryFrom<i128>,
    E: de::Error,
{
    T::try_from(value).map_err(|_| E::custom(format!("integer {value} out of range")))
}

pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i128>,
{
    let RawInt(value) = RawInt::deserialize(deserializer)?;
    narrow(value)
}

pub fn option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i128>,
{
    Option::<RawInt>::deserialize(deserializer)?
        .map(|RawInt(value)| narrow(value))
        .transpose()
}
