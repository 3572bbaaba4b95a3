//! String-shaped key values that also support ordering and arithmetic.
//!
//! Keys such as UUIDs or alphanumeric codes are stored as strings by the
//! database but can be split into ranges by treating them as large integers.
//! They are always rendered as quoted string literals.

use crate::{Error, Result};

use std::fmt;
use uuid::Uuid;

/// Digits of the base-62 alphanumeric encoding, in ASCII order so that the
/// integer order of equal-length values matches their string order.
const ALPHANUMERIC: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ArithString {
    Uuid(ArithUuid),
    Alphanumeric(ArithAlphanumeric),
}

/// A UUID viewed as a 128-bit unsigned integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArithUuid(Uuid);

/// A string over `[0-9A-Za-z]` viewed as a fixed-width base-62 integer.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArithAlphanumeric {
    value: String,
}

impl ArithString {
    pub fn uuid(value: Uuid) -> ArithString {
        ArithString::Uuid(ArithUuid(value))
    }

    pub fn alphanumeric(value: impl Into<String>) -> Result<ArithString> {
        ArithAlphanumeric::new(value).map(ArithString::Alphanumeric)
    }

    pub fn to_int(&self) -> Result<u128> {
        match self {
            ArithString::Uuid(value) => Ok(value.to_int()),
            ArithString::Alphanumeric(value) => value.to_int(),
        }
    }

    /// Returns the value `offset` steps away from `self`, keeping its kind.
    pub fn add(&self, offset: i128) -> Result<ArithString> {
        match self {
            ArithString::Uuid(value) => value.add(offset).map(ArithString::Uuid),
            ArithString::Alphanumeric(value) => value.add(offset).map(ArithString::Alphanumeric),
        }
    }

    /// Signed number of steps from `other` to `self`.
    pub fn distance(&self, other: &ArithString) -> Result<i128> {
        match (self, other) {
            (ArithString::Uuid(lhs), ArithString::Uuid(rhs)) => lhs.distance(rhs),
            (ArithString::Alphanumeric(lhs), ArithString::Alphanumeric(rhs)) => lhs.distance(rhs),
            _ => Err(Error::invalid_literal(format!(
                "cannot measure distance between `{self}` and `{other}` of different kinds"
            ))),
        }
    }
}

impl ArithUuid {
    pub fn parse(value: &str) -> Result<ArithUuid> {
        Ok(ArithUuid(Uuid::parse_str(value)?))
    }

    pub fn from_int(value: u128) -> ArithUuid {
        ArithUuid(Uuid::from_u128(value))
    }

    pub fn to_int(&self) -> u128 {
        self.0.as_u128()
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub fn add(&self, offset: i128) -> Result<ArithUuid> {
        checked_offset(self.to_int(), offset)
            .map(ArithUuid::from_int)
            .ok_or_else(|| Error::invalid_literal(format!("uuid `{self}` + {offset} overflows")))
    }

    pub fn distance(&self, other: &ArithUuid) -> Result<i128> {
        signed_difference(self.to_int(), other.to_int())
            .ok_or_else(|| Error::invalid_literal(format!("distance `{self}` - `{other}` overflows")))
    }
}

impl ArithAlphanumeric {
    pub fn new(value: impl Into<String>) -> Result<ArithAlphanumeric> {
        let value = value.into();

        if let Some(invalid) = value.chars().find(|c| !c.is_ascii_alphanumeric()) {
            return Err(Error::invalid_literal(format!(
                "`{value}` is not alphanumeric (found {invalid:?})"
            )));
        }

        Ok(ArithAlphanumeric { value })
    }

    /// Build the `len`-digit representation of `value`, zero padded.
    pub fn from_int(mut value: u128, len: usize) -> Result<ArithAlphanumeric> {
        let mut digits = vec![ALPHANUMERIC[0]; len];

        for digit in digits.iter_mut().rev() {
            *digit = ALPHANUMERIC[(value % 62) as usize];
            value /= 62;
        }

        if value != 0 {
            return Err(Error::invalid_literal(format!(
                "value does not fit in {len} alphanumeric digits"
            )));
        }

        // Every byte comes from the ASCII alphabet.
        let value = digits.into_iter().map(char::from).collect();
        Ok(ArithAlphanumeric { value })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn len(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn to_int(&self) -> Result<u128> {
        self.value.bytes().try_fold(0u128, |acc, byte| {
            acc.checked_mul(62)
                .and_then(|acc| acc.checked_add(digit_value(byte)))
                .ok_or_else(|| {
                    Error::invalid_literal(format!("`{}` is too long to convert", self.value))
                })
        })
    }

    pub fn add(&self, offset: i128) -> Result<ArithAlphanumeric> {
        let value = checked_offset(self.to_int()?, offset).ok_or_else(|| {
            Error::invalid_literal(format!("`{self}` + {offset} overflows"))
        })?;
        ArithAlphanumeric::from_int(value, self.len())
    }

    pub fn distance(&self, other: &ArithAlphanumeric) -> Result<i128> {
        signed_difference(self.to_int()?, other.to_int()?)
            .ok_or_else(|| Error::invalid_literal(format!("distance `{self}` - `{other}` overflows")))
    }
}

fn digit_value(byte: u8) -> u128 {
    match byte {
        b'0'..=b'9' => (byte - b'0') as u128,
        b'A'..=b'Z' => (byte - b'A') as u128 + 10,
        b'a'..=b'z' => (byte - b'a') as u128 + 36,
        _ => unreachable!("validated on construction"),
    }
}

fn checked_offset(value: u128, offset: i128) -> Option<u128> {
    if offset >= 0 {
        value.checked_add(offset.unsigned_abs())
    } else {
        value.checked_sub(offset.unsigned_abs())
    }
}

fn signed_difference(lhs: u128, rhs: u128) -> Option<i128> {
    if lhs >= rhs {
        i128::try_from(lhs - rhs).ok()
    } else {
        i128::try_from(rhs - lhs).ok().map(|d| -d)
    }
}

impl fmt::Display for ArithString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArithString::Uuid(value) => fmt::Display::fmt(value, f),
            ArithString::Alphanumeric(value) => fmt::Display::fmt(value, f),
        }
    }
}

impl fmt::Display for ArithUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl fmt::Display for ArithAlphanumeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl From<Uuid> for ArithString {
    fn from(value: Uuid) -> Self {
        ArithString::uuid(value)
    }
}

impl From<ArithUuid> for ArithString {
    fn from(value: ArithUuid) -> Self {
        ArithString::Uuid(value)
    }
}

impl From<ArithAlphanumeric> for ArithString {
    fn from(value: ArithAlphanumeric) -> Self {
        ArithString::Alphanumeric(value)
    }
}
