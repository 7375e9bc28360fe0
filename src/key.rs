//! # Camelot Key Model
//!
//! Parses and encodes Camelot wheel notation (`"9A"`, `"11B"`) and performs
//! circular arithmetic on the 12 wheel positions.
//!
//! ## Notation
//!
//! A key is a wheel position in `1..=12` followed by a scale letter:
//! - `A` - minor
//! - `B` - major
//!
//! The letter is matched case-insensitively; [`CamelotKey`]'s `Display`
//! always writes it upper-case.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Number of positions on the Camelot wheel
pub const WHEEL_SIZE: u8 = 12;

/// Scale half of a Camelot key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Scale {
    /// Minor keys (inner wheel)
    A,
    /// Major keys (outer wheel)
    B,
}

impl Scale {
    fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'A' => Some(Self::A),
            'B' => Some(Self::B),
            _ => None,
        }
    }

    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
        }
    }
}

/// A decoded Camelot key: wheel position plus scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CamelotKey {
    position: u8,
    scale: Scale,
}

impl CamelotKey {
    /// Build a key from its parts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKeyFormat`] if `position` is outside `1..=12`.
    pub fn new(position: u8, scale: Scale) -> Result<Self> {
        if !(1..=WHEEL_SIZE).contains(&position) {
            return Err(Error::InvalidKeyFormat {
                key: format!("{position}{}", scale.letter()),
                reason: "position must be between 1 and 12",
            });
        }
        Ok(Self { position, scale })
    }

    #[must_use]
    pub const fn position(self) -> u8 {
        self.position
    }

    #[must_use]
    pub const fn scale(self) -> Scale {
        self.scale
    }

    /// The key `step` positions clockwise (negative = anticlockwise), same scale
    #[must_use]
    pub fn shifted(self, step: i32) -> Self {
        Self {
            position: increment(self.position, step),
            scale: self.scale,
        }
    }
}

impl fmt::Display for CamelotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.position, self.scale.letter())
    }
}

impl FromStr for CamelotKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        decode(s)
    }
}

/// Decode a Camelot key string such as `"9A"` or `"11b"`.
///
/// The trailing character is the scale letter (case-insensitive); everything
/// before it must be one or two ASCII digits forming a position in `1..=12`.
///
/// # Errors
///
/// Returns [`Error::InvalidKeyFormat`] when the string has no trailing scale
/// letter, the remainder is not a plain positive integer, or the position
/// falls outside the wheel.
///
/// # Examples
///
/// ```
/// use camelot_mixer::key::{decode, Scale};
///
/// let key = decode("11b")?;
/// assert_eq!(key.position(), 11);
/// assert_eq!(key.scale(), Scale::B);
/// assert!(decode("13A").is_err());
/// # Ok::<(), camelot_mixer::Error>(())
/// ```
pub fn decode(key: &str) -> Result<CamelotKey> {
    let mut chars = key.chars();
    let letter = chars
        .next_back()
        .ok_or_else(|| Error::invalid_key(key, "key is empty"))?;
    let scale = Scale::from_letter(letter)
        .ok_or_else(|| Error::invalid_key(key, "missing trailing scale letter A or B"))?;

    let digits = chars.as_str();
    if digits.is_empty() || digits.len() > 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::invalid_key(key, "position must be one or two digits"));
    }

    let position: u8 = digits
        .parse()
        .map_err(|_| Error::invalid_key(key, "position is not a number"))?;
    if !(1..=WHEEL_SIZE).contains(&position) {
        return Err(Error::invalid_key(key, "position must be between 1 and 12"));
    }

    Ok(CamelotKey { position, scale })
}

/// Circular step on the 1-indexed, 12-slot wheel.
///
/// ```text
/// increment(p, s) = ((p - 1 + s) mod 12) + 1
/// ```
///
/// Negative steps wrap anticlockwise: `increment(1, -1) == 12`.
#[must_use]
pub fn increment(position: u8, step: i32) -> u8 {
    let wheel = i32::from(WHEEL_SIZE);
    // Reduce the step first so extreme steps cannot overflow
    let zero_based = (i32::from(position) - 1 + step.rem_euclid(wheel)).rem_euclid(wheel);
    zero_based as u8 + 1
}
