//! Chilean RUT (Rol Único Tributario) validation and formatting.
//!
//! A RUT is a run of decimal digits (the body) followed by one check
//! character, either a digit or `K`. Input may carry `.` thousands
//! separators and a `-` before the check character; both are ignored.
//!
//! The check character is derived with the Module 11 algorithm: body digits
//! are weighted right-to-left with the repeating sequence 2..=7, and the
//! weighted sum is reduced modulo 11.

use super::errors::ValidationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const MODULO: u32 = 11;
const FIRST_WEIGHT: u32 = 2;
const LAST_WEIGHT: u32 = 7;

/// Remove `.` and `-` separators.
fn clean(input: &str) -> String {
    input.chars().filter(|c| *c != '.' && *c != '-').collect()
}

/// Split a clean string into `(body, check)` if it has the shape
/// "one or more ASCII digits, then one digit or `K`/`k`".
fn split_clean(clean: &str) -> Option<(&str, char)> {
    let check = clean.chars().last()?;
    let body = &clean[..clean.len() - check.len_utf8()];

    if body.is_empty() || !body.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if !check.is_ascii_digit() && !check.eq_ignore_ascii_case(&'k') {
        return None;
    }

    Some((body, check.to_ascii_uppercase()))
}

/// Compute the Module 11 check character for a RUT body.
///
/// Returns `None` if `body` is empty or contains anything other than ASCII
/// digits. The result is always one of `'0'..='9'` or `'K'`.
///
/// # Example
///
/// ```
/// use polomarket_identity::domain::rut::compute_check_digit;
///
/// assert_eq!(compute_check_digit("12345678"), Some('5'));
/// assert_eq!(compute_check_digit("10000013"), Some('K'));
/// ```
pub fn compute_check_digit(body: &str) -> Option<char> {
    if body.is_empty() || !body.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let mut sum = 0u32;
    let mut weight = FIRST_WEIGHT;
    for digit in body.bytes().rev().map(|b| u32::from(b - b'0')) {
        // Reduced as we go so arbitrarily long bodies cannot overflow.
        sum = (sum + digit * weight) % MODULO;
        weight = if weight == LAST_WEIGHT {
            FIRST_WEIGHT
        } else {
            weight + 1
        };
    }

    match MODULO - sum {
        11 => Some('0'),
        10 => Some('K'),
        n => char::from_digit(n, 10),
    }
}

/// Check whether `input` is a valid RUT.
///
/// Accepts `"123456785"`, `"12345678-5"` and `"12.345.678-5"` alike; the
/// `K` check character is case-insensitive. Malformed input yields `false`.
///
/// # Example
///
/// ```
/// use polomarket_identity::domain::rut::validate_rut;
///
/// assert!(validate_rut("12.345.678-5"));
/// assert!(validate_rut("10000013-k"));
/// assert!(!validate_rut("12345678-4"));
/// ```
pub fn validate_rut(input: &str) -> bool {
    let clean = clean(input);
    match split_clean(&clean) {
        Some((body, check)) => compute_check_digit(body) == Some(check),
        None => false,
    }
}

/// Render `input` as `XX.XXX.XXX-C`.
///
/// Existing separators are stripped first, so formatting is idempotent.
/// No validation is performed: any string is formatted, and inputs shorter
/// than two characters (after stripping) are returned as-is.
///
/// # Example
///
/// ```
/// use polomarket_identity::domain::rut::format_rut;
///
/// assert_eq!(format_rut("123456785"), "12.345.678-5");
/// assert_eq!(format_rut("5"), "5");
/// ```
pub fn format_rut(input: &str) -> String {
    let clean = clean(input);
    let chars: Vec<char> = clean.chars().collect();
    if chars.len() < 2 {
        return clean;
    }

    let (body, check) = chars.split_at(chars.len() - 1);
    let mut formatted = String::with_capacity(clean.len() + body.len() / 3 + 1);
    for (i, c) in body.iter().enumerate() {
        if i > 0 && (body.len() - i) % 3 == 0 {
            formatted.push('.');
        }
        formatted.push(*c);
    }
    formatted.push('-');
    formatted.push(check[0].to_ascii_uppercase());
    formatted
}

/// A validated RUT.
///
/// Stored in canonical form: body without leading zeros and an uppercase
/// check character. Two `Rut`s compare equal whenever they denote the same
/// number, regardless of how the input was punctuated.
///
/// # Example
///
/// ```
/// use polomarket_identity::domain::Rut;
///
/// let rut = Rut::new("12345678-5").unwrap();
/// assert_eq!(rut.formatted(), "12.345.678-5");
/// assert_eq!(rut, Rut::new("012.345.678-5").unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rut {
    body: String,
    check: char,
}

impl Rut {
    /// Create a new Rut, validating shape and check digit.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidRut` if `validate_rut` rejects the input.
    pub fn new(input: impl AsRef<str>) -> Result<Self, ValidationError> {
        let input = input.as_ref();
        let clean = clean(input);

        let (body, check) = match split_clean(&clean) {
            Some(parts) if compute_check_digit(parts.0) == Some(parts.1) => parts,
            _ => return Err(ValidationError::InvalidRut(input.to_string())),
        };

        let trimmed = body.trim_start_matches('0');
        let body = if trimmed.is_empty() { "0" } else { trimmed };

        Ok(Self {
            body: body.to_string(),
            check,
        })
    }

    /// Body digits, without leading zeros.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Uppercase check character.
    pub fn check_digit(&self) -> char {
        self.check
    }

    /// Unpunctuated form, e.g. `"123456785"`.
    pub fn as_clean(&self) -> String {
        let mut clean = String::with_capacity(self.body.len() + 1);
        clean.push_str(&self.body);
        clean.push(self.check);
        clean
    }

    /// Display form, e.g. `"12.345.678-5"`.
    pub fn formatted(&self) -> String {
        format_rut(&self.as_clean())
    }
}

impl FromStr for Rut {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

// Serde support - serialize as the formatted string
impl Serialize for Rut {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.formatted().serialize(serializer)
    }
}

// Serde support - deserialize from string with validation
impl<'de> Deserialize<'de> for Rut {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Rut::new(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Rut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}
