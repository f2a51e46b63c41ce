use std::fmt;

use serde_json::Number as JsonNumber;

use crate::ParseError;

const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;
const TWO_POW_64: f64 = 18_446_744_073_709_551_616.0;

/// A JSON number.
///
/// Integers keep their exact value; other numbers are finite IEEE-754
/// doubles. Integral doubles are stored as integers, so `1`, `1.0` and `1e0`
/// compare equal while `9007199254740993` and `9007199254740992` do not.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Number(Repr);

/// Normalized storage: `NegInt` only holds negative values and `Float` only
/// holds values without an exact integer form.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Repr {
    PosInt(u64),
    NegInt(i64),
    Float(f64),
}

impl Number {
    /// Creates a new [`Number`] after validating finiteness.
    ///
    /// ```
    /// # use jdl_core::Number;
    /// let num = Number::new(42.0)?;
    /// assert_eq!(num.as_f64(), 42.0);
    /// assert_eq!(num, Number::from(42_u64));
    /// # Ok::<(), jdl_core::ParseError>(())
    /// ```
    pub fn new(value: f64) -> Result<Self, ParseError> {
        if !value.is_finite() {
            return Err(ParseError::NotFinite { value });
        }
        if value.fract() == 0.0 {
            // Negative zero lands here as well and collapses to `0`.
            if (0.0..TWO_POW_64).contains(&value) {
                return Ok(Self(Repr::PosInt(value as u64)));
            }
            if (-TWO_POW_63..0.0).contains(&value) {
                return Ok(Self(Repr::NegInt(value as i64)));
            }
        }
        Ok(Self(Repr::Float(value)))
    }

    /// Returns the value as a double, rounding integers beyond 2^53.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        match self.0 {
            Repr::PosInt(u) => u as f64,
            Repr::NegInt(i) => i as f64,
            Repr::Float(f) => f,
        }
    }

    /// Returns the exact integer value, if the number is a non-negative integer.
    #[must_use]
    pub fn as_u64(self) -> Option<u64> {
        match self.0 {
            Repr::PosInt(u) => Some(u),
            _ => None,
        }
    }

    /// Returns the exact integer value, if it fits in an `i64`.
    #[must_use]
    pub fn as_i64(self) -> Option<i64> {
        match self.0 {
            Repr::PosInt(u) => i64::try_from(u).ok(),
            Repr::NegInt(i) => Some(i),
            Repr::Float(_) => None,
        }
    }

    /// Converts the number into a `serde_json::Number`, keeping integers exact.
    #[must_use]
    pub fn to_json_number(self) -> JsonNumber {
        match self.0 {
            Repr::PosInt(u) => JsonNumber::from(u),
            Repr::NegInt(i) => JsonNumber::from(i),
            // Finite by construction, so `from_f64` only fails for NaN/inf.
            Repr::Float(f) => JsonNumber::from_f64(f).unwrap_or_else(|| JsonNumber::from(0)),
        }
    }
}

impl From<u64> for Number {
    fn from(value: u64) -> Self {
        Self(Repr::PosInt(value))
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        match u64::try_from(value) {
            Ok(unsigned) => Self(Repr::PosInt(unsigned)),
            Err(_) => Self(Repr::NegInt(value)),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json_number())
    }
}
