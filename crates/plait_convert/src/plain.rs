use alloc::borrow::Cow;

use serde_json::Number;

// -----------------------------------------------------------------------------
// Plain values

/// The plain value tree: null, booleans, numbers, text, sequences and
/// string-keyed mappings.
///
/// This is exactly [`serde_json::Value`], so any serde format can carry it.
pub type Plain = serde_json::Value;

/// A string-keyed mapping of plain values, in key order.
pub type PlainMap = serde_json::Map<String, Plain>;

/// Returns a short human readable name of the plain value's kind.
///
/// # Examples
///
/// ```
/// use plait_convert::{Plain, plain_kind};
///
/// assert_eq!(plain_kind(&Plain::Null), "null");
/// assert_eq!(plain_kind(&Plain::from(vec![1, 2])), "sequence");
/// ```
pub fn plain_kind(value: &Plain) -> &'static str {
    match value {
        Plain::Null => "null",
        Plain::Bool(_) => "boolean",
        Plain::Number(_) => "number",
        Plain::String(_) => "text",
        Plain::Array(_) => "sequence",
        Plain::Object(_) => "mapping",
    }
}

// -----------------------------------------------------------------------------
// Scalar

/// A leaf value, borrowed from the value it describes where possible.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar<'a> {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    /// Non-finite floats have no plain representation and become [`Plain::Null`].
    Float(f64),
    Text(Cow<'a, str>),
}

impl Scalar<'_> {
    /// Converts the scalar into an owned plain value.
    ///
    /// # Examples
    ///
    /// ```
    /// use plait_convert::{Plain, Scalar};
    ///
    /// assert_eq!(Scalar::Int(-3).into_plain(), Plain::from(-3));
    /// assert_eq!(Scalar::Float(f64::NAN).into_plain(), Plain::Null);
    /// ```
    pub fn into_plain(self) -> Plain {
        match self {
            Scalar::Null => Plain::Null,
            Scalar::Bool(value) => Plain::Bool(value),
            Scalar::Int(value) => Plain::Number(value.into()),
            Scalar::UInt(value) => Plain::Number(value.into()),
            Scalar::Float(value) => Number::from_f64(value).map_or(Plain::Null, Plain::Number),
            Scalar::Text(value) => Plain::String(value.into_owned()),
        }
    }
}

impl From<Scalar<'_>> for Plain {
    #[inline]
    fn from(value: Scalar<'_>) -> Self {
        value.into_plain()
    }
}

// -----------------------------------------------------------------------------
// Tests
