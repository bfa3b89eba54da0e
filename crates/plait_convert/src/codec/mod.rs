//! Text formats for plain values.
//!
//! A [`TextCodec`] renders a [`Plain`] tree as text and parses it back.
//! [`Json`] is always available; [`Ron`] needs the `ron` feature.

#[cfg(feature = "ron")]
mod ron;

#[cfg(feature = "ron")]
pub use self::ron::Ron;

use alloc::string::String;

use thiserror::Error;

use crate::Plain;

// -----------------------------------------------------------------------------
// TextCodec

/// Renders plain values as text and parses them back.
pub trait TextCodec {
    fn encode_text(&self, value: &Plain) -> Result<String, CodecError>;

    fn decode_text(&self, text: &str) -> Result<Plain, CodecError>;
}

/// An error raised by a [`TextCodec`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CodecError {
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[cfg(feature = "ron")]
    #[error("invalid ron: {0}")]
    Ron(#[from] ::ron::Error),
    #[cfg(feature = "ron")]
    #[error("invalid ron: {0}")]
    RonSyntax(#[from] ::ron::error::SpannedError),
}

// -----------------------------------------------------------------------------
// Json

/// JSON text, compact by default.
///
/// # Examples
///
/// ```
/// use plait_convert::Plain;
/// use plait_convert::codec::{Json, TextCodec};
///
/// let value = serde_json::json!({ "a": [1, 2] });
/// assert_eq!(Json::compact().encode_text(&value).unwrap(), r#"{"a":[1,2]}"#);
/// assert_eq!(Json::pretty().decode_text("{ \"a\": [1, 2] }").unwrap(), value);
/// assert!(Json::compact().decode_text("{").is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Json {
    pretty: bool,
}

impl Json {
    #[inline]
    pub const fn compact() -> Self {
        Self { pretty: false }
    }

    #[inline]
    pub const fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl TextCodec for Json {
    fn encode_text(&self, value: &Plain) -> Result<String, CodecError> {
        let text = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(text)
    }

    fn decode_text(&self, text: &str) -> Result<Plain, CodecError> {
        Ok(serde_json::from_str(text)?)
    }
}
