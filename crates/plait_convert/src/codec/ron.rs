use alloc::string::String;

use ron::ser::PrettyConfig;

use super::{CodecError, TextCodec};
use crate::Plain;

/// RON text, compact by default.
///
/// RON has no plain-value type of its own; mappings are read back as plain
/// mappings only when their keys are strings.
///
/// ```
/// use plait_convert::codec::{Ron, TextCodec};
///
/// let value = serde_json::json!({ "a": [1, 2] });
/// let text = Ron::compact().encode_text(&value).unwrap();
/// assert_eq!(Ron::compact().decode_text(&text).unwrap(), value);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ron {
    pretty: bool,
}

impl Ron {
    #[inline]
    pub const fn compact() -> Self {
        Self { pretty: false }
    }

    #[inline]
    pub const fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl TextCodec for Ron {
    fn encode_text(&self, value: &Plain) -> Result<String, CodecError> {
        let text = if self.pretty {
            ron::ser::to_string_pretty(value, PrettyConfig::default())?
        } else {
            ron::to_string(value)?
        };
        Ok(text)
    }

    fn decode_text(&self, text: &str) -> Result<Plain, CodecError> {
        Ok(ron::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn ron_round_trips_nested_values() {
        let value = json!({ "name": "x", "items": [1, -2, 3.5], "flag": false, "none": null });
        for codec in [Ron::compact(), Ron::pretty()] {
            let text = codec.encode_text(&value).unwrap();
            assert_eq!(codec.decode_text(&text).unwrap(), value);
        }
    }

    #[test]
    fn ron_syntax_errors_are_reported() {
        let err = Ron::compact().decode_text("{\"a\": ").unwrap_err();
        assert!(matches!(err, CodecError::RonSyntax(_)));
    }
}
