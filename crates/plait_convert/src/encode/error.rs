use alloc::string::String;

use thiserror::Error;

use crate::codec::CodecError;

/// An error produced while encoding a value.
///
/// Paths are JSON Pointers into the value being encoded; the root is `""`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EncodeError {
    /// A value contains itself.
    #[error("reference cycle at \"{path}\": `{type_name}` is already being encoded")]
    Cycle { type_name: &'static str, path: String },
    /// A value that has no plain form, or a record of an unregistered type.
    #[error("conversion is not implemented for `{type_name}` at \"{path}\"")]
    Unsupported { type_name: &'static str, path: String },
    /// A `RefCell` on the path is mutably borrowed.
    #[error("`{type_name}` at \"{path}\" is mutably borrowed")]
    Locked { type_name: &'static str, path: String },
    /// A field's value does not have the type its formatter accepts.
    ///
    /// Registration checks the formatter against the field's declared type,
    /// so this only occurs for an `Object` whose `field` returns a value of
    /// another type than `Convertible::field_info` declares.
    #[error("formatter at \"{path}\" accepts `{expected}`, found `{found}`")]
    FormatterInput {
        path: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl EncodeError {
    /// Returns where in the value the error occurred, if known.
    pub fn path(&self) -> Option<&str> {
        match self {
            EncodeError::Cycle { path, .. }
            | EncodeError::Unsupported { path, .. }
            | EncodeError::Locked { path, .. }
            | EncodeError::FormatterInput { path, .. } => Some(path),
            EncodeError::Codec(_) => None,
        }
    }

    #[inline]
    pub fn is_cycle(&self) -> bool {
        matches!(self, EncodeError::Cycle { .. })
    }

    #[inline]
    pub fn is_unsupported(&self) -> bool {
        matches!(self, EncodeError::Unsupported { .. })
    }
}
