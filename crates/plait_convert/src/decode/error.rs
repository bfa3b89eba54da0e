use alloc::borrow::ToOwned;
use alloc::string::String;
use core::any::type_name;

use thiserror::Error;

use crate::codec::CodecError;
use crate::registry::HookError;

// -----------------------------------------------------------------------------
// ConstructError

/// An error raised while building a value from its arguments.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConstructError {
    #[error("`{type_name}` is missing required field `{field}`")]
    MissingField { type_name: &'static str, field: String },
    #[error("unexpected field `{field}`")]
    UnexpectedField { field: String },
    #[error("field `{field}` was given both positionally and by name")]
    DuplicateArgument { field: String },
    #[error("expected at most {expected} positional arguments, found {found}")]
    TooManyPositional { expected: usize, found: usize },
    #[error("invalid value for field `{field}`: {source}")]
    InvalidField {
        field: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("the parser of field `{field}` did not produce `{expected}`")]
    ParsedType { field: String, expected: &'static str },
    #[error("field `{field}` needs a registered parser")]
    Unparsed { field: String },
    #[error("{0}")]
    Custom(String),
}

impl ConstructError {
    /// A required field of `T` was not supplied.
    #[inline]
    pub fn missing_field<T: ?Sized>(field: &str) -> Self {
        Self::MissingField {
            type_name: type_name::<T>(),
            field: field.to_owned(),
        }
    }

    /// An error with a custom message.
    #[inline]
    pub fn custom(message: impl core::fmt::Display) -> Self {
        Self::Custom(alloc::format!("{message}"))
    }
}

// -----------------------------------------------------------------------------
// DecodeError

/// An error produced while decoding a value.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DecodeError {
    #[error("`{type_name}` is not registered as convertible")]
    NotRegistered { type_name: &'static str },
    #[error("no convertible type is registered as `{name}`")]
    UnknownType { name: String },
    #[error("expected a mapping, found {found}")]
    NotAMapping { found: &'static str },
    /// A field parser rejected its input.
    #[error("failed to parse `{type_name}.{field}`: {source}")]
    Parser {
        type_name: &'static str,
        field: String,
        #[source]
        source: HookError,
    },
    #[error(transparent)]
    Construct(#[from] ConstructError),
    #[error(transparent)]
    Codec(#[from] CodecError),
}
