use alloc::boxed::Box;
use alloc::sync::Arc;
use core::any::{Any, TypeId, type_name};
use core::fmt;

use crate::node::downcast_ref;
use crate::{Convert, Plain};

/// The error type returned by parser hooks.
pub type HookError = Box<dyn core::error::Error + Send + Sync>;

// -----------------------------------------------------------------------------
// Formatter

/// A field hook that replaces the encoder's output for one field.
///
/// The formatter receives the raw field value and its output is used
/// verbatim, without being converted further.
///
/// # Examples
///
/// ```
/// use plait_convert::Plain;
/// use plait_convert::registry::Formatter;
///
/// let formatter = Formatter::new(|value: &String| Plain::from(value.len()));
/// assert_eq!(formatter.format(&String::from("abc")), Some(Plain::from(3)));
/// assert_eq!(formatter.format(&5_u8), None);
/// assert_eq!(formatter.input_type(), "alloc::string::String");
/// ```
#[derive(Clone)]
pub struct Formatter {
    input: &'static str,
    input_id: TypeId,
    func: Arc<dyn Fn(&dyn Convert) -> Option<Plain> + Send + Sync>,
}

impl Formatter {
    /// Wraps a function taking the field's value type.
    pub fn new<V, F>(func: F) -> Self
    where
        V: Convert,
        F: Fn(&V) -> Plain + Send + Sync + 'static,
    {
        Self {
            input: type_name::<V>(),
            input_id: TypeId::of::<V>(),
            func: Arc::new(move |value: &dyn Convert| downcast_ref::<V>(value).map(&func)),
        }
    }

    /// The name of the type this formatter accepts.
    #[inline]
    pub fn input_type(&self) -> &'static str {
        self.input
    }

    #[inline]
    pub fn input_type_id(&self) -> TypeId {
        self.input_id
    }

    /// Applies the formatter.
    ///
    /// Returns `None` if `value` is not of the formatter's input type. The
    /// registry only attaches a formatter to a field of that type.
    #[inline]
    pub fn format(&self, value: &dyn Convert) -> Option<Plain> {
        (self.func)(value)
    }
}

impl fmt::Debug for Formatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Formatter").field("input", &self.input).finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Parser

/// A field hook that turns the plain value of one field into the value
/// handed to the type's constructor.
///
/// # Examples
///
/// ```
/// use plait_convert::Plain;
/// use plait_convert::registry::Parser;
///
/// let parser = Parser::new(|raw| raw.as_str().map(str::to_uppercase).ok_or("expected text"));
///
/// let parsed = parser.parse(Plain::from("abc")).unwrap();
/// assert_eq!(parsed.downcast_ref::<String>().map(String::as_str), Some("ABC"));
/// assert!(parser.parse(Plain::from(1)).is_err());
/// assert_eq!(parser.output_type_id(), core::any::TypeId::of::<String>());
/// ```
#[derive(Clone)]
pub struct Parser {
    output: &'static str,
    output_id: TypeId,
    func: Arc<dyn Fn(Plain) -> Result<Box<dyn Any>, HookError> + Send + Sync>,
}

impl Parser {
    /// Wraps a fallible function from a plain value to the field's value.
    pub fn new<R, E, F>(func: F) -> Self
    where
        R: Any,
        E: Into<HookError>,
        F: Fn(Plain) -> Result<R, E> + Send + Sync + 'static,
    {
        Self {
            output: type_name::<R>(),
            output_id: TypeId::of::<R>(),
            func: Arc::new(move |raw: Plain| match func(raw) {
                Ok(value) => Ok(Box::new(value) as Box<dyn Any>),
                Err(err) => Err(err.into()),
            }),
        }
    }

    /// The name of the type this parser produces.
    #[inline]
    pub fn output_type(&self) -> &'static str {
        self.output
    }

    #[inline]
    pub fn output_type_id(&self) -> TypeId {
        self.output_id
    }

    /// Applies the parser.
    #[inline]
    pub fn parse(&self, raw: Plain) -> Result<Box<dyn Any>, HookError> {
        (self.func)(raw)
    }
}

impl fmt::Debug for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser").field("output", &self.output).finish_non_exhaustive()
    }
}
