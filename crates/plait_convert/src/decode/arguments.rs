use alloc::boxed::Box;
use alloc::collections::{BTreeMap, VecDeque};
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::any::{Any, type_name};
use core::fmt;

use serde::de::DeserializeOwned;

use super::ConstructError;
use crate::{FieldSet, Plain};

// -----------------------------------------------------------------------------
// Argument

/// A single keyword argument.
pub enum Argument {
    /// The plain value, as decoded.
    Raw(Plain),
    /// The output of the field's parser.
    Parsed(Box<dyn Any>),
}

impl fmt::Debug for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Raw(raw) => f.debug_tuple("Raw").field(raw).finish(),
            Argument::Parsed(_) => f.write_str("Parsed(..)"),
        }
    }
}

fn deserialize<T: DeserializeOwned>(field: &str, raw: Plain) -> Result<T, ConstructError> {
    serde_json::from_value(raw).map_err(|source| ConstructError::InvalidField {
        field: field.to_string(),
        source,
    })
}

// -----------------------------------------------------------------------------
// Arguments

/// The arguments a value is constructed from.
///
/// Keyword arguments come from the decoded mapping, positional arguments
/// are given by the caller. [`Arguments::bind_positional`] names the
/// positional ones, after which constructors take fields by name.
///
/// # Examples
///
/// ```
/// use plait_convert::{Arguments, Plain};
///
/// let mut args = Arguments::with_positional(vec![Plain::from(1)]);
/// args.insert_raw("y", Plain::from(2));
/// args.bind_positional(&["x", "y"]).unwrap();
///
/// assert_eq!(args.take::<i64>("x").unwrap(), Some(1));
/// assert_eq!(args.take::<i64>("y").unwrap(), Some(2));
/// assert_eq!(args.take::<i64>("z").unwrap(), None);
/// args.finish().unwrap();
/// ```
#[derive(Debug, Default)]
pub struct Arguments {
    positional: VecDeque<Plain>,
    keywords: BTreeMap<String, Argument>,
    supplied: FieldSet,
}

impl Arguments {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_positional(positional: Vec<Plain>) -> Self {
        Self {
            positional: positional.into(),
            ..Self::default()
        }
    }

    /// Adds a keyword argument holding a plain value.
    pub fn insert_raw(&mut self, name: impl Into<String>, raw: Plain) {
        let name = name.into();
        self.supplied.insert(name.as_str());
        self.keywords.insert(name, Argument::Raw(raw));
    }

    /// Adds a keyword argument holding a parser's output.
    pub fn insert_parsed(&mut self, name: impl Into<String>, parsed: Box<dyn Any>) {
        let name = name.into();
        self.supplied.insert(name.as_str());
        self.keywords.insert(name, Argument::Parsed(parsed));
    }

    /// The names of the keyword arguments, as originally supplied.
    ///
    /// Positional arguments are not included, even after binding.
    #[inline]
    pub fn supplied(&self) -> &FieldSet {
        &self.supplied
    }

    /// Returns `true` if a keyword argument called `name` is left.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.keywords.contains_key(name)
    }

    /// The number of positional arguments not yet bound.
    #[inline]
    pub fn positional_len(&self) -> usize {
        self.positional.len()
    }

    /// Turns positional arguments into keyword arguments, in order of `names`.
    pub fn bind_positional(&mut self, names: &[&str]) -> Result<(), ConstructError> {
        if self.positional.len() > names.len() {
            return Err(ConstructError::TooManyPositional {
                expected: names.len(),
                found: self.positional.len(),
            });
        }
        for name in names {
            let Some(raw) = self.positional.pop_front() else {
                break;
            };
            if self.keywords.contains_key(*name) {
                return Err(ConstructError::DuplicateArgument {
                    field: name.to_string(),
                });
            }
            self.keywords.insert(name.to_string(), Argument::Raw(raw));
        }
        Ok(())
    }

    /// Removes the argument `name` and converts it to `T`.
    ///
    /// Plain values are deserialized. Parser output is used as is when it is
    /// a `T`, and deserialized when it is a plain value.
    pub fn take<T: DeserializeOwned + 'static>(
        &mut self,
        name: &str,
    ) -> Result<Option<T>, ConstructError> {
        let parsed = match self.keywords.remove(name) {
            None => return Ok(None),
            Some(Argument::Raw(raw)) => return deserialize(name, raw).map(Some),
            Some(Argument::Parsed(parsed)) => parsed,
        };
        match parsed.downcast::<T>() {
            Ok(value) => Ok(Some(*value)),
            Err(parsed) => match parsed.downcast::<Plain>() {
                Ok(raw) => deserialize(name, *raw).map(Some),
                Err(_) => Err(ConstructError::ParsedType {
                    field: name.to_string(),
                    expected: type_name::<T>(),
                }),
            },
        }
    }

    /// Removes the argument `name`, which must be the output of a parser
    /// producing `T`.
    pub fn take_parsed<T: 'static>(&mut self, name: &str) -> Result<Option<T>, ConstructError> {
        match self.keywords.remove(name) {
            None => Ok(None),
            Some(Argument::Parsed(parsed)) => match parsed.downcast::<T>() {
                Ok(value) => Ok(Some(*value)),
                Err(_) => Err(ConstructError::ParsedType {
                    field: name.to_string(),
                    expected: type_name::<T>(),
                }),
            },
            Some(Argument::Raw(_)) => Err(ConstructError::Unparsed {
                field: name.to_string(),
            }),
        }
    }

    /// Removes the argument `name` without converting it.
    #[inline]
    pub fn take_argument(&mut self, name: &str) -> Option<Argument> {
        self.keywords.remove(name)
    }

    /// Fails if any keyword argument was not taken.
    pub fn finish(&mut self) -> Result<(), ConstructError> {
        match self.keywords.keys().next() {
            Some(field) => Err(ConstructError::UnexpectedField {
                field: field.clone(),
            }),
            None => Ok(()),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn positional_binding() {
        let mut args = Arguments::with_positional(vec![Plain::from(1), Plain::from(2)]);
        assert_eq!(args.positional_len(), 2);
        args.bind_positional(&["x", "y", "z"]).unwrap();
        assert_eq!(args.positional_len(), 0);
        assert!(args.contains("y"));
        assert!(!args.contains("z"));
        assert!(args.supplied().is_empty());
    }

    #[test]
    fn too_many_positional() {
        let mut args = Arguments::with_positional(vec![Plain::Null; 3]);
        let err = args.bind_positional(&["x"]).unwrap_err();
        assert!(matches!(err, ConstructError::TooManyPositional { expected: 1, found: 3 }));
    }

    #[test]
    fn duplicate_argument() {
        let mut args = Arguments::with_positional(vec![Plain::from(1)]);
        args.insert_raw("x", Plain::from(2));
        let err = args.bind_positional(&["x"]).unwrap_err();
        assert!(matches!(err, ConstructError::DuplicateArgument { field } if field == "x"));
    }

    #[test]
    fn take_converts_raw_and_parsed() {
        let mut args = Arguments::new();
        args.insert_raw("raw", Plain::from("text"));
        args.insert_parsed("typed", Box::new(7_u32));
        args.insert_parsed("plain", Box::new(Plain::from(8)));
        args.insert_parsed("other", Box::new(1.5_f32));

        assert_eq!(args.take::<String>("raw").unwrap().as_deref(), Some("text"));
        assert_eq!(args.take::<u32>("typed").unwrap(), Some(7));
        assert_eq!(args.take::<u32>("plain").unwrap(), Some(8));
        assert!(matches!(
            args.take::<u32>("other"),
            Err(ConstructError::ParsedType { expected: "u32", .. })
        ));
        assert_eq!(args.supplied().len(), 4);
    }

    #[test]
    fn take_reports_invalid_values() {
        let mut args = Arguments::new();
        args.insert_raw("n", Plain::from("not a number"));
        let err = args.take::<i32>("n").unwrap_err();
        assert!(matches!(err, ConstructError::InvalidField { field, .. } if field == "n"));
    }

    #[test]
    fn take_parsed_needs_parser_output() {
        let mut args = Arguments::new();
        args.insert_raw("raw", Plain::Null);
        args.insert_parsed("parsed", Box::new(vec![1_u8]));

        assert!(matches!(
            args.take_parsed::<Vec<u8>>("raw"),
            Err(ConstructError::Unparsed { .. })
        ));
        assert_eq!(args.take_parsed::<Vec<u8>>("parsed").unwrap(), Some(vec![1]));
    }

    #[test]
    fn finish_rejects_leftovers() {
        let mut args = Arguments::new();
        args.insert_raw("left", Plain::Null);
        let err = args.finish().unwrap_err();
        assert!(matches!(err, ConstructError::UnexpectedField { field } if field == "left"));

        assert!(args.take_argument("left").is_some());
        args.finish().unwrap();
    }
}
