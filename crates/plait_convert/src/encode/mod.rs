//! Encoding values into plain data.
//!
//! The [`Encoder`] walks a value through its [`Node`] classification:
//! scalars are copied, sequences and mappings are encoded element by element,
//! and records are encoded field by field according to their registered
//! [`Schema`]. Field formatters replace the encoding of a single field.
//!
//! Composite values are tracked in a [`Visited`] set while their children are
//! encoded, so a value that contains itself fails with
//! [`EncodeError::Cycle`] instead of recursing forever.

mod error;
mod path;
mod visited;

pub use error::EncodeError;
pub use path::PointerPath;
pub use visited::{Identity, Scope, Visited};

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::codec::TextCodec;
use crate::node::concrete_type_id;
use crate::registry::{Registry, Schema};
use crate::{Convert, Node, Object, Plain, PlainMap};

// -----------------------------------------------------------------------------
// Encoder

/// Converts values into [`Plain`] trees using the schemas of a [`Registry`].
///
/// # Examples
///
/// ```
/// use plait_convert::{Convertible, Plain, Registry};
///
/// #[derive(Convertible)]
/// struct Point {
///     x: i64,
///     y: i64,
/// }
///
/// let mut registry = Registry::empty();
/// registry.register::<Point>();
///
/// let encoder = registry.encoder();
/// let plain = encoder.encode(&vec![Point { x: 1, y: 2 }]).unwrap();
/// assert_eq!(plain, serde_json::json!([{ "x": 1, "y": 2 }]));
///
/// let plain = encoder.encode_excluding(&Point { x: 1, y: 2 }, &["y"]).unwrap();
/// assert_eq!(plain, serde_json::json!({ "x": 1 }));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Encoder<'a> {
    registry: &'a Registry,
}

impl<'a> Encoder<'a> {
    #[inline]
    pub const fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    #[inline]
    pub const fn registry(&self) -> &'a Registry {
        self.registry
    }

    /// Encodes `value` into a plain tree.
    #[inline]
    pub fn encode(&self, value: &dyn Convert) -> Result<Plain, EncodeError> {
        self.encode_excluding(value, &[])
    }

    /// Encodes `value`, leaving out the named fields of the root record.
    ///
    /// Exclusions never apply to nested records, and are ignored if the
    /// root is not a record.
    pub fn encode_excluding(
        &self,
        value: &dyn Convert,
        excluded: &[&str],
    ) -> Result<Plain, EncodeError> {
        log::trace!("encoding `{}`", value.type_name());
        let mut visited = Visited::new();
        let mut path = PointerPath::new();
        self.transform(value, excluded, &mut visited, &mut path)
    }

    /// Encodes `value` and renders the result with `codec`.
    pub fn encode_text<C: TextCodec + ?Sized>(
        &self,
        value: &dyn Convert,
        excluded: &[&str],
        codec: &C,
    ) -> Result<String, EncodeError> {
        let plain = self.encode_excluding(value, excluded)?;
        Ok(codec.encode_text(&plain)?)
    }

    // -------------------------------------------------------------------------
    // Traversal

    fn transform(
        &self,
        value: &dyn Convert,
        excluded: &[&str],
        visited: &mut Visited,
        path: &mut PointerPath,
    ) -> Result<Plain, EncodeError> {
        match value.classify() {
            Node::Scalar(scalar) => Ok(scalar.into_plain()),
            Node::Cell(inner) => self.transform(&*inner, excluded, visited, path),
            Node::Locked => Err(EncodeError::Locked {
                type_name: value.type_name(),
                path: path.to_string(),
            }),
            Node::Sequence(items) => {
                let mut scope = enter(value, visited, path)?;
                let mut out = Vec::new();
                for (index, item) in items.enumerate() {
                    path.push_index(index);
                    out.push(self.transform(item, &[], &mut scope, path)?);
                    path.pop();
                }
                Ok(Plain::Array(out))
            }
            Node::Mapping(entries) => {
                let mut scope = enter(value, visited, path)?;
                let mut out = PlainMap::new();
                for (key, item) in entries {
                    path.push(key);
                    let plain = self.transform(item, &[], &mut scope, path)?;
                    path.pop();
                    out.insert(key.into(), plain);
                }
                Ok(Plain::Object(out))
            }
            Node::Object(object) => {
                let mut scope = enter(value, visited, path)?;
                let Some(schema) = self.registry.schema(concrete_type_id(object)) else {
                    return Err(EncodeError::Unsupported {
                        type_name: object.type_name(),
                        path: path.to_string(),
                    });
                };
                self.transform_object(object, schema, excluded, &mut scope, path)
            }
            Node::Opaque => Err(EncodeError::Unsupported {
                type_name: value.type_name(),
                path: path.to_string(),
            }),
        }
    }

    fn transform_object(
        &self,
        object: &dyn Object,
        schema: &Schema,
        excluded: &[&str],
        visited: &mut Visited,
        path: &mut PointerPath,
    ) -> Result<Plain, EncodeError> {
        let mut out = PlainMap::new();
        for name in schema.field_names(object) {
            if excluded.contains(&name) {
                continue;
            }
            let Some(value) = object.field(name) else {
                continue;
            };

            path.push(name);
            let plain = match schema.formatter(name) {
                Some(formatter) => {
                    check_formatter_input(value, visited, path)?;
                    formatter
                        .format(value)
                        .ok_or_else(|| EncodeError::FormatterInput {
                            path: path.to_string(),
                            expected: formatter.input_type(),
                            found: value.type_name(),
                        })?
                }
                None => self.transform(value, &[], visited, path)?,
            };
            path.pop();

            out.insert(name.into(), plain);
        }
        Ok(Plain::Object(out))
    }
}

fn enter<'v>(
    value: &dyn Convert,
    visited: &'v mut Visited,
    path: &PointerPath,
) -> Result<Scope<'v>, EncodeError> {
    visited
        .enter(Identity::of(value))
        .ok_or_else(|| EncodeError::Cycle {
            type_name: value.type_name(),
            path: path.to_string(),
        })
}

/// A formatter's input is not encoded, but it must not be one of its own
/// ancestors either.
fn check_formatter_input(
    value: &dyn Convert,
    visited: &Visited,
    path: &PointerPath,
) -> Result<(), EncodeError> {
    match value.classify() {
        Node::Cell(inner) => check_formatter_input(&*inner, visited, path),
        Node::Locked => Err(EncodeError::Locked {
            type_name: value.type_name(),
            path: path.to_string(),
        }),
        node if node.is_composite() && visited.contains(&Identity::of(value)) => {
            Err(EncodeError::Cycle {
                type_name: value.type_name(),
                path: path.to_string(),
            })
        }
        _ => Ok(()),
    }
}

// -----------------------------------------------------------------------------
// Tests
