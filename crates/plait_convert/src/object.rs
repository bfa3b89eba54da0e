use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::{Any, TypeId, type_name};

use crate::codec::Json;
use crate::{Arguments, ConstructError, Convert, DecodeError, EncodeError, Plain, PlainMap};

// -----------------------------------------------------------------------------
// Object

/// A record type with named fields.
///
/// This is the object-safe half of [`Convertible`]. The encoder reads
/// fields through it without knowing the concrete type.
pub trait Object: Convert {
    /// Returns the value of the field called `name`.
    fn field(&self, name: &str) -> Option<&dyn Convert>;

    /// The keyword fields this instance was built from.
    ///
    /// Only meaningful for types using [`FieldSource::Supplied`].
    #[inline]
    fn supplied_fields(&self) -> Option<&FieldSet> {
        None
    }
}

/// Where a convertible type takes its field list from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSource {
    /// A fixed list of field names, in declaration order.
    Declared(&'static [&'static str]),
    /// The keyword fields each instance was constructed with.
    Supplied,
}

/// The set of field names an instance was constructed with.
///
/// Iteration is in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet(BTreeSet<String>);

impl FieldSet {
    /// Creates an empty set.
    #[inline]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Adds a name, returning `false` if it was already present.
    #[inline]
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.0.insert(name.into())
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for FieldSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

// -----------------------------------------------------------------------------
// FieldInfo

/// The declared type of one listed field.
///
/// Field hooks are checked against it when they are registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldInfo {
    type_id: TypeId,
    type_name: &'static str,
    parsed: bool,
}

impl FieldInfo {
    /// A field of type `T` decoded from its plain value or a parser's output.
    #[inline]
    pub fn new<T: Any>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            parsed: false,
        }
    }

    /// A field of type `T` that only accepts a parser's output.
    #[inline]
    pub fn parsed<T: Any>() -> Self {
        Self {
            parsed: true,
            ..Self::new::<T>()
        }
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[inline]
    pub fn is_parsed(&self) -> bool {
        self.parsed
    }

    /// Returns `true` if a parser producing `output` can feed this field.
    ///
    /// Parsed fields need their exact type. Other fields also take a
    /// [`Plain`] value, which is then deserialized.
    pub fn accepts_parser_output(&self, output: TypeId) -> bool {
        output == self.type_id || (!self.parsed && output == TypeId::of::<Plain>())
    }
}

// -----------------------------------------------------------------------------
// Convertible

/// A record type that can be converted to and from plain mappings.
///
/// Implement it with `#[derive(Convertible)]`, then register the type with a
/// [`Registry`](crate::Registry) before converting it.
///
/// The provided methods use the [global registry](crate::global).
///
/// # Examples
///
/// ```
/// use plait_convert::{Convertible, global_mut};
///
/// #[derive(Convertible, Debug, PartialEq)]
/// struct Point {
///     x: i64,
///     y: i64,
/// }
///
/// global_mut(|registry| registry.register::<Point>());
///
/// let json = Point { x: 1, y: 2 }.to_json().unwrap();
/// assert_eq!(json, r#"{"x":1,"y":2}"#);
/// assert_eq!(Point::from_json(&json).unwrap(), Point { x: 1, y: 2 });
/// ```
pub trait Convertible: Object + Sized {
    /// Where the encoder takes this type's field names from.
    fn field_source() -> FieldSource;

    /// The declared type of the listed field `name`.
    ///
    /// Returns `None` for names that are not listed fields, including
    /// skipped fields and the supplied-field record.
    fn field_info(name: &str) -> Option<FieldInfo>;

    /// Builds a value from decoded arguments.
    ///
    /// Every keyword argument must be consumed, see [`Arguments::finish`].
    fn construct(args: &mut Arguments) -> Result<Self, ConstructError>;

    /// Encodes this value with the global registry.
    fn to_plain(&self) -> Result<Plain, EncodeError> {
        crate::global().encoder().encode(self)
    }

    /// Encodes this value, leaving out the named top-level fields.
    fn to_plain_excluding(&self, excluded: &[&str]) -> Result<Plain, EncodeError> {
        crate::global().encoder().encode_excluding(self, excluded)
    }

    /// Encodes this value as compact JSON text.
    fn to_json(&self) -> Result<String, EncodeError> {
        crate::global().encoder().encode_text(self, &[], &Json::compact())
    }

    /// Encodes this value as JSON text, leaving out the named top-level fields.
    fn to_json_excluding(&self, excluded: &[&str]) -> Result<String, EncodeError> {
        crate::global().encoder().encode_text(self, excluded, &Json::compact())
    }

    /// Decodes a value from a plain mapping with the global registry.
    fn from_plain(plain: PlainMap) -> Result<Self, DecodeError> {
        crate::global().decoder().decode(plain)
    }

    /// Decodes a value from a plain mapping and positional arguments.
    fn from_plain_with(plain: PlainMap, positional: Vec<Plain>) -> Result<Self, DecodeError> {
        crate::global().decoder().decode_with(plain, positional)
    }

    /// Decodes a value from JSON text.
    fn from_json(text: &str) -> Result<Self, DecodeError> {
        crate::global().decoder().decode_text(&Json::compact(), text, Vec::new())
    }

    /// Decodes a value from JSON text and positional arguments.
    fn from_json_with(text: &str, positional: Vec<Plain>) -> Result<Self, DecodeError> {
        crate::global().decoder().decode_text(&Json::compact(), text, positional)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use core::any::TypeId;

    use super::{FieldInfo, FieldSet};
    use crate::Plain;

    #[test]
    fn field_set_is_ordered() {
        let mut set: FieldSet = ["b", "a"].into_iter().collect();
        assert!(!set.insert("a"));
        assert!(set.insert("c"));
        assert!(set.contains("b"));
        assert_eq!(set.iter().collect::<Vec<_>>(), ["a", "b", "c"]);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn parser_output_for_fields() {
        let plain = FieldInfo::new::<Option<String>>();
        assert!(plain.accepts_parser_output(TypeId::of::<Option<String>>()));
        assert!(plain.accepts_parser_output(TypeId::of::<Plain>()));
        assert!(!plain.accepts_parser_output(TypeId::of::<String>()));

        let parsed = FieldInfo::parsed::<Vec<u8>>();
        assert!(parsed.is_parsed());
        assert!(parsed.accepts_parser_output(TypeId::of::<Vec<u8>>()));
        assert!(!parsed.accepts_parser_output(TypeId::of::<Plain>()));
        assert_eq!(parsed.type_name(), core::any::type_name::<Vec<u8>>());
    }
}
