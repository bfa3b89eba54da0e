//! Decoding values from plain data.
//!
//! Decoding is flat: the [`Decoder`] turns one plain mapping into keyword
//! arguments and hands them to the target type's constructor. Fields with a
//! registered parser are parsed first; everything else is passed on as plain
//! values. Nested records are only rebuilt where a parser does so.

mod arguments;
mod error;

pub use arguments::{Argument, Arguments};
pub use error::{ConstructError, DecodeError};

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::type_name;

use crate::codec::TextCodec;
use crate::registry::{Registry, Schema};
use crate::{Convertible, Object, Plain, PlainMap, plain_kind};

// -----------------------------------------------------------------------------
// Decoder

/// Builds values from [`Plain`] mappings using the schemas of a [`Registry`].
///
/// # Examples
///
/// ```
/// use plait_convert::registry::Parser;
/// use plait_convert::{Convertible, Plain, Registry};
///
/// #[derive(Convertible, Debug, PartialEq)]
/// struct Tag {
///     name: String,
///     #[convertible(default)]
///     weight: u32,
/// }
///
/// let mut registry = Registry::empty();
/// registry.register::<Tag>();
/// registry
///     .register_parser::<Tag>("name", Parser::new(|raw| {
///         raw.as_str().map(str::to_uppercase).ok_or("expected text")
///     }))
///     .unwrap();
///
/// let plain = serde_json::json!({ "name": "rust" });
/// let tag: Tag = registry.decoder().decode_value(plain, vec![]).unwrap();
/// assert_eq!(tag, Tag { name: "RUST".into(), weight: 0 });
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Decoder<'a> {
    registry: &'a Registry,
}

impl<'a> Decoder<'a> {
    #[inline]
    pub const fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    #[inline]
    pub const fn registry(&self) -> &'a Registry {
        self.registry
    }

    /// Builds a `T` from a plain mapping.
    #[inline]
    pub fn decode<T: Convertible>(&self, plain: PlainMap) -> Result<T, DecodeError> {
        self.decode_with(plain, Vec::new())
    }

    /// Builds a `T` from a plain mapping and positional arguments.
    ///
    /// Positional arguments fill `T`'s fields in declaration order. They are
    /// never passed through parsers.
    pub fn decode_with<T: Convertible>(
        &self,
        plain: PlainMap,
        positional: Vec<Plain>,
    ) -> Result<T, DecodeError> {
        let schema = self
            .registry
            .schema_of::<T>()
            .ok_or(DecodeError::NotRegistered {
                type_name: type_name::<T>(),
            })?;
        log::trace!("decoding `{}`", schema.type_path());
        let mut args = self.arguments(schema, plain, positional)?;
        Ok(T::construct(&mut args)?)
    }

    /// Builds a `T` from any plain value, which must be a mapping.
    pub fn decode_value<T: Convertible>(
        &self,
        plain: Plain,
        positional: Vec<Plain>,
    ) -> Result<T, DecodeError> {
        match plain {
            Plain::Object(map) => self.decode_with(map, positional),
            other => Err(DecodeError::NotAMapping {
                found: plain_kind(&other),
            }),
        }
    }

    /// Parses `text` with `codec`, then builds a `T` from it.
    pub fn decode_text<T: Convertible, C: TextCodec + ?Sized>(
        &self,
        codec: &C,
        text: &str,
        positional: Vec<Plain>,
    ) -> Result<T, DecodeError> {
        let plain = codec.decode_text(text)?;
        self.decode_value(plain, positional)
    }

    /// Builds a value of the type registered as `type_name`.
    ///
    /// See [`Registry::schema_by_name`] for how names are resolved.
    pub fn decode_dynamic(
        &self,
        type_name: &str,
        plain: PlainMap,
        positional: Vec<Plain>,
    ) -> Result<Box<dyn Object>, DecodeError> {
        let schema =
            self.registry
                .schema_by_name(type_name)
                .ok_or_else(|| DecodeError::UnknownType {
                    name: type_name.into(),
                })?;
        log::trace!("decoding `{}`", schema.type_path());
        let mut args = self.arguments(schema, plain, positional)?;
        Ok(schema.construct(&mut args)?)
    }

    fn arguments(
        &self,
        schema: &Schema,
        plain: PlainMap,
        positional: Vec<Plain>,
    ) -> Result<Arguments, DecodeError> {
        let mut args = Arguments::with_positional(positional);
        for (field, raw) in plain {
            match schema.parser(&field) {
                Some(parser) => match parser.parse(raw) {
                    Ok(parsed) => args.insert_parsed(field, parsed),
                    Err(source) => {
                        return Err(DecodeError::Parser {
                            type_name: schema.type_path(),
                            field,
                            source,
                        });
                    }
                },
                None => args.insert_raw(field, raw),
            }
        }
        Ok(args)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec;

    use serde_json::json;

    use super::*;
    use crate::registry::{HookError, Parser};
    use crate::{Convert, FieldSet};

    #[derive(Convertible, Debug, PartialEq)]
    struct Point {
        x: i64,
        y: i64,
    }

    #[derive(Convertible, Debug, Default, PartialEq)]
    #[convertible(default)]
    struct Sheldon {
        a: Option<String>,
        b: Option<String>,
        #[convertible(supplied)]
        supplied: FieldSet,
    }

    #[derive(Convertible, Debug, PartialEq)]
    struct Team {
        name: String,
        #[convertible(parsed)]
        lead: Point,
        #[convertible(default)]
        size: u8,
    }

    #[derive(Convertible, Debug)]
    struct Wide {
        value: u8,
        #[convertible(skip)]
        cache: Vec<u8>,
        _private: u8,
    }

    fn map(value: Plain) -> PlainMap {
        match value {
            Plain::Object(map) => map,
            _ => unreachable!(),
        }
    }

    fn shout(raw: Plain) -> Result<Option<String>, &'static str> {
        raw.as_str()
            .map(|text| Some(text.to_uppercase()))
            .ok_or("expected text")
    }

    fn registry() -> Registry {
        let mut registry = Registry::empty();
        registry.register::<Point>();
        registry.register::<Sheldon>();
        registry.register::<Team>();
        registry.register::<Wide>();
        registry
    }

    #[test]
    fn decode_declared_fields() {
        let registry = registry();
        let point: Point = registry.decoder().decode(map(json!({ "x": 1, "y": -2 }))).unwrap();
        assert_eq!(point, Point { x: 1, y: -2 });
    }

    #[test]
    fn positional_arguments_fill_fields_in_order() {
        let registry = registry();
        let decoder = registry.decoder();

        let point: Point = decoder.decode_with(map(json!({ "y": 2 })), vec![json!(1)]).unwrap();
        assert_eq!(point, Point { x: 1, y: 2 });

        let err = decoder
            .decode_with::<Point>(map(json!({ "x": 2 })), vec![json!(1)])
            .unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Construct(ConstructError::DuplicateArgument { .. })
        ));

        let err = decoder
            .decode_with::<Point>(PlainMap::new(), vec![json!(1), json!(2), json!(3)])
            .unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Construct(ConstructError::TooManyPositional { expected: 2, found: 3 })
        ));
    }

    #[test]
    fn missing_and_unexpected_fields() {
        let registry = registry();
        let decoder = registry.decoder();

        let err = decoder.decode::<Point>(map(json!({ "x": 1 }))).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Construct(ConstructError::MissingField { field, .. }) if field == "y"
        ));

        let err = decoder.decode::<Point>(map(json!({ "x": 1, "y": 2, "z": 3 }))).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Construct(ConstructError::UnexpectedField { field }) if field == "z"
        ));
    }

    #[test]
    fn parsers_run_before_construction() {
        let mut registry = registry();
        registry
            .register_parser::<Sheldon>("b", Parser::new(shout))
            .unwrap();
        registry
            .register_parser::<Sheldon>(
                "a",
                Parser::new(|_| Ok::<_, HookError>(Some(String::from("sheldon")))),
            )
            .unwrap();

        let sheldon: Sheldon = registry
            .decoder()
            .decode(map(json!({ "a": "penny", "b": "bazzinga" })))
            .unwrap();
        assert_eq!(sheldon.a.as_deref(), Some("sheldon"));
        assert_eq!(sheldon.b.as_deref(), Some("BAZZINGA"));
    }

    #[test]
    fn parser_errors_name_the_field() {
        let mut registry = registry();
        registry
            .register_parser::<Sheldon>("b", Parser::new(shout))
            .unwrap();

        let err = registry.decoder().decode::<Sheldon>(map(json!({ "b": 5 }))).unwrap_err();
        assert!(matches!(&err, DecodeError::Parser { field, .. } if field == "b"));
        assert!(err.to_string().contains("expected text"));
    }

    #[test]
    fn supplied_fields_are_recorded() {
        let registry = registry();
        let sheldon: Sheldon = registry.decoder().decode(map(json!({ "b": "x" }))).unwrap();
        assert!(sheldon.supplied.contains("b"));
        assert!(!sheldon.supplied.contains("a"));

        let plain = registry.encoder().encode(&sheldon).unwrap();
        assert_eq!(plain, json!({ "b": "x" }));
    }

    #[test]
    fn nested_records_decode_through_parsers() {
        let mut registry = registry();
        registry
            .register_parser::<Team>(
                "lead",
                Parser::new(|raw| {
                    let mut local = Registry::empty();
                    local.register::<Point>();
                    local.decoder().decode_value::<Point>(raw, vec![])
                }),
            )
            .unwrap();

        let plain = json!({ "name": "core", "lead": { "x": 3, "y": 4 } });
        let team: Team = registry.decoder().decode_value(plain, vec![]).unwrap();
        assert_eq!(team, Team { name: "core".into(), lead: Point { x: 3, y: 4 }, size: 0 });

        let encoded = registry.encoder().encode(&team).unwrap();
        assert_eq!(encoded, json!({ "name": "core", "lead": { "x": 3, "y": 4 }, "size": 0 }));
    }

    #[test]
    fn parsed_fields_need_a_parser() {
        let registry = registry();
        let plain = json!({ "name": "core", "lead": { "x": 3, "y": 4 } });
        let err = registry.decoder().decode_value::<Team>(plain, vec![]).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Construct(ConstructError::Unparsed { field }) if field == "lead"
        ));
    }

    #[test]
    fn skipped_and_private_fields() {
        let registry = registry();
        let wide: Wide = registry.decoder().decode(map(json!({ "value": 4 }))).unwrap();
        assert_eq!(wide.value, 4);
        assert!(wide.cache.is_empty());
        assert_eq!(wide._private, 0);

        let plain = registry.encoder().encode(&wide).unwrap();
        assert_eq!(plain, json!({ "value": 4 }));

        let err = registry.decoder().decode::<Wide>(map(json!({ "value": 4, "cache": [] })));
        assert!(err.is_err());
    }

    #[test]
    fn decode_value_needs_a_mapping() {
        let registry = registry();
        let err = registry.decoder().decode_value::<Point>(json!([1, 2]), vec![]).unwrap_err();
        assert!(matches!(err, DecodeError::NotAMapping { found: "sequence" }));
    }

    #[test]
    fn decode_text_reports_codec_errors() {
        let registry = registry();
        let decoder = registry.decoder();
        let codec = crate::codec::Json::compact();

        let point: Point = decoder.decode_text(&codec, r#"{"x":1,"y":2}"#, vec![]).unwrap();
        assert_eq!(point, Point { x: 1, y: 2 });

        let err = decoder.decode_text::<Point, _>(&codec, "{", vec![]).unwrap_err();
        assert!(matches!(err, DecodeError::Codec(_)));
    }

    #[test]
    fn unregistered_and_unknown_types() {
        let registry = Registry::empty();
        let err = registry.decoder().decode::<Point>(PlainMap::new()).unwrap_err();
        assert!(matches!(err, DecodeError::NotRegistered { .. }));

        let Err(err) = registry.decoder().decode_dynamic("Point", PlainMap::new(), vec![]) else {
            panic!("decoding an unknown type name must fail");
        };
        assert!(matches!(err, DecodeError::UnknownType { name } if name == "Point"));
    }

    #[test]
    fn decode_dynamic_by_name() {
        let registry = registry();
        let object = registry
            .decoder()
            .decode_dynamic("Point", map(json!({ "x": 5, "y": 6 })), vec![])
            .unwrap();
        let object: &dyn Convert = &*object;
        assert_eq!(crate::node::downcast_ref::<Point>(object), Some(&Point { x: 5, y: 6 }));
    }
}
