//! The schema registry.
//!
//! A [`Registry`] records which types are convertible together with their
//! field hooks. Encoders and decoders borrow a registry for the duration of
//! a call; the [global registry](global) serves the convenience methods on
//! [`Convertible`].

mod error;
mod global;
mod hooks;
mod schema;

pub use error::RegistrationError;
pub use global::{global, global_mut};
pub use hooks::{Formatter, HookError, Parser};
pub use schema::Schema;

use core::any::{TypeId, type_name};

use plait_utils::TypeIdMap;
use plait_utils::hash::{HashMap, HashSet};

use crate::node::concrete_type_id;
use crate::{Convert, Convertible, Decoder, Encoder, FieldInfo, Node};

// -----------------------------------------------------------------------------
// Registry

/// A set of convertible types and their field hooks.
///
/// Types are looked up by [`TypeId`] or by name. A bare type name such as
/// `Point` only resolves if a single registered type carries it; the full
/// type path always resolves.
///
/// # Examples
///
/// ```
/// use plait_convert::{Convertible, Plain, Registry};
/// use plait_convert::registry::Formatter;
///
/// #[derive(Convertible)]
/// struct Account {
///     name: String,
///     secret: String,
/// }
///
/// let mut registry = Registry::empty();
/// registry.register::<Account>();
/// registry
///     .register_formatter::<Account>("secret", Formatter::new(|_: &String| Plain::from("***")))
///     .unwrap();
///
/// let account = Account { name: "ada".into(), secret: "hunter2".into() };
/// let plain = registry.encoder().encode(&account).unwrap();
/// assert_eq!(plain["secret"], "***");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Registry {
    schemas: TypeIdMap<Schema>,
    type_path_to_id: HashMap<&'static str, TypeId>,
    type_name_to_id: HashMap<&'static str, TypeId>,
    ambiguous_names: HashSet<&'static str>,
}

impl Registry {
    /// Creates a registry with no types.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a registry holding every automatically registered type.
    ///
    /// Without the `auto_register` feature this is the same as [`Registry::empty`].
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.auto_register();
        registry
    }

    /// Registers every type marked `#[convertible(auto_register)]`.
    ///
    /// Returns `false` if the `auto_register` feature is disabled, or if
    /// link-time collection is not supported on the target platform.
    #[cfg_attr(not(feature = "auto_register"), inline(always))]
    pub fn auto_register(&mut self) -> bool {
        #[cfg(feature = "auto_register")]
        {
            use crate::__macro_exports::auto_register;

            if self.contains::<auto_register::__AvailFlag>() {
                return true;
            }
            let before = self.len();
            auto_register::__register_types(self);
            log::debug!("auto registered {} convertible types", self.len() - before);
            self.contains::<auto_register::__AvailFlag>()
        }
        #[cfg(not(feature = "auto_register"))]
        {
            false
        }
    }

    /// Registers `T`, returning `false` if it was already registered.
    ///
    /// Registering twice keeps the existing schema and its hooks.
    pub fn register<T: Convertible>(&mut self) -> bool {
        let type_id = TypeId::of::<T>();
        if !self.schemas.try_insert(type_id, Schema::of::<T>) {
            return false;
        }

        if let Some(schema) = self.schemas.get(&type_id) {
            let (path, name) = (schema.type_path(), schema.type_name());
            self.index(type_id, path, name);
        }
        log::debug!("registered convertible type `{}`", type_name::<T>());
        true
    }

    fn index(&mut self, type_id: TypeId, path: &'static str, name: &'static str) {
        self.type_path_to_id.insert(path, type_id);

        if self.ambiguous_names.contains(name) {
            return;
        }
        if self.type_name_to_id.insert(name, type_id).is_some() {
            self.type_name_to_id.remove(name);
            self.ambiguous_names.insert(name);
        }
    }

    // -------------------------------------------------------------------------
    // Lookup

    #[inline]
    pub fn contains<T: ?Sized + 'static>(&self) -> bool {
        self.schemas.contains_type::<T>()
    }

    #[inline]
    pub fn schema_of<T: ?Sized + 'static>(&self) -> Option<&Schema> {
        self.schemas.get_type::<T>()
    }

    #[inline]
    pub fn schema(&self, type_id: TypeId) -> Option<&Schema> {
        self.schemas.get(&type_id)
    }

    /// Looks up a schema by full type path or by bare type name.
    ///
    /// Returns `None` for names shared by several registered types.
    pub fn schema_by_name(&self, name: &str) -> Option<&Schema> {
        self.type_path_to_id
            .get(name)
            .or_else(|| self.type_name_to_id.get(name))
            .and_then(|type_id| self.schema(*type_id))
    }

    /// Returns `true` if `name` is a bare type name shared by several types.
    #[inline]
    pub fn is_ambiguous(&self, name: &str) -> bool {
        self.ambiguous_names.contains(name)
    }

    /// Returns `true` if `value` is a record of a registered type.
    ///
    /// Looks through `Box`, `Rc`, `Arc`, `Option` and `RefCell`.
    pub fn is_convertible(&self, value: &dyn Convert) -> bool {
        match value.classify() {
            Node::Object(object) => self.schemas.contains(&concrete_type_id(object)),
            Node::Cell(inner) => self.is_convertible(&*inner),
            _ => false,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Iterates over all registered schemas, in no particular order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Schema> {
        self.schemas.values()
    }

    // -------------------------------------------------------------------------
    // Hooks

    fn schema_mut<T: ?Sized + 'static>(
        &mut self,
        field: &str,
        hook: &'static str,
    ) -> Result<&mut Schema, RegistrationError> {
        self.schemas
            .get_mut(&TypeId::of::<T>())
            .ok_or_else(|| RegistrationError::NotConvertible {
                type_name: type_name::<T>(),
                field: field.into(),
                hook,
            })
    }

    /// Attaches a formatter to `field` of `T`, replacing any previous one.
    ///
    /// `field` must be a listed field of `T` holding exactly the formatter's
    /// input type.
    pub fn register_formatter<T: ?Sized + 'static>(
        &mut self,
        field: &str,
        formatter: Formatter,
    ) -> Result<(), RegistrationError> {
        let schema = self.schema_mut::<T>(field, "formatter")?;
        let input = formatter.input_type_id();
        check_hook(schema, field, "formatter", formatter.input_type(), |info| {
            info.type_id() == input
        })?;
        if schema.formatters.insert(field.into(), formatter).is_some() {
            log::warn!("replaced the formatter of `{}.{field}`", schema.type_name());
        }
        Ok(())
    }

    /// Attaches a parser to `field` of `T`, replacing any previous one.
    ///
    /// The parser must produce the field's type. Fields not marked `parsed`
    /// also accept a parser producing [`Plain`](crate::Plain), whose output
    /// is then deserialized.
    pub fn register_parser<T: ?Sized + 'static>(
        &mut self,
        field: &str,
        parser: Parser,
    ) -> Result<(), RegistrationError> {
        let schema = self.schema_mut::<T>(field, "parser")?;
        let output = parser.output_type_id();
        check_hook(schema, field, "parser", parser.output_type(), |info| {
            info.accepts_parser_output(output)
        })?;
        if schema.parsers.insert(field.into(), parser).is_some() {
            log::warn!("replaced the parser of `{}.{field}`", schema.type_name());
        }
        Ok(())
    }

    /// Removes the formatter of `field` of `T`, returning it if present.
    pub fn remove_formatter<T: ?Sized + 'static>(&mut self, field: &str) -> Option<Formatter> {
        self.schemas.get_mut(&TypeId::of::<T>())?.formatters.remove(field)
    }

    /// Removes the parser of `field` of `T`, returning it if present.
    pub fn remove_parser<T: ?Sized + 'static>(&mut self, field: &str) -> Option<Parser> {
        self.schemas.get_mut(&TypeId::of::<T>())?.parsers.remove(field)
    }

    // -------------------------------------------------------------------------
    // Conversion

    /// Creates an encoder reading this registry.
    #[inline]
    pub const fn encoder(&self) -> Encoder<'_> {
        Encoder::new(self)
    }

    /// Creates a decoder reading this registry.
    #[inline]
    pub const fn decoder(&self) -> Decoder<'_> {
        Decoder::new(self)
    }
}

/// Checks that `field` is a listed field of `schema` whose type fits a hook
/// working on `found`.
fn check_hook(
    schema: &Schema,
    field: &str,
    hook: &'static str,
    found: &'static str,
    fits: impl FnOnce(&FieldInfo) -> bool,
) -> Result<(), RegistrationError> {
    let Some(info) = schema.field_info(field) else {
        return Err(RegistrationError::UnknownField {
            type_name: schema.type_path(),
            field: field.into(),
            hook,
        });
    };
    if fits(&info) {
        return Ok(());
    }
    Err(RegistrationError::HookType {
        type_name: schema.type_path(),
        field: field.into(),
        hook,
        expected: info.type_name(),
        found,
    })
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::rc::Rc;
    use core::cell::RefCell;

    use super::*;
    use crate::{Convertible, FieldSource, Plain};

    #[derive(Convertible, Debug, Default)]
    #[convertible(default)]
    struct Sheldon {
        a: Option<String>,
        b: Option<String>,
    }

    #[derive(Convertible, Default)]
    #[convertible(default)]
    struct Holder {
        #[convertible(parsed)]
        inner: Option<Sheldon>,
        #[convertible(skip)]
        cache: Vec<u8>,
    }

    mod other {
        use crate::Convertible;

        #[derive(Convertible)]
        pub struct Sheldon {
            pub c: i32,
        }
    }

    #[test]
    fn register_is_idempotent() {
        let mut registry = Registry::empty();
        assert!(registry.register::<Sheldon>());
        assert!(!registry.register::<Sheldon>());
        assert_eq!(registry.len(), 1);

        let schema = registry.schema_of::<Sheldon>().unwrap();
        assert_eq!(schema.type_name(), "Sheldon");
        assert_eq!(schema.field_source(), FieldSource::Declared(&["a", "b"]));
    }

    #[test]
    fn register_keeps_hooks() {
        let mut registry = Registry::empty();
        registry.register::<Sheldon>();
        registry
            .register_parser::<Sheldon>("a", Parser::new(|raw| Ok::<_, HookError>(raw)))
            .unwrap();
        registry.register::<Sheldon>();

        let schema = registry.schema_of::<Sheldon>().unwrap();
        assert!(schema.parser("a").is_some());
    }

    #[test]
    fn lookup_by_name() {
        let mut registry = Registry::empty();
        registry.register::<Sheldon>();
        assert!(registry.schema_by_name("Sheldon").is_some());

        registry.register::<other::Sheldon>();
        assert!(registry.is_ambiguous("Sheldon"));
        assert!(registry.schema_by_name("Sheldon").is_none());

        let path = type_name::<other::Sheldon>();
        let schema = registry.schema_by_name(path).unwrap();
        assert_eq!(schema.type_id(), TypeId::of::<other::Sheldon>());
    }

    #[test]
    fn hooks_need_a_registered_type() {
        let mut registry = Registry::empty();
        let err = registry
            .register_formatter::<Sheldon>("a", Formatter::new(|_: &Option<String>| Plain::Null))
            .unwrap_err();
        assert!(matches!(
            err,
            RegistrationError::NotConvertible { hook: "formatter", .. }
        ));

        let err = registry
            .register_parser::<Sheldon>("a", Parser::new(|raw| Ok::<_, HookError>(raw)))
            .unwrap_err();
        assert!(matches!(err, RegistrationError::NotConvertible { hook: "parser", .. }));
    }

    #[test]
    fn hooks_replace_and_remove() {
        let mut registry = Registry::empty();
        registry.register::<Sheldon>();
        for _ in 0..2 {
            registry
                .register_formatter::<Sheldon>("b", Formatter::new(|_: &Option<String>| Plain::Null))
                .unwrap();
        }
        let schema = registry.schema_of::<Sheldon>().unwrap();
        assert_eq!(schema.formatted_fields().count(), 1);

        assert!(registry.remove_formatter::<Sheldon>("b").is_some());
        assert!(registry.remove_formatter::<Sheldon>("b").is_none());
        assert!(registry.remove_parser::<Sheldon>("b").is_none());
    }

    #[test]
    fn convertible_through_handles() {
        let mut registry = Registry::empty();
        registry.register::<Sheldon>();

        let boxed: Box<dyn Convert> = Box::new(Sheldon::default());
        assert!(registry.is_convertible(&boxed));
        assert!(registry.is_convertible(&Rc::new(RefCell::new(Sheldon::default()))));
        assert!(!registry.is_convertible(&other::Sheldon { c: 1 }));
        assert!(!registry.is_convertible(&5_i32));
    }

    #[test]
    fn formatters_must_match_the_field() {
        let mut registry = Registry::empty();
        registry.register::<Sheldon>();

        let err = registry
            .register_formatter::<Sheldon>("b", Formatter::new(|_: &i32| Plain::Null))
            .unwrap_err();
        assert!(matches!(
            err,
            RegistrationError::HookType { hook: "formatter", found: "i32", .. }
        ));
        assert!(err.to_string().contains("core::option::Option<alloc::string::String>"));

        let err = registry
            .register_formatter::<Sheldon>(
                "nonexistent",
                Formatter::new(|_: &Option<String>| Plain::Null),
            )
            .unwrap_err();
        assert!(matches!(err, RegistrationError::UnknownField { hook: "formatter", .. }));

        let schema = registry.schema_of::<Sheldon>().unwrap();
        assert_eq!(schema.formatted_fields().count(), 0);
    }

    #[test]
    fn parsers_must_produce_the_field_type() {
        let mut registry = Registry::empty();
        registry.register::<Holder>();

        // Plain output only feeds fields that are deserialized.
        let err = registry
            .register_parser::<Holder>("inner", Parser::new(|raw| Ok::<_, HookError>(raw)))
            .unwrap_err();
        assert!(matches!(err, RegistrationError::HookType { hook: "parser", .. }));

        let err = registry
            .register_parser::<Holder>("inner", Parser::new(|_| Ok::<_, HookError>(5_i32)))
            .unwrap_err();
        assert!(matches!(err, RegistrationError::HookType { found: "i32", .. }));

        let err = registry
            .register_parser::<Holder>("cache", Parser::new(|_| Ok::<_, HookError>(Vec::<u8>::new())))
            .unwrap_err();
        assert!(matches!(err, RegistrationError::UnknownField { .. }));
        assert!(registry.schema_of::<Holder>().unwrap().parser("inner").is_none());

        registry
            .register_parser::<Holder>("inner", Parser::new(|_| Ok::<_, HookError>(None::<Sheldon>)))
            .unwrap();
        assert!(registry.schema_of::<Holder>().unwrap().parser("inner").is_some());
    }

    #[test]
    fn plain_parsers_feed_deserialized_fields() {
        let mut registry = Registry::empty();
        registry.register::<Sheldon>();
        registry
            .register_parser::<Sheldon>("a", Parser::new(|raw| Ok::<_, HookError>(raw)))
            .unwrap();
        let err = registry
            .register_parser::<Sheldon>("a", Parser::new(|_| Ok::<_, HookError>(String::new())))
            .unwrap_err();
        assert!(matches!(err, RegistrationError::HookType { .. }));
    }
}
