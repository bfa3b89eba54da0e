use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::{TypeId, type_name};

use plait_utils::hash::HashMap;

use super::{Formatter, Parser};
use crate::{Arguments, ConstructError, Convertible, FieldInfo, FieldSource, Object};

type ConstructFn = fn(&mut Arguments) -> Result<Box<dyn Object>, ConstructError>;

fn construct_boxed<T: Convertible>(args: &mut Arguments) -> Result<Box<dyn Object>, ConstructError> {
    let object: Box<dyn Object> = Box::new(T::construct(args)?);
    Ok(object)
}

/// Returns the last path segment of a type name, without generic arguments.
fn short_type_name(path: &'static str) -> &'static str {
    let base = path.split('<').next().unwrap_or(path);
    base.rsplit("::").next().unwrap_or(base)
}

// -----------------------------------------------------------------------------
// Schema

/// Everything the registry knows about one convertible type.
///
/// Holds the type's field source, the declared types of its fields, its
/// field hooks and a type-erased constructor.
#[derive(Debug, Clone)]
pub struct Schema {
    type_id: TypeId,
    type_path: &'static str,
    type_name: &'static str,
    source: FieldSource,
    field_info: fn(&str) -> Option<FieldInfo>,
    pub(super) formatters: HashMap<String, Formatter>,
    pub(super) parsers: HashMap<String, Parser>,
    construct: ConstructFn,
}

impl Schema {
    /// Creates the schema of `T` with no hooks.
    pub fn of<T: Convertible>() -> Self {
        let type_path = type_name::<T>();
        Self {
            type_id: TypeId::of::<T>(),
            type_path,
            type_name: short_type_name(type_path),
            source: T::field_source(),
            field_info: T::field_info,
            formatters: HashMap::default(),
            parsers: HashMap::default(),
            construct: construct_boxed::<T>,
        }
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The full path of the type, e.g. `app::model::Point`.
    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.type_path
    }

    /// The bare name of the type, e.g. `Point`.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[inline]
    pub fn field_source(&self) -> FieldSource {
        self.source
    }

    /// The declared type of the listed field `name`.
    #[inline]
    pub fn field_info(&self, name: &str) -> Option<FieldInfo> {
        (self.field_info)(name)
    }

    /// Lists the fields the encoder visits for `object`, in order.
    ///
    /// For [`FieldSource::Supplied`] these are the keyword fields the
    /// instance was constructed with, or nothing if it has no record of them.
    pub fn field_names<'a>(&self, object: &'a dyn Object) -> Vec<&'a str> {
        match self.source {
            FieldSource::Declared(names) => names.to_vec(),
            FieldSource::Supplied => object
                .supplied_fields()
                .map(|set| set.iter().collect())
                .unwrap_or_default(),
        }
    }

    #[inline]
    pub fn formatter(&self, field: &str) -> Option<&Formatter> {
        self.formatters.get(field)
    }

    #[inline]
    pub fn parser(&self, field: &str) -> Option<&Parser> {
        self.parsers.get(field)
    }

    /// Iterates over the fields that have a formatter.
    pub fn formatted_fields(&self) -> impl Iterator<Item = &str> {
        self.formatters.keys().map(String::as_str)
    }

    /// Runs the type's constructor.
    #[inline]
    pub fn construct(&self, args: &mut Arguments) -> Result<Box<dyn Object>, ConstructError> {
        (self.construct)(args)
    }
}

// -----------------------------------------------------------------------------
// Tests
