//! See [`Convertible`](derive_convertible).
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static CONVERTIBLE_ATTRIBUTE_NAME: &str = "convertible";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Convertible Derivation
///
/// `#[derive(Convertible)]` implements `Convert`, `Object` and `Convertible`
/// for a struct with named fields.
///
/// The field list is the struct's fields in declaration order, without
/// skipped fields and fields whose name starts with `_`. The constructor
/// binds positional arguments to these fields in the same order.
///
/// Fields are decoded with `serde::Deserialize`, so every listed field type
/// must implement `DeserializeOwned` unless it is marked `parsed`.
///
/// ## Type Attributes
///
/// - `#[convertible(default)]`: start from `Default::default()` and only
///   overwrite the fields that were supplied. No field is required.
/// - `#[convertible(auto_register)]`: add the type to every registry created
///   with `Registry::new`. Ignored for generic types and without the
///   `auto_register` feature.
///
/// ## Field Attributes
///
/// - `#[convertible(default)]`: use `Default::default()` if the field is absent.
/// - `#[convertible(skip)]`: leave the field out of conversion. It is always
///   built with `Default::default()`.
/// - `#[convertible(parsed)]`: the field only accepts the output of a
///   registered parser, and needs no `Deserialize` implementation.
/// - `#[convertible(supplied)]`: on a `FieldSet` field, record the keyword
///   fields the value was decoded from. The encoder then writes exactly
///   those fields instead of the declared list.
///
/// Generic parameters get no implicit bounds; add `T: Convert` and the
/// like to the struct's where clause as its fields require.
///
/// ```rust, ignore
/// #[derive(Convertible, Default)]
/// #[convertible(default, auto_register)]
/// struct Settings {
///     name: String,
///     #[convertible(parsed)]
///     color: Color,
///     #[convertible(skip)]
///     cache: Vec<u8>,
///     #[convertible(supplied)]
///     supplied: FieldSet,
/// }
/// ```
#[proc_macro_derive(Convertible, attributes(convertible))]
pub fn derive_convertible(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match derive_data::ConvertibleStruct::from_ast(&ast) {
        Ok(data) => impls::impl_convertible(&data).into(),
        Err(err) => err.into_compile_error().into(),
    }
}
