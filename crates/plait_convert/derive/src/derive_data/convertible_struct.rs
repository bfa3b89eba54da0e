use proc_macro2::Span;
use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields, Generics, Ident, Type};

use super::{FieldAttributes, TypeAttributes};

// -----------------------------------------------------------------------------
// StructField

/// How a field takes part in conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldRole {
    /// Listed, encoded and decoded.
    Active,
    /// Left out of conversion and built with `Default::default()`.
    Skipped,
    /// Holds the names of the supplied keyword fields.
    Supplied,
}

#[derive(Debug)]
pub(crate) struct StructField<'a> {
    pub ident: &'a Ident,
    pub ty: &'a Type,
    pub attrs: FieldAttributes,
    pub role: FieldRole,
}

impl StructField<'_> {
    /// The field name as seen in plain mappings.
    pub fn name(&self) -> String {
        self.ident.unraw().to_string()
    }
}

// -----------------------------------------------------------------------------
// ConvertibleStruct

/// A struct with named fields, ready for code generation.
pub(crate) struct ConvertibleStruct<'a> {
    pub ident: &'a Ident,
    pub generics: &'a Generics,
    pub attrs: TypeAttributes,
    pub fields: Vec<StructField<'a>>,
    pub plait_convert_path: syn::Path,
}

impl<'a> ConvertibleStruct<'a> {
    pub fn from_ast(ast: &'a DeriveInput) -> syn::Result<Self> {
        let named = match &ast.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => named,
                Fields::Unnamed(_) | Fields::Unit => {
                    return Err(syn::Error::new(
                        ast.ident.span(),
                        "`Convertible` can only be derived for structs with named fields",
                    ));
                }
            },
            Data::Enum(_) | Data::Union(_) => {
                return Err(syn::Error::new(
                    ast.ident.span(),
                    "`Convertible` can only be derived for structs",
                ));
            }
        };

        let attrs = TypeAttributes::parse_attrs(&ast.attrs)?;

        let mut fields = Vec::with_capacity(named.named.len());
        let mut supplied: Option<Span> = None;
        for field in &named.named {
            let Some(ident) = field.ident.as_ref() else {
                return Err(syn::Error::new(field.span(), "expected a named field"));
            };
            let field_attrs = FieldAttributes::parse_attrs(&field.attrs)?;

            let role = if let Some(span) = field_attrs.supplied {
                if supplied.replace(span).is_some() {
                    return Err(syn::Error::new(span, "only one field can be `supplied`"));
                }
                FieldRole::Supplied
            } else if field_attrs.skip.is_some() || ident.to_string().starts_with('_') {
                FieldRole::Skipped
            } else {
                FieldRole::Active
            };

            fields.push(StructField {
                ident,
                ty: &field.ty,
                attrs: field_attrs,
                role,
            });
        }

        Ok(Self {
            ident: &ast.ident,
            generics: &ast.generics,
            attrs,
            fields,
            plait_convert_path: crate::path::plait_convert(),
        })
    }

    pub fn fields_with(&self, role: FieldRole) -> impl Iterator<Item = &StructField<'a>> {
        self.fields.iter().filter(move |field| field.role == role)
    }

    pub fn active_fields(&self) -> impl Iterator<Item = &StructField<'a>> {
        self.fields_with(FieldRole::Active)
    }

    pub fn supplied_field(&self) -> Option<&StructField<'a>> {
        self.fields_with(FieldRole::Supplied).next()
    }

    /// Names of the listed fields, in declaration order.
    pub fn active_names(&self) -> Vec<String> {
        self.active_fields().map(StructField::name).collect()
    }

    #[cfg_attr(not(feature = "auto_register"), allow(dead_code))]
    #[inline]
    pub fn is_generic(&self) -> bool {
        !self.generics.params.is_empty()
    }
}
