use proc_macro2::Span;
use syn::Attribute;
use syn::meta::ParseNestedMeta;

use crate::CONVERTIBLE_ATTRIBUTE_NAME;

/// Records the flag in `slot`, rejecting repeats.
fn set_flag(slot: &mut Option<Span>, meta: &ParseNestedMeta) -> syn::Result<()> {
    if slot.is_some() {
        return Err(meta.error("duplicate attribute"));
    }
    *slot = Some(meta.path.require_ident()?.span());
    Ok(())
}

fn convertible_attrs(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident(CONVERTIBLE_ATTRIBUTE_NAME))
}

// -----------------------------------------------------------------------------
// TypeAttributes

/// `#[convertible(...)]` on the struct itself.
#[derive(Default, Debug)]
pub(crate) struct TypeAttributes {
    /// `default`: build from `Default::default()`.
    pub default: Option<Span>,
    /// `auto_register`: submit the type for link-time registration.
    #[cfg_attr(not(feature = "auto_register"), allow(dead_code))]
    pub auto_register: Option<Span>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in convertible_attrs(attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("default") {
                    set_flag(&mut this.default, &meta)
                } else if meta.path.is_ident("auto_register") {
                    set_flag(&mut this.auto_register, &meta)
                } else {
                    Err(meta.error("expected `default` or `auto_register`"))
                }
            })?;
        }
        Ok(this)
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

/// `#[convertible(...)]` on a field.
#[derive(Default, Debug)]
pub(crate) struct FieldAttributes {
    pub default: Option<Span>,
    pub skip: Option<Span>,
    pub parsed: Option<Span>,
    pub supplied: Option<Span>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in convertible_attrs(attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("default") {
                    set_flag(&mut this.default, &meta)
                } else if meta.path.is_ident("skip") {
                    set_flag(&mut this.skip, &meta)
                } else if meta.path.is_ident("parsed") {
                    set_flag(&mut this.parsed, &meta)
                } else if meta.path.is_ident("supplied") {
                    set_flag(&mut this.supplied, &meta)
                } else {
                    Err(meta.error("expected `default`, `skip`, `parsed` or `supplied`"))
                }
            })?;
        }
        this.validate()?;
        Ok(this)
    }

    /// `supplied` and `skip` exclude every other flag.
    fn validate(&self) -> syn::Result<()> {
        for (exclusive, name) in [(self.supplied, "supplied"), (self.skip, "skip")] {
            let Some(span) = exclusive else {
                continue;
            };
            let others = [self.default, self.parsed, self.supplied, self.skip]
                .into_iter()
                .flatten()
                .count();
            if others > 1 {
                return Err(syn::Error::new(
                    span,
                    format!("`{name}` cannot be combined with other field attributes"),
                ));
            }
        }
        Ok(())
    }
}
