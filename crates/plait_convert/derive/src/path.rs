//! Paths into `plait_convert` used by the generated code.

use proc_macro2::TokenStream;
use quote::quote;

/// Get the correct access path to the `plait_convert` crate.
///
/// 1. For crates that depend on `plait_convert`, `::plait_convert` is returned.
/// 2. For crates that depend on `plait`, `::plait::convert` is returned.
/// 3. Otherwise `::plait_convert` is returned, which may be incorrect.
///
/// This reads the builder's `Cargo.toml`, so the path is computed once per
/// derive and passed around.
pub(crate) fn plait_convert() -> syn::Path {
    plait_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("plait_convert"))
}

#[cfg(feature = "auto_register")]
#[inline(always)]
pub(crate) fn auto_register_(plait_convert_path: &syn::Path) -> TokenStream {
    quote! {
        #plait_convert_path::__macro_exports::auto_register
    }
}

#[inline(always)]
pub(crate) fn option_() -> TokenStream {
    quote! { ::core::option::Option }
}

#[inline(always)]
pub(crate) fn result_() -> TokenStream {
    quote! { ::core::result::Result }
}

#[inline(always)]
pub(crate) fn default_() -> TokenStream {
    quote! { ::core::default::Default }
}
