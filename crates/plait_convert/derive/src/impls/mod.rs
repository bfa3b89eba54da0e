//! Code generation.

mod auto_register;
mod convert;
mod convertible;

use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ConvertibleStruct;

/// Generates every impl of `#[derive(Convertible)]`.
///
/// The output is wrapped in an anonymous const so helper items stay local.
pub(crate) fn impl_convertible(data: &ConvertibleStruct) -> TokenStream {
    let convert_impls = convert::impl_convert_and_object(data);
    let convertible_impl = convertible::impl_convertible_trait(data);
    let auto_register = auto_register::get_auto_register_impl(data);

    quote! {
        const _: () = {
            #convert_impls

            #convertible_impl

            #auto_register
        };
    }
}
