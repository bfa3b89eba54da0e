use proc_macro2::TokenStream;

use crate::derive_data::ConvertibleStruct;

/// Generate `auto_register` implementation
#[cfg(feature = "auto_register")]
pub(crate) fn get_auto_register_impl(data: &ConvertibleStruct) -> TokenStream {
    use quote::quote_spanned;

    let Some(span) = data.attrs.auto_register else {
        return TokenStream::new();
    };
    // Generic types have no single instance to register.
    if data.is_generic() {
        return TokenStream::new();
    }

    let auto_register_ = crate::path::auto_register_(&data.plait_convert_path);
    let ident = data.ident;

    quote_spanned! { span =>
        #auto_register_::inventory::submit!{
            #auto_register_::__AutoRegisterFunc(
                <#ident as #auto_register_::__RegisterType>::__register
            )
        }
    }
}

/// Generate `auto_register` implementation
#[cfg(not(feature = "auto_register"))]
pub(crate) fn get_auto_register_impl(_: &ConvertibleStruct) -> TokenStream {
    TokenStream::new()
}
