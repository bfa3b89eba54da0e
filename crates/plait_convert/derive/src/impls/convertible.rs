use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::{ConvertibleStruct, FieldRole, StructField};

/// `args.take::<T>("name")?`, or `take_parsed` for parsed fields.
fn take_expr(field: &StructField, args: &TokenStream) -> TokenStream {
    let name = field.name();
    let ty = field.ty;
    if field.attrs.parsed.is_some() {
        quote! { #args.take_parsed::<#ty>(#name)? }
    } else {
        quote! { #args.take::<#ty>(#name)? }
    }
}

pub(crate) fn impl_convertible_trait(data: &ConvertibleStruct) -> TokenStream {
    let plait_convert_path = &data.plait_convert_path;
    let result_ = crate::path::result_();
    let option_ = crate::path::option_();
    let default_ = crate::path::default_();
    let ident = data.ident;
    let (impl_generics, ty_generics, where_clause) = data.generics.split_for_impl();

    let args = quote! { __args };
    let names = data.active_names();

    let field_source = if data.supplied_field().is_some() {
        quote! { #plait_convert_path::FieldSource::Supplied }
    } else {
        quote! { #plait_convert_path::FieldSource::Declared(&[#(#names),*]) }
    };

    let infos = data.active_fields().map(|field| {
        let name = field.name();
        let ty = field.ty;
        if field.attrs.parsed.is_some() {
            quote! { #name => #option_::Some(#plait_convert_path::FieldInfo::parsed::<#ty>()), }
        } else {
            quote! { #name => #option_::Some(#plait_convert_path::FieldInfo::new::<#ty>()), }
        }
    });

    let body = if data.attrs.default.is_some() {
        // Start from the default value and overwrite what was supplied.
        let assign = data.active_fields().map(|field| {
            let member = field.ident;
            let take = take_expr(field, &args);
            quote! {
                if let #option_::Some(__value) = #take {
                    __this.#member = __value;
                }
            }
        });
        let supplied = data.supplied_field().map(|field| {
            let member = field.ident;
            quote! { __this.#member = #args.supplied().clone(); }
        });
        quote! {
            #[allow(unused_mut)]
            let mut __this = <Self as #default_>::default();
            #(#assign)*
            #supplied
            #args.finish()?;
            #result_::Ok(__this)
        }
    } else {
        let inits = data.fields.iter().map(|field| {
            let member = field.ident;
            let value = match field.role {
                FieldRole::Skipped => quote! { #default_::default() },
                FieldRole::Supplied => quote! { #args.supplied().clone() },
                FieldRole::Active => {
                    let take = take_expr(field, &args);
                    if field.attrs.default.is_some() {
                        quote! { #take.unwrap_or_default() }
                    } else {
                        let name = field.name();
                        quote! {
                            match #take {
                                #option_::Some(__value) => __value,
                                #option_::None => {
                                    return #result_::Err(
                                        #plait_convert_path::ConstructError::missing_field::<Self>(#name)
                                    );
                                }
                            }
                        }
                    }
                }
            };
            quote! { #member: #value, }
        });
        quote! {
            let __this = Self {
                #(#inits)*
            };
            #args.finish()?;
            #result_::Ok(__this)
        }
    };

    quote! {
        impl #impl_generics #plait_convert_path::Convertible for #ident #ty_generics #where_clause {
            #[inline]
            fn field_source() -> #plait_convert_path::FieldSource {
                #field_source
            }

            fn field_info(name: &str) -> #option_<#plait_convert_path::FieldInfo> {
                match name {
                    #(#infos)*
                    _ => #option_::None,
                }
            }

            fn construct(
                #args: &mut #plait_convert_path::Arguments,
            ) -> #result_<Self, #plait_convert_path::ConstructError> {
                #args.bind_positional(&[#(#names),*])?;
                #body
            }
        }
    }
}
