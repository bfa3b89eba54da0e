use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ConvertibleStruct;

/// `Convert` classifies the struct as an object; `Object` exposes its
/// listed fields by name.
pub(crate) fn impl_convert_and_object(data: &ConvertibleStruct) -> TokenStream {
    let plait_convert_path = &data.plait_convert_path;
    let option_ = crate::path::option_();
    let ident = data.ident;
    let (impl_generics, ty_generics, where_clause) = data.generics.split_for_impl();

    let names = data.active_names();
    let members = data.active_fields().map(|field| field.ident);

    let supplied_fields = data.supplied_field().map(|field| {
        let member = field.ident;
        quote! {
            #[inline]
            fn supplied_fields(&self) -> #option_<&#plait_convert_path::FieldSet> {
                #option_::Some(&self.#member)
            }
        }
    });

    quote! {
        impl #impl_generics #plait_convert_path::Convert for #ident #ty_generics #where_clause {
            #[inline]
            fn classify(&self) -> #plait_convert_path::Node<'_> {
                #plait_convert_path::Node::Object(self)
            }
        }

        impl #impl_generics #plait_convert_path::Object for #ident #ty_generics #where_clause {
            fn field(&self, name: &str) -> #option_<&dyn #plait_convert_path::Convert> {
                match name {
                    #(#names => #option_::Some(&self.#members as &dyn #plait_convert_path::Convert),)*
                    _ => #option_::None,
                }
            }

            #supplied_fields
        }
    }
}
