use proc_macro2::TokenStream;
use quote::quote;

use super::trait_typed::default_tokens;
use super::{ReflectBody, impl_trait_reflect, impl_trait_typed};
use crate::derive_data::ReflectEnum;
use crate::path;

/// Generates `Typed` and `Reflect` for an enum of unit variants.
///
/// The value is opaque. Its type info parses the variant name, surrounding
/// whitespace ignored, so string values can be coerced into it.
pub(crate) fn impl_unit_enum(info: &ReflectEnum) -> TokenStream {
    let meta = &info.meta;
    let bw_reflect_path = &meta.bw_reflect_path;
    let reflect_ = path::reflect_(bw_reflect_path);
    let type_info_ = path::type_info_(bw_reflect_path);

    let idents = info.variants.iter().map(|v| v.ident).collect::<Vec<_>>();
    let parsable = info
        .variants
        .iter()
        .filter_map(|v| v.name.as_ref().map(|name| (name, v.ident)));
    let (names, parsed_idents): (Vec<_>, Vec<_>) = parsable.unzip();
    let display_names = info
        .variants
        .iter()
        .map(|v| v.name.clone().unwrap_or_else(|| v.ident.to_string()))
        .collect::<Vec<_>>();

    let with_default = default_tokens(meta);
    let typed_impl = impl_trait_typed(
        meta,
        quote! {
            #type_info_::opaque::<Self>()
                .with_parser(|text| match text.trim() {
                    #(#names => ::core::option::Option::Some(
                        ::std::boxed::Box::new(Self::#parsed_idents) as ::std::boxed::Box<dyn #reflect_>
                    ),)*
                    _ => ::core::option::Option::None,
                })
                #with_default
        },
    );

    let debug = match meta.attrs.debug {
        Some(_) => quote! {
            #[inline]
            fn reflect_debug(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Debug::fmt(self, f)
            }
        },
        None => quote! {
            fn reflect_debug(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                match self {
                    #(Self::#idents => f.write_str(#display_names),)*
                }
            }
        },
    };

    let reflect_impl = impl_trait_reflect(
        meta,
        ReflectBody {
            kind: quote!(Opaque),
            clone: quote! {
                fn reflect_clone(&self) -> ::core::option::Option<::std::boxed::Box<dyn #reflect_>> {
                    ::core::option::Option::Some(match self {
                        #(Self::#idents => ::std::boxed::Box::new(Self::#idents) as ::std::boxed::Box<dyn #reflect_>,)*
                    })
                }
            },
            partial_eq: quote! {
                fn reflect_partial_eq(&self, other: &dyn #reflect_) -> ::core::option::Option<bool> {
                    let other = other.downcast_ref::<Self>()?;
                    ::core::option::Option::Some(::core::matches!(
                        (self, other),
                        #((Self::#idents, Self::#idents))|*
                    ))
                }
            },
            debug,
        },
    );

    quote! {
        #typed_impl

        #reflect_impl
    }
}
