use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectMeta;
use crate::path;

/// Kind-specific parts of a `Reflect` impl.
pub(crate) struct ReflectBody {
    /// Variant name shared by `ReflectKind`, `ReflectRef` and `ReflectMut`.
    pub kind: TokenStream,
    pub clone: TokenStream,
    pub partial_eq: TokenStream,
    pub debug: TokenStream,
}

/// Generates `Reflect`.
pub(crate) fn impl_trait_reflect(meta: &ReflectMeta, body: ReflectBody) -> TokenStream {
    let bw_reflect_path = &meta.bw_reflect_path;

    let reflect_ = path::reflect_(bw_reflect_path);
    let typed_ = path::typed_(bw_reflect_path);
    let type_info_ = path::type_info_(bw_reflect_path);
    let reflect_kind_ = path::reflect_kind_(bw_reflect_path);
    let reflect_ref_ = path::reflect_ref_(bw_reflect_path);
    let reflect_mut_ = path::reflect_mut_(bw_reflect_path);

    let ident = meta.ident;
    let (impl_generics, ty_generics, where_clause) = meta.impl_generics();

    let ReflectBody {
        kind,
        clone,
        partial_eq,
        debug,
    } = body;

    quote! {
        impl #impl_generics #reflect_ for #ident #ty_generics #where_clause {
            #[inline]
            fn reflect_type_info(&self) -> &'static #type_info_ {
                <Self as #typed_>::type_info()
            }

            fn set(
                &mut self,
                value: ::std::boxed::Box<dyn #reflect_>,
            ) -> ::core::result::Result<(), ::std::boxed::Box<dyn #reflect_>> {
                *self = value.take::<Self>()?;
                ::core::result::Result::Ok(())
            }

            #[inline]
            fn reflect_kind(&self) -> #reflect_kind_ {
                #reflect_kind_::#kind
            }

            #[inline]
            fn reflect_ref(&self) -> #reflect_ref_<'_> {
                #reflect_ref_::#kind(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> #reflect_mut_<'_> {
                #reflect_mut_::#kind(self)
            }

            #clone

            #partial_eq

            #debug
        }
    }
}

/// Flag-driven `reflect_clone`, `reflect_partial_eq` and `reflect_debug`.
///
/// Without `clone` the value cannot be copied. Without the other flags the
/// trait defaults apply.
pub(crate) fn flag_tokens(meta: &ReflectMeta) -> (TokenStream, TokenStream, TokenStream) {
    let reflect_ = path::reflect_(&meta.bw_reflect_path);

    let clone = match meta.attrs.clone {
        Some(_) => quote! {
            fn reflect_clone(&self) -> ::core::option::Option<::std::boxed::Box<dyn #reflect_>> {
                ::core::option::Option::Some(::std::boxed::Box::new(::core::clone::Clone::clone(self)))
            }
        },
        None => quote! {
            #[inline]
            fn reflect_clone(&self) -> ::core::option::Option<::std::boxed::Box<dyn #reflect_>> {
                ::core::option::Option::None
            }
        },
    };

    let partial_eq = match meta.attrs.partial_eq {
        Some(_) => quote! {
            fn reflect_partial_eq(&self, other: &dyn #reflect_) -> ::core::option::Option<bool> {
                let other = other.downcast_ref::<Self>()?;
                ::core::option::Option::Some(::core::cmp::PartialEq::eq(self, other))
            }
        },
        None => TokenStream::new(),
    };

    let debug = match meta.attrs.debug {
        Some(_) => quote! {
            #[inline]
            fn reflect_debug(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Debug::fmt(self, f)
            }
        },
        None => TokenStream::new(),
    };

    (clone, partial_eq, debug)
}
