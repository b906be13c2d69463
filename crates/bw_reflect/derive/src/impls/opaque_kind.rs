use proc_macro2::TokenStream;
use quote::quote;

use super::trait_reflect::flag_tokens;
use super::trait_typed::default_tokens;
use super::{ReflectBody, impl_trait_reflect, impl_trait_typed};
use crate::derive_data::ReflectMeta;
use crate::path;

/// Generates `Typed` and `Reflect` for a unit struct.
///
/// A unit struct has a single value, so it is always cloneable and equal to
/// itself.
pub(crate) fn impl_opaque(meta: &ReflectMeta) -> TokenStream {
    let bw_reflect_path = &meta.bw_reflect_path;
    let reflect_ = path::reflect_(bw_reflect_path);
    let type_info_ = path::type_info_(bw_reflect_path);

    let with_default = default_tokens(meta);
    let typed_impl = impl_trait_typed(
        meta,
        quote! {
            #type_info_::opaque::<Self>()
                #with_default
        },
    );

    let (_, _, debug) = flag_tokens(meta);
    let ident = meta.ident;
    let reflect_impl = impl_trait_reflect(
        meta,
        ReflectBody {
            kind: quote!(Opaque),
            clone: quote! {
                #[inline]
                fn reflect_clone(&self) -> ::core::option::Option<::std::boxed::Box<dyn #reflect_>> {
                    ::core::option::Option::Some(::std::boxed::Box::new(#ident))
                }
            },
            partial_eq: quote! {
                #[inline]
                fn reflect_partial_eq(&self, other: &dyn #reflect_) -> ::core::option::Option<bool> {
                    ::core::option::Option::Some(other.is::<Self>())
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
