use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectMeta;
use crate::path;

/// Generates `Typed`, caching the type info built by `type_info_tokens`.
pub(crate) fn impl_trait_typed(meta: &ReflectMeta, type_info_tokens: TokenStream) -> TokenStream {
    let bw_reflect_path = &meta.bw_reflect_path;
    let typed_ = path::typed_(bw_reflect_path);
    let type_info_ = path::type_info_(bw_reflect_path);

    // A static inside a generic fn is shared by every instantiation.
    let inner_cell_tokens = if meta.is_generic() {
        let info_cell = path::generic_cell_(bw_reflect_path);
        quote! {
            static CELL: #info_cell = #info_cell::new();
            CELL.get_or_insert::<Self>(|| {
                #type_info_tokens
            })
        }
    } else {
        let info_cell = path::non_generic_cell_(bw_reflect_path);
        quote! {
            static CELL: #info_cell = #info_cell::new();
            CELL.get_or_init(|| {
                #type_info_tokens
            })
        }
    };

    let ident = meta.ident;
    let (impl_generics, ty_generics, where_clause) = meta.impl_generics();

    quote! {
        impl #impl_generics #typed_ for #ident #ty_generics #where_clause {
            fn type_info() -> &'static #type_info_ {
                #inner_cell_tokens
            }
        }
    }
}

/// `.with_default::<Self>()` when the type declares `Default`.
pub(crate) fn default_tokens(meta: &ReflectMeta) -> TokenStream {
    match meta.attrs.default {
        Some(_) => quote! { .with_default::<Self>() },
        None => TokenStream::new(),
    }
}
