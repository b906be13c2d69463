use proc_macro2::TokenStream;
use quote::quote;
use syn::{Generics, Ident};

use super::TypeAttributes;
use crate::path;

/// Information shared by every kind of derive.
pub(crate) struct ReflectMeta<'a> {
    pub attrs: TypeAttributes,
    pub ident: &'a Ident,
    pub generics: &'a Generics,
    /// `bw_reflect` as seen from the caller.
    pub bw_reflect_path: syn::Path,
}

impl<'a> ReflectMeta<'a> {
    pub fn new(attrs: TypeAttributes, ident: &'a Ident, generics: &'a Generics) -> Self {
        Self {
            attrs,
            ident,
            generics,
            bw_reflect_path: path::bw_reflect(),
        }
    }

    #[inline]
    pub fn is_generic(&self) -> bool {
        self.generics.type_params().next().is_some()
    }

    /// Generics split for an impl block, with every type parameter bound by
    /// `Typed`.
    pub fn impl_generics(&self) -> (TokenStream, TokenStream, TokenStream) {
        let typed_ = path::typed_(&self.bw_reflect_path);
        let (impl_generics, ty_generics, where_clause) = self.generics.split_for_impl();

        let params = self.generics.type_params().map(|param| &param.ident);
        let predicates = where_clause.map(|clause| &clause.predicates);
        let where_tokens = quote! {
            where
                #(#params: #typed_,)*
                #predicates
        };
        (quote!(#impl_generics), quote!(#ty_generics), where_tokens)
    }
}
