// -----------------------------------------------------------------------------
// Modules

mod bean_kind;
mod opaque_kind;
mod unit_enum_kind;

mod trait_reflect;
mod trait_typed;

// -----------------------------------------------------------------------------
// Internal API

use bean_kind::impl_bean;
use opaque_kind::impl_opaque;
use trait_reflect::{ReflectBody, impl_trait_reflect};
use trait_typed::impl_trait_typed;
use unit_enum_kind::impl_unit_enum;

use proc_macro::TokenStream;
use quote::quote;
use syn::DeriveInput;

use crate::derive_data::ReflectDerive;

/// Entry of `#[derive(Reflect)]`.
pub(crate) fn match_reflect_impls(ast: DeriveInput) -> TokenStream {
    let reflect_derive = match ReflectDerive::from_input(&ast) {
        Ok(val) => val,
        Err(err) => return err.into_compile_error().into(),
    };

    let reflect_impls = match reflect_derive {
        ReflectDerive::Bean(info) => impl_bean(&info),
        ReflectDerive::UnitEnum(info) => impl_unit_enum(&info),
        ReflectDerive::Opaque(meta) => impl_opaque(&meta),
    };

    TokenStream::from(quote! {
        const _: () = {
            #reflect_impls
        };
    })
}
