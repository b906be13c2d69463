//! Paths of `bw_reflect` items, as seen from the expanding crate.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Resolves `bw_reflect` through the caller's manifest.
///
/// Reading the manifest is not cheap, so the path is resolved once per
/// expansion and passed around.
pub(crate) fn bw_reflect() -> syn::Path {
    bw_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("bw_reflect"))
}

// -----------------------------------------------------------------------------
// Items

macro_rules! item_paths {
    ($($fn_name:ident => $($segment:ident)::+;)*) => {$(
        #[inline(always)]
        pub(crate) fn $fn_name(bw_reflect_path: &syn::Path) -> TokenStream {
            quote! { #bw_reflect_path$(::$segment)+ }
        }
    )*};
}

item_paths! {
    reflect_ => Reflect;
    value_ref_ => ValueRef;
    typed_ => info::Typed;
    type_info_ => info::TypeInfo;
    type_kind_ => info::TypeKind;
    bean_info_ => info::BeanInfo;
    property_info_ => info::PropertyInfo;
    field_info_ => info::FieldInfo;
    bean_ => ops::Bean;
    accessor_error_ => ops::AccessorError;
    write_error_ => ops::WriteError;
    reflect_kind_ => ops::ReflectKind;
    reflect_ref_ => ops::ReflectRef;
    reflect_mut_ => ops::ReflectMut;
    non_generic_cell_ => impls::NonGenericTypeInfoCell;
    generic_cell_ => impls::GenericTypeInfoCell;
}
