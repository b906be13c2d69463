//! Parsed form of a `#[derive(Reflect)]` input.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod reflect_bean;
mod reflect_enum;
mod reflect_meta;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use attributes::{FieldAttributes, TypeAttributes};
pub(crate) use reflect_bean::{BeanProperty, Getter, MutAccess, ReflectBean, Setter};
pub(crate) use reflect_enum::ReflectEnum;
pub(crate) use reflect_meta::ReflectMeta;

use syn::{Data, DeriveInput, Fields};

/// The shape of the input type.
pub(crate) enum ReflectDerive<'a> {
    Bean(ReflectBean<'a>),
    UnitEnum(ReflectEnum<'a>),
    Opaque(ReflectMeta<'a>),
}

impl<'a> ReflectDerive<'a> {
    pub fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        let attrs = TypeAttributes::parse_attrs(&input.attrs)?;
        let meta = ReflectMeta::new(attrs, &input.ident, &input.generics);

        match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(fields) => {
                    Ok(Self::Bean(ReflectBean::new(meta, &fields.named)?))
                }
                Fields::Unit => {
                    meta.attrs.reject_accessors()?;
                    Ok(Self::Opaque(meta))
                }
                Fields::Unnamed(fields) => Err(syn::Error::new_spanned(
                    fields,
                    "`Reflect` cannot be derived for tuple structs, use named fields",
                )),
            },
            Data::Enum(data) => {
                meta.attrs.reject_accessors()?;
                Ok(Self::UnitEnum(ReflectEnum::new(meta, &data.variants)?))
            }
            Data::Union(data) => Err(syn::Error::new_spanned(
                data.union_token,
                "`Reflect` cannot be derived for unions",
            )),
        }
    }
}
