use std::collections::BTreeMap;

use syn::punctuated::Punctuated;
use syn::{Fields, Ident, Token, Variant};

use super::{FieldAttributes, ReflectMeta};

/// A fieldless variant and the text it parses from.
pub(crate) struct UnitVariant<'a> {
    pub ident: &'a Ident,
    /// `None` for skipped variants, which are never parsed.
    pub name: Option<String>,
}

/// An enum whose variants carry no data.
pub(crate) struct ReflectEnum<'a> {
    pub meta: ReflectMeta<'a>,
    pub variants: Vec<UnitVariant<'a>>,
}

impl<'a> ReflectEnum<'a> {
    pub fn new(meta: ReflectMeta<'a>, variants: &'a Punctuated<Variant, Token![,]>) -> syn::Result<Self> {
        if variants.is_empty() {
            return Err(syn::Error::new_spanned(
                meta.ident,
                "`Reflect` cannot be derived for enums without variants",
            ));
        }

        let mut seen = BTreeMap::new();
        let mut out = Vec::with_capacity(variants.len());

        for variant in variants {
            if !matches!(variant.fields, Fields::Unit) {
                return Err(syn::Error::new_spanned(
                    &variant.fields,
                    "`Reflect` can only be derived for enums whose variants have no fields",
                ));
            }

            let attrs = FieldAttributes::parse_attrs(&variant.attrs)?;
            if let Some(span) = attrs.field.or(attrs.read_only) {
                return Err(syn::Error::new(span, "only `rename` and `skip` apply to variants"));
            }
            if attrs.skip.is_some() {
                out.push(UnitVariant {
                    ident: &variant.ident,
                    name: None,
                });
                continue;
            }

            let name = match (&attrs.rename, meta.attrs.rename_all) {
                (Some(lit), _) => lit.value(),
                (None, Some(rule)) => rule.apply(&variant.ident.to_string()),
                (None, None) => variant.ident.to_string(),
            };
            if let Some(first) = seen.insert(name.clone(), &variant.ident) {
                let mut err = syn::Error::new_spanned(
                    &variant.ident,
                    format!("duplicate variant name `{name}`"),
                );
                err.combine(syn::Error::new_spanned(first, "first declared here"));
                return Err(err);
            }

            out.push(UnitVariant {
                ident: &variant.ident,
                name: Some(name),
            });
        }

        Ok(Self {
            meta,
            variants: out,
        })
    }
}
