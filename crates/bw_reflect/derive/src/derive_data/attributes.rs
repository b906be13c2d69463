//! `#[reflect(..)]` attributes on types and fields.

use proc_macro2::Span;
use syn::meta::ParseNestedMeta;
use syn::spanned::Spanned;
use syn::{Attribute, LitStr, Path, Type};

use super::{Getter, MutAccess, Setter};
use crate::REFLECT_ATTRIBUTE_NAME;

// -----------------------------------------------------------------------------
// Rename Rule

/// Case conversion applied to field and variant names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RenameRule {
    CamelCase,
    PascalCase,
    SnakeCase,
}

impl RenameRule {
    fn from_lit(lit: &LitStr) -> syn::Result<Self> {
        match lit.value().as_str() {
            "camelCase" => Ok(Self::CamelCase),
            "PascalCase" => Ok(Self::PascalCase),
            "snake_case" => Ok(Self::SnakeCase),
            other => Err(syn::Error::new(
                lit.span(),
                format!(
                    "unknown rename rule `{other}`, expected `camelCase`, `PascalCase` or `snake_case`"
                ),
            )),
        }
    }

    pub fn apply(self, name: &str) -> String {
        use heck::{ToLowerCamelCase, ToSnakeCase, ToUpperCamelCase};

        match self {
            Self::CamelCase => name.to_lower_camel_case(),
            Self::PascalCase => name.to_upper_camel_case(),
            Self::SnakeCase => name.to_snake_case(),
        }
    }
}

fn set_flag(slot: &mut Option<Span>, meta: &ParseNestedMeta) -> syn::Result<()> {
    if slot.is_some() {
        return Err(meta.error("duplicate attribute"));
    }
    *slot = Some(meta.path.span());
    Ok(())
}

fn reflect_attrs(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident(REFLECT_ATTRIBUTE_NAME))
}

// -----------------------------------------------------------------------------
// Type Attributes

/// Attributes on the deriving type.
#[derive(Default)]
pub(crate) struct TypeAttributes {
    /// The type implements `Default`.
    pub default: Option<Span>,
    /// The type implements `Clone`.
    pub clone: Option<Span>,
    /// The type implements `Debug`.
    pub debug: Option<Span>,
    /// The type implements `PartialEq`.
    pub partial_eq: Option<Span>,
    pub rename_all: Option<RenameRule>,
    pub accessors: Vec<AccessorAttribute>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();
        for attr in reflect_attrs(attrs) {
            attr.parse_nested_meta(|meta| out.parse_meta(meta))?;
        }
        Ok(out)
    }

    fn parse_meta(&mut self, meta: ParseNestedMeta) -> syn::Result<()> {
        if meta.path.is_ident("default") {
            set_flag(&mut self.default, &meta)
        } else if meta.path.is_ident("clone") {
            set_flag(&mut self.clone, &meta)
        } else if meta.path.is_ident("debug") {
            set_flag(&mut self.debug, &meta)
        } else if meta.path.is_ident("partial_eq") {
            set_flag(&mut self.partial_eq, &meta)
        } else if meta.path.is_ident("rename_all") {
            if self.rename_all.is_some() {
                return Err(meta.error("duplicate attribute"));
            }
            let lit: LitStr = meta.value()?.parse()?;
            self.rename_all = Some(RenameRule::from_lit(&lit)?);
            Ok(())
        } else if meta.path.is_ident("accessor") {
            self.accessors.push(AccessorAttribute::parse(&meta)?);
            Ok(())
        } else {
            Err(meta.error(
                "unknown attribute, expected one of \
                 `default`, `clone`, `debug`, `partial_eq`, `rename_all`, `accessor`",
            ))
        }
    }

    /// Accessors only make sense on beans.
    pub fn reject_accessors(&self) -> syn::Result<()> {
        match self.accessors.first() {
            Some(accessor) => Err(syn::Error::new(
                accessor.span,
                "accessor properties require a struct with named fields",
            )),
            None => Ok(()),
        }
    }
}

// -----------------------------------------------------------------------------
// Accessor Attribute

/// `#[reflect(accessor(name = "..", ty = T, get = m, set = m))]`
pub(crate) struct AccessorAttribute {
    pub span: Span,
    pub name: LitStr,
    pub read_ty: Option<Type>,
    pub write_ty: Option<Type>,
    pub getter: Option<Getter>,
    pub getter_mut: Option<MutAccess>,
    pub setter: Option<Setter>,
}

impl AccessorAttribute {
    fn parse(meta: &ParseNestedMeta) -> syn::Result<Self> {
        let span = meta.path.span();
        let mut name: Option<LitStr> = None;
        let mut ty: Option<Type> = None;
        let mut set_ty: Option<Type> = None;
        let mut getter: Option<Getter> = None;
        let mut getter_mut: Option<MutAccess> = None;
        let mut setter: Option<Setter> = None;

        meta.parse_nested_meta(|inner| {
            let key = &inner.path;
            if key.is_ident("name") {
                replace_once(&mut name, inner.value()?.parse()?, &inner)
            } else if key.is_ident("ty") {
                replace_once(&mut ty, inner.value()?.parse()?, &inner)
            } else if key.is_ident("set_ty") {
                replace_once(&mut set_ty, inner.value()?.parse()?, &inner)
            } else if key.is_ident("get") {
                let path: Path = inner.value()?.parse()?;
                replace_once(&mut getter, Getter::Borrowed(path), &inner)
            } else if key.is_ident("get_owned") {
                let path: Path = inner.value()?.parse()?;
                replace_once(&mut getter, Getter::Owned(path), &inner)
            } else if key.is_ident("try_get") {
                let path: Path = inner.value()?.parse()?;
                replace_once(&mut getter, Getter::Fallible(path), &inner)
            } else if key.is_ident("get_mut") {
                let path: Path = inner.value()?.parse()?;
                replace_once(&mut getter_mut, MutAccess::Method(path), &inner)
            } else if key.is_ident("set") {
                let path: Path = inner.value()?.parse()?;
                replace_once(&mut setter, Setter::Plain(path), &inner)
            } else if key.is_ident("try_set") {
                let path: Path = inner.value()?.parse()?;
                replace_once(&mut setter, Setter::Fallible(path), &inner)
            } else {
                Err(inner.error(
                    "unknown accessor key, expected one of `name`, `ty`, `set_ty`, \
                     `get`, `get_owned`, `try_get`, `get_mut`, `set`, `try_set`",
                ))
            }
        })?;

        let Some(name) = name else {
            return Err(syn::Error::new(span, "accessor requires `name = \"..\"`"));
        };
        if getter.is_none() && setter.is_none() {
            return Err(syn::Error::new(span, "accessor declares neither a getter nor a setter"));
        }
        if getter.is_some() && ty.is_none() {
            return Err(syn::Error::new(span, "a getter requires `ty = ..`"));
        }
        if getter_mut.is_some() && getter.is_none() {
            return Err(syn::Error::new(span, "`get_mut` requires a getter"));
        }
        let write_ty = match &setter {
            Some(_) => match set_ty.or_else(|| ty.clone()) {
                Some(ty) => Some(ty),
                None => {
                    return Err(syn::Error::new(span, "a setter requires `set_ty = ..` or `ty = ..`"));
                }
            },
            None => None,
        };

        Ok(Self {
            span,
            name,
            read_ty: getter.as_ref().and(ty),
            write_ty,
            getter,
            getter_mut,
            setter,
        })
    }
}

fn replace_once<T>(slot: &mut Option<T>, value: T, meta: &ParseNestedMeta) -> syn::Result<()> {
    if slot.is_some() {
        return Err(meta.error("conflicting or duplicate accessor key"));
    }
    *slot = Some(value);
    Ok(())
}

// -----------------------------------------------------------------------------
// Field Attributes

/// Attributes on a named field.
#[derive(Default)]
pub(crate) struct FieldAttributes {
    pub skip: Option<Span>,
    pub field: Option<Span>,
    pub read_only: Option<Span>,
    pub rename: Option<LitStr>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();
        for attr in reflect_attrs(attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    set_flag(&mut out.skip, &meta)
                } else if meta.path.is_ident("field") {
                    set_flag(&mut out.field, &meta)
                } else if meta.path.is_ident("read_only") {
                    set_flag(&mut out.read_only, &meta)
                } else if meta.path.is_ident("rename") {
                    replace_once(&mut out.rename, meta.value()?.parse()?, &meta)
                } else {
                    Err(meta.error(
                        "unknown attribute, expected one of `skip`, `field`, `read_only`, `rename`",
                    ))
                }
            })?;
        }

        if let Some(span) = out.skip
            && (out.field.is_some() || out.read_only.is_some() || out.rename.is_some())
        {
            return Err(syn::Error::new(span, "`skip` cannot be combined with other attributes"));
        }
        if let (Some(span), Some(_)) = (out.read_only, out.field) {
            return Err(syn::Error::new(span, "`read_only` applies to properties, not plain fields"));
        }
        Ok(out)
    }
}
