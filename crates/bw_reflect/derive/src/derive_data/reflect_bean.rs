use std::collections::BTreeMap;

use proc_macro2::Span;
use syn::punctuated::Punctuated;
use syn::{Field, Member, Path, Token, Type};

use super::{FieldAttributes, ReflectMeta};

// -----------------------------------------------------------------------------
// Accessors

/// How a property is read.
pub(crate) enum Getter {
    /// `&self.field`
    Field(Member),
    /// `fn(&self) -> &T`
    Borrowed(Path),
    /// `fn(&self) -> T`
    Owned(Path),
    /// `fn(&self) -> Result<&T, E>`
    Fallible(Path),
}

/// How a property is borrowed mutably.
pub(crate) enum MutAccess {
    Field(Member),
    Method(Path),
}

/// How a property is written.
pub(crate) enum Setter {
    /// `self.field = value`
    Field(Member),
    /// `fn(&mut self, T)`
    Plain(Path),
    /// `fn(&mut self, T) -> Result<(), E>`
    Fallible(Path),
}

// -----------------------------------------------------------------------------
// Bean Model

/// One property of the bean, backed by a field or by accessor methods.
pub(crate) struct BeanProperty {
    pub name: String,
    pub read_ty: Option<Type>,
    pub write_ty: Option<Type>,
    pub getter: Option<Getter>,
    pub getter_mut: Option<MutAccess>,
    pub setter: Option<Setter>,
}

/// A field exposed by name without accessor semantics.
pub(crate) struct PlainField {
    pub name: String,
    pub member: Member,
    pub ty: Type,
}

/// A struct with named fields.
pub(crate) struct ReflectBean<'a> {
    pub meta: ReflectMeta<'a>,
    pub properties: Vec<BeanProperty>,
    pub fields: Vec<PlainField>,
}

impl<'a> ReflectBean<'a> {
    pub fn new(mut meta: ReflectMeta<'a>, named: &'a Punctuated<Field, Token![,]>) -> syn::Result<Self> {
        let rename_all = meta.attrs.rename_all;
        let mut properties = Vec::new();
        let mut fields = Vec::new();
        let mut property_names = BTreeMap::new();
        let mut field_names = BTreeMap::new();

        for field in named {
            let attrs = FieldAttributes::parse_attrs(&field.attrs)?;
            if attrs.skip.is_some() {
                continue;
            }
            let Some(ident) = &field.ident else {
                continue;
            };

            let (name, span) = match &attrs.rename {
                Some(lit) => (lit.value(), lit.span()),
                None => {
                    let raw = ident.to_string();
                    let raw = raw.strip_prefix("r#").unwrap_or(&raw);
                    let name = match rename_all {
                        Some(rule) => rule.apply(raw),
                        None => raw.to_owned(),
                    };
                    (name, ident.span())
                }
            };
            check_name(&name, span)?;

            let member = Member::Named(ident.clone());
            if attrs.field.is_some() {
                check_unique(&mut field_names, &name, span)?;
                fields.push(PlainField {
                    name,
                    member,
                    ty: field.ty.clone(),
                });
                continue;
            }

            check_unique(&mut property_names, &name, span)?;
            let writable = attrs.read_only.is_none();
            properties.push(BeanProperty {
                name,
                read_ty: Some(field.ty.clone()),
                write_ty: writable.then(|| field.ty.clone()),
                getter: Some(Getter::Field(member.clone())),
                getter_mut: writable.then(|| MutAccess::Field(member.clone())),
                setter: writable.then_some(Setter::Field(member)),
            });
        }

        for accessor in core::mem::take(&mut meta.attrs.accessors) {
            let name = accessor.name.value();
            check_name(&name, accessor.name.span())?;
            check_unique(&mut property_names, &name, accessor.name.span())?;
            properties.push(BeanProperty {
                name,
                read_ty: accessor.read_ty,
                write_ty: accessor.write_ty,
                getter: accessor.getter,
                getter_mut: accessor.getter_mut,
                setter: accessor.setter,
            });
        }

        Ok(Self {
            meta,
            properties,
            fields,
        })
    }
}

/// Names must be addressable as a single path segment.
fn check_name(name: &str, span: Span) -> syn::Result<()> {
    if name.is_empty() {
        return Err(syn::Error::new(span, "property name cannot be empty"));
    }
    if let Some(c) = name
        .chars()
        .find(|&c| c.is_whitespace() || matches!(c, '.' | '[' | ']' | '\'' | '"'))
    {
        return Err(syn::Error::new(
            span,
            format!("property name `{name}` contains the path character {c:?}"),
        ));
    }
    Ok(())
}

fn check_unique(seen: &mut BTreeMap<String, Span>, name: &str, span: Span) -> syn::Result<()> {
    if let Some(first) = seen.get(name) {
        let mut err = syn::Error::new(span, format!("duplicate property name `{name}`"));
        err.combine(syn::Error::new(*first, "first declared here"));
        return Err(err);
    }
    seen.insert(name.to_owned(), span);
    Ok(())
}
