use core::fmt;
use std::borrow::Cow;

use crate::{Reflect, ValueRef};

// -----------------------------------------------------------------------------
// Errors

/// Failure reported by a fallible getter or setter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessorError(Cow<'static, str>);

impl AccessorError {
    #[inline]
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self(message.into())
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccessorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl core::error::Error for AccessorError {}

/// Why [`Bean::write_property`] did not store a value.
#[derive(Debug)]
pub enum WriteError {
    /// No writable property of that name, or the value has the wrong type.
    /// The value is handed back untouched.
    Rejected(Box<dyn Reflect>),
    /// The setter ran and refused the value.
    Failed(AccessorError),
}

// -----------------------------------------------------------------------------
// Bean

/// A value with named properties.
///
/// Properties are accessor pairs: a getter and/or a setter under one name,
/// described by the [`BeanInfo`](crate::info::BeanInfo) in the bean's type info.
/// Plain fields are exposed separately through [`field`](Bean::field).
///
/// All lookups are exact and case-sensitive. `None` means "no such property
/// (or no such accessor)", never "the value is absent".
///
/// # Examples
///
/// ```
/// use bw_reflect::{Reflect, derive::Reflect};
/// use bw_reflect::ops::{Bean, ReflectMut};
///
/// #[derive(Reflect)]
/// struct Person {
///     name: String,
///     #[reflect(read_only)]
///     id: u64,
/// }
///
/// let mut person = Person { name: "tony".into(), id: 7 };
/// let ReflectMut::Bean(bean) = person.reflect_mut() else { unreachable!() };
///
/// bean.write_property("name", Box::new(String::from("kerry"))).unwrap();
/// assert!(bean.write_property("id", Box::new(8_u64)).is_err());
/// assert_eq!(person.name, "kerry");
/// assert_eq!(person.id, 7);
/// ```
pub trait Bean: Reflect {
    /// Invokes the getter of `name`.
    fn read_property(&self, name: &str) -> Option<Result<ValueRef<'_>, AccessorError>>;

    /// Borrows the value of `name` mutably, if the property allows in-place access.
    fn property_mut(&mut self, name: &str) -> Option<&mut dyn Reflect>;

    /// Invokes the setter of `name` with a value of exactly the setter's type.
    fn write_property(&mut self, name: &str, value: Box<dyn Reflect>) -> Result<(), WriteError>;

    /// Borrows the plain field `name`.
    fn field(&self, name: &str) -> Option<&dyn Reflect>;

    /// Borrows the plain field `name` mutably.
    fn field_mut(&mut self, name: &str) -> Option<&mut dyn Reflect>;
}

/// Formats a bean as a struct of its readable properties.
pub(crate) fn bean_debug(bean: &dyn Bean, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let info = bean.reflect_type_info();
    let mut out = f.debug_struct(info.type_name());
    if let Some(bean_info) = info.as_bean() {
        for property in bean_info.properties().iter().filter(|p| p.is_readable()) {
            match bean.read_property(property.name()) {
                Some(Ok(value)) => out.field(property.name(), &value),
                Some(Err(err)) => out.field(property.name(), &format_args!("<{err}>")),
                None => continue,
            };
        }
    }
    out.finish()
}
