use core::fmt;
use core::ops::Deref;

use crate::Reflect;

/// A value read through a property: either borrowed from its owner or
/// produced on the fly by a computing getter.
///
/// Dereferences to `dyn Reflect` in both cases.
///
/// ```
/// # use bw_reflect::{Reflect, ValueRef};
/// let name = String::from("tony");
/// let borrowed = ValueRef::Borrowed(&name);
/// let owned = ValueRef::Owned(Box::new(name.len()));
///
/// assert_eq!(borrowed.downcast_ref::<String>(), Some(&name));
/// assert_eq!(owned.downcast_ref::<usize>(), Some(&4));
/// assert!(owned.is_owned());
/// ```
pub enum ValueRef<'a> {
    Borrowed(&'a dyn Reflect),
    Owned(Box<dyn Reflect>),
}

impl<'a> ValueRef<'a> {
    #[inline]
    pub fn is_owned(&self) -> bool {
        matches!(self, Self::Owned(_))
    }

    /// Detaches the value from its owner.
    ///
    /// Borrowed values are cloned through [`Reflect::reflect_clone`], so this
    /// returns `None` for borrowed values of non-cloneable types.
    pub fn into_owned(self) -> Option<Box<dyn Reflect>> {
        match self {
            Self::Borrowed(value) => value.reflect_clone(),
            Self::Owned(value) => Some(value),
        }
    }

    /// Re-borrows the value for a shorter lifetime.
    #[inline]
    pub fn as_reflect(&self) -> &dyn Reflect {
        &**self
    }
}

impl Deref for ValueRef<'_> {
    type Target = dyn Reflect;

    #[inline]
    fn deref(&self) -> &Self::Target {
        match self {
            Self::Borrowed(value) => *value,
            Self::Owned(value) => &**value,
        }
    }
}

impl fmt::Debug for ValueRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).reflect_debug(f)
    }
}

#[cfg(test)]
mod tests {
    use super::ValueRef;

    #[test]
    fn as_reflect_reaches_the_value() {
        let age = 32_u32;
        let borrowed = ValueRef::Borrowed(&age);
        let owned = ValueRef::Owned(Box::new(String::from("tony")));

        assert_eq!(borrowed.as_reflect().downcast_ref::<u32>(), Some(&32));
        assert!(owned.as_reflect().is::<String>());
        assert!(!borrowed.is_owned());
    }
}
