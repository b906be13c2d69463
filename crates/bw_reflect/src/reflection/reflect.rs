use core::any::{Any, TypeId};
use core::fmt;

use crate::impls;
use crate::info::TypeInfo;
use crate::ops::{ReflectKind, ReflectMut, ReflectRef};

// -----------------------------------------------------------------------------
// Reflect

/// The foundational trait of runtime introspection.
///
/// A reflected value can report its static [`TypeInfo`] and expose itself through
/// one capability view ([`ReflectRef`] / [`ReflectMut`]): a bean with named
/// properties, a string-keyed map, an indexed list, an optional wrapper, or an
/// opaque leaf value.
///
/// Prefer `#[derive(Reflect)]` over implementing this by hand.
///
/// # Type identification
///
/// [`Any::type_id`] on a `Box<dyn Reflect>` reports the box itself.
/// Use [`Reflect::ty_id`] instead:
///
/// ```rust
/// # use bw_reflect::Reflect;
/// # use core::any::{Any, TypeId};
/// let x: Box<dyn Reflect> = 32_i32.into_boxed_reflect();
///
/// assert!(x.type_id() != TypeId::of::<i32>());
/// assert!(x.ty_id() == TypeId::of::<i32>());
/// ```
///
/// # Manual implementation
///
/// ```rust, ignore
/// fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
///     *self = value.take::<Self>()?;
///     Ok(())
/// }
///
/// fn reflect_kind(&self) -> ReflectKind { ReflectKind::Bean }
/// fn reflect_ref(&self) -> ReflectRef<'_> { ReflectRef::Bean(self) }
/// fn reflect_mut(&mut self) -> ReflectMut<'_> { ReflectMut::Bean(self) }
/// ```
pub trait Reflect: Send + Sync + Any {
    /// Casts this value to `&dyn Reflect`.
    #[inline(always)]
    fn as_reflect(&self) -> &dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    /// Casts this value to `&mut dyn Reflect`.
    #[inline(always)]
    fn as_reflect_mut(&mut self) -> &mut dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    /// Boxes this value as `Box<dyn Reflect>`.
    ///
    /// ```
    /// # use bw_reflect::Reflect;
    /// let x: Box<dyn Reflect> = String::from("tony").into_boxed_reflect();
    /// assert!(x.is::<String>());
    /// ```
    #[inline(always)]
    fn into_boxed_reflect(self) -> Box<dyn Reflect>
    where
        Self: Sized,
    {
        Box::new(self)
    }

    /// Returns the [`TypeId`] of the concrete type behind the trait object.
    #[inline(always)]
    fn ty_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// Returns the static type information of the underlying type.
    fn reflect_type_info(&self) -> &'static TypeInfo;

    /// Shorthand for `self.reflect_type_info().type_name()`.
    #[inline]
    fn reflect_type_name(&self) -> &'static str {
        self.reflect_type_info().type_name()
    }

    /// Replaces this value with `value` if it has the same type.
    ///
    /// On a type mismatch, the value is handed back untouched.
    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;

    fn reflect_kind(&self) -> ReflectKind;

    fn reflect_ref(&self) -> ReflectRef<'_>;

    fn reflect_mut(&mut self) -> ReflectMut<'_>;

    /// Clones the value, or returns `None` if the type is not cloneable.
    ///
    /// ```
    /// # use bw_reflect::Reflect;
    /// let names = vec![String::from("a"), String::from("b")];
    /// let copy = names.reflect_clone().unwrap();
    /// assert_eq!(copy.downcast_ref::<Vec<String>>(), Some(&names));
    /// ```
    fn reflect_clone(&self) -> Option<Box<dyn Reflect>>;

    /// Compares with another reflected value, `None` if not comparable.
    #[inline]
    fn reflect_partial_eq(&self, _other: &dyn Reflect) -> Option<bool> {
        None
    }

    /// Formats the value by walking its capability view.
    fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        impls::kind_debug(self.reflect_ref(), self.reflect_type_info(), f)
    }
}

// -----------------------------------------------------------------------------
// dyn Reflect

impl dyn Reflect {
    /// Returns `true` if the underlying value is of type `T`.
    #[inline(always)]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    /// Downcasts by reference, `None` if the value is not a `T`.
    ///
    /// ```
    /// # use bw_reflect::Reflect;
    /// let x: Box<dyn Reflect> = 10_u8.into_boxed_reflect();
    /// assert_eq!(x.downcast_ref::<u8>(), Some(&10));
    /// assert_eq!(x.downcast_ref::<u16>(), None);
    /// ```
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    /// Downcasts by mutable reference, `None` if the value is not a `T`.
    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        <dyn Any>::downcast_mut(self)
    }

    /// Downcasts the box, handing it back unchanged if the value is not a `T`.
    #[inline]
    pub fn downcast<T: Any>(self: Box<dyn Reflect>) -> Result<Box<T>, Box<dyn Reflect>> {
        if self.is::<T>() {
            #[expect(unsafe_code, reason = "type is already checked")]
            Ok(unsafe { <Box<dyn Any>>::downcast::<T>(self).unwrap_unchecked() })
        } else {
            Err(self)
        }
    }

    /// Unboxes the value, handing the box back unchanged if it is not a `T`.
    ///
    /// ```
    /// # use bw_reflect::Reflect;
    /// let x: Box<dyn Reflect> = 10_i64.into_boxed_reflect();
    /// let x = x.take::<i32>().unwrap_err();
    /// assert_eq!(x.take::<i64>().unwrap(), 10);
    /// ```
    #[inline]
    pub fn take<T: Any>(self: Box<dyn Reflect>) -> Result<T, Box<dyn Reflect>> {
        self.downcast::<T>().map(|value| *value)
    }
}

impl fmt::Debug for dyn Reflect {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.reflect_debug(f)
    }
}
