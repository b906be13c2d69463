use core::fmt;

use crate::Reflect;
use crate::info::{TypeInfo, Typed};

// -----------------------------------------------------------------------------
// ListInfo

/// Item type of an indexed container.
#[derive(Clone)]
pub struct ListInfo {
    item: fn() -> &'static TypeInfo,
    growable: bool,
}

impl ListInfo {
    /// Info of a list that can be extended, like `Vec<T>`.
    #[inline]
    pub fn growable<T: Typed>() -> Self {
        Self {
            item: T::type_info,
            growable: true,
        }
    }

    /// Info of a list with a fixed length, like `[T; N]`.
    #[inline]
    pub fn fixed<T: Typed>() -> Self {
        Self {
            item: T::type_info,
            growable: false,
        }
    }

    #[inline]
    pub fn item_info(&self) -> &'static TypeInfo {
        (self.item)()
    }

    #[inline]
    pub fn is_growable(&self) -> bool {
        self.growable
    }
}

impl fmt::Debug for ListInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListInfo")
            .field("item", &self.item_info().type_path())
            .field("growable", &self.growable)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// MapInfo

/// Value type of a string-keyed map.
#[derive(Clone)]
pub struct MapInfo {
    value: fn() -> &'static TypeInfo,
}

impl MapInfo {
    #[inline]
    pub fn new<V: Typed>() -> Self {
        Self {
            value: V::type_info,
        }
    }

    #[inline]
    pub fn value_info(&self) -> &'static TypeInfo {
        (self.value)()
    }
}

impl fmt::Debug for MapInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapInfo")
            .field("value", &self.value_info().type_path())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// WrapperInfo

type RewrapFn = fn(Box<dyn Reflect>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>>;

/// Inner type of `Option<T>` or `Box<T>`, and how to wrap and unwrap an
/// inner value.
#[derive(Clone)]
pub struct WrapperInfo {
    inner: fn() -> &'static TypeInfo,
    wrap: RewrapFn,
    unwrap: RewrapFn,
}

impl WrapperInfo {
    #[inline]
    pub fn new<T: Typed>(wrap: RewrapFn, unwrap: RewrapFn) -> Self {
        Self {
            inner: T::type_info,
            wrap,
            unwrap,
        }
    }

    #[inline]
    pub fn inner_info(&self) -> &'static TypeInfo {
        (self.inner)()
    }

    /// Wraps a value of the inner type, handing it back if it has another type.
    ///
    /// ```
    /// use bw_reflect::{Reflect, info::Typed};
    ///
    /// let info = <Option<u8> as Typed>::type_info().as_wrapper().unwrap();
    /// let wrapped = info.wrap(Box::new(3_u8)).unwrap();
    /// assert_eq!(wrapped.downcast_ref::<Option<u8>>(), Some(&Some(3)));
    ///
    /// let rejected = info.wrap(Box::new(3_u16)).unwrap_err();
    /// assert!(rejected.is::<u16>());
    /// ```
    #[inline]
    pub fn wrap(&self, value: Box<dyn Reflect>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>> {
        (self.wrap)(value)
    }

    /// Takes the inner value out of a wrapper of this type.
    ///
    /// Values of another type and `None` are handed back unchanged.
    ///
    /// ```
    /// use bw_reflect::{Reflect, info::Typed};
    ///
    /// let info = <Box<u8> as Typed>::type_info().as_wrapper().unwrap();
    /// let inner = info.unwrap(Box::new(Box::new(3_u8))).unwrap();
    /// assert_eq!(inner.downcast_ref::<u8>(), Some(&3));
    ///
    /// let info = <Option<u8> as Typed>::type_info().as_wrapper().unwrap();
    /// let absent = info.unwrap(Box::new(None::<u8>)).unwrap_err();
    /// assert!(absent.is::<Option<u8>>());
    /// ```
    #[inline]
    pub fn unwrap(&self, value: Box<dyn Reflect>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>> {
        (self.unwrap)(value)
    }
}

impl fmt::Debug for WrapperInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WrapperInfo")
            .field("inner", &self.inner_info().type_path())
            .finish()
    }
}
