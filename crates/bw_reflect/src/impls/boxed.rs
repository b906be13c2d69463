use core::fmt;

use crate::Reflect;
use crate::impls::GenericTypeInfoCell;
use crate::info::{TypeInfo, TypeKind, Typed, WrapperInfo};
use crate::ops::{ReflectKind, ReflectMut, ReflectRef};

fn wrap_box<T: Typed>(value: Box<dyn Reflect>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>> {
    Ok(Box::new(value.downcast::<T>()?))
}

fn unwrap_box<T: Typed>(value: Box<dyn Reflect>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>> {
    let inner: Box<T> = value.take::<Box<T>>()?;
    Ok(inner)
}

impl<T: Typed> Typed for Box<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::new::<Self>(TypeKind::Pointer(WrapperInfo::new::<T>(wrap_box::<T>, unwrap_box::<T>)))
        })
    }
}

// Views and formatting go straight to the boxed value.
impl<T: Typed> Reflect for Box<T> {
    #[inline]
    fn reflect_type_info(&self) -> &'static TypeInfo {
        <Self as Typed>::type_info()
    }

    /// Accepts either a `Box<T>` or a bare `T`.
    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        match value.take::<Self>() {
            Ok(boxed) => {
                *self = boxed;
                Ok(())
            }
            Err(value) => (**self).set(value),
        }
    }

    #[inline]
    fn reflect_kind(&self) -> ReflectKind {
        (**self).reflect_kind()
    }

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        (**self).reflect_ref()
    }

    #[inline]
    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        (**self).reflect_mut()
    }

    fn reflect_clone(&self) -> Option<Box<dyn Reflect>> {
        let inner = (**self).reflect_clone()?.downcast::<T>().ok()?;
        Some(Box::new(inner))
    }

    fn reflect_partial_eq(&self, other: &dyn Reflect) -> Option<bool> {
        match other.downcast_ref::<Self>() {
            Some(other) => (**self).reflect_partial_eq(&**other),
            None => (**self).reflect_partial_eq(other),
        }
    }

    #[inline]
    fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).reflect_debug(f)
    }
}

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::info::Typed;
    use crate::ops::ReflectKind;

    #[test]
    fn transparent_kind_and_set() {
        let mut value: Box<Vec<u8>> = Box::new(vec![1]);
        assert_eq!(value.reflect_kind(), ReflectKind::List);
        assert!(<Box<Vec<u8>> as Typed>::type_info().as_list().is_some());

        value.set(Box::new(vec![2_u8, 3])).unwrap();
        assert_eq!(*value, [2, 3]);
        value.set(Box::new(Box::new(vec![4_u8]))).unwrap();
        assert_eq!(*value, [4]);
        assert!(value.set(Box::new(4_u8)).is_err());
    }

    #[test]
    fn unwrap_hands_out_the_pointee() {
        let info = <Box<Vec<u8>> as Typed>::type_info().as_wrapper().unwrap();
        let inner = info.unwrap(Box::new(Box::new(vec![7_u8]))).unwrap();
        assert_eq!(inner.take::<Vec<u8>>().unwrap(), [7]);

        let rejected = info.unwrap(Box::new(vec![7_u8])).unwrap_err();
        assert!(rejected.is::<Vec<u8>>());
    }
}
