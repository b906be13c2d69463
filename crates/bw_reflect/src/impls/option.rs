use crate::Reflect;
use crate::impls::GenericTypeInfoCell;
use crate::info::{TypeInfo, TypeKind, Typed, WrapperInfo};
use crate::ops::{Optional, ReflectKind, ReflectMut, ReflectRef};

fn wrap_option<T: Typed>(value: Box<dyn Reflect>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>> {
    Ok(Box::new(Some(value.take::<T>()?)))
}

fn unwrap_option<T: Typed>(value: Box<dyn Reflect>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>> {
    match value.take::<Option<T>>()? {
        Some(inner) => Ok(Box::new(inner)),
        None => Err(Box::new(None::<T>)),
    }
}

impl<T: Typed> Typed for Option<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            let wrapper = WrapperInfo::new::<T>(wrap_option::<T>, unwrap_option::<T>);
            TypeInfo::new::<Self>(TypeKind::Optional(wrapper)).with_default::<Self>()
        })
    }
}

impl<T: Typed> Reflect for Option<T> {
    #[inline]
    fn reflect_type_info(&self) -> &'static TypeInfo {
        <Self as Typed>::type_info()
    }

    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        *self = value.take::<Self>()?;
        Ok(())
    }

    #[inline]
    fn reflect_kind(&self) -> ReflectKind {
        ReflectKind::Optional
    }

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Optional(self)
    }

    #[inline]
    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Optional(self)
    }

    fn reflect_clone(&self) -> Option<Box<dyn Reflect>> {
        let copy: Option<T> = match self {
            Some(value) => Some(value.reflect_clone()?.take::<T>().ok()?),
            None => None,
        };
        Some(Box::new(copy))
    }

    fn reflect_partial_eq(&self, other: &dyn Reflect) -> Option<bool> {
        let other = other.downcast_ref::<Self>()?;
        match (self, other) {
            (Some(a), Some(b)) => a.reflect_partial_eq(b),
            (None, None) => Some(true),
            _ => Some(false),
        }
    }
}

impl<T: Typed> Optional for Option<T> {
    #[inline]
    fn value(&self) -> Option<&dyn Reflect> {
        self.as_ref().map(|value| value as &dyn Reflect)
    }

    #[inline]
    fn value_mut(&mut self) -> Option<&mut dyn Reflect> {
        self.as_mut().map(|value| value as &mut dyn Reflect)
    }

    fn replace(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        *self = Some(value.take::<T>()?);
        Ok(())
    }

    fn take_value(&mut self) -> Option<Box<dyn Reflect>> {
        self.take().map(|value| Box::new(value) as Box<dyn Reflect>)
    }

    #[inline]
    fn inner_info(&self) -> &'static TypeInfo {
        T::type_info()
    }
}

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::info::Typed;
    use crate::ops::ReflectMut;

    #[test]
    fn take_leaves_none() {
        let mut value = Some(String::from("tony"));
        let ReflectMut::Optional(optional) = value.reflect_mut() else {
            panic!("expected an optional");
        };
        let inner = optional.take_value().unwrap();
        assert_eq!(inner.take::<String>().unwrap(), "tony");
        assert_eq!(value, None);
    }

    #[test]
    fn default_is_absent() {
        let info = <Option<u8> as Typed>::type_info();
        assert!(info.is_optional());
        let value = info.construct_default().unwrap();
        assert_eq!(value.downcast_ref::<Option<u8>>(), Some(&None));
    }
}
