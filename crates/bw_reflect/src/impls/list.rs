use crate::Reflect;
use crate::impls::GenericTypeInfoCell;
use crate::info::{ListInfo, TypeInfo, TypeKind, Typed};
use crate::ops::{List, ReflectKind, ReflectMut, ReflectRef};

fn clone_items<T: Typed>(items: &[T]) -> Option<Vec<T>> {
    items
        .iter()
        .map(|item| item.reflect_clone()?.take::<T>().ok())
        .collect()
}

fn items_eq<T: Typed>(a: &[T], b: &[T]) -> Option<bool> {
    if a.len() != b.len() {
        return Some(false);
    }
    for (a, b) in a.iter().zip(b) {
        if !a.reflect_partial_eq(b)? {
            return Some(false);
        }
    }
    Some(true)
}

// -----------------------------------------------------------------------------
// Vec

impl<T: Typed> Typed for Vec<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::new::<Self>(TypeKind::List(ListInfo::growable::<T>())).with_default::<Self>()
        })
    }
}

impl<T: Typed> Reflect for Vec<T> {
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
        ReflectKind::List
    }

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::List(self)
    }

    #[inline]
    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::List(self)
    }

    fn reflect_clone(&self) -> Option<Box<dyn Reflect>> {
        Some(Box::new(clone_items(self)?))
    }

    fn reflect_partial_eq(&self, other: &dyn Reflect) -> Option<bool> {
        items_eq(self, other.downcast_ref::<Self>()?)
    }
}

impl<T: Typed> List for Vec<T> {
    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        <[T]>::get(self, index).map(|item| item as &dyn Reflect)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        <[T]>::get_mut(self, index).map(|item| item as &mut dyn Reflect)
    }

    fn set_item(&mut self, index: usize, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        if index >= Vec::len(self) {
            return Err(value);
        }
        self[index] = value.take::<T>()?;
        Ok(())
    }

    fn push(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        Vec::push(self, value.take::<T>()?);
        Ok(())
    }

    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    #[inline]
    fn is_growable(&self) -> bool {
        true
    }
}

// -----------------------------------------------------------------------------
// [T; N]

impl<T: Typed, const N: usize> Typed for [T; N] {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::new::<Self>(TypeKind::List(ListInfo::fixed::<T>())))
    }
}

impl<T: Typed, const N: usize> Reflect for [T; N] {
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
        ReflectKind::List
    }

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::List(self)
    }

    #[inline]
    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::List(self)
    }

    fn reflect_clone(&self) -> Option<Box<dyn Reflect>> {
        let items: [T; N] = clone_items(self)?.try_into().ok()?;
        Some(Box::new(items))
    }

    fn reflect_partial_eq(&self, other: &dyn Reflect) -> Option<bool> {
        items_eq(self, other.downcast_ref::<Self>()?)
    }
}

impl<T: Typed, const N: usize> List for [T; N] {
    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        <[T]>::get(self, index).map(|item| item as &dyn Reflect)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        <[T]>::get_mut(self, index).map(|item| item as &mut dyn Reflect)
    }

    fn set_item(&mut self, index: usize, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        if index >= N {
            return Err(value);
        }
        self[index] = value.take::<T>()?;
        Ok(())
    }

    #[inline]
    fn push(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        Err(value)
    }

    #[inline]
    fn len(&self) -> usize {
        N
    }

    #[inline]
    fn is_growable(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::info::Typed;
    use crate::ops::ReflectMut;

    #[test]
    fn fixed_list_rejects_push() {
        let mut value = [1_u8, 2, 3];
        let ReflectMut::List(list) = value.reflect_mut() else {
            panic!("expected a list");
        };
        assert!(!list.is_growable());
        assert!(list.push(Box::new(4_u8)).is_err());
        assert!(list.set_item(3, Box::new(4_u8)).is_err());
        list.set_item(2, Box::new(9_u8)).unwrap();
        assert_eq!(value, [1, 2, 9]);
        assert!(!<[u8; 3] as Typed>::type_info().has_default());
    }

    #[test]
    fn clone_and_compare() {
        let value = vec![Some(1_u8), None];
        let copy = value.reflect_clone().unwrap();
        assert_eq!(copy.reflect_partial_eq(&value), Some(true));
        assert_eq!(copy.reflect_partial_eq(&vec![Some(1_u8)]), Some(false));
    }
}
