use core::hash::BuildHasher;
use std::collections::{BTreeMap, HashMap};

use crate::Reflect;
use crate::impls::GenericTypeInfoCell;
use crate::info::{MapInfo, TypeInfo, TypeKind, Typed};
use crate::ops::{Map, ReflectKind, ReflectMut, ReflectRef};

fn entries_eq<'a, V: Typed>(
    len: usize,
    mut entries: impl Iterator<Item = (&'a String, &'a V)>,
    other: &dyn Map,
) -> Option<bool> {
    if len != other.len() {
        return Some(false);
    }
    entries.try_fold(true, |equal, (key, value)| match other.get(key) {
        Some(other) => Some(equal && value.reflect_partial_eq(other)?),
        None => Some(false),
    })
}

macro_rules! impl_reflect_map {
    (
        impl[$($generics:tt)*] for $ty:ty;
        new = $new:expr;
    ) => {
        impl<V: Typed, $($generics)*> Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| {
                    TypeInfo::new::<Self>(TypeKind::Map(MapInfo::new::<V>())).with_default::<Self>()
                })
            }
        }

        impl<V: Typed, $($generics)*> Reflect for $ty {
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
                ReflectKind::Map
            }

            #[inline]
            fn reflect_ref(&self) -> ReflectRef<'_> {
                ReflectRef::Map(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> ReflectMut<'_> {
                ReflectMut::Map(self)
            }

            fn reflect_clone(&self) -> Option<Box<dyn Reflect>> {
                let mut copy: Self = $new(Map::len(self));
                for (key, value) in self.iter() {
                    copy.insert(key.clone(), value.reflect_clone()?.take::<V>().ok()?);
                }
                Some(Box::new(copy))
            }

            fn reflect_partial_eq(&self, other: &dyn Reflect) -> Option<bool> {
                match other.reflect_ref() {
                    ReflectRef::Map(other) => entries_eq(Map::len(self), self.iter(), other),
                    _ => Some(false),
                }
            }
        }

        impl<V: Typed, $($generics)*> Map for $ty {
            #[inline]
            fn get(&self, key: &str) -> Option<&dyn Reflect> {
                <$ty>::get(self, key).map(|value| value as &dyn Reflect)
            }

            #[inline]
            fn get_mut(&mut self, key: &str) -> Option<&mut dyn Reflect> {
                <$ty>::get_mut(self, key).map(|value| value as &mut dyn Reflect)
            }

            fn insert(&mut self, key: &str, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
                <$ty>::insert(self, key.to_owned(), value.take::<V>()?);
                Ok(())
            }

            #[inline]
            fn len(&self) -> usize {
                <$ty>::len(self)
            }

            fn iter(&self) -> Box<dyn Iterator<Item = (&str, &dyn Reflect)> + '_> {
                Box::new(
                    <$ty>::iter(self).map(|(key, value)| (key.as_str(), value as &dyn Reflect)),
                )
            }
        }
    };
}

impl_reflect_map! {
    impl[S: BuildHasher + Default + Send + Sync + 'static] for HashMap<String, V, S>;
    new = |len| HashMap::with_capacity_and_hasher(len, S::default());
}

impl_reflect_map! {
    impl[] for BTreeMap<String, V>;
    new = |_| BTreeMap::new();
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap};

    use crate::Reflect;
    use crate::info::Typed;

    #[test]
    fn maps_compare_across_containers() {
        let hashed: HashMap<String, u8> = [("a".to_owned(), 1)].into_iter().collect();
        let ordered: BTreeMap<String, u8> = [("a".to_owned(), 1)].into_iter().collect();
        assert_eq!(hashed.reflect_partial_eq(&ordered), Some(true));

        let copy = ordered.reflect_clone().unwrap();
        assert_eq!(copy.downcast_ref::<BTreeMap<String, u8>>(), Some(&ordered));
    }

    #[test]
    fn value_info() {
        let info = <BTreeMap<String, Vec<u8>> as Typed>::type_info();
        assert!(info.as_map().unwrap().value_info().is::<Vec<u8>>());
        assert!(info.has_default());
    }
}
