use crate::Reflect;

/// A string-keyed associative container.
///
/// ```
/// use std::collections::HashMap;
/// use bw_reflect::{Reflect, ops::ReflectMut};
///
/// let mut scores: HashMap<String, u32> = HashMap::new();
/// let ReflectMut::Map(map) = scores.reflect_mut() else { unreachable!() };
///
/// map.insert("tony", Box::new(7_u32)).unwrap();
/// assert!(map.insert("kerry", Box::new("7")).is_err());
/// assert_eq!(map.get("tony").unwrap().downcast_ref::<u32>(), Some(&7));
/// assert!(map.get("kerry").is_none());
/// ```
pub trait Map: Reflect {
    fn get(&self, key: &str) -> Option<&dyn Reflect>;

    fn get_mut(&mut self, key: &str) -> Option<&mut dyn Reflect>;

    /// Inserts or replaces the value under `key`.
    ///
    /// A value of the wrong type is handed back untouched.
    fn insert(&mut self, key: &str, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;

    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates entries; the order is the container's own.
    fn iter(&self) -> Box<dyn Iterator<Item = (&str, &dyn Reflect)> + '_>;
}
