use crate::Reflect;

/// An indexed container.
///
/// Fixed-length lists reject [`push`](List::push).
///
/// ```
/// use bw_reflect::{Reflect, ops::ReflectMut};
///
/// let mut names = vec![String::from("a")];
/// let ReflectMut::List(list) = names.reflect_mut() else { unreachable!() };
///
/// list.push(Box::new(String::from("b"))).unwrap();
/// list.set_item(0, Box::new(String::from("z"))).unwrap();
/// assert_eq!(list.len(), 2);
/// assert!(list.get(2).is_none());
/// assert_eq!(names, ["z", "b"]);
/// ```
pub trait List: Reflect {
    fn get(&self, index: usize) -> Option<&dyn Reflect>;

    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Replaces the item at `index`, which must be in bounds.
    ///
    /// The value is handed back if the index is out of bounds or the type is wrong.
    fn set_item(&mut self, index: usize, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;

    /// Appends an item. The value is handed back if the type is wrong
    /// or the list cannot grow.
    fn push(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;

    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_growable(&self) -> bool;
}
