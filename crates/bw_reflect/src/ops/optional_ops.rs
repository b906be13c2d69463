use crate::Reflect;
use crate::info::TypeInfo;

/// A value that may be absent.
///
/// ```
/// use bw_reflect::{Reflect, ops::ReflectMut};
///
/// let mut age: Option<u8> = None;
/// let ReflectMut::Optional(optional) = age.reflect_mut() else { unreachable!() };
///
/// assert!(optional.value().is_none());
/// optional.replace(Box::new(3_u8)).unwrap();
/// assert_eq!(optional.value().unwrap().downcast_ref::<u8>(), Some(&3));
/// assert_eq!(age, Some(3));
/// ```
pub trait Optional: Reflect {
    fn value(&self) -> Option<&dyn Reflect>;

    fn value_mut(&mut self) -> Option<&mut dyn Reflect>;

    /// Stores a value of the inner type, handing it back if the type is wrong.
    fn replace(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;

    /// Takes the inner value out, leaving the optional empty.
    fn take_value(&mut self) -> Option<Box<dyn Reflect>>;

    fn inner_info(&self) -> &'static TypeInfo;

    #[inline]
    fn is_present(&self) -> bool {
        self.value().is_some()
    }
}
