use crate::Reflect;
use crate::info::TypeInfo;

/// Static access to a type's [`TypeInfo`].
///
/// Implemented by `#[derive(Reflect)]` and for the supported standard types.
///
/// # Examples
///
/// ```
/// use bw_reflect::info::{Typed, TypeKind};
///
/// let info = <Vec<u32> as Typed>::type_info();
/// assert_eq!(info.type_name(), "Vec<u32>");
///
/// let TypeKind::List(list) = info.kind() else { unreachable!() };
/// assert!(list.item_info().is::<u32>());
/// assert!(list.is_growable());
/// ```
///
/// # Manual implementation
///
/// Store the info in a [`NonGenericTypeInfoCell`], or a [`GenericTypeInfoCell`]
/// when the type has generic parameters, since a `static` inside a generic
/// function is shared by every instantiation.
///
/// ```
/// use bw_reflect::info::{Typed, TypeInfo};
/// use bw_reflect::impls::GenericTypeInfoCell;
/// # use bw_reflect::Reflect;
/// # use bw_reflect::ops::{ReflectKind, ReflectRef, ReflectMut};
///
/// struct Tagged<T>(T);
///
/// impl<T: Typed> Typed for Tagged<T> {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
///         CELL.get_or_insert::<Self>(TypeInfo::opaque::<Self>)
///     }
/// }
/// # impl<T: Typed> Reflect for Tagged<T> {
/// #     fn reflect_type_info(&self) -> &'static TypeInfo { Self::type_info() }
/// #     fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
/// #         *self = value.take::<Self>()?;
/// #         Ok(())
/// #     }
/// #     fn reflect_kind(&self) -> ReflectKind { ReflectKind::Opaque }
/// #     fn reflect_ref(&self) -> ReflectRef<'_> { ReflectRef::Opaque(self) }
/// #     fn reflect_mut(&mut self) -> ReflectMut<'_> { ReflectMut::Opaque(self) }
/// #     fn reflect_clone(&self) -> Option<Box<dyn Reflect>> { None }
/// # }
///
/// assert!(!core::ptr::eq(
///     <Tagged<u8>>::type_info(),
///     <Tagged<u16>>::type_info(),
/// ));
/// ```
///
/// [`NonGenericTypeInfoCell`]: crate::impls::NonGenericTypeInfoCell
/// [`GenericTypeInfoCell`]: crate::impls::GenericTypeInfoCell
pub trait Typed: Reflect + Sized {
    fn type_info() -> &'static TypeInfo;
}
