//! Coercion of property values to the declared type of their slot.

// -----------------------------------------------------------------------------
// Modules

mod numeric;

#[cfg(feature = "auto_register")]
mod auto_register;

// -----------------------------------------------------------------------------
// Exports

#[cfg(feature = "auto_register")]
pub use auto_register::ConverterRegistration;

use core::any::{TypeId, type_name};
use core::fmt;
use std::sync::{Arc, OnceLock};

use bw_reflect::Reflect;
use bw_reflect::info::{TypeInfo, TypeKind, WrapperInfo};
use bw_reflect::ops::{ReflectMut, ReflectRef};
use bw_utils::hash::{FixedHashState, HashMap};

type ConverterFn = Box<dyn Fn(&dyn Reflect) -> Option<Box<dyn Reflect>> + Send + Sync>;

// -----------------------------------------------------------------------------
// ConversionService

/// Converts values to the declared type of a property.
///
/// [`coerce`](Self::coerce) tries, in order:
///
/// 1. identity, when the value already has the target type;
/// 2. the optional strategy: a plain value is wrapped into `Option<T>` or
///    `Box<T>` (recursively, so `T` fits `Option<Box<T>>`), and a `Some(v)`
///    given for a plain target is unwrapped;
/// 3. [`convert`](Self::convert): registered converters, numeric conversion
///    with range checks, then parsing strings through the target's parse hook.
///
/// Failures hand the original value back untouched.
///
/// # Examples
///
/// ```
/// use bw_beans::ConversionService;
/// use bw_reflect::info::Typed;
///
/// let service = ConversionService::new();
///
/// let age = service.coerce(Box::new(String::from(" 42 ")), i32::type_info()).unwrap();
/// assert_eq!(age.downcast_ref::<i32>(), Some(&42));
///
/// let wrapped = service.coerce(Box::new(7_u8), <Option<u64>>::type_info()).unwrap();
/// assert_eq!(wrapped.downcast_ref::<Option<u64>>(), Some(&Some(7)));
///
/// let original = service.coerce(Box::new(300_i32), u8::type_info()).unwrap_err();
/// assert_eq!(original.downcast_ref::<i32>(), Some(&300));
/// ```
pub struct ConversionService {
    converters: HashMap<(TypeId, TypeId), ConverterFn>,
}

impl ConversionService {
    /// A service without registered converters.
    ///
    /// Identity, optional wrapping, numbers and parsing still work.
    pub fn empty() -> Self {
        Self {
            converters: HashMap::with_hasher(FixedHashState),
        }
    }

    /// A service with the default converters: every primitive to `String`.
    pub fn new() -> Self {
        let mut service = Self::empty();

        macro_rules! to_string {
            ($($ty:ty),*) => {$(
                service.register::<$ty, String>(|value| Some(value.to_string()));
            )*};
        }

        to_string!(
            bool, char, &'static str,
            i8, i16, i32, i64, i128, isize,
            u8, u16, u32, u64, u128, usize,
            f32, f64
        );
        service
    }

    /// The process-wide default service.
    ///
    /// Created on first use with [`new`](Self::new) followed by
    /// [`auto_register`](Self::auto_register), immutable afterwards.
    pub fn shared() -> Arc<Self> {
        static SHARED: OnceLock<Arc<ConversionService>> = OnceLock::new();

        SHARED
            .get_or_init(|| {
                let mut service = Self::new();
                service.auto_register();
                Arc::new(service)
            })
            .clone()
    }

    /// Registers a converter from `S` to `T`, replacing any previous one.
    ///
    /// Returning `None` means the value cannot be converted; the remaining
    /// strategies are still tried.
    ///
    /// ```
    /// use bw_beans::ConversionService;
    /// use bw_reflect::info::Typed;
    ///
    /// let mut service = ConversionService::new();
    /// service.register::<bool, i32>(|flag| Some(i32::from(*flag)));
    ///
    /// let value = service.coerce(Box::new(true), i32::type_info()).unwrap();
    /// assert_eq!(value.downcast_ref::<i32>(), Some(&1));
    /// ```
    pub fn register<S: Reflect, T: Reflect>(
        &mut self,
        convert: impl Fn(&S) -> Option<T> + Send + Sync + 'static,
    ) -> &mut Self {
        let erased: ConverterFn = Box::new(move |value: &dyn Reflect| {
            let value = value.downcast_ref::<S>()?;
            convert(value).map(|out| Box::new(out) as Box<dyn Reflect>)
        });

        let key = (TypeId::of::<S>(), TypeId::of::<T>());
        if self.converters.insert(key, erased).is_some() {
            log::warn!(
                "converter from `{}` to `{}` registered twice, the last one wins",
                type_name::<S>(),
                type_name::<T>(),
            );
        }
        self
    }

    /// Returns `true` if a converter from `source` to `target` is registered.
    #[inline]
    pub fn has_converter(&self, source: TypeId, target: TypeId) -> bool {
        self.converters.contains_key(&(source, target))
    }

    /// Installs every converter declared with
    /// [`submit_converter!`](crate::submit_converter).
    ///
    /// Returns `false` when the `auto_register` feature is disabled.
    #[cfg_attr(not(feature = "auto_register"), inline(always))]
    pub fn auto_register(&mut self) -> bool {
        #[cfg(not(feature = "auto_register"))]
        return false;

        #[cfg(feature = "auto_register")]
        {
            auto_register::register_all(self);
            true
        }
    }

    /// Converts without consuming `value`, skipping identity and the optional
    /// strategy.
    pub fn convert(&self, value: &dyn Reflect, target: &TypeInfo) -> Option<Box<dyn Reflect>> {
        if let Some(converter) = self.converters.get(&(value.ty_id(), target.type_id()))
            && let Some(out) = converter(value)
        {
            return Some(out);
        }

        if let Some(out) = numeric::convert(value, target.type_id()) {
            return Some(out);
        }

        let text = value
            .downcast_ref::<String>()
            .map(String::as_str)
            .or_else(|| value.downcast_ref::<&'static str>().copied());
        if let Some(text) = text
            && target.has_parser()
        {
            let parsed = target.parse(text);
            if parsed.is_none() {
                log::debug!("`{text}` cannot be parsed as `{}`", target.type_name());
            }
            return parsed;
        }

        None
    }

    /// Converts `value` to `target`, handing the original value back on failure.
    pub fn coerce(
        &self,
        value: Box<dyn Reflect>,
        target: &'static TypeInfo,
    ) -> Result<Box<dyn Reflect>, Box<dyn Reflect>> {
        if value.ty_id() == target.type_id() {
            return Ok(value);
        }
        if let Some(wrapper) = target.as_wrapper() {
            return self.wrap(value, target, wrapper);
        }
        if let TypeKind::Pointer(pointer) = value.reflect_type_info().kind() {
            return self.unbox(value, target, pointer);
        }
        if matches!(value.reflect_ref(), ReflectRef::Optional(_)) {
            return self.unwrap(value, target);
        }
        self.convert(&*value, target).ok_or(value)
    }

    /// Converts the pointee of a `Box<T>`, boxing it again on failure.
    fn unbox(
        &self,
        value: Box<dyn Reflect>,
        target: &'static TypeInfo,
        pointer: &WrapperInfo,
    ) -> Result<Box<dyn Reflect>, Box<dyn Reflect>> {
        let inner = pointer.unwrap(value)?;
        self.coerce(inner, target).map_err(|inner| match pointer.wrap(inner) {
            Ok(boxed) | Err(boxed) => boxed,
        })
    }

    fn wrap(
        &self,
        value: Box<dyn Reflect>,
        target: &'static TypeInfo,
        wrapper: &WrapperInfo,
    ) -> Result<Box<dyn Reflect>, Box<dyn Reflect>> {
        if target.is_optional() && is_absent(&*value) {
            return target.construct_default().ok_or(value);
        }
        let inner = self.coerce(value, wrapper.inner_info())?;
        wrapper.wrap(inner)
    }

    fn unwrap(
        &self,
        mut value: Box<dyn Reflect>,
        target: &'static TypeInfo,
    ) -> Result<Box<dyn Reflect>, Box<dyn Reflect>> {
        let inner = match value.reflect_mut() {
            ReflectMut::Optional(optional) => optional.take_value(),
            _ => None,
        };
        let Some(inner) = inner else {
            return Err(value);
        };

        self.coerce(inner, target).or_else(|inner| {
            if let ReflectMut::Optional(optional) = value.reflect_mut() {
                // Puts back what was just taken out, so the types match.
                let _ = optional.replace(inner);
            }
            Err(value)
        })
    }
}

/// `None`, or a value that is not optional at all.
fn is_absent(value: &dyn Reflect) -> bool {
    matches!(value.reflect_ref(), ReflectRef::Optional(optional) if !optional.is_present())
}

impl Default for ConversionService {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConversionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionService")
            .field("converters", &self.converters.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use bw_reflect::derive::Reflect;
    use bw_reflect::info::Typed;

    use super::ConversionService;

    #[derive(Reflect, Debug, Clone, Copy, PartialEq, Default)]
    #[reflect(default)]
    enum Colour {
        #[default]
        Red,
        #[reflect(rename = "green")]
        Green,
    }

    fn coerce<T: Typed + Clone>(value: impl bw_reflect::Reflect) -> Option<T> {
        let service = ConversionService::new();
        let out = service.coerce(Box::new(value), T::type_info()).ok()?;
        out.downcast_ref::<T>().cloned()
    }

    #[test]
    fn strings_parse() {
        assert_eq!(coerce::<i32>(String::from("-5")), Some(-5));
        assert_eq!(coerce::<bool>("on"), Some(true));
        assert_eq!(coerce::<char>("x"), Some('x'));
        assert_eq!(coerce::<String>("tony"), Some(String::from("tony")));
        assert_eq!(coerce::<Colour>(" green "), Some(Colour::Green));
        assert_eq!(coerce::<Colour>("Green"), None);
        assert_eq!(coerce::<i32>("foobar"), None);
    }

    #[test]
    fn values_display() {
        assert_eq!(coerce::<String>(42_u64), Some(String::from("42")));
        assert_eq!(coerce::<String>(false), Some(String::from("false")));
        assert_eq!(coerce::<String>(Some(1.5_f64)), Some(String::from("1.5")));
    }

    #[test]
    fn optional_strategy() {
        assert_eq!(coerce::<Option<i64>>(3_i8), Some(Some(3)));
        assert_eq!(coerce::<Option<i64>>(None::<i8>), Some(None));
        assert_eq!(coerce::<Option<i64>>(Some("12")), Some(Some(12)));
        assert_eq!(coerce::<i64>(Some(4_u8)), Some(4));
        assert_eq!(coerce::<i64>(None::<u8>), None);
        assert_eq!(coerce::<Box<u16>>("9"), Some(Box::new(9)));
        assert_eq!(coerce::<Option<Box<u16>>>(9_u8), Some(Some(Box::new(9))));
    }

    #[test]
    fn boxes_unwrap_on_read() {
        assert_eq!(coerce::<u8>(Box::new(9_u8)), Some(9));
        assert_eq!(coerce::<u64>(Box::new(9_u8)), Some(9));
        assert_eq!(coerce::<String>(Box::new(Some(2_i8))), Some(String::from("2")));

        let service = ConversionService::new();
        let original = service.coerce(Box::new(Box::new(-1_i8)), u8::type_info()).unwrap_err();
        assert_eq!(original.downcast_ref::<Box<i8>>(), Some(&Box::new(-1)));
    }

    #[test]
    fn failure_returns_original() {
        let service = ConversionService::new();

        let original = service
            .coerce(Box::new(Some(String::from("x"))), i32::type_info())
            .unwrap_err();
        assert_eq!(
            original.downcast_ref::<Option<String>>(),
            Some(&Some(String::from("x")))
        );

        let original = service.coerce(Box::new(-1_i32), <Option<u32>>::type_info()).unwrap_err();
        assert_eq!(original.downcast_ref::<i32>(), Some(&-1));
    }

    #[test]
    fn registered_converter_wins() {
        let mut service = ConversionService::empty();
        assert!(service.coerce(Box::new(Colour::Green), String::type_info()).is_err());

        service.register::<Colour, String>(|colour| Some(format!("{colour:?}")));
        let text = service.coerce(Box::new(Colour::Green), String::type_info()).unwrap();
        assert_eq!(text.downcast_ref::<String>().map(String::as_str), Some("Green"));
    }
}
