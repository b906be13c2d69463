use core::any::{TypeId, type_name};
use core::fmt;

use crate::Reflect;
use crate::info::{BeanInfo, ListInfo, MapInfo, WrapperInfo};
use crate::ops::ReflectKind;

/// Creates a default instance of a type.
pub type DefaultFn = fn() -> Box<dyn Reflect>;

/// Parses a value of a type from text, `None` if the text is not valid.
pub type ParseFn = fn(&str) -> Option<Box<dyn Reflect>>;

// -----------------------------------------------------------------------------
// TypeKind

/// Kind-specific part of a [`TypeInfo`].
#[derive(Debug)]
pub enum TypeKind {
    Bean(BeanInfo),
    Map(MapInfo),
    List(ListInfo),
    /// `Option<T>`: may be absent.
    Optional(WrapperInfo),
    /// `Box<T>`: always present, reflects as the boxed value.
    Pointer(WrapperInfo),
    Opaque,
}

// -----------------------------------------------------------------------------
// TypeInfo

/// Static information about one reflected type.
///
/// # Examples
///
/// ```
/// use bw_reflect::info::{Typed, TypeKind};
///
/// let info = <Option<Box<String>> as Typed>::type_info();
/// assert_eq!(info.type_name(), "Option<Box<String>>");
///
/// let wrapper = info.as_wrapper().unwrap();
/// assert!(wrapper.inner_info().as_wrapper().unwrap().inner_info().is::<String>());
/// ```
pub struct TypeInfo {
    type_id: TypeId,
    type_path: &'static str,
    type_name: String,
    kind: TypeKind,
    default: Option<DefaultFn>,
    parse: Option<ParseFn>,
}

impl TypeInfo {
    /// Creates the info of `T` with the given kind.
    pub fn new<T: Reflect>(kind: TypeKind) -> Self {
        let type_path = type_name::<T>();
        Self {
            type_id: TypeId::of::<T>(),
            type_path,
            type_name: short_type_name(type_path),
            kind,
            default: None,
            parse: None,
        }
    }

    /// Creates the info of an opaque leaf type.
    #[inline]
    pub fn opaque<T: Reflect>() -> Self {
        Self::new::<T>(TypeKind::Opaque)
    }

    /// Registers `T::default` as the default constructor.
    pub fn with_default<T: Reflect + Default>(mut self) -> Self {
        self.default = Some(|| Box::new(T::default()));
        self
    }

    /// Registers a parser turning text into a value of this type.
    #[inline]
    pub fn with_parser(mut self, parse: ParseFn) -> Self {
        self.parse = Some(parse);
        self
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Fully qualified type name, e.g. `alloc::vec::Vec<u8>`.
    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.type_path
    }

    /// Type name without module paths, e.g. `Vec<u8>`.
    #[inline]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    #[inline]
    pub fn is<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    #[inline]
    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    /// The [`ReflectKind`] a value of this type reports.
    ///
    /// Pointers report the kind of their pointee.
    pub fn reflect_kind(&self) -> ReflectKind {
        match &self.kind {
            TypeKind::Bean(_) => ReflectKind::Bean,
            TypeKind::Map(_) => ReflectKind::Map,
            TypeKind::List(_) => ReflectKind::List,
            TypeKind::Optional(_) => ReflectKind::Optional,
            TypeKind::Pointer(inner) => inner.inner_info().reflect_kind(),
            TypeKind::Opaque => ReflectKind::Opaque,
        }
    }

    #[inline]
    pub fn as_bean(&self) -> Option<&BeanInfo> {
        match &self.kind {
            TypeKind::Bean(info) => Some(info),
            TypeKind::Pointer(inner) => inner.inner_info().as_bean(),
            _ => None,
        }
    }

    #[inline]
    pub fn as_map(&self) -> Option<&MapInfo> {
        match &self.kind {
            TypeKind::Map(info) => Some(info),
            TypeKind::Pointer(inner) => inner.inner_info().as_map(),
            _ => None,
        }
    }

    #[inline]
    pub fn as_list(&self) -> Option<&ListInfo> {
        match &self.kind {
            TypeKind::List(info) => Some(info),
            TypeKind::Pointer(inner) => inner.inner_info().as_list(),
            _ => None,
        }
    }

    /// Returns the wrapper info of `Option<T>` and `Box<T>`.
    #[inline]
    pub fn as_wrapper(&self) -> Option<&WrapperInfo> {
        match &self.kind {
            TypeKind::Optional(info) | TypeKind::Pointer(info) => Some(info),
            _ => None,
        }
    }

    #[inline]
    pub fn is_optional(&self) -> bool {
        matches!(self.kind, TypeKind::Optional(_))
    }

    /// Returns `true` if [`construct_default`](Self::construct_default) can
    /// produce a value.
    pub fn has_default(&self) -> bool {
        match &self.kind {
            _ if self.default.is_some() => true,
            TypeKind::Pointer(inner) => inner.inner_info().has_default(),
            _ => false,
        }
    }

    /// Creates a default value of this type.
    ///
    /// `Box<T>` falls back to boxing the default of `T`.
    ///
    /// ```
    /// use bw_reflect::info::Typed;
    ///
    /// let value = <Box<u32> as Typed>::type_info().construct_default().unwrap();
    /// assert_eq!(value.downcast_ref::<Box<u32>>(), Some(&Box::new(0)));
    /// ```
    pub fn construct_default(&self) -> Option<Box<dyn Reflect>> {
        if let Some(default) = self.default {
            return Some(default());
        }
        match &self.kind {
            TypeKind::Pointer(inner) => inner.wrap(inner.inner_info().construct_default()?).ok(),
            _ => None,
        }
    }

    #[inline]
    pub fn has_parser(&self) -> bool {
        self.parse.is_some()
    }

    /// Parses a value of this type from text.
    ///
    /// ```
    /// use bw_reflect::info::Typed;
    ///
    /// let info = <i32 as Typed>::type_info();
    /// let value = info.parse(" 42 ").unwrap();
    /// assert_eq!(value.downcast_ref::<i32>(), Some(&42));
    /// assert!(info.parse("forty-two").is_none());
    /// ```
    #[inline]
    pub fn parse(&self, text: &str) -> Option<Box<dyn Reflect>> {
        self.parse.and_then(|parse| parse(text))
    }
}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeInfo")
            .field("type_path", &self.type_path)
            .field("kind", &self.kind)
            .field("default", &self.default.is_some())
            .field("parse", &self.parse.is_some())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Names

/// Strips module paths from every segment of a type path.
///
/// ```
/// use bw_reflect::info::short_type_name;
///
/// assert_eq!(short_type_name("alloc::vec::Vec<my::Bean>"), "Vec<Bean>");
/// assert_eq!(short_type_name("[core::option::Option<u8>; 4]"), "[Option<u8>; 4]");
/// assert_eq!(short_type_name("&str"), "&str");
/// ```
pub fn short_type_name(path: &str) -> String {
    fn push_last_segment(segment: &str, out: &mut String) {
        out.push_str(segment.rsplit("::").next().unwrap_or(segment));
    }

    let mut out = String::with_capacity(path.len());
    let mut start = 0;
    for (index, c) in path.char_indices() {
        if matches!(c, '<' | '>' | ',' | ' ' | '[' | ']' | ';' | '(' | ')' | '&') {
            push_last_segment(&path[start..index], &mut out);
            out.push(c);
            start = index + c.len_utf8();
        }
    }
    push_last_segment(&path[start..], &mut out);
    out
}
