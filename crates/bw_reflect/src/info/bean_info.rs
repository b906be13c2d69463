use core::fmt;

use bw_utils::hash::{FixedHashState, HashMap};

use crate::info::{TypeInfo, Typed};

// -----------------------------------------------------------------------------
// PropertyInfo

/// One accessor-pair property of a bean.
///
/// A property is readable when it has a getter and writable when it has a
/// setter. The getter and setter may declare different types, e.g. a setter
/// taking `T` paired with a getter returning `Option<T>`.
///
/// ```
/// use bw_reflect::info::PropertyInfo;
///
/// let info = PropertyInfo::new("name").with_setter::<String>();
/// assert!(!info.is_readable());
/// assert!(info.is_writable());
/// assert!(info.write_type().unwrap().is::<String>());
/// ```
#[derive(Clone)]
pub struct PropertyInfo {
    name: &'static str,
    read_type: Option<fn() -> &'static TypeInfo>,
    write_type: Option<fn() -> &'static TypeInfo>,
    in_place: bool,
    fallible_getter: bool,
    fallible_setter: bool,
}

impl PropertyInfo {
    #[inline]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            read_type: None,
            write_type: None,
            in_place: false,
            fallible_getter: false,
            fallible_setter: false,
        }
    }

    /// Declares a getter returning `T`.
    #[inline]
    pub fn with_getter<T: Typed>(mut self) -> Self {
        self.read_type = Some(T::type_info);
        self
    }

    /// Declares a setter taking `T`.
    #[inline]
    pub fn with_setter<T: Typed>(mut self) -> Self {
        self.write_type = Some(T::type_info);
        self
    }

    /// Declares that the value can be borrowed mutably, so nested paths can be
    /// written without replacing it.
    #[inline]
    pub fn with_in_place_access(mut self) -> Self {
        self.in_place = true;
        self
    }

    #[inline]
    pub fn with_fallible_getter(mut self) -> Self {
        self.fallible_getter = true;
        self
    }

    #[inline]
    pub fn with_fallible_setter(mut self) -> Self {
        self.fallible_setter = true;
        self
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn is_readable(&self) -> bool {
        self.read_type.is_some()
    }

    #[inline]
    pub fn is_writable(&self) -> bool {
        self.write_type.is_some()
    }

    /// Declared getter type.
    #[inline]
    pub fn read_type(&self) -> Option<&'static TypeInfo> {
        self.read_type.map(|f| f())
    }

    /// Declared setter type.
    #[inline]
    pub fn write_type(&self) -> Option<&'static TypeInfo> {
        self.write_type.map(|f| f())
    }

    /// Declared type: the getter's if readable, otherwise the setter's.
    #[inline]
    pub fn property_type(&self) -> Option<&'static TypeInfo> {
        self.read_type().or_else(|| self.write_type())
    }

    #[inline]
    pub fn has_in_place_access(&self) -> bool {
        self.in_place
    }

    #[inline]
    pub fn has_fallible_getter(&self) -> bool {
        self.fallible_getter
    }

    #[inline]
    pub fn has_fallible_setter(&self) -> bool {
        self.fallible_setter
    }
}

impl fmt::Debug for PropertyInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyInfo")
            .field("name", &self.name)
            .field("read_type", &self.read_type().map(TypeInfo::type_path))
            .field("write_type", &self.write_type().map(TypeInfo::type_path))
            .finish()
    }
}

// -----------------------------------------------------------------------------
// FieldInfo

/// A plain field, reachable by name when no property of that name exists.
#[derive(Clone)]
pub struct FieldInfo {
    name: &'static str,
    type_info: fn() -> &'static TypeInfo,
}

impl FieldInfo {
    #[inline]
    pub fn new<T: Typed>(name: &'static str) -> Self {
        Self {
            name,
            type_info: T::type_info,
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }
}

impl fmt::Debug for FieldInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldInfo")
            .field("name", &self.name)
            .field("type", &self.type_info().type_path())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// BeanInfo

/// Properties and fields of a bean, in declaration order.
#[derive(Debug)]
pub struct BeanInfo {
    properties: Box<[PropertyInfo]>,
    fields: Box<[FieldInfo]>,
    property_index: HashMap<&'static str, usize>,
    field_index: HashMap<&'static str, usize>,
}

impl BeanInfo {
    /// Creates the info, indexing entries by name.
    ///
    /// When a name is declared twice, the first declaration wins.
    pub fn new(properties: Vec<PropertyInfo>, fields: Vec<FieldInfo>) -> Self {
        let mut property_index = HashMap::with_capacity_and_hasher(properties.len(), FixedHashState);
        for (index, property) in properties.iter().enumerate() {
            property_index.entry(property.name()).or_insert(index);
        }
        let mut field_index = HashMap::with_capacity_and_hasher(fields.len(), FixedHashState);
        for (index, field) in fields.iter().enumerate() {
            field_index.entry(field.name()).or_insert(index);
        }
        Self {
            properties: properties.into_boxed_slice(),
            fields: fields.into_boxed_slice(),
            property_index,
            field_index,
        }
    }

    /// Looks up a property by exact, case-sensitive name.
    #[inline]
    pub fn property(&self, name: &str) -> Option<&PropertyInfo> {
        self.property_index.get(name).map(|&index| &self.properties[index])
    }

    /// Looks up a plain field by exact, case-sensitive name.
    #[inline]
    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.field_index.get(name).map(|&index| &self.fields[index])
    }

    #[inline]
    pub fn properties(&self) -> &[PropertyInfo] {
        &self.properties
    }

    #[inline]
    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    /// Names of all properties followed by the names of all fields.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.properties
            .iter()
            .map(PropertyInfo::name)
            .chain(self.fields.iter().map(FieldInfo::name))
    }
}
