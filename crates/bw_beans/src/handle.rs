//! Classification of one path token against one value.

use std::borrow::Cow;

use bw_reflect::info::{FieldInfo, PropertyInfo, TypeInfo};
use bw_reflect::ops::{List, ReflectMut, ReflectRef, WriteError};
use bw_reflect::{Reflect, ValueRef};

use crate::PropertyErrorKind;
use crate::matches::PropertyMatches;
use crate::path::PathToken;

/// Which side of a property an operation needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Access {
    Read,
    Write,
}

/// When an indexed write past the end may extend a list.
#[derive(Debug, Clone, Copy)]
pub(crate) struct GrowPolicy {
    pub enabled: bool,
    /// Indices at or above this are never grown into.
    pub limit: usize,
}

/// `NotReadable` or `NotWritable` for a property that exists but cannot be
/// used that way.
pub(crate) fn denied(access: Access, property: &str, reason: &str) -> PropertyErrorKind {
    denied_with(access, property, Vec::new(), Some(reason.to_owned()))
}

fn denied_with(
    access: Access,
    property: &str,
    possible_matches: Vec<String>,
    reason: Option<String>,
) -> PropertyErrorKind {
    let property = property.to_owned();
    match access {
        Access::Read => PropertyErrorKind::NotReadable {
            property,
            possible_matches,
            reason,
        },
        Access::Write => PropertyErrorKind::NotWritable {
            property,
            possible_matches,
            reason,
        },
    }
}

pub(crate) fn mismatch(value: &dyn Reflect, required: &TypeInfo) -> PropertyErrorKind {
    PropertyErrorKind::TypeMismatch {
        value_type: value.reflect_type_name().to_owned(),
        required_type: required.type_name().to_owned(),
    }
}

// -----------------------------------------------------------------------------
// PropertyHandle

/// A slot of one value, resolved from one path token.
///
/// Resolution only inspects type information, it never reads or writes. The
/// handle is then used against the value it was resolved on.
#[derive(Debug, Clone)]
pub(crate) enum PropertyHandle<'p> {
    /// A bean property with a getter and/or a setter.
    AccessorPair(&'static PropertyInfo),
    /// A plain bean field.
    Field(&'static FieldInfo),
    /// An entry of a string-keyed map.
    KeyedContainer {
        key: Cow<'p, str>,
        value_info: &'static TypeInfo,
    },
    /// An item of a list or array.
    IndexedContainer {
        index: usize,
        item_info: &'static TypeInfo,
    },
}

impl<'p> PropertyHandle<'p> {
    /// Classifies `token` against a value of type `info`.
    ///
    /// Bean properties win over plain fields of the same name. A map accepts
    /// an index as the key of the same spelling, a list accepts a key that
    /// spells a number.
    pub fn resolve(
        info: &'static TypeInfo,
        token: &PathToken<'p>,
        access: Access,
    ) -> Result<Self, PropertyErrorKind> {
        match *token {
            PathToken::Property(name) => {
                let Some(bean) = info.as_bean() else {
                    return Err(denied_with(access, name, Vec::new(), None));
                };
                if let Some(property) = bean.property(name) {
                    return Ok(Self::AccessorPair(property));
                }
                if let Some(field) = bean.field(name) {
                    return Ok(Self::Field(field));
                }
                let matches = PropertyMatches::for_property(name, bean.names());
                Err(denied_with(access, name, matches.into_matches(), None))
            }
            PathToken::Index(index) => {
                if let Some(list) = info.as_list() {
                    return Ok(Self::IndexedContainer {
                        index,
                        item_info: list.item_info(),
                    });
                }
                if let Some(map) = info.as_map() {
                    return Ok(Self::KeyedContainer {
                        key: Cow::Owned(index.to_string()),
                        value_info: map.value_info(),
                    });
                }
                Err(denied_with(access, &token.to_string(), Vec::new(), None))
            }
            PathToken::Key(key) => {
                if let Some(map) = info.as_map() {
                    return Ok(Self::KeyedContainer {
                        key: Cow::Borrowed(key),
                        value_info: map.value_info(),
                    });
                }
                if let Some(list) = info.as_list() {
                    return match key.trim().parse::<usize>() {
                        Ok(index) => Ok(Self::IndexedContainer {
                            index,
                            item_info: list.item_info(),
                        }),
                        Err(_) => Err(PropertyErrorKind::TypeMismatch {
                            value_type: String::from("String"),
                            required_type: String::from("usize"),
                        }),
                    };
                }
                Err(denied_with(access, &token.to_string(), Vec::new(), None))
            }
        }
    }

    /// Name of the slot for messages: the property name or the bracket token.
    pub fn name(&self) -> Cow<'_, str> {
        match self {
            Self::AccessorPair(property) => Cow::Borrowed(property.name()),
            Self::Field(field) => Cow::Borrowed(field.name()),
            Self::KeyedContainer { key, .. } => Cow::Owned(PathToken::Key(&**key).to_string()),
            Self::IndexedContainer { index, .. } => Cow::Owned(format!("[{index}]")),
        }
    }

    pub fn read_type(&self) -> Option<&'static TypeInfo> {
        match self {
            Self::AccessorPair(property) => property.read_type(),
            Self::Field(field) => Some(field.type_info()),
            Self::KeyedContainer { value_info, .. } => Some(*value_info),
            Self::IndexedContainer { item_info, .. } => Some(*item_info),
        }
    }

    pub fn write_type(&self) -> Option<&'static TypeInfo> {
        match self {
            Self::AccessorPair(property) => property.write_type(),
            _ => self.read_type(),
        }
    }

    /// The getter type if readable, otherwise the setter type.
    #[inline]
    pub fn property_type(&self) -> Option<&'static TypeInfo> {
        self.read_type().or_else(|| self.write_type())
    }

    #[inline]
    pub fn is_readable(&self) -> bool {
        self.read_type().is_some()
    }

    #[inline]
    pub fn is_writable(&self) -> bool {
        self.write_type().is_some()
    }

    /// The target no longer has the shape the handle was resolved for.
    fn shape_changed(&self, access: Access) -> PropertyErrorKind {
        denied(access, &self.name(), "value does not expose this property")
    }

    /// Reads the slot.
    ///
    /// `Ok(None)` means an absent map entry. A list index past the end is a
    /// `Bounds` error.
    pub fn read<'a>(&self, target: &'a dyn Reflect) -> Result<Option<ValueRef<'a>>, PropertyErrorKind> {
        match (self, target.reflect_ref()) {
            (Self::AccessorPair(property), ReflectRef::Bean(bean)) => {
                match bean.read_property(property.name()) {
                    Some(Ok(value)) => Ok(Some(value)),
                    Some(Err(err)) => Err(PropertyErrorKind::AccessorFailed {
                        reason: err.message().to_owned(),
                    }),
                    None => Err(denied(Access::Read, property.name(), "property has no getter")),
                }
            }
            (Self::Field(field), ReflectRef::Bean(bean)) => match bean.field(field.name()) {
                Some(value) => Ok(Some(ValueRef::Borrowed(value))),
                None => Err(self.shape_changed(Access::Read)),
            },
            (Self::KeyedContainer { key, .. }, ReflectRef::Map(map)) => {
                Ok(map.get(key).map(ValueRef::Borrowed))
            }
            (Self::IndexedContainer { index, .. }, ReflectRef::List(list)) => match list.get(*index) {
                Some(value) => Ok(Some(ValueRef::Borrowed(value))),
                None => Err(PropertyErrorKind::Bounds {
                    index: *index,
                    len: list.len(),
                }),
            },
            _ => Err(self.shape_changed(Access::Read)),
        }
    }

    /// Borrows the slot mutably.
    ///
    /// `Ok(None)` means the property has no in-place access; it can only be
    /// replaced through its setter.
    pub fn read_mut<'a>(
        &self,
        target: &'a mut dyn Reflect,
    ) -> Result<Option<&'a mut dyn Reflect>, PropertyErrorKind> {
        match (self, target.reflect_mut()) {
            (Self::AccessorPair(property), ReflectMut::Bean(bean)) => {
                Ok(bean.property_mut(property.name()))
            }
            (Self::Field(field), ReflectMut::Bean(bean)) => match bean.field_mut(field.name()) {
                Some(value) => Ok(Some(value)),
                None => Err(self.shape_changed(Access::Write)),
            },
            (Self::KeyedContainer { key, .. }, ReflectMut::Map(map)) => match map.get_mut(key) {
                Some(value) => Ok(Some(value)),
                None => Err(PropertyErrorKind::NullIntermediateValue {
                    nested_path: PathToken::Key(&**key).to_string(),
                }),
            },
            (Self::IndexedContainer { index, .. }, ReflectMut::List(list)) => {
                let len = list.len();
                match list.get_mut(*index) {
                    Some(value) => Ok(Some(value)),
                    None => Err(PropertyErrorKind::Bounds { index: *index, len }),
                }
            }
            _ => Err(self.shape_changed(Access::Write)),
        }
    }

    /// Writes a value that already has the write type.
    ///
    /// On failure the attempted value comes back with the error when it is
    /// still available.
    pub fn write(
        &self,
        target: &mut dyn Reflect,
        value: Box<dyn Reflect>,
        grow: GrowPolicy,
    ) -> Result<(), (PropertyErrorKind, Option<Box<dyn Reflect>>)> {
        let rejected = |value: Box<dyn Reflect>| {
            let kind = match self.write_type() {
                Some(required) => mismatch(&*value, required),
                None => denied(Access::Write, &self.name(), "property has no setter"),
            };
            (kind, Some(value))
        };

        match (self, target.reflect_mut()) {
            (Self::AccessorPair(property), ReflectMut::Bean(bean)) => {
                // A failing setter consumes the value; keep a copy to report.
                let attempted = if property.has_fallible_setter() {
                    value.reflect_clone()
                } else {
                    None
                };
                match bean.write_property(property.name(), value) {
                    Ok(()) => Ok(()),
                    Err(WriteError::Rejected(value)) => Err(rejected(value)),
                    Err(WriteError::Failed(err)) => Err((
                        PropertyErrorKind::AccessorFailed {
                            reason: err.message().to_owned(),
                        },
                        attempted,
                    )),
                }
            }
            (Self::Field(field), ReflectMut::Bean(bean)) => match bean.field_mut(field.name()) {
                Some(slot) => slot.set(value).map_err(rejected),
                None => Err((self.shape_changed(Access::Write), Some(value))),
            },
            (Self::KeyedContainer { key, .. }, ReflectMut::Map(map)) => {
                map.insert(key, value).map_err(rejected)
            }
            (Self::IndexedContainer { index, item_info }, ReflectMut::List(list)) => {
                if *index < list.len() {
                    return list.set_item(*index, value).map_err(rejected);
                }
                grow_into(list, *index, *item_info, value, grow)
            }
            _ => Err((self.shape_changed(Access::Write), Some(value))),
        }
    }
}

/// Writes past the end of a list, padding with default items.
///
/// Nothing is pushed unless the whole write can succeed.
fn grow_into(
    list: &mut dyn List,
    index: usize,
    item_info: &'static TypeInfo,
    value: Box<dyn Reflect>,
    grow: GrowPolicy,
) -> Result<(), (PropertyErrorKind, Option<Box<dyn Reflect>>)> {
    let len = list.len();
    let bounds = PropertyErrorKind::Bounds { index, len };

    if !(grow.enabled && list.is_growable() && index < grow.limit) {
        return Err((bounds, Some(value)));
    }
    if value.ty_id() != item_info.type_id() {
        return Err((mismatch(&*value, item_info), Some(value)));
    }
    let padding: Option<Vec<_>> = (len..index).map(|_| item_info.construct_default()).collect();
    let Some(padding) = padding else {
        return Err((bounds, Some(value)));
    };

    for item in padding.into_iter().chain(core::iter::once(value)) {
        if let Err(item) = list.push(item) {
            return Err((mismatch(&*item, item_info), Some(item)));
        }
    }
    log::debug!("grew list of `{}` from {len} to {} items", item_info.type_name(), index + 1);
    Ok(())
}
